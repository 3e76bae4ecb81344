//! Pipeline module.
//!
//! Orchestrates the stages in order, each taking its inputs explicitly and
//! returning new tables: load, filter, reconcile, estimate, join, segment and
//! aggregate.

mod builder;
pub mod progress;

pub use builder::{AnalysisOutcome, AnalysisPipeline, AnalysisPipelineBuilder};
pub use progress::{AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate};
