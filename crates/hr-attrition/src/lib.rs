//! Employee attrition against census salary expectations.
//!
//! Joins an employee attrition dataset with a census salary survey to ask
//! whether employees paid above or below what their demographic stratum
//! would expect are more likely to leave, built with Rust and Polars.
//!
//! # Overview
//!
//! - **Loading**: the employee file (header row) and the census file
//!   (15 unnamed columns) into typed tables
//! - **Filtering**: private-sector, United States census respondents aged
//!   18 to 60
//! - **Reconciliation**: census job positions and education levels mapped
//!   onto the employee dataset's education fields and tiers
//! - **Estimation**: a probable salary index per stratum
//!   `(Age, EducationTier, EducationField, Gender)`
//! - **Join and segmentation**: employees matched to their stratum and split
//!   at the index threshold
//! - **Aggregation**: attrition cross-tabulations per cohort, plus attrition
//!   by business travel and commute distance
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hr_attrition::{AnalysisConfig, AnalysisPipeline, ReportGenerator};
//!
//! let config = AnalysisConfig::builder()
//!     .hr_path("IBM_HR_data.csv")
//!     .census_path("adult.csv")
//!     .build()?;
//!
//! let outcome = AnalysisPipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//!
//! print!("{}", ReportGenerator::render_cross_tab(&outcome.greater_than_expected));
//! print!("{}", ReportGenerator::render_travel(&outcome.travel)?);
//! ```
//!
//! # Zero denominators
//!
//! Percentages and rates are computed by [`utils::percentage`] and
//! [`utils::ratio`], which return [`AnalysisError::DivisionByZero`] instead of
//! NaN. The reporting layer turns that error, and only that one, into "no
//! data".

pub mod aggregate;
pub mod config;
pub mod error;
pub mod estimator;
pub mod filter;
pub mod joiner;
pub mod loader;
pub mod pipeline;
pub mod reconcile;
pub mod reporting;
pub mod schema;
pub mod segment;
pub mod types;
pub mod utils;

pub use aggregate::{
    DistanceScatter, attrition_values, cross_tabulate, distance_breakdown, distance_scatter,
    total_values_travel, travel_table,
};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{AnalysisError, Result, ResultExt};
pub use estimator::SalaryEstimator;
pub use filter::CensusFilter;
pub use joiner::Joiner;
pub use loader::DatasetLoader;
pub use pipeline::{
    AnalysisOutcome, AnalysisPipeline, AnalysisPipelineBuilder, AnalysisStage,
    ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
pub use reconcile::{CategoricalReconciler, MappingRule};
pub use reporting::{AnalysisReport, ReportGenerator};
pub use segment::{Cohorts, Segmenter};
pub use types::{
    AggregatedStratum, CrossTab, CrossTabEntry, DistanceBreakdown, DistancePartition,
    SalaryComparison, StageCounts, TravelSummary,
};
