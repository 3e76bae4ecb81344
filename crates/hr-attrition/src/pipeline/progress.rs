//! Progress reporting for the analysis pipeline.
//!
//! ```rust,ignore
//! let outcome = AnalysisPipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of the analysis pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    /// Reading the employee and census files
    Loading,
    /// Restricting the census to the comparable subpopulation
    Filtering,
    /// Mapping census categories onto the employee vocabulary
    Reconciling,
    /// Computing the probable salary index per stratum
    Estimating,
    /// Joining employees to their stratum
    Joining,
    /// Splitting the joined table at the salary index threshold
    Segmenting,
    /// Cross-tabulations, travel and distance breakdowns
    Aggregating,
    Complete,
    Failed,
}

impl AnalysisStage {
    /// The working stages, without the terminal states.
    pub const ORDERED: [AnalysisStage; 7] = [
        Self::Loading,
        Self::Filtering,
        Self::Reconciling,
        Self::Estimating,
        Self::Joining,
        Self::Segmenting,
        Self::Aggregating,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Datasets",
            Self::Filtering => "Filtering Census",
            Self::Reconciling => "Reconciling Categories",
            Self::Estimating => "Estimating Salary Index",
            Self::Joining => "Joining Strata",
            Self::Segmenting => "Segmenting Cohorts",
            Self::Aggregating => "Aggregating Attrition",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Share of the total run spent in this stage. The working stages sum to 1.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.30,
            Self::Filtering => 0.10,
            Self::Reconciling => 0.10,
            Self::Estimating => 0.15,
            Self::Joining => 0.15,
            Self::Segmenting => 0.05,
            Self::Aggregating => 0.15,
            Self::Complete | Self::Failed => 0.0,
        }
    }

    /// Overall progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Complete => 1.0,
            Self::Failed => 0.0,
            stage => Self::ORDERED
                .iter()
                .take_while(|earlier| *earlier != stage)
                .map(|earlier| earlier.weight())
                .sum(),
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub stage: AnalysisStage,
    /// Overall progress (0.0 - 1.0)
    pub progress: f32,
    pub message: String,
    /// Rows produced by the stage, once it has finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
}

impl ProgressUpdate {
    /// A stage has started.
    pub fn started(stage: AnalysisStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: stage.base_progress().clamp(0.0, 1.0),
            message: message.into(),
            rows: None,
        }
    }

    /// A stage has finished with `rows` output rows.
    pub fn finished(stage: AnalysisStage, rows: usize, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: (stage.base_progress() + stage.weight()).clamp(0.0, 1.0),
            message: message.into(),
            rows: Some(rows),
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self {
            stage: AnalysisStage::Complete,
            progress: 1.0,
            message: message.into(),
            rows: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: AnalysisStage::Failed,
            progress: 0.0,
            message: message.into(),
            rows: None,
        }
    }
}

/// Receives progress updates while the pipeline runs.
///
/// Implementations must be `Send + Sync` so a configured pipeline can be
/// moved to another thread.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// [`ProgressReporter`] backed by a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}
