//! The analysis pipeline and its builder.

use crate::aggregate::{cross_tabulate, distance_breakdown, travel_table};
use crate::config::{AnalysisConfig, ConfigValidationError};
use crate::error::Result;
use crate::estimator::SalaryEstimator;
use crate::filter::CensusFilter;
use crate::joiner::Joiner;
use crate::loader::DatasetLoader;
use crate::pipeline::progress::{
    AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::reconcile::CategoricalReconciler;
use crate::segment::{Cohorts, Segmenter};
use crate::types::{CrossTab, DistanceBreakdown, SalaryComparison, StageCounts, TravelSummary};
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Everything one run of the pipeline produces.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Employee table as used by the travel and distance breakdowns.
    pub employees: DataFrame,
    /// Employees joined to their stratum, sorted by age.
    pub joined: DataFrame,
    pub cohorts: Cohorts,
    /// "Greater than expected" breakdown of the at-or-below cohort.
    pub greater_than_expected: CrossTab,
    /// "Less than expected" breakdown of the above cohort.
    pub less_than_expected: CrossTab,
    pub travel: Vec<TravelSummary>,
    pub distance: DistanceBreakdown,
    pub counts: StageCounts,
    pub duration_ms: u64,
}

/// Runs the census salary gap analysis end to end.
///
/// ```rust,ignore
/// let outcome = AnalysisPipeline::builder()
///     .config(AnalysisConfig::builder().hr_path("data/hr.csv").build()?)
///     .build()?
///     .run()?;
///
/// for summary in &outcome.travel {
///     println!("{}: {:?}", summary.category, summary.attrition_percentage());
/// }
/// ```
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(AnalysisPipeline: Send);

impl AnalysisPipeline {
    pub fn builder() -> AnalysisPipelineBuilder {
        AnalysisPipelineBuilder::default()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load both configured files and run every stage.
    pub fn run(&self) -> Result<AnalysisOutcome> {
        let start = Instant::now();
        let result = self.load().and_then(|(employees, census)| self.run_stages(employees, census));
        self.finish(result, start)
    }

    /// Run every stage after loading, starting from in-memory tables shaped
    /// like the loader output.
    pub fn run_frames(&self, employees: DataFrame, census: DataFrame) -> Result<AnalysisOutcome> {
        let start = Instant::now();
        let result = self.run_stages(employees, census);
        self.finish(result, start)
    }

    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn start_stage(&self, stage: AnalysisStage) {
        info!("{}...", stage.display_name());
        self.report_progress(ProgressUpdate::started(stage, format!("{}...", stage.display_name())));
    }

    fn end_stage(&self, stage: AnalysisStage, rows: usize) {
        debug!("{} produced {} rows", stage.display_name(), rows);
        self.report_progress(ProgressUpdate::finished(
            stage,
            rows,
            format!("{} complete ({} rows)", stage.display_name(), rows),
        ));
    }

    fn finish(&self, result: Result<AnalysisOutcome>, start: Instant) -> Result<AnalysisOutcome> {
        match result {
            Ok(mut outcome) => {
                outcome.duration_ms = start.elapsed().as_millis() as u64;
                info!("Analysis completed in {} ms", outcome.duration_ms);
                self.report_progress(ProgressUpdate::complete("Analysis completed successfully"));
                Ok(outcome)
            }
            Err(e) => {
                error!("Pipeline error: {}", e);
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn load(&self) -> Result<(DataFrame, DataFrame)> {
        self.start_stage(AnalysisStage::Loading);
        let employees = DatasetLoader::load_employees(&self.config.hr_path)?;
        let census = DatasetLoader::load_census(&self.config.census_path)?;
        self.end_stage(AnalysisStage::Loading, employees.height() + census.height());
        Ok((employees, census))
    }

    fn run_stages(&self, employees: DataFrame, census: DataFrame) -> Result<AnalysisOutcome> {
        let config = &self.config;
        let mut counts = StageCounts {
            employees: employees.height(),
            census_rows: census.height(),
            ..StageCounts::default()
        };

        self.start_stage(AnalysisStage::Filtering);
        let filtered = CensusFilter::from_config(config).apply(census)?;
        counts.filtered_census_rows = filtered.height();
        self.end_stage(AnalysisStage::Filtering, filtered.height());

        self.start_stage(AnalysisStage::Reconciling);
        let reconciled = CategoricalReconciler::reconcile_census(filtered)?;
        let employees = CategoricalReconciler::normalize_employees(employees)?;
        self.end_stage(AnalysisStage::Reconciling, reconciled.height());

        self.start_stage(AnalysisStage::Estimating);
        let strata = SalaryEstimator::estimate(reconciled)?;
        counts.strata = strata.height();
        self.end_stage(AnalysisStage::Estimating, strata.height());

        self.start_stage(AnalysisStage::Joining);
        let joined = Joiner::join(employees.clone(), strata)?;
        counts.joined_rows = joined.height();
        self.end_stage(AnalysisStage::Joining, joined.height());

        // Cohorts cover every joined employee, not only those who left.
        self.start_stage(AnalysisStage::Segmenting);
        let cohorts = Segmenter::new(config.salary_index_threshold).split(&joined)?;
        counts.salary_at_or_below_rows = cohorts.at_or_below.height();
        counts.salary_above_rows = cohorts.above.height();
        self.end_stage(AnalysisStage::Segmenting, joined.height());

        self.start_stage(AnalysisStage::Aggregating);
        let greater_than_expected = cross_tabulate(
            &cohorts.at_or_below,
            SalaryComparison::GreaterThanExpected,
            config.annual_salary_threshold,
        )?;
        let less_than_expected = cross_tabulate(
            &cohorts.above,
            SalaryComparison::LessThanExpected,
            config.annual_salary_threshold,
        )?;
        let travel = travel_table(&employees)?;
        let distance = distance_breakdown(&employees, config.distance_threshold)?;
        self.end_stage(
            AnalysisStage::Aggregating,
            greater_than_expected.entries.len() + less_than_expected.entries.len(),
        );

        Ok(AnalysisOutcome {
            employees,
            joined,
            cohorts,
            greater_than_expected,
            less_than_expected,
            travel,
            distance,
            counts,
            duration_ms: 0,
        })
    }
}

/// Builder for [`AnalysisPipeline`].
#[derive(Default)]
pub struct AnalysisPipelineBuilder {
    config: Option<AnalysisConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(AnalysisPipelineBuilder: Send);

impl AnalysisPipelineBuilder {
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline. Fails if the configuration is invalid.
    pub fn build(self) -> std::result::Result<AnalysisPipeline, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(AnalysisPipeline {
            config,
            progress_reporter: self.progress_reporter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        AGE, ATTRITION, BUSINESS_TRAVEL, DISTANCE_FROM_HOME, EDUCATION, EDUCATION_FIELD,
        EDUCATION_LEVEL, EXPECTED_SALARY_BAND, GENDER, JOB_POSITION, JOB_TYPE, LEVEL, LOCATION,
        MARITAL_STATUS, MONTHLY_INCOME,
    };
    use std::sync::Mutex;

    fn employees() -> DataFrame {
        df!(
            AGE => [30i64, 30, 30, 45],
            ATTRITION => ["Yes", "Yes", "No", "Yes"],
            BUSINESS_TRAVEL => ["Travel_Rarely", "Travel_Frequently", "Non-Travel", "Travel_Rarely"],
            DISTANCE_FROM_HOME => [2.0, 28.0, 10.0, 25.0],
            EDUCATION => [3i64, 3, 3, 4],
            EDUCATION_FIELD => ["Management", "Management", "Management", "Medical"],
            GENDER => ["Male", "Male", "Male", "Female"],
            MONTHLY_INCOME => [5000.0, 3000.0, 4500.0, 9000.0]
        )
        .unwrap()
    }

    fn census() -> DataFrame {
        df!(
            AGE => [30i64, 30, 45, 45, 16],
            JOB_TYPE => [" Private", " Private", " Private", " Private", " Private"],
            EDUCATION_LEVEL => [" Bachelors", " Bachelors", " Masters", " Masters", " 11th"],
            LEVEL => [" 13", " 13", " 14", " 14", " 7"],
            JOB_POSITION => [" Sales", " Sales", " Prof-specialty", " Prof-specialty", " Sales"],
            MARITAL_STATUS => [" Never-married", " Divorced", " Married", " Married", " Never-married"],
            LOCATION => [" United-States", " United-States", " United-States", " United-States", " United-States"],
            GENDER => [" Male", " Male", " Female", " Female", " Male"],
            EXPECTED_SALARY_BAND => [" <=50K", " >50K", " >50K", " >50K", " <=50K"]
        )
        .unwrap()
    }

    #[test]
    fn test_builder_default() {
        let pipeline = AnalysisPipeline::builder().build().unwrap();
        assert_eq!(pipeline.config().salary_index_threshold, 50.0);
        assert!(pipeline.progress_reporter.is_none());
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = AnalysisConfig {
            salary_index_threshold: 150.0,
            ..AnalysisConfig::default()
        };
        assert!(AnalysisPipeline::builder().config(config).build().is_err());
    }

    #[test]
    fn test_run_frames() {
        let outcome = AnalysisPipeline::builder()
            .build()
            .unwrap()
            .run_frames(employees(), census())
            .unwrap();

        assert_eq!(
            outcome.counts,
            StageCounts {
                employees: 4,
                census_rows: 5,
                filtered_census_rows: 4,
                strata: 2,
                joined_rows: 4,
                salary_at_or_below_rows: 3,
                salary_above_rows: 1,
            }
        );

        // At-or-below cohort: two attrited, 60000 and 36000 a year.
        let tab = &outcome.greater_than_expected;
        assert_eq!(tab.denominator, 2);
        assert_eq!(tab.entry(true).map(|e| e.percentage), Some(50.0));
        assert_eq!(tab.entry(false).map(|e| e.percentage), Some(50.0));

        // Above cohort: one attrited employee earning 108000.
        let tab = &outcome.less_than_expected;
        assert_eq!(tab.denominator, 1);
        assert_eq!(tab.entry(false).map(|e| e.percentage), Some(100.0));

        let travel: Vec<(usize, usize, usize)> = outcome.travel.iter().map(|t| t.as_tuple()).collect();
        assert_eq!(travel, vec![(2, 2, 0), (1, 1, 0), (1, 0, 1)]);

        assert_eq!(outcome.distance.near.total, 2);
        assert_eq!(outcome.distance.far.total, 1);
    }

    #[test]
    fn test_progress_stages_in_order() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let seen = stages.clone();

        AnalysisPipeline::builder()
            .on_progress(move |update| {
                if let Ok(mut seen) = seen.lock() {
                    seen.push(update.stage);
                }
            })
            .build()
            .unwrap()
            .run_frames(employees(), census())
            .unwrap();

        let stages = stages.lock().unwrap();
        let mut distinct: Vec<AnalysisStage> = Vec::new();
        for stage in stages.iter() {
            if distinct.last() != Some(stage) {
                distinct.push(*stage);
            }
        }
        assert_eq!(
            distinct,
            vec![
                AnalysisStage::Filtering,
                AnalysisStage::Reconciling,
                AnalysisStage::Estimating,
                AnalysisStage::Joining,
                AnalysisStage::Segmenting,
                AnalysisStage::Aggregating,
                AnalysisStage::Complete,
            ]
        );
    }

    #[test]
    fn test_run_reports_missing_file() {
        let config = AnalysisConfig::builder()
            .hr_path("does/not/exist.csv")
            .build()
            .unwrap();
        let failed = Arc::new(Mutex::new(false));
        let flag = failed.clone();

        let error = AnalysisPipeline::builder()
            .config(config)
            .on_progress(move |update| {
                if update.stage == AnalysisStage::Failed
                    && let Ok(mut flag) = flag.lock()
                {
                    *flag = true;
                }
            })
            .build()
            .unwrap()
            .run()
            .unwrap_err();

        assert!(error.is_input_error());
        assert!(*failed.lock().unwrap());
    }
}
