//! Census subpopulation filter.
//!
//! Restricts the census table to private-sector, United States respondents in
//! the working age range. Raw census fields carry leading whitespace, so every
//! string column is trimmed before any predicate runs; comparing untrimmed
//! values would silently drop every row.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::schema::{AGE, JOB_TYPE, LOCATION};
use crate::utils::trim_string_columns_exprs;
use polars::prelude::*;
use tracing::debug;

/// Filter selecting the census rows comparable to the employee population.
#[derive(Debug, Clone, PartialEq)]
pub struct CensusFilter {
    pub job_type: String,
    pub location: String,
    pub min_age_exclusive: i64,
    pub max_age_inclusive: i64,
}

impl Default for CensusFilter {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl CensusFilter {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            job_type: config.job_type.clone(),
            location: config.location.clone(),
            min_age_exclusive: config.min_age_exclusive,
            max_age_inclusive: config.max_age_inclusive,
        }
    }

    /// The combined predicate. The three conditions commute.
    pub fn predicate(&self) -> Expr {
        col(JOB_TYPE)
            .eq(lit(self.job_type.clone()))
            .and(col(LOCATION).eq(lit(self.location.clone())))
            .and(col(AGE).gt(lit(self.min_age_exclusive)))
            .and(col(AGE).lt_eq(lit(self.max_age_inclusive)))
    }

    /// Trim all string columns, then keep the rows matching [`Self::predicate`].
    ///
    /// The schema is unchanged and row order is preserved. Applying the
    /// filter to its own output returns the same table.
    pub fn apply(&self, df: DataFrame) -> Result<DataFrame> {
        let before = df.height();
        let trims = trim_string_columns_exprs(&df);

        let filtered = df
            .lazy()
            .with_columns(trims)
            .filter(self.predicate())
            .collect()?;

        debug!(
            "Census filter kept {} of {} rows ({} / {} / {} < age <= {})",
            filtered.height(),
            before,
            self.job_type,
            self.location,
            self.min_age_exclusive,
            self.max_age_inclusive
        );
        Ok(filtered)
    }
}
