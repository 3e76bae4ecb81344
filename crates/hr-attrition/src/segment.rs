//! Splits the joined table at the probable salary index threshold.

use crate::error::Result;
use crate::schema::PROBABLE_SALARY_INDEX;
use polars::prelude::*;
use tracing::debug;

/// The two cohorts of a salary index split.
#[derive(Debug, Clone)]
pub struct Cohorts {
    /// Rows with `ProbableSalaryIndex <= threshold`.
    pub at_or_below: DataFrame,
    /// Rows with `ProbableSalaryIndex > threshold`.
    pub above: DataFrame,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmenter {
    pub threshold: f64,
}

impl Segmenter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Partition `joined` into two disjoint, order-preserving cohorts whose
    /// union is the input.
    pub fn split(&self, joined: &DataFrame) -> Result<Cohorts> {
        let at_or_below = joined
            .clone()
            .lazy()
            .filter(col(PROBABLE_SALARY_INDEX).lt_eq(lit(self.threshold)))
            .collect()?;
        let above = joined
            .clone()
            .lazy()
            .filter(col(PROBABLE_SALARY_INDEX).gt(lit(self.threshold)))
            .collect()?;

        debug!(
            "Salary index split at {}: {} at or below, {} above",
            self.threshold,
            at_or_below.height(),
            above.height()
        );
        Ok(Cohorts { at_or_below, above })
    }
}
