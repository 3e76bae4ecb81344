//! Joins employees to their census stratum.

use crate::error::Result;
use crate::schema::{
    AGE, ANNUAL_SALARY, EDUCATION, EDUCATION_FIELD, EDUCATION_TIER, GENDER, MONTHLY_INCOME,
};
use polars::prelude::*;
use tracing::{debug, warn};

/// Months per year used to annualize `MonthlyIncome`.
pub const MONTHS_PER_YEAR: f64 = 12.0;

pub struct Joiner;

impl Joiner {
    /// Inner-join employees with the estimated strata.
    ///
    /// Keys are `Age`, `EducationField` and `Gender` on both sides, plus the
    /// employee `Education` against the census `EducationTier`. Only exact
    /// matches survive, so an employee whose stratum has no census support
    /// is dropped. The result carries every employee column,
    /// `ProbableSalaryIndex` and `AnnualSalary = MonthlyIncome * 12`, sorted
    /// by `Age` with ties in employee order.
    pub fn join(employees: DataFrame, strata: DataFrame) -> Result<DataFrame> {
        let employee_rows = employees.height();

        let mut args = JoinArgs::new(JoinType::Inner);
        args.maintain_order = MaintainOrderJoin::Left;

        let joined = employees
            .lazy()
            .join(
                strata.lazy(),
                [col(AGE), col(EDUCATION_FIELD), col(GENDER), col(EDUCATION)],
                [col(AGE), col(EDUCATION_FIELD), col(GENDER), col(EDUCATION_TIER)],
                args,
            )
            .with_column((col(MONTHLY_INCOME) * lit(MONTHS_PER_YEAR)).alias(ANNUAL_SALARY))
            .sort([AGE], SortMultipleOptions::default().with_maintain_order(true))
            .collect()?;

        if joined.height() == 0 {
            warn!("No employee matched a census stratum; every downstream table will be empty");
        } else {
            debug!("Joined {} of {} employees to a stratum", joined.height(), employee_rows);
        }
        Ok(joined)
    }
}
