//! Probable salary index per stratum.
//!
//! For every census stratum `(Age, EducationTier, EducationField, Gender)` the
//! index is the mean of the mapped salary bands (`<=50K` → 0, `>50K` → 100),
//! i.e. the percentage of respondents in that stratum earning above 50K.

use crate::error::Result;
use crate::reconcile::{SALARY_BAND_RULES, rules_expr};
use crate::schema::{
    AGE, EDUCATION_FIELD, EDUCATION_TIER, EXPECTED_SALARY_BAND, GENDER, PROBABLE_SALARY_INDEX,
    SALARY_BAND_VALUE,
};
use crate::types::AggregatedStratum;
use polars::prelude::*;
use tracing::debug;

/// Aggregates reconciled census rows into salary strata.
pub struct SalaryEstimator;

impl SalaryEstimator {
    /// The stratum key columns, in join order.
    pub fn key_exprs() -> [Expr; 4] {
        [col(AGE), col(EDUCATION_TIER), col(EDUCATION_FIELD), col(GENDER)]
    }

    /// Compute one row per non-empty stratum with its `ProbableSalaryIndex`.
    ///
    /// Rows without an education field are dropped first; a null education
    /// tier still forms its own group. Unmapped salary bands are ignored by
    /// the mean, and a stratum with no mapped band at all has no
    /// contributing values and produces no row.
    pub fn estimate(df: DataFrame) -> Result<DataFrame> {
        let strata = df
            .lazy()
            .filter(col(EDUCATION_FIELD).is_not_null())
            .with_column(rules_expr(EXPECTED_SALARY_BAND, SALARY_BAND_RULES).alias(SALARY_BAND_VALUE))
            .group_by_stable(Self::key_exprs())
            .agg([col(SALARY_BAND_VALUE).mean().alias(PROBABLE_SALARY_INDEX)])
            .filter(col(PROBABLE_SALARY_INDEX).is_not_null())
            .collect()?;

        debug!("Estimated probable salary index for {} strata", strata.height());
        Ok(strata)
    }

    /// Read an estimator output table into typed rows.
    pub fn collect_strata(df: &DataFrame) -> Result<Vec<AggregatedStratum>> {
        let ages = df.column(AGE)?.as_materialized_series().i64()?.clone();
        let tiers = df.column(EDUCATION_TIER)?.as_materialized_series().i64()?.clone();
        let fields = df.column(EDUCATION_FIELD)?.as_materialized_series().str()?.clone();
        let genders = df.column(GENDER)?.as_materialized_series().str()?.clone();
        let indices = df
            .column(PROBABLE_SALARY_INDEX)?
            .as_materialized_series()
            .f64()?
            .clone();

        let strata = ages
            .into_iter()
            .zip(tiers.into_iter())
            .zip(fields.into_iter())
            .zip(genders.into_iter())
            .zip(indices.into_iter())
            .filter_map(|((((age, tier), field), gender), index)| {
                Some(AggregatedStratum {
                    age: age?,
                    education_tier: tier,
                    education_field: field?.to_string(),
                    gender: gender?.to_string(),
                    probable_salary_index: index?,
                })
            })
            .collect();

        Ok(strata)
    }
}
