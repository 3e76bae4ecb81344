//! Categorical reconciliation of the two datasets.
//!
//! The census labels are mapped onto the employee dataset's vocabulary so
//! both tables share the stratum key `(Age, EducationTier, EducationField,
//! Gender)`:
//! - `JobPosition` → `EducationField` via [`EDUCATION_FIELD_RULES`]
//! - `EducationLevel` → `EducationTier` via [`EDUCATION_TIER_RULES`]
//!
//! Unmapped labels become null; the estimator later drops rows without an
//! education field.

mod rules;

pub use rules::{
    EDUCATION_FIELD_RULES, EDUCATION_TIER_RULES, MappingRule, RuleValue, SALARY_BAND_RULES,
    codomain, resolve, rules_expr,
};

use crate::error::Result;
use crate::schema::{EDUCATION_FIELD, EDUCATION_LEVEL, EDUCATION_TIER, JOB_POSITION};
use crate::utils::trimmed;
use polars::prelude::*;
use tracing::debug;

/// Maps census categories onto the shared strata.
pub struct CategoricalReconciler;

impl CategoricalReconciler {
    /// Add `EducationField` and `EducationTier` to a trimmed census table.
    ///
    /// Matching is exact, so the input must already be trimmed (the census
    /// filter does this).
    pub fn reconcile_census(df: DataFrame) -> Result<DataFrame> {
        let reconciled = df
            .lazy()
            .with_columns([
                rules_expr(JOB_POSITION, EDUCATION_FIELD_RULES).alias(EDUCATION_FIELD),
                rules_expr(EDUCATION_LEVEL, EDUCATION_TIER_RULES).alias(EDUCATION_TIER),
            ])
            .collect()?;

        debug!(
            "Reconciled census: {} rows, {} without education field, {} without tier",
            reconciled.height(),
            reconciled.column(EDUCATION_FIELD)?.null_count(),
            reconciled.column(EDUCATION_TIER)?.null_count()
        );
        Ok(reconciled)
    }

    /// Trim the employee `EducationField` so it compares equal to the
    /// reconciled census values.
    pub fn normalize_employees(df: DataFrame) -> Result<DataFrame> {
        Ok(df.lazy().with_column(trimmed(EDUCATION_FIELD)).collect()?)
    }
}
