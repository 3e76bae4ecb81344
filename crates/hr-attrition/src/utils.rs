//! Shared utilities for the analysis pipeline.
//!
//! This module contains the arithmetic and column helpers used across
//! multiple stages so that rounding and zero-denominator handling stay
//! identical everywhere.

use crate::error::{AnalysisError, Result};
use polars::prelude::*;

// =============================================================================
// Arithmetic Utilities
// =============================================================================

/// Round a value to two decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `count / total * 100`, rounded to two decimals.
///
/// Returns [`AnalysisError::DivisionByZero`] when `total` is zero.
pub fn percentage(count: usize, total: usize, what: &str) -> Result<f64> {
    if total == 0 {
        return Err(AnalysisError::DivisionByZero(what.to_string()));
    }
    Ok(round2(count as f64 / total as f64 * 100.0))
}

/// `count / total`, rounded to two decimals.
///
/// Returns [`AnalysisError::DivisionByZero`] when `total` is zero.
pub fn ratio(count: usize, total: usize, what: &str) -> Result<f64> {
    if total == 0 {
        return Err(AnalysisError::DivisionByZero(what.to_string()));
    }
    Ok(round2(count as f64 / total as f64))
}

/// Map a zero-denominator error to `None`, keeping every other error.
pub fn no_data_as_none(result: Result<f64>) -> Result<Option<f64>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_division_by_zero() => Ok(None),
        Err(e) => Err(e),
    }
}

// =============================================================================
// Column Utilities
// =============================================================================

/// Expression stripping surrounding whitespace from a string column.
pub fn trimmed(name: &str) -> Expr {
    col(name).str().strip_chars(lit(NULL))
}

/// Expressions trimming every string column of `df`, keeping names.
pub fn trim_string_columns_exprs(df: &DataFrame) -> Vec<Expr> {
    df.get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| trimmed(column.name().as_str()))
        .collect()
}

/// Expression converting a column to `dtype`, parsing trimmed text if the
/// CSV reader inferred it as a string. Conversion failures are errors.
pub fn numeric_expr(name: &str, current: &DataType, target: DataType) -> Expr {
    if current == &DataType::String {
        trimmed(name).strict_cast(target)
    } else {
        col(name).strict_cast(target)
    }
}

/// Count the rows of `df` matching `predicate`.
pub fn count_where(df: &DataFrame, predicate: Expr) -> Result<usize> {
    let matching = df.clone().lazy().filter(predicate).collect()?;
    Ok(matching.height())
}

/// Ensure every name in `columns` is present in `df`.
pub fn require_columns(df: &DataFrame, columns: &[&str], file: &str) -> Result<()> {
    let present: Vec<&str> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();

    match columns.iter().find(|column| !present.contains(column)) {
        Some(missing) => Err(AnalysisError::ColumnNotFound {
            file: file.to_string(),
            column: missing.to_string(),
        }),
        None => Ok(()),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(63.291_139), 63.29);
        assert_eq!(round2(36.708_861), 36.71);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(69, 277, "travel").unwrap(), 24.91);
        assert_eq!(percentage(0, 4, "travel").unwrap(), 0.0);
        assert_eq!(percentage(4, 4, "travel").unwrap(), 100.0);
    }

    #[test]
    fn test_percentage_zero_total() {
        let error = percentage(0, 0, "travel").unwrap_err();
        assert!(error.is_division_by_zero());
        assert!(error.to_string().contains("travel"));
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(1, 3, "distance").unwrap(), 0.33);
        assert!(ratio(0, 0, "distance").unwrap_err().is_division_by_zero());
    }

    #[test]
    fn test_no_data_as_none() {
        assert_eq!(no_data_as_none(Ok(1.5)).unwrap(), Some(1.5));
        assert_eq!(no_data_as_none(ratio(1, 0, "x")).unwrap(), None);
        assert!(no_data_as_none(Err(AnalysisError::InvalidConfig("x".into()))).is_err());
    }


    #[test]
    fn test_trim_string_columns() {
        let df = df!(
            "JobType" => [" Private", "State-gov "],
            "Age" => [39i64, 50]
        )
        .unwrap();

        let exprs = trim_string_columns_exprs(&df);
        assert_eq!(exprs.len(), 1);

        let trimmed_df = df.lazy().with_columns(exprs).collect().unwrap();
        let job_types: Vec<Option<&str>> = trimmed_df
            .column("JobType")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(job_types, vec![Some("Private"), Some("State-gov")]);
    }

    #[test]
    fn test_numeric_expr_parses_padded_text() {
        let df = df!("Age" => [" 39", "50 "]).unwrap();
        let dtype = df.column("Age").unwrap().dtype().clone();

        let parsed = df
            .lazy()
            .with_column(numeric_expr("Age", &dtype, DataType::Int64))
            .collect()
            .unwrap();
        let ages: Vec<Option<i64>> = parsed
            .column("Age")
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ages, vec![Some(39), Some(50)]);
    }

    #[test]
    fn test_count_where() {
        let df = df!("Attrition" => ["Yes", "No", "Yes"]).unwrap();
        assert_eq!(count_where(&df, col("Attrition").eq(lit("Yes"))).unwrap(), 2);
        assert_eq!(count_where(&df, col("Attrition").eq(lit("Maybe"))).unwrap(), 0);
    }

    #[test]
    fn test_require_columns() {
        let df = df!("Age" => [30i64], "Gender" => ["Male"]).unwrap();
        assert!(require_columns(&df, &["Age", "Gender"], "hr.csv").is_ok());

        let error = require_columns(&df, &["Age", "Attrition"], "hr.csv").unwrap_err();
        assert!(matches!(
            error,
            AnalysisError::ColumnNotFound { ref column, .. } if column == "Attrition"
        ));
    }
}
