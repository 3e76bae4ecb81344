use crate::error::Result;
use crate::schema::{ANNUAL_SALARY, ATTRITION, ATTRITION_YES, COUNT};
use crate::types::{CrossTab, CrossTabEntry, SalaryComparison};
use crate::utils::{count_where, percentage};
use polars::prelude::*;
use tracing::debug;

/// A null salary compares as `false`, so every attrited row lands in a group.
fn category_expr(comparison: SalaryComparison, threshold: f64) -> Expr {
    let compared = match comparison {
        SalaryComparison::GreaterThanExpected => col(ANNUAL_SALARY).gt(lit(threshold)),
        SalaryComparison::LessThanExpected => col(ANNUAL_SALARY).lt_eq(lit(threshold)),
    };
    compared.fill_null(lit(false))
}

/// Break the attrited employees of `cohort` out by `comparison`.
///
/// The denominator `N` is the number of `Attrition == "Yes"` rows in the
/// whole cohort. The breakdown then runs over those rows only, grouping by
/// `(Attrition, category)` where the category compares `AnnualSalary` with
/// `threshold`. Each entry's percentage is `count / N * 100`, rounded to two
/// decimals, so the entries of a non-empty table sum to 100.
///
/// A cohort without attrited employees yields an empty table with `N = 0`.
pub fn cross_tabulate(
    cohort: &DataFrame,
    comparison: SalaryComparison,
    threshold: f64,
) -> Result<CrossTab> {
    let is_yes = col(ATTRITION).eq(lit(ATTRITION_YES));
    let denominator = count_where(cohort, is_yes.clone())?;

    if denominator == 0 {
        debug!("No attrited employees in cohort; '{}' is empty", comparison.label());
        return Ok(CrossTab {
            comparison,
            denominator,
            entries: Vec::new(),
        });
    }

    let label = comparison.label();
    let grouped = cohort
        .clone()
        .lazy()
        .filter(is_yes)
        .with_column(category_expr(comparison, threshold).alias(label))
        .group_by_stable([col(ATTRITION), col(label)])
        .agg([len().cast(DataType::UInt64).alias(COUNT)])
        .sort([label], SortMultipleOptions::default().with_maintain_order(true))
        .collect()?;

    let attritions = grouped.column(ATTRITION)?.as_materialized_series().str()?.clone();
    let categories = grouped.column(label)?.as_materialized_series().bool()?.clone();
    let counts = grouped.column(COUNT)?.as_materialized_series().u64()?.clone();

    let mut entries = Vec::with_capacity(grouped.height());
    for ((attrition, category), count) in attritions
        .into_iter()
        .zip(categories.into_iter())
        .zip(counts.into_iter())
    {
        let (Some(attrition), Some(category), Some(count)) = (attrition, category, count) else {
            continue;
        };
        let count = count as usize;
        entries.push(CrossTabEntry {
            attrition: attrition.to_string(),
            category,
            count,
            percentage: percentage(count, denominator, label)?,
        });
    }

    debug!("'{}': N = {}, {} groups", label, denominator, entries.len());
    Ok(CrossTab {
        comparison,
        denominator,
        entries,
    })
}
