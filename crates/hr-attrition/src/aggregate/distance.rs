use crate::error::Result;
use crate::schema::{AGE, ATTRITION, ATTRITION_NO, ATTRITION_YES, DISTANCE_FROM_HOME};
use crate::types::{DistanceBreakdown, DistancePartition};
use crate::utils::count_where;
use polars::prelude::*;

/// Employees strictly closer and strictly farther than the threshold, as
/// `(DistanceFromHome, Age, Attrition)` tables for scatter charts.
#[derive(Debug, Clone)]
pub struct DistanceScatter {
    pub near: DataFrame,
    pub far: DataFrame,
}

fn near_expr(threshold: f64) -> Expr {
    col(DISTANCE_FROM_HOME).lt(lit(threshold))
}

fn far_expr(threshold: f64) -> Expr {
    col(DISTANCE_FROM_HOME).gt(lit(threshold))
}

fn partition(df: &DataFrame, predicate: Expr, label: String) -> Result<DistancePartition> {
    let rows = df.clone().lazy().filter(predicate).collect()?;
    Ok(DistancePartition {
        label,
        total: rows.height(),
        attrition_yes: count_where(&rows, col(ATTRITION).eq(lit(ATTRITION_YES)))?,
        attrition_no: count_where(&rows, col(ATTRITION).eq(lit(ATTRITION_NO)))?,
    })
}

/// Attrition counts below and above `threshold`.
///
/// Rows at exactly the threshold fall in neither partition.
pub fn distance_breakdown(df: &DataFrame, threshold: f64) -> Result<DistanceBreakdown> {
    Ok(DistanceBreakdown {
        threshold,
        near: partition(df, near_expr(threshold), format!("less than {threshold}"))?,
        far: partition(df, far_expr(threshold), format!("more than {threshold}"))?,
    })
}

pub fn distance_scatter(df: &DataFrame, threshold: f64) -> Result<DistanceScatter> {
    let columns = [col(DISTANCE_FROM_HOME), col(AGE), col(ATTRITION)];
    let near = df
        .clone()
        .lazy()
        .filter(near_expr(threshold))
        .select(columns.clone())
        .collect()?;
    let far = df
        .clone()
        .lazy()
        .filter(far_expr(threshold))
        .select(columns)
        .collect()?;
    Ok(DistanceScatter { near, far })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn employees() -> DataFrame {
        df!(
            AGE => [25i64, 31, 40, 52, 29, 33, 47],
            ATTRITION => ["Yes", "No", "No", "No", "Yes", "No", "Yes"],
            DISTANCE_FROM_HOME => [1.0, 2.0, 10.0, 24.0, 26.0, 29.0, 25.0]
        )
        .unwrap()
    }

    #[test]
    fn test_breakdown_partitions() {
        let breakdown = distance_breakdown(&employees(), 25.0).unwrap();

        assert_eq!(
            breakdown.near,
            DistancePartition {
                label: "less than 25".to_string(),
                total: 4,
                attrition_yes: 1,
                attrition_no: 3,
            }
        );
        assert_eq!(breakdown.far.label, "more than 25");
        assert_eq!((breakdown.far.total, breakdown.far.attrition_yes), (2, 1));
    }

    #[test]
    fn test_threshold_rows_fall_in_neither_side() {
        let breakdown = distance_breakdown(&employees(), 25.0).unwrap();
        assert_eq!(breakdown.near.total + breakdown.far.total, employees().height() - 1);
    }

    #[test]
    fn test_rates() {
        let breakdown = distance_breakdown(&employees(), 25.0).unwrap();
        assert_eq!(breakdown.near.yes_rate().unwrap(), 0.25);
        assert_eq!(breakdown.near.no_rate().unwrap(), 0.75);
        assert_eq!(breakdown.far.yes_rate().unwrap(), 0.5);
    }

    #[test]
    fn test_empty_partition_has_no_rate() {
        let breakdown = distance_breakdown(&employees(), 100.0).unwrap();
        assert_eq!(breakdown.far.total, 0);
        assert!(breakdown.far.yes_rate().unwrap_err().is_division_by_zero());

        let slices = breakdown.pie_slices();
        assert!(slices[0].1.is_ok());
        assert!(slices[2].1.as_ref().unwrap_err().is_division_by_zero());
        assert!(slices[3].1.as_ref().unwrap_err().is_division_by_zero());
    }

    #[test]
    fn test_scatter_tables() {
        let scatter = distance_scatter(&employees(), 25.0).unwrap();
        assert_eq!(scatter.near.height(), 4);
        assert_eq!(scatter.far.height(), 2);

        let names: Vec<&str> = scatter
            .far
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, vec![DISTANCE_FROM_HOME, AGE, ATTRITION]);
    }
}
