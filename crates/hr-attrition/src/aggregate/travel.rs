use crate::error::Result;
use crate::schema::{ATTRITION, ATTRITION_NO, ATTRITION_YES, BUSINESS_TRAVEL, TRAVEL_CATEGORIES};
use crate::types::TravelSummary;
use crate::utils::count_where;
use polars::prelude::*;

/// Rows with `BusinessTravel == frequency` and `Attrition == attrition`.
pub fn attrition_values(df: &DataFrame, frequency: &str, attrition: &str) -> Result<usize> {
    count_where(
        df,
        col(BUSINESS_TRAVEL)
            .eq(lit(frequency))
            .and(col(ATTRITION).eq(lit(attrition))),
    )
}

/// Total, attrited and retained counts for one travel category.
///
/// A category present in no row yields `(0, 0, 0)`.
pub fn total_values_travel(df: &DataFrame, frequency: &str) -> Result<TravelSummary> {
    Ok(TravelSummary {
        category: frequency.to_string(),
        total: count_where(df, col(BUSINESS_TRAVEL).eq(lit(frequency)))?,
        attrition_yes: attrition_values(df, frequency, ATTRITION_YES)?,
        attrition_no: attrition_values(df, frequency, ATTRITION_NO)?,
    })
}

/// Summaries for `Travel_Rarely`, `Travel_Frequently` and `Non-Travel`, in
/// that order.
pub fn travel_table(df: &DataFrame) -> Result<Vec<TravelSummary>> {
    TRAVEL_CATEGORIES
        .iter()
        .map(|frequency| total_values_travel(df, frequency))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NON_TRAVEL, TRAVEL_FREQUENTLY, TRAVEL_RARELY};
    use pretty_assertions::assert_eq;

    fn employees(rows: &[(&'static str, &'static str, usize)]) -> DataFrame {
        let mut travel = Vec::new();
        let mut attrition = Vec::new();
        for (frequency, value, times) in rows {
            travel.extend(std::iter::repeat_n(*frequency, *times));
            attrition.extend(std::iter::repeat_n(*value, *times));
        }
        df!(BUSINESS_TRAVEL => travel, ATTRITION => attrition).unwrap()
    }

    #[test]
    fn test_total_values_travel() {
        let df = employees(&[
            (TRAVEL_FREQUENTLY, "Yes", 69),
            (TRAVEL_FREQUENTLY, "No", 208),
            (TRAVEL_RARELY, "Yes", 3),
        ]);

        let summary = total_values_travel(&df, TRAVEL_FREQUENTLY).unwrap();
        assert_eq!(summary.as_tuple(), (277, 69, 208));
        assert_eq!(summary.attrition_percentage().unwrap(), 24.91);
    }

    #[test]
    fn test_unknown_category_is_zero() {
        let df = employees(&[(TRAVEL_RARELY, "No", 2)]);

        let summary = total_values_travel(&df, "Travel_Sometimes").unwrap();
        assert_eq!(summary.as_tuple(), (0, 0, 0));
        assert!(summary.attrition_percentage().unwrap_err().is_division_by_zero());
    }

    #[test]
    fn test_attrition_values() {
        let df = employees(&[(NON_TRAVEL, "Yes", 1), (NON_TRAVEL, "No", 4), (TRAVEL_RARELY, "Yes", 2)]);
        assert_eq!(attrition_values(&df, NON_TRAVEL, "Yes").unwrap(), 1);
        assert_eq!(attrition_values(&df, NON_TRAVEL, "No").unwrap(), 4);
        assert_eq!(attrition_values(&df, TRAVEL_RARELY, "No").unwrap(), 0);
    }

    #[test]
    fn test_travel_table_order_and_totals() {
        let df = employees(&[
            (NON_TRAVEL, "No", 5),
            (TRAVEL_RARELY, "Yes", 2),
            (TRAVEL_RARELY, "No", 8),
            (TRAVEL_FREQUENTLY, "Yes", 1),
        ]);

        let table = travel_table(&df).unwrap();
        let rows: Vec<(&str, (usize, usize, usize))> = table
            .iter()
            .map(|summary| (summary.category.as_str(), summary.as_tuple()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (TRAVEL_RARELY, (10, 2, 8)),
                (TRAVEL_FREQUENTLY, (1, 1, 0)),
                (NON_TRAVEL, (5, 0, 5)),
            ]
        );
    }
}
