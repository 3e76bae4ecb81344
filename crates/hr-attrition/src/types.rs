use crate::error::Result;
use crate::schema::{ATTRITION_YES, TRAVEL_FREQUENTLY, TRAVEL_RARELY};
use crate::utils::{percentage, ratio};
use serde::{Deserialize, Serialize};

/// One row of the salary estimator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedStratum {
    pub age: i64,
    pub education_tier: Option<i64>,
    pub education_field: String,
    pub gender: String,
    /// Mean of the mapped salary bands, between 0 and 100.
    pub probable_salary_index: f64,
}

// ============================================================================
// Cross-tabulation
// ============================================================================

/// Which side of the annual salary threshold a cross-tab flags as `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryComparison {
    /// `AnnualSalary > threshold`
    GreaterThanExpected,
    /// `AnnualSalary <= threshold`
    LessThanExpected,
}

impl SalaryComparison {
    /// Column label of the derived category.
    pub fn label(&self) -> &'static str {
        match self {
            Self::GreaterThanExpected => "Is salary greater than expected",
            Self::LessThanExpected => "Is salary less than expected",
        }
    }
}

/// Count and share of one `(Attrition, category)` group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTabEntry {
    pub attrition: String,
    pub category: bool,
    pub count: usize,
    /// Share of the cohort's attrited employees, rounded to 2 decimals.
    pub percentage: f64,
}

/// Attrition cross-tabulation of one cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossTab {
    pub comparison: SalaryComparison,
    /// Number of attrited employees in the cohort.
    pub denominator: usize,
    /// Entries ordered by category, `false` first.
    pub entries: Vec<CrossTabEntry>,
}

impl CrossTab {
    /// Look up the entry for `category` within the attrited group.
    pub fn entry(&self, category: bool) -> Option<&CrossTabEntry> {
        self.entries
            .iter()
            .find(|entry| entry.attrition == ATTRITION_YES && entry.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_percentage(&self) -> f64 {
        self.entries.iter().map(|entry| entry.percentage).sum()
    }
}

// ============================================================================
// Travel and distance
// ============================================================================

/// Attrition counts for one business travel category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelSummary {
    pub category: String,
    pub total: usize,
    pub attrition_yes: usize,
    pub attrition_no: usize,
}

impl TravelSummary {
    /// `(total, yes, no)`
    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.total, self.attrition_yes, self.attrition_no)
    }

    /// Percentage of the category that left, rounded to 2 decimals.
    pub fn attrition_percentage(&self) -> Result<f64> {
        percentage(
            self.attrition_yes,
            self.total,
            &format!("attrition percentage for '{}'", self.category),
        )
    }

    /// Human-readable description used in printed output.
    pub fn describe(&self) -> String {
        match self.category.as_str() {
            TRAVEL_RARELY => "people who rarely travelled".to_string(),
            TRAVEL_FREQUENTLY => "people who frequently travelled".to_string(),
            _ => "people who did not travel".to_string(),
        }
    }
}

/// Attrition counts of employees on one side of the distance threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistancePartition {
    pub label: String,
    pub total: usize,
    pub attrition_yes: usize,
    pub attrition_no: usize,
}

impl DistancePartition {
    /// Share of the partition that left, rounded to 2 decimals.
    pub fn yes_rate(&self) -> Result<f64> {
        ratio(self.attrition_yes, self.total, &format!("attrition rate {}", self.label))
    }

    /// Share of the partition that stayed, rounded to 2 decimals.
    pub fn no_rate(&self) -> Result<f64> {
        ratio(self.attrition_no, self.total, &format!("retention rate {}", self.label))
    }
}

/// Employees closer than and farther than the distance threshold.
///
/// Employees exactly at the threshold belong to neither side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceBreakdown {
    pub threshold: f64,
    pub near: DistancePartition,
    pub far: DistancePartition,
}

impl DistanceBreakdown {
    /// The four labelled rates of the distance pie chart.
    ///
    /// Each rate keeps its own result, so an empty partition yields
    /// `DivisionByZero` for its two slices only.
    pub fn pie_slices(&self) -> Vec<(String, Result<f64>)> {
        let mut slices = Vec::with_capacity(4);
        for partition in [&self.near, &self.far] {
            slices.push((
                format!("Attrition when distance is {}", partition.label),
                partition.yes_rate(),
            ));
            slices.push((
                format!("No attrition when distance is {}", partition.label),
                partition.no_rate(),
            ));
        }
        slices
    }
}

// ============================================================================
// Pipeline bookkeeping
// ============================================================================

/// Row counts after each pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCounts {
    pub employees: usize,
    pub census_rows: usize,
    pub filtered_census_rows: usize,
    pub strata: usize,
    pub joined_rows: usize,
    pub salary_at_or_below_rows: usize,
    pub salary_above_rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_summary_percentage() {
        let summary = TravelSummary {
            category: TRAVEL_FREQUENTLY.to_string(),
            total: 277,
            attrition_yes: 69,
            attrition_no: 208,
        };
        assert_eq!(summary.as_tuple(), (277, 69, 208));
        assert_eq!(summary.attrition_percentage().unwrap(), 24.91);
    }

    #[test]
    fn test_empty_travel_summary_is_no_data() {
        let summary = TravelSummary {
            category: "None".to_string(),
            total: 0,
            attrition_yes: 0,
            attrition_no: 0,
        };
        assert!(summary.attrition_percentage().unwrap_err().is_division_by_zero());
    }

    #[test]
    fn test_pie_slices() {
        let breakdown = DistanceBreakdown {
            threshold: 25.0,
            near: DistancePartition {
                label: "less than 25".to_string(),
                total: 4,
                attrition_yes: 1,
                attrition_no: 3,
            },
            far: DistancePartition {
                label: "more than 25".to_string(),
                total: 2,
                attrition_yes: 1,
                attrition_no: 1,
            },
        };

        let slices = breakdown.pie_slices();
        assert_eq!(slices.len(), 4);
        assert_eq!(slices[0].0, "Attrition when distance is less than 25");
        let rates: Vec<f64> = slices.into_iter().map(|(_, rate)| rate.unwrap()).collect();
        assert_eq!(rates, vec![0.25, 0.75, 0.5, 0.5]);
    }

    #[test]
    fn test_crosstab_lookup() {
        let tab = CrossTab {
            comparison: SalaryComparison::GreaterThanExpected,
            denominator: 3,
            entries: vec![
                CrossTabEntry {
                    attrition: "Yes".to_string(),
                    category: false,
                    count: 1,
                    percentage: 33.33,
                },
                CrossTabEntry {
                    attrition: "Yes".to_string(),
                    category: true,
                    count: 2,
                    percentage: 66.67,
                },
            ],
        };
        assert_eq!(tab.entry(true).map(|e| e.count), Some(2));
        assert!((tab.total_percentage() - 100.0).abs() <= 0.01);
    }
}
