use crate::aggregate::distance_scatter;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::pipeline::AnalysisOutcome;
use crate::types::{
    CrossTab, CrossTabEntry, DistanceBreakdown, DistancePartition, SalaryComparison, StageCounts,
    TravelSummary,
};
use crate::utils::no_data_as_none;
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Printed in place of a rate whose denominator is zero.
pub const NO_DATA: &str = "no data";

const RULE: &str = "---------------------------------------------------------------------";

// ============================================================================
// Report Types
// ============================================================================

/// Serializable summary of one analysis run.
///
/// Used for both JSON output (`--json`) and file writing (`--emit-report`).
/// Rates whose denominator is zero are `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    pub hr_file: String,
    pub census_file: String,
    pub settings: ReportSettings,
    pub counts: StageCounts,
    pub cross_tabs: Vec<CrossTabReport>,
    pub travel: Vec<TravelReport>,
    pub distance: DistanceReport,
    pub duration_ms: u64,
}

/// Filter and threshold values the run used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    pub job_type: String,
    pub location: String,
    pub min_age_exclusive: i64,
    pub max_age_inclusive: i64,
    pub salary_index_threshold: f64,
    pub annual_salary_threshold: f64,
    pub distance_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossTabReport {
    /// Which cohort the table covers
    pub cohort: String,
    pub comparison: SalaryComparison,
    pub label: String,
    /// Attrited employees in the cohort
    pub denominator: usize,
    pub entries: Vec<CrossTabEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelReport {
    pub category: String,
    pub total: usize,
    pub attrition_yes: usize,
    pub attrition_no: usize,
    pub attrition_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceReport {
    pub threshold: f64,
    pub partitions: Vec<DistancePartitionReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistancePartitionReport {
    pub label: String,
    pub total: usize,
    pub attrition_yes: usize,
    pub attrition_no: usize,
    pub yes_rate: Option<f64>,
    pub no_rate: Option<f64>,
}

/// Heading printed above a cross-tabulation.
pub fn cohort_heading(comparison: SalaryComparison) -> &'static str {
    match comparison {
        SalaryComparison::GreaterThanExpected => {
            "Attrition percentage of people with salary expectation less than or equal to 50k"
        }
        SalaryComparison::LessThanExpected => {
            "Attrition percentage of people with salary expectation greater than 50k"
        }
    }
}

fn format_rate(rate: Option<f64>, suffix: &str) -> String {
    match rate {
        Some(value) => format!("{value:.2}{suffix}"),
        None => NO_DATA.to_string(),
    }
}

// ============================================================================
// Generator
// ============================================================================

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Build the serializable report of `outcome`.
    ///
    /// Zero denominators become `None`; any other error is returned.
    pub fn build_report(outcome: &AnalysisOutcome, config: &AnalysisConfig) -> Result<AnalysisReport> {
        let cross_tabs = [&outcome.greater_than_expected, &outcome.less_than_expected]
            .into_iter()
            .map(|tab| CrossTabReport {
                cohort: cohort_heading(tab.comparison).to_string(),
                comparison: tab.comparison,
                label: tab.comparison.label().to_string(),
                denominator: tab.denominator,
                entries: tab.entries.clone(),
            })
            .collect();

        let travel = outcome
            .travel
            .iter()
            .map(Self::travel_report)
            .collect::<Result<Vec<_>>>()?;

        let distance = DistanceReport {
            threshold: outcome.distance.threshold,
            partitions: vec![
                Self::partition_report(&outcome.distance.near)?,
                Self::partition_report(&outcome.distance.far)?,
            ],
        };

        Ok(AnalysisReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            hr_file: config.hr_path.display().to_string(),
            census_file: config.census_path.display().to_string(),
            settings: ReportSettings {
                job_type: config.job_type.clone(),
                location: config.location.clone(),
                min_age_exclusive: config.min_age_exclusive,
                max_age_inclusive: config.max_age_inclusive,
                salary_index_threshold: config.salary_index_threshold,
                annual_salary_threshold: config.annual_salary_threshold,
                distance_threshold: config.distance_threshold,
            },
            counts: outcome.counts.clone(),
            cross_tabs,
            travel,
            distance,
            duration_ms: outcome.duration_ms,
        })
    }

    fn travel_report(summary: &TravelSummary) -> Result<TravelReport> {
        Ok(TravelReport {
            category: summary.category.clone(),
            total: summary.total,
            attrition_yes: summary.attrition_yes,
            attrition_no: summary.attrition_no,
            attrition_percentage: no_data_as_none(summary.attrition_percentage())?,
        })
    }

    fn partition_report(partition: &DistancePartition) -> Result<DistancePartitionReport> {
        Ok(DistancePartitionReport {
            label: partition.label.clone(),
            total: partition.total,
            attrition_yes: partition.attrition_yes,
            attrition_no: partition.attrition_no,
            yes_rate: no_data_as_none(partition.yes_rate())?,
            no_rate: no_data_as_none(partition.no_rate())?,
        })
    }

    /// Write `report` as pretty JSON to `<output_dir>/<base_name>_report.json`.
    pub fn write_report(&self, report: &AnalysisReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.output_dir.join(format!("{}_report.json", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }

    /// Write the data behind the distance charts as CSV files:
    /// the two scatter tables and the four pie slices.
    pub fn write_chart_data(&self, outcome: &AnalysisOutcome) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;

        let scatter = distance_scatter(&outcome.employees, outcome.distance.threshold)?;
        let mut written = Vec::with_capacity(3);
        written.push(self.write_csv(scatter.near, "distance_near_scatter")?);
        written.push(self.write_csv(scatter.far, "distance_far_scatter")?);

        let (labels, rates): (Vec<String>, Vec<Option<f64>>) =
            Self::pie_rows(&outcome.distance)?.into_iter().unzip();
        let pie = df!("Label" => labels, "Rate" => rates)?;
        written.push(self.write_csv(pie, "distance_pie")?);

        Ok(written)
    }

    /// The four labelled pie rates, `None` where a partition is empty.
    pub fn pie_rows(breakdown: &DistanceBreakdown) -> Result<Vec<(String, Option<f64>)>> {
        breakdown
            .pie_slices()
            .into_iter()
            .map(|(label, rate)| no_data_as_none(rate).map(|rate| (label, rate)))
            .collect()
    }

    fn write_csv(&self, mut df: DataFrame, name: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{}.csv", name));
        let mut file = File::create(&path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(&mut df)?;

        debug!("Chart data saved: {} ({} rows)", path.display(), df.height());
        Ok(path)
    }

    // ========================================================================
    // Text rendering
    // ========================================================================

    /// Render a cross-tabulation under its cohort heading.
    pub fn render_cross_tab(tab: &CrossTab) -> String {
        let mut out = String::new();
        out.push_str(&format!("\n {} : \n\n", cohort_heading(tab.comparison)));

        if tab.is_empty() {
            out.push_str(&format!("{NO_DATA}\n"));
        } else {
            let label = tab.comparison.label();
            out.push_str(&format!(
                "{:<10} {:<32} {:>6} {:>11}\n",
                "Attrition", label, "Count", "Percentage"
            ));
            for entry in &tab.entries {
                let category = if entry.category { "True" } else { "False" };
                out.push_str(&format!(
                    "{:<10} {:<32} {:>6} {:>11.2}\n",
                    entry.attrition, category, entry.count, entry.percentage
                ));
            }
        }

        out.push_str(&format!("{RULE}\n\n"));
        out
    }

    /// Render the three travel attrition percentages, one per line.
    pub fn render_travel(travel: &[TravelSummary]) -> Result<String> {
        let mut out = String::new();
        for summary in travel {
            let rate = no_data_as_none(summary.attrition_percentage())?;
            out.push_str(&format!(
                "Percentage of attrition for {} {}\n",
                summary.describe(),
                format_rate(rate, " %")
            ));
        }
        Ok(out)
    }
}
