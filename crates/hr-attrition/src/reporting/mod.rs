//! Report generation module.
//!
//! Turns an [`AnalysisOutcome`](crate::pipeline::AnalysisOutcome) into:
//! - the text printed on stdout ([`ReportGenerator::render_cross_tab`],
//!   [`ReportGenerator::render_travel`])
//! - a JSON [`AnalysisReport`] (`--json` on stdout, `--emit-report` to a file)
//! - CSV chart data for the distance scatter and pie charts (`--emit-charts`)
//!
//! Zero denominators are shown as [`NO_DATA`] in text and `null` in JSON.

mod generator;

pub use generator::{
    AnalysisReport, CrossTabReport, DistancePartitionReport, DistanceReport, NO_DATA,
    ReportGenerator, ReportSettings, TravelReport, cohort_heading,
};
