//! CLI entry point for the attrition and census salary gap analysis.

use anyhow::{Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use hr_attrition::{AnalysisConfig, AnalysisOutcome, AnalysisPipeline, ReportGenerator};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Employee attrition against census salary expectations",
    long_about = "Joins an employee attrition dataset with a census salary survey and \
                  reports how attrition relates to pay relative to demographic expectation.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  HR_ATTRITION_HR_FILE       Employee dataset (default: IBM_HR_data.csv)\n  \
                  HR_ATTRITION_CENSUS_FILE   Census dataset (default: adult.csv)\n\n\
                  EXAMPLES:\n  \
                  # Defaults, both files in the working directory\n  \
                  hr-attrition\n\n  \
                  # Explicit files and a JSON report on stdout\n  \
                  hr-attrition --hr-file data/hr.csv --census-file data/adult.csv --json\n\n  \
                  # Write the report and chart data to results/\n  \
                  hr-attrition -o results/ --emit-report --emit-charts"
)]
struct Args {
    /// Employee attrition CSV (with header row)
    #[arg(long, env = "HR_ATTRITION_HR_FILE")]
    hr_file: Option<PathBuf>,

    /// Census salary CSV (no header row)
    #[arg(long, env = "HR_ATTRITION_CENSUS_FILE")]
    census_file: Option<PathBuf>,

    /// JSON configuration file; command line paths take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for the report and chart data
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON report to the output directory
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Write the distance chart data as CSV to the output directory
    #[arg(long)]
    emit_charts: bool,

    /// Print the JSON report to stdout instead of the text summary
    ///
    /// Disables all logging so stdout only contains JSON.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// With `json_output` no subscriber is installed.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    // Logs go to stderr so stdout carries only the results.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // .env must be read before clap resolves `env = ...` arguments
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    let pipeline = build_pipeline(&args, config)?;

    match pipeline.run() {
        Ok(outcome) => handle_output(&outcome, pipeline.config(), &args),
        Err(e) => {
            error!("Analysis failed: {}", e);
            Err(anyhow!("Analysis failed: {}", e))
        }
    }
}

fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            AnalysisConfig::from_json_file(path)?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(path) = &args.hr_file {
        config.hr_path = path.clone();
    }
    if let Some(path) = &args.census_file {
        config.census_path = path.clone();
    }
    if let Some(dir) = &args.output {
        config.output_dir = dir.clone();
    }

    config.validate()?;
    Ok(config)
}

fn build_pipeline(args: &Args, config: AnalysisConfig) -> Result<AnalysisPipeline> {
    let mut builder = AnalysisPipeline::builder().config(config);

    if !args.quiet {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    Ok(builder.build()?)
}

/// Base name of the written report, taken from the employee file name.
fn report_base_name(config: &AnalysisConfig) -> String {
    config
        .hr_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "analysis".to_string())
}

fn handle_output(outcome: &AnalysisOutcome, config: &AnalysisConfig, args: &Args) -> Result<()> {
    let report = ReportGenerator::build_report(outcome, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", ReportGenerator::render_cross_tab(&outcome.greater_than_expected));
        print!("{}", ReportGenerator::render_cross_tab(&outcome.less_than_expected));
        print!("{}", ReportGenerator::render_travel(&outcome.travel)?);

        for partition in &report.distance.partitions {
            info!(
                "Distance {}: {} employees, attrition rate {:?}, retention rate {:?}",
                partition.label, partition.total, partition.yes_rate, partition.no_rate
            );
        }
    }

    let generator = ReportGenerator::new(config.output_dir.clone());

    if args.emit_report {
        let path = generator.write_report(&report, &report_base_name(config))?;
        if !args.json {
            info!("Report written to: {}", path.display());
        }
    }

    if args.emit_charts {
        let paths = generator.write_chart_data(outcome)?;
        if !args.json {
            info!("Chart data written: {} files in {}", paths.len(), generator.output_dir().display());
        }
    }

    Ok(())
}
