//! Loading of the two input datasets into typed tables.
//!
//! Both loaders fail fatally on unusable input: a missing file, a census file
//! whose rows do not all carry the documented column count, a missing employee
//! column, an empty required numeric value, or a value that cannot be parsed
//! as the column's type.

use crate::error::{AnalysisError, Result, ResultExt};
use crate::schema::{
    AGE, CENSUS_COLUMNS, CENSUS_RAW_COLUMNS, DISTANCE_FROM_HOME, EDUCATION,
    EMPLOYEE_REQUIRED_COLUMNS, MONTHLY_INCOME,
};
use crate::utils::{numeric_expr, require_columns};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Employee columns parsed as numbers, in cast order.
const NUMERIC_EMPLOYEE_COLUMNS: [&str; 4] = [AGE, EDUCATION, MONTHLY_INCOME, DISTANCE_FROM_HOME];

/// Reads the employee and census CSV files.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load the employee attrition dataset (comma-delimited, header row).
    ///
    /// Columns outside [`EMPLOYEE_REQUIRED_COLUMNS`] are carried through as
    /// read. `Age` and `Education` become `i64`, `MonthlyIncome` and
    /// `DistanceFromHome` become `f64`; none of the four may be empty.
    pub fn load_employees(path: &Path) -> Result<DataFrame> {
        let file = ensure_exists(path)?;
        info!("Loading employee dataset from: {}", file);

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .try_into_reader_with_file_path(Some(PathBuf::from(path)))
            .context(format!("Failed to open '{}'", file))?
            .finish()
            .context(format!("Failed to parse '{}'", file))?;

        require_columns(&df, &EMPLOYEE_REQUIRED_COLUMNS, &file)?;

        let typed = Self::type_employee_columns(df).context(format!("Malformed values in '{}'", file))?;
        for name in NUMERIC_EMPLOYEE_COLUMNS {
            let rows = typed.column(name)?.null_count();
            if rows > 0 {
                return Err(AnalysisError::MissingValues {
                    file,
                    column: name.to_string(),
                    rows,
                });
            }
        }
        debug!("Employee dataset shape: {:?}", typed.shape());
        Ok(typed)
    }

    /// Load the census salary survey (comma-delimited, no header row).
    ///
    /// Applies the 15 documented column names, keeps the 9 analysis columns
    /// in fixed order and sorts ascending by `Age`. Every retained column
    /// except `Age` stays raw text; trimming happens in the filter.
    pub fn load_census(path: &Path) -> Result<DataFrame> {
        let file = ensure_exists(path)?;
        info!("Loading census dataset from: {}", file);

        // Infer nothing: every column is read as text and parsed explicitly.
        let mut df = CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(PathBuf::from(path)))
            .context(format!("Failed to open '{}'", file))?
            .finish()
            .context(format!("Failed to parse '{}'", file))?;

        if df.width() != CENSUS_RAW_COLUMNS.len() {
            return Err(AnalysisError::SchemaMismatch {
                file,
                expected: CENSUS_RAW_COLUMNS.len(),
                found: df.width(),
            });
        }

        ensure_complete_rows(&df, &file)?;

        df.set_column_names(CENSUS_RAW_COLUMNS)?;
        let selected = df.select(CENSUS_COLUMNS)?;

        let typed = Self::type_census_columns(selected).context(format!("Malformed values in '{}'", file))?;
        debug!("Census dataset shape: {:?}", typed.shape());
        Ok(typed)
    }

    /// Cast the employee columns used by the analysis to their types.
    pub fn type_employee_columns(df: DataFrame) -> Result<DataFrame> {
        let targets = [DataType::Int64, DataType::Int64, DataType::Float64, DataType::Float64];

        let mut exprs = Vec::with_capacity(targets.len());
        for (name, target) in NUMERIC_EMPLOYEE_COLUMNS.into_iter().zip(targets) {
            let current = df.column(name)?.dtype().clone();
            exprs.push(numeric_expr(name, &current, target));
        }

        Ok(df.lazy().with_columns(exprs).collect()?)
    }

    /// Parse census `Age` as `i64` and sort ascending by it.
    pub fn type_census_columns(df: DataFrame) -> Result<DataFrame> {
        let current = df.column(AGE)?.dtype().clone();

        Ok(df
            .lazy()
            .with_column(numeric_expr(AGE, &current, DataType::Int64))
            .sort([AGE], SortMultipleOptions::default().with_maintain_order(true))
            .collect()?)
    }
}

/// Reject census rows with fewer fields than the first one.
///
/// The reader sizes the table from the first row and pads shorter rows with
/// nulls, so a null in the last column marks a truncated row.
fn ensure_complete_rows(df: &DataFrame, file: &str) -> Result<()> {
    let Some(last) = df.get_columns().last() else {
        return Ok(());
    };
    let Some(row) = last.is_null().into_iter().position(|missing| missing == Some(true)) else {
        return Ok(());
    };

    let found = df
        .get_columns()
        .iter()
        .filter(|column| !matches!(column.get(row), Ok(AnyValue::Null)))
        .count();

    Err(AnalysisError::SchemaMismatch {
        file: file.to_string(),
        expected: CENSUS_RAW_COLUMNS.len(),
        found,
    }
    .with_context(format!("Incomplete row {} in '{}'", row + 1, file)))
}

/// Return the display name of `path`, or `FileNotFound`.
fn ensure_exists(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(AnalysisError::FileNotFound(path.to_path_buf()));
    }
    Ok(path.display().to_string())
}
