//! Configuration types for the attrition analysis pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! Every default reproduces the reference analysis, so a run with
//! [`AnalysisConfig::default()`] needs nothing but the two input files.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the employee attrition dataset.
pub const DEFAULT_HR_FILE: &str = "IBM_HR_data.csv";

/// Default location of the census salary survey.
pub const DEFAULT_CENSUS_FILE: &str = "adult.csv";

/// Configuration for the analysis pipeline.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use hr_attrition::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .hr_path("data/IBM_HR_data.csv")
///     .census_path("data/adult.csv")
///     .max_age_inclusive(55)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Path to the employee attrition CSV (with header row).
    /// Default: "IBM_HR_data.csv"
    pub hr_path: PathBuf,

    /// Path to the census salary CSV (no header row).
    /// Default: "adult.csv"
    pub census_path: PathBuf,

    /// Census employment type kept by the filter.
    /// Default: "Private"
    pub job_type: String,

    /// Census location kept by the filter.
    /// Default: "United-States"
    pub location: String,

    /// Census rows must be strictly older than this.
    /// Default: 17
    pub min_age_exclusive: i64,

    /// Census rows must be at most this old.
    /// Default: 60
    pub max_age_inclusive: i64,

    /// Probable salary index separating the two cohorts (0 - 100).
    /// The boundary value belongs to the lower cohort.
    /// Default: 50.0
    pub salary_index_threshold: f64,

    /// Annual salary compared against in the cross-tabulations.
    /// Default: 50000.0
    pub annual_salary_threshold: f64,

    /// Commute distance splitting the distance breakdown.
    /// Rows exactly at the threshold belong to neither partition.
    /// Default: 25.0
    pub distance_threshold: f64,

    /// Output directory for reports and chart data.
    /// Default: "outputs"
    pub output_dir: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hr_path: PathBuf::from(DEFAULT_HR_FILE),
            census_path: PathBuf::from(DEFAULT_CENSUS_FILE),
            job_type: "Private".to_string(),
            location: "United-States".to_string(),
            min_age_exclusive: 17,
            max_age_inclusive: 60,
            salary_index_threshold: 50.0,
            annual_salary_threshold: 50_000.0,
            distance_threshold: 25.0,
            output_dir: PathBuf::from("outputs"),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Read a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: AnalysisConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigValidationError> {
        if self.min_age_exclusive >= self.max_age_inclusive {
            return Err(ConfigValidationError::InvalidAgeRange {
                min: self.min_age_exclusive,
                max: self.max_age_inclusive,
            });
        }

        if !(0.0..=100.0).contains(&self.salary_index_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "salary_index_threshold".to_string(),
                value: self.salary_index_threshold,
            });
        }

        if !self.annual_salary_threshold.is_finite() || self.annual_salary_threshold < 0.0 {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "annual_salary_threshold".to_string(),
                value: self.annual_salary_threshold,
            });
        }

        if !self.distance_threshold.is_finite() {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "distance_threshold".to_string(),
                value: self.distance_threshold,
            });
        }

        if self.job_type.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFilterValue("job_type".to_string()));
        }

        if self.location.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFilterValue("location".to_string()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value}")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid age range: ({min}, {max}] is empty")]
    InvalidAgeRange { min: i64, max: i64 },

    #[error("Filter value '{0}' must not be empty")]
    EmptyFilterValue(String),
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    hr_path: Option<PathBuf>,
    census_path: Option<PathBuf>,
    job_type: Option<String>,
    location: Option<String>,
    min_age_exclusive: Option<i64>,
    max_age_inclusive: Option<i64>,
    salary_index_threshold: Option<f64>,
    annual_salary_threshold: Option<f64>,
    distance_threshold: Option<f64>,
    output_dir: Option<PathBuf>,
}

impl AnalysisConfigBuilder {
    /// Set the employee attrition file.
    pub fn hr_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.hr_path = Some(path.into());
        self
    }

    /// Set the census salary file.
    pub fn census_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.census_path = Some(path.into());
        self
    }

    /// Set the employment type kept by the census filter.
    pub fn job_type(mut self, job_type: impl Into<String>) -> Self {
        self.job_type = Some(job_type.into());
        self
    }

    /// Set the location kept by the census filter.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the exclusive lower age bound of the census filter.
    pub fn min_age_exclusive(mut self, age: i64) -> Self {
        self.min_age_exclusive = Some(age);
        self
    }

    /// Set the inclusive upper age bound of the census filter.
    pub fn max_age_inclusive(mut self, age: i64) -> Self {
        self.max_age_inclusive = Some(age);
        self
    }

    /// Set the probable salary index that separates the cohorts.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 100.0
    pub fn salary_index_threshold(mut self, threshold: f64) -> Self {
        self.salary_index_threshold = Some(threshold);
        self
    }

    /// Set the annual salary compared against in the cross-tabulations.
    pub fn annual_salary_threshold(mut self, threshold: f64) -> Self {
        self.annual_salary_threshold = Some(threshold);
        self
    }

    /// Set the commute distance used by the distance breakdown.
    pub fn distance_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = Some(threshold);
        self
    }

    /// Set the output directory for reports and chart data.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> std::result::Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            hr_path: self.hr_path.unwrap_or(defaults.hr_path),
            census_path: self.census_path.unwrap_or(defaults.census_path),
            job_type: self.job_type.unwrap_or(defaults.job_type),
            location: self.location.unwrap_or(defaults.location),
            min_age_exclusive: self.min_age_exclusive.unwrap_or(defaults.min_age_exclusive),
            max_age_inclusive: self.max_age_inclusive.unwrap_or(defaults.max_age_inclusive),
            salary_index_threshold: self
                .salary_index_threshold
                .unwrap_or(defaults.salary_index_threshold),
            annual_salary_threshold: self
                .annual_salary_threshold
                .unwrap_or(defaults.annual_salary_threshold),
            distance_threshold: self.distance_threshold.unwrap_or(defaults.distance_threshold),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.hr_path, PathBuf::from("IBM_HR_data.csv"));
        assert_eq!(config.census_path, PathBuf::from("adult.csv"));
        assert_eq!(config.job_type, "Private");
        assert_eq!(config.location, "United-States");
        assert_eq!(config.min_age_exclusive, 17);
        assert_eq!(config.max_age_inclusive, 60);
        assert_eq!(config.salary_index_threshold, 50.0);
        assert_eq!(config.annual_salary_threshold, 50_000.0);
        assert_eq!(config.distance_threshold, 25.0);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .hr_path("hr.csv")
            .census_path("census.csv")
            .max_age_inclusive(55)
            .salary_index_threshold(40.0)
            .build()
            .unwrap();

        assert_eq!(config.hr_path, PathBuf::from("hr.csv"));
        assert_eq!(config.census_path, PathBuf::from("census.csv"));
        assert_eq!(config.max_age_inclusive, 55);
        assert_eq!(config.salary_index_threshold, 40.0);
        assert_eq!(config.min_age_exclusive, 17);
    }

    #[test]
    fn test_validation_invalid_index_threshold() {
        let result = AnalysisConfig::builder().salary_index_threshold(150.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidThreshold { .. }
        ));
    }

    #[test]
    fn test_validation_empty_age_range() {
        let result = AnalysisConfig::builder()
            .min_age_exclusive(60)
            .max_age_inclusive(60)
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidAgeRange { min: 60, max: 60 }
        ));
    }

    #[test]
    fn test_validation_nan_distance() {
        let result = AnalysisConfig::builder().distance_threshold(f64::NAN).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_from_partial_json() {
        let json = r#"{
            "census_path": "data/adult.csv",
            "max_age_inclusive": 65
        }"#;

        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.census_path, PathBuf::from("data/adult.csv"));
        assert_eq!(config.max_age_inclusive, 65);
        assert_eq!(config.hr_path, PathBuf::from("IBM_HR_data.csv"));
        assert_eq!(config.salary_index_threshold, 50.0);
    }

    #[test]
    fn test_config_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        std::fs::write(&path, r#"{ "location": "Canada" }"#).unwrap();

        let config = AnalysisConfig::from_json_file(&path).unwrap();
        assert_eq!(config.location, "Canada");
    }

    #[test]
    fn test_config_from_invalid_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        std::fs::write(&path, r#"{ "salary_index_threshold": -1.0 }"#).unwrap();

        let error = AnalysisConfig::from_json_file(&path).unwrap_err();
        assert_eq!(error.error_code(), "INVALID_CONFIG");
    }
}
