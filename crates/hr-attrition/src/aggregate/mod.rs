//! Attrition aggregations.
//!
//! - [`crosstab`]: attrited employees of a salary cohort broken out by
//!   annual salary against a threshold
//! - [`travel`]: attrition counts per business travel category
//! - [`distance`]: attrition rates on either side of a commute distance
//!
//! All counts are declarative filters and group-bys over the table; no row
//! iteration with running counters. Zero denominators surface as
//! [`AnalysisError::DivisionByZero`](crate::error::AnalysisError::DivisionByZero)
//! from the rate accessors, never as NaN.

pub mod crosstab;
pub mod distance;
pub mod travel;

pub use crosstab::cross_tabulate;
pub use distance::{DistanceScatter, distance_breakdown, distance_scatter};
pub use travel::{attrition_values, total_values_travel, travel_table};
