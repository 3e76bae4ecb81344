//! Ordered categorical mapping tables.
//!
//! Each table is a list of rules evaluated top to bottom: the first rule whose
//! label set contains the input wins, and an input matched by no rule maps to
//! nothing. The tables are plain data so they can be inspected and tested
//! directly; [`rules_expr`] compiles one into a column expression.

use polars::prelude::*;

/// One `(labels, value)` entry of a mapping table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappingRule<T: 'static> {
    pub labels: &'static [&'static str],
    pub value: T,
}

/// A value a mapping rule can produce inside a polars expression.
pub trait RuleValue: Copy {
    fn to_expr(self) -> Expr;
    fn dtype() -> DataType;
}

impl RuleValue for &'static str {
    fn to_expr(self) -> Expr {
        lit(self)
    }

    fn dtype() -> DataType {
        DataType::String
    }
}

impl RuleValue for i64 {
    fn to_expr(self) -> Expr {
        lit(self)
    }

    fn dtype() -> DataType {
        DataType::Int64
    }
}

impl RuleValue for f64 {
    fn to_expr(self) -> Expr {
        lit(self)
    }

    fn dtype() -> DataType {
        DataType::Float64
    }
}

/// Census `JobPosition` → shared education field.
pub const EDUCATION_FIELD_RULES: &[MappingRule<&str>] = &[
    MappingRule {
        labels: &["Adm-clerical"],
        value: "Human Resources",
    },
    MappingRule {
        labels: &["Farming-fishing"],
        value: "Life Sciences",
    },
    MappingRule {
        labels: &["Machine-op-inspct", "Tech-support"],
        value: "Technical Degree",
    },
    MappingRule {
        labels: &["Other-service", "Transport-moving", "Handlers-cleaners"],
        value: "Other",
    },
    MappingRule {
        labels: &["Protective-serv", "Prof-specialty"],
        value: "Medical",
    },
    MappingRule {
        labels: &["Sales"],
        value: "Management",
    },
];

/// Census `EducationLevel` → education tier matching the employee code.
pub const EDUCATION_TIER_RULES: &[MappingRule<i64>] = &[
    MappingRule {
        labels: &["10th", "11th", "12th", "1st-4th", "5th-6th", "7th-8th", "9th"],
        value: 2,
    },
    MappingRule {
        labels: &["Assoc-acdm", "Assoc-voc", "Some-college", "HS-grad"],
        value: 2,
    },
    MappingRule {
        labels: &["Bachelors"],
        value: 3,
    },
    MappingRule {
        labels: &["Masters", "Prof-school"],
        value: 4,
    },
    MappingRule {
        labels: &["Doctorate"],
        value: 5,
    },
];

/// Census salary band → indicator value averaged into the salary index.
pub const SALARY_BAND_RULES: &[MappingRule<f64>] = &[
    MappingRule {
        labels: &["<=50K"],
        value: 0.0,
    },
    MappingRule {
        labels: &[">50K"],
        value: 100.0,
    },
];

/// Resolve `label` against `rules`: first match wins, else `None`.
pub fn resolve<T: Copy>(rules: &[MappingRule<T>], label: &str) -> Option<T> {
    rules
        .iter()
        .find(|rule| rule.labels.iter().any(|candidate| *candidate == label))
        .map(|rule| rule.value)
}

/// Every value a table can produce, in rule order, without duplicates.
pub fn codomain<T: Copy + PartialEq>(rules: &[MappingRule<T>]) -> Vec<T> {
    let mut values = Vec::with_capacity(rules.len());
    for rule in rules {
        if !values.contains(&rule.value) {
            values.push(rule.value);
        }
    }
    values
}

/// Compile `rules` into an expression over column `source`.
///
/// Builds a nested `when/then/otherwise` with the first rule outermost, so a
/// row takes the value of the earliest matching rule. Null or unmatched
/// inputs produce null.
pub fn rules_expr<T: RuleValue>(source: &str, rules: &[MappingRule<T>]) -> Expr {
    let fallback = lit(NULL).cast(T::dtype());

    rules
        .iter()
        .rev()
        .fold(fallback, |otherwise, rule| {
            let matches = rule
                .labels
                .iter()
                .map(|label| col(source).eq(lit(*label)))
                .reduce(|acc, cond| acc.or(cond))
                .unwrap_or_else(|| lit(false));
            when(matches).then(rule.value.to_expr()).otherwise(otherwise)
        })
        .cast(T::dtype())
}
