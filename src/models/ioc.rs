//! IOC value object matching the feed manager wire format.

use serde::{Deserialize, Serialize};

use crate::errors::ImportError;

/// How an IOC's values are matched against telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Literal comparison of `values` against a named telemetry field.
    Equality,
    /// A single search-query expression in `values`.
    Query,
}

/// An atomic detection rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ioc {
    /// Opaque identifier, unique within a report.
    pub id: String,
    pub match_type: MatchType,
    /// Telemetry field the values are compared against; equality only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Literal values (equality) or a single query expression. Never empty.
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Ioc {
    /// Build an equality IOC matching `field` against one or more literal
    /// values.
    pub fn equality(
        id: impl Into<String>,
        field: impl Into<String>,
        values: Vec<String>,
    ) -> Result<Self, ImportError> {
        if values.is_empty() {
            return Err(ImportError::Validation(
                "equality IOC requires at least one value".to_string(),
            ));
        }
        Ok(Self {
            id: id.into(),
            match_type: MatchType::Equality,
            field: Some(field.into()),
            values,
            link: None,
        })
    }

    /// Build a query IOC from a single search expression.
    pub fn query(id: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            match_type: MatchType::Query,
            field: None,
            values: vec![expression.into()],
            link: None,
        }
    }
}
