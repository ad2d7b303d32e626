//! Feed aggregate and creation parameters.

use serde::{Deserialize, Serialize};

use super::report::Report;

/// A feed as held by the remote store.
///
/// Identity is always store-assigned; the engine only ever reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub id: String,
    pub name: String,
    pub provider_url: String,
    pub summary: String,
    pub category: String,
    #[serde(default)]
    pub reports: Vec<Report>,
}

/// Parameters for creating a feed that does not exist yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFeed {
    pub name: String,
    pub provider_url: String,
    pub summary: String,
    pub category: String,
}
