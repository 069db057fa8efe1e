//! History records as stored in the document collections

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::UserId;

/// Append-only history collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    #[serde(rename = "analyses")]
    Analyses,
    #[serde(rename = "predictions")]
    Predictions,
    #[serde(rename = "businessPlans")]
    BusinessPlans,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Analyses,
        Collection::Predictions,
        Collection::BusinessPlans,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Analyses => "analyses",
            Collection::Predictions => "predictions",
            Collection::BusinessPlans => "businessPlans",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A history entry: the record's own fields flattened beside id, owner and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord<T> {
    pub id: String,
    pub user_id: UserId,
    /// ISO-8601, strictly increasing per store
    pub created_at: String,
    #[serde(flatten)]
    pub record: T,
}
