use serde::{Deserialize, Serialize};
use tally_domain::ID;

/// Why a single item of a bulk delete was left untouched
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteFailureDTO {
    pub id: ID,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResultDTO {
    pub success: Vec<ID>,
    pub failed: Vec<BulkDeleteFailureDTO>,
}
