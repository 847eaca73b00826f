use super::guard::OwnershipError;
use tally_api_structs::dtos::{BulkDeleteFailureDTO, BulkDeleteResultDTO};
use tally_domain::ID;

/// Tally of a bulk delete. Items are processed one by one and a failing item
/// does not stop the rest.
#[derive(Debug, Default, PartialEq)]
pub struct BulkDeleteResult {
    pub success: Vec<ID>,
    pub failed: Vec<OwnershipError>,
}

impl BulkDeleteResult {
    pub fn record(&mut self, outcome: Result<ID, OwnershipError>) {
        match outcome {
            Ok(id) => self.success.push(id),
            Err(e) => self.failed.push(e),
        }
    }
}

impl From<BulkDeleteResult> for BulkDeleteResultDTO {
    fn from(res: BulkDeleteResult) -> Self {
        Self {
            success: res.success,
            failed: res
                .failed
                .into_iter()
                .map(|e| BulkDeleteFailureDTO {
                    reason: e.reason().to_string(),
                    id: match e {
                        OwnershipError::NotFound(id) | OwnershipError::NotOwner(id) => id,
                    },
                })
                .collect(),
        }
    }
}
