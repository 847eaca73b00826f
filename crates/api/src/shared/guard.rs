use crate::error::TallyError;
use tally_domain::{Owned, ID};

pub struct Guard {}

/// Why a `User` can not act on a record
#[derive(Debug, PartialEq)]
pub enum OwnershipError {
    NotFound(ID),
    NotOwner(ID),
}

impl OwnershipError {
    /// The reason reported for a single failed item of a bulk operation
    pub fn reason(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not found",
            Self::NotOwner(_) => "not authorized",
        }
    }
}

impl From<OwnershipError> for TallyError {
    fn from(e: OwnershipError) -> Self {
        match e {
            OwnershipError::NotFound(id) => {
                Self::NotFound(format!("The record with id: {}, was not found.", id))
            }
            OwnershipError::NotOwner(id) => Self::Forbidden(format!(
                "The record with id: {}, does not belong to the requesting user.",
                id
            )),
        }
    }
}

impl Guard {
    /// Lets the record through only if it exists and belongs to `user_id`.
    /// A record owned by someone else is reported differently from a missing one.
    pub fn against_foreign_record<T: Owned>(
        record: Option<T>,
        record_id: &ID,
        user_id: &ID,
    ) -> Result<T, OwnershipError> {
        match record {
            Some(record) if record.user_id() == user_id => Ok(record),
            Some(_) => Err(OwnershipError::NotOwner(record_id.clone())),
            None => Err(OwnershipError::NotFound(record_id.clone())),
        }
    }
}
