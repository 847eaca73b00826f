use serde::{Deserialize, Serialize};
use tally_domain::{DateRangeQuery, ID};

/// Path of the admin routes acting on behalf of a user
#[derive(Debug, Deserialize, Serialize)]
pub struct UserPathParams {
    pub user_id: ID,
}

/// Body of every bulk delete request
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequestBody {
    pub ids: Vec<ID>,
}

/// The date filter query parameters shared by list and report endpoints
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilterParams {
    pub date_range: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<DateFilterParams> for DateRangeQuery {
    fn from(params: DateFilterParams) -> Self {
        Self {
            date_range: params.date_range,
            start_date: params.start_date,
            end_date: params.end_date,
        }
    }
}
