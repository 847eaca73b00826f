use crate::{scoped, APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use tally_api_structs::*;
use tally_domain::ID;

#[derive(Clone)]
pub struct ReportClient {
    base: Arc<BaseClient>,
}

impl ReportClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn dashboard(
        &self,
        user_id: Option<ID>,
        query: get_dashboard::QueryParams,
    ) -> APIResponse<get_dashboard::APIResponse> {
        self.base
            .get_with_query(&query, scoped(&user_id, "reports/dashboard"), StatusCode::OK)
            .await
    }

    pub async fn categories(
        &self,
        user_id: Option<ID>,
        query: get_category_report::QueryParams,
    ) -> APIResponse<get_category_report::APIResponse> {
        self.base
            .get_with_query(&query, scoped(&user_id, "reports/categories"), StatusCode::OK)
            .await
    }

    pub async fn monthly(
        &self,
        user_id: Option<ID>,
        year: Option<i32>,
    ) -> APIResponse<get_monthly_report::APIResponse> {
        let query = get_monthly_report::QueryParams { year };
        self.base
            .get_with_query(&query, scoped(&user_id, "reports/monthly"), StatusCode::OK)
            .await
    }
}
