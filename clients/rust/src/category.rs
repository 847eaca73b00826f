use crate::{scoped, APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use tally_api_structs::*;
use tally_domain::{TransactionKind, ID};

#[derive(Clone)]
pub struct CategoryClient {
    base: Arc<BaseClient>,
}

pub struct CreateCategoryInput {
    /// The user to act on behalf of. Only account admins set this.
    pub user_id: Option<ID>,
    pub body: create_category::RequestBody,
}

pub struct UpdateCategoryInput {
    pub category_id: ID,
    pub body: update_category::RequestBody,
}

impl CategoryClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateCategoryInput,
    ) -> APIResponse<create_category::APIResponse> {
        self.base
            .post(
                input.body,
                scoped(&input.user_id, "categories"),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn list(
        &self,
        user_id: Option<ID>,
        kind: Option<TransactionKind>,
    ) -> APIResponse<get_categories::APIResponse> {
        let query = get_categories::QueryParams { kind };
        self.base
            .get_with_query(&query, scoped(&user_id, "categories"), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateCategoryInput,
    ) -> APIResponse<update_category::APIResponse> {
        self.base
            .put(
                input.body,
                format!("categories/{}", input.category_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, category_id: ID) -> APIResponse<delete_category::APIResponse> {
        self.base
            .delete(format!("categories/{}", category_id), StatusCode::OK)
            .await
    }
}
