use crate::{scoped, APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use tally_api_structs::*;
use tally_domain::ID;

#[derive(Clone)]
pub struct TransactionClient {
    base: Arc<BaseClient>,
}

pub struct CreateTransactionInput {
    /// The user to act on behalf of. Only account admins set this.
    pub user_id: Option<ID>,
    pub body: create_transaction::RequestBody,
}

pub struct GetTransactionsInput {
    pub user_id: Option<ID>,
    pub query: get_transactions::QueryParams,
}

pub struct UpdateTransactionInput {
    pub transaction_id: ID,
    pub body: update_transaction::RequestBody,
}

impl TransactionClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> APIResponse<create_transaction::APIResponse> {
        self.base
            .post(
                input.body,
                scoped(&input.user_id, "transactions"),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn list(
        &self,
        input: GetTransactionsInput,
    ) -> APIResponse<get_transactions::APIResponse> {
        self.base
            .get_with_query(
                &input.query,
                scoped(&input.user_id, "transactions"),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get(&self, transaction_id: ID) -> APIResponse<get_transaction::APIResponse> {
        self.base
            .get(format!("transactions/{}", transaction_id), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateTransactionInput,
    ) -> APIResponse<update_transaction::APIResponse> {
        self.base
            .put(
                input.body,
                format!("transactions/{}", input.transaction_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(
        &self,
        transaction_id: ID,
    ) -> APIResponse<delete_transaction::APIResponse> {
        self.base
            .delete(format!("transactions/{}", transaction_id), StatusCode::OK)
            .await
    }

    pub async fn delete_many(
        &self,
        ids: Vec<ID>,
    ) -> APIResponse<delete_transactions::APIResponse> {
        let body = delete_transactions::RequestBody { ids };
        self.base
            .post(body, "transactions/bulk-delete".into(), StatusCode::OK)
            .await
    }
}
