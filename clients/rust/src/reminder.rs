use crate::{scoped, APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use tally_api_structs::*;
use tally_domain::ID;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    /// The user to act on behalf of. Only account admins set this.
    pub user_id: Option<ID>,
    pub body: create_reminder::RequestBody,
}

pub struct GetRemindersInput {
    pub user_id: Option<ID>,
    pub query: get_reminders::QueryParams,
}

pub struct UpdateReminderInput {
    pub reminder_id: ID,
    pub body: update_reminder::RequestBody,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        self.base
            .post(
                input.body,
                scoped(&input.user_id, "reminders"),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn list(&self, input: GetRemindersInput) -> APIResponse<get_reminders::APIResponse> {
        self.base
            .get_with_query(
                &input.query,
                scoped(&input.user_id, "reminders"),
                StatusCode::OK,
            )
            .await
    }

    pub async fn summary(
        &self,
        user_id: Option<ID>,
    ) -> APIResponse<get_reminders_summary::APIResponse> {
        self.base
            .get(scoped(&user_id, "reminders/summary"), StatusCode::OK)
            .await
    }

    pub async fn get(&self, reminder_id: ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateReminderInput,
    ) -> APIResponse<update_reminder::APIResponse> {
        self.base
            .put(
                input.body,
                format!("reminders/{}", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    /// Completes the reminder and returns the next occurrence of a recurring one
    pub async fn complete(&self, reminder_id: ID) -> APIResponse<complete_reminder::APIResponse> {
        self.base
            .post(
                (),
                format!("reminders/{}/complete", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn delete_many(&self, ids: Vec<ID>) -> APIResponse<delete_reminders::APIResponse> {
        let body = delete_reminders::RequestBody { ids };
        self.base
            .post(body, "reminders/bulk-delete".into(), StatusCode::OK)
            .await
    }
}
