use crate::shared::{
    auth::{protect_route, Permission},
    guard::{Guard, OwnershipError},
    usecase::{execute_with_policy, PermissionBoundary},
};
use crate::{error::TallyError, shared::usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::update_reminder::{APIResponse, PathParams, RequestBody};
use tally_domain::{
    date::{parse_datetime, InvalidDateError},
    InvalidReminderError, Recurrence, RecurrenceInterval, Reminder, ID,
};
use tally_infra::TallyContext;

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = UpdateReminderUseCase {
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
        body: body.0,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct UpdateReminderUseCase {
    user_id: ID,
    reminder_id: ID,
    body: RequestBody,
}

#[derive(Debug)]
enum UseCaseError {
    Ownership(OwnershipError),
    InvalidDate(InvalidDateError),
    InvalidReminder(InvalidReminderError),
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Ownership(e) => e.into(),
            UseCaseError::InvalidDate(e) => Self::BadClientData(e.to_string()),
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx.repos.reminders.find(&self.reminder_id).await;
        let mut reminder = Guard::against_foreign_record(reminder, &self.reminder_id, &self.user_id)
            .map_err(UseCaseError::Ownership)?;

        let due_date = match &self.body.due_date {
            Some(due_date) => Some(
                parse_datetime(due_date, &ctx.config.timezone).map_err(UseCaseError::InvalidDate)?,
            ),
            None => None,
        };

        if let Some(title) = &self.body.title {
            reminder.title = title.trim().to_string();
        }
        if let Some(description) = &self.body.description {
            reminder.description = Some(description.clone());
        }
        if let Some(category) = &self.body.category {
            reminder.category = category.trim().to_string();
        }
        if let Some(amount) = self.body.amount {
            reminder.amount = Some(amount);
        }
        if self.body.is_recurring.is_some() || self.body.recurrence_interval.is_some() {
            let is_recurring = self
                .body
                .is_recurring
                .unwrap_or_else(|| reminder.is_recurring());
            let interval = match &self.body.recurrence_interval {
                Some(tag) => Some(RecurrenceInterval::from_tag(Some(tag))),
                None => reminder.recurrence_interval(),
            };
            reminder.recurrence = Recurrence::from_parts(is_recurring, interval);
        }

        reminder.reschedule(due_date, self.body.status, ctx.now());
        reminder.validate().map_err(UseCaseError::InvalidReminder)?;

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for UpdateReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::UpdateReminder]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tally_domain::{NewReminder, ReminderStatus};
    use tally_infra::FixedSys;

    async fn setup() -> (TallyContext, Reminder) {
        let mut ctx = TallyContext::create_inmemory();
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap();
        ctx.sys = Arc::new(FixedSys::at(now));
        let reminder = Reminder::new(
            NewReminder {
                user_id: ID::new(),
                account_id: ID::new(),
                title: "Rent".into(),
                description: None,
                due_date: Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
                category: "Housing".into(),
                amount: None,
                recurrence: Recurrence::none(),
                status: None,
            },
            now,
        )
        .unwrap();
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        (ctx, reminder)
    }

    #[actix_web::main]
    #[test]
    async fn moving_the_due_date_into_the_past_makes_it_overdue() {
        let (ctx, reminder) = setup().await;
        let mut usecase = UpdateReminderUseCase {
            user_id: reminder.user_id.clone(),
            reminder_id: reminder.id.clone(),
            body: RequestBody {
                due_date: Some("2025-06-01".into()),
                is_recurring: Some(true),
                ..Default::default()
            },
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.status, ReminderStatus::Overdue);
        assert_eq!(updated.recurrence_interval(), Some(RecurrenceInterval::Monthly));
        assert_eq!(ctx.repos.reminders.find(&reminder.id).await, Some(updated));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_other_users() {
        let (ctx, reminder) = setup().await;
        let mut usecase = UpdateReminderUseCase {
            user_id: ID::new(),
            reminder_id: reminder.id.clone(),
            body: RequestBody::default(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::Ownership(OwnershipError::NotOwner(_)))
        ));
    }
}
