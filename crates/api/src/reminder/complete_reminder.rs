use crate::shared::{
    auth::{protect_route, Permission},
    guard::{Guard, OwnershipError},
    usecase::{execute_with_policy, PermissionBoundary},
};
use crate::{error::TallyError, shared::usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::complete_reminder::{APIResponse, PathParams};
use tally_domain::{CompletedReminder, ID};
use tally_infra::TallyContext;

pub async fn complete_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = CompleteReminderUseCase {
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder, res.next)))
        .map_err(TallyError::from)
}

/// Marks a `Reminder` as completed and schedules the next occurrence of a
/// recurring one. Completing the same `Reminder` twice is a conflict.
#[derive(Debug)]
struct CompleteReminderUseCase {
    user_id: ID,
    reminder_id: ID,
}

#[derive(Debug)]
enum UseCaseError {
    Ownership(OwnershipError),
    AlreadyCompleted(ID),
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Ownership(e) => e.into(),
            UseCaseError::AlreadyCompleted(id) => Self::Conflict(format!(
                "The reminder with id: {}, is already completed.",
                id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CompleteReminderUseCase {
    type Response = CompletedReminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CompleteReminder";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx.repos.reminders.find(&self.reminder_id).await;
        let reminder = Guard::against_foreign_record(reminder, &self.reminder_id, &self.user_id)
            .map_err(UseCaseError::Ownership)?;

        let completed = reminder
            .complete(ctx.now(), &ctx.config.timezone)
            .ok_or_else(|| UseCaseError::AlreadyCompleted(self.reminder_id.clone()))?;

        // Another request may have completed it since it was read
        match ctx.repos.reminders.complete(&completed).await {
            Ok(true) => Ok(completed),
            Ok(false) => Err(UseCaseError::AlreadyCompleted(self.reminder_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

impl PermissionBoundary for CompleteReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CompleteReminder]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tally_domain::{NewReminder, Recurrence, RecurrenceInterval, Reminder, ReminderStatus};
    use tally_infra::{FixedSys, Pagination, ReminderQuery};

    async fn insert(ctx: &TallyContext, recurrence: Recurrence) -> Reminder {
        let reminder = Reminder::new(
            NewReminder {
                user_id: ID::new(),
                account_id: ID::new(),
                title: "Internet".into(),
                description: Some("Fiber".into()),
                due_date: Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap(),
                category: "Utilities".into(),
                amount: None,
                recurrence,
                status: None,
            },
            ctx.now(),
        )
        .unwrap();
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    fn context() -> TallyContext {
        let mut ctx = TallyContext::create_inmemory();
        ctx.sys = Arc::new(FixedSys::at(Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap()));
        ctx
    }

    #[actix_web::main]
    #[test]
    async fn completes_a_one_off_reminder() {
        let ctx = context();
        let reminder = insert(&ctx, Recurrence::none()).await;

        let mut usecase = CompleteReminderUseCase {
            user_id: reminder.user_id.clone(),
            reminder_id: reminder.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.reminder.status, ReminderStatus::Completed);
        assert!(res.next.is_none());
    }

    #[actix_web::main]
    #[test]
    async fn schedules_the_next_occurrence_once() {
        let ctx = context();
        let reminder = insert(&ctx, Recurrence::every(RecurrenceInterval::Monthly)).await;

        let mut usecase = CompleteReminderUseCase {
            user_id: reminder.user_id.clone(),
            reminder_id: reminder.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        let next = res.next.unwrap();
        assert_eq!(next.due_date, Utc.with_ymd_and_hms(2025, 3, 3, 12, 0, 0).unwrap());
        assert_eq!(next.status, ReminderStatus::Pending);
        assert_eq!(next.title, reminder.title);
        assert_eq!(next.description, reminder.description);

        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::AlreadyCompleted(_))
        ));

        let page = ctx
            .repos
            .reminders
            .find_by_query(&ReminderQuery::for_user(
                reminder.user_id.clone(),
                Pagination::page(1, 10),
            ))
            .await
            .unwrap();
        assert_eq!(page.total, 2);
    }
}
