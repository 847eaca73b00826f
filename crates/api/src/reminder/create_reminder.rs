use crate::shared::auth::{account_can_modify_user, Permission};
use crate::shared::{
    auth::{protect_account_route, protect_route},
    usecase::{execute_with_policy, PermissionBoundary},
};
use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::create_reminder::{APIResponse, PathParams, RequestBody};
use tally_domain::{
    date::{parse_datetime, InvalidDateError},
    InvalidReminderError, NewReminder, Recurrence, RecurrenceInterval, Reminder, User,
};
use tally_infra::TallyContext;

pub async fn create_reminder_admin_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let usecase = CreateReminderUseCase {
        user,
        body: body.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(TallyError::from)
}

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = CreateReminderUseCase {
        user,
        body: body.0,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct CreateReminderUseCase {
    user: User,
    body: RequestBody,
}

#[derive(Debug, PartialEq)]
enum UseCaseError {
    InvalidDate(InvalidDateError),
    InvalidReminder(InvalidReminderError),
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDate(e) => Self::BadClientData(e.to_string()),
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let due_date = parse_datetime(&self.body.due_date, &ctx.config.timezone)
            .map_err(UseCaseError::InvalidDate)?;

        let recurrence = Recurrence::from_parts(
            self.body.is_recurring.unwrap_or(false),
            Some(RecurrenceInterval::from_tag(
                self.body.recurrence_interval.as_deref(),
            )),
        );

        let reminder = Reminder::new(
            NewReminder {
                user_id: self.user.id.clone(),
                account_id: self.user.account_id.clone(),
                title: self.body.title.clone(),
                description: self.body.description.clone(),
                due_date,
                category: self.body.category.clone(),
                amount: self.body.amount,
                recurrence,
                status: self.body.status,
            },
            ctx.now(),
        )
        .map_err(UseCaseError::InvalidReminder)?;

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for CreateReminderUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CreateReminder]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tally_domain::{ReminderStatus, ID};
    use tally_infra::FixedSys;

    fn body(due_date: &str) -> RequestBody {
        RequestBody {
            title: "Electricity".into(),
            description: None,
            due_date: due_date.into(),
            category: "Utilities".into(),
            amount: None,
            is_recurring: None,
            recurrence_interval: None,
            status: None,
        }
    }

    fn context() -> TallyContext {
        let mut ctx = TallyContext::create_inmemory();
        ctx.sys = Arc::new(FixedSys::at(Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()));
        ctx
    }

    #[actix_web::main]
    #[test]
    async fn infers_status_from_the_due_date() {
        let ctx = context();
        let user = User::new(ID::new(), 0);

        let mut usecase = CreateReminderUseCase {
            user: user.clone(),
            body: body("2025-06-01"),
        };
        let overdue = usecase.execute(&ctx).await.unwrap();
        assert_eq!(overdue.status, ReminderStatus::Overdue);

        let mut usecase = CreateReminderUseCase {
            user,
            body: body("2025-07-01"),
        };
        let pending = usecase.execute(&ctx).await.unwrap();
        assert_eq!(pending.status, ReminderStatus::Pending);
        assert_eq!(ctx.repos.reminders.find(&pending.id).await, Some(pending));
    }

    #[actix_web::main]
    #[test]
    async fn normalizes_recurrence() {
        let ctx = context();
        let user = User::new(ID::new(), 0);

        let mut b = body("2025-07-01");
        b.recurrence_interval = Some("weekly".into());
        let mut usecase = CreateReminderUseCase {
            user: user.clone(),
            body: b,
        };
        let reminder = usecase.execute(&ctx).await.unwrap();
        assert!(!reminder.is_recurring());
        assert_eq!(reminder.recurrence_interval(), None);

        let mut b = body("2025-07-01");
        b.is_recurring = Some(true);
        let mut usecase = CreateReminderUseCase { user, body: b };
        let reminder = usecase.execute(&ctx).await.unwrap();
        assert_eq!(
            reminder.recurrence_interval(),
            Some(RecurrenceInterval::Monthly)
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_malformed_due_dates() {
        let ctx = context();
        let mut usecase = CreateReminderUseCase {
            user: User::new(ID::new(), 0),
            body: body("next tuesday"),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidDate(_))
        ));
    }
}
