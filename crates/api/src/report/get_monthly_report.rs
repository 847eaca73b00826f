use crate::shared::auth::{account_can_modify_user, protect_account_route, protect_route};
use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Datelike;
use tally_api_structs::get_monthly_report::{PathParams, QueryParams};
use tally_domain::{
    date::utc_to_local,
    report::{MonthlyEntry, MonthlySeries, Totals},
    DateRange, ID,
};
use tally_infra::TallyContext;

pub async fn get_monthly_report_admin_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let usecase = GetMonthlyReportUseCase {
        user_id: user.id,
        year: query_params.year,
    };

    execute(usecase, &ctx)
        .await
        .map(|series| HttpResponse::Ok().json(series))
        .map_err(TallyError::from)
}

pub async fn get_monthly_report_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, _policy) = protect_route(&http_req, &ctx).await?;

    let usecase = GetMonthlyReportUseCase {
        user_id: user.id,
        year: query_params.year,
    };

    execute(usecase, &ctx)
        .await
        .map(|series| HttpResponse::Ok().json(series))
        .map_err(TallyError::from)
}

/// Income, expenses and balance for every month of a year
#[derive(Debug)]
struct GetMonthlyReportUseCase {
    user_id: ID,
    /// Defaults to the current year
    year: Option<i32>,
}

#[derive(Debug)]
enum UseCaseError {
    InvalidYear(i32),
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidYear(year) => {
                Self::BadClientData(format!("The year: {}, is not supported", year))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMonthlyReportUseCase {
    type Response = MonthlySeries;

    type Error = UseCaseError;

    const NAME: &'static str = "GetMonthlyReport";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let tz = &ctx.config.timezone;
        let year = self
            .year
            .unwrap_or_else(|| utc_to_local(tz, &ctx.now()).year());

        let mut months = Vec::with_capacity(12);
        for month in 1..=12 {
            let range =
                DateRange::for_month(year, month, tz).ok_or(UseCaseError::InvalidYear(year))?;
            let sums = ctx
                .repos
                .transactions
                .sum_by_kind(&self.user_id, Some(&range))
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            months.push(MonthlyEntry::new(month, Totals::from_kind_sums(&sums)));
        }

        Ok(MonthlySeries::new(year, months))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use tally_domain::{Decimal, Recurrence, Transaction, TransactionKind};
    use tally_infra::FixedSys;

    #[actix_web::main]
    #[test]
    async fn has_an_entry_for_every_month() {
        let mut ctx = TallyContext::create_inmemory();
        ctx.sys = Arc::new(FixedSys::at(Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap()));
        let user_id = ID::new();
        let entries = vec![
            (TransactionKind::Income, 2000, Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap()),
            (TransactionKind::Expense, 500, Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()),
            (TransactionKind::Expense, 100, Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()),
        ];
        for (kind, amount, date) in entries {
            let transaction = Transaction {
                id: Default::default(),
                user_id: user_id.clone(),
                account_id: ID::new(),
                kind,
                category: "General".into(),
                subcategory: None,
                amount: Decimal::from(amount),
                date,
                recurrence: Recurrence::none(),
                description: None,
                created: 0,
                updated: 0,
            };
            ctx.repos.transactions.insert(&transaction).await.unwrap();
        }

        let mut usecase = GetMonthlyReportUseCase {
            user_id,
            year: None,
        };
        let series = usecase.execute(&ctx).await.unwrap();
        assert_eq!(series.year, 2025);
        assert_eq!(series.months.len(), 12);
        assert_eq!(series.months[0].income, Decimal::from(2000));
        assert_eq!(series.months[1].expenses, Decimal::from(500));
        assert_eq!(series.totals.balance, Decimal::from(1500));
        assert!(series.months[2..]
            .iter()
            .all(|m| m.income.is_zero() && m.expenses.is_zero()));
    }
}
