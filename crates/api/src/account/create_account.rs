use crate::{
    error::TallyError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tally_api_structs::create_account::{APIResponse, RequestBody};
use tally_domain::Account;
use tally_infra::TallyContext;

pub async fn create_account_controller(
    ctx: web::Data<TallyContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, TallyError> {
    let usecase = CreateAccountUseCase { code: body.0.code };
    execute(usecase, &ctx)
        .await
        .map(|account| HttpResponse::Created().json(APIResponse::new(account)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct CreateAccountUseCase {
    code: String,
}

#[derive(Debug, PartialEq)]
enum UseCaseError {
    StorageError,
    InvalidCreateAccountCode,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCreateAccountCode => {
                Self::Unauthorized("Invalid code provided".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAccountUseCase {
    type Response = Account;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateAccount";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        if self.code != ctx.config.create_account_secret_code {
            return Err(UseCaseError::InvalidCreateAccountCode);
        }
        let account = Account::new(ctx.sys.get_timestamp_millis());
        let res = ctx.repos.accounts.insert(&account).await;

        res.map(|_| account).map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn creates_account_only_with_the_secret_code() {
        let ctx = TallyContext::create_inmemory();

        let mut usecase = CreateAccountUseCase {
            code: "wrong".into(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidCreateAccountCode
        );

        let mut usecase = CreateAccountUseCase {
            code: ctx.config.create_account_secret_code.clone(),
        };
        let account = usecase.execute(&ctx).await.unwrap();
        assert!(account.secret_api_key.starts_with("sk_"));
        assert_eq!(ctx.repos.accounts.find(&account.id).await, Some(account));
    }
}
