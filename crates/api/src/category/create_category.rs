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
use tally_api_structs::create_category::{APIResponse, PathParams, RequestBody};
use tally_domain::{Category, InvalidCategoryError, User};
use tally_infra::TallyContext;

pub async fn create_category_admin_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let account = protect_account_route(&http_req, &ctx).await?;
    let user = account_can_modify_user(&account, &path_params.user_id, &ctx).await?;

    let usecase = CreateCategoryUseCase {
        user,
        body: body.0,
    };

    execute(usecase, &ctx)
        .await
        .map(|category| HttpResponse::Created().json(APIResponse::new(category)))
        .map_err(TallyError::from)
}

pub async fn create_category_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = CreateCategoryUseCase {
        user,
        body: body.0,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|category| HttpResponse::Created().json(APIResponse::new(category)))
        .map_err(TallyError::from)
}

#[derive(Debug)]
struct CreateCategoryUseCase {
    user: User,
    body: RequestBody,
}

#[derive(Debug)]
pub(super) enum UseCaseError {
    InvalidCategory(InvalidCategoryError),
    NameTaken(String),
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCategory(e) => Self::BadClientData(e.to_string()),
            UseCaseError::NameTaken(name) => Self::Conflict(format!(
                "A category with the name: {}, already exists.",
                name
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Fails if `category` clashes with another `Category` of the same `User`
pub(super) async fn ensure_unique_name(
    category: &Category,
    ctx: &TallyContext,
) -> Result<(), UseCaseError> {
    let existing = ctx
        .repos
        .categories
        .find_by_user(&category.user_id, Some(category.kind))
        .await
        .map_err(|_| UseCaseError::StorageError)?;
    if existing.iter().any(|other| category.clashes_with(other)) {
        return Err(UseCaseError::NameTaken(category.name.clone()));
    }
    Ok(())
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateCategoryUseCase {
    type Response = Category;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateCategory";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let mut category = Category::new(
            self.user.id.clone(),
            self.user.account_id.clone(),
            &self.body.name,
            self.body.kind,
            ctx.sys.get_timestamp_millis(),
        );
        if let Some(subcategories) = self.body.subcategories.clone() {
            category
                .set_subcategories(subcategories)
                .map_err(UseCaseError::InvalidCategory)?;
        }
        category.validate().map_err(UseCaseError::InvalidCategory)?;
        ensure_unique_name(&category, ctx).await?;

        ctx.repos
            .categories
            .insert(&category)
            .await
            .map(|_| category)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for CreateCategoryUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::CreateCategory]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tally_domain::{TransactionKind, ID};

    fn body(name: &str, kind: TransactionKind) -> RequestBody {
        RequestBody {
            name: name.into(),
            kind,
            subcategories: Some(vec!["Groceries".into()]),
        }
    }

    #[actix_web::main]
    #[test]
    async fn rejects_duplicate_names_per_kind() {
        let ctx = TallyContext::create_inmemory();
        let user = User::new(ID::new(), 0);

        let mut usecase = CreateCategoryUseCase {
            user: user.clone(),
            body: body("Food", TransactionKind::Expense),
        };
        let category = usecase.execute(&ctx).await.unwrap();
        assert_eq!(category.subcategories, vec!["Groceries"]);

        let mut usecase = CreateCategoryUseCase {
            user: user.clone(),
            body: body("FOOD", TransactionKind::Expense),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NameTaken(_))
        ));

        let mut usecase = CreateCategoryUseCase {
            user,
            body: body("Food", TransactionKind::Income),
        };
        assert!(usecase.execute(&ctx).await.is_ok());
    }

    #[actix_web::main]
    #[test]
    async fn requires_a_name() {
        let ctx = TallyContext::create_inmemory();
        let mut usecase = CreateCategoryUseCase {
            user: User::new(ID::new(), 0),
            body: body("  ", TransactionKind::Expense),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidCategory(InvalidCategoryError::MissingName))
        ));
    }
}
