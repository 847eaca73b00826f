use super::create_category::{ensure_unique_name, UseCaseError as UniqueNameError};
use crate::shared::{
    auth::{protect_route, Permission},
    guard::{Guard, OwnershipError},
    usecase::{execute_with_policy, PermissionBoundary},
};
use crate::{error::TallyError, shared::usecase::UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use tally_api_structs::update_category::{APIResponse, PathParams, RequestBody};
use tally_domain::{Category, InvalidCategoryError, ID};
use tally_infra::TallyContext;

pub async fn update_category_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TallyContext>,
) -> Result<HttpResponse, TallyError> {
    let (user, policy) = protect_route(&http_req, &ctx).await?;

    let usecase = UpdateCategoryUseCase {
        user_id: user.id,
        category_id: path_params.category_id.clone(),
        body: body.0,
    };

    execute_with_policy(usecase, &policy, &ctx)
        .await
        .map(|category| HttpResponse::Ok().json(APIResponse::new(category)))
        .map_err(TallyError::from)
}

/// Renames a `Category` or replaces its subcategories. Transactions keep
/// the category name they were recorded with.
#[derive(Debug)]
struct UpdateCategoryUseCase {
    user_id: ID,
    category_id: ID,
    body: RequestBody,
}

#[derive(Debug)]
enum UseCaseError {
    Ownership(OwnershipError),
    InvalidCategory(InvalidCategoryError),
    UniqueName(UniqueNameError),
    StorageError,
}

impl From<UseCaseError> for TallyError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Ownership(e) => e.into(),
            UseCaseError::InvalidCategory(e) => Self::BadClientData(e.to_string()),
            UseCaseError::UniqueName(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateCategoryUseCase {
    type Response = Category;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateCategory";

    async fn execute(&mut self, ctx: &TallyContext) -> Result<Self::Response, Self::Error> {
        let category = ctx.repos.categories.find(&self.category_id).await;
        let mut category = Guard::against_foreign_record(category, &self.category_id, &self.user_id)
            .map_err(UseCaseError::Ownership)?;

        if let Some(subcategories) = self.body.subcategories.clone() {
            category
                .set_subcategories(subcategories)
                .map_err(UseCaseError::InvalidCategory)?;
        }
        if let Some(name) = &self.body.name {
            category.name = name.trim().to_string();
            category.validate().map_err(UseCaseError::InvalidCategory)?;
            ensure_unique_name(&category, ctx)
                .await
                .map_err(UseCaseError::UniqueName)?;
        }

        ctx.repos
            .categories
            .save(&category)
            .await
            .map(|_| category)
            .map_err(|_| UseCaseError::StorageError)
    }
}

impl PermissionBoundary for UpdateCategoryUseCase {
    fn permissions(&self) -> Vec<Permission> {
        vec![Permission::UpdateCategory]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tally_domain::TransactionKind;

    #[actix_web::main]
    #[test]
    async fn renames_unless_the_name_is_taken() {
        let ctx = TallyContext::create_inmemory();
        let user_id = ID::new();
        let food = Category::new(user_id.clone(), ID::new(), "Food", TransactionKind::Expense, 0);
        let rent = Category::new(user_id.clone(), ID::new(), "Rent", TransactionKind::Expense, 0);
        ctx.repos.categories.insert(&food).await.unwrap();
        ctx.repos.categories.insert(&rent).await.unwrap();

        let mut usecase = UpdateCategoryUseCase {
            user_id: user_id.clone(),
            category_id: rent.id.clone(),
            body: RequestBody {
                name: Some("food".into()),
                subcategories: None,
            },
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::UniqueName(UniqueNameError::NameTaken(_)))
        ));

        let mut usecase = UpdateCategoryUseCase {
            user_id,
            category_id: rent.id.clone(),
            body: RequestBody {
                name: Some("Housing".into()),
                subcategories: Some(vec!["Rent".into(), "Insurance".into()]),
            },
        };
        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.name, "Housing");
        assert_eq!(updated.subcategories, vec!["Rent", "Insurance"]);
    }
}
