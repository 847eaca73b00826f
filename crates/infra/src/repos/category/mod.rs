mod inmemory;
mod postgres;

pub use inmemory::InMemoryCategoryRepo;
pub use postgres::PostgresCategoryRepo;
use tally_domain::{Category, TransactionKind, ID};

#[async_trait::async_trait]
pub trait ICategoryRepo: Send + Sync {
    async fn insert(&self, category: &Category) -> anyhow::Result<()>;
    async fn save(&self, category: &Category) -> anyhow::Result<()>;
    async fn find(&self, category_id: &ID) -> Option<Category>;
    async fn delete(&self, category_id: &ID) -> Option<Category>;
    /// `Category`s of a `User` ordered by name, optionally of one kind only
    async fn find_by_user(
        &self,
        user_id: &ID,
        kind: Option<TransactionKind>,
    ) -> anyhow::Result<Vec<Category>>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::{setup_context, TallyContext};
    use tally_domain::{Account, Category, TransactionKind, User};

    async fn create_contexts() -> Vec<TallyContext> {
        vec![TallyContext::create_inmemory(), setup_context().await]
    }

    #[tokio::test]
    async fn crud_and_find_by_user() {
        for ctx in create_contexts().await {
            let account = Account::default();
            ctx.repos.accounts.insert(&account).await.unwrap();
            let user = User::new(account.id.clone(), 0);
            ctx.repos.users.insert(&user).await.unwrap();

            let mut food = Category::new(
                user.id.clone(),
                account.id.clone(),
                "Food",
                TransactionKind::Expense,
                0,
            );
            food.set_subcategories(vec!["Groceries".into()]).unwrap();
            let salary = Category::new(
                user.id.clone(),
                account.id.clone(),
                "Salary",
                TransactionKind::Income,
                0,
            );
            ctx.repos.categories.insert(&salary).await.unwrap();
            ctx.repos.categories.insert(&food).await.unwrap();

            let all = ctx
                .repos
                .categories
                .find_by_user(&user.id, None)
                .await
                .unwrap();
            assert_eq!(all, vec![food.clone(), salary.clone()]);
            let income = ctx
                .repos
                .categories
                .find_by_user(&user.id, Some(TransactionKind::Income))
                .await
                .unwrap();
            assert_eq!(income, vec![salary.clone()]);

            food.set_subcategories(vec!["Groceries".into(), "Takeaway".into()])
                .unwrap();
            ctx.repos.categories.save(&food).await.unwrap();
            assert_eq!(ctx.repos.categories.find(&food.id).await, Some(food.clone()));

            assert_eq!(ctx.repos.categories.delete(&food.id).await, Some(food.clone()));
            assert!(ctx.repos.categories.find(&food.id).await.is_none());

            ctx.repos.categories.delete_by_user(&user.id).await.unwrap();
            assert!(ctx.repos.categories.find(&salary.id).await.is_none());
        }
    }
}
