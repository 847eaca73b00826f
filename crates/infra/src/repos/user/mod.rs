mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;
use tally_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn delete(&self, user_id: &ID) -> Option<User>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    /// Finds the `User` only if it belongs to the given `Account`
    async fn find_by_account_id(&self, user_id: &ID, account_id: &ID) -> Option<User>;
}

#[cfg(test)]
mod tests {
    use crate::{setup_context, TallyContext};
    use tally_domain::{Account, User};

    async fn create_contexts() -> Vec<TallyContext> {
        vec![TallyContext::create_inmemory(), setup_context().await]
    }

    #[tokio::test]
    async fn crud() {
        for ctx in create_contexts().await {
            let account = Account::default();
            ctx.repos
                .accounts
                .insert(&account)
                .await
                .expect("To insert account");
            let mut user = User::new(account.id.clone(), 10);
            ctx.repos.users.insert(&user).await.expect("To insert user");

            assert_eq!(ctx.repos.users.find(&user.id).await, Some(user.clone()));
            assert_eq!(
                ctx.repos
                    .users
                    .find_by_account_id(&user.id, &account.id)
                    .await,
                Some(user.clone())
            );
            // Another account can not see the user
            assert!(ctx
                .repos
                .users
                .find_by_account_id(&user.id, &Default::default())
                .await
                .is_none());

            user.name = Some("Kari".into());
            user.metadata.insert("household".into(), "north".into());
            ctx.repos.users.save(&user).await.expect("To save user");
            assert_eq!(ctx.repos.users.find(&user.id).await, Some(user.clone()));

            assert_eq!(ctx.repos.users.delete(&user.id).await, Some(user.clone()));
            assert!(ctx.repos.users.find(&user.id).await.is_none());
            assert!(ctx.repos.users.delete(&user.id).await.is_none());
        }
    }
}
