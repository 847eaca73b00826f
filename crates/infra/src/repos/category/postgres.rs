use super::ICategoryRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tally_domain::{Category, TransactionKind, ID};
use tracing::error;

pub struct PostgresCategoryRepo {
    pool: PgPool,
}

impl PostgresCategoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRaw {
    category_uid: Uuid,
    user_uid: Uuid,
    account_uid: Uuid,
    name: String,
    kind: String,
    subcategories: Vec<String>,
    created: i64,
}

impl TryFrom<CategoryRaw> for Category {
    type Error = anyhow::Error;

    fn try_from(e: CategoryRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.category_uid.into(),
            user_id: e.user_uid.into(),
            account_id: e.account_uid.into(),
            name: e.name,
            kind: e.kind.parse()?,
            subcategories: e.subcategories,
            created: e.created,
        })
    }
}

#[async_trait::async_trait]
impl ICategoryRepo for PostgresCategoryRepo {
    async fn insert(&self, category: &Category) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO categories(category_uid, user_uid, account_uid, name, kind, subcategories, created)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(category.id.inner_ref())
        .bind(category.user_id.inner_ref())
        .bind(category.account_id.inner_ref())
        .bind(&category.name)
        .bind(category.kind.to_string())
        .bind(&category.subcategories)
        .bind(category.created)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert category: {:?}. DB returned error: {:?}",
                category.id, e
            );
            e
        })?;
        Ok(())
    }

    async fn save(&self, category: &Category) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE categories
            SET name = $2,
            subcategories = $3
            WHERE category_uid = $1
            "#,
        )
        .bind(category.id.inner_ref())
        .bind(&category.name)
        .bind(&category.subcategories)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to save category: {:?}. DB returned error: {:?}",
                category.id, e
            );
            e
        })?;
        Ok(())
    }

    async fn find(&self, category_id: &ID) -> Option<Category> {
        let res: Option<CategoryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM categories
            WHERE category_uid = $1
            "#,
        )
        .bind(category_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find category with id: {:?} failed. DB returned error: {:?}",
                category_id, e
            );
            e
        })
        .ok()?;
        res.and_then(|c| c.try_into().ok())
    }

    async fn delete(&self, category_id: &ID) -> Option<Category> {
        let res: Option<CategoryRaw> = sqlx::query_as(
            r#"
            DELETE FROM categories
            WHERE category_uid = $1
            RETURNING *
            "#,
        )
        .bind(category_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Delete category with id: {:?} failed. DB returned error: {:?}",
                category_id, e
            );
            e
        })
        .ok()?;
        res.and_then(|c| c.try_into().ok())
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        kind: Option<TransactionKind>,
    ) -> anyhow::Result<Vec<Category>> {
        let categories: Vec<CategoryRaw> = sqlx::query_as(
            r#"
            SELECT * FROM categories
            WHERE user_uid = $1 AND
            ($2::text IS NULL OR kind = $2)
            ORDER BY name ASC
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(kind.map(|kind| kind.to_string()))
        .fetch_all(&self.pool)
        .await?;
        categories.into_iter().map(Category::try_from).collect()
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM categories
            WHERE user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
