use super::ICategoryRepo;
use crate::repos::shared::inmemory_repo::*;
use tally_domain::{Category, TransactionKind, ID};

pub struct InMemoryCategoryRepo {
    categories: std::sync::Mutex<Vec<Category>>,
}

impl InMemoryCategoryRepo {
    pub fn new() -> Self {
        Self {
            categories: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICategoryRepo for InMemoryCategoryRepo {
    async fn insert(&self, category: &Category) -> anyhow::Result<()> {
        insert(category, &self.categories);
        Ok(())
    }

    async fn save(&self, category: &Category) -> anyhow::Result<()> {
        save(category, &self.categories);
        Ok(())
    }

    async fn find(&self, category_id: &ID) -> Option<Category> {
        find(category_id, &self.categories)
    }

    async fn delete(&self, category_id: &ID) -> Option<Category> {
        delete(category_id, &self.categories)
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        kind: Option<TransactionKind>,
    ) -> anyhow::Result<Vec<Category>> {
        let mut categories = find_by(&self.categories, |c| {
            c.user_id == *user_id && kind.map(|kind| c.kind == kind).unwrap_or(true)
        });
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<()> {
        find_and_delete_by(&self.categories, |c| c.user_id == *user_id);
        Ok(())
    }
}
