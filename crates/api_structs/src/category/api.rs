use crate::{dtos::CategoryDTO, shared::api::UserPathParams};
use serde::{Deserialize, Serialize};
use tally_domain::{Category, TransactionKind, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub category: CategoryDTO,
}

impl CategoryResponse {
    pub fn new(category: Category) -> Self {
        Self {
            category: CategoryDTO::new(category),
        }
    }
}

pub mod create_category {
    use super::*;

    #[derive(Debug, Clone, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        #[serde(default)]
        pub subcategories: Option<Vec<String>>,
    }

    pub type PathParams = UserPathParams;

    pub type APIResponse = CategoryResponse;
}

pub mod get_categories {
    use super::*;

    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(rename = "type")]
        pub kind: Option<TransactionKind>,
    }

    pub type PathParams = UserPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub categories: Vec<CategoryDTO>,
    }

    impl APIResponse {
        pub fn new(categories: Vec<Category>) -> Self {
            Self {
                categories: categories.into_iter().map(CategoryDTO::new).collect(),
            }
        }
    }
}

pub mod update_category {
    use super::*;

    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub subcategories: Option<Vec<String>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub category_id: ID,
    }

    pub type APIResponse = CategoryResponse;
}

pub mod delete_category {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub category_id: ID,
    }

    pub type APIResponse = CategoryResponse;
}
