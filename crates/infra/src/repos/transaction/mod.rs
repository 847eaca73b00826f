mod inmemory;
mod postgres;

use crate::repos::shared::query_structs::{QueryPage, TransactionQuery};
pub use inmemory::InMemoryTransactionRepo;
pub use postgres::PostgresTransactionRepo;
use tally_domain::{
    report::{CategorySum, KindSum},
    DateRange, Transaction, TransactionKind, ID,
};

#[async_trait::async_trait]
pub trait ITransactionRepo: Send + Sync {
    async fn insert(&self, transaction: &Transaction) -> anyhow::Result<()>;
    async fn save(&self, transaction: &Transaction) -> anyhow::Result<()>;
    async fn find(&self, transaction_id: &ID) -> Option<Transaction>;
    async fn delete(&self, transaction_id: &ID) -> Option<Transaction>;
    /// Matching `Transaction`s ordered by date, newest first
    async fn find_by_query(
        &self,
        query: &TransactionQuery,
    ) -> anyhow::Result<QueryPage<Transaction>>;
    /// Sum of amounts per kind, optionally limited to a `DateRange`
    async fn sum_by_kind(
        &self,
        user_id: &ID,
        range: Option<&DateRange>,
    ) -> anyhow::Result<Vec<KindSum>>;
    /// Sum of amounts per (category, subcategory) for one kind
    async fn sum_by_category(
        &self,
        user_id: &ID,
        kind: TransactionKind,
        range: Option<&DateRange>,
    ) -> anyhow::Result<Vec<CategorySum>>;
    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<()>;
}
