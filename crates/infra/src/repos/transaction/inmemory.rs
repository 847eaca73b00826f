use super::ITransactionRepo;
use crate::repos::shared::{
    inmemory_repo::*,
    query_structs::{QueryPage, TransactionQuery},
};
use itertools::Itertools;
use tally_domain::{
    report::{CategorySum, KindSum},
    DateRange, Decimal, Transaction, TransactionKind, ID,
};

pub struct InMemoryTransactionRepo {
    transactions: std::sync::Mutex<Vec<Transaction>>,
}

impl InMemoryTransactionRepo {
    pub fn new() -> Self {
        Self {
            transactions: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn find_in_range(&self, user_id: &ID, range: Option<&DateRange>) -> Vec<Transaction> {
        find_by(&self.transactions, |t| {
            t.user_id == *user_id && range.map(|r| r.contains(&t.date)).unwrap_or(true)
        })
    }
}

fn matches(transaction: &Transaction, query: &TransactionQuery) -> bool {
    transaction.user_id == query.user_id
        && query.kind.map(|kind| transaction.kind == kind).unwrap_or(true)
        && query
            .category
            .as_ref()
            .map(|category| &transaction.category == category)
            .unwrap_or(true)
        && query
            .date
            .as_ref()
            .map(|range| range.contains(&transaction.date))
            .unwrap_or(true)
}

#[async_trait::async_trait]
impl ITransactionRepo for InMemoryTransactionRepo {
    async fn insert(&self, transaction: &Transaction) -> anyhow::Result<()> {
        insert(transaction, &self.transactions);
        Ok(())
    }

    async fn save(&self, transaction: &Transaction) -> anyhow::Result<()> {
        save(transaction, &self.transactions);
        Ok(())
    }

    async fn find(&self, transaction_id: &ID) -> Option<Transaction> {
        find(transaction_id, &self.transactions)
    }

    async fn delete(&self, transaction_id: &ID) -> Option<Transaction> {
        delete(transaction_id, &self.transactions)
    }

    async fn find_by_query(
        &self,
        query: &TransactionQuery,
    ) -> anyhow::Result<QueryPage<Transaction>> {
        let mut transactions = find_by(&self.transactions, |t| matches(t, query));
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created.cmp(&a.created)));
        Ok(paginate(transactions, &query.pagination))
    }

    async fn sum_by_kind(
        &self,
        user_id: &ID,
        range: Option<&DateRange>,
    ) -> anyhow::Result<Vec<KindSum>> {
        let sums = self
            .find_in_range(user_id, range)
            .into_iter()
            .into_group_map_by(|t| t.kind)
            .into_iter()
            .map(|(kind, transactions)| KindSum {
                kind,
                amount: transactions.iter().map(|t| t.amount).sum::<Decimal>(),
            })
            .collect();
        Ok(sums)
    }

    async fn sum_by_category(
        &self,
        user_id: &ID,
        kind: TransactionKind,
        range: Option<&DateRange>,
    ) -> anyhow::Result<Vec<CategorySum>> {
        let sums = self
            .find_in_range(user_id, range)
            .into_iter()
            .filter(|t| t.kind == kind)
            .into_group_map_by(|t| (t.category.clone(), t.subcategory.clone()))
            .into_iter()
            .map(|((category, subcategory), transactions)| CategorySum {
                category,
                subcategory,
                amount: transactions.iter().map(|t| t.amount).sum::<Decimal>(),
            })
            .collect();
        Ok(sums)
    }

    async fn delete_by_user(&self, user_id: &ID) -> anyhow::Result<()> {
        find_and_delete_by(&self.transactions, |t| t.user_id == *user_id);
        Ok(())
    }
}
