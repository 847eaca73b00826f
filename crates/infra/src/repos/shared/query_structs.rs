use tally_domain::{DateRange, Decimal, ReminderStatus, TransactionKind, ID};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pagination {
    pub skip: usize,
    pub limit: usize,
}

impl Pagination {
    /// `page` is 1 based
    pub fn page(page: usize, limit: usize) -> Self {
        Self {
            skip: page.saturating_sub(1).saturating_mul(limit),
            limit,
        }
    }

    /// `(limit, offset)` as bound in SQL, clamped to what Postgres accepts
    pub fn sql_bounds(&self) -> (i64, i64) {
        (
            i64::try_from(self.limit).unwrap_or(i64::MAX),
            i64::try_from(self.skip).unwrap_or(i64::MAX),
        )
    }
}

/// A page of results together with the number of matches across all pages
#[derive(Debug, Clone)]
pub struct QueryPage<T> {
    pub items: Vec<T>,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct ReminderQuery {
    pub user_id: ID,
    /// Matches any of the given statuses. Empty matches all.
    pub statuses: Vec<ReminderStatus>,
    pub category: Option<String>,
    pub due: Option<DateRange>,
    pub pagination: Pagination,
}

impl ReminderQuery {
    pub fn for_user(user_id: ID, pagination: Pagination) -> Self {
        Self {
            user_id,
            statuses: Vec::new(),
            category: None,
            due: None,
            pagination,
        }
    }
}

/// Number of `Reminder`s with a status and the sum of their amounts
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSum {
    pub status: ReminderStatus,
    pub count: usize,
    pub amount: Decimal,
}

#[derive(Debug, Clone)]
pub struct TransactionQuery {
    pub user_id: ID,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub date: Option<DateRange>,
    pub pagination: Pagination,
}

impl TransactionQuery {
    pub fn for_user(user_id: ID, pagination: Pagination) -> Self {
        Self {
            user_id,
            kind: None,
            category: None,
            date: None,
            pagination,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pages_are_offset_by_their_limit() {
        assert_eq!(Pagination::page(1, 20), Pagination { skip: 0, limit: 20 });
        assert_eq!(Pagination::page(0, 20), Pagination { skip: 0, limit: 20 });
        assert_eq!(Pagination::page(4, 25), Pagination { skip: 75, limit: 25 });
    }

    #[test]
    fn huge_pages_saturate_instead_of_overflowing() {
        let pagination = Pagination::page(usize::MAX / 2, 100);
        assert_eq!(pagination.skip, usize::MAX);
        assert_eq!(pagination.sql_bounds(), (100, i64::MAX));

        let pagination = Pagination::page(usize::MAX, usize::MAX);
        assert_eq!(pagination.sql_bounds(), (i64::MAX, i64::MAX));
    }
}
