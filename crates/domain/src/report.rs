use crate::TransactionKind;
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sum of `Transaction` amounts of a single kind
#[derive(Debug, Clone, PartialEq)]
pub struct KindSum {
    pub kind: TransactionKind,
    pub amount: Decimal,
}

/// Sum of `Transaction` amounts for a (category, subcategory) pair
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySum {
    pub category: String,
    pub subcategory: Option<String>,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

impl Totals {
    pub fn new(income: Decimal, expenses: Decimal) -> Self {
        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }

    pub fn from_kind_sums(sums: &[KindSum]) -> Self {
        let sum_of = |kind: TransactionKind| {
            sums.iter()
                .filter(|s| s.kind == kind)
                .map(|s| s.amount)
                .sum::<Decimal>()
        };
        Self::new(sum_of(TransactionKind::Income), sum_of(TransactionKind::Expense))
    }
}

/// `amount` as a percentage of `total`, rounded to two decimals.
/// A zero total gives zero percent.
pub fn percentage_of(amount: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (amount / total * Decimal::ONE_HUNDRED).round_dp(2)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryShare {
    /// `None` collects the amounts without a subcategory
    pub subcategory: Option<String>,
    pub amount: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
    pub subcategories: Vec<SubcategoryShare>,
}

/// Amounts per category with their share of the total. Subcategory
/// percentages are also relative to the grand total.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub total: Decimal,
    pub categories: Vec<CategoryShare>,
}

impl CategoryBreakdown {
    pub fn new(sums: Vec<CategorySum>) -> Self {
        let total = sums.iter().map(|s| s.amount).sum::<Decimal>();

        let categories = sums
            .into_iter()
            .into_group_map_by(|s| s.category.clone())
            .into_iter()
            .map(|(category, sums)| {
                let amount = sums.iter().map(|s| s.amount).sum::<Decimal>();
                let subcategories = sums
                    .into_iter()
                    .into_group_map_by(|s| s.subcategory.clone())
                    .into_iter()
                    .map(|(subcategory, sums)| {
                        let amount = sums.iter().map(|s| s.amount).sum::<Decimal>();
                        SubcategoryShare {
                            subcategory,
                            amount,
                            percentage: percentage_of(amount, total),
                        }
                    })
                    .sorted_by(|a, b| {
                        b.amount
                            .cmp(&a.amount)
                            .then_with(|| a.subcategory.cmp(&b.subcategory))
                    })
                    .collect();
                CategoryShare {
                    category,
                    amount,
                    percentage: percentage_of(amount, total),
                    subcategories,
                }
            })
            .sorted_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)))
            .collect();

        Self { total, categories }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntry {
    /// 1 based month of the year
    pub month: u32,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

impl MonthlyEntry {
    pub fn new(month: u32, totals: Totals) -> Self {
        Self {
            month,
            income: totals.income,
            expenses: totals.expenses,
            balance: totals.balance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySeries {
    pub year: i32,
    pub months: Vec<MonthlyEntry>,
    pub totals: Totals,
}

impl MonthlySeries {
    pub fn new(year: i32, months: Vec<MonthlyEntry>) -> Self {
        let totals = Totals::new(
            months.iter().map(|m| m.income).sum(),
            months.iter().map(|m| m.expenses).sum(),
        );
        Self {
            year,
            months,
            totals,
        }
    }
}
