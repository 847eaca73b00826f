mod helpers;

use helpers::{setup::spawn_app, utils::setup_household};
use tally_sdk::{
    create_category, create_transaction, get_category_report, get_dashboard, get_transactions,
    update_category, update_transaction, APIErrorVariant, CreateCategoryInput,
    CreateTransactionInput, Decimal, GetTransactionsInput, TallySDK, TransactionKind,
    UpdateCategoryInput, UpdateTransactionInput,
};

fn transaction_body(
    kind: TransactionKind,
    category: &str,
    subcategory: Option<&str>,
    amount: i64,
    date: &str,
) -> create_transaction::RequestBody {
    create_transaction::RequestBody {
        kind,
        category: category.into(),
        subcategory: subcategory.map(String::from),
        amount: Decimal::from(amount),
        date: date.into(),
        is_recurring: None,
        recurrence_interval: None,
        description: None,
    }
}

async fn record(sdk: &TallySDK, body: create_transaction::RequestBody) -> tally_sdk::Transaction {
    sdk.transaction
        .create(CreateTransactionInput {
            user_id: None,
            body,
        })
        .await
        .expect("Expected to create transaction")
        .transaction
}

#[actix_web::main]
#[test]
async fn test_categories() {
    let (app, sdk) = spawn_app().await;
    let household = setup_household(&app, &sdk).await;
    let member = &household.member;

    let body = create_category::RequestBody {
        name: "Food".into(),
        kind: TransactionKind::Expense,
        subcategories: Some(vec!["Groceries".into(), "Takeaway".into()]),
    };
    let food = member
        .category
        .create(CreateCategoryInput {
            user_id: None,
            body: body.clone(),
        })
        .await
        .expect("Expected to create category")
        .category;
    assert_eq!(food.subcategories.len(), 2);

    let err = member
        .category
        .create(CreateCategoryInput {
            user_id: None,
            body: body.clone(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::Conflict));

    // The same name is free for the other kind
    member
        .category
        .create(CreateCategoryInput {
            user_id: None,
            body: create_category::RequestBody {
                kind: TransactionKind::Income,
                ..body
            },
        })
        .await
        .expect("Expected to create income category");

    let categories = member
        .category
        .list(None, Some(TransactionKind::Expense))
        .await
        .expect("Expected to list categories")
        .categories;
    assert_eq!(categories, vec![food.clone()]);

    let renamed = member
        .category
        .update(UpdateCategoryInput {
            category_id: food.id.clone(),
            body: update_category::RequestBody {
                name: Some("Groceries".into()),
                ..Default::default()
            },
        })
        .await
        .expect("Expected to rename category")
        .category;
    assert_eq!(renamed.name, "Groceries");

    member
        .category
        .delete(food.id.clone())
        .await
        .expect("Expected to delete category");
    let categories = household
        .admin
        .category
        .list(Some(household.user.id.clone()), None)
        .await
        .expect("Expected to list categories")
        .categories;
    assert_eq!(categories.len(), 1);
}

#[actix_web::main]
#[test]
async fn test_crud_transactions() {
    let (app, sdk) = spawn_app().await;
    let household = setup_household(&app, &sdk).await;
    let member = &household.member;

    let err = member
        .transaction
        .create(CreateTransactionInput {
            user_id: None,
            body: transaction_body(TransactionKind::Expense, "Food", None, 0, "2024-05-01"),
        })
        .await
        .unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::BadClientData));

    let lunch = record(
        member,
        transaction_body(TransactionKind::Expense, " Food ", Some(""), 15, "2024-05-02"),
    )
    .await;
    assert_eq!(lunch.category, "Food");
    assert_eq!(lunch.subcategory, None);
    record(
        member,
        transaction_body(TransactionKind::Income, "Salary", None, 3000, "2024-05-01"),
    )
    .await;

    let res = member
        .transaction
        .list(GetTransactionsInput {
            user_id: None,
            query: get_transactions::QueryParams {
                kind: Some(TransactionKind::Expense),
                ..Default::default()
            },
        })
        .await
        .expect("Expected to list transactions");
    assert_eq!(res.total, 1);
    assert_eq!(res.transactions[0].id, lunch.id);

    let updated = member
        .transaction
        .update(UpdateTransactionInput {
            transaction_id: lunch.id.clone(),
            body: update_transaction::RequestBody {
                amount: Some(Decimal::from(18)),
                ..Default::default()
            },
        })
        .await
        .expect("Expected to update transaction")
        .transaction;
    assert_eq!(updated.amount, Decimal::from(18));

    member
        .transaction
        .delete(lunch.id.clone())
        .await
        .expect("Expected to delete transaction");
    let err = member.transaction.get(lunch.id.clone()).await.unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::NotFound));
}

#[actix_web::main]
#[test]
async fn test_reports() {
    let (app, sdk) = spawn_app().await;
    let household = setup_household(&app, &sdk).await;
    let member = &household.member;

    let transactions = [
        (TransactionKind::Income, "Salary", None, 3000, "2024-01-25"),
        (TransactionKind::Income, "Salary", None, 3000, "2024-02-25"),
        (TransactionKind::Expense, "Rent", None, 1000, "2024-01-01"),
        (TransactionKind::Expense, "Food", Some("Groceries"), 300, "2024-01-10"),
        (TransactionKind::Expense, "Food", Some("Takeaway"), 100, "2024-02-10"),
        (TransactionKind::Expense, "Rent", None, 1000, "2024-02-01"),
    ];
    for (kind, category, subcategory, amount, date) in transactions {
        record(
            member,
            transaction_body(kind, category, subcategory, amount, date),
        )
        .await;
    }

    let dashboard = member
        .report
        .dashboard(None, get_dashboard::QueryParams::default())
        .await
        .expect("Expected a dashboard");
    assert!(dashboard.range.is_none());
    assert_eq!(dashboard.totals.income, Decimal::from(6000));
    assert_eq!(dashboard.totals.expenses, Decimal::from(2400));
    assert_eq!(dashboard.totals.balance, Decimal::from(3600));
    assert_eq!(dashboard.recent_transactions.len(), 5);
    assert_eq!(dashboard.recent_transactions[0].category, "Salary");

    let report = member
        .report
        .categories(
            None,
            get_category_report::QueryParams {
                start_date: Some("2024-01-01".into()),
                end_date: Some("2024-01-31".into()),
                ..Default::default()
            },
        )
        .await
        .expect("Expected a category report");
    assert_eq!(report.kind, TransactionKind::Expense);
    assert_eq!(report.breakdown.total, Decimal::from(1300));
    assert_eq!(report.breakdown.categories[0].category, "Rent");
    assert_eq!(report.breakdown.categories[1].category, "Food");

    let series = household
        .admin
        .report
        .monthly(Some(household.user.id.clone()), Some(2024))
        .await
        .expect("Expected a monthly report");
    assert_eq!(series.year, 2024);
    assert_eq!(series.months.len(), 12);
    assert_eq!(series.months[1].income, Decimal::from(3000));
    assert_eq!(series.months[1].expenses, Decimal::from(1100));
    assert_eq!(series.months[11].balance, Decimal::ZERO);
    assert_eq!(series.totals.balance, Decimal::from(3600));
}
