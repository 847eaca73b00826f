mod helpers;

use helpers::{
    setup::spawn_app,
    utils::{setup_household, user_token},
};
use tally_sdk::{APIErrorVariant, CreateUserInput, TallySDK, UpdateUserInput};

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk) = spawn_app().await;
    let res = sdk.status.check_health().await.expect("Expected status");
    assert_eq!(res.message, "Yo! We are up!\r\n");
}

#[actix_web::main]
#[test]
async fn test_create_account() {
    let (app, sdk) = spawn_app().await;
    assert!(sdk
        .account
        .create(&app.config.create_account_secret_code)
        .await
        .is_ok());
    let err = sdk.account.create("wrong code").await.unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::Unauthorized));
}

#[actix_web::main]
#[test]
async fn test_get_account() {
    let (app, sdk) = spawn_app().await;
    let res = sdk
        .account
        .create(&app.config.create_account_secret_code)
        .await
        .expect("Expected to create account");

    let admin_client = TallySDK::new(app.address.clone(), res.secret_api_key);
    let account = admin_client
        .account
        .get()
        .await
        .expect("Expected to get account")
        .account;
    assert_eq!(account.id, res.account.id);
    assert!(sdk.account.get().await.is_err());
}

#[actix_web::main]
#[test]
async fn test_crud_user() {
    let (app, sdk) = spawn_app().await;
    let household = setup_household(&app, &sdk).await;
    let admin = &household.admin;
    assert_eq!(household.user.account_id, household.account.id);

    let user = admin
        .user
        .update(UpdateUserInput {
            user_id: household.user.id.clone(),
            name: Some("Ola".into()),
            metadata: None,
        })
        .await
        .expect("Expected to update user")
        .user;
    assert_eq!(user.name.as_deref(), Some("Ola"));

    let me = household.member.user.me().await.expect("Expected me").user;
    assert_eq!(me.id, user.id);

    admin
        .user
        .delete(user.id.clone())
        .await
        .expect("Expected to delete user");
    let err = admin.user.get(user.id.clone()).await.unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::NotFound));
}

#[actix_web::main]
#[test]
async fn test_users_of_other_accounts_are_not_found() {
    let (app, sdk) = spawn_app().await;
    let household = setup_household(&app, &sdk).await;
    let neighbours = setup_household(&app, &sdk).await;

    let err = household
        .admin
        .user
        .get(neighbours.user.id.clone())
        .await
        .unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::NotFound));

    let res = neighbours
        .admin
        .user
        .create(CreateUserInput::default())
        .await
        .expect("Expected to create user");
    assert_eq!(res.user.account_id, neighbours.account.id);
}

#[actix_web::main]
#[test]
async fn test_user_routes_need_a_valid_token() {
    let (app, sdk) = spawn_app().await;
    let household = setup_household(&app, &sdk).await;

    let stranger = TallySDK::new_user(
        app.address.clone(),
        household.account.id.clone(),
        "not a token",
    );
    let err = stranger.user.me().await.unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::Unauthorized));

    // Reading is allowed without permissions but creating is not
    let reader = TallySDK::new_user(
        app.address.clone(),
        household.account.id.clone(),
        user_token(&household.user.id, &[]),
    );
    assert!(reader.user.me().await.is_ok());
    assert!(reader.reminder.summary(None).await.is_ok());
    let err = reader
        .category
        .create(tally_sdk::CreateCategoryInput {
            user_id: None,
            body: tally_sdk::create_category::RequestBody {
                name: "Food".into(),
                kind: tally_sdk::TransactionKind::Expense,
                subcategories: None,
            },
        })
        .await
        .unwrap_err();
    assert!(matches!(err.variant, APIErrorVariant::Forbidden));
}
