use tally_api::Application;
use tally_infra::{setup_context, Config};
use tally_sdk::TallySDK;

pub struct TestApp {
    pub config: Config,
    pub address: String,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, TallySDK) {
    let mut ctx = setup_context().await;
    ctx.config.port = 0; // Random port
    ctx.config.rate_limit.max_requests = 10_000;

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = TallySDK::new(address.clone(), "");
    (TestApp { config, address }, sdk)
}
