use crate::error::TallyError;
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, ResponseError,
};
use tally_infra::{RateLimitConfig, TallyContext};
use tracing::warn;

/// Start and expiry, in unix millis, of the fixed window `now` falls into
pub fn window_bounds(now: i64, config: &RateLimitConfig) -> (i64, i64) {
    let window = config.window_secs.max(1) * 1000;
    let start = now - now.rem_euclid(window);
    (start, start + window)
}

/// Counts every request against the fixed window of the client's address and
/// rejects it with 429 once the window is full. Requests are let through if
/// the counter store is unavailable.
pub async fn rate_limit<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let ctx = match req.app_data::<web::Data<TallyContext>>() {
        Some(ctx) => ctx.clone(),
        None => return next.call(req).await.map(|res| res.map_into_left_body()),
    };
    let key = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let config = &ctx.config.rate_limit;
    let now = ctx.sys.get_timestamp_millis();
    let (window_start, expires_at) = window_bounds(now, config);

    match ctx.repos.rate_limits.hit(&key, window_start, expires_at).await {
        Ok(count) if count > config.max_requests => {
            let e = TallyError::TooManyRequests(format!(
                "At most {} requests are allowed every {} seconds",
                config.max_requests, config.window_secs
            ));
            return Ok(req.into_response(e.error_response()).map_into_right_body());
        }
        Ok(1) => {
            // First request of a new window
            if let Err(e) = ctx.repos.rate_limits.purge_expired(now).await {
                warn!("Unable to purge expired rate limit windows: {:?}", e);
            }
        }
        Ok(_) => {}
        Err(e) => {
            warn!("Rate limiting is skipped as the counter store failed: {:?}", e);
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::{
        http::StatusCode, middleware::from_fn, test as actix_test, App, HttpResponse,
    };
    use std::sync::Arc;
    use tally_infra::FixedSys;

    #[test]
    fn windows_are_aligned_to_their_length() {
        let config = RateLimitConfig {
            max_requests: 10,
            window_secs: 60,
        };
        assert_eq!(window_bounds(0, &config), (0, 60_000));
        assert_eq!(window_bounds(59_999, &config), (0, 60_000));
        assert_eq!(window_bounds(60_000, &config), (60_000, 120_000));
    }

    #[actix_web::main]
    #[test]
    async fn rejects_requests_over_the_limit() {
        let mut ctx = TallyContext::create_inmemory();
        ctx.config.rate_limit = RateLimitConfig {
            max_requests: 2,
            window_secs: 60,
        };
        ctx.sys = Arc::new(FixedSys {
            timestamp_millis: 1_000,
        });

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(ctx))
                .wrap(from_fn(rate_limit))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        for expected in [StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS] {
            let req = actix_test::TestRequest::get()
                .uri("/")
                .peer_addr("10.0.0.1:4000".parse().unwrap())
                .to_request();
            let res = actix_test::call_service(&app, req).await;
            assert_eq!(res.status(), expected);
        }

        // Another client has its own window
        let req = actix_test::TestRequest::get()
            .uri("/")
            .peer_addr("10.0.0.2:4000".parse().unwrap())
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
