use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use axum_prometheus::PrometheusMetricLayer;
use tower_governor::errors::GovernorError;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use property_listings::auth::{AuthService, SessionSigner, StaticAdminCredentials};
use property_listings::config::{AppConfig, RateLimitConfig};
use property_listings::error::{AppError, ErrorBody};
use property_listings::listings::{dataset, InMemoryListingRepository, ListingService};
use property_listings::telemetry;

use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::{api_routes, operational_routes};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let listings = match &config.dataset.path {
        Some(path) => dataset::load_from_path(path)?,
        None => dataset::load_default()?,
    };
    info!(count = listings.len(), "listing dataset loaded");

    let repository = Arc::new(InMemoryListingRepository::new(listings));
    let listing_service = Arc::new(ListingService::new(repository));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(StaticAdminCredentials::from_config(&config.auth)),
        SessionSigner::new(&config.auth.jwt_secret, config.auth.jwt_expiration_secs),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .period(replenish_period(&config.rate_limit))
            .burst_size(config.rate_limit.max_requests)
            .use_headers()
            .error_handler(rate_limit_error)
            .finish()
            .expect("rate limiter configuration is valid"),
    );

    let app = api_routes(listing_service, auth_service)
        .layer(GovernorLayer {
            config: governor_config,
        })
        .merge(operational_routes())
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "property listings api ready");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

/// One request's worth of replenish time, so `max_requests` spread evenly
/// over `window_secs` matches the configured quota.
pub(crate) fn replenish_period(config: &RateLimitConfig) -> Duration {
    Duration::from_secs(config.window_secs).div_f64(f64::from(config.max_requests))
}

/// Governor rejections rendered in the service's structured error shape.
pub(crate) fn rate_limit_error(err: GovernorError) -> Response {
    match err {
        GovernorError::TooManyRequests { headers, .. } => {
            let body = ErrorBody::new(StatusCode::TOO_MANY_REQUESTS, "Too many requests");
            let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => {
            let body = ErrorBody::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to identify the requesting client",
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
        GovernorError::Other { code, msg, .. } => {
            let body = ErrorBody::new(
                code,
                msg.unwrap_or_else(|| "Rate limiting failed".to_string()),
            );
            (code, Json(body)).into_response()
        }
    }
}

/// Mirrors the permissive browser policy of the original deployment: any
/// origin, the standard verb set, an hour of preflight caching.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use property_listings::listings::dataset;
    use tower::ServiceExt;
    use tower_governor::key_extractor::SmartIpKeyExtractor;

    fn rate_limited_stack(burst: u32) -> Router {
        let repository = Arc::new(InMemoryListingRepository::new(
            dataset::load_default().expect("bundled dataset is valid"),
        ));
        let listings = Arc::new(ListingService::new(repository));
        let auth = Arc::new(AuthService::new(
            Arc::new(StaticAdminCredentials::new("admin@example.com", "password123")),
            SessionSigner::new("server-test-secret", 3600),
        ));

        let governor_config = Arc::new(
            GovernorConfigBuilder::default()
                .period(Duration::from_secs(60))
                .burst_size(burst)
                .key_extractor(SmartIpKeyExtractor)
                .use_headers()
                .error_handler(rate_limit_error)
                .finish()
                .expect("rate limiter configuration is valid"),
        );

        api_routes(listings, auth)
            .layer(GovernorLayer {
                config: governor_config,
            })
            .merge(operational_routes())
    }

    async fn browse(app: &Router) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::get("/listing")
                    .header("x-forwarded-for", "203.0.113.9")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes")
    }

    #[tokio::test]
    async fn requests_beyond_the_quota_get_structured_429() {
        let app = rate_limited_stack(2);

        assert_eq!(browse(&app).await.status(), StatusCode::OK);
        assert_eq!(browse(&app).await.status(), StatusCode::OK);

        let limited = browse(&app).await;
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);

        let body = axum::body::to_bytes(limited.into_body(), 1 << 16)
            .await
            .expect("read body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(payload["statusCode"], 429);
        assert_eq!(payload["message"], "Too many requests");
        assert!(payload["timestamp"].is_string());
    }

    #[tokio::test]
    async fn healthy_endpoint_sits_outside_the_limiter() {
        let app = rate_limited_stack(1);

        assert_eq!(browse(&app).await.status(), StatusCode::OK);
        assert_eq!(browse(&app).await.status(), StatusCode::TOO_MANY_REQUESTS);

        for _ in 0..3 {
            let response = app
                .clone()
                .oneshot(
                    Request::get("/healthy")
                        .header("x-forwarded-for", "203.0.113.9")
                        .body(Body::empty())
                        .expect("request builds"),
                )
                .await
                .expect("route executes");
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[test]
    fn replenish_period_spreads_the_window_over_the_cap() {
        let period = replenish_period(&RateLimitConfig {
            window_secs: 3600,
            max_requests: 100,
        });
        assert_eq!(period, Duration::from_secs(36));
    }
}
