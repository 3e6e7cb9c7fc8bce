//! api-server: HTTP API for the job board workspace.
//!
//! Exposes the job posting routes and supports local dev with:
//! - Storage: seeded in-memory list (default) or SQLite (file) when the
//!   `sqlite` feature is enabled.
//! - Errors: lenient (null / silent success on missing ids) or strict (404/400).
//! - CORS: Configurable via CORS_ALLOW_ORIGIN for the web frontend.
//!
//! Run:
//! ```bash
//! # pretty logs (default); PORT optional
//! cargo run -p api-server
//!
//! # persistent storage, seeded on first start
//! STORAGE_PROVIDER=sqlite SEED_ON_START=1 cargo run -p api-server
//! ```
//!
//! Configuration: See `config.rs` for all environment variables.
//!

mod config;
mod handlers;
mod store;

use std::net::SocketAddr;

use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use handlers::AppState;

#[tokio::main]
async fn main() {
    // Load and validate config first (fail fast on misconfiguration)
    let cfg = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&cfg);
    cfg.warn_if_permissive();

    let service = match store::build_service(&cfg) {
        Ok(s) => s,
        Err(e) => {
            error!(err = %e, storage = ?cfg.storage_provider, "failed to initialize job store");
            std::process::exit(1);
        }
    };
    let state = AppState::new(service, cfg.error_mode);
    let app = build_app(state, &cfg.cors_origins);

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(%addr, err = %e, "bind failed");
            std::process::exit(1);
        }
    };
    info!(%addr, storage = ?cfg.storage_provider, error_mode = ?cfg.error_mode, "api-server listening");
    if let Err(e) = axum::serve(listener, app).await {
        error!(err = %e, "server error");
        std::process::exit(1);
    }
}

fn init_tracing(cfg: &config::Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match cfg.log_format {
        config::LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(fmt::time::SystemTime)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
        config::LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
    }
}

/// Route table without middleware.
fn routes(state: AppState) -> Router {
    Router::new()
        .route("/jobPosts", get(handlers::list_jobs))
        .route("/jobPosts/keyword/:keyword", get(handlers::search_jobs))
        .route(
            "/jobPost",
            axum::routing::post(handlers::create_job).put(handlers::update_job),
        )
        .route(
            "/jobPost/:post_id",
            get(handlers::get_job).delete(handlers::delete_job),
        )
        .route("/load", get(handlers::load_jobs))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}

/// Full application: routes plus request-id, tracing and CORS layers.
fn build_app(state: AppState, origins: &config::CorsOrigins) -> Router {
    // Request ID header name
    let x_request_id = HeaderName::from_static("x-request-id");

    routes(state)
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(cors_layer(origins))
}

fn cors_layer(origins: &config::CorsOrigins) -> CorsLayer {
    match origins {
        config::CorsOrigins::Any => CorsLayer::permissive(),
        config::CorsOrigins::List(list) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(list.iter().cloned()))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE]),
    }
}
