#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the pilgrim nav application.
//!
//! Serves crowd density snapshots and congestion-aware routes over REST.
//! The snapshot set is recomputed at most once per freshness window and
//! shared read-only between in-flight requests; refreshing swaps in a new
//! immutable set rather than mutating the old one.

mod handlers;
pub mod store;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use chrono::Duration;
use pilgrim_nav_crowd::EstimatorOptions;
use pilgrim_nav_sites::{Catalog, SiteGraph};
use store::SnapshotStore;

/// How long a stored snapshot set stays servable before a request triggers
/// recomputation.
#[must_use]
pub fn freshness_window() -> Duration {
    Duration::minutes(5)
}

/// Shared application state.
pub struct AppState {
    /// The fixed site catalog.
    pub catalog: Catalog,
    /// Static walking-distance graph over the routable sites.
    pub graph: SiteGraph,
    /// Latest snapshot set, atomically swapped on refresh.
    pub store: SnapshotStore,
    /// Estimator behavior switches for this deployment.
    pub estimator: EstimatorOptions,
}

impl AppState {
    /// Builds state with the canonical catalog and graph and an empty
    /// store; the first request populates it.
    #[must_use]
    pub fn new(estimator: EstimatorOptions) -> Self {
        Self {
            catalog: Catalog::canonical(),
            graph: SiteGraph::canonical(),
            store: SnapshotStore::new(),
            estimator,
        }
    }
}

/// Registers the API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/crowd-density", web::get().to(handlers::crowd_density))
            .route("/crowd-density", web::post().to(handlers::recalculate))
            .route("/routes", web::get().to(handlers::routes)),
    );
}

/// Starts the pilgrim nav API server.
///
/// Reads `BIND_ADDR`/`PORT` from the environment and
/// `PILGRIM_NAV_DEMO_BANDS` to toggle the estimator's demonstration
/// banding (on unless set to `0` or `false`). This is a regular async
/// function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let demo_bands = std::env::var("PILGRIM_NAV_DEMO_BANDS")
        .map(|v| !matches!(v.as_str(), "0" | "false"))
        .unwrap_or(true);
    let estimator = EstimatorOptions { demo_bands };

    let state = web::Data::new(AppState::new(estimator));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
