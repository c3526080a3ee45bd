//! HTTP handler functions for the pilgrim nav API.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use chrono::Utc;
use pilgrim_nav_crowd::estimate_densities;
use pilgrim_nav_crowd_models::SnapshotSet;
use pilgrim_nav_routing::compute_route;
use pilgrim_nav_server_models::{
    ApiError, ApiHealth, DensityQueryParams, RecalculateRequest, RecalculateResponse,
    RouteQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/crowd-density`
///
/// Returns the current per-site density snapshots, serving the stored set
/// while it is inside the freshness window and recomputing otherwise.
/// `?force=true` bypasses the window.
pub async fn crowd_density(
    state: web::Data<AppState>,
    params: web::Query<DensityQueryParams>,
) -> HttpResponse {
    let force = params.force.unwrap_or(false);
    if force {
        log::info!("Force refresh requested, generating new crowd density data");
    }
    let set = current_snapshots(&state, force);
    HttpResponse::Ok().json(&set.snapshots)
}

/// `POST /api/crowd-density`
///
/// Recalculates the snapshot set on request. Manual density entries are
/// rejected: they would need persistent storage, which this service does
/// not carry.
pub async fn recalculate(
    state: web::Data<AppState>,
    body: web::Json<RecalculateRequest>,
) -> HttpResponse {
    if !body.recalculate {
        return HttpResponse::BadRequest().json(RecalculateResponse {
            success: false,
            message: "Manual density entries are not supported".to_string(),
            count: 0,
        });
    }

    let set = refresh_snapshots(&state);
    HttpResponse::Ok().json(RecalculateResponse {
        success: true,
        message: "Crowd density data recalculated".to_string(),
        count: set.snapshots.len(),
    })
}

/// `GET /api/routes`
///
/// Computes the least-congested route between two sites. Invalid requests
/// get a 400 with the specific reason; the route itself is always computed
/// against a full snapshot set, recomputed fresh if the store is
/// unavailable.
pub async fn routes(
    state: web::Data<AppState>,
    params: web::Query<RouteQueryParams>,
) -> HttpResponse {
    let (Some(start), Some(destination)) = (params.start.as_deref(), params.destination.as_deref())
    else {
        return HttpResponse::BadRequest().json(ApiError {
            error: "Missing start or destination parameter".to_string(),
        });
    };

    let snapshots = current_snapshots(&state, false);

    match compute_route(&state.catalog, &state.graph, &snapshots, start, destination) {
        Ok(route) => HttpResponse::Ok().json(route),
        Err(err) => {
            log::info!("Rejected route request {start} -> {destination}: {err}");
            HttpResponse::BadRequest().json(ApiError {
                error: err.to_string(),
            })
        }
    }
}

/// Returns a current snapshot set: the stored one when fresh, otherwise a
/// newly computed one. Store faults degrade to direct computation so a
/// route or density answer is always produced.
pub(crate) fn current_snapshots(state: &AppState, force: bool) -> Arc<SnapshotSet> {
    if !force {
        match state.store.fresh(Utc::now(), crate::freshness_window()) {
            Ok(Some(set)) => return set,
            Ok(None) => {}
            Err(err) => {
                log::warn!("Snapshot store unavailable ({err}); computing densities directly");
                return compute_snapshots(state);
            }
        }
    }
    refresh_snapshots(state)
}

/// Computes a fresh set and swaps it into the store; a failed swap is
/// logged and the computed set is still returned.
pub(crate) fn refresh_snapshots(state: &AppState) -> Arc<SnapshotSet> {
    let set = compute_snapshots(state);
    if let Err(err) = state.store.swap(Arc::clone(&set)) {
        log::warn!("Failed to store refreshed snapshots: {err}");
    }
    set
}

fn compute_snapshots(state: &AppState) -> Arc<SnapshotSet> {
    Arc::new(estimate_densities(
        &state.catalog,
        Utc::now(),
        None,
        state.estimator,
        &mut rand::thread_rng(),
    ))
}
