#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the pilgrim nav server.
//!
//! Serialized to JSON at the REST boundary. Kept separate from the core
//! model types so the HTTP contract can evolve independently of the
//! estimator and router internals.

use serde::{Deserialize, Serialize};

/// Query parameters for the route endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQueryParams {
    /// Route start site name.
    pub start: Option<String>,
    /// Route destination site name.
    pub destination: Option<String>,
}

/// Query parameters for the crowd density endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityQueryParams {
    /// When `true`, bypass the freshness window and recompute.
    pub force: Option<bool>,
}

/// Body of the density recalculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalculateRequest {
    /// Must be `true`; manual density entries are not supported without
    /// persistent storage.
    #[serde(default)]
    pub recalculate: bool,
}

/// Outcome of a density recalculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalculateResponse {
    /// Whether the recalculation ran.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// Number of site snapshots produced.
    pub count: usize,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Error body returned with client errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Specific reason the request was rejected.
    pub error: String,
}
