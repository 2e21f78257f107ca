//! API Handlers
//!
//! HTTP request handlers for the cache monitor endpoints. The monitor
//! is the operator surface: dashboards poll `/metrics` and map actions
//! onto tag invalidation and full clears.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tokio::sync::RwLock;

use crate::cache::{CacheEngine, CacheMetrics, CacheOptions};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, GetEntryResponse, HealthResponse, InvalidateResponse, RelationRequest,
    RelationResponse, SetEntryRequest, SetEntryResponse, TagInvalidateResponse,
};

/// Application state shared across all handlers.
///
/// The engine is single-owner; the monitor wraps it in Arc<RwLock<>>
/// for shared access from concurrent requests.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache engine over opaque JSON payloads
    pub cache: Arc<RwLock<CacheEngine<serde_json::Value>>>,
}

impl AppState {
    /// Creates a new AppState around the given engine.
    pub fn new(engine: CacheEngine<serde_json::Value>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(engine)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        let engine = CacheEngine::new(
            config.max_entries,
            config.max_memory_bytes,
            config.default_ttl_ms,
        );
        Self::new(engine)
    }
}

/// Handler for PUT /entries
///
/// Stores a JSON value with optional TTL, tags, and priority.
pub async fn set_entry_handler(
    State(state): State<AppState>,
    Json(req): Json<SetEntryRequest>,
) -> Result<Json<SetEntryResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let options = CacheOptions {
        ttl_ms: req.ttl_ms,
        tags: req.tags,
        priority: req.priority,
        prefetch: true,
    };

    let mut cache = state.cache.write().await;
    cache.set(&req.key, req.value, options).await?;

    Ok(Json(SetEntryResponse::new(req.key)))
}

/// Handler for GET /entries/:key
///
/// Reads a value; absence maps to 404.
pub async fn get_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetEntryResponse>> {
    // Write lock: reads touch LRU order, hit counts and metrics.
    let mut cache = state.cache.write().await;
    match cache.get(&key).await {
        Some(value) => Ok(Json(GetEntryResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /entries/:key
///
/// Invalidates a key. Idempotent: unknown keys still return 200.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<InvalidateResponse> {
    let mut cache = state.cache.write().await;
    cache.invalidate(&key).await;

    Json(InvalidateResponse::new(key))
}

/// Handler for POST /invalidate/tags/:tag
///
/// Removes every entry carrying the tag.
pub async fn invalidate_tag_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Json<TagInvalidateResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.invalidate_by_tag(&tag).await;

    Json(TagInvalidateResponse::new(tag, removed))
}

/// Handler for POST /relations
///
/// Seeds an advisory predictive relation.
pub async fn add_relation_handler(
    State(state): State<AppState>,
    Json(req): Json<RelationRequest>,
) -> Result<Json<RelationResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.add_predictive_relation(&req.key, req.related_keys);

    Ok(Json(RelationResponse::new(req.key)))
}

/// Handler for GET /metrics
///
/// Returns a metrics snapshot. Pure and local; dashboards poll this
/// on an interval.
pub async fn metrics_handler(State(state): State<AppState>) -> Json<CacheMetrics> {
    let cache = state.cache.read().await;
    Json(cache.metrics())
}

/// Handler for POST /clear
///
/// Full reset: entries, patterns, relations, metrics.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    cache.clear();

    Json(ClearResponse::new())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
