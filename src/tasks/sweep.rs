//! Expiry Sweep Task
//!
//! Background task that periodically removes expired entries. Purely
//! housekeeping: the lazy expiry check on read keeps the cache correct
//! whether or not the sweep ever runs.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheEngine;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified
/// interval between sweeps and taking a write lock for each pass.
///
/// # Arguments
/// * `cache` - shared engine reference
/// * `sweep_interval_secs` - interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle used to abort the task during graceful shutdown.
pub fn spawn_sweep_task<T>(
    cache: Arc<RwLock<CacheEngine<T>>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()>
where
    T: Clone + Serialize + Send + Sync + 'static,
{
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep_expired()
            };

            if removed > 0 {
                info!("Expiry sweep: removed {} stale entries", removed);
            } else {
                debug!("Expiry sweep: nothing to remove");
            }
        }
    })
}
