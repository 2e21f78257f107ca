//! API Module
//!
//! HTTP monitor surface: metrics polling and operator actions over
//! the cache engine.

mod handlers;
mod routes;

pub use handlers::AppState;
pub use routes::create_router;
