//! Models Module
//!
//! Request and response DTOs for the monitor API.

mod requests;
mod responses;

pub use requests::{RelationRequest, SetEntryRequest};
pub use responses::{
    ClearResponse, ErrorResponse, GetEntryResponse, HealthResponse, InvalidateResponse,
    RelationResponse, SetEntryResponse, TagInvalidateResponse,
};
