//! HTTP API module for the advisory engine.
//!
//! This module exposes the estate tax calculator and the strategy
//! recommendation engine as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{ENGINE_VERSION, create_router};
pub use request::{RecommendationRequest, TaxEstimateRequest};
pub use response::{ApiError, ApiErrorResponse, RecommendationResponse, TaxEstimateResponse};
pub use state::AppState;
