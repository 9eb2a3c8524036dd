//! HTTP API module for the Tax Position Estimator.
//!
//! This module provides the REST API endpoints for evaluating a taxpayer
//! profile, comparing scenarios, and reading the configured rate tables.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::EvaluateRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
