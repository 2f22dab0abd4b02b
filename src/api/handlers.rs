//! HTTP request handlers for the advisory engine API.
//!
//! This module contains the handler functions for all API endpoints. The
//! handlers only translate between JSON and domain types; every decision is
//! made by the engines held in [`AppState`].

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::recommendation::format_budget_display;

use super::request::{RecommendationRequest, TaxEstimateRequest};
use super::response::{ApiError, ApiErrorResponse, RecommendationResponse, TaxEstimateResponse};
use super::state::AppState;

/// Version reported in every calculation envelope.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tax/estimate", post(tax_estimate_handler))
        .route("/tax/constants", get(tax_constants_handler))
        .route("/strategies/recommend", post(recommend_handler))
        .with_state(state)
}

/// Handler for POST /tax/estimate.
async fn tax_estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxEstimateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax estimate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let net_estate = request.net_estate();
    let result = state.tax().compute(net_estate, &request.family);
    let duration = start_time.elapsed();

    for warning in &result.warnings {
        warn!(
            correlation_id = %correlation_id,
            code = %warning.code,
            "{}", warning.message
        );
    }
    info!(
        correlation_id = %correlation_id,
        total_assets = %request.total_assets,
        debts = %request.debts,
        taxable_base = %result.taxable_base,
        tax_due = %result.tax_due,
        duration_us = duration.as_micros(),
        "Tax estimate completed"
    );

    json_response(
        StatusCode::OK,
        TaxEstimateResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            result,
        },
    )
}

/// Handler for GET /tax/constants.
async fn tax_constants_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.tax().constants().clone())
}

/// Handler for POST /strategies/recommend.
async fn recommend_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing recommendation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let engine = state.strategies();
    let profile = match request.into_profile(engine.normalizer()) {
        Ok(profile) => profile,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Profile validation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            return json_response(api_error.status, api_error.error);
        }
    };

    let start_time = Instant::now();
    let result = engine.recommend(&profile);
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        tier = ?result.tier,
        normalized_budget = %result.normalized_budget,
        strategies = result.len(),
        duration_us = duration.as_micros(),
        "Recommendation completed"
    );

    let budget_display = format_budget_display(
        profile.budget_amount,
        profile.budget_currency,
        engine.normalizer().rate(),
    );

    json_response(
        StatusCode::OK,
        RecommendationResponse {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            budget_display,
            result,
        },
    )
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a `400` response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the failure.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::missing_content_type(),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    let response = ApiErrorResponse::bad_request(error);
    json_response(response.status, response.error)
}
