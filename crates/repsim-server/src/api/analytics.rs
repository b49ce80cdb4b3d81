use axum::{extract::Query, Extension, Json};
use serde::{Deserialize, Serialize};

use repsim_core::BusinessMetrics;
use repsim_metrics::{generate, headline_for, EntropySource, MetricsError};

use crate::middleware::RequestId;

use super::ApiError;

pub(super) const MISSING_FIELDS_MESSAGE: &str = "Business name and location are required.";
pub(super) const MISSING_HEADLINE_PARAMS_MESSAGE: &str =
    "Business name and location are required for headline regeneration.";

#[derive(Debug, Deserialize)]
pub(super) struct GenerateRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    location: String,
}

#[derive(Debug, Serialize)]
pub(super) struct HeadlineResponse {
    headline: String,
}

/// Full generation: a fresh metrics record for the submitted pair.
pub(super) async fn business_data(
    Extension(req_id): Extension<RequestId>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<BusinessMetrics>, ApiError> {
    let mut source = EntropySource;
    match generate(&req.name, &req.location, &mut source) {
        Ok(metrics) => {
            tracing::info!(
                request_id = %req_id.0,
                name = %req.name,
                location = %req.location,
                rating = metrics.rating,
                reviews = metrics.reviews,
                "generated business metrics"
            );
            Ok(Json(metrics))
        }
        Err(MetricsError::MissingInput) => {
            tracing::debug!(request_id = %req_id.0, "rejected generation request with missing fields");
            Err(ApiError::bad_request(MISSING_FIELDS_MESSAGE))
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct HeadlineParams {
    name: Option<String>,
    location: Option<String>,
}

/// Headline-only regeneration. Deterministic given the pair; no draw is made.
pub(super) async fn regenerate_headline(
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<HeadlineParams>,
) -> Result<Json<HeadlineResponse>, ApiError> {
    let name = params.name.unwrap_or_default();
    let location = params.location.unwrap_or_default();
    if name.trim().is_empty() || location.trim().is_empty() {
        tracing::debug!(request_id = %req_id.0, "rejected headline request with missing parameters");
        return Err(ApiError::bad_request(MISSING_HEADLINE_PARAMS_MESSAGE));
    }

    Ok(Json(HeadlineResponse {
        headline: headline_for(&name, &location),
    }))
}
