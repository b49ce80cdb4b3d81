mod analytics;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::request_id;

/// Error body of the analytics endpoints: a bare `message`, as the dashboard
/// client expects.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app() -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/business-data", post(analytics::business_data))
        .route(
            "/api/v1/regenerate-headline",
            get(analytics::regenerate_headline),
        )
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::analytics::{MISSING_FIELDS_MESSAGE, MISSING_HEADLINE_PARAMS_MESSAGE};
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn generate_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/business-data")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = build_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"].as_str(), Some("ok"));
    }

    #[tokio::test]
    async fn responses_carry_a_request_id_header() {
        let response = build_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-test-1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        let header = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok());
        assert_eq!(header, Some("req-test-1"));
    }

    #[tokio::test]
    async fn business_data_returns_internally_consistent_metrics() {
        let response = build_app()
            .oneshot(generate_request(serde_json::json!({
                "name": "Orbit Fitness",
                "location": "Seattle"
            })))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        let reviews = json["reviews"].as_u64().expect("reviews");
        assert!(reviews >= 20);

        let rating = json["rating"].as_f64().expect("rating");
        assert!((2.0..=4.9).contains(&rating), "rating out of range: {rating}");

        let sentiment = &json["sentiment"];
        let sum = sentiment["positive"].as_u64().expect("positive")
            + sentiment["neutral"].as_u64().expect("neutral")
            + sentiment["negative"].as_u64().expect("negative");
        assert_eq!(sum, reviews, "sentiment must conserve the review total");

        let suggestions = json["suggestions"].as_array().expect("suggestions");
        assert!((4..=7).contains(&suggestions.len()));

        let trends = json["reviewTrends"].as_array().expect("reviewTrends");
        assert_eq!(trends.len(), 6);
        assert_eq!(trends[5]["count"].as_u64(), Some(reviews));
    }

    #[tokio::test]
    async fn business_data_rejects_an_empty_name() {
        let response = build_app()
            .oneshot(generate_request(serde_json::json!({
                "name": "",
                "location": "Austin"
            })))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["message"].as_str(), Some(MISSING_FIELDS_MESSAGE));
    }

    #[tokio::test]
    async fn business_data_rejects_an_absent_location() {
        let response = build_app()
            .oneshot(generate_request(serde_json::json!({ "name": "Orbit Fitness" })))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn regenerate_headline_uses_the_coffee_template_for_cafes() {
        let response = build_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/regenerate-headline?name=Joe%27s%20Cafe&location=Austin")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let headline = json["headline"].as_str().expect("headline");
        assert!(headline.contains("Cozy Joe's Cafe"), "got: {headline}");
        assert!(headline.contains("Austin"), "got: {headline}");
    }

    #[tokio::test]
    async fn regenerate_headline_uses_the_technology_template() {
        let response = build_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/regenerate-headline?name=Acme%20Tech%20Solutions&location=Denver")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json["headline"].as_str(),
            Some("Cutting-Edge Acme Tech Solutions for Denver's Digital Needs")
        );
    }

    #[tokio::test]
    async fn regenerate_headline_rejects_missing_parameters() {
        let response = build_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/regenerate-headline?name=Orbit%20Fitness")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["message"].as_str(),
            Some(MISSING_HEADLINE_PARAMS_MESSAGE)
        );
    }
}
