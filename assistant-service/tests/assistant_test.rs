//! Endpoint behavior that does not require a running MongoDB: the index,
//! input validation, and the disease-prediction pipeline against the mock
//! provider.

mod common;

use assistant_service::handlers::assistant::NO_PREDICTION_FALLBACK;
use assistant_service::services::providers::mock::MockTextProvider;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use tower::util::ServiceExt;

#[tokio::test]
async fn index_lists_endpoints() {
    let (app, _state) = common::test_app(Arc::new(MockTextProvider::echo())).await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints
        .iter()
        .any(|e| e.as_str().unwrap().contains("/disease_prediction")));
}

#[tokio::test]
async fn disease_prediction_requires_symptoms() {
    let (app, _state) = common::test_app(Arc::new(MockTextProvider::echo())).await;

    let response = app
        .oneshot(common::json_post("/disease_prediction", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Symptoms"));
}

#[tokio::test]
async fn disease_prediction_rejects_empty_symptom_list() {
    let (app, _state) = common::test_app(Arc::new(MockTextProvider::echo())).await;

    let response = app
        .oneshot(common::json_post(
            "/disease_prediction",
            r#"{"symptoms":[]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn disease_prediction_echoes_symptoms_and_returns_prediction() {
    let (app, _state) = common::test_app(Arc::new(MockTextProvider::echo())).await;

    let response = app
        .oneshot(common::json_post(
            "/disease_prediction",
            r#"{"symptoms":["fever","cough"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["symptoms_analyzed"],
        serde_json::json!(["fever", "cough"])
    );

    // The echo mock reflects the prompt, which embeds the joined symptoms.
    let prediction = body["prediction"].as_str().unwrap();
    assert!(!prediction.is_empty());
    assert!(prediction.contains("fever, cough"));

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn disease_prediction_forwards_additional_info() {
    let (app, _state) = common::test_app(Arc::new(MockTextProvider::echo())).await;

    let response = app
        .oneshot(common::json_post(
            "/disease_prediction",
            r#"{"symptoms":["headache"],"additionalInfo":"started three days ago"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert!(body["prediction"]
        .as_str()
        .unwrap()
        .contains("started three days ago"));
}

#[tokio::test]
async fn empty_model_output_becomes_fixed_fallback() {
    let (app, _state) = common::test_app(Arc::new(MockTextProvider::empty())).await;

    let response = app
        .oneshot(common::json_post(
            "/disease_prediction",
            r#"{"symptoms":["fever"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["prediction"], NO_PREDICTION_FALLBACK);
}

#[tokio::test]
async fn fixed_reply_is_returned_verbatim() {
    let (app, _state) = common::test_app(Arc::new(MockTextProvider::with_reply(
        "Likely a common cold.",
    )))
    .await;

    let response = app
        .oneshot(common::json_post(
            "/disease_prediction",
            r#"{"symptoms":["sneezing"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["prediction"], "Likely a common cold.");
}
