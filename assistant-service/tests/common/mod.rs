//! Shared helpers for assistant-service integration tests.
//!
//! Requests run against the real router with an in-memory record store
//! and the mock text provider, so no MongoDB or network is needed.

#![allow(dead_code)]

use assistant_service::{
    build_router,
    config::{AssistantConfig, AuthConfig, GoogleConfig, ModelConfig, MongoConfig},
    models::{Appointment, HealthRecord, LeaveRecord, Role, User},
    services::{providers::TextProvider, JwtService, RecordStore},
    AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// In-memory record store. Push fixtures onto the public vectors before
/// building the app.
pub struct MockRecordStore {
    pub healthy: bool,
    pub users: Vec<User>,
    pub health_records: Vec<HealthRecord>,
    pub leave_records: Vec<LeaveRecord>,
    pub appointments: Vec<Appointment>,
}

impl MockRecordStore {
    /// A reachable store with no records.
    pub fn empty() -> Self {
        Self {
            healthy: true,
            users: Vec::new(),
            health_records: Vec::new(),
            leave_records: Vec::new(),
            appointments: Vec::new(),
        }
    }

    /// A store whose health check fails, as if MongoDB were down.
    pub fn unreachable() -> Self {
        Self {
            healthy: false,
            ..Self::empty()
        }
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn health_check(&self) -> Result<(), AppError> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::DatabaseError(anyhow::anyhow!("ping failed")))
        }
    }

    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_health_records(
        &self,
        student_id: &ObjectId,
    ) -> Result<Vec<HealthRecord>, AppError> {
        Ok(self
            .health_records
            .iter()
            .filter(|r| r.student_id == *student_id)
            .cloned()
            .collect())
    }

    async fn find_leave_records(
        &self,
        student_id: &ObjectId,
    ) -> Result<Vec<LeaveRecord>, AppError> {
        Ok(self
            .leave_records
            .iter()
            .filter(|r| r.student_id == *student_id)
            .cloned()
            .collect())
    }

    async fn find_appointments_for_doctor(
        &self,
        doctor_id: &ObjectId,
    ) -> Result<Vec<Appointment>, AppError> {
        Ok(self
            .appointments
            .iter()
            .filter(|a| a.doctor_id == *doctor_id)
            .cloned()
            .collect())
    }
}

pub fn test_config() -> AssistantConfig {
    AssistantConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "error".to_string(),
        },
        mongodb: MongoConfig {
            uri: "mongodb://127.0.0.1:27017".to_string(),
            database: format!("test_assistant_{}", Uuid::new_v4().simple()),
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
        },
        google: GoogleConfig {
            api_key: "test-api-key".to_string(),
        },
        models: ModelConfig {
            text_model: "gemini-2.0-flash".to_string(),
        },
    }
}

pub fn test_state(provider: Arc<dyn TextProvider>, store: Arc<dyn RecordStore>) -> AppState {
    let config = test_config();
    let jwt = JwtService::new(&config.auth);

    AppState {
        config,
        db: store,
        jwt,
        text_provider: provider,
    }
}

/// Router + state over an empty in-memory store.
pub async fn test_app(provider: Arc<dyn TextProvider>) -> (Router, AppState) {
    test_app_with_store(provider, Arc::new(MockRecordStore::empty())).await
}

pub async fn test_app_with_store(
    provider: Arc<dyn TextProvider>,
    store: Arc<dyn RecordStore>,
) -> (Router, AppState) {
    let state = test_state(provider, store);
    (build_router(state.clone()), state)
}

pub fn token_for(state: &AppState, user_id: &str, role: Role) -> String {
    state
        .jwt
        .generate_token(user_id, role, 30)
        .expect("Failed to sign test token")
}

pub fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_post_with_bearer(uri: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
