//! Question-answering and prediction endpoints.
//!
//! Every endpoint is a linear pipeline: validate input → fetch records →
//! format → build prompt → generate → envelope. Failures are mapped to
//! `AppError` at this boundary and never propagate past axum.

use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::middleware::auth::AuthUser;
use crate::services::{formatter, prompt, RecordStore};
use crate::AppState;
use service_core::error::AppError;

/// Answer returned when a student has no health records on file.
pub const NO_HEALTH_HISTORY: &str =
    "You have no medical history on record yet, so there is nothing to answer from.";

/// Answer returned when a student has no leave records on file.
pub const NO_LEAVE_HISTORY: &str =
    "You have no medical leave history on record yet, so there is nothing to answer from.";

/// Answer returned when a doctor has no appointments on file.
pub const NO_APPOINTMENTS: &str =
    "You have no appointments on record yet, so there is nothing to answer from.";

/// Fallback when the model returns no text for a question.
pub const NO_ANSWER_FALLBACK: &str = "The assistant could not generate an answer.";

/// Fallback when the model returns no text for a prediction.
pub const NO_PREDICTION_FALLBACK: &str = "The assistant could not generate a prediction.";

// ============================================================================
// Request/Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub status: &'static str,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseasePredictionRequest {
    pub symptoms: Option<Vec<String>>,
    pub additional_info: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DiseasePredictionResponse {
    pub status: &'static str,
    pub prediction: String,
    pub symptoms_analyzed: Vec<String>,
    pub timestamp: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Service index.
///
/// GET /
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "assistant-service",
        "endpoints": [
            "POST /ask_question",
            "POST /leaverelated",
            "POST /doctor_insights",
            "POST /disease_prediction",
        ],
    }))
}

/// Answer a student's question about their health records.
///
/// POST /ask_question (role: student)
pub async fn ask_question(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let question = require_question(req.question)?;
    let student_id = parse_subject_id(&claims.sub)?;

    let records = state.db.find_health_records(&student_id).await?;
    if records.is_empty() {
        return Ok(success_answer(NO_HEALTH_HISTORY.to_string()));
    }

    let formatted = formatter::format_health_records(state.db.as_ref(), &records).await;
    let history = formatter::render_health_records(&formatted);
    let prompt = prompt::health_history_prompt(&history, &question);

    let answer = generate_or_fallback(&state, &prompt, NO_ANSWER_FALLBACK).await?;
    Ok(success_answer(answer))
}

/// Answer a student's question about their medical-leave history.
///
/// POST /leaverelated (role: student)
pub async fn leave_related(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let question = require_question(req.question)?;
    let student_id = parse_subject_id(&claims.sub)?;

    let records = state.db.find_leave_records(&student_id).await?;
    if records.is_empty() {
        return Ok(success_answer(NO_LEAVE_HISTORY.to_string()));
    }

    let formatted = formatter::format_leave_records(&records);
    let history = formatter::render_leave_records(&formatted);
    let prompt = prompt::leave_history_prompt(&history, &question);

    let answer = generate_or_fallback(&state, &prompt, NO_ANSWER_FALLBACK).await?;
    Ok(success_answer(answer))
}

/// Answer a doctor's question about their appointment schedule.
///
/// POST /doctor_insights (role: doctor)
pub async fn doctor_insights(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let question = require_question(req.question)?;
    let doctor_id = parse_subject_id(&claims.sub)?;

    let doctor = state
        .db
        .find_user(&doctor_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Doctor not found")))?;

    let appointments = state.db.find_appointments_for_doctor(&doctor_id).await?;
    if appointments.is_empty() {
        return Ok(success_answer(NO_APPOINTMENTS.to_string()));
    }

    let formatted = formatter::format_appointments(state.db.as_ref(), &appointments).await;
    let schedule = formatter::render_appointments(&formatted);
    let prompt = prompt::appointment_insights_prompt(&doctor.name, &schedule, &question);

    let answer = generate_or_fallback(&state, &prompt, NO_ANSWER_FALLBACK).await?;
    Ok(success_answer(answer))
}

/// Predict a likely condition from a symptom list. Unauthenticated: no
/// records are read, only the submitted symptoms are used.
///
/// POST /disease_prediction
pub async fn disease_prediction(
    State(state): State<AppState>,
    Json(req): Json<DiseasePredictionRequest>,
) -> Result<Json<DiseasePredictionResponse>, AppError> {
    let symptoms = match req.symptoms {
        Some(s) if !s.is_empty() => s,
        _ => {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Symptoms are required"
            )))
        }
    };

    let prompt = prompt::disease_prediction_prompt(&symptoms, req.additional_info.as_deref());
    let prediction = generate_or_fallback(&state, &prompt, NO_PREDICTION_FALLBACK).await?;

    Ok(Json(DiseasePredictionResponse {
        status: "success",
        prediction,
        symptoms_analyzed: symptoms,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

fn success_answer(answer: String) -> Json<AnswerResponse> {
    Json(AnswerResponse {
        status: "success",
        answer,
    })
}

fn require_question(question: Option<String>) -> Result<String, AppError> {
    match question {
        Some(q) if !q.trim().is_empty() => Ok(q),
        _ => Err(AppError::BadRequest(anyhow::anyhow!(
            "Question is required"
        ))),
    }
}

fn parse_subject_id(sub: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(sub).map_err(|_| {
        AppError::Unauthorized(anyhow::anyhow!("Token subject is not a valid user id"))
    })
}

async fn generate_or_fallback(
    state: &AppState,
    prompt: &str,
    fallback: &str,
) -> Result<String, AppError> {
    let text = state.text_provider.generate(prompt).await.map_err(|e| {
        tracing::error!(error = %e, "Text generation failed");
        AppError::InternalError(anyhow::anyhow!("Text generation failed: {}", e))
    })?;

    Ok(text
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string()))
}
