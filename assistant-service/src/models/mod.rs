//! Read-only views of documents owned by the main platform backend.
//!
//! This service never writes any of these collections; lifecycle and
//! consistency belong to the owning services. Optional fields default to
//! `None` so that partially-filled documents always deserialize.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Platform user roles as stored on the `users` collection and carried in
/// access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Doctor,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Doctor => write!(f, "doctor"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A health record filed for a student, either by a campus doctor
/// (`doctor_id` set) or uploaded manually for an external consultation
/// (`external_doctor_name`/`external_hospital_name` set).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub student_id: ObjectId,
    #[serde(default)]
    pub doctor_id: Option<ObjectId>,
    #[serde(default)]
    pub date: Option<DateTime>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub prescription: Option<String>,
    #[serde(default)]
    pub external_doctor_name: Option<String>,
    #[serde(default)]
    pub external_hospital_name: Option<String>,
}

/// A medical-leave application, stored in the `medicalleaves` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub student_id: ObjectId,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime>,
    #[serde(default)]
    pub end_date: Option<DateTime>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub doctor_note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub doctor_id: ObjectId,
    pub student_id: ObjectId,
    #[serde(default)]
    pub slot_date_time: Option<DateTime>,
    #[serde(default)]
    pub status: Option<String>,
}
