//! Read-only queries against the platform's record collections.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

use crate::models::{Appointment, HealthRecord, LeaveRecord, User};

/// Read-only access to the platform's records. A trait keeps the MongoDB
/// backend swappable and lets tests run against an in-memory store, the
/// same way `TextProvider` abstracts the Gemini backend.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn health_check(&self) -> Result<(), AppError>;

    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, AppError>;

    /// All health records filed for a student, in store order. An empty
    /// result is not an error.
    async fn find_health_records(
        &self,
        student_id: &ObjectId,
    ) -> Result<Vec<HealthRecord>, AppError>;

    async fn find_leave_records(
        &self,
        student_id: &ObjectId,
    ) -> Result<Vec<LeaveRecord>, AppError>;

    async fn find_appointments_for_doctor(
        &self,
        doctor_id: &ObjectId,
    ) -> Result<Vec<Appointment>, AppError>;
}

#[derive(Clone)]
pub struct AssistantDb {
    client: MongoClient,
    db: Database,
}

impl AssistantDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB handle ready");
        Ok(Self { client, db })
    }

    fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    fn health_records(&self) -> Collection<HealthRecord> {
        self.db.collection("healthrecords")
    }

    fn leave_records(&self) -> Collection<LeaveRecord> {
        self.db.collection("medicalleaves")
    }

    fn appointments(&self) -> Collection<Appointment> {
        self.db.collection("appointments")
    }
}

#[async_trait]
impl RecordStore for AssistantDb {
    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }

    async fn find_user(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "_id": *id }, None).await?)
    }

    async fn find_health_records(
        &self,
        student_id: &ObjectId,
    ) -> Result<Vec<HealthRecord>, AppError> {
        Ok(self
            .health_records()
            .find(doc! { "studentId": *student_id }, None)
            .await?
            .try_collect()
            .await?)
    }

    async fn find_leave_records(
        &self,
        student_id: &ObjectId,
    ) -> Result<Vec<LeaveRecord>, AppError> {
        Ok(self
            .leave_records()
            .find(doc! { "studentId": *student_id }, None)
            .await?
            .try_collect()
            .await?)
    }

    async fn find_appointments_for_doctor(
        &self,
        doctor_id: &ObjectId,
    ) -> Result<Vec<Appointment>, AppError> {
        Ok(self
            .appointments()
            .find(doc! { "doctorId": *doctor_id }, None)
            .await?
            .try_collect()
            .await?)
    }
}
