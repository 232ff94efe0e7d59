//! Projection of raw store documents into a reduced, human-readable shape
//! suitable for embedding into a prompt.
//!
//! The reducers are total: any missing field is replaced with a placeholder
//! and display-name resolution falls back to [`UNKNOWN`] when the secondary
//! user lookup fails. Formatting never returns an error.

use mongodb::bson::DateTime;

use crate::models::{Appointment, HealthRecord, LeaveRecord};
use crate::services::RecordStore;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedHealthRecord {
    pub date: String,
    pub diagnosis: String,
    pub treatment: String,
    pub prescription: String,
    pub doctor: String,
    pub hospital: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLeaveRecord {
    pub reason: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub doctor_note: String,
    pub filed_on: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedAppointment {
    pub student: String,
    pub slot: String,
    pub status: String,
}

fn text_or_placeholder(value: &Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => NOT_SPECIFIED.to_string(),
    }
}

fn date_or_placeholder(value: Option<DateTime>) -> String {
    value
        .map(|dt| dt.to_chrono().format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn datetime_or_placeholder(value: Option<DateTime>) -> String {
    value
        .map(|dt| dt.to_chrono().format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

/// Reduce one health record. `doctor_name` is the already-resolved display
/// name of the internal doctor, if any; external records carry their own
/// doctor/hospital names.
pub fn reduce_health_record(
    record: &HealthRecord,
    doctor_name: Option<&str>,
) -> FormattedHealthRecord {
    FormattedHealthRecord {
        date: date_or_placeholder(record.date),
        diagnosis: text_or_placeholder(&record.diagnosis),
        treatment: text_or_placeholder(&record.treatment),
        prescription: text_or_placeholder(&record.prescription),
        doctor: doctor_name
            .map(str::to_owned)
            .or_else(|| record.external_doctor_name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        hospital: text_or_placeholder(&record.external_hospital_name),
    }
}

pub fn reduce_leave_record(record: &LeaveRecord) -> FormattedLeaveRecord {
    FormattedLeaveRecord {
        reason: text_or_placeholder(&record.reason),
        start_date: date_or_placeholder(record.start_date),
        end_date: date_or_placeholder(record.end_date),
        status: text_or_placeholder(&record.status),
        doctor_note: text_or_placeholder(&record.doctor_note),
        filed_on: date_or_placeholder(record.created_at),
    }
}

pub fn reduce_appointment(
    appointment: &Appointment,
    student_name: Option<&str>,
) -> FormattedAppointment {
    FormattedAppointment {
        student: student_name.unwrap_or(UNKNOWN).to_string(),
        slot: datetime_or_placeholder(appointment.slot_date_time),
        status: text_or_placeholder(&appointment.status),
    }
}

/// Reduce a batch of health records, resolving internal doctor names via
/// the `users` collection. Lookup failures degrade to [`UNKNOWN`].
pub async fn format_health_records(
    db: &dyn RecordStore,
    records: &[HealthRecord],
) -> Vec<FormattedHealthRecord> {
    let mut formatted = Vec::with_capacity(records.len());
    for record in records {
        let doctor_name = match &record.doctor_id {
            Some(id) => db.find_user(id).await.ok().flatten().map(|u| u.name),
            None => None,
        };
        formatted.push(reduce_health_record(record, doctor_name.as_deref()));
    }
    formatted
}

pub fn format_leave_records(records: &[LeaveRecord]) -> Vec<FormattedLeaveRecord> {
    records.iter().map(reduce_leave_record).collect()
}

/// Reduce a batch of appointments, resolving student names via the `users`
/// collection. Lookup failures degrade to [`UNKNOWN`].
pub async fn format_appointments(
    db: &dyn RecordStore,
    appointments: &[Appointment],
) -> Vec<FormattedAppointment> {
    let mut formatted = Vec::with_capacity(appointments.len());
    for appointment in appointments {
        let student_name = db
            .find_user(&appointment.student_id)
            .await
            .ok()
            .flatten()
            .map(|u| u.name);
        formatted.push(reduce_appointment(appointment, student_name.as_deref()));
    }
    formatted
}

pub fn render_health_records(records: &[FormattedHealthRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. Date: {}; Diagnosis: {}; Treatment: {}; Prescription: {}; Doctor: {}; Hospital: {}",
                i + 1,
                r.date,
                r.diagnosis,
                r.treatment,
                r.prescription,
                r.doctor,
                r.hospital
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_leave_records(records: &[FormattedLeaveRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. Reason: {}; From: {}; To: {}; Status: {}; Doctor's note: {}; Filed on: {}",
                i + 1,
                r.reason,
                r.start_date,
                r.end_date,
                r.status,
                r.doctor_note,
                r.filed_on
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_appointments(appointments: &[FormattedAppointment]) -> String {
    appointments
        .iter()
        .enumerate()
        .map(|(i, a)| {
            format!(
                "{}. Patient: {}; Slot: {}; Status: {}",
                i + 1,
                a.student,
                a.slot,
                a.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
