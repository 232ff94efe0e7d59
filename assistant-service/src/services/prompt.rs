//! Prompt assembly for the text model.
//!
//! Pure string building: fixed framing, the rendered record context, and
//! the caller's question verbatim. User text is interpolated as-is; the
//! platform treats it as benign free text.

const ASSISTANT_FRAMING: &str = "You are a medical assistant for a campus health service. \
Answer clearly and concisely, and remind the user to consult a doctor before acting on \
medical advice.";

pub fn health_history_prompt(history: &str, question: &str) -> String {
    format!(
        "{}\n\nThe following is the patient's medical history:\n{}\n\n\
         Based on this data, answer the following question:\n\"{}\"",
        ASSISTANT_FRAMING, history, question
    )
}

pub fn leave_history_prompt(history: &str, question: &str) -> String {
    format!(
        "{}\n\nThe following is the student's medical leave history:\n{}\n\n\
         Based on this data, answer the following question:\n\"{}\"",
        ASSISTANT_FRAMING, history, question
    )
}

pub fn appointment_insights_prompt(doctor_name: &str, schedule: &str, question: &str) -> String {
    format!(
        "{}\n\nThe following are the appointments of Dr. {}:\n{}\n\n\
         Based on this data, answer the following question:\n\"{}\"",
        ASSISTANT_FRAMING, doctor_name, schedule, question
    )
}

pub fn disease_prediction_prompt(symptoms: &[String], additional_info: Option<&str>) -> String {
    let symptoms_text = symptoms.join(", ");
    let mut prompt = format!(
        "{}\n\nA patient is experiencing the following symptoms: {}.\n\
         Based on these symptoms, predict the most likely disease or condition.\n\
         Provide a detailed explanation along with possible treatments.",
        ASSISTANT_FRAMING, symptoms_text
    );
    if let Some(info) = additional_info {
        if !info.trim().is_empty() {
            prompt.push_str("\nAdditional information from the patient: ");
            prompt.push_str(info);
        }
    }
    prompt
}
