// src/store/types.rs
// Persisted records. JSON field names match what the web client expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current time at millisecond precision, the resolution rows are stored with.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

pub(crate) fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            email: email.into(),
            name: name.into(),
            created_at: now_millis(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub user_id: String,
    pub mood: String,
    pub intensity: i32,
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(user_id: impl Into<String>, mood: impl Into<String>, intensity: i32) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.into(),
            mood: mood.into(),
            intensity,
            timestamp: now_millis(),
        }
    }
}

/// A one-off companion answer to a mood check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponse {
    pub id: String,
    pub user_id: String,
    pub mood: String,
    pub intensity: i32,
    pub ai_response: String,
    pub timestamp: DateTime<Utc>,
}

impl AiResponse {
    pub fn new(
        user_id: impl Into<String>,
        mood: impl Into<String>,
        intensity: i32,
        ai_response: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.into(),
            mood: mood.into(),
            intensity,
            ai_response: ai_response.into(),
            timestamp: now_millis(),
        }
    }
}

/// One user message and the companion's answer within a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: String,
    pub user_id: String,
    pub session_id: String,
    pub user_message: String,
    pub ai_response: String,
    /// `"<mood>-<intensity>"` at the time of the message.
    pub mood_context: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatRecord {
    pub fn new(
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        user_message: impl Into<String>,
        ai_response: impl Into<String>,
        mood: &str,
        intensity: i32,
    ) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.into(),
            session_id: session_id.into(),
            user_message: user_message.into(),
            ai_response: ai_response.into(),
            mood_context: format!("{mood}-{intensity}"),
            timestamp: now_millis(),
        }
    }
}
