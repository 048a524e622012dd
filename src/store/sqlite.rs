// src/store/sqlite.rs
// CompanionStore: all reads and writes for the four collections

use anyhow::{Context, Result};
use sqlx::{FromRow, SqlitePool};

use super::types::{AiResponse, ChatRecord, MoodEntry, User, from_millis};

#[derive(Clone)]
pub struct CompanionStore {
    pub pool: SqlitePool,
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    created_at: i64,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            email: r.email,
            name: r.name,
            created_at: from_millis(r.created_at),
        }
    }
}

#[derive(FromRow)]
struct MoodEntryRow {
    id: String,
    user_id: String,
    mood: String,
    intensity: i32,
    timestamp: i64,
}

impl From<MoodEntryRow> for MoodEntry {
    fn from(r: MoodEntryRow) -> Self {
        MoodEntry {
            id: r.id,
            user_id: r.user_id,
            mood: r.mood,
            intensity: r.intensity,
            timestamp: from_millis(r.timestamp),
        }
    }
}

#[derive(FromRow)]
struct AiResponseRow {
    id: String,
    user_id: String,
    mood: String,
    intensity: i32,
    ai_response: String,
    timestamp: i64,
}

impl From<AiResponseRow> for AiResponse {
    fn from(r: AiResponseRow) -> Self {
        AiResponse {
            id: r.id,
            user_id: r.user_id,
            mood: r.mood,
            intensity: r.intensity,
            ai_response: r.ai_response,
            timestamp: from_millis(r.timestamp),
        }
    }
}

#[derive(FromRow)]
struct ChatRecordRow {
    id: String,
    user_id: String,
    session_id: String,
    user_message: String,
    ai_response: String,
    mood_context: String,
    timestamp: i64,
}

impl From<ChatRecordRow> for ChatRecord {
    fn from(r: ChatRecordRow) -> Self {
        ChatRecord {
            id: r.id,
            user_id: r.user_id,
            session_id: r.session_id,
            user_message: r.user_message,
            ai_response: r.ai_response,
            mood_context: r.mood_context,
            timestamp: from_millis(r.timestamp),
        }
    }
}

impl CompanionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, user: &User) -> Result<()> {
        sqlx::query("INSERT INTO users (id, email, name, created_at) VALUES (?, ?, ?, ?)")
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.created_at.timestamp_millis())
            .execute(&self.pool)
            .await
            .context("Failed to create user")?;

        Ok(())
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, created_at FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user")?;

        Ok(row.map(User::from))
    }

    pub async fn insert_mood_entry(&self, entry: &MoodEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO mood_entries (id, user_id, mood, intensity, timestamp)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.user_id)
        .bind(&entry.mood)
        .bind(entry.intensity)
        .bind(entry.timestamp.timestamp_millis())
        .execute(&self.pool)
        .await
        .context("Failed to insert mood entry")?;

        Ok(())
    }

    /// Newest first.
    pub async fn recent_mood_entries(&self, user_id: &str, limit: u32) -> Result<Vec<MoodEntry>> {
        let rows = sqlx::query_as::<_, MoodEntryRow>(
            r#"
            SELECT id, user_id, mood, intensity, timestamp
            FROM mood_entries
            WHERE user_id = ?
            ORDER BY timestamp DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch mood entries")?;

        Ok(rows.into_iter().map(MoodEntry::from).collect())
    }

    pub async fn insert_ai_response(&self, response: &AiResponse) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ai_responses (id, user_id, mood, intensity, ai_response, timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&response.id)
        .bind(&response.user_id)
        .bind(&response.mood)
        .bind(response.intensity)
        .bind(&response.ai_response)
        .bind(response.timestamp.timestamp_millis())
        .execute(&self.pool)
        .await
        .context("Failed to insert AI response")?;

        Ok(())
    }

    /// Newest first.
    pub async fn recent_ai_responses(&self, user_id: &str, limit: u32) -> Result<Vec<AiResponse>> {
        let rows = sqlx::query_as::<_, AiResponseRow>(
            r#"
            SELECT id, user_id, mood, intensity, ai_response, timestamp
            FROM ai_responses
            WHERE user_id = ?
            ORDER BY timestamp DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch AI responses")?;

        Ok(rows.into_iter().map(AiResponse::from).collect())
    }

    pub async fn insert_chat_record(&self, record: &ChatRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages
                (id, user_id, session_id, user_message, ai_response, mood_context, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.user_id)
        .bind(&record.session_id)
        .bind(&record.user_message)
        .bind(&record.ai_response)
        .bind(&record.mood_context)
        .bind(record.timestamp.timestamp_millis())
        .execute(&self.pool)
        .await
        .context("Failed to insert chat message")?;

        Ok(())
    }

    /// Oldest first, starting from the beginning of the session.
    pub async fn chat_history(&self, session_id: &str, limit: u32) -> Result<Vec<ChatRecord>> {
        let rows = sqlx::query_as::<_, ChatRecordRow>(
            r#"
            SELECT id, user_id, session_id, user_message, ai_response, mood_context, timestamp
            FROM chat_messages
            WHERE session_id = ?
            ORDER BY timestamp ASC, rowid ASC
            LIMIT ?
            "#,
        )
        .bind(session_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch chat history")?;

        Ok(rows.into_iter().map(ChatRecord::from).collect())
    }

    /// The last `turns` exchanges of a session, returned oldest first.
    pub async fn recent_chat_records(&self, session_id: &str, turns: u32) -> Result<Vec<ChatRecord>> {
        let rows = sqlx::query_as::<_, ChatRecordRow>(
            r#"
            SELECT id, user_id, session_id, user_message, ai_response, mood_context, timestamp
            FROM chat_messages
            WHERE session_id = ?
            ORDER BY timestamp DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(session_id)
        .bind(i64::from(turns))
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch recent chat messages")?;

        let mut records: Vec<ChatRecord> = rows.into_iter().map(ChatRecord::from).collect();
        records.reverse();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::db;

    async fn store() -> CompanionStore {
        let pool = db::connect("sqlite::memory:", 1).await.unwrap();
        CompanionStore::new(pool)
    }

    #[tokio::test]
    async fn test_user_round_trip() {
        let store = store().await;
        let user = User::new("marie.dubois@example.fr", "Marie Dubois");

        store.create_user(&user).await.unwrap();

        assert_eq!(store.get_user(&user.id).await.unwrap(), Some(user));
        assert_eq!(store.get_user("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mood_entries_newest_first_with_limit() {
        let store = store().await;

        for (i, mood) in ["happy", "sad", "calm", "proud"].iter().enumerate() {
            let mut entry = MoodEntry::new("user-1", *mood, i as i32 + 1);
            entry.timestamp = from_millis(1_700_000_000_000 + i as i64 * 1000);
            store.insert_mood_entry(&entry).await.unwrap();
        }
        store
            .insert_mood_entry(&MoodEntry::new("user-2", "angry", 7))
            .await
            .unwrap();

        let entries = store.recent_mood_entries("user-1", 3).await.unwrap();
        let moods: Vec<&str> = entries.iter().map(|e| e.mood.as_str()).collect();
        assert_eq!(moods, vec!["proud", "calm", "sad"]);
        assert!(entries.iter().all(|e| e.user_id == "user-1"));
    }

    #[tokio::test]
    async fn test_ai_responses_are_persisted() {
        let store = store().await;
        let response = AiResponse::new("user-1", "sad", 8, "Je suis là pour toi.");

        store.insert_ai_response(&response).await.unwrap();

        assert_eq!(store.recent_ai_responses("user-1", 10).await.unwrap(), vec![response]);
    }

    #[tokio::test]
    async fn test_chat_history_and_recent_turns() {
        let store = store().await;

        for i in 0..5 {
            let mut record = ChatRecord::new("u", "session-a", format!("q{i}"), format!("a{i}"), "calm", 4);
            record.timestamp = from_millis(1_700_000_000_000 + i * 1000);
            store.insert_chat_record(&record).await.unwrap();
        }
        store
            .insert_chat_record(&ChatRecord::new("u", "session-b", "other", "x", "sad", 2))
            .await
            .unwrap();

        let history = store.chat_history("session-a", 3).await.unwrap();
        let questions: Vec<&str> = history.iter().map(|r| r.user_message.as_str()).collect();
        assert_eq!(questions, vec!["q0", "q1", "q2"]);

        let recent = store.recent_chat_records("session-a", 2).await.unwrap();
        let questions: Vec<&str> = recent.iter().map(|r| r.user_message.as_str()).collect();
        assert_eq!(questions, vec!["q3", "q4"]);
    }
}
