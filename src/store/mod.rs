// src/store/mod.rs
// SQLite persistence for users, moods, AI answers and chat exchanges

pub mod db;
pub mod sqlite;
pub mod types;

pub use sqlite::CompanionStore;
pub use types::{AiResponse, ChatRecord, MoodEntry, User};
