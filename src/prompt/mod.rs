// src/prompt/mod.rs
// Emotional prompt building: mood + intensity -> system instruction

pub mod builder;
pub mod defaults;

pub use builder::{PromptTemplate, build_user_text};
