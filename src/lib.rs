// src/lib.rs

pub mod api;
pub mod companion;
pub mod config;
pub mod llm;
pub mod mood;
pub mod prompt;
pub mod state;
pub mod store;

// Export commonly used items
pub use companion::{ReplyContext, Resolution, ResponseResolver};
pub use config::{CONFIG, CompanionConfig};
pub use state::AppState;
