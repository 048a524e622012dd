// src/config/mod.rs
// Environment-driven configuration with typed defaults

use once_cell::sync::Lazy;
use std::str::FromStr;
use std::time::Duration;

use crate::companion::GenerationLimits;

#[derive(Debug, Clone)]
pub struct CompanionConfig {
    // ── LLM Provider
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
    pub check_in_max_tokens: u32,
    pub chat_max_tokens: u32,
    pub provider_timeout: u64,

    // ── Database
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Server
    pub host: String,
    pub port: u16,
    pub cors_origin: String,

    // ── Response tables
    pub responses_path: Option<String>,

    // ── History limits
    pub mood_history_limit: u32,
    pub chat_history_limit: u32,
    pub history_max_limit: u32,
    pub chat_context_turns: u32,

    // ── Logging
    pub log_level: String,
}

/// Parses `key` from `lookup`, ignoring trailing `# comments` and whitespace.
/// Missing, blank or unparsable values yield `default`.
fn env_var_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            if clean_val.is_empty() {
                return default;
            }
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        None => default,
    }
}

fn env_var_opt<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CompanionConfig {
    pub fn from_env() -> Self {
        // Load from .env file first if it exists
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            openai_api_key: env_var_opt(&lookup, "OPENAI_API_KEY"),
            openai_base_url: env_var_or(&lookup, "OPENAI_BASE_URL", "https://api.openai.com".to_string()),
            model: env_var_or(&lookup, "COMPANION_MODEL", "gpt-4o".to_string()),
            check_in_max_tokens: env_var_or(&lookup, "COMPANION_CHECK_IN_MAX_TOKENS", 200),
            chat_max_tokens: env_var_or(&lookup, "COMPANION_CHAT_MAX_TOKENS", 250),
            provider_timeout: env_var_or(&lookup, "COMPANION_PROVIDER_TIMEOUT", 30),
            database_url: env_var_or(&lookup, "DATABASE_URL", "sqlite:./companion.db".to_string()),
            sqlite_max_connections: env_var_or(&lookup, "SQLITE_MAX_CONNECTIONS", 5),
            host: env_var_or(&lookup, "COMPANION_HOST", "0.0.0.0".to_string()),
            port: env_var_or(&lookup, "COMPANION_PORT", 8001),
            cors_origin: env_var_or(&lookup, "COMPANION_CORS_ORIGIN", "*".to_string()),
            responses_path: env_var_opt(&lookup, "COMPANION_RESPONSES_PATH"),
            mood_history_limit: env_var_or(&lookup, "COMPANION_MOOD_HISTORY_LIMIT", 10),
            chat_history_limit: env_var_or(&lookup, "COMPANION_CHAT_HISTORY_LIMIT", 20),
            history_max_limit: env_var_or(&lookup, "COMPANION_HISTORY_MAX_LIMIT", 100),
            chat_context_turns: env_var_or(&lookup, "COMPANION_CHAT_CONTEXT_TURNS", 10),
            log_level: env_var_or(&lookup, "COMPANION_LOG_LEVEL", "info".to_string()),
        }
    }

    // --- Convenience Methods ---

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout)
    }

    pub fn generation_limits(&self) -> GenerationLimits {
        GenerationLimits {
            check_in_max_tokens: self.check_in_max_tokens,
            chat_max_tokens: self.chat_max_tokens,
        }
    }

    /// Clamp a client-supplied `limit` into `1..=history_max_limit`.
    pub fn clamp_limit(&self, requested: Option<u32>, default: u32) -> u32 {
        requested
            .unwrap_or(default)
            .clamp(1, self.history_max_limit.max(1))
    }
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

// Global config instance - loaded once at startup by the binary
pub static CONFIG: Lazy<CompanionConfig> = Lazy::new(CompanionConfig::from_env);
