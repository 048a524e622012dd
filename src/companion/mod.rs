// src/companion/mod.rs
// Mood-aware reply selection: tables + resolver

pub mod resolver;
pub mod tables;

pub use resolver::{
    GenerationLimits, Resolution, ReplyContext, ResponseResolver, ResponseSource, truncate_echo,
};
pub use tables::{ChatStarterTable, CompanionTables, FallbackTable, TablesError};
