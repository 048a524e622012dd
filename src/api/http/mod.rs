// src/api/http/mod.rs

pub mod chat;
pub mod common;
pub mod handlers;
pub mod mood;
pub mod router;
pub mod users;

pub use router::create_router;
