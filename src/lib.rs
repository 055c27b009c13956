//! stokemeet - Meeting intelligence for recorded calls
//!
//! Lists recordings from the recording platform, generates framework-driven
//! summaries through an LLM, and caches them per (meeting, summary type).

pub mod auth;
pub mod cli;
pub mod config;
pub mod fathom;
pub mod llm;
pub mod profiles;
pub mod storage;
pub mod summary;
pub mod tui;

use thiserror::Error;

/// Main error type for stokemeet
#[derive(Error, Debug)]
pub enum StokemeetError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Recording platform error: {0}")]
    Platform(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, StokemeetError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "stokemeet";
