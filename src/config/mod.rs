//! Configuration module for stokemeet
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{FathomSettings, LlmSettings, RemoteSettings, Settings};
