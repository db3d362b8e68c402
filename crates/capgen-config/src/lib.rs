#![allow(clippy::must_use_candidate)]

pub mod auth;
pub mod captions;
pub mod cors;
pub mod database;
mod env;
pub mod health;
mod loader;
pub mod server;

use serde::Deserialize;

pub use auth::*;
pub use captions::*;
pub use cors::*;
pub use database::*;
pub use health::*;
pub use server::*;

/// Top-level Capgen configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Relational store configuration
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    /// Authentication and subscription service configuration
    #[serde(default)]
    pub auth: Option<AuthConfig>,
    /// Caption generation configuration
    #[serde(default)]
    pub captions: Option<CaptionsConfig>,
}
