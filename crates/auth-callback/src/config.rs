//! Configuration loading and management

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for callback handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackConfig {
    /// Navigation targets
    #[serde(default)]
    pub routes: RouteConfig,

    /// `auth_error` value meaning the caller lacks the admin role
    #[serde(default = "default_not_admin_code")]
    pub not_admin_code: String,

    /// User-facing notices
    #[serde(default)]
    pub messages: MessageConfig,

    /// Tokens accepted by `StaticTokenVerifier`
    #[serde(default)]
    pub tokens: Vec<StaticToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// In-app route for every failure path
    #[serde(default = "default_home_route")]
    pub home: String,

    /// In-app route after a successful token login
    #[serde(default = "default_admin_setup_route")]
    pub admin_setup: String,

    /// Server endpoint that takes over the code/state exchange
    #[serde(default = "default_exchange_endpoint")]
    pub exchange_endpoint: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            home: default_home_route(),
            admin_setup: default_admin_setup_route(),
            exchange_endpoint: default_exchange_endpoint(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageConfig {
    #[serde(default = "default_not_admin_message")]
    pub not_admin: String,

    #[serde(default = "default_login_success_message")]
    pub login_success: String,

    #[serde(default = "default_login_failed_message")]
    pub login_failed: String,

    #[serde(default = "default_missing_token_message")]
    pub missing_token: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            not_admin: default_not_admin_message(),
            login_success: default_login_success_message(),
            login_failed: default_login_failed_message(),
            missing_token: default_missing_token_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticToken {
    /// The token value
    pub token: String,
    /// User the token logs in as
    #[serde(default)]
    pub user_id: Option<String>,
    /// Roles granted to the resulting session
    #[serde(default)]
    pub roles: Vec<String>,
    /// Whether this token is accepted
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_home_route() -> String {
    "/".to_string()
}

fn default_admin_setup_route() -> String {
    "/admin/setup".to_string()
}

fn default_exchange_endpoint() -> String {
    "/api/auth/callback".to_string()
}

fn default_not_admin_code() -> String {
    "not_admin".to_string()
}

fn default_not_admin_message() -> String {
    "Access denied: administrator role required".to_string()
}

fn default_login_success_message() -> String {
    "Login successful".to_string()
}

fn default_login_failed_message() -> String {
    "Login failed: invalid or expired token".to_string()
}

fn default_missing_token_message() -> String {
    "No authentication token received".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            routes: RouteConfig::default(),
            not_admin_code: default_not_admin_code(),
            messages: MessageConfig::default(),
            tokens: Vec::new(),
        }
    }
}

impl CallbackConfig {
    /// Load configuration from a JSON file, falling back to defaults if it doesn't exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}
