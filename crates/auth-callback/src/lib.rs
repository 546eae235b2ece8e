//! auth-callback: client-side completion of a login redirect.
//!
//! This crate provides:
//! - Parsing of the callback query (`token`, `code`, `state`, `auth_error`)
//! - The decision policy picking exactly one action per callback
//! - `CallbackHandler`, which runs that action through injected collaborators
//! - A token-backed `SessionStore` and JSON configuration
//! - In-memory collaborators for tests

pub mod action;
pub mod config;
pub mod error;
pub mod handler;
pub mod query;
pub mod services;
pub mod session;
pub mod testing;

pub use action::{exchange_url, plan, CallbackAction};
pub use config::{CallbackConfig, MessageConfig, RouteConfig, StaticToken};
pub use error::{AuthError, CallbackError, ConfigError};
pub use handler::{CallbackHandler, CallbackOutcome, Navigation, Notice, OutcomeKind};
pub use query::CallbackQuery;
pub use services::{Authenticator, Navigator, Notifier, Session};
pub use session::{SessionStore, StaticTokenVerifier, TokenVerifier};
