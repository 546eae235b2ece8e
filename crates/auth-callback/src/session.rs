//! Client-side session store.
//!
//! `SessionStore` is the login half of the auth store: it asks a
//! `TokenVerifier` whether a token is good and keeps the resulting session as
//! the current one. It implements `Authenticator`, so the callback handler can
//! log in through it directly.

use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::{CallbackConfig, StaticToken};
use crate::error::AuthError;
use crate::services::{Authenticator, Session};

/// Checks a token and describes the session it grants.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg(not(target_arch = "wasm32"))]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Option<Session>, AuthError>;
}

/// Checks a token and describes the session it grants (WASM version without Send + Sync).
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg(target_arch = "wasm32")]
pub trait TokenVerifier {
    async fn verify(&self, token: &str) -> Result<Option<Session>, AuthError>;
}

/// Verifier backed by a fixed token list, like API keys.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: Vec<StaticToken>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: Vec<StaticToken>) -> Self {
        Self { tokens }
    }

    pub fn from_config(config: &CallbackConfig) -> Self {
        Self::new(config.tokens.clone())
    }

    /// Look up an active token.
    pub fn find(&self, token: &str) -> Option<&StaticToken> {
        self.tokens.iter().find(|t| t.active && t.token == token)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Option<Session>, AuthError> {
        let session = self.find(token).map(|t| Session {
            token: t.token.clone(),
            user_id: t.user_id.clone(),
            roles: t.roles.clone(),
        });
        Ok(session)
    }
}

pub struct SessionStore<V> {
    verifier: V,
    current: RwLock<Option<Session>>,
}

impl<V: TokenVerifier> SessionStore<V> {
    pub fn new(verifier: V) -> Self {
        Self {
            verifier,
            current: RwLock::new(None),
        }
    }

    /// The session from the last successful login, if any.
    pub fn current(&self) -> Option<Session> {
        self.current.read().ok().and_then(|s| s.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().map(|s| s.is_some()).unwrap_or(false)
    }

    /// Drop the current session.
    pub fn logout(&self) {
        if let Ok(mut current) = self.current.write() {
            if current.take().is_some() {
                info!("Logged out");
            }
        }
    }

    fn replace(&self, session: Option<Session>) {
        if let Ok(mut current) = self.current.write() {
            *current = session;
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<V: TokenVerifier> Authenticator for SessionStore<V> {
    async fn login_with_token(&self, token: &str) -> Result<Option<Session>, AuthError> {
        match self.verifier.verify(token).await {
            Ok(Some(session)) => {
                info!(user_id = ?session.user_id, "Logged in with token");
                self.replace(Some(session.clone()));
                Ok(Some(session))
            }
            Ok(None) => {
                debug!("Token not accepted");
                self.replace(None);
                Ok(None)
            }
            Err(e) => {
                self.replace(None);
                Err(e)
            }
        }
    }
}
