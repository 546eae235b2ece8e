//! Collaborators the callback handler depends on.
//!
//! Implementations:
//! - `RecordingNotifier`, `RecordingNavigator`, `StaticAuthenticator` - For testing
//! - `SessionStore` - Client-side session store backed by a `TokenVerifier`
//! - `CallbackBridge` (in auth-callback-wasm) - JS callbacks via wasm-bindgen
//! - `ConsoleNotifier`, `ConsoleNavigator` (in auth-callback-cli) - stdout
//!
//! Uses `target_arch = "wasm32"` for conditional compilation so JS-backed
//! authenticators don't need to be `Send`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Session produced by a successful token login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Token the session was created from
    #[serde(default)]
    pub token: String,
    /// Authenticated user, if the verifier reports one
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
    /// Roles granted to the user
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Session {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// User-facing notification sink. Fire-and-forget.
pub trait Notifier {
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

/// Page navigation.
pub trait Navigator {
    /// In-app route change
    fn navigate(&self, route: &str);

    /// Full-page navigation, leaving the app
    fn redirect(&self, url: &str);
}

/// Verify-and-login operation.
///
/// `Ok(None)` and `Err(_)` both mean the login failed; the handler does not
/// tell them apart.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg(not(target_arch = "wasm32"))]
pub trait Authenticator: Send + Sync {
    async fn login_with_token(&self, token: &str) -> Result<Option<Session>, AuthError>;
}

/// Verify-and-login operation (WASM version without Send + Sync).
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg(target_arch = "wasm32")]
pub trait Authenticator {
    async fn login_with_token(&self, token: &str) -> Result<Option<Session>, AuthError>;
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn error(&self, message: &str) {
        (**self).error(message)
    }

    fn success(&self, message: &str) {
        (**self).success(message)
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn error(&self, message: &str) {
        (**self).error(message)
    }

    fn success(&self, message: &str) {
        (**self).success(message)
    }
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn navigate(&self, route: &str) {
        (**self).navigate(route)
    }

    fn redirect(&self, url: &str) {
        (**self).redirect(url)
    }
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn navigate(&self, route: &str) {
        (**self).navigate(route)
    }

    fn redirect(&self, url: &str) {
        (**self).redirect(url)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: Authenticator + ?Sized> Authenticator for &T {
    async fn login_with_token(&self, token: &str) -> Result<Option<Session>, AuthError> {
        (**self).login_with_token(token).await
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: Authenticator + ?Sized> Authenticator for Arc<T> {
    async fn login_with_token(&self, token: &str) -> Result<Option<Session>, AuthError> {
        (**self).login_with_token(token).await
    }
}
