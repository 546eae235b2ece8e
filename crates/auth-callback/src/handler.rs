//! The login callback handler.
//!
//! Created when the callback page mounts, with the verifying flag raised.
//! `handle` runs the chosen branch exactly once, performs its notice and
//! navigation through the injected collaborators, then lowers the flag.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::action::{plan, CallbackAction};
use crate::config::CallbackConfig;
use crate::error::{CallbackError, Result};
use crate::query::CallbackQuery;
use crate::services::{Authenticator, Navigator, Notifier};

/// Which branch the handler took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKind {
    ProviderError,
    LoggedIn,
    LoginFailed,
    CodeExchange,
    MissingToken,
}

/// Notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "camelCase")]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Where the user was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "target", rename_all = "camelCase")]
pub enum Navigation {
    /// In-app route change
    Route(String),
    /// Full-page navigation
    Redirect(String),
}

/// Record of a handled callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallbackOutcome {
    pub kind: OutcomeKind,
    pub notice: Option<Notice>,
    pub navigation: Navigation,
}

pub struct CallbackHandler<A, N, V> {
    config: CallbackConfig,
    authenticator: A,
    notifier: N,
    navigator: V,
    verifying: AtomicBool,
    handled: AtomicBool,
}

impl<A, N, V> CallbackHandler<A, N, V>
where
    A: Authenticator,
    N: Notifier,
    V: Navigator,
{
    pub fn new(config: CallbackConfig, authenticator: A, notifier: N, navigator: V) -> Self {
        Self {
            config,
            authenticator,
            notifier,
            navigator,
            verifying: AtomicBool::new(true),
            handled: AtomicBool::new(false),
        }
    }

    /// True from construction until `handle` finishes.
    pub fn is_verifying(&self) -> bool {
        self.verifying.load(Ordering::SeqCst)
    }

    /// Handle the callback described by `query`.
    ///
    /// Verification failures are reported to the user, not returned. The only
    /// error is calling this a second time.
    pub async fn handle(&self, query: &CallbackQuery) -> Result<CallbackOutcome> {
        if self.handled.swap(true, Ordering::SeqCst) {
            warn!("Ignoring repeated callback handling");
            return Err(CallbackError::AlreadyHandled);
        }

        let action = plan(query, &self.config);
        let outcome = match action {
            CallbackAction::ProviderError { message } => {
                debug!("Callback carried provider error");
                self.fail(OutcomeKind::ProviderError, message)
            }
            CallbackAction::VerifyToken { token } => self.login(&token).await,
            CallbackAction::ExchangeCode { url } => {
                debug!("Handing code exchange to {}", self.config.routes.exchange_endpoint);
                self.navigator.redirect(&url);
                CallbackOutcome {
                    kind: OutcomeKind::CodeExchange,
                    notice: None,
                    navigation: Navigation::Redirect(url),
                }
            }
            CallbackAction::MissingToken => {
                let message = self.config.messages.missing_token.clone();
                self.fail(OutcomeKind::MissingToken, message)
            }
        };

        self.verifying.store(false, Ordering::SeqCst);
        info!(kind = ?outcome.kind, "Login callback handled");
        Ok(outcome)
    }

    async fn login(&self, token: &str) -> CallbackOutcome {
        let session = match self.authenticator.login_with_token(token).await {
            Ok(session) => session,
            Err(e) => {
                warn!("Token login failed: {}", e);
                None
            }
        };

        match session {
            Some(session) => {
                debug!(user_id = ?session.user_id, "Token login succeeded");
                let message = self.config.messages.login_success.clone();
                let route = self.config.routes.admin_setup.clone();
                self.notifier.success(&message);
                self.navigator.navigate(&route);
                CallbackOutcome {
                    kind: OutcomeKind::LoggedIn,
                    notice: Some(Notice::Success(message)),
                    navigation: Navigation::Route(route),
                }
            }
            None => {
                let message = self.config.messages.login_failed.clone();
                self.fail(OutcomeKind::LoginFailed, message)
            }
        }
    }

    /// Show an error and go home.
    fn fail(&self, kind: OutcomeKind, message: String) -> CallbackOutcome {
        let route = self.config.routes.home.clone();
        self.notifier.error(&message);
        self.navigator.navigate(&route);
        CallbackOutcome {
            kind,
            notice: Some(Notice::Error(message)),
            navigation: Navigation::Route(route),
        }
    }
}
