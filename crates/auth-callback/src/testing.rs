//! In-memory collaborators for tests.
//!
//! Each one records what the handler asked of it so tests can assert on the
//! exact notices and navigations of a run.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::services::{Authenticator, Navigator, Notifier, Session};

/// A notice as seen by `RecordingNotifier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeEvent {
    Error(String),
    Success(String),
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<NoticeEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<NoticeEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                NoticeEvent::Error(m) => Some(m),
                NoticeEvent::Success(_) => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                NoticeEvent::Success(m) => Some(m),
                NoticeEvent::Error(_) => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.events.lock().unwrap().push(NoticeEvent::Error(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.events.lock().unwrap().push(NoticeEvent::Success(message.to_string()));
    }
}

/// A navigation as seen by `RecordingNavigator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Route(String),
    Redirect(String),
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavigationEvent>>,
}

impl RecordingNavigator {
    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.events.lock().unwrap().push(NavigationEvent::Route(route.to_string()));
    }

    fn redirect(&self, url: &str) {
        self.events.lock().unwrap().push(NavigationEvent::Redirect(url.to_string()));
    }
}

#[derive(Debug)]
enum Response {
    Accept(Session),
    AcceptToken(String, Session),
    RejectAll,
    Fail(AuthError),
}

/// Authenticator with a fixed answer.
#[derive(Debug)]
pub struct StaticAuthenticator {
    response: Response,
    tokens: Mutex<Vec<String>>,
}

impl StaticAuthenticator {
    fn with(response: Response) -> Self {
        Self {
            response,
            tokens: Mutex::new(Vec::new()),
        }
    }

    /// Accept any token.
    pub fn accept(session: Session) -> Self {
        Self::with(Response::Accept(session))
    }

    /// Accept only `token`; anything else gets no session.
    pub fn accept_token(token: impl Into<String>, session: Session) -> Self {
        Self::with(Response::AcceptToken(token.into(), session))
    }

    /// Resolve every login with no session.
    pub fn reject_all() -> Self {
        Self::with(Response::RejectAll)
    }

    /// Fail every login with `error`.
    pub fn fail(error: AuthError) -> Self {
        Self::with(Response::Fail(error))
    }

    /// Tokens passed to `login_with_token`, in order.
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Authenticator for StaticAuthenticator {
    async fn login_with_token(&self, token: &str) -> Result<Option<Session>, AuthError> {
        self.tokens.lock().unwrap().push(token.to_string());
        match &self.response {
            Response::Accept(session) => Ok(Some(session.clone())),
            Response::AcceptToken(expected, session) if expected == token => Ok(Some(session.clone())),
            Response::AcceptToken(..) | Response::RejectAll => Ok(None),
            Response::Fail(e) => Err(e.clone()),
        }
    }
}
