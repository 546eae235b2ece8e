//! Decision policy for a login callback.
//!
//! `plan` picks exactly one action from the query, in priority order:
//! provider error, then token login, then code/state hand-off, then the
//! "nothing received" fallback.

use serde::Serialize;

use crate::config::CallbackConfig;
use crate::query::CallbackQuery;

/// What the handler should do for a given query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CallbackAction {
    /// Upstream reported an error; show `message` and go home.
    ProviderError { message: String },
    /// Verify the token and log in.
    VerifyToken { token: String },
    /// Hand the code/state pair to the server with a full-page navigation.
    ExchangeCode { url: String },
    /// Nothing usable arrived.
    MissingToken,
}

/// Pick the action for `query`.
pub fn plan(query: &CallbackQuery, config: &CallbackConfig) -> CallbackAction {
    if let Some(error) = &query.auth_error {
        let message = if *error == config.not_admin_code {
            config.messages.not_admin.clone()
        } else {
            error.clone()
        };
        return CallbackAction::ProviderError { message };
    }

    if let Some(token) = &query.token {
        return CallbackAction::VerifyToken {
            token: token.clone(),
        };
    }

    if let Some((code, state)) = query.code_and_state() {
        return CallbackAction::ExchangeCode {
            url: exchange_url(&config.routes.exchange_endpoint, code, state),
        };
    }

    CallbackAction::MissingToken
}

/// Build `<endpoint>?code=<code>&state=<state>` with both values percent-encoded.
pub fn exchange_url(endpoint: &str, code: &str, state: &str) -> String {
    format!(
        "{}?code={}&state={}",
        endpoint,
        urlencoding::encode(code),
        urlencoding::encode(state)
    )
}
