//! Callback query parameters.
//!
//! Read once from the URL the browser landed on. Empty values are treated as
//! missing and the first occurrence of a repeated key wins.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// Base used to resolve relative callback URLs such as `/auth/callback?token=x`.
const PLACEHOLDER_BASE: &str = "http://localhost/";

/// The four optional parameters a login callback may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Bearer token handed over directly by the identity provider
    pub token: Option<String>,
    /// Authorization code for the server-side exchange
    pub code: Option<String>,
    /// State value paired with `code`
    pub state: Option<String>,
    /// Error code reported by the upstream login step
    pub auth_error: Option<String>,
}

impl CallbackQuery {
    /// Parse a raw query string. A leading `?` is accepted.
    pub fn from_query_str(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// Parse the query portion of a full or relative URL.
    pub fn from_url(raw: &str) -> Result<Self> {
        let base = Url::parse(PLACEHOLDER_BASE)?;
        let url = Url::options().base_url(Some(&base)).parse(raw)?;
        Ok(Self::from_pairs(url.query_pairs()))
    }

    fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "token" => &mut query.token,
                "code" => &mut query.code,
                "state" => &mut query.state,
                "auth_error" => &mut query.auth_error,
                _ => continue,
            };
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }

    /// Returns the code/state pair when both are present.
    pub fn code_and_state(&self) -> Option<(&str, &str)> {
        match (&self.code, &self.state) {
            (Some(code), Some(state)) => Some((code.as_str(), state.as_str())),
            _ => None,
        }
    }
}
