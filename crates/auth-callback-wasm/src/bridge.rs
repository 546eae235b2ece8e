//! JavaScript collaborator bridge for WASM.
//!
//! Implements `Notifier`, `Navigator` and `Authenticator` by calling JavaScript
//! functions provided by the callback page. The login callback is async and
//! returns a Promise, which we convert to a Rust Future.

use async_trait::async_trait;
use auth_callback::{AuthError, Authenticator, Navigator, Notifier, Session};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// JavaScript collaborator bridge.
///
/// # Example (TypeScript side)
///
/// ```typescript
/// const bridge = new CallbackBridge(
///   (msg) => message.error(msg),
///   (msg) => message.success(msg),
///   (route) => router.push(route),
///   (token) => auth.loginWithToken(token),
///   undefined,                      // redirect: defaults to location.assign
///   (v) => { verifying.value = v },
/// );
/// await handleCallback(window.location.search, bridge);
/// ```
#[wasm_bindgen]
pub struct CallbackBridge {
    error_fn: js_sys::Function,
    success_fn: js_sys::Function,
    navigate_fn: js_sys::Function,
    login_fn: js_sys::Function,
    redirect_fn: Option<js_sys::Function>,
    verifying_fn: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl CallbackBridge {
    /// Create a new bridge with JS callback functions.
    ///
    /// `login` may return a Promise or a plain value. `redirect` and
    /// `onVerifyingChange` are optional.
    #[wasm_bindgen(constructor)]
    pub fn new(
        error_fn: js_sys::Function,
        success_fn: js_sys::Function,
        navigate_fn: js_sys::Function,
        login_fn: js_sys::Function,
        redirect_fn: Option<js_sys::Function>,
        verifying_fn: Option<js_sys::Function>,
    ) -> Self {
        Self {
            error_fn,
            success_fn,
            navigate_fn,
            login_fn,
            redirect_fn,
            verifying_fn,
        }
    }
}

impl CallbackBridge {
    /// Report the verifying flag to the page, if it asked for it.
    pub(crate) fn verifying_changed(&self, verifying: bool) {
        if let Some(func) = &self.verifying_fn {
            call_js(func, &JsValue::from_bool(verifying));
        }
    }
}

/// Call a JS function, logging instead of propagating a thrown exception.
fn call_js(func: &js_sys::Function, arg: &JsValue) {
    if let Err(e) = func.call1(&JsValue::NULL, arg) {
        tracing::warn!("JS callback threw: {}", js_err_message(&e));
    }
}

/// Full-page navigation through `globalThis.location.assign`.
fn assign_location(url: &str) -> Result<(), JsValue> {
    let location = js_sys::Reflect::get(&js_sys::global(), &"location".into())?;
    let assign: js_sys::Function = js_sys::Reflect::get(&location, &"assign".into())?.dyn_into()?;
    assign.call1(&location, &url.into())?;
    Ok(())
}

/// Extract a readable message from a thrown JS value.
fn js_err_message(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &"message".into())
                .ok()
                .and_then(|v| v.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

impl Notifier for CallbackBridge {
    fn error(&self, message: &str) {
        call_js(&self.error_fn, &message.into());
    }

    fn success(&self, message: &str) {
        call_js(&self.success_fn, &message.into());
    }
}

impl Navigator for CallbackBridge {
    fn navigate(&self, route: &str) {
        call_js(&self.navigate_fn, &route.into());
    }

    fn redirect(&self, url: &str) {
        match &self.redirect_fn {
            Some(func) => call_js(func, &url.into()),
            None => {
                if let Err(e) = assign_location(url) {
                    tracing::error!("Failed to redirect to {}: {}", url, js_err_message(&e));
                }
            }
        }
    }
}

#[async_trait(?Send)]
impl Authenticator for CallbackBridge {
    async fn login_with_token(&self, token: &str) -> Result<Option<Session>, AuthError> {
        let returned = self
            .login_fn
            .call1(&JsValue::NULL, &token.into())
            .map_err(|e| AuthError::Rejected(js_err_message(&e)))?;

        // Promise.resolve passes Promises through and wraps plain values
        let result = JsFuture::from(js_sys::Promise::resolve(&returned))
            .await
            .map_err(|e| AuthError::Rejected(js_err_message(&e)))?;

        if !result.is_truthy() {
            return Ok(None);
        }

        // Any truthy value is a session; keep its details when it has the right shape
        let session = match serde_wasm_bindgen::from_value::<Session>(result) {
            Ok(mut session) => {
                if session.token.is_empty() {
                    session.token = token.to_string();
                }
                session
            }
            Err(_) => Session {
                token: token.to_string(),
                ..Session::default()
            },
        };
        Ok(Some(session))
    }
}
