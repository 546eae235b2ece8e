//! WASM bindings for auth-callback.
//!
//! Lets the callback page hand its query string to Rust. The page supplies
//! its flash messages, router, and auth store as JS callbacks on a
//! `CallbackBridge`; the bridge implements the collaborator traits so the
//! Rust `CallbackHandler` drives them.
//!
//! ```text
//! TypeScript                       WASM (Rust)
//! ──────────                       ───────────
//! message / router / auth ──callbacks──> CallbackBridge
//!                                              │
//!                                              ▼
//!                             impl Notifier + Navigator + Authenticator
//!                                              │
//!                                              ▼
//!                                       CallbackHandler
//! ```
//!
//! **Note**: This crate only compiles for `wasm32` targets. When building for native
//! targets (e.g., during `cargo check --workspace`), this crate provides no exports.

#[cfg(target_arch = "wasm32")]
mod bridge;

#[cfg(target_arch = "wasm32")]
pub use bridge::CallbackBridge;

#[cfg(target_arch = "wasm32")]
mod wasm_impl {
    use super::*;
    use auth_callback::{CallbackConfig, CallbackHandler, CallbackQuery};
    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    /// Initialize the WASM module (sets up panic hook and console tracing).
    #[wasm_bindgen]
    pub fn init() {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(tracing::Level::DEBUG)
                .build(),
        );
        tracing::debug!("auth-callback-wasm initialized");
    }

    /// Get version string
    #[wasm_bindgen]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Handle a login callback.
    ///
    /// `search` is `window.location.search`. `config` is an optional object in
    /// the same shape as the JSON config file; missing fields use defaults.
    ///
    /// Resolves to `{ kind, notice, navigation }`. Only a malformed config or
    /// an internal serialization problem rejects; login failures resolve
    /// normally with `kind: "loginFailed"`.
    #[wasm_bindgen(js_name = handleCallback)]
    pub async fn handle_callback(
        search: String,
        bridge: CallbackBridge,
        config: JsValue,
    ) -> Result<JsValue, JsValue> {
        let config: CallbackConfig = if config.is_undefined() || config.is_null() {
            CallbackConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid callback config: {}", e)))?
        };

        let query = CallbackQuery::from_query_str(&search);
        let handler = CallbackHandler::new(config, &bridge, &bridge, &bridge);
        bridge.verifying_changed(handler.is_verifying());

        let outcome = handler
            .handle(&query)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        bridge.verifying_changed(handler.is_verifying());

        outcome
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

// Re-export wasm_impl contents at crate root for wasm32 targets
#[cfg(target_arch = "wasm32")]
pub use wasm_impl::*;
