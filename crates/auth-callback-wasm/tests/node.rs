//! Node tests for the callback bridge defaults.
//!
//! Node has no `location`, so the tests can install their own before the
//! bridge reaches for it. Run with `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use auth_callback_wasm::{handle_callback, CallbackBridge};
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

/// Install `globalThis.location` whose `assign` records the URL on `globalThis.__assigned`.
fn install_location() {
    let location = js_sys::Function::new_no_args(
        "return { assign(url) { globalThis.__assigned = url; } };",
    )
    .call0(&JsValue::NULL)
    .unwrap();
    js_sys::Reflect::set(&js_sys::global(), &"location".into(), &location).unwrap();
}

fn assigned() -> Option<String> {
    js_sys::Reflect::get(&js_sys::global(), &"__assigned".into())
        .unwrap()
        .as_string()
}

fn noop() -> js_sys::Function {
    js_sys::Function::new_no_args("")
}

#[wasm_bindgen_test]
async fn test_redirect_defaults_to_location_assign() {
    install_location();
    let bridge = CallbackBridge::new(
        noop(),
        noop(),
        noop(),
        js_sys::Function::new_no_args("return null;"),
        None,
        None,
    );

    let outcome = handle_callback("?code=abc%201&state=xyz".into(), bridge, JsValue::UNDEFINED)
        .await
        .unwrap();

    assert_eq!(
        assigned().as_deref(),
        Some("/api/auth/callback?code=abc%201&state=xyz")
    );
    let kind = js_sys::Reflect::get(&outcome, &"kind".into()).unwrap();
    assert_eq!(kind.as_string().as_deref(), Some("codeExchange"));
}
