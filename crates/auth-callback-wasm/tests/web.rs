//! Browser tests for the callback bridge.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use auth_callback_wasm::{handle_callback, CallbackBridge};
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// Records every callback invocation on `globalThis.__calls` as `[name, arg]`.
fn recorder(name: &str) -> js_sys::Function {
    js_sys::Function::new_with_args(
        "arg",
        &format!(
            "(globalThis.__calls = globalThis.__calls || []).push(['{}', arg]);",
            name
        ),
    )
}

fn take_calls() -> Vec<(String, JsValue)> {
    let global = js_sys::global();
    let calls = js_sys::Reflect::get(&global, &"__calls".into()).unwrap();
    js_sys::Reflect::set(&global, &"__calls".into(), &js_sys::Array::new()).unwrap();
    if calls.is_undefined() {
        return Vec::new();
    }
    js_sys::Array::from(&calls)
        .iter()
        .map(|entry| {
            let entry = js_sys::Array::from(&entry);
            (entry.get(0).as_string().unwrap(), entry.get(1))
        })
        .collect()
}

fn bridge(login_body: &str) -> CallbackBridge {
    CallbackBridge::new(
        recorder("error"),
        recorder("success"),
        recorder("navigate"),
        js_sys::Function::new_with_args("token", login_body),
        Some(recorder("redirect")),
        Some(recorder("verifying")),
    )
}

fn names(calls: &[(String, JsValue)]) -> Vec<&str> {
    calls.iter().map(|(n, _)| n.as_str()).collect()
}

#[wasm_bindgen_test]
async fn test_resolved_session_logs_in() {
    take_calls();
    let bridge = bridge("return Promise.resolve({ userId: 'alice', roles: ['admin'] });");

    handle_callback("?token=abc".into(), bridge, JsValue::UNDEFINED)
        .await
        .unwrap();

    let calls = take_calls();
    assert_eq!(names(&calls), vec!["verifying", "success", "navigate", "verifying"]);
    assert_eq!(calls[2].1.as_string().as_deref(), Some("/admin/setup"));
    assert_eq!(calls[3].1.as_bool(), Some(false));
}

#[wasm_bindgen_test]
async fn test_rejected_promise_is_failure() {
    take_calls();
    let bridge = bridge("return Promise.reject(new Error('network down'));");

    handle_callback("?token=abc".into(), bridge, JsValue::UNDEFINED)
        .await
        .unwrap();

    let calls = take_calls();
    assert_eq!(names(&calls), vec!["verifying", "error", "navigate", "verifying"]);
    assert_eq!(calls[2].1.as_string().as_deref(), Some("/"));
}

#[wasm_bindgen_test]
async fn test_falsy_result_is_failure() {
    take_calls();
    let bridge = bridge("return null;");

    handle_callback("?token=abc".into(), bridge, JsValue::UNDEFINED)
        .await
        .unwrap();

    assert_eq!(names(&take_calls()), vec!["verifying", "error", "navigate", "verifying"]);
}

#[wasm_bindgen_test]
async fn test_code_exchange_redirects() {
    take_calls();
    let bridge = bridge("return null;");

    handle_callback("?code=abc%201&state=xyz".into(), bridge, JsValue::UNDEFINED)
        .await
        .unwrap();

    let calls = take_calls();
    assert_eq!(names(&calls), vec!["verifying", "redirect", "verifying"]);
    assert_eq!(
        calls[1].1.as_string().as_deref(),
        Some("/api/auth/callback?code=abc%201&state=xyz")
    );
}
