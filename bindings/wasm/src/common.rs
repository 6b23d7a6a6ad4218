use std::fmt;

use serde::Serialize;
use thirdplace_core::IndexLayer;
use wasm_bindgen::JsValue;

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Log a failure that cannot be returned to the caller, e.g. inside a subscriber.
pub(crate) fn console_error(context: &str, detail: impl fmt::Debug) {
    web_sys::console::error_1(&JsValue::from_str(&failure_message(context, detail)));
}

fn failure_message(context: &str, detail: impl fmt::Debug) -> String {
    format!("[WasmDashboard::{context}] {detail:?}")
}

/// Serialize to plain JS objects (not `Map`s), so the UI can read fields directly.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).map_err(js_err)
}

/// Accepts map layer ids ("modern-score") or short names ("modern"); anything else is Overall.
pub(crate) fn parse_layer(layer: Option<String>) -> IndexLayer {
    layer.as_deref().and_then(IndexLayer::from_str).unwrap_or_default()
}
