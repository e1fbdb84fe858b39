//! Error types for the browser build.

use {thiserror::Error, wasm_bindgen::prelude::*};

use wabubble_widget::WidgetError;

/// Errors that can reach JavaScript.
///
/// Configuration content never ends up here; only the environment can fail.
#[derive(Debug, Error)]
pub enum WasmError {
    #[error(transparent)]
    Widget(#[from] WidgetError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WasmError {
    /// Wrap a raw exception thrown by a DOM call.
    pub fn js(err: JsValue) -> Self {
        Self::Widget(js_error(err))
    }
}

/// Describe a DOM exception as a host error.
pub(crate) fn js_error(err: JsValue) -> WidgetError {
    WidgetError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for WasmError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        WasmError::Serialization(err.to_string())
    }
}
