//! Moving widget configuration across the JS boundary.
//!
//! Whatever the page passes to `init` is read as plain JSON and merged over
//! the defaults, so a bad value never stops the widget from mounting.

use {
    js_sys::{Array, Object},
    serde::Serialize,
    tracing::warn,
    wasm_bindgen::{JsCast, prelude::*},
};

use wabubble_config::WidgetConfig;

use crate::error::WasmError;

/// Read a JS value (usually a plain object) as widget configuration.
///
/// Each property of an object is converted on its own, so a callback or
/// other non-JSON value only costs that one key.
pub fn config_from_js(value: JsValue) -> WidgetConfig {
    if value.is_undefined() || value.is_null() {
        return WidgetConfig::default();
    }
    if !value.is_object() {
        return match serde_wasm_bindgen::from_value::<serde_json::Value>(value) {
            Ok(json) => WidgetConfig::merged(&json),
            Err(e) => {
                warn!(error = %e, "unreadable widget config, using defaults");
                WidgetConfig::default()
            },
        };
    }

    let mut fields = serde_json::Map::new();
    for entry in Object::entries(value.unchecked_ref::<Object>()).iter() {
        let entry: Array = entry.unchecked_into();
        let Some(key) = entry.get(0).as_string() else {
            continue;
        };
        match serde_wasm_bindgen::from_value::<serde_json::Value>(entry.get(1)) {
            Ok(json) => {
                fields.insert(key, json);
            },
            Err(e) => warn!(key = %key, error = %e, "skipping unreadable widget config field"),
        }
    }
    WidgetConfig::merged(&serde_json::Value::Object(fields))
}

/// Convert configuration into a plain JS object (camelCase keys).
pub fn config_to_js(config: &WidgetConfig) -> Result<JsValue, WasmError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    Ok(config.serialize(&serializer)?)
}

/// Parse JSON text as widget configuration.
pub fn config_from_json(json: &str) -> Result<WidgetConfig, WasmError> {
    WidgetConfig::from_json(json).map_err(|e| WasmError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_json() {
        let config = config_from_json(r#"{"companyName": "Acme"}"#).unwrap();
        assert_eq!(config.company_name, "Acme");
        assert_eq!(config.agent_name, "Support Team");
    }

    #[test]
    fn test_config_from_invalid_json() {
        let err = config_from_json("{").unwrap_err();
        assert!(matches!(err, WasmError::Config(_)));
    }
}
