//! WebAssembly build of the floating WhatsApp chat widget.
//!
//! The page loads the module and calls `init` with a (partial)
//! configuration object. Everything that does not touch the DOM lives in
//! `wabubble-widget`; this crate only renders and wires events.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │  Page (JavaScript)                  │
//! │  init({ phoneNumber, ... })         │
//! └───────────┬─────────────────────────┘
//!             │ WidgetHandle
//! ┌───────────▼─────────────────────────┐
//! │  wabubble-wasm                      │
//! │  - DomHost (elements, stylesheet)   │
//! │  - Click subscriptions              │
//! └───────────┬─────────────────────────┘
//!             │ WidgetHost
//! ┌───────────▼─────────────────────────┐
//! │  wabubble-widget                    │
//! │  - Business hours, deep link        │
//! │  - Popup state                      │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```javascript
//! import init, { init as mountWidget } from 'wabubble-wasm';
//!
//! await init();
//! const widget = mountWidget({
//!     phoneNumber: "+1 (555) 123-4567",
//!     companyName: "Acme",
//!     position: "bottom-left",
//! });
//!
//! // Later, e.g. on route change
//! widget.destroy();
//! ```

use wasm_bindgen::prelude::*;

pub mod config;
pub mod dom;
pub mod error;
pub mod handle;
pub mod listener;

pub use {dom::DomHost, error::WasmError, handle::WidgetHandle};

/// Initialize the WASM module.
///
/// This sets up panic hooks for better error messages and initializes
/// the tracing subscriber for logging.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();

    // Initialize tracing for WASM
    tracing_wasm::set_as_global_default();

    tracing::info!("wabubble-wasm initialized");
}

/// Mount a widget. `config` may be any value; missing or malformed fields
/// fall back to their defaults.
#[wasm_bindgen]
pub fn init(config: JsValue) -> Result<WidgetHandle, WasmError> {
    WidgetHandle::mount(config::config_from_js(config))
}

/// Mount a widget from JSON text.
#[wasm_bindgen(js_name = initFromJson)]
pub fn init_from_json(json: &str) -> Result<WidgetHandle, WasmError> {
    WidgetHandle::mount(config::config_from_json(json)?)
}

/// The fully populated default configuration.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> Result<JsValue, WasmError> {
    config::config_to_js(&wabubble_config::WidgetConfig::default())
}

/// Returns the version of the wabubble-wasm crate.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
