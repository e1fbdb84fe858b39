//! DOM event subscriptions tied to Rust ownership.

use {
    tracing::warn,
    wasm_bindgen::{JsCast, prelude::*},
    web_sys::{Event, EventTarget},
};

use crate::error::WasmError;

/// An event listener that is removed from its target when dropped.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, WasmError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(WasmError::js)?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            warn!(event = self.event, error = ?e, "failed to remove event listener");
        }
    }
}
