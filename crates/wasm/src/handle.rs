//! JavaScript handle for a mounted widget.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use {
    tracing::warn,
    wasm_bindgen::{JsCast, prelude::*},
    web_sys::{Event, Node},
};

use {
    wabubble_config::WidgetConfig,
    wabubble_widget::{WidgetController, WidgetError},
};

use crate::{config::config_to_js, dom::DomHost, error::WasmError, listener::EventListener};

type SharedWidget = Rc<RefCell<WidgetController<DomHost>>>;

/// A widget mounted on the page.
///
/// Dropping the handle (`free()` from JavaScript) or calling `destroy()`
/// removes the widget, its listeners and, if it was the last widget on the
/// page, the shared stylesheet.
#[wasm_bindgen]
pub struct WidgetHandle {
    inner: SharedWidget,
}

#[wasm_bindgen]
impl WidgetHandle {
    /// Open or close the popup. Returns the new state.
    #[wasm_bindgen(js_name = togglePopup)]
    pub fn toggle_popup(&self) -> bool {
        self.inner.borrow_mut().toggle_popup()
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.inner.borrow().is_open()
    }

    /// Whether the agent is available right now.
    #[wasm_bindgen(js_name = isBusinessHours)]
    pub fn is_business_hours(&self) -> bool {
        self.inner.borrow().is_business_hours()
    }

    /// Open the chat deep link in a new tab and return it.
    #[wasm_bindgen(js_name = startChat)]
    pub fn start_chat(&self) -> String {
        self.inner.borrow_mut().start_chat()
    }

    #[wasm_bindgen(js_name = chatLink)]
    pub fn chat_link(&self) -> String {
        self.inner.borrow().chat_link()
    }

    #[wasm_bindgen(js_name = instanceId)]
    pub fn instance_id(&self) -> String {
        self.inner.borrow().id().to_string()
    }

    /// The effective (merged) configuration.
    pub fn config(&self) -> Result<JsValue, WasmError> {
        config_to_js(self.inner.borrow().config())
    }

    /// Remove the widget from the page. Further calls are no-ops.
    pub fn destroy(&self) {
        self.inner.borrow_mut().unmount();
    }
}

impl WidgetHandle {
    /// Mount a widget into the current document and wire its listeners.
    pub fn mount(config: WidgetConfig) -> Result<Self, WasmError> {
        let host = DomHost::new()?;
        let controller = WidgetController::mount(config, host)?;
        let inner = Rc::new(RefCell::new(controller));
        let listeners = subscribe(&inner)?;
        inner.borrow_mut().host_mut().attach(listeners);
        Ok(Self { inner })
    }
}

/// Button, start-chat and outside-click listeners. Each holds only a weak
/// reference so the handle stays the sole owner of the widget.
fn subscribe(widget: &SharedWidget) -> Result<Vec<EventListener>, WasmError> {
    let (root, button, start_chat, document) = {
        let widget = widget.borrow();
        let host = widget.host();
        let not_mounted = || WidgetError::Unavailable("widget is not mounted".into());
        (
            host.root().ok_or_else(not_mounted)?.clone(),
            host.button().ok_or_else(not_mounted)?.clone(),
            host.start_chat_button().ok_or_else(not_mounted)?.clone(),
            host.document().clone(),
        )
    };

    let on_button = EventListener::new(&button, "click", {
        let weak = Rc::downgrade(widget);
        move |_| {
            with_widget(&weak, |w| {
                w.toggle_popup();
            })
        }
    })?;

    let on_start_chat = EventListener::new(&start_chat, "click", {
        let weak = Rc::downgrade(widget);
        move |_| {
            with_widget(&weak, |w| {
                w.start_chat();
            })
        }
    })?;

    let on_outside = EventListener::new(&document, "click", {
        let weak = Rc::downgrade(widget);
        move |event: Event| {
            let inside = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok())
                .is_some_and(|node| root.contains(Some(&node)));
            if !inside {
                with_widget(&weak, |w| w.handle_outside_click());
            }
        }
    })?;

    Ok(vec![on_button, on_start_chat, on_outside])
}

fn with_widget(
    weak: &Weak<RefCell<WidgetController<DomHost>>>,
    f: impl FnOnce(&mut WidgetController<DomHost>),
) {
    let Some(widget) = weak.upgrade() else {
        return;
    };
    match widget.try_borrow_mut() {
        Ok(mut widget) => f(&mut widget),
        Err(_) => warn!("widget busy, dropping click"),
    };
}
