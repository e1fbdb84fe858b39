//! Browser DOM implementation of [`WidgetHost`].

use std::cell::RefCell;

use {
    tracing::{debug, warn},
    wasm_bindgen::JsCast,
    web_sys::{Document, Element, HtmlElement, Window},
};

use wabubble_widget::{
    Availability, AvatarView, StyleChange, StyleRegistry, WidgetError, WidgetHost, WidgetView,
    styles::{STYLE_ELEMENT_ID, STYLESHEET},
    view::{CHAT_ICON_PATH, PRIMARY_COLOR_PROPERTY, START_CHAT_LABEL, class},
};

use crate::{error::js_error, listener::EventListener};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

thread_local! {
    /// Page-wide stylesheet owners, shared by every widget on the page.
    static STYLES: RefCell<StyleRegistry> = RefCell::new(StyleRegistry::new());
}

/// Elements created by [`DomHost::mount`].
struct Mounted {
    root: HtmlElement,
    button: Element,
    popup: Element,
    status: Element,
    start_chat: Element,
}

/// Renders one widget into the page's document.
pub struct DomHost {
    window: Window,
    document: Document,
    mounted: Option<Mounted>,
    subscriptions: Vec<EventListener>,
}

impl DomHost {
    pub fn new() -> Result<Self, WidgetError> {
        let window =
            web_sys::window().ok_or_else(|| WidgetError::Unavailable("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| WidgetError::Unavailable("window has no document".into()))?;
        Ok(Self::with_document(window, document))
    }

    /// Render into `document` instead of the window's own.
    pub fn with_document(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            mounted: None,
            subscriptions: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn root(&self) -> Option<&HtmlElement> {
        self.mounted.as_ref().map(|m| &m.root)
    }

    pub fn button(&self) -> Option<&Element> {
        self.mounted.as_ref().map(|m| &m.button)
    }

    pub fn start_chat_button(&self) -> Option<&Element> {
        self.mounted.as_ref().map(|m| &m.start_chat)
    }

    /// Keep `listeners` alive until the widget unmounts.
    pub fn attach(&mut self, listeners: Vec<EventListener>) {
        self.subscriptions.extend(listeners);
    }

    fn element(&self, tag: &str, class_name: &str) -> Result<Element, WidgetError> {
        let el = self.document.create_element(tag).map_err(js_error)?;
        el.set_class_name(class_name);
        Ok(el)
    }

    fn text(&self, tag: &str, class_name: &str, text: &str) -> Result<Element, WidgetError> {
        let el = self.element(tag, class_name)?;
        el.set_text_content(Some(text));
        Ok(el)
    }

    fn chat_icon(&self) -> Result<Element, WidgetError> {
        let svg = self
            .document
            .create_element_ns(Some(SVG_NS), "svg")
            .map_err(js_error)?;
        for (name, value) in [
            ("width", "28"),
            ("height", "28"),
            ("viewBox", "0 0 24 24"),
            ("stroke-linecap", "round"),
            ("stroke-linejoin", "round"),
        ] {
            svg.set_attribute(name, value).map_err(js_error)?;
        }
        let path = self
            .document
            .create_element_ns(Some(SVG_NS), "path")
            .map_err(js_error)?;
        path.set_attribute("d", CHAT_ICON_PATH).map_err(js_error)?;
        svg.append_child(&path).map_err(js_error)?;
        Ok(svg)
    }

    fn avatar(&self, avatar: &AvatarView) -> Result<Element, WidgetError> {
        match avatar {
            AvatarView::Image { src, alt } => {
                let img = self.element("img", class::AVATAR)?;
                img.set_attribute("src", src).map_err(js_error)?;
                img.set_attribute("alt", alt).map_err(js_error)?;
                Ok(img)
            },
            AvatarView::Placeholder => self.element(
                "div",
                &format!("{} {}", class::AVATAR, class::AVATAR_PLACEHOLDER),
            ),
        }
    }

    fn build(&self, view: &WidgetView) -> Result<Mounted, WidgetError> {
        let root: HtmlElement = self
            .element("div", &view.root_classes())?
            .dyn_into()
            .map_err(|_| WidgetError::Host("widget root is not an HTML element".into()))?;
        root.set_id(&view.root_id);
        if let Some(color) = &view.primary_color {
            root.style()
                .set_property(PRIMARY_COLOR_PROPERTY, color)
                .map_err(js_error)?;
        }

        let button = self.element("div", class::BUTTON)?;
        button.set_attribute("role", "button").map_err(js_error)?;
        button.set_attribute("aria-label", "Open chat").map_err(js_error)?;
        button.append_child(self.chat_icon()?.as_ref()).map_err(js_error)?;

        let popup = self.element("div", class::POPUP)?;
        let header = self.element("div", class::HEADER)?;
        header
            .append_child(self.text("h3", "", &view.company_name)?.as_ref())
            .map_err(js_error)?;

        let content = self.element("div", class::CONTENT)?;
        let message = self.text("div", class::MESSAGE, &view.greeting)?;

        let agent = self.element("div", class::AGENT)?;
        let info = self.element("div", class::AGENT_INFO)?;
        let status = self.text("div", class::STATUS, view.availability.label())?;
        info.append_child(self.text("div", class::AGENT_NAME, &view.agent_name)?.as_ref())
            .map_err(js_error)?;
        info.append_child(&status).map_err(js_error)?;
        agent
            .append_child(self.avatar(&view.avatar)?.as_ref())
            .map_err(js_error)?;
        agent.append_child(&info).map_err(js_error)?;

        let start_chat = self.text("button", class::START_CHAT, START_CHAT_LABEL)?;
        start_chat.set_attribute("type", "button").map_err(js_error)?;

        for child in [&message, &agent, &start_chat] {
            content.append_child(child).map_err(js_error)?;
        }
        popup.append_child(&header).map_err(js_error)?;
        popup.append_child(&content).map_err(js_error)?;
        root.append_child(&button).map_err(js_error)?;
        root.append_child(&popup).map_err(js_error)?;

        Ok(Mounted {
            root,
            button,
            popup,
            status,
            start_chat,
        })
    }

    /// Append the shared `<style>` element unless the page already has one.
    fn inject_stylesheet(&self) -> Result<(), WidgetError> {
        if self.document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
            return Ok(());
        }
        let style = self.text("style", "", STYLESHEET)?;
        style.set_id(STYLE_ELEMENT_ID);
        let parent: Element = match self.document.head() {
            Some(head) => head.into(),
            None => self
                .document
                .document_element()
                .ok_or_else(|| WidgetError::Unavailable("document has no root element".into()))?,
        };
        parent.append_child(&style).map_err(js_error)?;
        debug!("widget stylesheet injected");
        Ok(())
    }
}

impl WidgetHost for DomHost {
    fn register_styles(&mut self, owner: &str) -> Result<(), WidgetError> {
        let change = STYLES.with(|styles| styles.borrow_mut().acquire(owner));
        if change != StyleChange::Inject {
            return Ok(());
        }
        if let Err(e) = self.inject_stylesheet() {
            STYLES.with(|styles| styles.borrow_mut().release(owner));
            return Err(e);
        }
        Ok(())
    }

    fn release_styles(&mut self, owner: &str) {
        let change = STYLES.with(|styles| styles.borrow_mut().release(owner));
        if change == StyleChange::Remove
            && let Some(style) = self.document.get_element_by_id(STYLE_ELEMENT_ID)
        {
            style.remove();
            debug!("widget stylesheet removed");
        }
    }

    fn mount(&mut self, view: &WidgetView) -> Result<(), WidgetError> {
        let body = self
            .document
            .body()
            .ok_or_else(|| WidgetError::Unavailable("document has no body".into()))?;
        let mounted = self.build(view)?;
        body.append_child(&mounted.root).map_err(js_error)?;
        self.mounted = Some(mounted);
        Ok(())
    }

    fn unmount(&mut self) {
        self.subscriptions.clear();
        if let Some(mounted) = self.mounted.take() {
            mounted.root.remove();
        }
    }

    fn set_popup_open(&mut self, open: bool) {
        let Some(mounted) = &self.mounted else {
            return;
        };
        if let Err(e) = mounted
            .popup
            .class_list()
            .toggle_with_force(class::ACTIVE, open)
        {
            warn!(error = ?e, "failed to toggle popup class");
        }
    }

    fn set_availability(&mut self, availability: Availability) {
        if let Some(mounted) = &self.mounted {
            mounted.status.set_text_content(Some(availability.label()));
        }
    }

    fn open_url(&mut self, url: &str) {
        match self.window.open_with_url_and_target(url, "_blank") {
            Ok(Some(_)) => {},
            Ok(None) => debug!("chat window was blocked by the browser"),
            Err(e) => warn!(error = ?e, "failed to open chat window"),
        }
    }
}
