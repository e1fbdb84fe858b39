//! The widget controller and the host seam it renders through.

use {
    chrono::{Local, NaiveDateTime},
    tracing::{debug, info},
    uuid::Uuid,
};

use wabubble_config::WidgetConfig;

use crate::{
    error::WidgetError,
    hours::{self, Availability},
    link,
    state::InteractionState,
    view::WidgetView,
};

/// Environment a widget is rendered into.
///
/// The browser implementation drives the DOM; tests use a recording fake.
pub trait WidgetHost {
    /// Register `owner` for the shared stylesheet, injecting it if needed.
    fn register_styles(&mut self, owner: &str) -> Result<(), WidgetError>;

    /// Release `owner`'s registration, removing the stylesheet after the last one.
    fn release_styles(&mut self, owner: &str);

    /// Create the widget's elements. The popup starts hidden.
    fn mount(&mut self, view: &WidgetView) -> Result<(), WidgetError>;

    /// Remove everything `mount` created, including event subscriptions.
    fn unmount(&mut self);

    fn set_popup_open(&mut self, open: bool);

    fn set_availability(&mut self, availability: Availability);

    /// Open `url` in a new browsing context.
    fn open_url(&mut self, url: &str);

    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// One mounted widget: fixed configuration plus open/closed state.
pub struct WidgetController<H: WidgetHost> {
    id: String,
    config: WidgetConfig,
    state: InteractionState,
    host: H,
    mounted: bool,
}

impl<H: WidgetHost> WidgetController<H> {
    /// Mount a widget with a fresh instance id.
    pub fn mount(config: WidgetConfig, host: H) -> Result<Self, WidgetError> {
        Self::mount_with_id(Uuid::new_v4().to_string(), config, host)
    }

    pub fn mount_with_id(
        id: impl Into<String>,
        config: WidgetConfig,
        mut host: H,
    ) -> Result<Self, WidgetError> {
        let id = id.into();
        host.register_styles(&id)?;

        let availability = Availability::at(&config.business_hours, &host.now());
        let view = WidgetView::build(&id, &config, availability);
        if let Err(e) = host.mount(&view) {
            host.release_styles(&id);
            return Err(e);
        }

        info!(
            instance = %id,
            position = %config.position,
            status = availability.label(),
            "widget mounted"
        );
        Ok(Self {
            id,
            config,
            state: InteractionState::new(),
            host,
            mounted: true,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Evaluated against the host clock on every call.
    pub fn is_business_hours(&self) -> bool {
        hours::is_open_at(&self.config.business_hours, &self.host.now())
    }

    /// Flip the popup and return the new state. Opening refreshes the
    /// availability label. Ignored once unmounted.
    pub fn toggle_popup(&mut self) -> bool {
        if !self.mounted {
            debug!(instance = %self.id, "toggle ignored, widget unmounted");
            return self.state.is_open();
        }
        let open = self.state.toggle();
        if open {
            let availability = Availability::from(self.is_business_hours());
            self.host.set_availability(availability);
        }
        self.host.set_popup_open(open);
        debug!(instance = %self.id, open, "popup toggled");
        open
    }

    /// Pointer interaction outside the widget: closes an open popup.
    pub fn handle_outside_click(&mut self) {
        if self.state.is_open() {
            self.toggle_popup();
        }
    }

    pub fn chat_link(&self) -> String {
        link::chat_link(&self.config.phone_number, &self.config.greeting)
    }

    /// Open the deep link in a new browsing context and return it.
    pub fn start_chat(&mut self) -> String {
        let url = self.chat_link();
        if self.mounted {
            info!(instance = %self.id, "starting chat");
            self.host.open_url(&url);
        } else {
            debug!(instance = %self.id, "start chat ignored, widget unmounted");
        }
        url
    }

    /// Tear the widget down. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.host.unmount();
        self.host.release_styles(&self.id);
        self.mounted = false;
        info!(instance = %self.id, "widget unmounted");
    }
}

impl<H: WidgetHost> Drop for WidgetController<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            styles::{StyleChange, StyleRegistry},
            view::Anchor,
        },
        chrono::NaiveDate,
        serde_json::json,
        std::{cell::RefCell, rc::Rc},
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        InjectStyles,
        RemoveStyles,
        Mount(WidgetView),
        Unmount,
        Popup(bool),
        Status(Availability),
        Open(String),
    }

    /// Records every host call into a shared log.
    struct FakeHost {
        log: Rc<RefCell<Vec<Event>>>,
        styles: Rc<RefCell<StyleRegistry>>,
        now: Rc<RefCell<NaiveDateTime>>,
        fail_mount: bool,
    }

    impl FakeHost {
        fn new(now: NaiveDateTime) -> Self {
            Self {
                log: Rc::default(),
                styles: Rc::default(),
                now: Rc::new(RefCell::new(now)),
                fail_mount: false,
            }
        }

        fn sibling(&self) -> Self {
            Self {
                log: Rc::clone(&self.log),
                styles: Rc::clone(&self.styles),
                now: Rc::clone(&self.now),
                fail_mount: false,
            }
        }

        fn events(&self) -> Vec<Event> {
            self.log.borrow().clone()
        }
    }

    impl WidgetHost for FakeHost {
        fn register_styles(&mut self, owner: &str) -> Result<(), WidgetError> {
            if self.styles.borrow_mut().acquire(owner) == StyleChange::Inject {
                self.log.borrow_mut().push(Event::InjectStyles);
            }
            Ok(())
        }

        fn release_styles(&mut self, owner: &str) {
            if self.styles.borrow_mut().release(owner) == StyleChange::Remove {
                self.log.borrow_mut().push(Event::RemoveStyles);
            }
        }

        fn mount(&mut self, view: &WidgetView) -> Result<(), WidgetError> {
            if self.fail_mount {
                return Err(WidgetError::Host("no body".into()));
            }
            self.log.borrow_mut().push(Event::Mount(view.clone()));
            Ok(())
        }

        fn unmount(&mut self) {
            self.log.borrow_mut().push(Event::Unmount);
        }

        fn set_popup_open(&mut self, open: bool) {
            self.log.borrow_mut().push(Event::Popup(open));
        }

        fn set_availability(&mut self, availability: Availability) {
            self.log.borrow_mut().push(Event::Status(availability));
        }

        fn open_url(&mut self, url: &str) {
            self.log.borrow_mut().push(Event::Open(url.to_string()));
        }

        fn now(&self) -> NaiveDateTime {
            *self.now.borrow()
        }
    }

    /// 2024-01-01 was a Monday.
    fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn mounted_view(events: &[Event]) -> WidgetView {
        events
            .iter()
            .find_map(|e| match e {
                Event::Mount(view) => Some(view.clone()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_mount_registers_styles_then_mounts() {
        let host = FakeHost::new(monday_at(10, 0));
        let log = host.sibling();
        let widget = WidgetController::mount_with_id("w1", WidgetConfig::default(), host).unwrap();

        let events = log.events();
        assert_eq!(events[0], Event::InjectStyles);
        let view = mounted_view(&events);
        assert_eq!(view.root_id, "wa-widget-w1");
        assert_eq!(view.availability, Availability::Online);
        assert!(!widget.is_open());
        assert!(widget.is_mounted());
    }

    #[test]
    fn test_default_position_anchors_right() {
        let host = FakeHost::new(monday_at(10, 0));
        let log = host.sibling();
        let _widget = WidgetController::mount(WidgetConfig::default(), host).unwrap();
        assert_eq!(mounted_view(&log.events()).anchor(), Anchor::Right);
    }

    #[test]
    fn test_bottom_left_anchors_left() {
        let host = FakeHost::new(monday_at(10, 0));
        let log = host.sibling();
        let config = WidgetConfig::merged(&json!({ "position": "bottom-left" }));
        let _widget = WidgetController::mount(config, host).unwrap();
        assert_eq!(mounted_view(&log.events()).anchor(), Anchor::Left);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let host = FakeHost::new(monday_at(10, 0));
        let log = host.sibling();
        let mut widget = WidgetController::mount(WidgetConfig::default(), host).unwrap();

        assert!(widget.toggle_popup());
        assert!(!widget.toggle_popup());
        assert!(!widget.is_open());
        assert!(widget.toggle_popup());
        assert!(widget.is_open());

        let popups: Vec<_> = log
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::Popup(_)))
            .collect();
        assert_eq!(popups, vec![
            Event::Popup(true),
            Event::Popup(false),
            Event::Popup(true)
        ]);
    }

    #[test]
    fn test_opening_refreshes_status() {
        let host = FakeHost::new(monday_at(16, 59));
        let log = host.sibling();
        let mut widget = WidgetController::mount(WidgetConfig::default(), host).unwrap();
        assert_eq!(mounted_view(&log.events()).availability, Availability::Online);

        *log.now.borrow_mut() = monday_at(17, 1);
        assert!(!widget.is_business_hours());
        widget.toggle_popup();
        assert!(log.events().contains(&Event::Status(Availability::Away)));
    }

    #[test]
    fn test_outside_click_closes_only_when_open() {
        let host = FakeHost::new(monday_at(10, 0));
        let log = host.sibling();
        let mut widget = WidgetController::mount(WidgetConfig::default(), host).unwrap();

        widget.handle_outside_click();
        assert!(!widget.is_open());
        assert!(!log.events().iter().any(|e| matches!(e, Event::Popup(_))));

        widget.toggle_popup();
        widget.handle_outside_click();
        assert!(!widget.is_open());
        assert_eq!(log.events().last(), Some(&Event::Popup(false)));
    }

    #[test]
    fn test_start_chat_opens_deep_link() {
        let host = FakeHost::new(monday_at(10, 0));
        let log = host.sibling();
        let config = WidgetConfig::merged(&json!({
            "phoneNumber": "+1 (555) 123-4567",
            "greeting": "Hi there"
        }));
        let mut widget = WidgetController::mount(config, host).unwrap();

        let url = widget.start_chat();
        assert_eq!(url, "https://wa.me/15551234567?text=Hi%20there");
        assert_eq!(log.events().last(), Some(&Event::Open(url)));
    }

    #[test]
    fn test_start_chat_with_empty_number() {
        let host = FakeHost::new(monday_at(10, 0));
        let mut widget = WidgetController::mount(WidgetConfig::default(), host).unwrap();
        assert!(widget.start_chat().starts_with("https://wa.me/?text="));
    }

    #[test]
    fn test_styles_shared_between_instances() {
        let host = FakeHost::new(monday_at(10, 0));
        let log = host.sibling();
        let mut first = WidgetController::mount(WidgetConfig::default(), host).unwrap();
        let mut second = WidgetController::mount(WidgetConfig::default(), log.sibling()).unwrap();

        let injected = |events: &[Event]| events.iter().filter(|e| **e == Event::InjectStyles).count();
        let removed = |events: &[Event]| events.iter().filter(|e| **e == Event::RemoveStyles).count();
        assert_eq!(injected(&log.events()), 1);

        first.unmount();
        assert_eq!(removed(&log.events()), 0);
        second.unmount();
        assert_eq!(removed(&log.events()), 1);
        assert!(log.styles.borrow().is_empty());
    }

    #[test]
    fn test_unmount_is_idempotent_and_stops_interaction() {
        let host = FakeHost::new(monday_at(10, 0));
        let log = host.sibling();
        let mut widget = WidgetController::mount(WidgetConfig::default(), host).unwrap();

        widget.unmount();
        widget.unmount();
        let unmounts = log.events().iter().filter(|e| **e == Event::Unmount).count();
        assert_eq!(unmounts, 1);

        let before = log.events().len();
        assert!(!widget.toggle_popup());
        widget.start_chat();
        assert_eq!(log.events().len(), before);
    }

    #[test]
    fn test_drop_unmounts() {
        let host = FakeHost::new(monday_at(10, 0));
        let log = host.sibling();
        drop(WidgetController::mount(WidgetConfig::default(), host).unwrap());
        assert!(log.events().contains(&Event::Unmount));
        assert!(log.styles.borrow().is_empty());
    }

    #[test]
    fn test_failed_mount_releases_styles() {
        let mut host = FakeHost::new(monday_at(10, 0));
        host.fail_mount = true;
        let log = host.sibling();
        let result = WidgetController::mount(WidgetConfig::default(), host);
        assert!(matches!(result, Err(WidgetError::Host(_))));
        assert!(log.styles.borrow().is_empty());
        assert_eq!(log.events(), vec![Event::InjectStyles, Event::RemoveStyles]);
    }
}
