//! Render model of a mounted widget.
//!
//! Hosts turn a [`WidgetView`] into real elements; nothing here touches the DOM.

use wabubble_config::{Position, WidgetConfig};

use crate::hours::Availability;

/// Class names shared between the stylesheet and the hosts.
pub mod class {
    pub const ROOT: &str = "wa-widget";
    pub const BUTTON: &str = "wa-button";
    pub const POPUP: &str = "wa-popup";
    pub const ACTIVE: &str = "active";
    pub const HEADER: &str = "wa-header";
    pub const CONTENT: &str = "wa-content";
    pub const MESSAGE: &str = "wa-message";
    pub const AGENT: &str = "wa-agent";
    pub const AVATAR: &str = "wa-agent-avatar";
    pub const AVATAR_PLACEHOLDER: &str = "wa-agent-avatar-placeholder";
    pub const AGENT_INFO: &str = "wa-agent-info";
    pub const AGENT_NAME: &str = "wa-agent-name";
    pub const STATUS: &str = "wa-status";
    pub const START_CHAT: &str = "wa-start-chat";
}

/// Custom property carrying the theme colour, set on the widget root.
pub const PRIMARY_COLOR_PROPERTY: &str = "--wa-primary-color";

/// SVG path of the speech-bubble icon on the floating button.
pub const CHAT_ICON_PATH: &str = "M7.9 20A9 9 0 1 0 4 16.1L2 22Z";

pub const START_CHAT_LABEL: &str = "Start Chat";

/// Horizontal edge of the viewport the widget sticks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarView {
    Image { src: String, alt: String },
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    /// DOM id of the root element, unique per instance.
    pub root_id: String,
    pub position: Position,
    pub primary_color: Option<String>,
    pub company_name: String,
    pub greeting: String,
    pub agent_name: String,
    pub avatar: AvatarView,
    pub availability: Availability,
}

impl WidgetView {
    pub fn build(instance_id: &str, config: &WidgetConfig, availability: Availability) -> Self {
        let avatar = match config.avatar() {
            Some(src) => AvatarView::Image {
                src: src.to_string(),
                alt: config.agent_name.clone(),
            },
            None => AvatarView::Placeholder,
        };
        Self {
            root_id: root_id(instance_id),
            position: config.position,
            primary_color: config.primary_color().map(str::to_string),
            company_name: config.company_name.clone(),
            greeting: config.greeting.clone(),
            agent_name: config.agent_name.clone(),
            avatar,
            availability,
        }
    }

    /// Class list of the root element, e.g. `wa-widget bottom-left`.
    pub fn root_classes(&self) -> String {
        format!("{} {}", class::ROOT, self.position.as_str())
    }

    pub fn anchor(&self) -> Anchor {
        match self.position {
            Position::BottomLeft => Anchor::Left,
            Position::BottomRight => Anchor::Right,
        }
    }
}

pub fn root_id(instance_id: &str) -> String {
    format!("{}-{instance_id}", class::ROOT)
}
