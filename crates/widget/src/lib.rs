//! Core of the floating WhatsApp chat widget.
//!
//! Everything here is target-independent: business-hours evaluation, the
//! `wa.me` deep link, the popup state machine, and a render model. The
//! [`WidgetHost`] trait is the seam to whatever actually draws the widget.

pub mod controller;
pub mod error;
pub mod hours;
pub mod link;
pub mod state;
pub mod styles;
pub mod view;

pub use {
    controller::{WidgetController, WidgetHost},
    error::WidgetError,
    hours::Availability,
    state::InteractionState,
    styles::{STYLESHEET, StyleChange, StyleRegistry},
    view::{Anchor, AvatarView, WidgetView},
};
