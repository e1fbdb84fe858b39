//! Shared stylesheet and its per-instance registration.
//!
//! Every mounted widget registers under its instance id. The stylesheet is
//! injected when the first owner registers and removed when the last one
//! releases, so mounting several widgets never duplicates it.

use std::collections::HashSet;

use tracing::debug;

pub const STYLESHEET: &str = include_str!("widget.css");

/// DOM id of the injected `<style>` element.
pub const STYLE_ELEMENT_ID: &str = "wa-widget-styles";

/// What the host has to do after a registry update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleChange {
    Inject,
    Remove,
    Unchanged,
}

#[derive(Debug, Default)]
pub struct StyleRegistry {
    owners: HashSet<String>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `owner`. Registering twice is a no-op.
    pub fn acquire(&mut self, owner: &str) -> StyleChange {
        let first = self.owners.is_empty();
        if !self.owners.insert(owner.to_string()) {
            return StyleChange::Unchanged;
        }
        debug!(owner, owners = self.owners.len(), "stylesheet registered");
        if first {
            StyleChange::Inject
        } else {
            StyleChange::Unchanged
        }
    }

    /// Release `owner`. Releasing an unknown owner is a no-op.
    pub fn release(&mut self, owner: &str) -> StyleChange {
        if !self.owners.remove(owner) {
            return StyleChange::Unchanged;
        }
        debug!(owner, owners = self.owners.len(), "stylesheet released");
        if self.owners.is_empty() {
            StyleChange::Remove
        } else {
            StyleChange::Unchanged
        }
    }

    pub fn is_registered(&self, owner: &str) -> bool {
        self.owners.contains(owner)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_owner_injects_last_owner_removes() {
        let mut registry = StyleRegistry::new();
        assert_eq!(registry.acquire("a"), StyleChange::Inject);
        assert_eq!(registry.acquire("b"), StyleChange::Unchanged);
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.release("a"), StyleChange::Unchanged);
        assert!(!registry.is_registered("a"));
        assert_eq!(registry.release("b"), StyleChange::Remove);
        assert!(registry.is_empty());
    }

    #[test]
    fn repeated_acquire_and_release_are_idempotent() {
        let mut registry = StyleRegistry::new();
        assert_eq!(registry.acquire("a"), StyleChange::Inject);
        assert_eq!(registry.acquire("a"), StyleChange::Unchanged);
        assert_eq!(registry.release("a"), StyleChange::Remove);
        assert_eq!(registry.release("a"), StyleChange::Unchanged);
        assert_eq!(registry.release("never"), StyleChange::Unchanged);
    }

    #[test]
    fn reinjects_after_full_teardown() {
        let mut registry = StyleRegistry::new();
        registry.acquire("a");
        registry.release("a");
        assert_eq!(registry.acquire("b"), StyleChange::Inject);
    }

    #[test]
    fn stylesheet_covers_both_corners() {
        assert!(STYLESHEET.contains(".wa-widget.bottom-left"));
        assert!(STYLESHEET.contains(".wa-widget.bottom-right"));
        assert!(STYLESHEET.contains(".wa-popup.active"));
    }
}
