//! Open/closed state of the popup.

/// Two-state popup toggle, closed at start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    open: bool,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the state and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert!(!InteractionState::new().is_open());
    }

    #[test]
    fn even_toggles_restore_odd_toggles_flip() {
        let mut state = InteractionState::new();
        for n in 1..=6 {
            state.toggle();
            assert_eq!(state.is_open(), n % 2 == 1);
        }
    }
}
