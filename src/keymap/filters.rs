//! Key filters that gate field transitions
//!
//! Two sets drive the state machine: navigation keys never surface as a
//! CHANGE, and focus keys are the only keyup keys that re-apply focus.

use super::types::KeyCode;

/// Keys that move around without changing content (plus the no-key sentinel)
pub const NAVIGATION_KEYS: &[KeyCode] = &[
    KeyCode::Down,
    KeyCode::Up,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::PrimaryButton,
    KeyCode::Tab,
    KeyCode::Shift,
    KeyCode::Alt,
    KeyCode::Escape,
];

/// Keys whose keyup re-applies the focus transition
pub const FOCUS_KEYS: &[KeyCode] = &[
    KeyCode::Meta,
    KeyCode::Down,
    KeyCode::Up,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Enter,
    KeyCode::PrimaryButton,
    KeyCode::Backspace,
];

/// A named key set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFilter {
    Navigation,
    Focus,
}

impl KeyFilter {
    pub fn keys(self) -> &'static [KeyCode] {
        match self {
            KeyFilter::Navigation => NAVIGATION_KEYS,
            KeyFilter::Focus => FOCUS_KEYS,
        }
    }

    pub fn matches(self, key: KeyCode) -> bool {
        self.keys().contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_keys() {
        assert!(KeyFilter::Navigation.matches(KeyCode::Left));
        assert!(KeyFilter::Navigation.matches(KeyCode::PrimaryButton));
        assert!(!KeyFilter::Navigation.matches(KeyCode::Char('a')));
        assert!(!KeyFilter::Navigation.matches(KeyCode::Backspace));
        assert!(!KeyFilter::Navigation.matches(KeyCode::Enter));
    }

    #[test]
    fn test_focus_keys() {
        assert!(KeyFilter::Focus.matches(KeyCode::Enter));
        assert!(KeyFilter::Focus.matches(KeyCode::Backspace));
        assert!(!KeyFilter::Focus.matches(KeyCode::Char('a')));
        assert!(!KeyFilter::Focus.matches(KeyCode::Tab));
    }
}
