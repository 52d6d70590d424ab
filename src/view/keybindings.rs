//! Keyboard bindings.

use super::key_action::FeedAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to viewer actions.
///
/// Vim-style defaults plus the usual navigation keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, FeedAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<FeedAction> {
        self.bindings.get(&key).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyEvent, action: FeedAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);
        let shift = |code| KeyEvent::new(code, KeyModifiers::SHIFT);
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);

        let table = [
            // Scrolling
            (plain(KeyCode::Char('j')), FeedAction::ScrollDown),
            (plain(KeyCode::Down), FeedAction::ScrollDown),
            (plain(KeyCode::Char('k')), FeedAction::ScrollUp),
            (plain(KeyCode::Up), FeedAction::ScrollUp),
            (ctrl('d'), FeedAction::PageDown),
            (plain(KeyCode::PageDown), FeedAction::PageDown),
            (ctrl('u'), FeedAction::PageUp),
            (plain(KeyCode::PageUp), FeedAction::PageUp),
            (plain(KeyCode::Char('g')), FeedAction::ScrollToTop),
            (plain(KeyCode::Home), FeedAction::ScrollToTop),
            (shift(KeyCode::Char('G')), FeedAction::ScrollToBottom),
            (plain(KeyCode::End), FeedAction::ScrollToBottom),
            // Selection
            (plain(KeyCode::Tab), FeedAction::SelectNext),
            (plain(KeyCode::Char('n')), FeedAction::SelectNext),
            (shift(KeyCode::BackTab), FeedAction::SelectPrev),
            (plain(KeyCode::Char('p')), FeedAction::SelectPrev),
            // Feed
            (plain(KeyCode::Char('r')), FeedAction::Refresh),
            (shift(KeyCode::Char('L')), FeedAction::LoadMore),
            // Layout; '+' arrives with or without SHIFT depending on the terminal
            (plain(KeyCode::Char('+')), FeedAction::MoreColumns),
            (shift(KeyCode::Char('+')), FeedAction::MoreColumns),
            (plain(KeyCode::Char('=')), FeedAction::MoreColumns),
            (plain(KeyCode::Char('-')), FeedAction::FewerColumns),
            // Quit
            (plain(KeyCode::Char('q')), FeedAction::Quit),
            (plain(KeyCode::Esc), FeedAction::Quit),
        ];

        Self {
            bindings: table.into_iter().collect(),
        }
    }
}
