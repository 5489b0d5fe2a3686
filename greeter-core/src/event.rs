//! Terminal events delivered to components

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// The event payload handed to `Component::handle_event`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// Check if this is a global event that bypasses focus
    ///
    /// Ctrl+C and terminal resizes are always global.
    pub fn is_global(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
            }
            EventKind::Resize(_, _) => true,
            EventKind::Mouse(_) => false,
        }
    }

    /// The position of a left-button press, if this is one
    pub fn left_click(&self) -> Option<(u16, u16)> {
        match self {
            EventKind::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some((*column, *row)),
            _ => None,
        }
    }

    /// Whether this is a left-button press inside `area`
    pub fn is_click_in(&self, area: Rect) -> bool {
        self.left_click()
            .map(|(x, y)| {
                x >= area.x
                    && x < area.x.saturating_add(area.width)
                    && y >= area.y
                    && y < area.y.saturating_add(area.height)
            })
            .unwrap_or(false)
    }
}
