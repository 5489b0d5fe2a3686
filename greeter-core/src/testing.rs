//! Test utilities for greeter-core applications
//!
//! - [`key`], [`char_key`], [`ctrl_key`], [`click`]: build input events
//! - [`TestHarness`]: a store plus a channel capturing emitted actions
//! - [`RenderHarness`]: render into an in-memory terminal and read it back
//! - `assert_emitted!` and friends for checking emitted actions
//!
//! # Example
//!
//! ```ignore
//! use greeter_core::testing::{key, TestHarness};
//!
//! let mut harness = TestHarness::new(AppState::default(), reducer);
//! harness.dispatch(Action::Increment);
//! harness.emit(Action::Decrement);
//!
//! let emitted = harness.drain_emitted();
//! assert_emitted!(emitted, Action::Decrement);
//! ```

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;
use crate::keybindings::parse_key_string;
use crate::store::{Reducer, Store};
use crate::{Action, ActionCategory};

/// Create a `KeyEvent` from a key string.
///
/// # Examples
///
/// ```
/// use greeter_core::testing::key;
/// use crossterm::event::{KeyCode, KeyModifiers};
///
/// let k = key("ctrl+s");
/// assert_eq!(k.code, KeyCode::Char('s'));
/// assert!(k.modifiers.contains(KeyModifiers::CONTROL));
/// ```
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    with_modifiers(c, KeyModifiers::empty())
}

/// Create a `KeyEvent` for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> KeyEvent {
    with_modifiers(c, KeyModifiers::CONTROL)
}

/// Create a `KeyEvent` for a character with Alt modifier.
pub fn alt_key(c: char) -> KeyEvent {
    with_modifiers(c, KeyModifiers::ALT)
}

fn with_modifiers(c: char, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a left-button press at a screen position.
pub fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::empty(),
    }
}

/// One `EventKind::Key` per character, as if `text` had been typed.
pub fn typed(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| EventKind::Key(char_key(c))).collect()
}

/// Test harness: a store plus a channel for emitted actions.
///
/// Dispatching goes through the real store, so reducer and store behavior are
/// both exercised. Actions that components or handlers *emit* are collected
/// separately and can be drained and asserted on.
pub struct TestHarness<S, A: Action> {
    store: Store<S, A>,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a new harness with the given initial state and reducer.
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            store: Store::new(state, reducer),
            tx,
            rx,
        }
    }

    /// Dispatch an action to the store. Returns whether state changed.
    pub fn dispatch(&mut self, action: A) -> bool {
        self.store.dispatch(action)
    }

    /// Dispatch every action in order. Returns how many changed state.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = A>) -> usize {
        actions
            .into_iter()
            .filter(|action| self.store.dispatch(action.clone()))
            .count()
    }

    /// Current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// The underlying store.
    pub fn store_mut(&mut self) -> &mut Store<S, A> {
        &mut self.store
    }

    /// Get a clone of the action sender for passing to handlers.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit an action (simulates what a component or handler would do).
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Emit every action produced by a component's `handle_event`.
    pub fn emit_all(&self, actions: impl IntoIterator<Item = A>) {
        for action in actions {
            self.emit(action);
        }
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Drain emitted actions and dispatch them to the store, in order.
    ///
    /// Returns the drained actions.
    pub fn flush(&mut self) -> Vec<A> {
        let actions = self.drain_emitted();
        for action in &actions {
            self.store.dispatch(action.clone());
        }
        actions
    }
}

impl<S, A: ActionCategory> TestHarness<S, A> {
    /// Drain emitted actions of one category; the rest stay queued.
    pub fn drain_category(&mut self, category: &str) -> Vec<A> {
        let (matching, rest): (Vec<A>, Vec<A>) = self
            .drain_emitted()
            .into_iter()
            .partition(|action| action.category() == Some(category));

        for action in rest {
            let _ = self.tx.send(action);
        }

        matching
    }
}

/// Renders into a ratatui `TestBackend` for assertions on screen contents.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with a terminal of the given size.
    ///
    /// # Panics
    ///
    /// Panics if the test backend cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test backend never fails");
        Self { terminal }
    }

    /// Render one frame and return the resulting buffer.
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) -> Buffer {
        self.terminal
            .draw(draw)
            .expect("test backend never fails")
            .buffer
            .clone()
    }

    /// Render one frame and return its text, one line per row, styles dropped.
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        buffer_to_string_plain(&self.render(draw))
    }

    /// Cursor position reported by the backend after the last draw.
    pub fn cursor_position(&mut self) -> Option<(u16, u16)> {
        self.terminal
            .get_cursor_position()
            .ok()
            .map(|pos| (pos.x, pos.y))
    }
}

/// Convert a buffer to plain text, trimming trailing spaces on each row.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    (area.y..area.y + area.height)
        .map(|y| {
            let row: String = (area.x..area.x + area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assert that a specific action was emitted.
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, Action::GreetingCommit);
/// assert_emitted!(actions, Action::GreetingStage { greeting } if greeting == "Yo");
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}
