//! Core traits and types for the greeter TUI
//!
//! A small Redux/Elm-style architecture for terminal apps:
//!
//! - **Action**: a typed description of an intended state change
//! - **Store**: owns the current immutable snapshot and applies a reducer
//! - **Component**: renders from props and turns events into actions
//! - **DispatchRuntime**: the event -> action -> dispatch -> render loop
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use greeter_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//!     Noop,
//! }
//!
//! #[derive(Default)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! fn reducer(state: &Arc<Counter>, action: CounterAction) -> Arc<Counter> {
//!     match action {
//!         CounterAction::Increment => Arc::new(Counter { count: state.count + 1 }),
//!         CounterAction::Noop => Arc::clone(state),
//!     }
//! }
//!
//! let mut store = Store::new(Counter::default(), reducer);
//! store.dispatch(CounterAction::Increment);
//! ```

// Lets `#[derive(Action)]` output (`::greeter_core::Action`) resolve inside this crate.
extern crate self as greeter_core;

pub mod action;
pub mod component;
pub mod event;
pub mod keybindings;
pub mod poller;
pub mod runtime;
pub mod store;
pub mod testing;

pub use action::{Action, ActionCategory, ActionSummary};
pub use component::Component;
pub use event::EventKind;
pub use keybindings::{format_key_for_display, parse_key_string, Keybindings};
pub use poller::{process_raw_event, spawn_event_poller, RawEvent};
pub use runtime::{DispatchRuntime, DispatchStore, EventOutcome, PollerConfig};
pub use store::{
    ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
    StoreWithMiddleware, SubscriptionId,
};

/// Derive macro for [`Action`] (and [`ActionCategory`] with `#[action(infer_categories)]`)
pub use greeter_macros::Action;

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionCategory, ActionSummary};
    pub use crate::component::Component;
    pub use crate::event::EventKind;
    pub use crate::keybindings::{format_key_for_display, parse_key_string, Keybindings};
    pub use crate::runtime::{DispatchRuntime, EventOutcome, PollerConfig};
    pub use crate::store::{
        ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
        StoreWithMiddleware,
    };

    // Derive macro
    pub use greeter_macros::Action;

    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
