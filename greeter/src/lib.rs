//! Greeter: stage a new greeting, then commit it.
//!
//! The committed greeting is shown as a heading; the input edits a staged
//! proposal that only replaces the heading on commit.

pub mod action;
pub mod components;
pub mod config;
pub mod logging;
pub mod reducer;
pub mod script;
pub mod state;
pub mod ui;

pub use action::Action;
pub use reducer::reducer;
pub use state::GreetingState;
pub use ui::{Focus, GreeterUi};
