//! Application state - single source of truth
//!
//! Snapshots are immutable. The reducer builds a new `GreetingState` for every
//! change and the store swaps it in; views only ever see `&GreetingState`.

use serde::{Deserialize, Serialize};

/// Committed greeting shown before anything is committed
pub const DEFAULT_GREETING: &str = "Hello";

/// Staged greeting before anything is typed
pub const DEFAULT_PROPOSED_GREETING: &str = "";

/// The committed greeting and the candidate waiting to replace it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingState {
    /// What the heading shows. Changes only on commit.
    pub greeting: String,

    /// What the input holds. Changes only on stage.
    pub proposed_greeting: String,
}

impl GreetingState {
    pub fn new(greeting: impl Into<String>, proposed_greeting: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
            proposed_greeting: proposed_greeting.into(),
        }
    }

    /// Whether committing now would change the heading
    pub fn has_pending_change(&self) -> bool {
        self.greeting != self.proposed_greeting
    }
}

impl Default for GreetingState {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING, DEFAULT_PROPOSED_GREETING)
    }
}
