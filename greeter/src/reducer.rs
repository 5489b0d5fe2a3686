//! Reducer - pure function: (snapshot, action) -> snapshot
//!
//! - Recognized actions build a fresh `GreetingState` behind a new `Arc`
//! - Everything else returns the input `Arc` untouched
//! - The store compares pointers to decide whether to re-render

use std::sync::Arc;

use crate::action::Action;
use crate::state::GreetingState;

/// The reducer handles all state transitions
pub fn reducer(state: &Arc<GreetingState>, action: Action) -> Arc<GreetingState> {
    match action {
        Action::GreetingStage { greeting } => Arc::new(GreetingState {
            greeting: state.greeting.clone(),
            proposed_greeting: greeting,
        }),

        Action::GreetingCommit => Arc::new(GreetingState {
            greeting: state.proposed_greeting.clone(),
            proposed_greeting: state.proposed_greeting.clone(),
        }),

        Action::Quit | Action::Unknown => Arc::clone(state),
    }
}
