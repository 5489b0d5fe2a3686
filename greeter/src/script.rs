//! Replaying `--actions` scripts against a store

use greeter_core::DispatchStore;
use tracing::info;

use crate::action::Action;
use crate::state::GreetingState;

/// How a script run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptEnd {
    /// Every action was dispatched
    Completed,
    /// A `Quit` action stopped the script; later actions were skipped
    Quit,
}

/// Dispatch scripted actions in order, stopping at the first `Quit`.
///
/// `Quit` itself is not dispatched, matching the interactive runtime.
pub fn play<St>(store: &mut St, script: impl IntoIterator<Item = Action>) -> ScriptEnd
where
    St: DispatchStore<GreetingState, Action>,
{
    for (index, action) in script.into_iter().enumerate() {
        if matches!(action, Action::Quit) {
            info!(index, "Script requested quit");
            return ScriptEnd::Quit;
        }
        store.dispatch(action);
    }
    ScriptEnd::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::reducer;
    use greeter_core::Store;

    #[test]
    fn test_plays_every_action() {
        let mut store = Store::new(GreetingState::new("Hi", "Hi"), reducer);

        let end = play(
            &mut store,
            vec![Action::stage("Yo"), Action::Unknown, Action::GreetingCommit],
        );

        assert_eq!(end, ScriptEnd::Completed);
        assert_eq!(*store.state(), GreetingState::new("Yo", "Yo"));
    }

    #[test]
    fn test_quit_stops_script() {
        let mut store = Store::new(GreetingState::new("Hi", "Hi"), reducer);

        let end = play(
            &mut store,
            vec![Action::stage("Yo"), Action::Quit, Action::GreetingCommit],
        );

        assert_eq!(end, ScriptEnd::Quit);
        assert_eq!(*store.state(), GreetingState::new("Hi", "Yo"));
    }

    #[test]
    fn test_empty_script() {
        let mut store = Store::new(GreetingState::default(), reducer);
        assert_eq!(play(&mut store, Vec::new()), ScriptEnd::Completed);
        assert_eq!(*store.state(), GreetingState::default());
    }
}
