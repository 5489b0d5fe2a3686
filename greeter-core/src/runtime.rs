//! Runtime loop: poll events, map them to actions, dispatch, render.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::event::EventKind;
use crate::poller::{process_raw_event, spawn_event_poller, RawEvent};
use crate::store::{Middleware, Reducer, Store, StoreWithMiddleware};
use crate::Action;

/// Configuration for the event poller.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call.
    pub poll_timeout: Duration,
    /// Sleep between poll cycles.
    pub loop_sleep: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
        }
    }
}

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    /// Actions to enqueue.
    pub actions: Vec<A>,
    /// Whether to force a re-render (UI-local state such as focus changed).
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    /// No actions and no render.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// No actions, but request a render.
    pub fn needs_render() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: true,
        }
    }

    /// Wrap a single action.
    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Create from any iterator of actions, such as a `Component::handle_event` result.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    /// Mark that a render is needed.
    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<A> for EventOutcome<A> {
    fn from(action: A) -> Self {
        Self::action(action)
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        match action {
            Some(action) => Self::action(action),
            None => Self::ignored(),
        }
    }
}

/// Store interface used by `DispatchRuntime`.
pub trait DispatchStore<S, A: Action> {
    /// Dispatch an action and return whether the state changed.
    fn dispatch(&mut self, action: A) -> bool;
    /// Get the current state.
    fn state(&self) -> &S;
}

impl<S, A: Action> DispatchStore<S, A> for Store<S, A> {
    fn dispatch(&mut self, action: A) -> bool {
        Store::dispatch(self, action)
    }

    fn state(&self) -> &S {
        Store::state(self)
    }
}

impl<S, A: Action, M: Middleware<A>> DispatchStore<S, A> for StoreWithMiddleware<S, A, M> {
    fn dispatch(&mut self, action: A) -> bool {
        StoreWithMiddleware::dispatch(self, action)
    }

    fn state(&self) -> &S {
        StoreWithMiddleware::state(self)
    }
}

/// Drives a store from terminal events until a quit action arrives.
pub struct DispatchRuntime<S, A: Action, St: DispatchStore<S, A> = Store<S, A>> {
    store: St,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    poller_config: PollerConfig,
    should_render: bool,
    _state: std::marker::PhantomData<S>,
}

impl<S, A: Action> DispatchRuntime<S, A, Store<S, A>> {
    /// Create a runtime from state + reducer.
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::from_store(Store::new(state, reducer))
    }
}

impl<S, A: Action, St: DispatchStore<S, A>> DispatchRuntime<S, A, St> {
    /// Create a runtime from an existing store.
    pub fn from_store(store: St) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store,
            action_tx,
            action_rx,
            poller_config: PollerConfig::default(),
            should_render: true,
            _state: std::marker::PhantomData,
        }
    }

    /// Configure event polling behavior.
    pub fn with_event_poller(mut self, config: PollerConfig) -> Self {
        self.poller_config = config;
        self
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Clone the action sender.
    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    /// Access the current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Give back the store, e.g. to read the final state after `run`.
    pub fn into_store(self) -> St {
        self.store
    }

    /// Map one event and dispatch the resulting actions in order.
    ///
    /// Actions are dispatched before the next event is mapped, so `map_event`
    /// always sees the state produced by the previous event. Returns `true`
    /// when an action asked to quit; actions after it are dropped.
    pub fn handle_event<FEvent, FQuit, R>(
        &mut self,
        event: &EventKind,
        mut map_event: FEvent,
        mut should_quit: FQuit,
    ) -> bool
    where
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
    {
        let outcome: EventOutcome<A> = map_event(event, self.store.state()).into();
        if outcome.needs_render {
            self.should_render = true;
        }

        for action in outcome.actions {
            if self.handle_action(action, &mut should_quit) {
                return true;
            }
        }
        false
    }

    /// Dispatch one action unless `should_quit` claims it. Returns `true` on quit.
    pub fn handle_action<FQuit>(&mut self, action: A, mut should_quit: FQuit) -> bool
    where
        FQuit: FnMut(&A) -> bool,
    {
        if should_quit(&action) {
            info!(action = %action.name(), "Quit requested");
            return true;
        }

        if self.store.dispatch(action) {
            self.should_render = true;
        }
        false
    }

    /// Run the event/action loop until `should_quit` returns true.
    ///
    /// The quit action itself is not dispatched.
    pub async fn run<B, FRender, FEvent, FQuit, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            self.poller_config.poll_timeout,
            self.poller_config.loop_sleep,
            cancel_token.clone(),
        );

        let result = loop {
            if self.should_render {
                let state = self.store.state();
                if let Err(e) = terminal.draw(|frame| render(frame, frame.area(), state)) {
                    break Err(e);
                }
                self.should_render = false;
            }

            tokio::select! {
                // Enqueued actions apply before the next terminal event is mapped
                biased;

                Some(action) = self.action_rx.recv() => {
                    if self.handle_action(action, &mut should_quit) {
                        break Ok(());
                    }
                }

                Some(raw_event) = event_rx.recv() => {
                    let Some(event) = process_raw_event(raw_event) else {
                        continue;
                    };

                    if self.handle_event(&event, &mut map_event, &mut should_quit) {
                        break Ok(());
                    }
                }

                else => {
                    debug!("All event sources closed");
                    break Ok(());
                }
            }
        };

        cancel_token.cancel();
        result
    }
}
