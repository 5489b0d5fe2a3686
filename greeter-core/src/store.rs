//! Snapshot store with reducer pattern
//!
//! State lives behind an `Arc` and is never mutated in place. A reducer
//! receives the current snapshot and returns the next one; returning the same
//! `Arc` means "nothing changed", which the store detects with `Arc::ptr_eq`.

use crate::{Action, ActionSummary};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A reducer maps the current snapshot and an action to the next snapshot
///
/// Return `Arc::clone(state)` for actions that do not change state. Return a
/// freshly allocated snapshot otherwise.
pub type Reducer<S, A> = fn(&Arc<S>, A) -> Arc<S>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<S> = Box<dyn FnMut(&S)>;

/// Centralized state container with Redux-like reducer pattern
///
/// The store owns the current snapshot and is the only place new snapshots
/// are installed. It is an ordinary value: create one per application (or per
/// test) and pass it where it is needed.
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct Counter {
///     count: i32,
/// }
///
/// fn reducer(state: &Arc<Counter>, action: CounterAction) -> Arc<Counter> {
///     match action {
///         CounterAction::Increment => Arc::new(Counter { count: state.count + 1 }),
///         CounterAction::Noop => Arc::clone(state),
///     }
/// }
///
/// let mut store = Store::new(Counter::default(), reducer);
/// assert!(store.dispatch(CounterAction::Increment));
/// assert_eq!(store.state().count, 1);
/// ```
pub struct Store<S, A: Action> {
    state: Arc<S>,
    reducer: Reducer<S, A>,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    next_subscription: u64,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::from_snapshot(Arc::new(state), reducer)
    }

    /// Create a store around an existing snapshot
    pub fn from_snapshot(state: Arc<S>, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            listeners: Vec::new(),
            next_subscription: 0,
            _marker: PhantomData,
        }
    }

    /// Dispatch an action to the store
    ///
    /// Returns `true` if the reducer produced a new snapshot. Subscribers are
    /// notified only in that case.
    pub fn dispatch(&mut self, action: A) -> bool {
        let next = (self.reducer)(&self.state, action);
        if Arc::ptr_eq(&next, &self.state) {
            return false;
        }

        self.state = next;
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
        true
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a handle to the current snapshot
    ///
    /// The returned `Arc` keeps the snapshot alive after later dispatches and
    /// can be compared with `Arc::ptr_eq` to detect changes.
    pub fn snapshot(&self) -> Arc<S> {
        Arc::clone(&self.state)
    }

    /// Register a listener called with the new state after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }
}

impl<S: fmt::Debug, A: Action> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Store with middleware support
///
/// Wraps a `Store` and lets middleware observe actions before and after they
/// reach the reducer.
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: Store<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    /// Create a new store with middleware
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self::from_store(Store::new(state, reducer), middleware)
    }

    /// Wrap an existing store
    pub fn from_store(store: Store<S, A>, middleware: M) -> Self {
        Self { store, middleware }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = self.store.dispatch(action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a handle to the current snapshot
    pub fn snapshot(&self) -> Arc<S> {
        self.store.snapshot()
    }

    /// Register a change listener on the inner store
    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    /// Remove a change listener
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Get a mutable reference to the middleware
    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }
}

/// Middleware trait for intercepting actions
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer ran
    fn after(&mut self, action: &A, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions through `tracing`
///
/// Logs `ActionSummary::summary`, never the raw `Debug` of the action.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Log both before and after dispatch
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: ActionSummary> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(
                action = %action.name(),
                summary = %action.summary(),
                "Dispatching action"
            );
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                summary = %action.summary(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}

/// Compose multiple middleware into a single middleware
pub struct ComposedMiddleware<A: Action> {
    middlewares: Vec<Box<dyn Middleware<A>>>,
}

impl<A: Action> fmt::Debug for ComposedMiddleware<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposedMiddleware")
            .field("middlewares_count", &self.middlewares.len())
            .finish()
    }
}

impl<A: Action> Default for ComposedMiddleware<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> ComposedMiddleware<A> {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware to the composition
    pub fn add<M: Middleware<A> + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Box::new(middleware));
    }
}

impl<A: Action> Middleware<A> for ComposedMiddleware<A> {
    fn before(&mut self, action: &A) {
        for middleware in &mut self.middlewares {
            middleware.before(action);
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        // Reverse order so the outermost middleware sees the result last
        for middleware in self.middlewares.iter_mut().rev() {
            middleware.after(action, state_changed);
        }
    }
}
