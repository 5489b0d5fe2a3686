//! Action traits for typed state transitions

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions describe an intended state transition. They should be:
/// - Clone: actions may be logged or handed to middleware and the reducer
/// - Debug: for logging
/// - Send + 'static: actions travel through the runtime's channel
///
/// Use `#[derive(Action)]` to implement this trait for an enum.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Actions grouped into categories by naming convention
///
/// Generated by `#[derive(Action)]` with `#[action(infer_categories)]`.
pub trait ActionCategory: Action {
    /// The category this action belongs to, if any
    fn category(&self) -> Option<&'static str>;
}

/// Short, human-readable description of an action for logs
///
/// The default uses the `Debug` representation. Override it for actions that
/// carry large or sensitive payloads.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
