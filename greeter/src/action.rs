//! Actions - what can happen
//!
//! Naming follows the category convention: `GreetingStage` and
//! `GreetingCommit` land in the `greeting` category; `Quit` and `Unknown`
//! stay uncategorized.
//!
//! Actions also have a JSON form keyed by `type`, used by `--actions` scripts:
//!
//! ```json
//! [
//!   {"type": "STAGE_GREETING", "greeting": "Yo"},
//!   {"type": "COMMIT_GREETING"}
//! ]
//! ```

use greeter_core::ActionSummary;
use serde::{Deserialize, Serialize};

#[derive(greeter_core::Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[action(infer_categories)]
#[serde(tag = "type")]
pub enum Action {
    /// Replace the staged greeting with new input text
    #[serde(rename = "STAGE_GREETING")]
    GreetingStage { greeting: String },

    /// Promote the staged greeting to the committed one. Carries no payload.
    #[serde(rename = "COMMIT_GREETING")]
    GreetingCommit,

    /// Exit the application. The runtime intercepts it; the reducer ignores it.
    #[serde(rename = "QUIT")]
    Quit,

    /// Any action type this version does not know about
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Stage helper for call sites that have `&str` or `String`
    pub fn stage(greeting: impl Into<String>) -> Self {
        Action::GreetingStage {
            greeting: greeting.into(),
        }
    }
}

impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::GreetingStage { greeting } => {
                format!("GreetingStage({} chars)", greeting.chars().count())
            }
            _ => format!("{:?}", self),
        }
    }
}

/// Parse a JSON array of actions
pub fn parse_actions(json: &str) -> serde_json::Result<Vec<Action>> {
    serde_json::from_str(json)
}
