//! Human-readable status lines for the last pantry operation.
//!
//! Pure mapping from an outcome to the text the UI shows. Display timing and
//! message expiry are the UI's concern.

use serde::{Deserialize, Serialize};

use pantry_core::Quantity;

/// What happened to the last user action.
///
/// Item names are carried as the user said or typed them, so the message
/// echoes the user's wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Added { item: String, quantity: Quantity },
    Removed { item: String },
    Found { item: String, quantity: u32 },
    NotFound { item: String },
    Adjusted { item: String, quantity: u32 },
    Depleted { item: String },
    Unrecognized,
    StoreUnavailable,
    InvalidInput { reason: String },
}

/// Appended to the feedback of an action that succeeded when the list
/// could not be reloaded afterwards.
pub const LIST_NOT_RELOADED: &str = "The pantry list could not be reloaded.";

/// Render the feedback line for an outcome.
pub fn report(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Added { item, quantity } => format!("Added {quantity} {item}(s) to the pantry."),
        Outcome::Removed { item } => format!("Removed {item} from the pantry."),
        Outcome::Found { item, quantity } => {
            format!("{item} is in the pantry with a quantity of {quantity}.")
        }
        Outcome::NotFound { item } => format!("{item} is not in the pantry."),
        Outcome::Adjusted { item, quantity } => format!("{item} now has a quantity of {quantity}."),
        Outcome::Depleted { item } => format!("{item} ran out and was removed from the pantry."),
        Outcome::Unrecognized => "Command not recognized. Please try again.".to_string(),
        Outcome::StoreUnavailable => {
            "Could not reach the pantry store. Please try again.".to_string()
        }
        Outcome::InvalidInput { reason } => format!("Invalid input: {reason}"),
    }
}

impl core::fmt::Display for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&report(self))
    }
}
