//! User-action pipeline (application-level orchestration).
//!
//! Every user action (form submit, +/- button, remove button, finalized voice
//! transcript) runs the same sequence:
//!
//! ```text
//! action
//!   ↓
//! 1. Validate input / interpret transcript
//!   ↓
//! 2. Mutate through the inventory store adapter (read, then write/delete)
//!   ↓
//! 3. Refresh the list projection with a full scan
//!   ↓
//! 4. Record the feedback line for the UI
//! ```
//!
//! When step 3 fails after a successful mutation the action still succeeds,
//! but the feedback line says the list could not be reloaded and the result
//! is marked stale.
//!
//! The list held here is a projection of the store: it is only ever replaced
//! wholesale from `list()`, never patched from a partial operation result.
//! Failures never escape as panics; they are turned into feedback lines and
//! returned to the caller for status mapping.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use pantry_core::{DomainError, ItemName, Quantity};
use pantry_inventory::{ExpiryPolicy, InventoryItem, LIST_NOT_RELOADED, Outcome, report};
use pantry_voice::{VoiceCommand, parse_command};

use crate::document_store::{DocumentStore, StoreError};
use crate::inventory_store::{InventoryStore, InventoryStoreError, Mutation};

#[derive(Debug, Error)]
pub enum DispatchError {
    /// User input was rejected before reaching the store.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant would have been broken (e.g. quantity overflow).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The document store failed (unreachable, undecodable data, ...).
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for DispatchError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => DispatchError::Validation(msg),
            DomainError::InvariantViolation(msg) => DispatchError::InvariantViolation(msg),
        }
    }
}

impl From<InventoryStoreError> for DispatchError {
    fn from(value: InventoryStoreError) -> Self {
        match value {
            InventoryStoreError::Store(e) => DispatchError::Store(e),
            InventoryStoreError::Domain(e) => e.into(),
        }
    }
}

impl DispatchError {
    /// The user-facing outcome this failure degrades to.
    pub fn outcome(&self) -> Outcome {
        match self {
            DispatchError::Validation(reason) | DispatchError::InvariantViolation(reason) => {
                Outcome::InvalidInput {
                    reason: reason.clone(),
                }
            }
            DispatchError::Store(_) => Outcome::StoreUnavailable,
        }
    }
}

/// Result of one successful action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub outcome: Outcome,
    pub feedback: String,
    /// The action went through but the list could not be reloaded, so the
    /// snapshot still shows the previous listing.
    pub list_stale: bool,
}

/// Result of one voice transcript. Always produced, even on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceReport {
    pub transcript: String,
    pub command: VoiceCommand,
    pub outcome: Outcome,
    pub feedback: String,
}

/// What the UI renders: the current list and the latest feedback line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PantrySnapshot {
    pub items: Vec<InventoryItem>,
    pub feedback: Option<String>,
}

/// Runs user actions against the store and keeps the UI-facing state.
#[derive(Debug)]
pub struct PantryDispatcher<S> {
    store: InventoryStore<S>,
    items: RwLock<Vec<InventoryItem>>,
    feedback: RwLock<Option<String>>,
}

impl<S> PantryDispatcher<S>
where
    S: DocumentStore,
{
    pub fn new(store: InventoryStore<S>) -> Self {
        Self {
            store,
            items: RwLock::new(Vec::new()),
            feedback: RwLock::new(None),
        }
    }

    /// Current projection and feedback, without touching the store.
    pub fn snapshot(&self) -> PantrySnapshot {
        PantrySnapshot {
            items: self.items.read().map(|i| i.clone()).unwrap_or_default(),
            feedback: self.feedback.read().ok().and_then(|f| f.clone()),
        }
    }

    pub fn feedback(&self) -> Option<String> {
        self.feedback.read().ok().and_then(|f| f.clone())
    }

    /// Replace the projection with a fresh scan of the store.
    pub async fn refresh(&self) -> Result<Vec<InventoryItem>, DispatchError> {
        let items = self.store.list().await?;
        if let Ok(mut guard) = self.items.write() {
            *guard = items.clone();
        }
        Ok(items)
    }

    /// Manual "Add Item" form: typed name, typed quantity, optional date.
    ///
    /// The quantity text is validated here; a non-numeric or non-positive
    /// value never reaches the store.
    pub async fn add_item(
        &self,
        name: &str,
        quantity: &str,
        expiration_date: Option<DateTime<Utc>>,
    ) -> Result<ActionResult, DispatchError> {
        let res = self
            .apply_add(name, quantity, ExpiryPolicy::Replace(expiration_date))
            .await;
        self.finish(res).await
    }

    /// "+" button on a list row.
    pub async fn increment(&self, name: &str) -> Result<ActionResult, DispatchError> {
        let res = self.apply_increment(name).await;
        self.finish(res).await
    }

    /// "-" button on a list row.
    pub async fn decrement(&self, name: &str) -> Result<ActionResult, DispatchError> {
        let res = self.apply_decrement(name).await;
        self.finish(res).await
    }

    /// "Remove" button on a list row (also the voice `remove` command).
    pub async fn remove(&self, name: &str) -> Result<ActionResult, DispatchError> {
        let res = self.apply_remove(name).await;
        self.finish(res).await
    }

    /// Execute an interpreted voice command.
    pub async fn execute(&self, command: &VoiceCommand) -> Result<ActionResult, DispatchError> {
        match command {
            VoiceCommand::Add { item, quantity } => {
                let res = self
                    .apply_voice_add(item, *quantity)
                    .await;
                self.finish(res).await
            }
            VoiceCommand::Remove { item } => self.remove(item).await,
            VoiceCommand::Check { item } => {
                let res = self.apply_check(item).await;
                self.finish(res).await
            }
            VoiceCommand::Unrecognized => {
                let outcome = Outcome::Unrecognized;
                let feedback = self.record(report(&outcome));
                Ok(ActionResult {
                    outcome,
                    feedback,
                    list_stale: false,
                })
            }
        }
    }

    /// Full voice path for one finalized transcript.
    pub async fn handle_transcript(&self, transcript: &str) -> VoiceReport {
        let transcript = transcript.trim();
        let command = parse_command(transcript);
        tracing::info!(transcript, ?command, "voice command");

        let (outcome, feedback) = match self.execute(&command).await {
            Ok(done) => (done.outcome, done.feedback),
            Err(e) => {
                let outcome = e.outcome();
                let feedback = report(&outcome);
                (outcome, feedback)
            }
        };

        VoiceReport {
            transcript: transcript.to_string(),
            command,
            outcome,
            feedback,
        }
    }

    async fn apply_add(
        &self,
        name: &str,
        quantity: &str,
        expiry: ExpiryPolicy,
    ) -> Result<Outcome, DispatchError> {
        let item = ItemName::new(name)?;
        let quantity = Quantity::parse(quantity)?;
        self.store.add_or_increment(&item, quantity, expiry).await?;
        Ok(Outcome::Added {
            item: item.to_string(),
            quantity,
        })
    }

    async fn apply_voice_add(&self, spoken: &str, quantity: Quantity) -> Result<Outcome, DispatchError> {
        let item = ItemName::new(spoken)?;
        self.store
            .add_or_increment(&item, quantity, ExpiryPolicy::Preserve)
            .await?;
        Ok(Outcome::Added {
            item: spoken.to_string(),
            quantity,
        })
    }

    async fn apply_increment(&self, name: &str) -> Result<Outcome, DispatchError> {
        let item = ItemName::new(name)?;
        let mutation = self.store.increment(&item).await?;
        Ok(adjusted(&item, mutation))
    }

    async fn apply_decrement(&self, name: &str) -> Result<Outcome, DispatchError> {
        let item = ItemName::new(name)?;
        let mutation = self.store.decrement(&item).await?;
        Ok(adjusted(&item, mutation))
    }

    async fn apply_remove(&self, name: &str) -> Result<Outcome, DispatchError> {
        let item = ItemName::new(name)?;
        self.store.remove(&item).await?;
        Ok(Outcome::Removed {
            item: item.to_string(),
        })
    }

    /// Whether an item is on the shelf, by case-insensitive name.
    async fn apply_check(&self, spoken: &str) -> Result<Outcome, DispatchError> {
        let found = self.store.lookup(spoken).await?;
        Ok(match found {
            Some(i) => Outcome::Found {
                item: spoken.to_string(),
                quantity: i.quantity(),
            },
            None => Outcome::NotFound {
                item: spoken.to_string(),
            },
        })
    }

    async fn finish(
        &self,
        res: Result<Outcome, DispatchError>,
    ) -> Result<ActionResult, DispatchError> {
        match res {
            Ok(outcome) => {
                let list_stale = match self.refresh().await {
                    Ok(_) => false,
                    Err(e) => {
                        tracing::warn!(error = %e, "list refresh after action failed");
                        true
                    }
                };
                let mut line = report(&outcome);
                if list_stale {
                    line = format!("{line} {LIST_NOT_RELOADED}");
                }
                let feedback = self.record(line);
                Ok(ActionResult {
                    outcome,
                    feedback,
                    list_stale,
                })
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&self, err: DispatchError) -> DispatchError {
        match &err {
            DispatchError::Store(e) => tracing::error!(error = %e, "pantry store operation failed"),
            other => tracing::info!(error = %other, "pantry action rejected"),
        }
        self.record(report(&err.outcome()));
        err
    }

    fn record(&self, line: String) -> String {
        if let Ok(mut guard) = self.feedback.write() {
            *guard = Some(line.clone());
        }
        line
    }
}

fn adjusted(item: &ItemName, mutation: Mutation) -> Outcome {
    match mutation {
        Mutation::Created(i) | Mutation::Updated(i) => Outcome::Adjusted {
            item: item.to_string(),
            quantity: i.quantity(),
        },
        Mutation::Deleted => Outcome::Depleted {
            item: item.to_string(),
        },
        Mutation::Missing => Outcome::NotFound {
            item: item.to_string(),
        },
    }
}
