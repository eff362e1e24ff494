//! Command interpretation: normalized fields -> pantry command.
//!
//! One-shot, stateless. Only the first verb and first item of the
//! transcript are looked at; compound utterances ("add eggs and remove milk")
//! act on the first clause only.

use serde::Serialize;

use pantry_core::Quantity;

use crate::normalizer::{NormalizedTranscript, normalize};

/// The verbs that map to an inventory operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Add,
    Remove,
    Check,
}

impl Verb {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "add" => Some(Verb::Add),
            "remove" => Some(Verb::Remove),
            "check" => Some(Verb::Check),
            _ => None,
        }
    }
}

/// Interpreted voice command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum VoiceCommand {
    Add { item: String, quantity: Quantity },
    Remove { item: String },
    Check { item: String },
    Unrecognized,
}

/// Map extracted fields to a command. Remove and check drop the quantity.
pub fn interpret(fields: &NormalizedTranscript) -> VoiceCommand {
    let verb = fields.verb.as_deref().and_then(Verb::from_word);
    match (verb, fields.item.clone()) {
        (Some(Verb::Add), Some(item)) => VoiceCommand::Add {
            item,
            quantity: fields.quantity,
        },
        (Some(Verb::Remove), Some(item)) => VoiceCommand::Remove { item },
        (Some(Verb::Check), Some(item)) => VoiceCommand::Check { item },
        _ => VoiceCommand::Unrecognized,
    }
}

/// Normalize and interpret in one step.
pub fn parse_command(transcript: &str) -> VoiceCommand {
    interpret(&normalize(transcript))
}
