//! Voice command path: transcript text -> pantry command.
//!
//! - `normalizer`: pulls the first verb, first noun phrase and first number
//!   out of a finalized transcript using a small, explicit word table.
//! - `command`: maps that triple onto the three supported commands.
//! - `source`: where finalized transcripts come from (injected, swappable).

pub mod command;
pub mod lexicon;
pub mod normalizer;
pub mod source;

pub use command::{Verb, VoiceCommand, interpret, parse_command};
pub use normalizer::{NormalizedTranscript, normalize};
pub use source::{
    ChannelTranscriptSource, LineTranscriptSource, ScriptedTranscriptSource, TranscriptError,
    TranscriptSender, TranscriptSource,
};
