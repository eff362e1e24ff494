//! Finalized-transcript sources.
//!
//! Speech recognition is an injected capability: the pantry only needs "the
//! next finalized transcript, or the end of input". Partial results never
//! reach this boundary.

use std::collections::VecDeque;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("transcript source read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A producer of finalized transcripts, one per utterance.
#[async_trait]
pub trait TranscriptSource: Send {
    /// Next transcript, or `Ok(None)` once the source is exhausted.
    async fn next_transcript(&mut self) -> Result<Option<String>, TranscriptError>;
}

#[async_trait]
impl<S> TranscriptSource for Box<S>
where
    S: TranscriptSource + ?Sized,
{
    async fn next_transcript(&mut self) -> Result<Option<String>, TranscriptError> {
        (**self).next_transcript().await
    }
}

/// Sending half paired with a [`ChannelTranscriptSource`].
pub type TranscriptSender = mpsc::Sender<String>;

/// Transcripts pushed by another task (a recognizer callback, a socket, ...).
#[derive(Debug)]
pub struct ChannelTranscriptSource {
    rx: mpsc::Receiver<String>,
}

impl ChannelTranscriptSource {
    /// Bounded channel; senders wait when `buffer` transcripts are pending.
    pub fn channel(buffer: usize) -> (TranscriptSender, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (tx, Self { rx })
    }
}

#[async_trait]
impl TranscriptSource for ChannelTranscriptSource {
    async fn next_transcript(&mut self) -> Result<Option<String>, TranscriptError> {
        Ok(self.rx.recv().await)
    }
}

/// One transcript per line of text (e.g. stdin piped from a recognizer).
#[derive(Debug)]
pub struct LineTranscriptSource<R> {
    lines: Lines<R>,
}

impl<R> LineTranscriptSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R> TranscriptSource for LineTranscriptSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_transcript(&mut self) -> Result<Option<String>, TranscriptError> {
        Ok(self.lines.next_line().await?)
    }
}

/// Fixed script of transcripts, for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct ScriptedTranscriptSource {
    queue: VecDeque<String>,
}

impl ScriptedTranscriptSource {
    pub fn new<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: transcripts.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl TranscriptSource for ScriptedTranscriptSource {
    async fn next_transcript(&mut self) -> Result<Option<String>, TranscriptError> {
        Ok(self.queue.pop_front())
    }
}
