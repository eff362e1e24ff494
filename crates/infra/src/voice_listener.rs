use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use pantry_voice::{TranscriptError, TranscriptSource};

use crate::command_dispatcher::PantryDispatcher;
use crate::document_store::DocumentStore;

/// Feed every finalized transcript from `source` through the dispatcher.
///
/// Blank transcripts are skipped. Returns the number of transcripts handled
/// once the source ends, or the first source error.
pub async fn run_voice_listener<S, T>(
    mut source: T,
    dispatcher: &PantryDispatcher<S>,
) -> Result<usize, TranscriptError>
where
    S: DocumentStore,
    T: TranscriptSource,
{
    let mut handled = 0usize;
    while let Some(transcript) = source.next_transcript().await? {
        if transcript.trim().is_empty() {
            continue;
        }
        let report = dispatcher.handle_transcript(&transcript).await;
        info!(
            transcript = %report.transcript,
            feedback = %report.feedback,
            "voice transcript handled"
        );
        handled += 1;
    }
    Ok(handled)
}

/// Handle to a listener running on its own task.
#[derive(Debug)]
pub struct VoiceListenerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    join: JoinHandle<Result<usize, TranscriptError>>,
}

impl VoiceListenerHandle {
    /// Spawn [`run_voice_listener`] on the current runtime.
    pub fn spawn<S, T>(source: T, dispatcher: Arc<PantryDispatcher<S>>) -> Self
    where
        S: DocumentStore + 'static,
        T: TranscriptSource + 'static,
    {
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let join = tokio::spawn(async move {
            tokio::select! {
                res = run_voice_listener(source, &dispatcher) => {
                    if let Err(e) = &res {
                        warn!(error = %e, "voice listener stopped on source error");
                    }
                    res
                }
                _ = shutdown_rx => Ok(0),
            }
        });

        Self {
            shutdown: Some(shutdown_tx),
            join,
        }
    }

    /// Wait for the source to end on its own.
    pub async fn join(self) -> Result<usize, TranscriptError> {
        self.join
            .await
            .unwrap_or_else(|e| Err(TranscriptError::Io(std::io::Error::other(e))))
    }

    /// Stop listening and wait for the task to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.join.await;
    }
}
