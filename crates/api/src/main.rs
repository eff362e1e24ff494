use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;

use pantry_api::app::{self, services::AppServices};
use pantry_api::config::ApiConfig;
use pantry_infra::voice_listener::VoiceListenerHandle;
use pantry_voice::LineTranscriptSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pantry_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    let services = Arc::new(
        AppServices::from_config(&config.store)
            .await
            .context("failed to open the pantry store")?,
    );

    // Initial load; an unreachable store is reported but not fatal.
    if let Err(e) = services.dispatcher.refresh().await {
        tracing::warn!(error = %e, "initial inventory load failed");
    }

    let listener = if config.voice_stdin {
        let source = LineTranscriptSource::new(BufReader::new(tokio::io::stdin()));
        tracing::info!("listening for voice transcripts on stdin");
        Some(VoiceListenerHandle::spawn(source, services.dispatcher.clone()))
    } else {
        None
    };

    let app = app::build_app(services);
    let tcp = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", tcp.local_addr()?);

    axum::serve(tcp, app).await.context("server error")?;

    if let Some(handle) = listener {
        handle.shutdown().await;
    }
    Ok(())
}
