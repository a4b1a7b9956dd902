//! `run` command implementation.

use anyhow::{Context, Result};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{info, warn};

use contracts::{BusError, BusTransport, TransportType};
use transports::{LogTransport, RecordingTransport, UdpTransport};
use writer::{BusMessageWriter, CancelSignal};

use crate::cli::RunArgs;
use crate::producer::{drive_producers, LoadSettings};

/// Records publish outcomes to the metrics facade around any transport
struct MeteredTransport<T> {
    inner: Arc<T>,
}

impl<T: BusTransport + Send + Sync> BusTransport for MeteredTransport<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn publish(&self, payload: Bytes) -> Result<(), BusError> {
        let batch_bytes = payload.len();
        match self.inner.publish(payload).await {
            Ok(()) => {
                observability::record_publish(batch_bytes);
                Ok(())
            }
            Err(e) => {
                observability::record_publish_failure();
                Err(e)
            }
        }
    }
}

/// Execute the `run` command
pub async fn run_load_command(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let mut config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(threshold) = args.threshold {
        info!(threshold, "Overriding flush threshold from CLI");
        config.writer.flush_threshold_bytes = threshold;
    }

    info!(
        transport = %config.transport.name,
        transport_type = ?config.transport.transport_type,
        flush_threshold_bytes = config.writer.flush_threshold_bytes,
        producers = args.producers,
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        return Ok(());
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)
            .context("Failed to start metrics endpoint")?;
    }

    let settings = LoadSettings {
        producers: args.producers,
        messages_per_producer: args.messages,
        message_size: args.message_size,
    };

    // The transport trait is not object-safe; dispatch per concrete type.
    match config.transport.transport_type {
        TransportType::Log => {
            let transport = Arc::new(LogTransport::new(&config.transport.name));
            run_load(config.writer, transport, settings).await
        }
        TransportType::Udp => {
            let transport = Arc::new(
                UdpTransport::from_params(&config.transport.name, &config.transport.params)
                    .await
                    .context("Failed to create UDP transport")?,
            );
            run_load(config.writer, transport, settings).await
        }
        TransportType::Recording => {
            let transport = Arc::new(RecordingTransport::new());
            run_load(config.writer, transport, settings).await
        }
    }
}

async fn run_load<T>(
    settings: contracts::WriterSettings,
    transport: Arc<T>,
    load: LoadSettings,
) -> Result<()>
where
    T: BusTransport + Send + Sync + 'static,
{
    let transport = Arc::new(MeteredTransport { inner: transport });
    let writer = Arc::new(
        BusMessageWriter::new(settings, transport).context("Failed to create writer")?,
    );

    let (cancel_handle, cancel) = CancelSignal::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received shutdown signal, cancelling producers");
            cancel_handle.cancel();
        }
    });

    info!("Starting producers...");
    let summary = drive_producers(Arc::clone(&writer), load, cancel).await;

    // Final drain; its publishes are included in the metrics below.
    writer
        .dispose()
        .await
        .context("Final flush failed during dispose")?;

    let metrics = writer.metrics().snapshot();
    info!(
        messages_sent = summary.messages_sent,
        messages_cancelled = summary.messages_cancelled,
        bytes_submitted = summary.bytes_submitted,
        bytes_published = metrics.published_bytes,
        publishes = metrics.publish_count,
        publish_failures = metrics.failure_count,
        duration_secs = summary.duration.as_secs_f64(),
        "Load run complete"
    );

    if summary.messages_cancelled == 0 && summary.bytes_submitted != metrics.published_bytes {
        anyhow::bail!(
            "byte conservation violated: submitted {} != published {}",
            summary.bytes_submitted,
            metrics.published_bytes
        );
    }

    info!("Bus Writer finished");
    Ok(())
}
