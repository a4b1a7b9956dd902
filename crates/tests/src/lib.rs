//! # Integration Tests
//!
//! Cross-crate scenario tests for the buffering writer.
//!
//! Covers:
//! - Byte conservation under concurrent producers
//! - Threshold and disposal flush scenarios
//! - Failure retention and redelivery
//! - Cancellation and disposal semantics

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        let _ = contracts::TransportType::Log;
    }
}

#[cfg(test)]
mod writer_scenarios {
    use std::sync::Arc;

    use contracts::WriterSettings;
    use transports::RecordingTransport;
    use writer::{BusMessageWriter, CancelSignal, WriterError};

    fn new_writer(threshold: usize) -> (Arc<BusMessageWriter<RecordingTransport>>, RecordingTransport) {
        let transport = RecordingTransport::new();
        let writer = BusMessageWriter::new(
            WriterSettings {
                flush_threshold_bytes: threshold,
            },
            Arc::new(transport.clone()),
        )
        .unwrap();
        (Arc::new(writer), transport)
    }

    /// Threshold = 1000, 1500 one-byte messages, then dispose: exactly two
    /// publishes of 1000 and 500 bytes.
    #[tokio::test]
    async fn test_scenario_threshold_then_disposal_flush() {
        let (writer, transport) = new_writer(1000);

        for _ in 0..1500 {
            writer.send(&[0x5A], &CancelSignal::never()).await.unwrap();
        }
        writer.dispose().await.unwrap();

        let payloads = transport.payloads();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[0].len(), 1000);
        assert_eq!(payloads[1].len(), 500);
        assert_eq!(transport.total_bytes(), 1500);
    }

    /// Threshold = 100, one 250-byte message, then dispose: one publish of
    /// exactly 250 bytes, no splitting, and an empty disposal flush.
    #[tokio::test]
    async fn test_scenario_oversized_single_message() {
        let (writer, transport) = new_writer(100);

        writer.send(&[7u8; 250], &CancelSignal::never()).await.unwrap();
        writer.dispose().await.unwrap();

        let payloads = transport.payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].len(), 250);
    }

    /// Many producers, random-ish message sizes up to 3x the threshold:
    /// total bytes accepted by the transport equals total bytes submitted.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_conservation_under_concurrency() {
        let threshold = 128usize;
        let (writer, transport) = new_writer(threshold);

        let mut tasks = Vec::new();
        for producer in 0..10u64 {
            let writer = Arc::clone(&writer);
            tasks.push(tokio::spawn(async move {
                let mut submitted = 0u64;
                for seq in 0..300u64 {
                    // Deterministic pseudo-random size in 1..=3*threshold.
                    let len = ((producer * 2654435761 + seq * 40503) % (3 * threshold as u64)) + 1;
                    let message = vec![producer as u8; len as usize];
                    writer.send(&message, &CancelSignal::never()).await.unwrap();
                    submitted += len;
                }
                submitted
            }));
        }

        let mut submitted = 0u64;
        for task in tasks {
            submitted += task.await.unwrap();
        }
        writer.dispose().await.unwrap();

        assert_eq!(transport.total_bytes(), submitted);
    }

    /// Sequential sends: every publish boundary falls on a message
    /// boundary, so no message ever straddles two publish calls.
    #[tokio::test]
    async fn test_no_splitting_sequential() {
        let (writer, transport) = new_writer(64);

        let mut message_ends = Vec::new();
        let mut offset = 0u64;
        let mut submitted = Vec::new();
        for i in 0..100u8 {
            let len = (i as usize * 11) % 50 + 1;
            let message = vec![i; len];
            writer.send(&message, &CancelSignal::never()).await.unwrap();
            offset += len as u64;
            message_ends.push(offset);
            submitted.extend_from_slice(&message);
        }
        writer.dispose().await.unwrap();

        // The published stream is the submitted stream.
        let mut published = Vec::new();
        let mut payload_ends = Vec::new();
        for payload in transport.payloads() {
            published.extend_from_slice(&payload);
            payload_ends.push(published.len() as u64);
        }
        assert_eq!(published, submitted);

        // Each payload ends exactly where some message ends.
        for end in payload_ends {
            assert!(
                message_ends.contains(&end),
                "publish boundary {end} splits a message"
            );
        }
    }

    /// A failed publish leaves the bytes buffered; a later flush delivers
    /// them unmodified with no duplication.
    #[tokio::test]
    async fn test_retention_and_redelivery_on_failure() {
        let (writer, transport) = new_writer(10);

        writer.send(b"alpha", &CancelSignal::never()).await.unwrap();

        transport.set_failing(true);
        let err = writer
            .send(b"beta-beta", &CancelSignal::never())
            .await
            .unwrap_err();
        assert!(matches!(err, WriterError::Transport(_)));
        assert_eq!(transport.publish_count(), 0);

        // Buffer still holds both messages; more sends keep working.
        writer.send(b"!", &CancelSignal::never()).await.unwrap_err();

        transport.set_failing(false);
        writer.flush(&CancelSignal::never()).await.unwrap();

        let payloads = transport.payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(&payloads[0][..], b"alphabeta-beta!");
    }

    /// A cancelled waiter mutates nothing; the buffered bytes it did not
    /// touch drain normally.
    #[tokio::test]
    async fn test_cancellation_leaves_state_intact() {
        let (writer, transport) = new_writer(1000);

        writer.send(b"kept", &CancelSignal::never()).await.unwrap();

        let (handle, cancel) = CancelSignal::channel();
        handle.cancel();
        let err = writer.send(b"dropped", &cancel).await.unwrap_err();
        assert!(matches!(err, WriterError::Cancelled));

        writer.dispose().await.unwrap();
        let payloads = transport.payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(&payloads[0][..], b"kept");
    }

    /// Second dispose performs no flush and raises no error; operations
    /// after dispose fail fast.
    #[tokio::test]
    async fn test_disposal_is_single_shot() {
        let (writer, transport) = new_writer(1000);

        writer.send(b"tail", &CancelSignal::never()).await.unwrap();
        writer.dispose().await.unwrap();
        assert_eq!(transport.publish_count(), 1);

        writer.dispose().await.unwrap();
        assert_eq!(transport.publish_count(), 1);

        assert!(matches!(
            writer.send(b"x", &CancelSignal::never()).await.unwrap_err(),
            WriterError::Disposed
        ));
        assert!(matches!(
            writer.flush(&CancelSignal::never()).await.unwrap_err(),
            WriterError::Disposed
        ));
    }

    /// Dispose returns the final flush error, but cleanup completed and the
    /// disposal is still final.
    #[tokio::test]
    async fn test_disposal_error_after_cleanup() {
        let (writer, transport) = new_writer(1000);

        writer.send(b"stranded", &CancelSignal::never()).await.unwrap();
        transport.set_failing(true);

        let err = writer.dispose().await.unwrap_err();
        assert!(matches!(err, WriterError::Transport(_)));

        transport.set_failing(false);
        writer.dispose().await.unwrap();
        assert!(matches!(
            writer.flush(&CancelSignal::never()).await.unwrap_err(),
            WriterError::Disposed
        ));
    }
}

#[cfg(test)]
mod config_tests {
    use config_loader::{ConfigFormat, ConfigLoader};

    #[tokio::test]
    async fn test_config_drives_writer() {
        let content = r#"
[writer]
flush_threshold_bytes = 8

[transport]
name = "rec"
transport_type = "recording"
"#;
        let config = ConfigLoader::load_from_str(content, ConfigFormat::Toml).unwrap();

        let transport = transports::RecordingTransport::new();
        let writer = writer::BusMessageWriter::new(
            config.writer,
            std::sync::Arc::new(transport.clone()),
        )
        .unwrap();

        writer
            .send(b"0123456789", &writer::CancelSignal::never())
            .await
            .unwrap();
        writer.dispose().await.unwrap();

        assert_eq!(transport.total_bytes(), 10);
        assert_eq!(transport.publish_count(), 1);
    }
}
