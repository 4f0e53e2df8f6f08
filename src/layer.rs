use std::io::Write;

use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

use crate::encoder::JsonEncoder;
use crate::writer::RotatingFileWriter;

/// Encodes each event once and writes the same line to standard output
/// and the rotating log file. Write failures are dropped; emitting a
/// record never surfaces an error to the caller.
pub(crate) struct JsonLayer {
    encoder: JsonEncoder,
    file: RotatingFileWriter,
}

impl JsonLayer {
    pub(crate) fn new(encoder: JsonEncoder, file: RotatingFileWriter) -> Self {
        Self { encoder, file }
    }
}

impl<S> Layer<S> for JsonLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = self.encoder.encode(event);
        if line.is_empty() {
            return;
        }

        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(&line);
        let _ = self.file.append(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::TimeFormat;
    use crate::writer::RotationPolicy;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_layer_writes_one_line_per_event() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("layer.log");

        let writer = RotatingFileWriter::new(&path, RotationPolicy::default());
        let layer = JsonLayer::new(JsonEncoder::new(TimeFormat::EpochNanos, true), writer);
        let subscriber = tracing_subscriber::registry().with(layer);
        let dispatch = tracing::Dispatch::new(subscriber);

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::event!(tracing::Level::INFO, "layer-test: {}", 1);
            tracing::event!(tracing::Level::WARN, "layer-test: {}", 2);
        });

        let content = std::fs::read_to_string(&path).expect("read log file");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["level"], "info");
        assert_eq!(first["msg"], "layer-test: 1");
        assert!(first["timestamp"].is_i64());
        assert!(
            first["source"]
                .as_str()
                .unwrap()
                .contains("layer.rs"),
            "source should point at this file"
        );

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["level"], "warn");
        assert_eq!(second["msg"], "layer-test: 2");
    }

    #[test]
    fn test_layer_omits_source_when_caller_disabled() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("no_caller.log");

        let writer = RotatingFileWriter::new(&path, RotationPolicy::default());
        let layer = JsonLayer::new(JsonEncoder::new(TimeFormat::EpochNanos, false), writer);
        let dispatch = tracing::Dispatch::new(tracing_subscriber::registry().with(layer));

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::event!(tracing::Level::INFO, "no-caller");
        });

        let content = std::fs::read_to_string(&path).expect("read log file");
        let record: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert!(record.get("source").is_none());
        assert_eq!(record["msg"], "no-caller");
    }

    #[test]
    fn test_extra_fields_pass_through() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("extra.log");

        let writer = RotatingFileWriter::new(&path, RotationPolicy::default());
        let layer = JsonLayer::new(JsonEncoder::new(TimeFormat::EpochNanos, false), writer);
        let dispatch = tracing::Dispatch::new(tracing_subscriber::registry().with(layer));

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::event!(
                tracing::Level::INFO,
                peer = "10.0.0.2",
                attempts = 3_u64,
                "retrying"
            );
        });

        let content = std::fs::read_to_string(&path).expect("read log file");
        let record: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(record["msg"], "retrying");
        assert_eq!(record["peer"], "10.0.0.2");
        assert_eq!(record["attempts"], 3);
    }
}
