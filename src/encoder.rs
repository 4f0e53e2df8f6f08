//! Turns dispatched events into single-line JSON records.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use tracing::Event;
use tracing::field::{Field, Visit};

/// Encoding of the `timestamp` key in log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TimeFormat {
    /// UTC string with millisecond precision, e.g. `2026-01-02T15:04:05.000Z`.
    #[serde(rename = "ISO8601")]
    Iso8601,
    /// RFC 3339 string.
    #[serde(rename = "RFC3339")]
    Rfc3339,
    /// Fractional milliseconds since the Unix epoch, as a JSON number.
    EpochMillis,
    /// Integer nanoseconds since the Unix epoch, as a JSON number.
    #[default]
    EpochNanos,
    /// Fractional seconds since the Unix epoch, as a JSON number.
    #[serde(rename = "Epoch")]
    EpochSecs,
}

impl TimeFormat {
    /// Map a configuration tag to its format. Unrecognized tags fall back
    /// to the default rather than failing.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "iso8601" => TimeFormat::Iso8601,
            "rfc3339" => TimeFormat::Rfc3339,
            "epochmillis" => TimeFormat::EpochMillis,
            "epochnanos" => TimeFormat::EpochNanos,
            "epoch" => TimeFormat::EpochSecs,
            _ => TimeFormat::default(),
        }
    }

    /// The canonical configuration tag for this format.
    pub fn tag(&self) -> &'static str {
        match self {
            TimeFormat::Iso8601 => "ISO8601",
            TimeFormat::Rfc3339 => "RFC3339",
            TimeFormat::EpochMillis => "EpochMillis",
            TimeFormat::EpochNanos => "EpochNanos",
            TimeFormat::EpochSecs => "Epoch",
        }
    }
}

impl<'de> Deserialize<'de> for TimeFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(TimeFormat::from_tag(&tag))
    }
}

fn encode_timestamp(time_format: TimeFormat, now: OffsetDateTime) -> Value {
    let nanos = now.unix_timestamp_nanos() as i64;
    match time_format {
        TimeFormat::Iso8601 => {
            let format = format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
            );
            Value::from(now.format(&format).unwrap_or_default())
        }
        TimeFormat::Rfc3339 => Value::from(now.format(&Rfc3339).unwrap_or_default()),
        TimeFormat::EpochMillis => Value::from(nanos as f64 / 1e6),
        TimeFormat::EpochNanos => Value::from(nanos),
        TimeFormat::EpochSecs => Value::from(nanos as f64 / 1e9),
    }
}

fn level_label(level: &tracing::Level, fatal: bool) -> &'static str {
    if fatal {
        return "fatal";
    }
    match *level {
        tracing::Level::ERROR => "error",
        tracing::Level::WARN => "warn",
        tracing::Level::INFO => "info",
        _ => "debug",
    }
}

/// Trim a callsite path to its last two components, `dir/file.rs:42` style.
fn short_location(file: &str, line: u64) -> String {
    let mut parts = file.rsplit(['/', '\\']);
    let name = parts.next().unwrap_or(file);
    match parts.next() {
        Some(dir) => format!("{dir}/{name}:{line}"),
        None => format!("{name}:{line}"),
    }
}

/// Collects event fields, routing the reserved ones out of the generic map.
///
/// `fatal` marks a record emitted by the fatal helpers, and `caller.file` /
/// `caller.line` carry an explicit callsite that overrides the event's own
/// metadata. None of the three appear in the encoded output.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    info: Option<Value>,
    fatal: bool,
    caller_file: Option<String>,
    caller_line: Option<u64>,
    extra: Map<String, Value>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = Some(format!("{value:?}")),
            "info" => self.info = Some(Value::from(format!("{value:?}"))),
            name => {
                self.extra
                    .insert(name.to_string(), Value::from(format!("{value:?}")));
            }
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            "info" => self.info = Some(Value::from(value)),
            "caller.file" => self.caller_file = Some(value.to_string()),
            name => {
                self.extra.insert(name.to_string(), Value::from(value));
            }
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "fatal" => self.fatal = value,
            name => {
                self.extra.insert(name.to_string(), Value::from(value));
            }
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "caller.line" => self.caller_line = Some(value),
            name => {
                self.extra.insert(name.to_string(), Value::from(value));
            }
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.extra.insert(field.name().to_string(), Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.extra.insert(field.name().to_string(), Value::from(value));
    }
}

/// Key order here is the wire order of the encoded record.
#[derive(Serialize)]
struct Record {
    timestamp: Value,
    level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    info: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Encodes one event into a newline-terminated JSON record.
#[derive(Debug, Clone)]
pub(crate) struct JsonEncoder {
    time_format: TimeFormat,
    caller: bool,
}

impl JsonEncoder {
    pub(crate) fn new(time_format: TimeFormat, caller: bool) -> Self {
        Self {
            time_format,
            caller,
        }
    }

    pub(crate) fn encode(&self, event: &Event<'_>) -> Vec<u8> {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let source = if self.caller {
            match (visitor.caller_file.as_deref(), visitor.caller_line) {
                (Some(file), Some(line)) => Some(short_location(file, line)),
                _ => match (event.metadata().file(), event.metadata().line()) {
                    (Some(file), Some(line)) => Some(short_location(file, u64::from(line))),
                    _ => None,
                },
            }
        } else {
            None
        };

        let record = Record {
            timestamp: encode_timestamp(self.time_format, OffsetDateTime::now_utc()),
            level: level_label(event.metadata().level(), visitor.fatal),
            source,
            msg: visitor.message.unwrap_or_default(),
            info: visitor.info,
            extra: visitor.extra,
        };

        match serde_json::to_vec(&record) {
            Ok(mut line) => {
                line.push(b'\n');
                line
            }
            Err(_) => Vec::new(),
        }
    }
}
