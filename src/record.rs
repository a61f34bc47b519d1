use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed identifier stamped into every record this service publishes.
pub const SERVICE_NAME: &str = "logging-svc";

/// A single log entry exchanged between the publisher and the consumer.
///
/// Serialized as a JSON object with camelCase keys
/// (`level`, `message`, `serviceName`, `timestamp`). Keys missing from an
/// inbound payload decode as empty strings. Fields are private so a record
/// cannot be changed after it has been built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct LogRecord {
    level: String,
    message: String,
    service_name: String,
    timestamp: String,
}

impl LogRecord {
    /// Build a record from all four fields.
    pub fn new(
        level: impl Into<String>,
        message: impl Into<String>,
        service_name: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        LogRecord {
            level: level.into(),
            message: message.into(),
            service_name: service_name.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Build a record for this service, timestamped with the current UTC
    /// instant in RFC 3339 form (e.g. `2025-01-10T12:00:00.123456789Z`).
    pub fn stamped(level: impl Into<String>, message: impl Into<String>) -> Self {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::AutoSi, true);
        LogRecord::new(level, message, SERVICE_NAME, timestamp)
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        LogRecord::new("", "", "", "")
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LogRecord(level={}, message={}, serviceName={}, timestamp={})",
            self.level, self.message, self.service_name, self.timestamp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn stamped_record_uses_fixed_service_name() {
        let record = LogRecord::stamped("WARN", "low disk");
        assert_eq!(record.level(), "WARN");
        assert_eq!(record.message(), "low disk");
        assert_eq!(record.service_name(), SERVICE_NAME);
    }

    #[test]
    fn stamped_timestamp_is_rfc3339_within_call_window() {
        let before = Utc::now();
        let record = LogRecord::stamped("INFO", "");
        let after = Utc::now();

        let parsed = DateTime::parse_from_rfc3339(record.timestamp())
            .expect("timestamp should be RFC 3339")
            .with_timezone(&Utc);
        assert!(parsed >= before && parsed <= after);
        assert!(record.timestamp().ends_with('Z'));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let record = LogRecord::new("ERROR", "disk full", SERVICE_NAME, "2025-01-10T12:00:00Z");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "level": "ERROR",
                "message": "disk full",
                "serviceName": "logging-svc",
                "timestamp": "2025-01-10T12:00:00Z",
            })
        );
    }

    #[test]
    fn missing_keys_decode_as_empty_strings() {
        let record: LogRecord =
            serde_json::from_str(r#"{"level":"INFO","message":"from another producer"}"#).unwrap();
        assert_eq!(record.level(), "INFO");
        assert_eq!(record.message(), "from another producer");
        assert_eq!(record.service_name(), "");
        assert_eq!(record.timestamp(), "");
    }

    #[test]
    fn display_lists_every_field() {
        let record = LogRecord::new("INFO", "hello", SERVICE_NAME, "2025-01-10T12:00:00Z");
        assert_eq!(
            record.to_string(),
            "LogRecord(level=INFO, message=hello, serviceName=logging-svc, timestamp=2025-01-10T12:00:00Z)"
        );
    }
}
