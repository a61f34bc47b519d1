use crate::record::LogRecord;
use std::str::FromStr;

/// Where the publisher and consumer report the records they handle.
///
/// Both variants emit exactly one event or line per call. Neither is a
/// delivery acknowledgment; they exist for local diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Diagnostics {
    /// `tracing` event at INFO with the record fields attached.
    #[default]
    Structured,
    /// Plain line on stdout.
    Console,
}

impl Diagnostics {
    /// Report that `record` was handed to the binder.
    pub fn published(&self, destination: &str, record: &LogRecord) {
        match self {
            Diagnostics::Structured => tracing::info!(
                destination,
                log_level = record.level(),
                service_name = record.service_name(),
                record_timestamp = record.timestamp(),
                "Published log: {}",
                record.message()
            ),
            Diagnostics::Console => println!("{}", published_line(destination, record)),
        }
    }

    /// Report that `record` arrived on the inbound binding.
    pub fn received(&self, record: &LogRecord) {
        match self {
            Diagnostics::Structured => tracing::info!(
                log_level = record.level(),
                service_name = record.service_name(),
                record_timestamp = record.timestamp(),
                "Received log: {}",
                record.message()
            ),
            Diagnostics::Console => println!("{}", received_line(record)),
        }
    }
}

/// Console line for a record handed to the binder.
pub fn published_line(destination: &str, record: &LogRecord) -> String {
    format!("Published log to {destination}: {record}")
}

/// Console line for a record that arrived on the inbound binding.
pub fn received_line(record: &LogRecord) -> String {
    format!("Received log: {record}")
}

impl FromStr for Diagnostics {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tracing" | "structured" => Ok(Diagnostics::Structured),
            "console" | "stdout" => Ok(Diagnostics::Console),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SERVICE_NAME;
    use tracing_test::traced_test;

    fn sample() -> LogRecord {
        LogRecord::new("INFO", "hello", SERVICE_NAME, "2025-01-10T12:00:00Z")
    }

    #[test]
    fn console_lines_carry_the_whole_record() {
        assert_eq!(
            published_line("logs", &sample()),
            "Published log to logs: LogRecord(level=INFO, message=hello, serviceName=logging-svc, timestamp=2025-01-10T12:00:00Z)"
        );
        assert_eq!(
            received_line(&sample()),
            "Received log: LogRecord(level=INFO, message=hello, serviceName=logging-svc, timestamp=2025-01-10T12:00:00Z)"
        );
    }

    #[traced_test]
    #[test]
    fn console_mode_emits_no_tracing_events() {
        Diagnostics::Console.published("logs", &sample());
        Diagnostics::Console.received(&sample());

        assert!(!logs_contain("Published log"));
        assert!(!logs_contain("Received log"));
    }

    #[traced_test]
    #[test]
    fn structured_mode_emits_one_event_with_record_fields() {
        Diagnostics::Structured.published("logs", &sample());

        assert!(logs_contain("Published log: hello"));
        assert!(logs_contain("logging-svc"));
        logs_assert(|lines: &[&str]| {
            match lines.iter().filter(|line| line.contains("Published log")).count() {
                1 => Ok(()),
                n => Err(format!("expected one diagnostic line, got {n}")),
            }
        });
    }

    #[test]
    fn parses_modes() {
        assert_eq!("tracing".parse::<Diagnostics>(), Ok(Diagnostics::Structured));
        assert_eq!(" Console ".parse::<Diagnostics>(), Ok(Diagnostics::Console));
        assert!("syslog".parse::<Diagnostics>().is_err());
    }
}
