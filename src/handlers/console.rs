//! Default console handler
//!
//! Used by the dispatcher whenever no handler is registered. Warnings
//! and errors go to stderr, everything else to stdout.

use crate::core::log_level::LogLevel;
use crate::core::log_record::LogRecord;
use chrono::SecondsFormat;

/// Render `record` to the process console, routed by severity
pub fn console_handler(record: &LogRecord) {
    let line = format_record(record);
    match record.level {
        LogLevel::Error | LogLevel::Warning => eprintln!("{}", line),
        _ => println!("{}", line),
    }
}

/// The console line format: `[<ISO time>]\t<LEVEL>\t<logger>: <message>`
/// with `, details: <json>` appended when details are present
pub fn format_record(record: &LogRecord) -> String {
    let mut line = format!(
        "[{}]\t{}\t{}: {}",
        record.time.to_rfc3339_opts(SecondsFormat::Millis, true),
        record.level,
        record.logger,
        record.message
    );
    if let Some(details) = &record.details {
        line.push_str(", details: ");
        line.push_str(&serde_json::Value::Object(details.clone()).to_string());
    }
    line
}
