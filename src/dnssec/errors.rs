use crate::error::DnsValidationError;
use serde_json::{Map, Value};
use tracing::debug;

/// Strict DNSSEC validators fail with the first violated constraint
pub type Result<T> = std::result::Result<T, DnsValidationError>;

/// Build the error for a failed field check and log it
pub(crate) fn reject(
    message: impl Into<String>,
    code: &'static str,
    field: &str,
    record: &Map<String, Value>,
) -> DnsValidationError {
    let err = DnsValidationError::new(message, code).with_field(field, record.get(field));
    debug!("DNSSEC field check failed: {} ({})", err.code, err.message);
    err
}

/// The record itself is not an object
pub(crate) fn reject_structure(record_type: &str, code: &'static str) -> DnsValidationError {
    debug!("{} record rejected: not an object", record_type);
    DnsValidationError::new(format!("{} record must be an object", record_type), code)
}

/// Non-empty string field
pub(crate) fn non_empty_str<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
