use crate::utils::describe_value;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Narrower classification of a [`DnsValidationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Field-level failure raised by the strict DNSSEC validators
    Validation,
    InvalidRecordType,
    MalformedRecord,
    InvalidFieldValue,
    MissingRequiredField,
    InvalidQueryStructure,
}

/// Structured validation failure.
///
/// `code` is the stable, machine-readable identifier (for example
/// `INVALID_RRSIG_TIMESTAMP_ORDER`); `message` is prose for humans.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message}")]
pub struct DnsValidationError {
    pub message: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub kind: ErrorKind,
}

impl DnsValidationError {
    pub fn new(message: impl Into<String>, code: &'static str) -> Self {
        Self {
            message: message.into(),
            code,
            field: None,
            value: None,
            kind: ErrorKind::Validation,
        }
    }

    /// Attach the offending field and its value (absent values stay `None`)
    pub fn with_field(mut self, field: impl Into<String>, value: Option<&Value>) -> Self {
        self.field = Some(field.into());
        self.value = value.cloned();
        self
    }

    fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn invalid_record_type(record_type: &Value) -> Self {
        Self::new(
            format!(
                "Invalid or unsupported DNS record type: {}",
                describe_value(Some(record_type))
            ),
            "INVALID_RECORD_TYPE",
        )
        .with_field("type", Some(record_type))
        .with_kind(ErrorKind::InvalidRecordType)
    }

    pub fn malformed_record(
        message: impl Into<String>,
        field: Option<&str>,
        value: Option<&Value>,
    ) -> Self {
        let mut err = Self::new(message, "MALFORMED_RECORD").with_kind(ErrorKind::MalformedRecord);
        err.field = field.map(str::to_string);
        err.value = value.cloned();
        err
    }

    pub fn invalid_field_value(field: &str, value: &Value, expected_format: Option<&str>) -> Self {
        let message = match expected_format {
            Some(expected) => format!(
                "Invalid value for field '{}': {}. Expected: {}",
                field,
                describe_value(Some(value)),
                expected
            ),
            None => format!(
                "Invalid value for field '{}': {}",
                field,
                describe_value(Some(value))
            ),
        };
        Self::new(message, "INVALID_FIELD_VALUE")
            .with_field(field, Some(value))
            .with_kind(ErrorKind::InvalidFieldValue)
    }

    pub fn missing_required_field(field: &str, record_type: &str) -> Self {
        Self::new(
            format!("Missing required field '{}' for {} record", field, record_type),
            "MISSING_REQUIRED_FIELD",
        )
        .with_field(field, None)
        .with_kind(ErrorKind::MissingRequiredField)
    }

    pub fn invalid_query_structure(message: impl Into<String>, field: Option<&str>) -> Self {
        let mut err =
            Self::new(message, "INVALID_QUERY_STRUCTURE").with_kind(ErrorKind::InvalidQueryStructure);
        err.field = field.map(str::to_string);
        err
    }
}

/// Constructors with consistent messages for the common field failures
pub mod factory {
    use super::DnsValidationError;
    use crate::format::IpVersion;
    use serde_json::Value;

    pub fn invalid_ip_address(address: &str, version: IpVersion) -> DnsValidationError {
        let expected = match version {
            IpVersion::V4 => "valid IPv4 address",
            IpVersion::V6 => "valid IPv6 address",
        };
        DnsValidationError::invalid_field_value("address", &Value::from(address), Some(expected))
    }

    pub fn invalid_fqdn(domain: &str) -> DnsValidationError {
        DnsValidationError::invalid_field_value("value", &Value::from(domain), Some("valid FQDN"))
    }

    pub fn invalid_port(port: i64) -> DnsValidationError {
        DnsValidationError::invalid_field_value(
            "port",
            &Value::from(port),
            Some("integer between 0 and 65535"),
        )
    }

    pub fn invalid_ttl(ttl: i64) -> DnsValidationError {
        DnsValidationError::invalid_field_value(
            "ttl",
            &Value::from(ttl),
            Some("integer between 0 and 2147483647"),
        )
    }

    pub fn invalid_priority(priority: i64) -> DnsValidationError {
        DnsValidationError::invalid_field_value(
            "priority",
            &Value::from(priority),
            Some("integer between 0 and 65535"),
        )
    }

    pub fn invalid_weight(weight: i64) -> DnsValidationError {
        DnsValidationError::invalid_field_value(
            "weight",
            &Value::from(weight),
            Some("integer between 0 and 65535"),
        )
    }

    pub fn invalid_email(email: &str) -> DnsValidationError {
        DnsValidationError::invalid_field_value(
            "admin",
            &Value::from(email),
            Some("valid email address format"),
        )
    }

    pub fn invalid_hex_string(value: &str) -> DnsValidationError {
        DnsValidationError::invalid_field_value(
            "certificate",
            &Value::from(value),
            Some("valid hexadecimal string"),
        )
    }

    pub fn missing_required_field(field: &str, record_type: &str) -> DnsValidationError {
        DnsValidationError::missing_required_field(field, record_type)
    }

    pub fn malformed_record(message: &str) -> DnsValidationError {
        DnsValidationError::malformed_record(message, None, None)
    }

    pub fn invalid_record_type(record_type: &Value) -> DnsValidationError {
        DnsValidationError::invalid_record_type(record_type)
    }
}

/// Error codes of the Node.js `dns` module, for consumers that mirror them
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeDnsErrorCode {
    NODATA,
    FORMERR,
    SERVFAIL,
    NOTFOUND,
    NOTIMP,
    REFUSED,
    BADQUERY,
    BADNAME,
    BADFAMILY,
    BADRESP,
    CONNREFUSED,
    TIMEOUT,
    EOF,
    FILE,
    NOMEM,
    DESTRUCTION,
    BADSTR,
    BADFLAGS,
    NONAME,
    BADHINTS,
    NOTINITIALIZED,
    LOADIPHLPAPI,
    ADDRGETNETWORKPARAMS,
    CANCELLED,
}

impl NodeDnsErrorCode {
    pub const ALL: [NodeDnsErrorCode; 24] = [
        Self::NODATA,
        Self::FORMERR,
        Self::SERVFAIL,
        Self::NOTFOUND,
        Self::NOTIMP,
        Self::REFUSED,
        Self::BADQUERY,
        Self::BADNAME,
        Self::BADFAMILY,
        Self::BADRESP,
        Self::CONNREFUSED,
        Self::TIMEOUT,
        Self::EOF,
        Self::FILE,
        Self::NOMEM,
        Self::DESTRUCTION,
        Self::BADSTR,
        Self::BADFLAGS,
        Self::NONAME,
        Self::BADHINTS,
        Self::NOTINITIALIZED,
        Self::LOADIPHLPAPI,
        Self::ADDRGETNETWORKPARAMS,
        Self::CANCELLED,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NODATA => "NODATA",
            Self::FORMERR => "FORMERR",
            Self::SERVFAIL => "SERVFAIL",
            Self::NOTFOUND => "NOTFOUND",
            Self::NOTIMP => "NOTIMP",
            Self::REFUSED => "REFUSED",
            Self::BADQUERY => "BADQUERY",
            Self::BADNAME => "BADNAME",
            Self::BADFAMILY => "BADFAMILY",
            Self::BADRESP => "BADRESP",
            Self::CONNREFUSED => "CONNREFUSED",
            Self::TIMEOUT => "TIMEOUT",
            Self::EOF => "EOF",
            Self::FILE => "FILE",
            Self::NOMEM => "NOMEM",
            Self::DESTRUCTION => "DESTRUCTION",
            Self::BADSTR => "BADSTR",
            Self::BADFLAGS => "BADFLAGS",
            Self::NONAME => "NONAME",
            Self::BADHINTS => "BADHINTS",
            Self::NOTINITIALIZED => "NOTINITIALIZED",
            Self::LOADIPHLPAPI => "LOADIPHLPAPI",
            Self::ADDRGETNETWORKPARAMS => "ADDRGETNETWORKPARAMS",
            Self::CANCELLED => "CANCELLED",
        }
    }
}

impl fmt::Display for NodeDnsErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeDnsErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|c| c.as_str() == s).ok_or(())
    }
}

pub fn is_node_dns_error_code(code: &str) -> bool {
    code.parse::<NodeDnsErrorCode>().is_ok()
}
