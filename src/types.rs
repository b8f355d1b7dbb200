use crate::error::DnsValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Record type tags understood by the validators
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    ANY,
    CAA,
    CNAME,
    DNSKEY,
    DS,
    MX,
    NAPTR,
    NS,
    NSEC,
    NSEC3,
    PTR,
    RRSIG,
    SOA,
    SRV,
    SSHFP,
    TLSA,
    TXT,
}

impl RecordType {
    /// Every supported tag, in the order used by diagnostics
    pub const ALL: [RecordType; 19] = [
        RecordType::A,
        RecordType::AAAA,
        RecordType::CNAME,
        RecordType::MX,
        RecordType::TXT,
        RecordType::NS,
        RecordType::PTR,
        RecordType::SOA,
        RecordType::SRV,
        RecordType::CAA,
        RecordType::NAPTR,
        RecordType::TLSA,
        RecordType::DNSKEY,
        RecordType::DS,
        RecordType::NSEC,
        RecordType::NSEC3,
        RecordType::RRSIG,
        RecordType::SSHFP,
        RecordType::ANY,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AAAA => "AAAA",
            Self::ANY => "ANY",
            Self::CAA => "CAA",
            Self::CNAME => "CNAME",
            Self::DNSKEY => "DNSKEY",
            Self::DS => "DS",
            Self::MX => "MX",
            Self::NAPTR => "NAPTR",
            Self::NS => "NS",
            Self::NSEC => "NSEC",
            Self::NSEC3 => "NSEC3",
            Self::PTR => "PTR",
            Self::RRSIG => "RRSIG",
            Self::SOA => "SOA",
            Self::SRV => "SRV",
            Self::SSHFP => "SSHFP",
            Self::TLSA => "TLSA",
            Self::TXT => "TXT",
        }
    }

    /// DNSSEC-related types (validated by the `dnssec` module)
    pub fn is_dnssec(self) -> bool {
        matches!(
            self,
            Self::DNSKEY | Self::DS | Self::NSEC | Self::NSEC3 | Self::RRSIG | Self::SSHFP
        )
    }

    /// Comma separated list used in "unsupported type" messages
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = DnsValidationError;

    /// Tags are matched exactly; `"a"` is not an A record.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DnsValidationError::invalid_record_type(&Value::from(s)))
    }
}

/// Outcome of the accumulating validators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Build a result whose validity is derived from the error list
    pub fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::from_parts(vec![message.into()], Vec::new())
    }

    pub fn valid() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }
}

/// Question section of a query result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub name: String,
    #[serde(rename = "type")]
    pub qtype: String,
    pub class: String,
}

/// One query/response pair; section entries stay untyped so that
/// malformed answers can still be reported on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsQueryResult {
    pub question: Question,
    pub answers: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ARecord {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AaaaRecord {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Single-target records: CNAME, NS and PTR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRecord {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MxRecord {
    pub priority: u16,
    pub exchange: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxtRecord {
    pub entries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// SOA data under the canonical field names.
///
/// The `nsname`/`hostmaster`/`expire`/`minttl` spelling is handled on the
/// untyped side, see [`crate::compat::normalize_soa`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoaRecord {
    pub primary: String,
    pub admin: String,
    pub serial: u64,
    pub refresh: u64,
    pub retry: u64,
    pub expiration: u64,
    pub minimum: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SrvRecord {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaaRecord {
    pub critical: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuewild: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iodef: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contactemail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contactphone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaptrRecord {
    pub order: u16,
    pub preference: u16,
    pub flags: String,
    pub service: String,
    pub regexp: String,
    pub replacement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsaRecord {
    pub usage: u8,
    pub selector: u8,
    pub matching_type: u8,
    pub certificate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Container for an ANY answer: either an opaque `value` or a list of
/// heterogeneous records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// Traditional records, tagged by `type` on the wire format used here (JSON)
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DnsRecord {
    A(ARecord),
    AAAA(AaaaRecord),
    CNAME(NameRecord),
    MX(MxRecord),
    TXT(TxtRecord),
    NS(NameRecord),
    PTR(NameRecord),
    SOA(SoaRecord),
    SRV(SrvRecord),
    CAA(CaaRecord),
    NAPTR(NaptrRecord),
    TLSA(TlsaRecord),
    ANY(AnyRecord),
}

impl DnsRecord {
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A(_) => RecordType::A,
            Self::AAAA(_) => RecordType::AAAA,
            Self::CNAME(_) => RecordType::CNAME,
            Self::MX(_) => RecordType::MX,
            Self::TXT(_) => RecordType::TXT,
            Self::NS(_) => RecordType::NS,
            Self::PTR(_) => RecordType::PTR,
            Self::SOA(_) => RecordType::SOA,
            Self::SRV(_) => RecordType::SRV,
            Self::CAA(_) => RecordType::CAA,
            Self::NAPTR(_) => RecordType::NAPTR,
            Self::TLSA(_) => RecordType::TLSA,
            Self::ANY(_) => RecordType::ANY,
        }
    }

    /// Untyped form accepted by the predicates
    pub fn to_value(&self) -> Value {
        // Every field type here maps onto JSON without failure
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_type_parsing() {
        assert_eq!("NSEC3".parse::<RecordType>().unwrap(), RecordType::NSEC3);
        assert_eq!("AAAA".parse::<RecordType>().unwrap(), RecordType::AAAA);

        let err = "aaaa".parse::<RecordType>().unwrap_err();
        assert_eq!(err.code, "INVALID_RECORD_TYPE");
        assert!("NSEC3PARAM".parse::<RecordType>().is_err());
    }

    #[test]
    fn test_supported_list_order() {
        let list = RecordType::supported_list();
        assert!(list.starts_with("A, AAAA, CNAME, MX"));
        assert!(list.ends_with("RRSIG, SSHFP, ANY"));
    }

    #[test]
    fn test_dns_record_serialization() {
        let record = DnsRecord::MX(MxRecord {
            priority: 10,
            exchange: "mail.example.com".to_string(),
            ttl: None,
        });
        assert_eq!(
            record.to_value(),
            json!({"type": "MX", "priority": 10, "exchange": "mail.example.com"})
        );
        assert_eq!(record.record_type(), RecordType::MX);

        let tlsa: DnsRecord = serde_json::from_value(json!({
            "type": "TLSA",
            "usage": 3,
            "selector": 1,
            "matchingType": 1,
            "certificate": "abcdef"
        }))
        .unwrap();
        assert_eq!(tlsa.record_type(), RecordType::TLSA);
    }

    #[test]
    fn test_validation_result_validity() {
        assert!(ValidationResult::valid().is_valid);
        let invalid = ValidationResult::invalid("broken");
        assert!(!invalid.is_valid);
        assert_eq!(invalid.errors, vec!["broken".to_string()]);
    }
}
