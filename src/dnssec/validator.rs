use super::digest::DigestAlgorithm;
use super::errors::{Result, non_empty_str, reject, reject_structure};
use super::records::{DnskeyRecord, DsRecord, RrsigRecord};
use crate::utils::field_int;
use regex::Regex;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use std::sync::LazyLock;
use tracing::trace;

pub(crate) static DOMAIN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9-]+\.)*[a-zA-Z0-9-]+\.?$").expect("Failed to parse an internal regex!")
});

static BASE64: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/]+=*$").expect("Failed to parse an internal regex!"));

static HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]+$").expect("Failed to parse an internal regex!"));

/// Strict validators accept algorithm numbers 1..=16, wider than the
/// registry used by the predicates
const ALGORITHM_RANGE: RangeInclusive<i64> = 1..=16;

pub(crate) fn int_within(
    record: &Map<String, Value>,
    field: &str,
    range: RangeInclusive<i64>,
) -> Option<i64> {
    field_int(record, field).filter(|n| range.contains(n))
}

/// Check an RRSIG record, failing on the first bad field.
///
/// Fields are checked in a fixed order, so a record with several problems
/// always reports the same code. `signature` must be base64.
pub fn validate_rrsig(value: &Value) -> Result<RrsigRecord> {
    let Some(r) = value.as_object() else {
        return Err(reject_structure("RRSIG", "INVALID_RRSIG_STRUCTURE"));
    };

    let Some(type_covered) = non_empty_str(r, "typeCovered") else {
        return Err(reject(
            "RRSIG record must have a valid typeCovered field",
            "INVALID_RRSIG_TYPE_COVERED",
            "typeCovered",
            r,
        ));
    };
    let Some(algorithm) = int_within(r, "algorithm", ALGORITHM_RANGE) else {
        return Err(reject(
            "RRSIG record must have a valid algorithm",
            "INVALID_RRSIG_ALGORITHM",
            "algorithm",
            r,
        ));
    };
    let Some(labels) = int_within(r, "labels", 0..=127) else {
        return Err(reject(
            "RRSIG labels must be between 0 and 127",
            "INVALID_RRSIG_LABELS",
            "labels",
            r,
        ));
    };
    let Some(original_ttl) = int_within(r, "originalTTL", 0..=i64::MAX) else {
        return Err(reject(
            "RRSIG originalTTL must be a non-negative integer",
            "INVALID_RRSIG_TTL",
            "originalTTL",
            r,
        ));
    };
    let Some(expiration) = int_within(r, "signatureExpiration", 0..=i64::MAX) else {
        return Err(reject(
            "RRSIG signatureExpiration must be a valid timestamp",
            "INVALID_RRSIG_EXPIRATION",
            "signatureExpiration",
            r,
        ));
    };
    let Some(inception) = int_within(r, "signatureInception", 0..=i64::MAX) else {
        return Err(reject(
            "RRSIG signatureInception must be a valid timestamp",
            "INVALID_RRSIG_INCEPTION",
            "signatureInception",
            r,
        ));
    };
    if inception >= expiration {
        trace!("RRSIG inception {} not before expiration {}", inception, expiration);
        return Err(crate::error::DnsValidationError::new(
            "RRSIG signatureInception must be before signatureExpiration",
            "INVALID_RRSIG_TIMESTAMP_ORDER",
        ));
    }
    let Some(key_tag) = int_within(r, "keyTag", 0..=65535) else {
        return Err(reject(
            "RRSIG keyTag must be between 0 and 65535",
            "INVALID_RRSIG_KEY_TAG",
            "keyTag",
            r,
        ));
    };
    let Some(signer_name) = non_empty_str(r, "signerName") else {
        return Err(reject(
            "RRSIG record must have a valid signerName",
            "INVALID_RRSIG_SIGNER_NAME",
            "signerName",
            r,
        ));
    };
    if !DOMAIN_NAME.is_match(signer_name) {
        return Err(reject(
            "RRSIG signerName must be a valid domain name",
            "INVALID_RRSIG_SIGNER_FORMAT",
            "signerName",
            r,
        ));
    }
    let Some(signature) = non_empty_str(r, "signature") else {
        return Err(reject(
            "RRSIG record must have a valid signature",
            "INVALID_RRSIG_SIGNATURE",
            "signature",
            r,
        ));
    };
    if !BASE64.is_match(signature) {
        return Err(reject(
            "RRSIG signature must be base64-encoded",
            "INVALID_RRSIG_SIGNATURE_FORMAT",
            "signature",
            r,
        ));
    }

    Ok(RrsigRecord {
        type_covered: type_covered.to_string(),
        algorithm: algorithm as u8,
        labels: labels as u8,
        original_ttl: original_ttl as u64,
        signature_expiration: expiration as u64,
        signature_inception: inception as u64,
        key_tag: key_tag as u16,
        signer_name: signer_name.to_string(),
        signature: signature.to_string(),
    })
}

/// Check a DNSKEY record. `publicKey` must be base64.
pub fn validate_dnskey(value: &Value) -> Result<DnskeyRecord> {
    let Some(r) = value.as_object() else {
        return Err(reject_structure("DNSKEY", "INVALID_DNSKEY_STRUCTURE"));
    };

    let Some(flags) = int_within(r, "flags", 0..=65535) else {
        return Err(reject(
            "DNSKEY flags must be between 0 and 65535",
            "INVALID_DNSKEY_FLAGS",
            "flags",
            r,
        ));
    };
    if field_int(r, "protocol") != Some(3) {
        return Err(reject(
            "DNSKEY protocol must be 3 for DNSSEC",
            "INVALID_DNSKEY_PROTOCOL",
            "protocol",
            r,
        ));
    }
    let Some(algorithm) = int_within(r, "algorithm", ALGORITHM_RANGE) else {
        return Err(reject(
            "DNSKEY record must have a valid algorithm",
            "INVALID_DNSKEY_ALGORITHM",
            "algorithm",
            r,
        ));
    };
    let Some(public_key) = non_empty_str(r, "publicKey") else {
        return Err(reject(
            "DNSKEY record must have a valid publicKey",
            "INVALID_DNSKEY_PUBLIC_KEY",
            "publicKey",
            r,
        ));
    };
    if !BASE64.is_match(public_key) {
        return Err(reject(
            "DNSKEY publicKey must be base64-encoded",
            "INVALID_DNSKEY_PUBLIC_KEY_FORMAT",
            "publicKey",
            r,
        ));
    }

    Ok(DnskeyRecord {
        flags: flags as u16,
        protocol: 3,
        algorithm: algorithm as u8,
        public_key: public_key.to_string(),
    })
}

/// Check a DS record, including the digest length implied by `digestType`
pub fn validate_ds(value: &Value) -> Result<DsRecord> {
    let Some(r) = value.as_object() else {
        return Err(reject_structure("DS", "INVALID_DS_STRUCTURE"));
    };

    let Some(key_tag) = int_within(r, "keyTag", 0..=65535) else {
        return Err(reject(
            "DS keyTag must be between 0 and 65535",
            "INVALID_DS_KEY_TAG",
            "keyTag",
            r,
        ));
    };
    let Some(algorithm) = int_within(r, "algorithm", ALGORITHM_RANGE) else {
        return Err(reject(
            "DS record must have a valid algorithm",
            "INVALID_DS_ALGORITHM",
            "algorithm",
            r,
        ));
    };
    let Some(digest_type) = field_int(r, "digestType").and_then(DigestAlgorithm::from_i64) else {
        return Err(reject(
            "DS digestType must be between 1 and 4",
            "INVALID_DS_DIGEST_TYPE",
            "digestType",
            r,
        ));
    };
    let Some(digest) = non_empty_str(r, "digest") else {
        return Err(reject(
            "DS record must have a valid digest",
            "INVALID_DS_DIGEST",
            "digest",
            r,
        ));
    };
    if !HEX.is_match(digest) {
        return Err(reject(
            "DS digest must be hexadecimal",
            "INVALID_DS_DIGEST_FORMAT",
            "digest",
            r,
        ));
    }
    let expected = digest_type.hex_len();
    if digest.len() != expected {
        return Err(reject(
            format!(
                "DS digest length must be {} characters for digest type {}",
                expected,
                digest_type.to_u8()
            ),
            "INVALID_DS_DIGEST_LENGTH",
            "digest",
            r,
        ));
    }

    Ok(DsRecord {
        key_tag: key_tag as u16,
        algorithm: algorithm as u8,
        digest_type: digest_type.to_u8(),
        digest: digest.to_string(),
    })
}
