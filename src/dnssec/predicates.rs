//! Boolean checks for DNSSEC record shapes.
//!
//! Opaque binary fields (`publicKey`, `digest`, `signature`, `fingerprint`)
//! are expected as hex here, while the strict validators in
//! [`super::validator`] expect base64 for `publicKey` and `signature`.
//! Both conventions are in use by callers, so neither is converted.

use super::algorithm::{
    is_valid_dnssec_algorithm, is_valid_nsec3_hash_algorithm, is_valid_sshfp_algorithm,
    is_valid_sshfp_fingerprint_type,
};
use super::digest::is_valid_digest_type;
use super::errors::non_empty_str;
use crate::format::{FqdnOptions, is_fqdn};
use crate::utils::{
    field_int, field_str, int_in, is_string_array, is_valid_hex_string, is_valid_ttl, record_of,
    ttl_ok,
};
use serde_json::Value;

fn hex_field(record: &serde_json::Map<String, Value>, key: &str) -> bool {
    field_str(record, key).is_some_and(is_valid_hex_string)
}

fn fqdn_field(record: &serde_json::Map<String, Value>, key: &str) -> bool {
    field_str(record, key).is_some_and(|name| is_fqdn(name, FqdnOptions::default()))
}

pub fn is_dnskey_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "DNSKEY") else {
        return false;
    };
    int_in(r, "flags", 0..=65535)
        && field_int(r, "protocol") == Some(3)
        && field_int(r, "algorithm").is_some_and(is_valid_dnssec_algorithm)
        && hex_field(r, "publicKey")
        && ttl_ok(r)
}

pub fn is_ds_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "DS") else {
        return false;
    };
    int_in(r, "keyTag", 0..=65535)
        && field_int(r, "algorithm").is_some_and(is_valid_dnssec_algorithm)
        && field_int(r, "digestType").is_some_and(is_valid_digest_type)
        && hex_field(r, "digest")
        && ttl_ok(r)
}

/// Type bitmap entries are only checked for being strings here
pub fn is_nsec_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "NSEC") else {
        return false;
    };
    fqdn_field(r, "nextDomainName") && is_string_array(r.get("typeBitMaps")) && ttl_ok(r)
}

pub fn is_nsec3_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "NSEC3") else {
        return false;
    };
    field_int(r, "hashAlgorithm").is_some_and(is_valid_nsec3_hash_algorithm)
        && int_in(r, "flags", 0..=255)
        && int_in(r, "iterations", 0..=65535)
        && field_str(r, "salt").is_some_and(|salt| salt.is_empty() || is_valid_hex_string(salt))
        && non_empty_str(r, "nextHashedOwnerName").is_some()
        && is_string_array(r.get("typeBitMaps"))
        && ttl_ok(r)
}

/// Field ranges only; inception/expiration ordering is left to
/// [`super::validator::validate_rrsig`]
pub fn is_rrsig_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "RRSIG") else {
        return false;
    };
    field_str(r, "typeCovered").is_some()
        && field_int(r, "algorithm").is_some_and(is_valid_dnssec_algorithm)
        && int_in(r, "labels", 0..=255)
        && field_int(r, "originalTTL").is_some_and(is_valid_ttl)
        && field_int(r, "signatureExpiration").is_some_and(|t| t >= 0)
        && field_int(r, "signatureInception").is_some_and(|t| t >= 0)
        && int_in(r, "keyTag", 0..=65535)
        && fqdn_field(r, "signerName")
        && hex_field(r, "signature")
        && ttl_ok(r)
}

pub fn is_sshfp_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "SSHFP") else {
        return false;
    };
    field_int(r, "algorithm").is_some_and(is_valid_sshfp_algorithm)
        && field_int(r, "fpType").is_some_and(is_valid_sshfp_fingerprint_type)
        && hex_field(r, "fingerprint")
        && ttl_ok(r)
}
