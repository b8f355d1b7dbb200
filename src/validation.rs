//! Boolean predicates for the traditional record types and the generic
//! dispatcher over every supported tag.

use crate::dnssec::predicates::{
    is_dnskey_record, is_ds_record, is_nsec_record, is_nsec3_record, is_rrsig_record,
    is_sshfp_record,
};
use crate::format::{FqdnOptions, IpVersion, is_email, is_fqdn, is_ip};
use crate::types::{RecordType, ValidationResult};
use crate::utils::{
    field_int, field_str, first_int, first_str, int_in, is_byte_buffer, is_truthy,
    is_valid_caa_flags, is_valid_hex_string, is_valid_naptr_flags, is_valid_port,
    is_valid_priority, is_valid_text_record, is_valid_tlsa_matching_type, is_valid_tlsa_selector,
    is_valid_tlsa_usage, is_valid_weight, record_of, ttl_ok,
};
use serde_json::{Map, Value};
use tracing::{debug, trace};

fn fqdn(name: &str) -> bool {
    is_fqdn(name, FqdnOptions::default())
}

fn fqdn_field(record: &Map<String, Value>, key: &str) -> bool {
    field_str(record, key).is_some_and(fqdn)
}

fn address_record(value: &Value, tag: &str, version: IpVersion) -> bool {
    let Some(r) = record_of(value, tag) else {
        return false;
    };
    field_str(r, "address").is_some_and(|addr| is_ip(addr, version)) && ttl_ok(r)
}

fn name_record(value: &Value, tag: &str) -> bool {
    let Some(r) = record_of(value, tag) else {
        return false;
    };
    fqdn_field(r, "value") && ttl_ok(r)
}

pub fn is_a_record(value: &Value) -> bool {
    address_record(value, "A", IpVersion::V4)
}

pub fn is_aaaa_record(value: &Value) -> bool {
    address_record(value, "AAAA", IpVersion::V6)
}

pub fn is_cname_record(value: &Value) -> bool {
    name_record(value, "CNAME")
}

pub fn is_ns_record(value: &Value) -> bool {
    name_record(value, "NS")
}

pub fn is_ptr_record(value: &Value) -> bool {
    name_record(value, "PTR")
}

pub fn is_mx_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "MX") else {
        return false;
    };
    fqdn_field(r, "exchange")
        && field_int(r, "priority").is_some_and(is_valid_priority)
        && ttl_ok(r)
}

/// Every entry must be printable ASCII; no entries at all is fine
pub fn is_txt_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "TXT") else {
        return false;
    };
    let entries_ok = r.get("entries").and_then(Value::as_array).is_some_and(|entries| {
        entries
            .iter()
            .all(|e| e.as_str().is_some_and(is_valid_text_record))
    });
    entries_ok && ttl_ok(r)
}

/// SOA with either the canonical or the resolver-style field names.
///
/// The mailbox in `admin`/`hostmaster` is written with a dot in place of
/// `@`, so its first dot is swapped back before the email check.
pub fn is_soa_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "SOA") else {
        return false;
    };
    let non_negative = |keys: &[&str]| first_int(r, keys).is_some_and(|n| n >= 0);

    let primary_ok = first_str(r, &["primary", "nsname"]).is_some_and(fqdn);
    let admin_ok = first_str(r, &["admin", "hostmaster"])
        .is_some_and(|admin| is_email(&admin.replacen('.', "@", 1)));

    primary_ok
        && admin_ok
        && non_negative(&["serial"])
        && non_negative(&["refresh"])
        && non_negative(&["retry"])
        && non_negative(&["expiration", "expire"])
        && non_negative(&["minimum", "minttl"])
        && ttl_ok(r)
}

pub fn is_srv_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "SRV") else {
        return false;
    };
    fqdn_field(r, "name")
        && field_int(r, "priority").is_some_and(is_valid_priority)
        && field_int(r, "weight").is_some_and(is_valid_weight)
        && field_int(r, "port").is_some_and(is_valid_port)
        && ttl_ok(r)
}

/// Needs a valid `critical` byte and at least one usable property
pub fn is_caa_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "CAA") else {
        return false;
    };
    if !field_int(r, "critical").is_some_and(is_valid_caa_flags) {
        return false;
    }

    let has_property = ["issue", "issuewild", "iodef", "contactphone"]
        .iter()
        .any(|key| field_str(r, key).is_some())
        || field_str(r, "contactemail").is_some_and(is_email);

    has_property && ttl_ok(r)
}

pub fn is_naptr_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "NAPTR") else {
        return false;
    };
    int_in(r, "order", 0..=65535)
        && int_in(r, "preference", 0..=65535)
        && field_str(r, "flags").is_some_and(is_valid_naptr_flags)
        && field_str(r, "service").is_some()
        && field_str(r, "regexp").is_some()
        && field_str(r, "replacement").is_some_and(|rep| rep.is_empty() || fqdn(rep))
        && ttl_ok(r)
}

/// TLSA with either field convention. Certificate data may be hex text or,
/// under `data`, a raw byte buffer whose contents are not inspected.
pub fn is_tlsa_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "TLSA") else {
        return false;
    };
    let usage_ok = first_int(r, &["usage", "certUsage"]).is_some_and(is_valid_tlsa_usage);
    let selector_ok = field_int(r, "selector").is_some_and(is_valid_tlsa_selector);
    let matching_ok =
        first_int(r, &["matchingType", "match"]).is_some_and(is_valid_tlsa_matching_type);
    let cert_ok = first_str(r, &["certificate", "data"]).is_some_and(is_valid_hex_string)
        || r.get("data").is_some_and(is_byte_buffer);

    usage_ok && selector_ok && matching_ok && cert_ok && ttl_ok(r)
}

/// Either an opaque `value`, or `records` whose entries each carry a `type`
pub fn is_any_record(value: &Value) -> bool {
    let Some(r) = record_of(value, "ANY") else {
        return false;
    };
    let has_value = r.contains_key("value");
    let records_ok = r.get("records").and_then(Value::as_array).is_some_and(|records| {
        records
            .iter()
            .all(|entry| entry.as_object().is_some_and(|o| o.contains_key("type")))
    });
    (has_value || records_ok) && ttl_ok(r)
}

/// Dispatch on the `type` tag; unknown tags are never valid
pub fn is_dns_record(value: &Value) -> bool {
    let Some(tag) = value.get("type").and_then(Value::as_str) else {
        return false;
    };
    let Ok(record_type) = tag.parse::<RecordType>() else {
        trace!("No predicate for record type {}", tag);
        return false;
    };
    let valid = match record_type {
        RecordType::A => is_a_record(value),
        RecordType::AAAA => is_aaaa_record(value),
        RecordType::CNAME => is_cname_record(value),
        RecordType::MX => is_mx_record(value),
        RecordType::TXT => is_txt_record(value),
        RecordType::NS => is_ns_record(value),
        RecordType::PTR => is_ptr_record(value),
        RecordType::SOA => is_soa_record(value),
        RecordType::SRV => is_srv_record(value),
        RecordType::CAA => is_caa_record(value),
        RecordType::NAPTR => is_naptr_record(value),
        RecordType::TLSA => is_tlsa_record(value),
        RecordType::ANY => is_any_record(value),
        RecordType::DNSKEY => is_dnskey_record(value),
        RecordType::DS => is_ds_record(value),
        RecordType::NSEC => is_nsec_record(value),
        RecordType::NSEC3 => is_nsec3_record(value),
        RecordType::RRSIG => is_rrsig_record(value),
        RecordType::SSHFP => is_sshfp_record(value),
    };
    trace!("{} record valid: {}", record_type, valid);
    valid
}

/// Requirements sentence shown when a record of this tag fails
pub fn record_requirements(record_type: &str) -> String {
    let hint = match record_type {
        "A" => "A records require: type='A', address (valid IPv4), optional ttl",
        "AAAA" => "AAAA records require: type='AAAA', address (valid IPv6), optional ttl",
        "MX" => {
            "MX records require: type='MX', priority (0-65535), exchange (valid FQDN), optional ttl"
        }
        "CNAME" => "CNAME records require: type='CNAME', value (valid FQDN), optional ttl",
        "TXT" => "TXT records require: type='TXT', entries (array of strings), optional ttl",
        "NS" => "NS records require: type='NS', value (valid FQDN), optional ttl",
        "PTR" => "PTR records require: type='PTR', value (valid FQDN), optional ttl",
        "SOA" => {
            "SOA records require: type='SOA', (primary|nsname), (admin|hostmaster), serial, refresh, retry, (expiration|expire), (minimum|minttl), optional ttl"
        }
        "SRV" => {
            "SRV records require: type='SRV', priority, weight, port, name (valid FQDN), optional ttl"
        }
        "CAA" => {
            "CAA records require: type='CAA', critical (0-255), and at least one property (issue, issuewild, iodef, etc.)"
        }
        "NAPTR" => {
            "NAPTR records require: type='NAPTR', order, preference, flags, service, regexp, replacement"
        }
        "TLSA" => {
            "TLSA records require: type='TLSA', (usage|certUsage) (0-3), selector (0-1), (matchingType|match) (0-2), (certificate|data) (hex string or binary)"
        }
        "ANY" => {
            "ANY records require: type='ANY', and either value or records (array of objects with a type), optional ttl"
        }
        "DNSKEY" => {
            "DNSKEY records require: type='DNSKEY', flags (0-65535), protocol (3), algorithm (valid DNSSEC), publicKey (hex string)"
        }
        "DS" => {
            "DS records require: type='DS', keyTag (0-65535), algorithm (valid DNSSEC), digestType (1-4), digest (hex string)"
        }
        "NSEC" => {
            "NSEC records require: type='NSEC', nextDomainName (valid FQDN), typeBitMaps (array of strings)"
        }
        "NSEC3" => {
            "NSEC3 records require: type='NSEC3', hashAlgorithm (1), flags (0-255), iterations (0-65535), salt (hex), nextHashedOwnerName, typeBitMaps"
        }
        "RRSIG" => {
            "RRSIG records require: type='RRSIG', typeCovered, algorithm, labels, originalTTL, signatureExpiration, signatureInception, keyTag, signerName, signature"
        }
        "SSHFP" => {
            "SSHFP records require: type='SSHFP', algorithm (1,2,3,4,6), fpType (1,2), fingerprint (hex string)"
        }
        other => {
            return format!(
                "Unsupported record type: {}. Supported types: {}",
                other,
                RecordType::supported_list()
            );
        }
    };
    hint.to_string()
}

/// Check any record and explain what is wrong with it
pub fn validate_dns_record(value: &Value) -> ValidationResult {
    let Some(r) = value.as_object() else {
        return ValidationResult::invalid("Record must be an object");
    };
    let Some(record_type) = r
        .get("type")
        .filter(|t| is_truthy(t))
        .and_then(Value::as_str)
    else {
        return ValidationResult::invalid("Record must have a valid type field");
    };

    let mut errors = Vec::new();
    if !is_dns_record(value) {
        debug!("Record of type {} failed validation", record_type);
        errors.push(format!(
            "Invalid {} record: Please check required fields and value formats",
            record_type
        ));
        errors.push(record_requirements(record_type));
    }
    ValidationResult::from_parts(errors, Vec::new())
}
