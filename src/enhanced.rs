//! Validators that report every problem with a record instead of a
//! yes/no answer. Only A, AAAA and MX have one.

use crate::format::{FqdnOptions, IpVersion, is_fqdn, is_ip};
use crate::types::ValidationResult;
use crate::utils::{as_integer, describe_value, is_valid_priority, is_valid_ttl};
use serde_json::{Map, Value};

/// Object check and type tag, the two failures that end validation early
fn tagged<'a>(value: &'a Value, tag: &str) -> Result<&'a Map<String, Value>, ValidationResult> {
    let Some(r) = value.as_object() else {
        return Err(ValidationResult::invalid("Record must be an object"));
    };
    match r.get("type") {
        Some(Value::String(t)) if t == tag => Ok(r),
        other => Err(ValidationResult::invalid(format!(
            "Expected record type '{}', got '{}'",
            tag,
            describe_value(other)
        ))),
    }
}

fn check_ttl(r: &Map<String, Value>, errors: &mut Vec<String>) {
    let invalid = r
        .get("ttl")
        .filter(|ttl| !as_integer(ttl).is_some_and(is_valid_ttl));
    if let Some(ttl) = invalid {
        errors.push(format!(
            "Invalid TTL value: {}. Must be between 0 and 2147483647 seconds",
            describe_value(Some(ttl))
        ));
    }
}

fn address_record(value: &Value, tag: &str, version: IpVersion, example: &str) -> ValidationResult {
    let r = match tagged(value, tag) {
        Ok(r) => r,
        Err(result) => return result,
    };

    let mut errors = Vec::new();
    match r.get("address").and_then(Value::as_str) {
        None => errors.push(format!(
            "{} record must have a 'address' field of type string",
            tag
        )),
        Some(address) if !is_ip(address, version) => {
            let family = match version {
                IpVersion::V4 => "IPv4",
                IpVersion::V6 => "IPv6",
            };
            errors.push(format!(
                "Invalid {} address: '{}'. Example: {}",
                family, address, example
            ));
        }
        Some(_) => {}
    }
    check_ttl(r, &mut errors);

    ValidationResult::from_parts(errors, Vec::new())
}

pub fn validate_a_record(value: &Value) -> ValidationResult {
    address_record(value, "A", IpVersion::V4, "192.168.1.1")
}

pub fn validate_aaaa_record(value: &Value) -> ValidationResult {
    address_record(value, "AAAA", IpVersion::V6, "2001:db8::1")
}

pub fn validate_mx_record(value: &Value) -> ValidationResult {
    let r = match tagged(value, "MX") {
        Ok(r) => r,
        Err(result) => return result,
    };

    let mut errors = Vec::new();
    match r.get("exchange").and_then(Value::as_str) {
        None => errors.push("MX record must have an 'exchange' field of type string".to_string()),
        Some(exchange) if !is_fqdn(exchange, FqdnOptions::default()) => errors.push(format!(
            "Invalid FQDN for exchange: '{}'. Example: mail.example.com",
            exchange
        )),
        Some(_) => {}
    }
    match r.get("priority") {
        Some(priority) if priority.is_number() => {
            if !as_integer(priority).is_some_and(is_valid_priority) {
                errors.push(format!(
                    "Invalid priority value: {}. Must be between 0 and 65535 (lower = higher priority)",
                    priority
                ));
            }
        }
        _ => errors.push("MX record must have a 'priority' field of type number".to_string()),
    }
    check_ttl(r, &mut errors);

    ValidationResult::from_parts(errors, Vec::new())
}

/// Advisory tips for a record type (case-insensitive)
pub fn get_validation_suggestions(record_type: &str) -> Vec<String> {
    let tips: &[&str] = match record_type.to_uppercase().as_str() {
        "A" => &[
            "A records should contain valid IPv4 addresses (e.g., 192.168.1.1)",
            "Consider setting a reasonable TTL value (300-3600 seconds for dynamic IPs)",
        ],
        "AAAA" => &[
            "AAAA records should contain valid IPv6 addresses (e.g., 2001:db8::1)",
            "IPv6 addresses can be compressed using :: notation",
        ],
        "MX" => &[
            "MX records require both priority and exchange fields",
            "Lower priority values indicate higher precedence",
            "Exchange must be a fully qualified domain name",
        ],
        "CNAME" => &[
            "CNAME records cannot coexist with other record types for the same name",
            "The target must be a fully qualified domain name",
        ],
        _ => &[
            "Ensure all required fields are present and correctly typed",
            "Check that string values are properly formatted",
        ],
    };
    tips.iter().map(|tip| tip.to_string()).collect()
}
