use super::errors::{Result, non_empty_str, reject, reject_structure};
use super::records::{Nsec3ParamRecord, Nsec3Record, NsecRecord};
use super::validator::{DOMAIN_NAME, int_within};
use crate::error::DnsValidationError;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

/// RR type mnemonics accepted in NSEC/NSEC3 type bitmaps
pub const RR_TYPE_MNEMONICS: [&str; 63] = [
    "A", "NS", "MD", "MF", "CNAME", "SOA", "MB", "MG", "MR", "NULL", "WKS", "PTR", "HINFO",
    "MINFO", "MX", "TXT", "RP", "AFSDB", "X25", "ISDN", "RT", "NSAP", "NSAP-PTR", "SIG", "KEY",
    "PX", "GPOS", "AAAA", "LOC", "NXT", "EID", "NIMLOC", "SRV", "ATMA", "NAPTR", "KX", "CERT",
    "A6", "DNAME", "SINK", "OPT", "APL", "DS", "SSHFP", "IPSECKEY", "RRSIG", "NSEC", "DNSKEY",
    "DHCID", "NSEC3", "NSEC3PARAM", "TLSA", "HIP", "NINFO", "RKEY", "TALINK", "CDS", "CDNSKEY",
    "OPENPGPKEY", "CSYNC", "ZONEMD", "SVCB", "HTTPS",
];

static BASE32: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z2-7]+=*$").expect("Failed to parse an internal regex!"));

static SALT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]*$").expect("Failed to parse an internal regex!"));

pub fn is_known_rr_type(mnemonic: &str) -> bool {
    RR_TYPE_MNEMONICS.contains(&mnemonic)
}

/// `types` must be an array of registered mnemonics. `prefix` is the
/// record type used in codes and messages (NSEC or NSEC3).
fn check_types(
    r: &Map<String, Value>,
    prefix: &str,
    array_code: &'static str,
    type_code: &'static str,
) -> Result<Vec<String>> {
    let Some(types) = r.get("types").and_then(Value::as_array) else {
        return Err(reject(
            format!("{} types must be an array", prefix),
            array_code,
            "types",
            r,
        ));
    };

    types
        .iter()
        .map(|entry| match entry.as_str() {
            Some(mnemonic) if is_known_rr_type(mnemonic) => Ok(mnemonic.to_string()),
            _ => {
                let shown = entry
                    .as_str()
                    .map_or_else(|| entry.to_string(), str::to_string);
                debug!("{} bitmap entry {} rejected", prefix, shown);
                Err(DnsValidationError::new(
                    format!("{} type \"{}\" is not a valid DNS record type", prefix, shown),
                    type_code,
                )
                .with_field("types", Some(entry)))
            }
        })
        .collect()
}

/// Shared NSEC3/NSEC3PARAM parameter checks: hash algorithm, flags,
/// iterations, salt
struct HashParams {
    flags: u8,
    iterations: u16,
    salt: String,
}

fn check_hash_params(
    r: &Map<String, Value>,
    prefix: &str,
    codes: [&'static str; 5],
) -> Result<HashParams> {
    let [hash_code, flags_code, iterations_code, salt_type_code, salt_format_code] = codes;

    if int_within(r, "hashAlgorithm", 1..=1).is_none() {
        return Err(reject(
            format!("{} hashAlgorithm must be 1 (SHA-1)", prefix),
            hash_code,
            "hashAlgorithm",
            r,
        ));
    }
    let Some(flags) = int_within(r, "flags", 0..=255) else {
        return Err(reject(
            format!("{} flags must be between 0 and 255", prefix),
            flags_code,
            "flags",
            r,
        ));
    };
    let Some(iterations) = int_within(r, "iterations", 0..=65535) else {
        return Err(reject(
            format!("{} iterations must be between 0 and 65535", prefix),
            iterations_code,
            "iterations",
            r,
        ));
    };
    let Some(salt) = r.get("salt").and_then(Value::as_str) else {
        return Err(reject(
            format!("{} salt must be a string", prefix),
            salt_type_code,
            "salt",
            r,
        ));
    };
    if salt != "-" && !SALT.is_match(salt) {
        return Err(reject(
            format!("{} salt must be hexadecimal or \"-\" for no salt", prefix),
            salt_format_code,
            "salt",
            r,
        ));
    }

    Ok(HashParams {
        flags: flags as u8,
        iterations: iterations as u16,
        salt: salt.to_string(),
    })
}

/// Check an NSEC record. The bitmap is read from `types`; the returned
/// record exposes it as `type_bit_maps`.
pub fn validate_nsec(value: &Value) -> Result<NsecRecord> {
    let Some(r) = value.as_object() else {
        return Err(reject_structure("NSEC", "INVALID_NSEC_STRUCTURE"));
    };

    let Some(next_domain_name) = non_empty_str(r, "nextDomainName") else {
        return Err(reject(
            "NSEC record must have a valid nextDomainName",
            "INVALID_NSEC_NEXT_DOMAIN",
            "nextDomainName",
            r,
        ));
    };
    if !DOMAIN_NAME.is_match(next_domain_name) {
        return Err(reject(
            "NSEC nextDomainName must be a valid domain name",
            "INVALID_NSEC_DOMAIN_FORMAT",
            "nextDomainName",
            r,
        ));
    }
    let type_bit_maps = check_types(r, "NSEC", "INVALID_NSEC_TYPES", "INVALID_NSEC_TYPE")?;

    Ok(NsecRecord {
        next_domain_name: next_domain_name.to_string(),
        type_bit_maps,
    })
}

pub fn validate_nsec3(value: &Value) -> Result<Nsec3Record> {
    let Some(r) = value.as_object() else {
        return Err(reject_structure("NSEC3", "INVALID_NSEC3_STRUCTURE"));
    };

    let params = check_hash_params(
        r,
        "NSEC3",
        [
            "INVALID_NSEC3_HASH_ALGORITHM",
            "INVALID_NSEC3_FLAGS",
            "INVALID_NSEC3_ITERATIONS",
            "INVALID_NSEC3_SALT_TYPE",
            "INVALID_NSEC3_SALT_FORMAT",
        ],
    )?;
    let Some(next_hashed) = non_empty_str(r, "nextHashedOwnerName") else {
        return Err(reject(
            "NSEC3 record must have a valid nextHashedOwnerName",
            "INVALID_NSEC3_NEXT_HASHED_NAME",
            "nextHashedOwnerName",
            r,
        ));
    };
    if !BASE32.is_match(next_hashed) {
        return Err(reject(
            "NSEC3 nextHashedOwnerName must be base32-encoded",
            "INVALID_NSEC3_NEXT_HASHED_FORMAT",
            "nextHashedOwnerName",
            r,
        ));
    }
    let type_bit_maps = check_types(r, "NSEC3", "INVALID_NSEC3_TYPES", "INVALID_NSEC3_TYPE")?;

    Ok(Nsec3Record {
        hash_algorithm: 1,
        flags: params.flags,
        iterations: params.iterations,
        salt: params.salt,
        next_hashed_owner_name: next_hashed.to_string(),
        type_bit_maps,
    })
}

pub fn validate_nsec3param(value: &Value) -> Result<Nsec3ParamRecord> {
    let Some(r) = value.as_object() else {
        return Err(reject_structure("NSEC3PARAM", "INVALID_NSEC3PARAM_STRUCTURE"));
    };

    let params = check_hash_params(
        r,
        "NSEC3PARAM",
        [
            "INVALID_NSEC3PARAM_HASH_ALGORITHM",
            "INVALID_NSEC3PARAM_FLAGS",
            "INVALID_NSEC3PARAM_ITERATIONS",
            "INVALID_NSEC3PARAM_SALT_TYPE",
            "INVALID_NSEC3PARAM_SALT_FORMAT",
        ],
    )?;

    Ok(Nsec3ParamRecord {
        hash_algorithm: 1,
        flags: params.flags,
        iterations: params.iterations,
        salt: params.salt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nsec3() -> Value {
        json!({
            "hashAlgorithm": 1,
            "flags": 1,
            "iterations": 10,
            "salt": "AABBCCDD",
            "nextHashedOwnerName": "KJHGFEDCBA234567MNOPQRSTUVWXYZAB",
            "types": ["A", "RRSIG"]
        })
    }

    #[test]
    fn test_registry_size() {
        assert_eq!(RR_TYPE_MNEMONICS.len(), 63);
        assert!(is_known_rr_type("NSAP-PTR"));
        assert!(is_known_rr_type("HTTPS"));
        assert!(!is_known_rr_type("CAA"));
        assert!(!is_known_rr_type("a"));
    }

    #[test]
    #[allow(deprecated)]
    fn test_nsec_types() {
        let record = validate_nsec(&json!({
            "nextDomainName": "host.example.com.",
            "types": ["A", "MX", "RRSIG", "NSEC"]
        }))
        .unwrap();
        assert_eq!(record.types(), record.type_bit_maps.as_slice());
        assert_eq!(record.type_bit_maps.len(), 4);

        let err = validate_nsec(&json!({"nextDomainName": "example.com", "types": ["A", "BOGUS"]})).unwrap_err();
        assert_eq!(err.code, "INVALID_NSEC_TYPE");
        assert_eq!(err.message, "NSEC type \"BOGUS\" is not a valid DNS record type");

        let err = validate_nsec(&json!({"nextDomainName": "example.com", "types": "A MX"})).unwrap_err();
        assert_eq!(err.code, "INVALID_NSEC_TYPES");

        let err = validate_nsec(&json!({"nextDomainName": "exa mple.com", "types": []})).unwrap_err();
        assert_eq!(err.code, "INVALID_NSEC_DOMAIN_FORMAT");
    }

    #[test]
    fn test_nsec3_validation() {
        let record = validate_nsec3(&nsec3()).unwrap();
        assert_eq!(record.iterations, 10);

        // Lowercase base32 is rejected
        let mut lower = nsec3();
        lower["nextHashedOwnerName"] = json!("kjhgfedcba234567mnopqrstuvwxyzab");
        assert_eq!(validate_nsec3(&lower).unwrap_err().code, "INVALID_NSEC3_NEXT_HASHED_FORMAT");

        let mut dash = nsec3();
        dash["salt"] = json!("-");
        assert_eq!(validate_nsec3(&dash).unwrap().salt, "-");

        let mut bad_salt = nsec3();
        bad_salt["salt"] = json!("xyz");
        let err = validate_nsec3(&bad_salt).unwrap_err();
        assert_eq!(err.code, "INVALID_NSEC3_SALT_FORMAT");
        assert_eq!(err.message, "NSEC3 salt must be hexadecimal or \"-\" for no salt");

        let mut numeric_salt = nsec3();
        numeric_salt["salt"] = json!(1234);
        assert_eq!(validate_nsec3(&numeric_salt).unwrap_err().code, "INVALID_NSEC3_SALT_TYPE");

        let mut hash = nsec3();
        hash["hashAlgorithm"] = json!(2);
        hash["flags"] = json!(999);
        assert_eq!(validate_nsec3(&hash).unwrap_err().code, "INVALID_NSEC3_HASH_ALGORITHM");

        let mut bad_type = nsec3();
        bad_type["types"] = json!(["A", 5]);
        assert_eq!(validate_nsec3(&bad_type).unwrap_err().code, "INVALID_NSEC3_TYPE");
    }

    #[test]
    fn test_nsec3param_validation() {
        let ok = json!({"hashAlgorithm": 1, "flags": 0, "iterations": 0, "salt": ""});
        assert!(validate_nsec3param(&ok).is_ok());
        let err = validate_nsec3param(&json!({"hashAlgorithm": 1, "flags": 0, "iterations": 70000, "salt": ""}))
            .unwrap_err();
        assert_eq!(err.code, "INVALID_NSEC3PARAM_ITERATIONS");
        assert_eq!(
            validate_nsec3param(&json!([1, 0, 0, ""])).unwrap_err().code,
            "INVALID_NSEC3PARAM_STRUCTURE"
        );
    }
}
