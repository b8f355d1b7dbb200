use dns_response_validator::dnssec::{
    DigestAlgorithm, DnsSecAlgorithm, DnskeyRecord, FixedClock, calculate_key_tag,
    is_dnskey_record, is_ds_record, is_nsec3_record, is_rrsig_record, is_sshfp_record,
    validate_dnskey, validate_ds, validate_nsec, validate_nsec3, validate_nsec3param,
    validate_rrsig, validate_signature_timestamps_with,
};
use dns_response_validator::{ErrorKind, is_dns_record};
use serde_json::{Value, json};

fn rrsig() -> Value {
    json!({
        "type": "RRSIG",
        "typeCovered": "A",
        "algorithm": 13,
        "labels": 2,
        "originalTTL": 3600,
        "signatureExpiration": 1700003600,
        "signatureInception": 1700000000,
        "keyTag": 2371,
        "signerName": "example.com.",
        "signature": "oJB1W6WNGv+ldvQ3WDG0MQkg5IEhjRip8WTrPYGv07h108dUKGMeDPKijVCHX3DDKdfb+v6oB9wfuh3DTJXUAfI="
    })
}

#[test]
fn test_algorithm_registry() {
    assert_eq!(DnsSecAlgorithm::from_u8(13), Some(DnsSecAlgorithm::EcdsaP256Sha256));
    assert_eq!(DnsSecAlgorithm::from_u8(4), None);
    assert!(DnsSecAlgorithm::Ed25519.is_recommended());
    assert!(!DnsSecAlgorithm::RsaSha1.is_recommended());
    assert_eq!(DigestAlgorithm::Sha256.hex_len(), 64);
    assert_eq!(DigestAlgorithm::from_u8(5), None);
}

#[test]
fn test_rrsig_strict_and_predicate_differ_on_encoding() {
    // base64 signature: accepted by the strict path only
    let record = validate_rrsig(&rrsig()).unwrap();
    assert_eq!(record.key_tag, 2371);
    assert_eq!(record.original_ttl, 3600);
    assert!(!is_rrsig_record(&rrsig()));

    let mut hex = rrsig();
    hex["signature"] = json!("a1b2c3d4");
    hex["signerName"] = json!("example.com");
    assert!(is_rrsig_record(&hex));
    assert!(is_dns_record(&hex));
}

#[test]
fn test_rrsig_equal_timestamps_rejected() {
    let mut record = rrsig();
    record["signatureInception"] = json!(100);
    record["signatureExpiration"] = json!(100);
    let err = validate_rrsig(&record).unwrap_err();
    assert_eq!(err.code, "INVALID_RRSIG_TIMESTAMP_ORDER");
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[test]
fn test_rrsig_first_failure_wins() {
    let mut record = rrsig();
    record["algorithm"] = json!(99);
    record["keyTag"] = json!(-1);
    assert_eq!(
        validate_rrsig(&record).unwrap_err().code,
        "INVALID_RRSIG_ALGORITHM"
    );
    assert_eq!(
        validate_rrsig(&json!(null)).unwrap_err().code,
        "INVALID_RRSIG_STRUCTURE"
    );
}

#[test]
fn test_dnskey_wrong_protocol() {
    let err = validate_dnskey(&json!({"flags": 1, "protocol": 2, "algorithm": 8, "publicKey": "QQ=="}))
        .unwrap_err();
    assert_eq!(err.code, "INVALID_DNSKEY_PROTOCOL");
    assert_eq!(err.field.as_deref(), Some("protocol"));
    assert_eq!(err.value, Some(json!(2)));
}

#[test]
fn test_dnskey_and_key_tag() {
    let key = validate_dnskey(&json!({
        "flags": 257, "protocol": 3, "algorithm": 8, "publicKey": "AwEAAag="
    }))
    .unwrap();
    assert_eq!(
        key,
        DnskeyRecord {
            flags: 257,
            protocol: 3,
            algorithm: 8,
            public_key: "AwEAAag=".to_string(),
        }
    );
    assert_eq!(calculate_key_tag(&key), 63639);

    assert!(is_dnskey_record(&json!({
        "type": "DNSKEY", "flags": 256, "protocol": 3, "algorithm": 13, "publicKey": "deadbeef"
    })));
}

#[test]
fn test_ds_digest_length() {
    let ds = |digest: String| json!({"keyTag": 60485, "algorithm": 5, "digestType": 1, "digest": digest});
    assert!(validate_ds(&ds("a".repeat(40))).is_ok());
    for len in [39, 41] {
        assert_eq!(
            validate_ds(&ds("a".repeat(len))).unwrap_err().code,
            "INVALID_DS_DIGEST_LENGTH"
        );
    }
    assert!(is_ds_record(&json!({
        "type": "DS", "keyTag": 60485, "algorithm": 5, "digestType": 2, "digest": "ab12"
    })));
}

#[test]
fn test_nsec_family() {
    let nsec = validate_nsec(&json!({"nextDomainName": "b.example.com.", "types": ["A", "RRSIG", "NSEC"]}))
        .unwrap();
    assert_eq!(nsec.type_bit_maps.len(), 3);
    assert_eq!(
        validate_nsec(&json!({"nextDomainName": "b.example.com", "types": ["A", "BOGUS"]}))
            .unwrap_err()
            .code,
        "INVALID_NSEC_TYPE"
    );

    let nsec3 = json!({
        "hashAlgorithm": 1, "flags": 0, "iterations": 10, "salt": "AABBCCDD",
        "nextHashedOwnerName": "KJHGFEDCBA234567MNOPQRSTUVWXYZAB", "types": ["A", "AAAA"]
    });
    assert!(validate_nsec3(&nsec3).is_ok());
    assert!(validate_nsec3param(&json!({"hashAlgorithm": 1, "flags": 0, "iterations": 0, "salt": "-"})).is_ok());
    assert_eq!(
        validate_nsec3param(&json!({"hashAlgorithm": 2, "flags": 0, "iterations": 0, "salt": ""}))
            .unwrap_err()
            .code,
        "INVALID_NSEC3PARAM_HASH_ALGORITHM"
    );

    assert!(is_nsec3_record(&json!({
        "type": "NSEC3", "hashAlgorithm": 1, "flags": 1, "iterations": 0, "salt": "",
        "nextHashedOwnerName": "anything", "typeBitMaps": ["A"]
    })));
}

#[test]
fn test_sshfp() {
    assert!(is_sshfp_record(&json!({"type": "SSHFP", "algorithm": 4, "fpType": 2, "fingerprint": "abcd"})));
    assert!(!is_sshfp_record(&json!({"type": "SSHFP", "algorithm": 5, "fpType": 2, "fingerprint": "abcd"})));
}

#[test]
fn test_signature_window_with_skew() {
    let clock = FixedClock(1_000);
    assert!(validate_signature_timestamps_with(&clock, 1_200, 2_000, 300));
    assert!(!validate_signature_timestamps_with(&clock, 1_400, 2_000, 300));
    assert!(validate_signature_timestamps_with(&clock, 0, 800, 300));
    assert!(!validate_signature_timestamps_with(&clock, 0, 600, 300));
}

#[test]
fn test_repeated_calls_agree() {
    let record = rrsig();
    assert_eq!(is_dns_record(&record), is_dns_record(&record));
    assert_eq!(validate_rrsig(&record), validate_rrsig(&record));

    let mut bad = rrsig();
    bad["labels"] = json!(-1);
    assert_eq!(validate_rrsig(&bad), validate_rrsig(&bad));

    let ds = json!({"keyTag": 60485, "algorithm": 5, "digestType": 1, "digest": "a".repeat(39)});
    let first = validate_ds(&ds);
    assert!(first.is_err());
    assert_eq!(first, validate_ds(&ds));
}
