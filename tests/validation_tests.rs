use dns_response_validator::types::{CaaRecord, DnsRecord, SoaRecord, TxtRecord};
use dns_response_validator::validation::{
    is_any_record, is_caa_record, is_naptr_record, is_soa_record, is_tlsa_record, is_txt_record,
    record_requirements,
};
use dns_response_validator::{ValidationResult, is_dns_record, validate_dns_record};
use serde_json::{Value, json};

fn soa() -> Value {
    json!({
        "type": "SOA",
        "primary": "ns1.example.com",
        "admin": "hostmaster.example.com",
        "serial": 2024010101,
        "refresh": 3600,
        "retry": 600,
        "expiration": 604800,
        "minimum": 86400,
        "ttl": 3600
    })
}

#[test]
fn test_valid_a_record_end_to_end() {
    let record = json!({"type": "A", "address": "192.168.1.1", "ttl": 300});
    assert!(is_dns_record(&record));
    assert_eq!(validate_dns_record(&record), ValidationResult::valid());
}

#[test]
fn test_every_traditional_type_dispatches() {
    let valid = [
        json!({"type": "A", "address": "10.0.0.1"}),
        json!({"type": "AAAA", "address": "fe80::1"}),
        json!({"type": "CNAME", "value": "alias.example.com"}),
        json!({"type": "NS", "value": "ns1.example.com"}),
        json!({"type": "PTR", "value": "host.example.org"}),
        json!({"type": "MX", "priority": 10, "exchange": "mail.example.com"}),
        json!({"type": "TXT", "entries": ["v=spf1 -all"]}),
        soa(),
        json!({"type": "SRV", "priority": 0, "weight": 0, "port": 443, "name": "svc.example.com"}),
        json!({"type": "CAA", "critical": 0, "issue": "letsencrypt.org"}),
        json!({
            "type": "NAPTR", "order": 100, "preference": 10, "flags": "U",
            "service": "E2U+sip", "regexp": "!^.*$!sip:info@example.com!", "replacement": ""
        }),
        json!({"type": "TLSA", "usage": 3, "selector": 1, "matchingType": 1, "certificate": "abcdef0123"}),
        json!({"type": "ANY", "value": "anything"}),
    ];
    for record in &valid {
        assert!(is_dns_record(record), "expected valid: {}", record);
    }
}

#[test]
fn test_unknown_or_missing_type() {
    assert!(!is_dns_record(&json!({"type": "SPF", "value": "x"})));
    assert!(!is_dns_record(&json!({"type": "a", "address": "10.0.0.1"})));
    assert!(!is_dns_record(&json!({"address": "10.0.0.1"})));
    assert!(!is_dns_record(&Value::Null));
}

#[test]
fn test_validate_dns_record_messages() {
    assert_eq!(
        validate_dns_record(&json!("A")).errors,
        vec!["Record must be an object"]
    );
    assert_eq!(
        validate_dns_record(&json!({"type": ""})).errors,
        vec!["Record must have a valid type field"]
    );
    assert_eq!(
        validate_dns_record(&json!({"type": 5})).errors,
        vec!["Record must have a valid type field"]
    );

    let result = validate_dns_record(&json!({"type": "MX", "exchange": "mail.example.com"}));
    assert!(!result.is_valid);
    assert_eq!(
        result.errors[0],
        "Invalid MX record: Please check required fields and value formats"
    );
    assert_eq!(result.errors[1], record_requirements("MX"));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_unsupported_type_hint_lists_types() {
    let result = validate_dns_record(&json!({"type": "HINFO"}));
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[1].starts_with("Unsupported record type: HINFO. Supported types: "));
    assert!(result.errors[1].contains("SSHFP"));
}

#[test]
fn test_caa_requires_a_property() {
    assert!(!is_caa_record(&json!({"type": "CAA", "critical": 0})));
    assert!(is_caa_record(&json!({"type": "CAA", "critical": 128, "iodef": "mailto:sec@example.com"})));
    assert!(is_caa_record(&json!({"type": "CAA", "critical": 0, "contactemail": "sec@example.com"})));
    assert!(!is_caa_record(&json!({"type": "CAA", "critical": 0, "contactemail": "not-an-email"})));
    assert!(!is_caa_record(&json!({"type": "CAA", "critical": 256, "issue": "ca.example.net"})));
}

#[test]
fn test_soa_field_conventions() {
    assert!(is_soa_record(&soa()));
    assert!(is_soa_record(&json!({
        "type": "SOA", "nsname": "ns1.example.com", "hostmaster": "admin.example.com",
        "serial": 1, "refresh": 2, "retry": 3, "expire": 4, "minttl": 5
    })));

    let mut missing = soa();
    missing.as_object_mut().unwrap().remove("minimum");
    assert!(!is_soa_record(&missing));

    let mut bad_admin = soa();
    bad_admin["admin"] = json!("nodots");
    assert!(!is_soa_record(&bad_admin));
}

#[test]
fn test_txt_entries() {
    assert!(is_txt_record(&json!({"type": "TXT", "entries": []})));
    assert!(is_txt_record(&json!({"type": "TXT", "entries": [""]})));
    assert!(!is_txt_record(&json!({"type": "TXT", "entries": ["line\nbreak"]})));
    assert!(!is_txt_record(&json!({"type": "TXT", "entries": "v=spf1"})));
}

#[test]
fn test_naptr_flags_and_replacement() {
    let naptr = |flags: &str, replacement: &str| {
        json!({
            "type": "NAPTR", "order": 1, "preference": 1, "flags": flags,
            "service": "SIP+D2U", "regexp": "", "replacement": replacement
        })
    };
    assert!(!is_naptr_record(&naptr("s", "_sip._udp.example.com.")));
    assert!(is_naptr_record(&naptr("s", "sip.example.com")));
    assert!(!is_naptr_record(&naptr("Q", "sip.example.com")));
}

#[test]
fn test_tlsa_conventions() {
    assert!(is_tlsa_record(&json!({
        "type": "TLSA", "certUsage": 2, "selector": 0, "match": 2, "data": [0, 1, 254]
    })));
    assert!(is_tlsa_record(&json!({
        "type": "TLSA", "certUsage": 2, "selector": 0, "match": 2, "data": "beef"
    })));
    assert!(!is_tlsa_record(&json!({
        "type": "TLSA", "usage": 4, "selector": 0, "matchingType": 0, "certificate": "beef"
    })));
    assert!(!is_tlsa_record(&json!({
        "type": "TLSA", "usage": 0, "selector": 0, "matchingType": 0, "certificate": "xyz"
    })));
}

#[test]
fn test_any_record_shapes() {
    assert!(is_any_record(&json!({
        "type": "ANY",
        "records": [{"type": "A", "address": "1.1.1.1"}, {"type": "AAAA", "address": "::1"}]
    })));
    assert!(!is_any_record(&json!({"type": "ANY", "records": [{"address": "1.1.1.1"}]})));
    assert!(!is_any_record(&json!({"type": "ANY"})));
}

#[test]
fn test_typed_records_serialize_to_valid_shapes() {
    let records = [
        DnsRecord::TXT(TxtRecord {
            entries: vec!["hello".to_string()],
            ttl: Some(60),
        }),
        DnsRecord::CAA(CaaRecord {
            critical: 0,
            issue: Some("ca.example.net".to_string()),
            ..CaaRecord::default()
        }),
        DnsRecord::SOA(SoaRecord {
            primary: "ns1.example.com".to_string(),
            admin: "admin.example.com".to_string(),
            serial: 1,
            refresh: 7200,
            retry: 3600,
            expiration: 1209600,
            minimum: 300,
            ttl: None,
        }),
    ];
    for record in &records {
        assert!(is_dns_record(&record.to_value()), "{:?}", record);
    }
}
