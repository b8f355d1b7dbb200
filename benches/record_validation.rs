use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dns_response_validator::dnssec::validate_rrsig;
use dns_response_validator::performance::{
    PatternCache, PatternKind, ValidationPatterns, fast_pre_validate,
};
use dns_response_validator::{is_dns_record, validate_a_record, validate_dns_record};
use serde_json::{Value, json};
use std::hint::black_box;

fn sample_records() -> Vec<(&'static str, Value)> {
    vec![
        ("a", json!({"type": "A", "address": "192.0.2.1", "ttl": 300})),
        ("aaaa", json!({"type": "AAAA", "address": "2001:db8::1"})),
        (
            "mx",
            json!({"type": "MX", "priority": 10, "exchange": "mail.example.com"}),
        ),
        (
            "soa",
            json!({
                "type": "SOA", "primary": "ns1.example.com", "admin": "hostmaster.example.com",
                "serial": 2024010101, "refresh": 3600, "retry": 600,
                "expiration": 604800, "minimum": 86400
            }),
        ),
        (
            "ds",
            json!({"type": "DS", "keyTag": 60485, "algorithm": 5, "digestType": 1, "digest": "2bb183af5f22588179a53b0a98631fad1a292118"}),
        ),
    ]
}

fn rrsig() -> Value {
    json!({
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

fn bench_predicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_dns_record");
    for (name, record) in sample_records() {
        group.bench_with_input(BenchmarkId::new("valid", name), &record, |b, record| {
            b.iter(|| is_dns_record(black_box(record)))
        });
    }
    group.finish();
}

fn bench_validators(c: &mut Criterion) {
    let invalid_mx = json!({"type": "MX", "exchange": "mail.example.com"});
    c.bench_function("validate_dns_record invalid", |b| {
        b.iter(|| validate_dns_record(black_box(&invalid_mx)))
    });

    let a = json!({"type": "A", "address": "10.0.0.1", "ttl": 30});
    c.bench_function("validate_a_record", |b| {
        b.iter(|| validate_a_record(black_box(&a)))
    });

    let signature = rrsig();
    c.bench_function("validate_rrsig", |b| {
        b.iter(|| validate_rrsig(black_box(&signature)))
    });
}

fn bench_pre_validation(c: &mut Criterion) {
    let cache = PatternCache::new();
    let Ok(patterns) = ValidationPatterns::new(&cache) else {
        return;
    };
    let name = json!("www.example.com");
    c.bench_function("fast_pre_validate fqdn", |b| {
        b.iter(|| fast_pre_validate(&patterns, black_box(&name), PatternKind::Fqdn))
    });
}

criterion_group!(benches, bench_predicates, bench_validators, bench_pre_validation);
criterion_main!(benches);
