//! Interop with records shaped like the Node.js `dns` resolver output.
//!
//! SOA and TLSA have two field spellings in circulation:
//!
//! | canonical    | resolver     |
//! |--------------|--------------|
//! | primary      | nsname       |
//! | admin        | hostmaster   |
//! | expiration   | expire       |
//! | minimum      | minttl       |
//! | usage        | certUsage    |
//! | matchingType | match        |
//! | certificate  | data         |
//!
//! The normalizers copy whichever spelling is present onto the missing one.

use crate::types::{AnyRecord, TxtRecord};
use crate::utils::{is_byte_buffer, is_truthy, record_of};
use serde_json::{Map, Value};
use tracing::trace;

/// How a field counts as "present" when deciding whether to copy it
#[derive(Clone, Copy)]
enum Presence {
    /// Any value except a falsy one (`""`, `0`, `null`, `false`)
    Truthy,
    /// Any value, including falsy ones
    Defined,
}

fn is_present(record: &Map<String, Value>, key: &str, presence: Presence) -> bool {
    match (record.get(key), presence) {
        (None, _) => false,
        (Some(v), Presence::Truthy) => is_truthy(v),
        (Some(_), Presence::Defined) => true,
    }
}

/// Copy `from` onto `to` when `from` is present and `to` is not
fn alias(record: &mut Map<String, Value>, from: &str, to: &str, presence: Presence) {
    if !is_present(record, from, presence) || is_present(record, to, presence) {
        return;
    }
    if let Some(v) = record.get(from).cloned() {
        trace!("Aliasing {} -> {}", from, to);
        record.insert(to.to_string(), v);
    }
}

fn alias_both(record: &mut Map<String, Value>, a: &str, b: &str, presence: Presence) {
    alias(record, a, b, presence);
    alias(record, b, a, presence);
}

/// Fill in the missing spelling of each SOA field, in place.
/// Non-object values are left untouched.
pub fn normalize_soa(record: &mut Value) {
    let Some(r) = record.as_object_mut() else {
        return;
    };
    alias_both(r, "primary", "nsname", Presence::Truthy);
    alias_both(r, "admin", "hostmaster", Presence::Truthy);
    alias_both(r, "expiration", "expire", Presence::Defined);
    alias_both(r, "minimum", "minttl", Presence::Defined);
}

/// Fill in the missing spelling of each TLSA field, in place. Binary
/// `data` is never copied onto `certificate`.
pub fn normalize_tlsa(record: &mut Value) {
    let Some(r) = record.as_object_mut() else {
        return;
    };
    alias_both(r, "usage", "certUsage", Presence::Defined);
    alias_both(r, "matchingType", "match", Presence::Defined);
    alias(r, "certificate", "data", Presence::Truthy);
    if r.get("data").is_some_and(Value::is_string) {
        alias(r, "data", "certificate", Presence::Truthy);
    }
}

/// Copying form of [`normalize_soa`]
pub fn normalized_soa(record: &Value) -> Value {
    let mut copy = record.clone();
    normalize_soa(&mut copy);
    copy
}

/// Copying form of [`normalize_tlsa`]
pub fn normalized_tlsa(record: &Value) -> Value {
    let mut copy = record.clone();
    normalize_tlsa(&mut copy);
    copy
}

/// SOA already using the resolver field names
pub fn is_node_soa_shape(value: &Value) -> bool {
    let Some(r) = record_of(value, "SOA") else {
        return false;
    };
    ["nsname", "hostmaster"]
        .iter()
        .all(|k| r.get(*k).is_some_and(Value::is_string))
        && ["serial", "refresh", "retry", "expire", "minttl"]
            .iter()
            .all(|k| r.get(*k).is_some_and(Value::is_number))
}

/// TLSA already using the resolver field names
pub fn is_node_tlsa_shape(value: &Value) -> bool {
    let Some(r) = record_of(value, "TLSA") else {
        return false;
    };
    ["certUsage", "selector", "match"]
        .iter()
        .all(|k| r.get(*k).is_some_and(Value::is_number))
        && r.get("data").is_some_and(|d| d.is_string() || is_byte_buffer(d))
}

/// Wrap heterogeneous records in an ANY container, unvalidated
pub fn to_any_record(records: Vec<Value>) -> AnyRecord {
    AnyRecord {
        value: None,
        records: Some(records),
        ttl: None,
    }
}

/// ANY container from a resolver's `resolveAny` answer
pub fn from_node_resolve_any(answers: Vec<Value>) -> AnyRecord {
    to_any_record(answers)
}

/// One TXT record per chunk list; `ttl` is applied only when given
pub fn from_node_txt(records: &[Vec<String>], ttl: Option<u32>) -> Vec<TxtRecord> {
    records
        .iter()
        .map(|chunks| TxtRecord {
            entries: chunks.clone(),
            ttl,
        })
        .collect()
}

pub fn to_node_txt(records: &[TxtRecord]) -> Vec<Vec<String>> {
    records.iter().map(|r| r.entries.clone()).collect()
}
