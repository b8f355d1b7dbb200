//! Fast-path helpers for hot validation loops: a compiled pattern cache,
//! cheap pre-checks, typed field access and a timing tracker.
//!
//! Nothing here is global. The caller constructs a [`PatternCache`] and a
//! [`ValidationPerformanceTracker`] and passes them where needed.

use crate::context::DetailedValidationResult;
use crate::types::{RecordType, ValidationResult};
use crate::utils::as_integer;
use parking_lot::Mutex;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::trace;

const IPV4_PATTERN: &str = r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$";
const HEX_PATTERN: &str = r"^[0-9a-fA-F]+$";
const FQDN_PATTERN: &str =
    r"^[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?(\.([a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?))*$";
const EMAIL_PATTERN: &str = r"^[^@]+@[^@]+\.[^@]+$";

/// Compiled regular expressions keyed by pattern source
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: Mutex<HashMap<String, Regex>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled form of `pattern`, compiling and storing it on first use
    pub fn get(&self, pattern: &str) -> Result<Regex, regex::Error> {
        let mut patterns = self.patterns.lock();
        if let Some(regex) = patterns.get(pattern) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(regex.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!("Compiling pattern {}", pattern);
        let regex = Regex::new(pattern)?;
        patterns.insert(pattern.to_string(), regex.clone());
        Ok(regex)
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.patterns.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.lock().is_empty()
    }
}

/// Which of the [`ValidationPatterns`] to pre-check against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Ipv4,
    Hex,
    Fqdn,
    Email,
}

/// Permissive patterns that reject obviously bad input before the full
/// format checks run
#[derive(Debug, Clone)]
pub struct ValidationPatterns {
    pub ipv4: Regex,
    pub hex: Regex,
    pub fqdn: Regex,
    pub email: Regex,
}

impl ValidationPatterns {
    pub fn new(cache: &PatternCache) -> Result<Self, regex::Error> {
        Ok(Self {
            ipv4: cache.get(IPV4_PATTERN)?,
            hex: cache.get(HEX_PATTERN)?,
            fqdn: cache.get(FQDN_PATTERN)?,
            email: cache.get(EMAIL_PATTERN)?,
        })
    }

    pub fn pattern(&self, kind: PatternKind) -> &Regex {
        match kind {
            PatternKind::Ipv4 => &self.ipv4,
            PatternKind::Hex => &self.hex,
            PatternKind::Fqdn => &self.fqdn,
            PatternKind::Email => &self.email,
        }
    }
}

/// `Some(false)` when `value` is definitely invalid, `None` when the full
/// validation still has to decide
pub fn fast_pre_validate(
    patterns: &ValidationPatterns,
    value: &Value,
    kind: PatternKind,
) -> Option<bool> {
    match value.as_str() {
        Some(s) if !s.is_empty() && patterns.pattern(kind).is_match(s) => None,
        _ => Some(false),
    }
}

pub fn is_plain_object(value: &Value) -> bool {
    value.is_object()
}

pub fn is_valid_integer_in_range(value: &Value, min: i64, max: i64) -> bool {
    as_integer(value).is_some_and(|n| (min..=max).contains(&n))
}

/// Expected JSON type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Object,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Object => value.is_object(),
        }
    }
}

/// Lookup result for a field that may legitimately be missing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionalField<'a> {
    Absent,
    Present(&'a Value),
    WrongType,
}

/// The field when present with the expected type
pub fn get_required_field<'a>(
    record: &'a Map<String, Value>,
    field: &str,
    kind: FieldKind,
) -> Option<&'a Value> {
    record.get(field).filter(|v| kind.matches(v))
}

pub fn get_optional_field<'a>(
    record: &'a Map<String, Value>,
    field: &str,
    kind: FieldKind,
) -> OptionalField<'a> {
    match record.get(field) {
        None => OptionalField::Absent,
        Some(v) if kind.matches(v) => OptionalField::Present(v),
        Some(_) => OptionalField::WrongType,
    }
}

/// Any of the 19 supported tags
pub fn is_valid_record_type(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|t| t.parse::<RecordType>().is_ok())
}

/// Point-in-time copy of a tracker's counters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetrics {
    pub total_validations: u64,
    pub successful_validations: u64,
    pub average_time_ms: f64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

#[derive(Debug, Default)]
struct TrackerState {
    metrics: ValidationMetrics,
    total_time_ms: f64,
}

/// Counts validations and their running average duration
#[derive(Debug, Default)]
pub struct ValidationPerformanceTracker {
    state: Mutex<TrackerState>,
}

impl ValidationPerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_validation(&self, duration_ms: f64) {
        let mut state = self.state.lock();
        state.metrics.total_validations += 1;
        state.total_time_ms += duration_ms;
        state.metrics.average_time_ms =
            state.total_time_ms / state.metrics.total_validations as f64;
    }

    pub fn record_success(&self) {
        self.state.lock().metrics.successful_validations += 1;
    }

    pub fn record_cache_hit(&self) {
        self.state.lock().metrics.cache_hits += 1;
    }

    pub fn record_cache_miss(&self) {
        self.state.lock().metrics.cache_misses += 1;
    }

    pub fn metrics(&self) -> ValidationMetrics {
        self.state.lock().metrics.clone()
    }

    pub fn reset(&self) {
        *self.state.lock() = TrackerState::default();
    }
}

/// Outcomes that [`track_performance`] can count as a success
pub trait ValidationOutcome {
    fn is_success(&self) -> bool;
}

impl ValidationOutcome for ValidationResult {
    fn is_success(&self) -> bool {
        self.is_valid
    }
}

impl ValidationOutcome for DetailedValidationResult {
    fn is_success(&self) -> bool {
        self.is_valid
    }
}

impl ValidationOutcome for bool {
    fn is_success(&self) -> bool {
        *self
    }
}

impl<T, E> ValidationOutcome for Result<T, E> {
    fn is_success(&self) -> bool {
        self.is_ok()
    }
}

/// Run `validate`, recording its duration and whether it succeeded
pub fn track_performance<T, F>(tracker: &ValidationPerformanceTracker, validate: F) -> T
where
    T: ValidationOutcome,
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let outcome = validate();
    if outcome.is_success() {
        tracker.record_success();
    }
    tracker.record_validation(start.elapsed().as_secs_f64() * 1000.0);
    outcome
}
