//! Checks over a whole query/response pair rather than one record.

use crate::context::ValidationContext;
use crate::enhanced::get_validation_suggestions;
use crate::error::DnsValidationError;
use crate::format::{FqdnOptions, is_fqdn};
use crate::types::{DnsQueryResult, RecordType, ValidationResult};
use crate::utils::{describe_value, is_truthy, ttl_ok};
use crate::validation::is_dns_record;
use serde_json::{Map, Value};
use tracing::debug;

const QUESTION_FIELDS: [&str; 3] = ["name", "type", "class"];

fn non_empty_string(record: &Map<String, Value>, key: &str) -> bool {
    record
        .get(key)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

/// Shape check for a query result: a complete question and answers that
/// all pass [`is_valid_dns_record`]
pub fn is_valid_dns_query_result(value: &Value) -> bool {
    let Some(r) = value.as_object() else {
        return false;
    };
    let Some(question) = r.get("question").and_then(Value::as_object) else {
        return false;
    };
    if !QUESTION_FIELDS.iter().all(|f| non_empty_string(question, f)) {
        return false;
    }
    r.get("answers")
        .and_then(Value::as_array)
        .is_some_and(|answers| answers.iter().all(is_valid_dns_record))
}

/// Loose record check: a known non-DNSSEC tag and a sane TTL, nothing more
pub fn is_valid_dns_record(value: &Value) -> bool {
    let Some(r) = value.as_object() else {
        return false;
    };
    let known = r
        .get("type")
        .and_then(Value::as_str)
        .and_then(|t| t.parse::<RecordType>().ok())
        // DNSSEC types are not part of a plain query answer
        .is_some_and(|t| !t.is_dnssec());
    known && ttl_ok(r)
}

/// Consistency of a response with its question.
///
/// A bad question name is an error; answers of another type and an empty
/// answer section are only warnings.
pub fn validate_dns_response(result: &DnsQueryResult) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let question = &result.question;

    let options = FqdnOptions {
        require_tld: true,
        ..FqdnOptions::default()
    };
    if !is_fqdn(&question.name, options) {
        errors.push(format!("Invalid domain name in question: {}", question.name));
    }

    if question.qtype != RecordType::ANY.as_str() {
        for answer in &result.answers {
            let answer_type = answer.get("type");
            if answer_type.and_then(Value::as_str) != Some(question.qtype.as_str()) {
                warnings.push(format!(
                    "Answer type {} does not match question type {}",
                    describe_value(answer_type),
                    question.qtype
                ));
            }
        }
    }

    if result.answers.is_empty() {
        warnings.push("No answers found in DNS response".to_string());
    }

    ValidationResult::from_parts(errors, warnings)
}

fn check_question(question: Option<&Value>, ctx: &mut ValidationContext) {
    ctx.enter_field("question");
    match question.and_then(Value::as_object) {
        None => ctx.add_error(DnsValidationError::invalid_query_structure(
            "Query result must have a question object",
            Some("question"),
        )),
        Some(q) => {
            for field in QUESTION_FIELDS {
                match q.get(field).filter(|v| is_truthy(v)) {
                    None => ctx.add_error(DnsValidationError::missing_required_field(
                        field, "question",
                    )),
                    Some(v) if !v.is_string() => ctx.add_error(
                        DnsValidationError::invalid_field_value(field, v, Some("string")),
                    ),
                    Some(_) => {}
                }
            }
        }
    }
    ctx.exit_field();
}

fn check_section_entry(entry: &Value, ctx: &mut ValidationContext) {
    let tag = entry.get("type");
    let record_type = tag.and_then(Value::as_str).and_then(|t| t.parse::<RecordType>().ok());
    let Some(record_type) = record_type else {
        let mut err = DnsValidationError::invalid_record_type(tag.unwrap_or(&Value::Null));
        err.field = Some(ctx.current_path());
        ctx.add_error(err);
        return;
    };
    if !is_dns_record(entry) {
        let path = ctx.current_path();
        debug!("Malformed {} record at {}", record_type, path);
        ctx.add_error(DnsValidationError::malformed_record(
            format!("Invalid {} record at {}", record_type, path),
            Some(&path),
            Some(entry),
        ));
        for tip in get_validation_suggestions(record_type.as_str()) {
            ctx.add_suggestion(tip);
        }
    }
}

fn check_section(
    record: &Map<String, Value>,
    name: &str,
    required: bool,
    ctx: &mut ValidationContext,
) {
    let entries = match record.get(name) {
        None if !required => return,
        Some(Value::Array(entries)) => entries,
        _ => {
            ctx.add_error(DnsValidationError::invalid_query_structure(
                format!("Query result field '{}' must be an array", name),
                Some(name),
            ));
            return;
        }
    };
    for (i, entry) in entries.iter().enumerate() {
        ctx.enter_field(format!("{}[{}]", name, i));
        check_section_entry(entry, ctx);
        ctx.exit_field();
    }
}

/// Walk a query result and record every structural problem in `ctx`,
/// with the path of the offending entry as the error field
pub fn validate_query_structure(value: &Value, ctx: &mut ValidationContext) {
    let Some(r) = value.as_object() else {
        ctx.add_error(DnsValidationError::invalid_query_structure(
            "Query result must be an object",
            None,
        ));
        return;
    };

    check_question(r.get("question"), ctx);
    check_section(r, "answers", true, ctx);
    check_section(r, "authority", false, ctx);
    check_section(r, "additional", false, ctx);

    if r.get("answers").and_then(Value::as_array).is_some_and(Vec::is_empty) {
        ctx.add_warning("No answers found in DNS response");
    }
}
