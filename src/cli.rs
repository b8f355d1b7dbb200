//! Command-line front end: argument structures, per-item validation and
//! output rendering.

use crate::config::{CliConfig, OutputFormat};
use crate::dnssec::{Clock, SystemClock, validate_signature_timestamps_with};
use crate::enhanced::{validate_a_record, validate_aaaa_record, validate_mx_record};
use crate::query::validate_dns_response;
use crate::types::{DnsQueryResult, RecordType, ValidationResult};
use crate::utils::field_int;
use crate::validation::is_dns_record;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled, settings::Style};
use thiserror::Error;
use tracing::{debug, warn};

const PREVIEW_LEN: usize = 50;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Must provide either --data or --file option")]
    MissingInput,

    #[error("Must provide --file option")]
    MissingFile,

    #[error("Input file must contain a JSON array")]
    NotAnArray,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validate DNS records and query responses
#[derive(Debug, Parser)]
#[command(
    name = "dns-response-validator",
    version,
    about = "CLI tool for validating DNS records and queries",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a single DNS record
    Record(RecordArgs),
    /// Validate a DNS query response
    Query(QueryArgs),
    /// Validate multiple DNS records or queries from a file
    Bulk(BulkArgs),
    /// Show usage examples
    Examples,
}

/// Flags shared by every validating subcommand
#[derive(Debug, Args)]
pub struct CommonOpts {
    /// Write results to file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Strict validation mode
    #[arg(short, long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// DNS record type (A, AAAA, MX, etc.)
    #[arg(short = 't', long = "type")]
    pub record_type: Option<String>,

    /// DNS record data as JSON string
    #[arg(short, long)]
    pub data: Option<String>,

    /// Read DNS record from JSON file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonOpts,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// DNS query data as JSON string
    #[arg(short, long)]
    pub data: Option<String>,

    /// Read DNS query from JSON file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonOpts,
}

#[derive(Debug, Args)]
pub struct BulkArgs {
    /// Input file containing JSON array of records/queries
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Default record type for records without type field
    #[arg(long = "type")]
    pub record_type: Option<String>,

    /// What the input array holds
    #[arg(long, value_enum, default_value = "records")]
    pub mode: BulkMode,

    #[command(flatten)]
    pub common: CommonOpts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BulkMode {
    Records,
    Queries,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        match &self.command {
            Command::Record(args) => args.common.verbose,
            Command::Query(args) => args.common.verbose,
            Command::Bulk(args) => args.common.verbose,
            Command::Examples => false,
        }
    }
}

/// Settings for validating one record
#[derive(Debug, Clone, Default)]
pub struct RecordOptions {
    /// Overrides the record's own `type`
    pub record_type: Option<String>,
    pub strict: bool,
    pub clock_skew: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordOutcome {
    pub success: bool,
    pub record: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "type")]
    pub record_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutcome {
    pub success: bool,
    pub query: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result for one input item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Record(RecordOutcome),
    Query(QueryOutcome),
}

impl Outcome {
    pub fn success(&self) -> bool {
        match self {
            Outcome::Record(r) => r.success,
            Outcome::Query(q) => q.success,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Record(r) => r.error.as_deref(),
            Outcome::Query(q) => q.error.as_deref(),
        }
    }

    fn label(&self) -> &str {
        match self {
            Outcome::Record(r) => &r.record_type,
            Outcome::Query(_) => "Query",
        }
    }

    fn payload(&self) -> &Value {
        match self {
            Outcome::Record(r) => &r.record,
            Outcome::Query(q) => &q.query,
        }
    }
}

fn declared_type<'a>(record: &'a Value, options: &'a RecordOptions) -> Option<&'a str> {
    options
        .record_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .or_else(|| {
            record
                .get("type")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
        })
}

fn record_failure(record: &Value, record_type: &str, error: String) -> RecordOutcome {
    debug!("Record rejected: {}", error);
    RecordOutcome {
        success: false,
        record: record.clone(),
        validation: None,
        error: Some(error),
        record_type: record_type.to_string(),
    }
}

/// Warn when an otherwise valid RRSIG is not valid right now
fn signature_window_warning<C: Clock + ?Sized>(
    record: &Map<String, Value>,
    clock: &C,
    clock_skew: i64,
) -> Option<String> {
    let inception = field_int(record, "signatureInception")?;
    let expiration = field_int(record, "signatureExpiration")?;
    if validate_signature_timestamps_with(clock, inception, expiration, clock_skew) {
        None
    } else {
        Some("Signature validity period does not include the current time".to_string())
    }
}

/// Validate one record the way the `record` subcommand does
pub fn validate_single_record(record: &Value, options: &RecordOptions) -> RecordOutcome {
    validate_single_record_with(&SystemClock, record, options)
}

pub fn validate_single_record_with<C: Clock + ?Sized>(
    clock: &C,
    record: &Value,
    options: &RecordOptions,
) -> RecordOutcome {
    let Some(record_type) = declared_type(record, options) else {
        let fallback = record
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        return record_failure(
            record,
            fallback,
            "Record type must be specified either in the record or via --type option".to_string(),
        );
    };

    let mut fields = record.as_object().cloned().unwrap_or_default();
    fields.insert("type".to_string(), Value::from(record_type));
    let with_type = Value::Object(fields);

    let is_valid = is_dns_record(&with_type);
    if !is_valid && options.strict {
        return record_failure(
            record,
            record_type,
            format!("Invalid {} record structure", record_type),
        );
    }

    let upper = record_type.to_uppercase();
    let validation = match upper.parse::<RecordType>() {
        Ok(RecordType::A) => validate_a_record(&with_type),
        Ok(RecordType::AAAA) => validate_aaaa_record(&with_type),
        Ok(RecordType::MX) => validate_mx_record(&with_type),
        Ok(known) if is_valid => {
            let mut result = ValidationResult::valid();
            if known == RecordType::RRSIG {
                let window = with_type
                    .as_object()
                    .and_then(|r| signature_window_warning(r, clock, options.clock_skew));
                result.warnings.extend(window);
            }
            result
        }
        Ok(known) => ValidationResult::invalid(format!("Invalid {} record", known)),
        Err(_) => {
            warn!("Unknown record type: {}", record_type);
            ValidationResult {
                is_valid,
                errors: Vec::new(),
                warnings: vec![format!("Unknown record type: {}", record_type)],
            }
        }
    };

    RecordOutcome {
        success: true,
        record: with_type,
        validation: Some(validation),
        error: None,
        record_type: record_type.to_string(),
    }
}

/// Validate one query response the way the `query` subcommand does.
/// Only input that is not a query result at all fails.
pub fn validate_query(query: &Value) -> QueryOutcome {
    match serde_json::from_value::<DnsQueryResult>(query.clone()) {
        Ok(parsed) => QueryOutcome {
            success: true,
            query: query.clone(),
            validation: Some(validate_dns_response(&parsed)),
            record_count: Some(parsed.answers.len()),
            error: None,
        },
        Err(e) => {
            debug!("Query rejected: {}", e);
            QueryOutcome {
                success: false,
                query: query.clone(),
                validation: None,
                record_count: None,
                error: Some(e.to_string()),
            }
        }
    }
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Record/Query")]
    payload: String,
    #[tabled(rename = "Result")]
    result: String,
}

fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_LEN).collect();
    format!("{}...", head)
}

fn render_table(results: &[Outcome]) -> String {
    let rows: Vec<OutcomeRow> = results
        .iter()
        .map(|outcome| OutcomeRow {
            kind: outcome.label().to_string(),
            status: if outcome.success() { "✓ Valid" } else { "✗ Invalid" },
            payload: preview(&outcome.payload().to_string()),
            result: match outcome.error() {
                None => "OK".to_string(),
                Some(error) => preview(error),
            },
        })
        .collect();
    Table::new(rows).with(Style::ascii()).to_string()
}

fn csv_field(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn render_csv(results: &[Outcome]) -> String {
    let mut lines = vec!["\"Type\",\"Success\",\"Error\",\"RecordData\"".to_string()];
    for outcome in results {
        let cells = [
            outcome.label().to_string(),
            outcome.success().to_string(),
            outcome.error().unwrap_or_default().to_string(),
            outcome.payload().to_string(),
        ];
        lines.push(
            cells
                .iter()
                .map(|c| csv_field(c))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// Render results in the chosen format
pub fn format_output(results: &[Outcome], format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(results)?,
        OutputFormat::Table => render_table(results),
        OutputFormat::Csv => render_csv(results),
    })
}

fn read_input(data: Option<&str>, file: Option<&Path>) -> Result<Value, CliError> {
    if let Some(data) = data.filter(|d| d.starts_with('{')) {
        return Ok(serde_json::from_str(data)?);
    }
    let Some(path) = file else {
        return Err(CliError::MissingInput);
    };
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            println!("Results written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

struct Resolved {
    format: OutputFormat,
    strict: bool,
}

fn resolve(common: &CommonOpts, config: &CliConfig) -> Resolved {
    Resolved {
        format: common.format.unwrap_or(config.format),
        strict: common.strict || config.strict,
    }
}

fn run_record(args: &RecordArgs, config: &CliConfig) -> Result<bool, CliError> {
    let settings = resolve(&args.common, config);
    let record = read_input(args.data.as_deref(), args.file.as_deref())?;
    let options = RecordOptions {
        record_type: args.record_type.clone(),
        strict: settings.strict,
        clock_skew: config.clock_skew,
    };
    let outcome = Outcome::Record(validate_single_record(&record, &options));
    let success = outcome.success();
    emit(
        &format_output(&[outcome], settings.format)?,
        args.common.output.as_deref(),
    )?;
    Ok(success)
}

fn run_query(args: &QueryArgs, config: &CliConfig) -> Result<bool, CliError> {
    let settings = resolve(&args.common, config);
    let query = read_input(args.data.as_deref(), args.file.as_deref())?;
    let outcome = Outcome::Query(validate_query(&query));
    let success = outcome.success();
    emit(
        &format_output(&[outcome], settings.format)?,
        args.common.output.as_deref(),
    )?;
    Ok(success)
}

fn run_bulk(args: &BulkArgs, config: &CliConfig) -> Result<bool, CliError> {
    let settings = resolve(&args.common, config);
    let Some(path) = args.file.as_deref() else {
        return Err(CliError::MissingFile);
    };
    let content = fs::read_to_string(path)?;
    let Value::Array(items) = serde_json::from_str::<Value>(&content)? else {
        return Err(CliError::NotAnArray);
    };

    let options = RecordOptions {
        record_type: args.record_type.clone(),
        strict: settings.strict,
        clock_skew: config.clock_skew,
    };
    let total = items.len();
    let results: Vec<Outcome> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if args.common.verbose {
                eprintln!("Processing item {}/{}...", index + 1, total);
            }
            match args.mode {
                BulkMode::Queries => Outcome::Query(validate_query(item)),
                BulkMode::Records => Outcome::Record(validate_single_record(item, &options)),
            }
        })
        .collect();

    emit(
        &format_output(&results, settings.format)?,
        args.common.output.as_deref(),
    )?;

    let succeeded = results.iter().filter(|r| r.success()).count();
    let failed = results.len() - succeeded;
    eprintln!("\nSummary: {} succeeded, {} failed", succeeded, failed);
    Ok(failed == 0)
}

const EXAMPLES: &str = r#"
DNS Validator CLI - Usage Examples

1. Validate a single A record:
   dns-response-validator record --type A --data '{"name":"example.com","address":"192.168.1.1","ttl":300}'

2. Validate a record from file:
   dns-response-validator record --file record.json --format table

3. Validate a DNS query response:
   dns-response-validator query --file query.json --verbose

4. Bulk validate records:
   dns-response-validator bulk --file records.json --format csv --output results.csv

5. Bulk validate with strict mode:
   dns-response-validator bulk --file records.json --strict --verbose

Sample A record JSON:
{
  "type": "A",
  "name": "example.com",
  "address": "192.168.1.1",
  "ttl": 300
}

Sample DNS query JSON:
{
  "question": {
    "name": "example.com",
    "type": "A",
    "class": "IN"
  },
  "answers": [
    {
      "type": "A",
      "name": "example.com",
      "address": "192.168.1.1",
      "ttl": 300
    }
  ]
}
"#;

/// Execute the parsed command. `Ok(false)` means at least one item failed.
pub fn run(cli: &Cli, config: &CliConfig) -> Result<bool, CliError> {
    match &cli.command {
        Command::Record(args) => run_record(args, config),
        Command::Query(args) => run_query(args, config),
        Command::Bulk(args) => run_bulk(args, config),
        Command::Examples => {
            println!("{}", EXAMPLES);
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dnssec::FixedClock;
    use serde_json::json;

    fn options(strict: bool) -> RecordOptions {
        RecordOptions {
            record_type: None,
            strict,
            clock_skew: 300,
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_enhanced_types_report_field_errors() {
        let outcome = validate_single_record(&json!({"type": "A", "address": "999.1.1.1"}), &options(false));
        assert!(outcome.success);
        let validation = outcome.validation.unwrap();
        assert!(!validation.is_valid);
        assert!(validation.errors[0].contains("Invalid IPv4 address"));
    }

    #[test]
    fn test_type_override() {
        let opts = RecordOptions {
            record_type: Some("CNAME".to_string()),
            ..options(false)
        };
        let outcome = validate_single_record(&json!({"type": "A", "value": "www.example.com"}), &opts);
        assert_eq!(outcome.record["type"], "CNAME");
        assert_eq!(outcome.validation, Some(ValidationResult::valid()));
    }

    #[test]
    fn test_strict_rejects() {
        let outcome = validate_single_record(&json!({"type": "TXT", "entries": "x"}), &options(true));
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Invalid TXT record structure"));

        let outcome = validate_single_record(&json!({"type": "BOGUS"}), &options(true));
        assert_eq!(outcome.error.as_deref(), Some("Invalid BOGUS record structure"));
    }

    #[test]
    fn test_lenient_unknown_and_invalid() {
        let outcome = validate_single_record(&json!({"type": "BOGUS"}), &options(false));
        assert!(outcome.success);
        let validation = outcome.validation.unwrap();
        assert!(!validation.is_valid);
        assert_eq!(validation.warnings, vec!["Unknown record type: BOGUS"]);

        let outcome = validate_single_record(&json!({"type": "NS", "value": "bad name"}), &options(false));
        assert_eq!(outcome.validation.unwrap().errors, vec!["Invalid NS record"]);
    }

    #[test]
    fn test_missing_type() {
        let outcome = validate_single_record(&json!({"address": "1.1.1.1"}), &options(false));
        assert!(!outcome.success);
        assert_eq!(outcome.record_type, "unknown");
    }

    #[test]
    fn test_rrsig_window_warning() {
        let rrsig = json!({
            "type": "RRSIG", "typeCovered": "A", "algorithm": 8, "labels": 2,
            "originalTTL": 300, "signatureExpiration": 2000, "signatureInception": 1000,
            "keyTag": 12345, "signerName": "example.com", "signature": "abcdef"
        });
        let inside = validate_single_record_with(&FixedClock(1500), &rrsig, &options(false));
        assert_eq!(inside.validation, Some(ValidationResult::valid()));

        let outside = validate_single_record_with(&FixedClock(5000), &rrsig, &options(false));
        let validation = outside.validation.unwrap();
        assert!(validation.is_valid);
        assert_eq!(validation.warnings.len(), 1);
    }

    #[test]
    fn test_query_outcome() {
        let outcome = validate_query(&json!({
            "question": {"name": "example.com", "type": "A", "class": "IN"},
            "answers": [{"type": "A", "address": "1.1.1.1"}]
        }));
        assert!(outcome.success);
        assert_eq!(outcome.record_count, Some(1));

        let outcome = validate_query(&json!({"answers": []}));
        assert!(!outcome.success);
        assert!(outcome.error.is_some());
    }

    #[test]
    fn test_csv_quoting() {
        let results = vec![Outcome::Record(RecordOutcome {
            success: false,
            record: json!({"type": "TXT"}),
            validation: None,
            error: Some("bad \"quote\"".to_string()),
            record_type: "TXT".to_string(),
        })];
        let csv = format_output(&results, OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "\"Type\",\"Success\",\"Error\",\"RecordData\"");
        assert_eq!(lines[1], r#""TXT","false","bad ""quote""","{""type"":""TXT""}""#);
    }

    #[test]
    fn test_table_preview() {
        let results = vec![Outcome::Query(validate_query(&json!({"answers": []})))];
        let table = format_output(&results, OutputFormat::Table).unwrap();
        assert!(table.contains("Record/Query"));
        assert!(table.contains("Query"));
        assert!(table.contains("✗ Invalid"));
        assert_eq!(preview("abc"), "abc...");
        assert_eq!(preview(&"x".repeat(80)).len(), 53);
    }
}
