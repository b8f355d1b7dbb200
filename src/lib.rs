pub mod cli;
pub mod compat;
pub mod config;
pub mod context;
pub mod dnssec;
pub mod enhanced;
pub mod error;
pub mod format;
pub mod performance;
pub mod query;
pub mod types;
pub mod utils;
pub mod validation;

pub use compat::{
    from_node_resolve_any, from_node_txt, is_node_soa_shape, is_node_tlsa_shape, normalize_soa,
    normalize_tlsa, normalized_soa, normalized_tlsa, to_any_record, to_node_txt,
};
pub use context::{DetailedValidationResult, ValidationContext};
pub use enhanced::{
    get_validation_suggestions, validate_a_record, validate_aaaa_record, validate_mx_record,
};
pub use error::{DnsValidationError, ErrorKind, NodeDnsErrorCode, is_node_dns_error_code};
pub use query::{
    is_valid_dns_query_result, is_valid_dns_record, validate_dns_response, validate_query_structure,
};
pub use types::{DnsQueryResult, DnsRecord, Question, RecordType, ValidationResult};
pub use validation::{is_dns_record, validate_dns_record};
