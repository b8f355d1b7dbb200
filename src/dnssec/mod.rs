//! DNSSEC record checks.
//!
//! Two families live here: boolean predicates ([`predicates`]) used by the
//! generic dispatcher, and strict validators ([`validator`], [`denial`])
//! that return the first violated constraint as a coded
//! [`DnsValidationError`](crate::error::DnsValidationError).

pub mod algorithm;
pub mod denial;
pub mod digest;
pub mod errors;
pub mod key_tag;
pub mod predicates;
pub mod records;
pub mod timestamps;
pub mod validator;

pub use algorithm::{
    DnsSecAlgorithm, DnskeyFlags, Nsec3HashAlgorithm, SshfpAlgorithm, SshfpFingerprintType,
    VALID_ALGORITHMS, is_recommended_algorithm, is_valid_dnssec_algorithm,
};
pub use denial::{RR_TYPE_MNEMONICS, validate_nsec, validate_nsec3, validate_nsec3param};
pub use digest::{DigestAlgorithm, is_recommended_digest_algorithm};
pub use key_tag::calculate_key_tag;
pub use predicates::{
    is_dnskey_record, is_ds_record, is_nsec_record, is_nsec3_record, is_rrsig_record,
    is_sshfp_record,
};
pub use records::{
    DnskeyRecord, DsRecord, Nsec3ParamRecord, Nsec3Record, NsecRecord, RrsigRecord, SshfpRecord,
};
pub use timestamps::{
    Clock, DEFAULT_CLOCK_SKEW, FixedClock, SystemClock, validate_signature_timestamps,
    validate_signature_timestamps_with,
};
pub use validator::{validate_dnskey, validate_ds, validate_rrsig};
