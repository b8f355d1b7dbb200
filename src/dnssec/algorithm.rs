use std::fmt;

/// DNSSEC algorithm numbers (RFC 4034, 5155, 5702, 5933, 6605, 8080)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DnsSecAlgorithm {
    /// RSA/MD5 (deprecated)
    RsaMd5 = 1,
    /// Diffie-Hellman
    DH = 2,
    /// DSA/SHA1 (RFC 2536)
    DSA = 3,
    /// RSA/SHA-1 (RFC 3110)
    RsaSha1 = 5,
    /// DSA-NSEC3-SHA1 (RFC 5155)
    DsaNsec3Sha1 = 6,
    /// RSASHA1-NSEC3-SHA1 (RFC 5155)
    RsaSha1Nsec3Sha1 = 7,
    /// RSA/SHA-256 (RFC 5702)
    RsaSha256 = 8,
    /// RSA/SHA-512 (RFC 5702)
    RsaSha512 = 10,
    /// GOST R 34.10-2001 (RFC 5933)
    EccGost = 12,
    /// ECDSA Curve P-256 with SHA-256 (RFC 6605)
    EcdsaP256Sha256 = 13,
    /// ECDSA Curve P-384 with SHA-384 (RFC 6605)
    EcdsaP384Sha384 = 14,
    /// Ed25519 (RFC 8080)
    Ed25519 = 15,
    /// Ed448 (RFC 8080)
    Ed448 = 16,
}

/// Algorithm numbers accepted by the record predicates. DH (2) is
/// registered but never valid for signing records.
pub const VALID_ALGORITHMS: [u8; 12] = [1, 3, 5, 6, 7, 8, 10, 12, 13, 14, 15, 16];

impl DnsSecAlgorithm {
    /// Create from algorithm number
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::RsaMd5),
            2 => Some(Self::DH),
            3 => Some(Self::DSA),
            5 => Some(Self::RsaSha1),
            6 => Some(Self::DsaNsec3Sha1),
            7 => Some(Self::RsaSha1Nsec3Sha1),
            8 => Some(Self::RsaSha256),
            10 => Some(Self::RsaSha512),
            12 => Some(Self::EccGost),
            13 => Some(Self::EcdsaP256Sha256),
            14 => Some(Self::EcdsaP384Sha384),
            15 => Some(Self::Ed25519),
            16 => Some(Self::Ed448),
            _ => None,
        }
    }

    /// Convert to algorithm number
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Member of [`VALID_ALGORITHMS`]
    pub fn is_valid(&self) -> bool {
        VALID_ALGORITHMS.contains(&self.to_u8())
    }

    /// Check if algorithm is recommended for new deployments
    pub fn is_recommended(&self) -> bool {
        matches!(
            self,
            Self::RsaSha256
                | Self::RsaSha512
                | Self::EcdsaP256Sha256
                | Self::EcdsaP384Sha384
                | Self::Ed25519
                | Self::Ed448
        )
    }
}

impl fmt::Display for DnsSecAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RsaMd5 => "RSAMD5",
            Self::DH => "DH",
            Self::DSA => "DSA",
            Self::RsaSha1 => "RSASHA1",
            Self::DsaNsec3Sha1 => "DSA-NSEC3-SHA1",
            Self::RsaSha1Nsec3Sha1 => "RSASHA1-NSEC3-SHA1",
            Self::RsaSha256 => "RSASHA256",
            Self::RsaSha512 => "RSASHA512",
            Self::EccGost => "ECC-GOST",
            Self::EcdsaP256Sha256 => "ECDSAP256SHA256",
            Self::EcdsaP384Sha384 => "ECDSAP384SHA384",
            Self::Ed25519 => "ED25519",
            Self::Ed448 => "ED448",
        };
        write!(f, "{}", name)
    }
}

fn as_u8(value: i64) -> Option<u8> {
    u8::try_from(value).ok()
}

pub fn is_valid_dnssec_algorithm(algorithm: i64) -> bool {
    as_u8(algorithm).is_some_and(|a| VALID_ALGORITHMS.contains(&a))
}

pub fn is_recommended_algorithm(algorithm: i64) -> bool {
    as_u8(algorithm)
        .and_then(DnsSecAlgorithm::from_u8)
        .is_some_and(|a| a.is_recommended())
}

/// NSEC3 hash algorithms (RFC 5155); only SHA-1 is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Nsec3HashAlgorithm {
    Sha1 = 1,
}

impl Nsec3HashAlgorithm {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Sha1),
            _ => None,
        }
    }
}

pub fn is_valid_nsec3_hash_algorithm(algorithm: i64) -> bool {
    as_u8(algorithm)
        .and_then(Nsec3HashAlgorithm::from_u8)
        .is_some()
}

/// DNSKEY flag bits
pub struct DnskeyFlags;

impl DnskeyFlags {
    pub const ZONE_KEY: u16 = 0x0100;
    pub const REVOKE: u16 = 0x0080;
    pub const SEP: u16 = 0x0001;

    pub fn is_zone_key(flags: u16) -> bool {
        flags & Self::ZONE_KEY != 0
    }

    pub fn is_sep(flags: u16) -> bool {
        flags & Self::SEP != 0
    }

    pub fn is_revoked(flags: u16) -> bool {
        flags & Self::REVOKE != 0
    }
}

/// SSHFP public key algorithms (RFC 4255, 6594, 7479, 8709)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SshfpAlgorithm {
    Rsa = 1,
    Dss = 2,
    Ecdsa = 3,
    Ed25519 = 4,
    Ed448 = 6,
}

impl SshfpAlgorithm {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Rsa),
            2 => Some(Self::Dss),
            3 => Some(Self::Ecdsa),
            4 => Some(Self::Ed25519),
            6 => Some(Self::Ed448),
            _ => None,
        }
    }
}

/// SSHFP fingerprint types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SshfpFingerprintType {
    Sha1 = 1,
    Sha256 = 2,
}

impl SshfpFingerprintType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Sha1),
            2 => Some(Self::Sha256),
            _ => None,
        }
    }
}

pub fn is_valid_sshfp_algorithm(algorithm: i64) -> bool {
    as_u8(algorithm).and_then(SshfpAlgorithm::from_u8).is_some()
}

pub fn is_valid_sshfp_fingerprint_type(fp_type: i64) -> bool {
    as_u8(fp_type)
        .and_then(SshfpFingerprintType::from_u8)
        .is_some()
}
