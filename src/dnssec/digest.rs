use std::fmt;

/// DS digest algorithms (RFC 3658, 4509, 5933, 6605)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DigestAlgorithm {
    /// SHA-1 (RFC 3658)
    Sha1 = 1,
    /// SHA-256 (RFC 4509)
    Sha256 = 2,
    /// GOST R 34.11-94 (RFC 5933)
    Gost94 = 3,
    /// SHA-384 (RFC 6605)
    Sha384 = 4,
}

impl DigestAlgorithm {
    /// Create from digest type number
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Sha1),
            2 => Some(Self::Sha256),
            3 => Some(Self::Gost94),
            4 => Some(Self::Sha384),
            _ => None,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::from_u8)
    }

    /// Convert to digest type number
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Check if digest type is recommended
    pub fn is_recommended(&self) -> bool {
        matches!(self, Self::Sha256 | Self::Sha384)
    }

    /// Get the expected digest length in bytes
    pub fn digest_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Gost94 => 32,
            Self::Sha384 => 48,
        }
    }

    /// Expected digest length as hex characters
    pub fn hex_len(&self) -> usize {
        self.digest_len() * 2
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Gost94 => "GOST R 34.11-94",
            Self::Sha384 => "SHA-384",
        };
        write!(f, "{}", name)
    }
}

pub fn is_valid_digest_type(digest_type: i64) -> bool {
    DigestAlgorithm::from_i64(digest_type).is_some()
}

pub fn is_recommended_digest_algorithm(digest_type: i64) -> bool {
    DigestAlgorithm::from_i64(digest_type).is_some_and(|d| d.is_recommended())
}
