//! String format checks used by the record predicates: IP literals,
//! fully-qualified domain names, mailbox addresses and hex strings.

use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
}

/// Options for [`is_fqdn`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FqdnOptions {
    pub require_tld: bool,
    pub allow_underscores: bool,
    pub allow_trailing_dot: bool,
    pub allow_numeric_tld: bool,
}

impl Default for FqdnOptions {
    fn default() -> Self {
        Self {
            require_tld: true,
            allow_underscores: false,
            allow_trailing_dot: false,
            allow_numeric_tld: false,
        }
    }
}

const MAX_LABEL_LENGTH: usize = 63;
const MAX_EMAIL_LENGTH: usize = 254;
const MAX_EMAIL_LOCAL_LENGTH: usize = 64;

/// Check an IP literal of the given version.
///
/// IPv6 literals may carry a `%zone` suffix. Dotted quads with leading
/// zeros are rejected.
pub fn is_ip(s: &str, version: IpVersion) -> bool {
    match version {
        IpVersion::V4 => s.parse::<Ipv4Addr>().is_ok(),
        IpVersion::V6 => {
            let (addr, zone) = match s.split_once('%') {
                Some((addr, zone)) => (addr, Some(zone)),
                None => (s, None),
            };
            if let Some(zone) = zone {
                if zone.is_empty()
                    || !zone
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
                {
                    return false;
                }
            }
            addr.parse::<Ipv6Addr>().is_ok()
        }
    }
}

fn is_label_char(c: char, allow_underscores: bool) -> bool {
    c.is_ascii_alphanumeric()
        || c == '-'
        || (allow_underscores && c == '_')
        || (!c.is_ascii() && c.is_alphanumeric())
}

fn is_valid_tld(tld: &str) -> bool {
    let lower = tld.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("xn") {
        if rest.len() >= 2 && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return true;
        }
    }
    tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)
}

pub fn is_fqdn(s: &str, options: FqdnOptions) -> bool {
    let name = match s.strip_suffix('.') {
        Some(stripped) if options.allow_trailing_dot => stripped,
        _ => s,
    };
    if name.is_empty() {
        return false;
    }

    let labels: Vec<&str> = name.split('.').collect();
    let Some(tld) = labels.last() else {
        return false;
    };

    if options.require_tld && (labels.len() < 2 || !is_valid_tld(tld)) {
        return false;
    }
    if !options.allow_numeric_tld && !tld.is_empty() && tld.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && label.chars().count() <= MAX_LABEL_LENGTH
            && label.chars().all(|c| is_label_char(c, options.allow_underscores))
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c) || (!c.is_ascii() && !c.is_control())
}

/// Mailbox check: dot-atom local part, FQDN domain. Quoted local parts
/// and address literals are not accepted.
pub fn is_email(s: &str) -> bool {
    if s.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > MAX_EMAIL_LOCAL_LENGTH {
        return false;
    }
    if !local
        .split('.')
        .all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
    {
        return false;
    }
    is_fqdn(&domain.to_lowercase(), FqdnOptions::default())
}

/// Non-empty string of hex digits
pub fn is_hexadecimal(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}
