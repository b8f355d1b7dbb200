use super::records::DnskeyRecord;

/// Key tag over the textual DNSKEY fields.
///
/// This is not the RFC 4034 Appendix B checksum: it sums the character
/// codes of `"{flags}{protocol}{algorithm}{publicKey}"` (even positions
/// shifted into the high byte), folds the carry and keeps 16 bits.
/// Existing tags depend on this exact value.
pub fn calculate_key_tag(dnskey: &DnskeyRecord) -> u16 {
    let data = format!(
        "{}{}{}{}",
        dnskey.flags, dnskey.protocol, dnskey.algorithm, dnskey.public_key
    );

    let mut accumulator: u64 = 0;
    for (i, unit) in data.encode_utf16().enumerate() {
        if i % 2 == 0 {
            accumulator += u64::from(unit) << 8;
        } else {
            accumulator += u64::from(unit);
        }
    }

    accumulator += (accumulator >> 16) & 0xFFFF;
    (accumulator & 0xFFFF) as u16
}
