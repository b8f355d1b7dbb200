//! Typed DNSSEC record data, as returned by the strict validators.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RrsigRecord {
    pub type_covered: String,
    pub algorithm: u8,
    pub labels: u8,
    #[serde(rename = "originalTTL")]
    pub original_ttl: u64,
    pub signature_expiration: u64,
    pub signature_inception: u64,
    pub key_tag: u16,
    pub signer_name: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnskeyRecord {
    pub flags: u16,
    pub protocol: u8,
    pub algorithm: u8,
    pub public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DsRecord {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: u8,
    pub digest: String,
}

/// Serializes the bitmap under both `typeBitMaps` and the older `types` key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NsecRecord {
    pub next_domain_name: String,
    #[serde(alias = "types")]
    pub type_bit_maps: Vec<String>,
}

impl Serialize for NsecRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NsecRecord", 3)?;
        state.serialize_field("nextDomainName", &self.next_domain_name)?;
        state.serialize_field("typeBitMaps", &self.type_bit_maps)?;
        state.serialize_field("types", &self.type_bit_maps)?;
        state.end()
    }
}

impl NsecRecord {
    #[deprecated(note = "use `type_bit_maps`")]
    pub fn types(&self) -> &[String] {
        &self.type_bit_maps
    }
}

/// Serializes the bitmap under both `typeBitMaps` and the older `types` key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nsec3Record {
    pub hash_algorithm: u8,
    pub flags: u8,
    pub iterations: u16,
    pub salt: String,
    pub next_hashed_owner_name: String,
    #[serde(alias = "types")]
    pub type_bit_maps: Vec<String>,
}

impl Serialize for Nsec3Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Nsec3Record", 7)?;
        state.serialize_field("hashAlgorithm", &self.hash_algorithm)?;
        state.serialize_field("flags", &self.flags)?;
        state.serialize_field("iterations", &self.iterations)?;
        state.serialize_field("salt", &self.salt)?;
        state.serialize_field("nextHashedOwnerName", &self.next_hashed_owner_name)?;
        state.serialize_field("typeBitMaps", &self.type_bit_maps)?;
        state.serialize_field("types", &self.type_bit_maps)?;
        state.end()
    }
}

impl Nsec3Record {
    #[deprecated(note = "use `type_bit_maps`")]
    pub fn types(&self) -> &[String] {
        &self.type_bit_maps
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nsec3ParamRecord {
    pub hash_algorithm: u8,
    pub flags: u8,
    pub iterations: u16,
    pub salt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SshfpRecord {
    pub algorithm: u8,
    pub fp_type: u8,
    pub fingerprint: String,
}
