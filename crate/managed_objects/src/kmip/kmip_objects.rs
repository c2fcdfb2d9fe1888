use std::fmt::{self, Display};

use num_bigint_dig::BigInt;
use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Serialize,
};
use strum::VariantNames;
use tracing::trace;

use super::{
    kmip_data_structures::KeyBlock,
    kmip_types::{
        CertificateType, ObjectType, OpaqueDataType, ResultReason, SecretDataType, SplitKeyMethod,
    },
};
use crate::error::KmipError;

/// A certificate, DER-encoded
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Certificate {
    pub certificate_type: CertificateType,
    pub certificate_value: Vec<u8>,
}

/// A secret that is neither a key nor a certificate. The material sits in an
/// opaque Key Block.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SecretData {
    pub secret_data_type: SecretDataType,
    pub key_block: KeyBlock,
}

/// One share of a split key. `key_part_identifier` is the share held here,
/// out of `split_key_parts`; `split_key_threshold` shares rebuild the key.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SplitKey {
    pub split_key_parts: i32,
    pub key_part_identifier: i32,
    pub split_key_threshold: i32,
    pub split_key_method: SplitKeyMethod,
    /// Set for polynomial sharing over a prime field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prime_field_size: Option<BigInt>,
    pub key_block: KeyBlock,
}

#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct SymmetricKey {
    pub key_block: KeyBlock,
}

#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PrivateKey {
    pub key_block: KeyBlock,
}

#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PublicKey {
    pub key_block: KeyBlock,
}

/// Data stored without interpretation
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OpaqueObject {
    pub opaque_data_type: OpaqueDataType,
    pub opaque_data_value: Vec<u8>,
}

/// A text-based representation of a PGP key. It has no counterpart in the
/// simplified object model.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq)]
pub struct PGPKey {
    #[serde(rename = "PGPKeyVersion")]
    pub pgp_key_version: u32,
    #[serde(rename = "KeyBlock")]
    pub key_block: KeyBlock,
}

// variant names are the struct names; the Deserialize impl below matches on them
#[derive(Debug, Serialize, Clone, Eq, PartialEq, VariantNames)]
pub enum Object {
    Certificate(Certificate),
    SecretData(SecretData),
    SplitKey(SplitKey),
    SymmetricKey(SymmetricKey),
    PrivateKey(PrivateKey),
    PublicKey(PublicKey),
    OpaqueObject(OpaqueObject),
    PGPKey(PGPKey),
}

impl<'de> Deserialize<'de> for Object {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ObjectVisitor;

        impl<'de> Visitor<'de> for ObjectVisitor {
            type Value = Object;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a KMIP managed object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                if let Some(key) = map.next_key::<String>()? {
                    trace!("Object Visitor: visit_map: key: {key:?}");
                    return match key.as_str() {
                        "SymmetricKey" => Ok(Object::SymmetricKey(map.next_value()?)),
                        "PublicKey" => Ok(Object::PublicKey(map.next_value()?)),
                        "PrivateKey" => Ok(Object::PrivateKey(map.next_value()?)),
                        "SplitKey" => Ok(Object::SplitKey(map.next_value()?)),
                        "SecretData" => Ok(Object::SecretData(map.next_value()?)),
                        "PGPKey" => Ok(Object::PGPKey(map.next_value()?)),
                        "OpaqueObject" => Ok(Object::OpaqueObject(map.next_value()?)),
                        "Certificate" => Ok(Object::Certificate(map.next_value()?)),
                        x => Err(serde::de::Error::custom(format!(
                            "Invalid Object: {x}. One of the following is expected: {:?}",
                            Object::VARIANTS
                        ))),
                    };
                }
                Err(serde::de::Error::custom("Invalid Object"))
            }
        }

        deserializer.deserialize_map(ObjectVisitor)
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Certificate(Certificate {
                certificate_type,
                certificate_value,
            }) => {
                write!(
                    f,
                    "Certificate(certificate_type: {certificate_type}, certificate_value: {} \
                     bytes)",
                    certificate_value.len()
                )
            }
            Self::SecretData(SecretData {
                secret_data_type,
                key_block,
            }) => {
                write!(
                    f,
                    "SecretData(secret_data_type: {secret_data_type}, key_block: {key_block})"
                )
            }
            Self::SplitKey(SplitKey {
                split_key_parts,
                key_part_identifier,
                split_key_threshold,
                split_key_method,
                key_block,
                prime_field_size,
            }) => {
                write!(
                    f,
                    "SplitKey(split_key_parts: {split_key_parts}, key_part_identifier: \
                     {key_part_identifier}, split_key_threshold: {split_key_threshold}, \
                     split_key_method: {split_key_method}, key_block: {key_block}, prime field \
                     size: {prime_field_size:?})"
                )
            }
            Self::SymmetricKey(SymmetricKey { key_block }) => {
                write!(f, "SymmetricKey(key_block: {key_block})")
            }
            Self::PrivateKey(PrivateKey { key_block }) => {
                write!(f, "PrivateKey(key_block: {key_block})")
            }
            Self::PublicKey(PublicKey { key_block }) => {
                write!(f, "PublicKey(key_block: {key_block})")
            }
            Self::OpaqueObject(OpaqueObject {
                opaque_data_type,
                opaque_data_value,
            }) => {
                write!(
                    f,
                    "OpaqueObject(opaque_data_type: {opaque_data_type}, opaque_data_value: {} \
                     bytes)",
                    opaque_data_value.len()
                )
            }
            Self::PGPKey(PGPKey {
                pgp_key_version,
                key_block,
            }) => {
                write!(
                    f,
                    "PGPKey(pgp_key_version: {pgp_key_version}, key_block: {key_block})"
                )
            }
        }
    }
}

impl Object {
    /// The KMIP object type tag of the variant
    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        match self {
            Self::Certificate { .. } => ObjectType::Certificate,
            Self::SecretData { .. } => ObjectType::SecretData,
            Self::SplitKey { .. } => ObjectType::SplitKey,
            Self::SymmetricKey { .. } => ObjectType::SymmetricKey,
            Self::PrivateKey { .. } => ObjectType::PrivateKey,
            Self::PublicKey { .. } => ObjectType::PublicKey,
            Self::OpaqueObject { .. } => ObjectType::OpaqueObject,
            Self::PGPKey { .. } => ObjectType::PGPKey,
        }
    }

    /// The Key Block, for the variants that have one
    pub fn key_block(&self) -> Result<&KeyBlock, KmipError> {
        match self {
            Self::SymmetricKey(SymmetricKey { key_block })
            | Self::PrivateKey(PrivateKey { key_block })
            | Self::PublicKey(PublicKey { key_block })
            | Self::SecretData(SecretData { key_block, .. })
            | Self::PGPKey(PGPKey { key_block, .. })
            | Self::SplitKey(SplitKey { key_block, .. }) => Ok(key_block),
            Self::Certificate(_) | Self::OpaqueObject(_) => Err(KmipError::InvalidKmipValue(
                ResultReason::InvalidField,
                format!("a {} does not have a key block", self.object_type()),
            )),
        }
    }
}
