use std::fmt::{self, Display};

use serde::Deserialize;
use zeroize::Zeroizing;

use super::{default_names, validate_masks};
use crate::{
    error::{result::KmipResult, KmipError},
    kmip::kmip_types::{CryptographicUsageMask, ObjectType, OpaqueDataType, SecretDataType},
};

/// A shared secret that is not a key or a certificate, e.g. a password
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SecretDataArgs")]
pub struct SecretData {
    secret_data_type: SecretDataType,
    value: Zeroizing<Vec<u8>>,
    cryptographic_usage_masks: Vec<CryptographicUsageMask>,
    names: Vec<String>,
}

impl SecretData {
    pub fn new(
        secret_data_type: SecretDataType,
        value: Vec<u8>,
        masks: Option<Vec<CryptographicUsageMask>>,
        name: Option<String>,
    ) -> KmipResult<Self> {
        Ok(Self {
            secret_data_type,
            value: Zeroizing::new(value),
            cryptographic_usage_masks: validate_masks(masks)?,
            names: default_names(name, "Secret Data"),
        })
    }

    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        ObjectType::SecretData
    }

    #[must_use]
    pub const fn secret_data_type(&self) -> SecretDataType {
        self.secret_data_type
    }

    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    #[must_use]
    pub fn cryptographic_usage_masks(&self) -> &[CryptographicUsageMask] {
        &self.cryptographic_usage_masks
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Display for SecretData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SecretData(type: {}, value: {} bytes, names: {:?})",
            self.secret_data_type,
            self.value.len(),
            self.names
        )
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SecretDataArgs {
    secret_data_type: SecretDataType,
    value: Vec<u8>,
    masks: Option<Vec<CryptographicUsageMask>>,
    name: Option<String>,
}

impl TryFrom<SecretDataArgs> for SecretData {
    type Error = KmipError;

    fn try_from(args: SecretDataArgs) -> Result<Self, Self::Error> {
        Self::new(args.secret_data_type, args.value, args.masks, args.name)
    }
}

/// Data the key management system stores without interpreting it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "OpaqueObjectArgs")]
pub struct OpaqueObject {
    opaque_type: OpaqueDataType,
    value: Vec<u8>,
    names: Vec<String>,
}

impl OpaqueObject {
    #[must_use]
    pub fn new(opaque_type: OpaqueDataType, value: Vec<u8>, name: Option<String>) -> Self {
        Self {
            opaque_type,
            value,
            names: default_names(name, "Opaque Object"),
        }
    }

    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        ObjectType::OpaqueObject
    }

    #[must_use]
    pub const fn opaque_type(&self) -> OpaqueDataType {
        self.opaque_type
    }

    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Display for OpaqueObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OpaqueObject(type: {}, value: {} bytes, names: {:?})",
            self.opaque_type,
            self.value.len(),
            self.names
        )
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OpaqueObjectArgs {
    opaque_type: OpaqueDataType,
    value: Vec<u8>,
    name: Option<String>,
}

impl From<OpaqueObjectArgs> for OpaqueObject {
    fn from(args: OpaqueObjectArgs) -> Self {
        Self::new(args.opaque_type, args.value, args.name)
    }
}
