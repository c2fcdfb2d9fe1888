//! The simplified object model: flat, validated objects for application code.
//!
//! Objects are built either through their typed constructors or from JSON
//! with [`Object::from_json`]; both paths run the same validation.

use std::fmt::{self, Display};

use serde::{
    de::{MapAccess, Visitor},
    Deserialize,
};
use tracing::trace;

use crate::{
    error::result::KmipResult,
    kmip::kmip_types::{CryptographicUsageMask, ObjectType},
    kmip_bail, KmipResultHelper,
};

mod certificate;
mod key_wrapping;
mod keys;
mod secret_data;

pub use certificate::{Certificate, CertificateFields, X509Certificate};
#[cfg(feature = "x509")]
pub use certificate::X509Details;
pub use key_wrapping::{CryptographicParameters, KeyInformation, KeyWrappingData};
pub use keys::{PrivateKey, PublicKey, SplitKey, SplitKeySharing, SymmetricKey};
pub use secret_data::{OpaqueObject, SecretData};

/// Every usage mask must name exactly one known usage.
pub(crate) fn validate_masks(
    masks: Option<Vec<CryptographicUsageMask>>,
) -> KmipResult<Vec<CryptographicUsageMask>> {
    let masks = masks.unwrap_or_default();
    for mask in &masks {
        if !mask.is_single_usage() {
            kmip_bail!("invalid cryptographic usage mask: {mask} must be a single usage");
        }
    }
    Ok(masks)
}

pub(crate) fn default_names(name: Option<String>, default_name: &str) -> Vec<String> {
    vec![name.unwrap_or_else(|| default_name.to_owned())]
}

/// The concrete simplified objects. There is no variant for the abstract
/// certificate: only X.509 certificates can be instantiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    SymmetricKey(SymmetricKey),
    PublicKey(PublicKey),
    PrivateKey(PrivateKey),
    X509Certificate(X509Certificate),
    SecretData(SecretData),
    OpaqueObject(OpaqueObject),
    SplitKey(SplitKey),
}

const VARIANTS: [&str; 7] = [
    "SymmetricKey",
    "PublicKey",
    "PrivateKey",
    "X509Certificate",
    "SecretData",
    "OpaqueObject",
    "SplitKey",
];

impl Object {
    /// Build and validate an object from its JSON form,
    /// e.g. `{"SecretData": {"secret_data_type": "Password", "value": [...]}}`
    pub fn from_json(value: serde_json::Value) -> KmipResult<Self> {
        serde_json::from_value(value).context("invalid simplified object")
    }

    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        match self {
            Self::SymmetricKey(_) => ObjectType::SymmetricKey,
            Self::PublicKey(_) => ObjectType::PublicKey,
            Self::PrivateKey(_) => ObjectType::PrivateKey,
            Self::X509Certificate(_) => ObjectType::Certificate,
            Self::SecretData(_) => ObjectType::SecretData,
            Self::OpaqueObject(_) => ObjectType::OpaqueObject,
            Self::SplitKey(_) => ObjectType::SplitKey,
        }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        match self {
            Self::SymmetricKey(o) => o.names(),
            Self::PublicKey(o) => o.names(),
            Self::PrivateKey(o) => o.names(),
            Self::X509Certificate(o) => o.names(),
            Self::SecretData(o) => o.names(),
            Self::OpaqueObject(o) => o.names(),
            Self::SplitKey(o) => o.names(),
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymmetricKey(o) => Display::fmt(o, f),
            Self::PublicKey(o) => Display::fmt(o, f),
            Self::PrivateKey(o) => Display::fmt(o, f),
            Self::X509Certificate(o) => Display::fmt(o, f),
            Self::SecretData(o) => Display::fmt(o, f),
            Self::OpaqueObject(o) => Display::fmt(o, f),
            Self::SplitKey(o) => Display::fmt(o, f),
        }
    }
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
                formatter.write_str("a simplified Object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                if let Some(key) = map.next_key::<String>()? {
                    trace!("simplified Object Visitor: visit_map: key: {key:?}");
                    return match key.as_str() {
                        "SymmetricKey" => Ok(Object::SymmetricKey(map.next_value()?)),
                        "PublicKey" => Ok(Object::PublicKey(map.next_value()?)),
                        "PrivateKey" => Ok(Object::PrivateKey(map.next_value()?)),
                        "X509Certificate" => Ok(Object::X509Certificate(map.next_value()?)),
                        "SecretData" => Ok(Object::SecretData(map.next_value()?)),
                        "OpaqueObject" => Ok(Object::OpaqueObject(map.next_value()?)),
                        "SplitKey" => Ok(Object::SplitKey(map.next_value()?)),
                        "Certificate" => Err(serde::de::Error::custom(
                            "Certificate is abstract and cannot be instantiated: use \
                             X509Certificate",
                        )),
                        x => Err(serde::de::Error::custom(format!(
                            "Invalid Object: {x}. One of the following is expected: {VARIANTS:?}"
                        ))),
                    };
                }
                Err(serde::de::Error::custom("Invalid Object"))
            }
        }

        deserializer.deserialize_map(ObjectVisitor)
    }
}
