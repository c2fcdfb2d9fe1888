use std::fmt::{self, Display, Formatter};

use serde::{
    de::{self, MapAccess, Visitor},
    ser::SerializeStruct,
    Deserialize, Serialize,
};
use zeroize::Zeroizing;

#[allow(clippy::wildcard_imports)]
use super::kmip_types::*;
use crate::error::{result::KmipResult, KmipError};

/// The Key Block of a key or of secret data: the material and what describes it.
///
/// Algorithm and length are absent for secret data. The material is wrapped
/// when `key_wrapping_data` is present.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct KeyBlock {
    pub key_format_type: KeyFormatType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_compression_type: Option<KeyCompressionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_value: Option<KeyValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptographic_algorithm: Option<CryptographicAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptographic_length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_wrapping_data: Option<KeyWrappingData>,
}

impl Display for KeyBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KeyBlock {{ key_format_type: {}, key_compression_type: {:?}, key_value: {}, \
             cryptographic_algorithm: {:?}, cryptographic_length: {:?}, wrapped: {} }}",
            self.key_format_type,
            self.key_compression_type,
            self.key_value
                .as_ref()
                .map_or_else(|| "None".to_owned(), ToString::to_string),
            self.cryptographic_algorithm,
            self.cryptographic_length,
            self.key_wrapping_data.is_some()
        )
    }
}

impl KeyBlock {
    /// Give the key bytes (which may be wrapped).
    /// Returns an error if there is no key value.
    pub fn key_bytes(&self) -> KmipResult<Zeroizing<Vec<u8>>> {
        let key_value = self.key_value.as_ref().ok_or_else(|| {
            KmipError::InvalidKmipValue(
                ResultReason::KeyValueNotPresent,
                "key is missing its key value".to_owned(),
            )
        })?;
        Ok(Zeroizing::new(key_value.key_material.as_bytes().to_vec()))
    }
}

/// The Key Value of a Key Block. Attributes are not carried.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValue {
    pub key_material: KeyMaterial,
}

impl KeyValue {
    #[must_use]
    pub fn from_bytes(bytes: Zeroizing<Vec<u8>>) -> Self {
        Self {
            key_material: KeyMaterial::ByteString(bytes),
        }
    }
}

impl Display for KeyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "KeyValue {{ key_material: {} }}", self.key_material)
    }
}

/// Key material is always held in a `Zeroizing` buffer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum KeyMaterial {
    ByteString(Zeroizing<Vec<u8>>),
    TransparentSymmetricKey { key: Zeroizing<Vec<u8>> },
}

impl KeyMaterial {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::ByteString(bytes) | Self::TransparentSymmetricKey { key: bytes } => bytes,
        }
    }
}

// never print the material itself
impl Display for KeyMaterial {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByteString(bytes) => write!(f, "ByteString({} bytes)", bytes.len()),
            Self::TransparentSymmetricKey { key } => {
                write!(f, "TransparentSymmetricKey({} bytes)", key.len())
            }
        }
    }
}

impl Serialize for KeyMaterial {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut st = serializer.serialize_struct("KeyMaterial", 1)?;
        match self {
            Self::ByteString(bytes) => st.serialize_field("ByteString", &**bytes)?,
            Self::TransparentSymmetricKey { key } => st.serialize_field("Key", &**key)?,
        }
        st.end()
    }
}

impl<'de> Deserialize<'de> for KeyMaterial {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(field_identifier)]
        enum Field {
            ByteString,
            Key,
        }

        struct KeyMaterialVisitor;

        impl<'de> Visitor<'de> for KeyMaterialVisitor {
            type Value = KeyMaterial;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("struct KeyMaterialVisitor")
            }

            fn visit_map<V>(self, mut map: V) -> Result<Self::Value, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut bytestring: Option<Zeroizing<Vec<u8>>> = None;
                let mut key: Option<Zeroizing<Vec<u8>>> = None;

                while let Some(field) = map.next_key()? {
                    match field {
                        Field::ByteString => {
                            if bytestring.is_some() {
                                return Err(de::Error::duplicate_field("ByteString"))
                            }
                            bytestring = Some(map.next_value()?);
                        }
                        Field::Key => {
                            if key.is_some() {
                                return Err(de::Error::duplicate_field("Key"))
                            }
                            key = Some(map.next_value()?);
                        }
                    }
                }

                match (bytestring, key) {
                    (Some(bytes), None) => Ok(KeyMaterial::ByteString(bytes)),
                    (None, Some(key)) => Ok(KeyMaterial::TransparentSymmetricKey { key }),
                    (None, None) => Err(de::Error::missing_field("ByteString")),
                    (Some(_), Some(_)) => Err(de::Error::custom(
                        "key material cannot be both a byte string and a transparent key",
                    )),
                }
            }
        }

        const FIELDS: &[&str] = &["ByteString", "Key"];
        deserializer.deserialize_struct("KeyMaterial", FIELDS, KeyMaterialVisitor)
    }
}

/// How the material of a Key Block is wrapped
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct KeyWrappingData {
    pub wrapping_method: WrappingMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_key_information: Option<EncryptionKeyInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_signature_key_information: Option<MacSignatureKeyInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_signature: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iv_counter_nonce: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_option: Option<EncodingOption>,
}

/// The key that encrypted the material
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct EncryptionKeyInformation {
    pub unique_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptographic_parameters: Option<CryptographicParameters>,
}

/// The key that MACed or signed the material
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct MacSignatureKeyInformation {
    pub unique_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptographic_parameters: Option<CryptographicParameters>,
}

/// Parameters of a cryptographic operation; all of them are optional
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CryptographicParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_cipher_mode: Option<BlockCipherMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_method: Option<PaddingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashing_algorithm: Option<HashingAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_role_type: Option<KeyRoleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital_signature_algorithm: Option<DigitalSignatureAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cryptographic_algorithm: Option<CryptographicAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "RandomIV")]
    pub random_iv: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "IVLength")]
    pub iv_length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_field_length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invocation_field_length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_counter_value: Option<i32>,
}
