use serde::Deserialize;

use crate::kmip::kmip_types::{
    BlockCipherMode, CryptographicAlgorithm, DigitalSignatureAlgorithm, EncodingOption,
    HashingAlgorithm, KeyRoleType, PaddingMethod, WrappingMethod,
};

/// How the material of a wrapped key is protected.
///
/// A key that is not wrapped carries no `KeyWrappingData` at all. A wrapped
/// key always carries both key information blocks; a block the protocol
/// object did not provide is present but empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyWrappingData {
    pub wrapping_method: WrappingMethod,
    #[serde(default)]
    pub encryption_key_information: KeyInformation,
    #[serde(default)]
    pub mac_signature_key_information: KeyInformation,
    pub mac_signature: Option<Vec<u8>>,
    pub iv_counter_nonce: Option<Vec<u8>>,
    pub encoding_option: Option<EncodingOption>,
}

impl KeyWrappingData {
    /// Wrapping data with the given method and empty key information blocks
    #[must_use]
    pub fn new(wrapping_method: WrappingMethod) -> Self {
        Self {
            wrapping_method,
            encryption_key_information: KeyInformation::default(),
            mac_signature_key_information: KeyInformation::default(),
            mac_signature: None,
            iv_counter_nonce: None,
            encoding_option: None,
        }
    }
}

/// Reference to the key protecting a wrapped key, and the parameters it is used with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyInformation {
    pub unique_identifier: Option<String>,
    pub cryptographic_parameters: Option<CryptographicParameters>,
}

impl KeyInformation {
    #[must_use]
    pub fn new(
        unique_identifier: impl Into<String>,
        cryptographic_parameters: Option<CryptographicParameters>,
    ) -> Self {
        Self {
            unique_identifier: Some(unique_identifier.into()),
            cryptographic_parameters,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.unique_identifier.is_none() && self.cryptographic_parameters.is_none()
    }
}

/// How operations with a key should be carried out.
/// Every field is optional and carried as is between the object models.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CryptographicParameters {
    pub block_cipher_mode: Option<BlockCipherMode>,
    pub padding_method: Option<PaddingMethod>,
    pub hashing_algorithm: Option<HashingAlgorithm>,
    pub key_role_type: Option<KeyRoleType>,
    pub digital_signature_algorithm: Option<DigitalSignatureAlgorithm>,
    pub cryptographic_algorithm: Option<CryptographicAlgorithm>,
    pub random_iv: Option<bool>,
    pub iv_length: Option<i32>,
    pub tag_length: Option<i32>,
    pub fixed_field_length: Option<i32>,
    pub invocation_field_length: Option<i32>,
    pub counter_length: Option<i32>,
    pub initial_counter_value: Option<i32>,
}
