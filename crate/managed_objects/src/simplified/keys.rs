use std::fmt::{self, Display};

use num_bigint_dig::BigInt;
use serde::Deserialize;
use zeroize::Zeroizing;

use super::{default_names, validate_masks, KeyWrappingData};
use crate::{
    error::{result::KmipResult, KmipError},
    kmip::kmip_types::{
        CryptographicAlgorithm, CryptographicUsageMask, KeyFormatType, ObjectType, ResultReason,
        SplitKeyMethod,
    },
    kmip_ensure, KmipResultHelper,
};

const PUBLIC_KEY_FORMATS: [KeyFormatType; 3] =
    [KeyFormatType::Raw, KeyFormatType::X509, KeyFormatType::PKCS1];

const PRIVATE_KEY_FORMATS: [KeyFormatType; 3] =
    [KeyFormatType::Raw, KeyFormatType::PKCS1, KeyFormatType::PKCS8];

/// Fields shared by every key: what it is for, its material and how that
/// material is protected.
#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyFields {
    cryptographic_algorithm: CryptographicAlgorithm,
    cryptographic_length: i32,
    value: Zeroizing<Vec<u8>>,
    key_format_type: KeyFormatType,
    cryptographic_usage_masks: Vec<CryptographicUsageMask>,
    names: Vec<String>,
    key_wrapping_data: Option<KeyWrappingData>,
}

impl KeyFields {
    #[allow(clippy::too_many_arguments)]
    fn new(
        cryptographic_algorithm: CryptographicAlgorithm,
        cryptographic_length: i32,
        value: Vec<u8>,
        key_format_type: KeyFormatType,
        masks: Option<Vec<CryptographicUsageMask>>,
        name: Option<String>,
        default_name: &str,
        key_wrapping_data: Option<KeyWrappingData>,
    ) -> KmipResult<Self> {
        kmip_ensure!(
            cryptographic_length > 0,
            "cryptographic length must be a positive number of bits, got {cryptographic_length}"
        );
        Ok(Self {
            cryptographic_algorithm,
            cryptographic_length,
            value: Zeroizing::new(value),
            key_format_type,
            cryptographic_usage_masks: validate_masks(masks)?,
            names: default_names(name, default_name),
            key_wrapping_data,
        })
    }

    fn ensure_format(&self, object_type: ObjectType, valid: &[KeyFormatType]) -> KmipResult<()> {
        kmip_ensure!(
            valid.contains(&self.key_format_type),
            KmipError::InvalidKmipValue(
                ResultReason::KeyFormatTypeNotSupported,
                format!(
                    "a {object_type} key format type must be one of {valid:?}, got {}",
                    self.key_format_type
                ),
            )
        );
        Ok(())
    }

    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, object: &str) -> fmt::Result {
        write!(
            f,
            "{object}(algorithm: {}, length: {}, format: {}, value: {} bytes, wrapped: {}, \
             names: {:?})",
            self.cryptographic_algorithm,
            self.cryptographic_length,
            self.key_format_type,
            self.value.len(),
            self.key_wrapping_data.is_some(),
            self.names
        )
    }
}

macro_rules! key_accessors {
    ($key:ty) => {
        impl $key {
            #[must_use]
            pub const fn cryptographic_algorithm(&self) -> CryptographicAlgorithm {
                self.fields.cryptographic_algorithm
            }

            #[must_use]
            pub const fn cryptographic_length(&self) -> i32 {
                self.fields.cryptographic_length
            }

            /// The key material, wrapped when `key_wrapping_data` is present
            #[must_use]
            pub fn value(&self) -> &[u8] {
                &self.fields.value
            }

            #[must_use]
            pub const fn key_format_type(&self) -> KeyFormatType {
                self.fields.key_format_type
            }

            #[must_use]
            pub fn cryptographic_usage_masks(&self) -> &[CryptographicUsageMask] {
                &self.fields.cryptographic_usage_masks
            }

            #[must_use]
            pub fn names(&self) -> &[String] {
                &self.fields.names
            }

            #[must_use]
            pub const fn key_wrapping_data(&self) -> Option<&KeyWrappingData> {
                self.fields.key_wrapping_data.as_ref()
            }
        }
    };
}

/// A symmetric key. Its material is always held raw.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SymmetricKeyArgs")]
pub struct SymmetricKey {
    fields: KeyFields,
}

impl SymmetricKey {
    /// Build a symmetric key.
    ///
    /// Unless the key is wrapped, the material must be exactly
    /// `cryptographic_length` bits long.
    pub fn new(
        cryptographic_algorithm: CryptographicAlgorithm,
        cryptographic_length: i32,
        value: Vec<u8>,
        masks: Option<Vec<CryptographicUsageMask>>,
        name: Option<String>,
        key_wrapping_data: Option<KeyWrappingData>,
    ) -> KmipResult<Self> {
        let fields = KeyFields::new(
            cryptographic_algorithm,
            cryptographic_length,
            value,
            KeyFormatType::Raw,
            masks,
            name,
            "Symmetric Key",
            key_wrapping_data,
        )?;
        if fields.key_wrapping_data.is_none() {
            let bits = usize::try_from(cryptographic_length)
                .context("the cryptographic length does not fit the platform")?;
            let value_bits = fields.value.len().saturating_mul(8);
            kmip_ensure!(
                value_bits == bits,
                "key length ({bits}) not equal to key value length ({value_bits} bits)"
            );
        }
        Ok(Self { fields })
    }

    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        ObjectType::SymmetricKey
    }
}

key_accessors!(SymmetricKey);

impl Display for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fields.fmt_with(f, "SymmetricKey")
    }
}

/// The public half of an asymmetric key pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "AsymmetricKeyArgs")]
pub struct PublicKey {
    fields: KeyFields,
}

impl PublicKey {
    /// Build a public key; the format defaults to X.509 and must be
    /// one of Raw, X.509 or PKCS#1.
    pub fn new(
        cryptographic_algorithm: CryptographicAlgorithm,
        cryptographic_length: i32,
        value: Vec<u8>,
        key_format_type: Option<KeyFormatType>,
        masks: Option<Vec<CryptographicUsageMask>>,
        name: Option<String>,
        key_wrapping_data: Option<KeyWrappingData>,
    ) -> KmipResult<Self> {
        let fields = KeyFields::new(
            cryptographic_algorithm,
            cryptographic_length,
            value,
            key_format_type.unwrap_or(KeyFormatType::X509),
            masks,
            name,
            "Public Key",
            key_wrapping_data,
        )?;
        fields.ensure_format(ObjectType::PublicKey, &PUBLIC_KEY_FORMATS)?;
        Ok(Self { fields })
    }

    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        ObjectType::PublicKey
    }
}

key_accessors!(PublicKey);

impl Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fields.fmt_with(f, "PublicKey")
    }
}

/// The private half of an asymmetric key pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "AsymmetricKeyArgs")]
pub struct PrivateKey {
    fields: KeyFields,
}

impl PrivateKey {
    /// Build a private key; the format defaults to PKCS#8 and must be
    /// one of Raw, PKCS#1 or PKCS#8.
    pub fn new(
        cryptographic_algorithm: CryptographicAlgorithm,
        cryptographic_length: i32,
        value: Vec<u8>,
        key_format_type: Option<KeyFormatType>,
        masks: Option<Vec<CryptographicUsageMask>>,
        name: Option<String>,
        key_wrapping_data: Option<KeyWrappingData>,
    ) -> KmipResult<Self> {
        let fields = KeyFields::new(
            cryptographic_algorithm,
            cryptographic_length,
            value,
            key_format_type.unwrap_or(KeyFormatType::PKCS8),
            masks,
            name,
            "Private Key",
            key_wrapping_data,
        )?;
        fields.ensure_format(ObjectType::PrivateKey, &PRIVATE_KEY_FORMATS)?;
        Ok(Self { fields })
    }

    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        ObjectType::PrivateKey
    }
}

key_accessors!(PrivateKey);

impl Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fields.fmt_with(f, "PrivateKey")
    }
}

/// How a split key share relates to the other shares.
///
/// The values are carried as given: nothing checks that the identifier or
/// the threshold fit within the number of parts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitKeySharing {
    pub split_key_parts: i32,
    pub key_part_identifier: i32,
    pub split_key_threshold: i32,
    pub split_key_method: SplitKeyMethod,
    /// Only meaningful for polynomial sharing over a prime field
    pub prime_field_size: Option<BigInt>,
}

/// One share of a key split with a secret sharing scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SplitKeyArgs")]
pub struct SplitKey {
    fields: KeyFields,
    sharing: SplitKeySharing,
}

impl SplitKey {
    /// Build a split key share; the format defaults to Raw.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cryptographic_algorithm: CryptographicAlgorithm,
        cryptographic_length: i32,
        value: Vec<u8>,
        key_format_type: Option<KeyFormatType>,
        sharing: SplitKeySharing,
        masks: Option<Vec<CryptographicUsageMask>>,
        name: Option<String>,
        key_wrapping_data: Option<KeyWrappingData>,
    ) -> KmipResult<Self> {
        let fields = KeyFields::new(
            cryptographic_algorithm,
            cryptographic_length,
            value,
            key_format_type.unwrap_or(KeyFormatType::Raw),
            masks,
            name,
            "Split Key",
            key_wrapping_data,
        )?;
        Ok(Self { fields, sharing })
    }

    #[must_use]
    pub const fn object_type(&self) -> ObjectType {
        ObjectType::SplitKey
    }

    #[must_use]
    pub const fn sharing(&self) -> &SplitKeySharing {
        &self.sharing
    }

    #[must_use]
    pub const fn split_key_parts(&self) -> i32 {
        self.sharing.split_key_parts
    }

    #[must_use]
    pub const fn key_part_identifier(&self) -> i32 {
        self.sharing.key_part_identifier
    }

    #[must_use]
    pub const fn split_key_threshold(&self) -> i32 {
        self.sharing.split_key_threshold
    }

    #[must_use]
    pub const fn split_key_method(&self) -> SplitKeyMethod {
        self.sharing.split_key_method
    }

    #[must_use]
    pub const fn prime_field_size(&self) -> Option<&BigInt> {
        self.sharing.prime_field_size.as_ref()
    }
}

key_accessors!(SplitKey);

impl Display for SplitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fields.fmt_with(f, "SplitKey")?;
        write!(
            f,
            " share {}/{} (threshold: {}, method: {})",
            self.sharing.key_part_identifier,
            self.sharing.split_key_parts,
            self.sharing.split_key_threshold,
            self.sharing.split_key_method
        )
    }
}

// JSON arguments, validated by the constructors above

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SymmetricKeyArgs {
    cryptographic_algorithm: CryptographicAlgorithm,
    cryptographic_length: i32,
    value: Vec<u8>,
    masks: Option<Vec<CryptographicUsageMask>>,
    name: Option<String>,
    key_wrapping_data: Option<KeyWrappingData>,
}

impl TryFrom<SymmetricKeyArgs> for SymmetricKey {
    type Error = KmipError;

    fn try_from(args: SymmetricKeyArgs) -> Result<Self, Self::Error> {
        Self::new(
            args.cryptographic_algorithm,
            args.cryptographic_length,
            args.value,
            args.masks,
            args.name,
            args.key_wrapping_data,
        )
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AsymmetricKeyArgs {
    cryptographic_algorithm: CryptographicAlgorithm,
    cryptographic_length: i32,
    value: Vec<u8>,
    key_format_type: Option<KeyFormatType>,
    masks: Option<Vec<CryptographicUsageMask>>,
    name: Option<String>,
    key_wrapping_data: Option<KeyWrappingData>,
}

impl TryFrom<AsymmetricKeyArgs> for PublicKey {
    type Error = KmipError;

    fn try_from(args: AsymmetricKeyArgs) -> Result<Self, Self::Error> {
        Self::new(
            args.cryptographic_algorithm,
            args.cryptographic_length,
            args.value,
            args.key_format_type,
            args.masks,
            args.name,
            args.key_wrapping_data,
        )
    }
}

impl TryFrom<AsymmetricKeyArgs> for PrivateKey {
    type Error = KmipError;

    fn try_from(args: AsymmetricKeyArgs) -> Result<Self, Self::Error> {
        Self::new(
            args.cryptographic_algorithm,
            args.cryptographic_length,
            args.value,
            args.key_format_type,
            args.masks,
            args.name,
            args.key_wrapping_data,
        )
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SplitKeyArgs {
    cryptographic_algorithm: CryptographicAlgorithm,
    cryptographic_length: i32,
    value: Vec<u8>,
    key_format_type: Option<KeyFormatType>,
    split_key_parts: i32,
    key_part_identifier: i32,
    split_key_threshold: i32,
    split_key_method: SplitKeyMethod,
    prime_field_size: Option<BigInt>,
    masks: Option<Vec<CryptographicUsageMask>>,
    name: Option<String>,
    key_wrapping_data: Option<KeyWrappingData>,
}

impl TryFrom<SplitKeyArgs> for SplitKey {
    type Error = KmipError;

    fn try_from(args: SplitKeyArgs) -> Result<Self, Self::Error> {
        Self::new(
            args.cryptographic_algorithm,
            args.cryptographic_length,
            args.value,
            args.key_format_type,
            SplitKeySharing {
                split_key_parts: args.split_key_parts,
                key_part_identifier: args.key_part_identifier,
                split_key_threshold: args.split_key_threshold,
                split_key_method: args.split_key_method,
                prime_field_size: args.prime_field_size,
            },
            args.masks,
            args.name,
            args.key_wrapping_data,
        )
    }
}
