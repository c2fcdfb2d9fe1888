#![allow(non_camel_case_types)]

use std::fmt;

use kmip_derive::kmip_enum;
use serde::{
    de::{self, Visitor},
    Deserialize, Serialize,
};

/// Key Compression Type Enumeration
#[kmip_enum]
pub enum KeyCompressionType {
    ECPublicKeyTypeUncompressed = 0x1,
    ECPublicKeyTypeX962CompressedPrime = 0x2,
    ECPublicKeyTypeX962CompressedChar2 = 0x3,
    ECPublicKeyTypeX962Hybrid = 0x4,
}

/// Key Format Type Enumeration
#[kmip_enum]
pub enum KeyFormatType {
    Raw = 0x1,
    Opaque = 0x2,
    PKCS1 = 0x3,
    PKCS8 = 0x4,
    X509 = 0x5,
    ECPrivateKey = 0x6,
    TransparentSymmetricKey = 0x7,
    TransparentDSAPrivateKey = 0x8,
    TransparentDSAPublicKey = 0x9,
    TransparentRSAPrivateKey = 0xA,
    TransparentRSAPublicKey = 0xB,
    TransparentDHPrivateKey = 0xC,
    TransparentDHPublicKey = 0xD,
    TransparentECDSAPrivateKey = 0xE,
    TransparentECDSAPublicKey = 0xF,
    TransparentECDHPrivateKey = 0x10,
    TransparentECDHPublicKey = 0x11,
    TransparentECMQVPrivateKey = 0x12,
    TransparentECMQVPublicKey = 0x13,
}

/// Wrapping Method Enumeration
#[kmip_enum]
pub enum WrappingMethod {
    Encrypt = 0x1,
    MACSign = 0x2,
    EncryptThenMACSign = 0x3,
    MACSignThenEncrypt = 0x4,
    TR31 = 0x5,
}

/// Certificate Type Enumeration
#[kmip_enum]
pub enum CertificateType {
    X509 = 0x1,
    PGP = 0x2,
}

/// Split Key Method Enumeration
#[kmip_enum]
pub enum SplitKeyMethod {
    XOR = 0x1,
    PolynomialSharingGF2_16 = 0x2,
    PolynomialSharingPrimeField = 0x3,
    PolynomialSharingGF2_8 = 0x4,
}

/// Secret Data Type Enumeration
#[kmip_enum]
pub enum SecretDataType {
    Password = 0x1,
    Seed = 0x2,
}

/// Object Type Enumeration
#[kmip_enum]
pub enum ObjectType {
    Certificate = 0x1,
    SymmetricKey = 0x2,
    PublicKey = 0x3,
    PrivateKey = 0x4,
    SplitKey = 0x5,
    Template = 0x6,
    SecretData = 0x7,
    OpaqueObject = 0x8,
    PGPKey = 0x9,
}

/// Cryptographic Algorithm Enumeration
#[kmip_enum]
pub enum CryptographicAlgorithm {
    DES = 0x1,
    THREE_DES = 0x2,
    AES = 0x3,
    RSA = 0x4,
    DSA = 0x5,
    ECDSA = 0x6,
    HMACSHA1 = 0x7,
    HMACSHA224 = 0x8,
    HMACSHA256 = 0x9,
    HMACSHA384 = 0xA,
    HMACSHA512 = 0xB,
    HMACMD5 = 0xC,
    DH = 0xD,
    ECDH = 0xE,
    ECMQV = 0xF,
    Blowfish = 0x10,
    Camellia = 0x11,
    CAST5 = 0x12,
    IDEA = 0x13,
    MARS = 0x14,
    RC2 = 0x15,
    RC4 = 0x16,
    RC5 = 0x17,
    SKIPJACK = 0x18,
    Twofish = 0x19,
    EC = 0x1A,
    OneTimePad = 0x1B,
    ChaCha20 = 0x1C,
    Poly1305 = 0x1D,
    ChaCha20Poly1305 = 0x1E,
    SHA3224 = 0x1F,
    SHA3256 = 0x20,
    SHA3384 = 0x21,
    SHA3512 = 0x22,
    HMACSHA3224 = 0x23,
    HMACSHA3256 = 0x24,
    HMACSHA3384 = 0x25,
    HMACSHA3512 = 0x26,
    SHAKE128 = 0x27,
    SHAKE256 = 0x28,
}

/// Block Cipher Mode Enumeration
#[kmip_enum]
pub enum BlockCipherMode {
    CBC = 0x1,
    ECB = 0x2,
    PCBC = 0x3,
    CFB = 0x4,
    OFB = 0x5,
    CTR = 0x6,
    CMAC = 0x7,
    CCM = 0x8,
    GCM = 0x9,
    CBC_MAC = 0xA,
    XTS = 0xB,
    AESKeyWrapPadding = 0xC,
    NISTKeyWrap = 0xD,
    X9102AESKW = 0xE,
    X9102TDKW = 0xF,
    X9102AKW1 = 0x10,
    X9102AKW2 = 0x11,
    AEAD = 0x12,
}

/// Padding Method Enumeration
#[kmip_enum]
pub enum PaddingMethod {
    None = 0x1,
    OAEP = 0x2,
    PKCS5 = 0x3,
    SSL3 = 0x4,
    Zeros = 0x5,
    ANSI_X923 = 0x6,
    ISO_10126 = 0x7,
    PKCS1v15 = 0x8,
    X931 = 0x9,
    PSS = 0xA,
}

/// Hashing Algorithm Enumeration
#[kmip_enum]
pub enum HashingAlgorithm {
    MD2 = 0x1,
    MD4 = 0x2,
    MD5 = 0x3,
    SHA1 = 0x4,
    SHA224 = 0x5,
    SHA256 = 0x6,
    SHA384 = 0x7,
    SHA512 = 0x8,
    RIPEMD160 = 0x9,
    Tiger = 0xA,
    Whirlpool = 0xB,
    SHA512_224 = 0xC,
    SHA512_256 = 0xD,
    SHA3_224 = 0xE,
    SHA3_256 = 0xF,
    SHA3_384 = 0x10,
    SHA3_512 = 0x11,
}

/// Key Role Type Enumeration
#[kmip_enum]
pub enum KeyRoleType {
    BDK = 0x1,
    CVK = 0x2,
    DEK = 0x3,
    MKAC = 0x4,
    MKSMC = 0x5,
    MKSMI = 0x6,
    MKDAC = 0x7,
    MKDN = 0x8,
    MKCP = 0x9,
    MKOTH = 0xA,
    KEK = 0xB,
    MAC16609 = 0xC,
    MAC97971 = 0xD,
    MAC97972 = 0xE,
    MAC97973 = 0xF,
    MAC97974 = 0x10,
    MAC97975 = 0x11,
    ZPK = 0x12,
    PVKIBM = 0x13,
    PVKPVV = 0x14,
    PVKOTH = 0x15,
    DUKPT = 0x16,
    IV = 0x17,
    TRKBK = 0x18,
}

/// Digital Signature Algorithm Enumeration
#[kmip_enum]
pub enum DigitalSignatureAlgorithm {
    MD2WithRSAEncryption = 0x1,
    MD5WithRSAEncryption = 0x2,
    SHA1WithRSAEncryption = 0x3,
    SHA224WithRSAEncryption = 0x4,
    SHA256WithRSAEncryption = 0x5,
    SHA384WithRSAEncryption = 0x6,
    SHA512WithRSAEncryption = 0x7,
    RSASSAPSS = 0x8,
    DSAWithSHA1 = 0x9,
    DSAWithSHA224 = 0xA,
    DSAWithSHA256 = 0xB,
    ECDSAWithSHA1 = 0xC,
    ECDSAWithSHA224 = 0xD,
    ECDSAWithSHA256 = 0xE,
    ECDSAWithSHA384 = 0xF,
    ECDSAWithSHA512 = 0x10,
}

/// Encoding Option Enumeration
#[kmip_enum]
pub enum EncodingOption {
    NoEncoding = 0x1,
    TTLVEncoding = 0x2,
}

/// Opaque Data Type Enumeration
#[kmip_enum]
pub enum OpaqueDataType {
    Unknown = 0x8000_0000,
}

/// Result Status Enumeration
#[kmip_enum]
pub enum ResultStatus {
    Success = 0x1,
    OperationFailed = 0x2,
    OperationPending = 0x3,
    OperationUndone = 0x4,
}

/// Result Reason Enumeration
#[kmip_enum]
pub enum ResultReason {
    ItemNotFound = 0x1,
    ResponseTooLarge = 0x2,
    AuthenticationNotSuccessful = 0x3,
    InvalidMessage = 0x4,
    OperationNotSupported = 0x5,
    MissingData = 0x6,
    InvalidField = 0x7,
    FeatureNotSupported = 0x8,
    OperationCanceled = 0x9,
    CryptographicFailure = 0xA,
    IllegalOperation = 0xB,
    PermissionDenied = 0xC,
    ObjectArchived = 0xD,
    IndexOutOfBounds = 0xE,
    ApplicationNamespaceNotSupported = 0xF,
    KeyFormatTypeNotSupported = 0x10,
    KeyCompressionTypeNotSupported = 0x11,
    EncodingOptionError = 0x12,
    KeyValueNotPresent = 0x13,
    AttestationRequired = 0x14,
    AttestationFailed = 0x15,
    Sensitive = 0x16,
    NotExtractable = 0x17,
    ObjectAlreadyExists = 0x18,
    GeneralFailure = 0x100,
}

/// Cryptographic Usage Mask
///
/// A bit mask in KMIP; a single managed object carries the list of the
/// individual usages it allows, each of them being exactly one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CryptographicUsageMask(pub(crate) u32);

bitflags::bitflags! {
    impl CryptographicUsageMask: u32 {
        const Sign=0x0000_0001;
        const Verify=0x0000_0002;
        const Encrypt=0x0000_0004;
        const Decrypt=0x0000_0008;
        const WrapKey=0x0000_0010;
        const UnwrapKey=0x0000_0020;
        const Export=0x0000_0040;
        const MACGenerate=0x0000_0080;
        const MACVerify=0x0000_0100;
        const DeriveKey=0x0000_0200;
        const ContentCommitment=0x0000_0400;
        const KeyAgreement=0x0000_0800;
        const CertificateSign=0x0000_1000;
        const CRLSign=0x0000_2000;
        const GenerateCryptogram=0x0000_4000;
        const ValidateCryptogram=0x0000_8000;
        const TranslateEncrypt=0x0001_0000;
        const TranslateDecrypt=0x0002_0000;
        const TranslateWrap=0x0004_0000;
        const TranslateUnwrap=0x0008_0000;
    }
}

impl CryptographicUsageMask {
    /// A usage mask attached to a managed object must name exactly one usage.
    #[must_use]
    pub fn is_single_usage(&self) -> bool {
        self.bits().count_ones() == 1 && Self::all().contains(*self)
    }
}

impl fmt::Display for CryptographicUsageMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                write!(f, " | ")?;
            }
            write!(f, "{name}")?;
            first = false;
        }
        if first {
            write!(f, "0x{:08x}", self.bits())?;
        }
        Ok(())
    }
}

impl Serialize for CryptographicUsageMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(i32::try_from(self.bits()).map_err(serde::ser::Error::custom)?)
    }
}

impl<'de> Deserialize<'de> for CryptographicUsageMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct CryptographicUsageMaskVisitor;

        impl Visitor<'_> for CryptographicUsageMaskVisitor {
            type Value = CryptographicUsageMask;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a Cryptographic Usage Mask name or value")
            }

            // used by the JSON arguments of the simplified objects
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                CryptographicUsageMask::from_name(v).ok_or_else(|| {
                    E::custom(format!("unknown Cryptographic Usage Mask: {v}"))
                })
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(CryptographicUsageMask(
                    u32::try_from(v).map_err(de::Error::custom)?,
                ))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(CryptographicUsageMask(
                    u32::try_from(v).map_err(de::Error::custom)?,
                ))
            }
        }
        deserializer.deserialize_any(CryptographicUsageMaskVisitor)
    }
}
