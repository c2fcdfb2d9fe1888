use kmip_logger::log_init;
use num_bigint_dig::BigInt;
use zeroize::Zeroizing;

use super::{
    build_cryptographic_parameters, build_key_wrapping_data, build_kmip_key_wrapping_data,
    ManagedObject, ManagedObjectConverter,
};
use crate::{
    error::KmipError,
    kmip::{
        kmip_data_structures::{
            CryptographicParameters, EncryptionKeyInformation, KeyBlock, KeyMaterial, KeyValue,
            KeyWrappingData, MacSignatureKeyInformation,
        },
        kmip_objects as kmip,
        kmip_types::{
            BlockCipherMode, CertificateType, CryptographicAlgorithm, EncodingOption,
            HashingAlgorithm, KeyFormatType, ObjectType, OpaqueDataType, PaddingMethod,
            ResultReason, SecretDataType, SplitKeyMethod, WrappingMethod,
        },
    },
    simplified::{self, Certificate, KeyInformation, SplitKeySharing},
};

fn certificate_der() -> Vec<u8> {
    hex::decode(include_str!("../../test_data/certificates/kmip_1_1_server.hex").replace('\n', ""))
        .unwrap()
}

fn key_block(
    key_format_type: KeyFormatType,
    cryptographic_algorithm: CryptographicAlgorithm,
    cryptographic_length: i32,
    bytes: Vec<u8>,
) -> KeyBlock {
    KeyBlock {
        key_format_type,
        key_compression_type: None,
        key_value: Some(KeyValue::from_bytes(Zeroizing::new(bytes))),
        cryptographic_algorithm: Some(cryptographic_algorithm),
        cryptographic_length: Some(cryptographic_length),
        key_wrapping_data: None,
    }
}

fn aes_parameters() -> CryptographicParameters {
    CryptographicParameters {
        block_cipher_mode: Some(BlockCipherMode::GCM),
        padding_method: Some(PaddingMethod::None),
        hashing_algorithm: Some(HashingAlgorithm::SHA256),
        cryptographic_algorithm: Some(CryptographicAlgorithm::AES),
        random_iv: Some(true),
        iv_length: Some(96),
        tag_length: Some(128),
        fixed_field_length: Some(32),
        invocation_field_length: Some(64),
        counter_length: Some(0),
        initial_counter_value: Some(1),
        ..Default::default()
    }
}

/// One protocol object of each variant the simplified model knows about
fn kmip_objects() -> Vec<kmip::Object> {
    vec![
        kmip::Object::SymmetricKey(kmip::SymmetricKey {
            key_block: key_block(
                KeyFormatType::Raw,
                CryptographicAlgorithm::AES,
                256,
                vec![0x5a; 32],
            ),
        }),
        kmip::Object::PublicKey(kmip::PublicKey {
            key_block: key_block(
                KeyFormatType::X509,
                CryptographicAlgorithm::RSA,
                2048,
                vec![0x30; 294],
            ),
        }),
        kmip::Object::PrivateKey(kmip::PrivateKey {
            key_block: key_block(
                KeyFormatType::PKCS8,
                CryptographicAlgorithm::RSA,
                2048,
                vec![0x30; 1218],
            ),
        }),
        kmip::Object::Certificate(kmip::Certificate {
            certificate_type: CertificateType::X509,
            certificate_value: certificate_der(),
        }),
        kmip::Object::SecretData(kmip::SecretData {
            secret_data_type: SecretDataType::Password,
            key_block: KeyBlock {
                key_format_type: KeyFormatType::Opaque,
                key_compression_type: None,
                key_value: Some(KeyValue::from_bytes(Zeroizing::new(b"password".to_vec()))),
                cryptographic_algorithm: None,
                cryptographic_length: None,
                key_wrapping_data: None,
            },
        }),
        kmip::Object::OpaqueObject(kmip::OpaqueObject {
            opaque_data_type: OpaqueDataType::Unknown,
            opaque_data_value: b"opaque data".to_vec(),
        }),
        kmip::Object::SplitKey(kmip::SplitKey {
            split_key_parts: 4,
            key_part_identifier: 1,
            split_key_threshold: 2,
            split_key_method: SplitKeyMethod::PolynomialSharingPrimeField,
            prime_field_size: Some(BigInt::from(104_729)),
            key_block: key_block(
                KeyFormatType::Raw,
                CryptographicAlgorithm::AES,
                128,
                vec![0x01; 16],
            ),
        }),
    ]
}

/// One simplified object of each variant
fn simplified_objects() -> Vec<simplified::Object> {
    vec![
        simplified::Object::SymmetricKey(
            simplified::SymmetricKey::new(
                CryptographicAlgorithm::AES,
                128,
                vec![0x2b; 16],
                None,
                None,
                None,
            )
            .unwrap(),
        ),
        simplified::Object::PublicKey(
            simplified::PublicKey::new(
                CryptographicAlgorithm::ECDH,
                256,
                vec![0x04; 65],
                Some(KeyFormatType::Raw),
                None,
                None,
                None,
            )
            .unwrap(),
        ),
        simplified::Object::PrivateKey(
            simplified::PrivateKey::new(
                CryptographicAlgorithm::RSA,
                2048,
                vec![0x30; 1190],
                Some(KeyFormatType::PKCS1),
                None,
                None,
                None,
            )
            .unwrap(),
        ),
        simplified::Object::X509Certificate(
            simplified::X509Certificate::new(certificate_der(), None, None).unwrap(),
        ),
        simplified::Object::SecretData(
            simplified::SecretData::new(SecretDataType::Seed, vec![9; 48], None, None).unwrap(),
        ),
        simplified::Object::OpaqueObject(simplified::OpaqueObject::new(
            OpaqueDataType::Unknown,
            vec![1, 2, 3],
            None,
        )),
        simplified::Object::SplitKey(
            simplified::SplitKey::new(
                CryptographicAlgorithm::AES,
                256,
                vec![0x77; 32],
                None,
                SplitKeySharing {
                    split_key_parts: 3,
                    key_part_identifier: 3,
                    split_key_threshold: 3,
                    split_key_method: SplitKeyMethod::XOR,
                    prime_field_size: None,
                },
                None,
                None,
                None,
            )
            .unwrap(),
        ),
    ]
}

#[test]
fn test_kmip_round_trip() {
    log_init("debug");
    for object in kmip_objects() {
        let simplified = simplified::Object::try_from(object.clone()).unwrap();
        assert_eq!(simplified.object_type(), object.object_type());
        let back = kmip::Object::try_from(simplified).unwrap();
        assert_eq!(back, object);
    }
}

#[test]
fn test_simplified_round_trip() {
    log_init("debug");
    for object in simplified_objects() {
        let converted = kmip::Object::try_from(object.clone()).unwrap();
        assert_eq!(converted.object_type(), object.object_type());
        let back = simplified::Object::try_from(converted).unwrap();
        assert_eq!(back, object);
    }
}

#[test]
fn test_converter_dispatch() {
    log_init("debug");
    let converter = ManagedObjectConverter::new();
    let expected = [
        ObjectType::SymmetricKey,
        ObjectType::PublicKey,
        ObjectType::PrivateKey,
        ObjectType::Certificate,
        ObjectType::SecretData,
        ObjectType::OpaqueObject,
        ObjectType::SplitKey,
    ];

    for (object, object_type) in kmip_objects().into_iter().zip(expected) {
        let ManagedObject::Simplified(converted) = converter.convert(object.into()).unwrap()
        else {
            panic!("a KMIP object must convert to a simplified object");
        };
        assert_eq!(converted.object_type(), object_type);
    }

    for (object, object_type) in simplified_objects().into_iter().zip(expected) {
        let ManagedObject::Kmip(converted) = converter.convert(object.into()).unwrap() else {
            panic!("a simplified object must convert to a KMIP object");
        };
        assert_eq!(converted.object_type(), object_type);
    }
}

#[test]
fn test_unsupported_variant() {
    log_init("debug");
    let pgp_key = kmip::Object::PGPKey(kmip::PGPKey {
        pgp_key_version: 4,
        key_block: key_block(
            KeyFormatType::Raw,
            CryptographicAlgorithm::RSA,
            2048,
            vec![0x99; 256],
        ),
    });
    let err = ManagedObjectConverter::new()
        .convert(ManagedObject::Kmip(pgp_key))
        .unwrap_err();
    assert!(matches!(err, KmipError::UnsupportedVariant(_)), "{err}");
    assert_eq!(err.reason(), ResultReason::FeatureNotSupported);
}

#[test]
fn test_symmetric_key_format_mismatch() {
    log_init("debug");
    for key_format_type in [
        KeyFormatType::TransparentSymmetricKey,
        KeyFormatType::Opaque,
        KeyFormatType::PKCS8,
    ] {
        let object = kmip::Object::SymmetricKey(kmip::SymmetricKey {
            key_block: key_block(
                key_format_type,
                CryptographicAlgorithm::AES,
                128,
                vec![0x2b; 16],
            ),
        });
        let err = simplified::Object::try_from(object).unwrap_err();
        assert_eq!(
            err,
            KmipError::KeyFormatTypeMismatch {
                expected: KeyFormatType::Raw,
                observed: key_format_type,
            }
        );
    }

    // transparent key material is read, then the format is still rejected
    let object = kmip::Object::SymmetricKey(kmip::SymmetricKey {
        key_block: KeyBlock {
            key_value: Some(KeyValue {
                key_material: KeyMaterial::TransparentSymmetricKey {
                    key: Zeroizing::new(vec![0x2b; 16]),
                },
            }),
            ..key_block(
                KeyFormatType::TransparentSymmetricKey,
                CryptographicAlgorithm::AES,
                128,
                vec![],
            )
        },
    });
    let err = simplified::Object::try_from(object).unwrap_err();
    assert_eq!(err.reason(), ResultReason::KeyFormatTypeNotSupported);
}

#[test]
fn test_asymmetric_key_format_is_preserved() {
    log_init("debug");
    // public and private keys keep the format of the protocol object
    for object in [
        kmip::Object::PublicKey(kmip::PublicKey {
            key_block: key_block(
                KeyFormatType::PKCS1,
                CryptographicAlgorithm::RSA,
                2048,
                vec![0x30; 270],
            ),
        }),
        kmip::Object::PrivateKey(kmip::PrivateKey {
            key_block: key_block(
                KeyFormatType::PKCS1,
                CryptographicAlgorithm::RSA,
                2048,
                vec![0x30; 1190],
            ),
        }),
    ] {
        let simplified = simplified::Object::try_from(object.clone()).unwrap();
        match &simplified {
            simplified::Object::PublicKey(key) => {
                assert_eq!(key.key_format_type(), KeyFormatType::PKCS1);
            }
            simplified::Object::PrivateKey(key) => {
                assert_eq!(key.key_format_type(), KeyFormatType::PKCS1);
            }
            other => panic!("unexpected object: {other}"),
        }
        assert_eq!(kmip::Object::try_from(simplified).unwrap(), object);
    }
}

#[test]
fn test_wrapping_data_absence_and_emptiness() {
    log_init("debug");
    // no wrapping data: no wrapping data
    assert!(build_key_wrapping_data(None).is_none());
    let simplified = simplified::Object::try_from(kmip_objects().swap_remove(0)).unwrap();
    let simplified::Object::SymmetricKey(key) = &simplified else {
        panic!("expected a symmetric key, got {simplified}");
    };
    assert!(key.key_wrapping_data().is_none());

    // wrapping data without key information: both blocks are empty
    let kwd = KeyWrappingData {
        wrapping_method: WrappingMethod::Encrypt,
        encryption_key_information: None,
        mac_signature_key_information: None,
        mac_signature: None,
        iv_counter_nonce: None,
        encoding_option: None,
    };
    let wrapped = kmip::Object::SymmetricKey(kmip::SymmetricKey {
        key_block: KeyBlock {
            key_wrapping_data: Some(kwd.clone()),
            ..key_block(
                KeyFormatType::Raw,
                CryptographicAlgorithm::AES,
                256,
                vec![0x5a; 40],
            )
        },
    });
    let simplified = simplified::Object::try_from(wrapped.clone()).unwrap();
    let simplified::Object::SymmetricKey(key) = &simplified else {
        panic!("expected a symmetric key, got {simplified}");
    };
    let simplified_kwd = key.key_wrapping_data().unwrap();
    assert_eq!(simplified_kwd.wrapping_method, WrappingMethod::Encrypt);
    assert_eq!(
        simplified_kwd.encryption_key_information,
        KeyInformation::default()
    );
    assert_eq!(
        simplified_kwd.mac_signature_key_information,
        KeyInformation::default()
    );

    // and the empty blocks are dropped on the way back
    assert_eq!(kmip::Object::try_from(simplified).unwrap(), wrapped);
}

#[test]
fn test_wrapping_data_round_trip() {
    log_init("debug");
    let kwd = KeyWrappingData {
        wrapping_method: WrappingMethod::EncryptThenMACSign,
        encryption_key_information: Some(EncryptionKeyInformation {
            unique_identifier: "kek".to_owned(),
            cryptographic_parameters: Some(aes_parameters()),
        }),
        mac_signature_key_information: Some(MacSignatureKeyInformation {
            unique_identifier: "mac-key".to_owned(),
            cryptographic_parameters: None,
        }),
        mac_signature: Some(vec![0xaa; 32]),
        iv_counter_nonce: Some(vec![0xbb; 12]),
        encoding_option: Some(EncodingOption::NoEncoding),
    };

    let simplified_kwd = build_key_wrapping_data(Some(&kwd)).unwrap();
    assert_eq!(
        simplified_kwd.encryption_key_information,
        KeyInformation::new(
            "kek",
            Some(build_cryptographic_parameters(&aes_parameters()))
        )
    );
    assert_eq!(
        simplified_kwd.mac_signature_key_information,
        KeyInformation::new("mac-key", None)
    );
    assert_eq!(simplified_kwd.mac_signature.as_deref(), Some([0xaa; 32].as_slice()));
    assert_eq!(simplified_kwd.encoding_option, Some(EncodingOption::NoEncoding));

    let parameters = simplified_kwd
        .encryption_key_information
        .cryptographic_parameters
        .as_ref()
        .unwrap();
    assert_eq!(parameters.block_cipher_mode, Some(BlockCipherMode::GCM));
    assert_eq!(parameters.padding_method, Some(PaddingMethod::None));
    assert_eq!(parameters.iv_length, Some(96));
    assert_eq!(parameters.initial_counter_value, Some(1));
    assert!(parameters.key_role_type.is_none());

    assert_eq!(
        build_kmip_key_wrapping_data(Some(&simplified_kwd)).unwrap(),
        Some(kwd)
    );
    assert_eq!(build_kmip_key_wrapping_data(None).unwrap(), None);
}

#[test]
fn test_key_information_without_identifier() {
    log_init("debug");
    let mut kwd = simplified::KeyWrappingData::new(WrappingMethod::Encrypt);
    kwd.encryption_key_information.cryptographic_parameters =
        Some(simplified::CryptographicParameters::default());

    let err = build_kmip_key_wrapping_data(Some(&kwd)).unwrap_err();
    assert_eq!(err.reason(), ResultReason::InvalidField);
    assert!(err.to_string().contains("encryption key information"), "{err}");

    let key = simplified::SymmetricKey::new(
        CryptographicAlgorithm::AES,
        128,
        vec![0; 24],
        None,
        None,
        Some(kwd),
    )
    .unwrap();
    kmip::Object::try_from(simplified::Object::SymmetricKey(key)).unwrap_err();
}

#[test]
fn test_certificate_type_guard() {
    log_init("debug");
    let pgp_certificate = kmip::Object::Certificate(kmip::Certificate {
        certificate_type: CertificateType::PGP,
        certificate_value: vec![0x99, 0x01, 0x0d],
    });
    let err = simplified::Object::try_from(pgp_certificate).unwrap_err();
    assert_eq!(
        err,
        KmipError::UnsupportedCertificateType(CertificateType::PGP)
    );
    assert_eq!(err.reason(), ResultReason::FeatureNotSupported);

    let x509 = simplified::Object::try_from(kmip::Object::Certificate(kmip::Certificate {
        certificate_type: CertificateType::X509,
        certificate_value: certificate_der(),
    }))
    .unwrap();
    let simplified::Object::X509Certificate(certificate) = x509 else {
        panic!("expected an X.509 certificate");
    };
    assert_eq!(certificate.certificate_type(), CertificateType::X509);
    assert_eq!(certificate.value(), certificate_der().as_slice());
}

#[test]
fn test_split_key_sharing_pass_through() {
    log_init("debug");
    // the identifier is beyond the number of parts: nothing complains
    let object = kmip::Object::SplitKey(kmip::SplitKey {
        split_key_parts: 2,
        key_part_identifier: 7,
        split_key_threshold: 5,
        split_key_method: SplitKeyMethod::PolynomialSharingGF2_16,
        prime_field_size: None,
        key_block: key_block(
            KeyFormatType::Raw,
            CryptographicAlgorithm::AES,
            128,
            vec![0x03; 16],
        ),
    });
    let simplified = simplified::Object::try_from(object.clone()).unwrap();
    let simplified::Object::SplitKey(key) = &simplified else {
        panic!("expected a split key, got {simplified}");
    };
    assert_eq!(key.split_key_parts(), 2);
    assert_eq!(key.key_part_identifier(), 7);
    assert_eq!(key.split_key_threshold(), 5);
    assert_eq!(key.split_key_method(), SplitKeyMethod::PolynomialSharingGF2_16);
    assert_eq!(kmip::Object::try_from(simplified).unwrap(), object);
}

#[test]
fn test_secret_data_key_block() {
    log_init("debug");
    let secret = simplified::SecretData::new(
        SecretDataType::Password,
        b"correct horse".to_vec(),
        None,
        None,
    )
    .unwrap();
    let kmip::Object::SecretData(secret_data) =
        kmip::Object::try_from(simplified::Object::SecretData(secret)).unwrap()
    else {
        panic!("expected secret data");
    };
    assert_eq!(secret_data.secret_data_type, SecretDataType::Password);
    let key_block = &secret_data.key_block;
    assert_eq!(key_block.key_format_type, KeyFormatType::Opaque);
    assert!(key_block.cryptographic_algorithm.is_none());
    assert!(key_block.cryptographic_length.is_none());
    assert!(key_block.key_wrapping_data.is_none());
    assert_eq!(key_block.key_bytes().unwrap().as_slice(), b"correct horse");
}

#[test]
fn test_incomplete_key_block() {
    log_init("debug");
    let no_algorithm = kmip::Object::SymmetricKey(kmip::SymmetricKey {
        key_block: KeyBlock {
            cryptographic_algorithm: None,
            ..key_block(
                KeyFormatType::Raw,
                CryptographicAlgorithm::AES,
                128,
                vec![0; 16],
            )
        },
    });
    let err = simplified::Object::try_from(no_algorithm).unwrap_err();
    assert_eq!(err.reason(), ResultReason::InvalidField);

    let no_value = kmip::Object::PrivateKey(kmip::PrivateKey {
        key_block: KeyBlock {
            key_value: None,
            ..key_block(
                KeyFormatType::PKCS8,
                CryptographicAlgorithm::RSA,
                2048,
                vec![],
            )
        },
    });
    let err = simplified::Object::try_from(no_value).unwrap_err();
    assert_eq!(err.reason(), ResultReason::KeyValueNotPresent);

    // the simplified constructors still validate what comes out of the key block
    let too_short = kmip::Object::SymmetricKey(kmip::SymmetricKey {
        key_block: key_block(
            KeyFormatType::Raw,
            CryptographicAlgorithm::AES,
            256,
            vec![0; 16],
        ),
    });
    simplified::Object::try_from(too_short).unwrap_err();
}

#[test]
fn test_managed_object_display() {
    log_init("debug");
    let object: ManagedObject = simplified_objects().swap_remove(0).into();
    assert_eq!(
        object.to_string(),
        "simplified SymmetricKey(algorithm: AES, length: 128, format: Raw, value: 16 bytes, \
         wrapped: false, names: [\"Symmetric Key\"])"
    );
    let converted = ManagedObjectConverter::default().convert(object).unwrap();
    assert!(converted.to_string().starts_with("KMIP SymmetricKey(key_block: KeyBlock"));
}
