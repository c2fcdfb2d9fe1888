use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::key_wrapping::build_kmip_key_wrapping_data;
use crate::{
    error::{result::KmipResult, KmipError},
    kmip::{
        kmip_data_structures::{KeyBlock, KeyValue},
        kmip_objects as kmip,
        kmip_types::{CryptographicAlgorithm, KeyFormatType},
    },
    simplified::{self, Certificate},
};

impl TryFrom<simplified::Object> for kmip::Object {
    type Error = KmipError;

    fn try_from(object: simplified::Object) -> Result<Self, Self::Error> {
        debug!("converting a simplified {} to the KMIP model", object.object_type());
        match object {
            simplified::Object::SymmetricKey(key) => build_symmetric_key(&key),
            simplified::Object::PublicKey(key) => build_public_key(&key),
            simplified::Object::PrivateKey(key) => build_private_key(&key),
            simplified::Object::X509Certificate(certificate) => {
                Ok(build_certificate(&certificate))
            }
            simplified::Object::SecretData(secret) => Ok(build_secret_data(&secret)),
            simplified::Object::OpaqueObject(opaque) => Ok(build_opaque_object(&opaque)),
            simplified::Object::SplitKey(key) => build_split_key(&key),
        }
    }
}

fn build_key_block(
    key_format_type: KeyFormatType,
    cryptographic_algorithm: CryptographicAlgorithm,
    cryptographic_length: i32,
    value: &[u8],
    key_wrapping_data: Option<&simplified::KeyWrappingData>,
) -> KmipResult<KeyBlock> {
    trace!(
        "build_key_block: format: {key_format_type}, algorithm: {cryptographic_algorithm}, \
         length: {cryptographic_length}, wrapped: {}",
        key_wrapping_data.is_some()
    );
    Ok(KeyBlock {
        key_format_type,
        key_compression_type: None,
        key_value: Some(KeyValue::from_bytes(Zeroizing::new(value.to_vec()))),
        cryptographic_algorithm: Some(cryptographic_algorithm),
        cryptographic_length: Some(cryptographic_length),
        key_wrapping_data: build_kmip_key_wrapping_data(key_wrapping_data)?,
    })
}

fn build_symmetric_key(key: &simplified::SymmetricKey) -> KmipResult<kmip::Object> {
    Ok(kmip::Object::SymmetricKey(kmip::SymmetricKey {
        key_block: build_key_block(
            key.key_format_type(),
            key.cryptographic_algorithm(),
            key.cryptographic_length(),
            key.value(),
            key.key_wrapping_data(),
        )?,
    }))
}

fn build_public_key(key: &simplified::PublicKey) -> KmipResult<kmip::Object> {
    Ok(kmip::Object::PublicKey(kmip::PublicKey {
        key_block: build_key_block(
            key.key_format_type(),
            key.cryptographic_algorithm(),
            key.cryptographic_length(),
            key.value(),
            key.key_wrapping_data(),
        )?,
    }))
}

fn build_private_key(key: &simplified::PrivateKey) -> KmipResult<kmip::Object> {
    Ok(kmip::Object::PrivateKey(kmip::PrivateKey {
        key_block: build_key_block(
            key.key_format_type(),
            key.cryptographic_algorithm(),
            key.cryptographic_length(),
            key.value(),
            key.key_wrapping_data(),
        )?,
    }))
}

fn build_split_key(key: &simplified::SplitKey) -> KmipResult<kmip::Object> {
    let sharing = key.sharing();
    trace!(
        "build_split_key: part {} of {}, threshold: {}, method: {}",
        sharing.key_part_identifier,
        sharing.split_key_parts,
        sharing.split_key_threshold,
        sharing.split_key_method
    );
    Ok(kmip::Object::SplitKey(kmip::SplitKey {
        split_key_parts: sharing.split_key_parts,
        key_part_identifier: sharing.key_part_identifier,
        split_key_threshold: sharing.split_key_threshold,
        split_key_method: sharing.split_key_method,
        prime_field_size: sharing.prime_field_size.clone(),
        key_block: build_key_block(
            key.key_format_type(),
            key.cryptographic_algorithm(),
            key.cryptographic_length(),
            key.value(),
            key.key_wrapping_data(),
        )?,
    }))
}

fn build_certificate(certificate: &simplified::X509Certificate) -> kmip::Object {
    kmip::Object::Certificate(kmip::Certificate {
        certificate_type: certificate.certificate_type(),
        certificate_value: certificate.value().to_vec(),
    })
}

// secret data has no algorithm, length or wrapping
fn build_secret_data(secret: &simplified::SecretData) -> kmip::Object {
    kmip::Object::SecretData(kmip::SecretData {
        secret_data_type: secret.secret_data_type(),
        key_block: KeyBlock {
            key_format_type: KeyFormatType::Opaque,
            key_compression_type: None,
            key_value: Some(KeyValue::from_bytes(Zeroizing::new(secret.value().to_vec()))),
            cryptographic_algorithm: None,
            cryptographic_length: None,
            key_wrapping_data: None,
        },
    })
}

fn build_opaque_object(opaque: &simplified::OpaqueObject) -> kmip::Object {
    kmip::Object::OpaqueObject(kmip::OpaqueObject {
        opaque_data_type: opaque.opaque_type(),
        opaque_data_value: opaque.value().to_vec(),
    })
}
