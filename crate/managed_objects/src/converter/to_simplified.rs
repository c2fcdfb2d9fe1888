use tracing::{debug, trace};

use super::key_wrapping::build_key_wrapping_data;
use crate::{
    error::{result::KmipResult, KmipError},
    kmip::{
        kmip_data_structures::KeyBlock,
        kmip_objects as kmip,
        kmip_types::{CertificateType, CryptographicAlgorithm},
    },
    kmip_ensure,
    simplified::{self, SplitKeySharing},
    KmipResultHelper,
};

impl TryFrom<kmip::Object> for simplified::Object {
    type Error = KmipError;

    fn try_from(object: kmip::Object) -> Result<Self, Self::Error> {
        debug!("converting a KMIP {} to the simplified model", object.object_type());
        match object {
            kmip::Object::SymmetricKey(key) => build_symmetric_key(&key),
            kmip::Object::PublicKey(key) => build_public_key(&key),
            kmip::Object::PrivateKey(key) => build_private_key(&key),
            kmip::Object::Certificate(certificate) => build_certificate(certificate),
            kmip::Object::SecretData(secret) => build_secret_data(&secret),
            kmip::Object::OpaqueObject(opaque) => Ok(build_opaque_object(opaque)),
            kmip::Object::SplitKey(key) => build_split_key(&key),
            kmip::Object::PGPKey(_) => Err(KmipError::UnsupportedVariant(
                "a PGP key has no simplified counterpart".to_owned(),
            )),
        }
    }
}

/// The parts of a key block every simplified key needs
struct KeyParts {
    cryptographic_algorithm: CryptographicAlgorithm,
    cryptographic_length: i32,
    value: Vec<u8>,
    key_wrapping_data: Option<simplified::KeyWrappingData>,
}

fn key_parts(key_block: &KeyBlock) -> KmipResult<KeyParts> {
    trace!("key_parts: {key_block}");
    let cryptographic_algorithm = key_block
        .cryptographic_algorithm
        .context("the key block has no cryptographic algorithm")?;
    let cryptographic_length = key_block
        .cryptographic_length
        .context("the key block has no cryptographic length")?;
    let mut bytes = key_block.key_bytes()?;
    Ok(KeyParts {
        cryptographic_algorithm,
        cryptographic_length,
        value: std::mem::take(&mut *bytes),
        key_wrapping_data: build_key_wrapping_data(key_block.key_wrapping_data.as_ref()),
    })
}

fn build_symmetric_key(key: &kmip::SymmetricKey) -> KmipResult<simplified::Object> {
    let parts = key_parts(&key.key_block)?;
    let symmetric_key = simplified::SymmetricKey::new(
        parts.cryptographic_algorithm,
        parts.cryptographic_length,
        parts.value,
        None,
        None,
        parts.key_wrapping_data,
    )?;
    // the simplified model only holds raw symmetric keys
    let observed = key.key_block.key_format_type;
    kmip_ensure!(
        symmetric_key.key_format_type() == observed,
        KmipError::KeyFormatTypeMismatch {
            expected: symmetric_key.key_format_type(),
            observed,
        }
    );
    Ok(simplified::Object::SymmetricKey(symmetric_key))
}

fn build_public_key(key: &kmip::PublicKey) -> KmipResult<simplified::Object> {
    let parts = key_parts(&key.key_block)?;
    Ok(simplified::Object::PublicKey(simplified::PublicKey::new(
        parts.cryptographic_algorithm,
        parts.cryptographic_length,
        parts.value,
        Some(key.key_block.key_format_type),
        None,
        None,
        parts.key_wrapping_data,
    )?))
}

fn build_private_key(key: &kmip::PrivateKey) -> KmipResult<simplified::Object> {
    let parts = key_parts(&key.key_block)?;
    Ok(simplified::Object::PrivateKey(simplified::PrivateKey::new(
        parts.cryptographic_algorithm,
        parts.cryptographic_length,
        parts.value,
        Some(key.key_block.key_format_type),
        None,
        None,
        parts.key_wrapping_data,
    )?))
}

fn build_split_key(key: &kmip::SplitKey) -> KmipResult<simplified::Object> {
    let parts = key_parts(&key.key_block)?;
    Ok(simplified::Object::SplitKey(simplified::SplitKey::new(
        parts.cryptographic_algorithm,
        parts.cryptographic_length,
        parts.value,
        Some(key.key_block.key_format_type),
        SplitKeySharing {
            split_key_parts: key.split_key_parts,
            key_part_identifier: key.key_part_identifier,
            split_key_threshold: key.split_key_threshold,
            split_key_method: key.split_key_method,
            prime_field_size: key.prime_field_size.clone(),
        },
        None,
        None,
        parts.key_wrapping_data,
    )?))
}

fn build_certificate(certificate: kmip::Certificate) -> KmipResult<simplified::Object> {
    match certificate.certificate_type {
        CertificateType::X509 => Ok(simplified::Object::X509Certificate(
            simplified::X509Certificate::new(certificate.certificate_value, None, None)?,
        )),
        certificate_type => Err(KmipError::UnsupportedCertificateType(certificate_type)),
    }
}

fn build_secret_data(secret: &kmip::SecretData) -> KmipResult<simplified::Object> {
    let mut bytes = secret.key_block.key_bytes()?;
    Ok(simplified::Object::SecretData(simplified::SecretData::new(
        secret.secret_data_type,
        std::mem::take(&mut *bytes),
        None,
        None,
    )?))
}

fn build_opaque_object(opaque: kmip::OpaqueObject) -> simplified::Object {
    simplified::Object::OpaqueObject(simplified::OpaqueObject::new(
        opaque.opaque_data_type,
        opaque.opaque_data_value,
        None,
    ))
}
