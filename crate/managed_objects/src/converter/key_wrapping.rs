use tracing::trace;

use crate::{
    error::result::KmipResult,
    kmip::kmip_data_structures as kmip,
    simplified::{self, KeyInformation},
    KmipResultHelper,
};

/// Flatten the protocol wrapping data.
///
/// No wrapping data gives `None`. A missing key information block gives an
/// empty [`KeyInformation`].
#[must_use]
pub fn build_key_wrapping_data(
    key_wrapping_data: Option<&kmip::KeyWrappingData>,
) -> Option<simplified::KeyWrappingData> {
    let kwd = key_wrapping_data?;
    trace!(
        "build_key_wrapping_data: method: {}, encryption key: {}, MAC/signature key: {}",
        kwd.wrapping_method,
        kwd.encryption_key_information.is_some(),
        kwd.mac_signature_key_information.is_some()
    );
    let encryption_key_information = kwd
        .encryption_key_information
        .as_ref()
        .map_or_else(KeyInformation::default, |eki| KeyInformation {
            unique_identifier: Some(eki.unique_identifier.clone()),
            cryptographic_parameters: eki
                .cryptographic_parameters
                .as_ref()
                .map(build_cryptographic_parameters),
        });
    let mac_signature_key_information = kwd
        .mac_signature_key_information
        .as_ref()
        .map_or_else(KeyInformation::default, |mski| KeyInformation {
            unique_identifier: Some(mski.unique_identifier.clone()),
            cryptographic_parameters: mski
                .cryptographic_parameters
                .as_ref()
                .map(build_cryptographic_parameters),
        });
    Some(simplified::KeyWrappingData {
        wrapping_method: kwd.wrapping_method,
        encryption_key_information,
        mac_signature_key_information,
        mac_signature: kwd.mac_signature.clone(),
        iv_counter_nonce: kwd.iv_counter_nonce.clone(),
        encoding_option: kwd.encoding_option,
    })
}

#[must_use]
pub fn build_cryptographic_parameters(
    parameters: &kmip::CryptographicParameters,
) -> simplified::CryptographicParameters {
    simplified::CryptographicParameters {
        block_cipher_mode: parameters.block_cipher_mode,
        padding_method: parameters.padding_method,
        hashing_algorithm: parameters.hashing_algorithm,
        key_role_type: parameters.key_role_type,
        digital_signature_algorithm: parameters.digital_signature_algorithm,
        cryptographic_algorithm: parameters.cryptographic_algorithm,
        random_iv: parameters.random_iv,
        iv_length: parameters.iv_length,
        tag_length: parameters.tag_length,
        fixed_field_length: parameters.fixed_field_length,
        invocation_field_length: parameters.invocation_field_length,
        counter_length: parameters.counter_length,
        initial_counter_value: parameters.initial_counter_value,
    }
}

/// Nest the simplified wrapping data back into the protocol structures.
///
/// An empty [`KeyInformation`] gives no block. A block with parameters but
/// no unique identifier cannot be expressed and is rejected.
pub fn build_kmip_key_wrapping_data(
    key_wrapping_data: Option<&simplified::KeyWrappingData>,
) -> KmipResult<Option<kmip::KeyWrappingData>> {
    let Some(kwd) = key_wrapping_data else {
        return Ok(None)
    };
    let encryption_key_information =
        key_information(&kwd.encryption_key_information, "encryption key information")?.map(
            |(unique_identifier, cryptographic_parameters)| kmip::EncryptionKeyInformation {
                unique_identifier,
                cryptographic_parameters,
            },
        );
    let mac_signature_key_information =
        key_information(&kwd.mac_signature_key_information, "MAC/signature key information")?
            .map(
                |(unique_identifier, cryptographic_parameters)| {
                    kmip::MacSignatureKeyInformation {
                        unique_identifier,
                        cryptographic_parameters,
                    }
                },
            );
    Ok(Some(kmip::KeyWrappingData {
        wrapping_method: kwd.wrapping_method,
        encryption_key_information,
        mac_signature_key_information,
        mac_signature: kwd.mac_signature.clone(),
        iv_counter_nonce: kwd.iv_counter_nonce.clone(),
        encoding_option: kwd.encoding_option,
    }))
}

#[must_use]
pub fn build_kmip_cryptographic_parameters(
    parameters: &simplified::CryptographicParameters,
) -> kmip::CryptographicParameters {
    kmip::CryptographicParameters {
        block_cipher_mode: parameters.block_cipher_mode,
        padding_method: parameters.padding_method,
        hashing_algorithm: parameters.hashing_algorithm,
        key_role_type: parameters.key_role_type,
        digital_signature_algorithm: parameters.digital_signature_algorithm,
        cryptographic_algorithm: parameters.cryptographic_algorithm,
        random_iv: parameters.random_iv,
        iv_length: parameters.iv_length,
        tag_length: parameters.tag_length,
        fixed_field_length: parameters.fixed_field_length,
        invocation_field_length: parameters.invocation_field_length,
        counter_length: parameters.counter_length,
        initial_counter_value: parameters.initial_counter_value,
    }
}

type KeyInformationParts = (String, Option<kmip::CryptographicParameters>);

fn key_information(
    key_information: &KeyInformation,
    block: &str,
) -> KmipResult<Option<KeyInformationParts>> {
    if key_information.is_empty() {
        return Ok(None)
    }
    let unique_identifier = key_information
        .unique_identifier
        .clone()
        .with_context(|| format!("{block}: the unique identifier of the key is missing"))?;
    Ok(Some((
        unique_identifier,
        key_information
            .cryptographic_parameters
            .as_ref()
            .map(build_kmip_cryptographic_parameters),
    )))
}
