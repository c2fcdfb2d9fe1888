use std::fmt::{self, Debug, Display};

use serde::Deserialize;

use super::{default_names, validate_masks};
use crate::{
    error::{result::KmipResult, KmipError},
    kmip::kmip_types::{CertificateType, CryptographicUsageMask, ObjectType},
    KmipResultHelper,
};

/// A digital certificate of the simplified object model.
///
/// `Certificate` cannot be instantiated by itself: a concrete certificate
/// type holds the validated [`CertificateFields`] and supplies its own
/// representation and equality.
pub trait Certificate: Debug + Display + PartialEq {
    /// The validated fields shared by every certificate type
    fn fields(&self) -> &CertificateFields;

    fn object_type(&self) -> ObjectType {
        ObjectType::Certificate
    }

    fn certificate_type(&self) -> CertificateType {
        self.fields().certificate_type
    }

    /// The DER-encoded certificate
    fn value(&self) -> &[u8] {
        &self.fields().value
    }

    fn cryptographic_usage_masks(&self) -> &[CryptographicUsageMask] {
        &self.fields().cryptographic_usage_masks
    }

    fn names(&self) -> &[String] {
        &self.fields().names
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateFields {
    certificate_type: CertificateType,
    value: Vec<u8>,
    cryptographic_usage_masks: Vec<CryptographicUsageMask>,
    names: Vec<String>,
}

impl CertificateFields {
    /// Validate the fields of a certificate.
    ///
    /// Masks default to none and the name to `"Certificate"`.
    pub fn new(
        certificate_type: CertificateType,
        value: Vec<u8>,
        masks: Option<Vec<CryptographicUsageMask>>,
        name: Option<String>,
    ) -> KmipResult<Self> {
        Ok(Self {
            certificate_type,
            value,
            cryptographic_usage_masks: validate_masks(masks)?,
            names: default_names(name, "Certificate"),
        })
    }

    /// Validate loosely typed certificate arguments:
    /// `{"certificate_type": "X509", "value": [48, 130, ...], "masks": ["Encrypt"], "name": "..."}`
    pub fn from_json(args: serde_json::Value) -> KmipResult<Self> {
        let args: CertificateArgs =
            serde_json::from_value(args).context("invalid certificate arguments")?;
        Self::new(args.certificate_type, args.value, args.masks, args.name)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CertificateArgs {
    certificate_type: CertificateType,
    value: Vec<u8>,
    masks: Option<Vec<CryptographicUsageMask>>,
    name: Option<String>,
}

/// An X.509 certificate
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "X509CertificateArgs")]
pub struct X509Certificate {
    fields: CertificateFields,
}

impl X509Certificate {
    /// The name defaults to `"X.509 Certificate"`
    pub fn new(
        value: Vec<u8>,
        masks: Option<Vec<CryptographicUsageMask>>,
        name: Option<String>,
    ) -> KmipResult<Self> {
        let name = name.unwrap_or_else(|| "X.509 Certificate".to_owned());
        Ok(Self {
            fields: CertificateFields::new(CertificateType::X509, value, masks, Some(name))?,
        })
    }

    /// Parse the DER value and extract the subject, the issuer and the serial number
    #[cfg(feature = "x509")]
    pub fn parse_details(&self) -> KmipResult<X509Details> {
        let (_, certificate) = x509_parser::parse_x509_certificate(self.value())
            .context("the value is not a valid DER-encoded X.509 certificate")?;
        let common_name = |name: &x509_parser::x509::X509Name<'_>| {
            name.iter_common_name()
                .next()
                .and_then(|cn| cn.as_str().ok())
                .map(ToOwned::to_owned)
        };
        Ok(X509Details {
            subject: certificate.subject().to_string(),
            subject_common_name: common_name(certificate.subject()),
            issuer: certificate.issuer().to_string(),
            issuer_common_name: common_name(certificate.issuer()),
            serial: certificate.raw_serial_as_string(),
        })
    }
}

impl Certificate for X509Certificate {
    fn fields(&self) -> &CertificateFields {
        &self.fields
    }
}

impl Display for X509Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X509Certificate(value: {} bytes, masks: {:?}, names: {:?})",
            self.value().len(),
            self.cryptographic_usage_masks(),
            self.names()
        )
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct X509CertificateArgs {
    value: Vec<u8>,
    masks: Option<Vec<CryptographicUsageMask>>,
    name: Option<String>,
}

impl TryFrom<X509CertificateArgs> for X509Certificate {
    type Error = KmipError;

    fn try_from(args: X509CertificateArgs) -> Result<Self, Self::Error> {
        Self::new(args.value, args.masks, args.name)
    }
}

/// What `X509Certificate::parse_details` reads from the DER value
#[cfg(feature = "x509")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X509Details {
    pub subject: String,
    pub subject_common_name: Option<String>,
    pub issuer: String,
    pub issuer_common_name: Option<String>,
    /// Colon separated hex bytes
    pub serial: String,
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use std::fmt;

    use serde_json::json;

    use super::{Certificate, CertificateFields, X509Certificate};
    use crate::{
        error::KmipError,
        kmip::kmip_types::{CertificateType, CryptographicUsageMask, ObjectType, ResultReason},
    };

    // KMIP 1.1 test vectors (sections 13.2 and 13.4)
    fn server_certificate() -> Vec<u8> {
        hex::decode(
            include_str!("../../test_data/certificates/kmip_1_1_server.hex").replace('\n', ""),
        )
        .unwrap()
    }

    fn client_certificate() -> Vec<u8> {
        hex::decode(
            include_str!("../../test_data/certificates/kmip_1_1_client.hex").replace('\n', ""),
        )
        .unwrap()
    }

    /// A certificate type that only relies on the shared validation
    #[derive(Debug)]
    struct DummyCertificate {
        fields: CertificateFields,
    }

    impl DummyCertificate {
        fn new(
            certificate_type: CertificateType,
            value: Vec<u8>,
            masks: Option<Vec<CryptographicUsageMask>>,
            name: Option<String>,
        ) -> Result<Self, KmipError> {
            Ok(Self {
                fields: CertificateFields::new(certificate_type, value, masks, name)?,
            })
        }
    }

    impl Certificate for DummyCertificate {
        fn fields(&self) -> &CertificateFields {
            &self.fields
        }
    }

    impl fmt::Display for DummyCertificate {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Ok(())
        }
    }

    impl PartialEq for DummyCertificate {
        fn eq(&self, _other: &Self) -> bool {
            true
        }
    }

    fn assert_invalid(result: Result<CertificateFields, KmipError>) {
        let err = result.unwrap_err();
        assert_eq!(err.reason(), ResultReason::InvalidField, "{err}");
    }

    #[test]
    fn test_init() {
        let certificate =
            DummyCertificate::new(CertificateType::X509, server_certificate(), None, None).unwrap();

        assert_eq!(certificate.certificate_type(), CertificateType::X509);
        assert_eq!(certificate.value(), server_certificate().as_slice());
        assert!(certificate.cryptographic_usage_masks().is_empty());
        assert_eq!(certificate.names(), ["Certificate"]);
        assert_eq!(certificate.object_type(), ObjectType::Certificate);
        assert_eq!(certificate.to_string(), "");

        // equality is left to the concrete type
        let other =
            DummyCertificate::new(CertificateType::PGP, client_certificate(), None, None).unwrap();
        assert!(certificate == other);
    }

    #[test]
    fn test_init_with_args() {
        let certificate = DummyCertificate::new(
            CertificateType::X509,
            server_certificate(),
            Some(vec![
                CryptographicUsageMask::Encrypt,
                CryptographicUsageMask::Verify,
            ]),
            Some("Test Certificate".to_owned()),
        )
        .unwrap();

        assert_eq!(
            certificate.cryptographic_usage_masks(),
            [
                CryptographicUsageMask::Encrypt,
                CryptographicUsageMask::Verify
            ]
        );
        assert_eq!(certificate.names(), ["Test Certificate"]);
    }

    #[test]
    fn test_init_from_json() {
        let fields = CertificateFields::from_json(json!({
            "certificate_type": "X509",
            "value": server_certificate(),
            "masks": ["Encrypt", "Verify"],
            "name": "Test Certificate",
        }))
        .unwrap();
        let expected = CertificateFields::new(
            CertificateType::X509,
            server_certificate(),
            Some(vec![
                CryptographicUsageMask::Encrypt,
                CryptographicUsageMask::Verify,
            ]),
            Some("Test Certificate".to_owned()),
        )
        .unwrap();
        assert_eq!(fields, expected);

        // numeric values are accepted as well
        let fields = CertificateFields::from_json(json!({
            "certificate_type": 1,
            "value": server_certificate(),
            "masks": [4],
        }))
        .unwrap();
        assert_eq!(fields.names, ["Certificate"]);
        assert_eq!(
            fields.cryptographic_usage_masks,
            [CryptographicUsageMask::Encrypt]
        );
    }

    #[test]
    fn test_validate_on_invalid_certificate_type() {
        assert_invalid(CertificateFields::from_json(json!({
            "certificate_type": "invalid",
            "value": server_certificate(),
        })));
        assert_invalid(CertificateFields::from_json(json!({
            "certificate_type": 42,
            "value": server_certificate(),
        })));
    }

    #[test]
    fn test_validate_on_invalid_value() {
        assert_invalid(CertificateFields::from_json(json!({
            "certificate_type": "X509",
            "value": 0,
        })));
    }

    #[test]
    fn test_validate_on_invalid_masks() {
        assert_invalid(CertificateFields::from_json(json!({
            "certificate_type": "X509",
            "value": server_certificate(),
            "masks": "invalid",
        })));
    }

    #[test]
    fn test_validate_on_invalid_mask() {
        assert_invalid(CertificateFields::from_json(json!({
            "certificate_type": "X509",
            "value": server_certificate(),
            "masks": ["invalid"],
        })));
        // a combination of usages is not a single mask
        assert_invalid(CertificateFields::new(
            CertificateType::X509,
            server_certificate(),
            Some(vec![
                CryptographicUsageMask::Encrypt | CryptographicUsageMask::Decrypt,
            ]),
            None,
        ));
    }

    #[test]
    fn test_validate_on_invalid_name() {
        assert_invalid(CertificateFields::from_json(json!({
            "certificate_type": "X509",
            "value": server_certificate(),
            "name": 0,
        })));
    }

    #[test]
    fn test_x509_certificate() {
        let certificate = X509Certificate::new(client_certificate(), None, None).unwrap();
        assert_eq!(certificate.certificate_type(), CertificateType::X509);
        assert_eq!(certificate.object_type(), ObjectType::Certificate);
        assert_eq!(certificate.names(), ["X.509 Certificate"]);
        assert_eq!(
            certificate.to_string(),
            "X509Certificate(value: 810 bytes, masks: [], names: [\"X.509 Certificate\"])"
        );

        let other = X509Certificate::new(server_certificate(), None, None).unwrap();
        assert_ne!(certificate, other);
        assert_eq!(certificate, certificate.clone());
    }

    #[cfg(feature = "x509")]
    #[test]
    fn test_parse_details() {
        let details = X509Certificate::new(server_certificate(), None, None)
            .unwrap()
            .parse_details()
            .unwrap();
        assert_eq!(details.subject_common_name.as_deref(), Some("KMIP"));
        assert_eq!(details.issuer_common_name.as_deref(), Some("KMIP"));
        assert!(details.subject.contains("CN=KMIP"));
        assert_eq!(details.serial, "01");

        let details = X509Certificate::new(client_certificate(), None, None)
            .unwrap()
            .parse_details()
            .unwrap();
        assert_eq!(details.subject_common_name.as_deref(), Some("Client"));
        assert_eq!(details.issuer_common_name.as_deref(), Some("KMIP"));

        let garbage = X509Certificate::new(vec![0x30, 0x03, 0x01], None, None).unwrap();
        assert!(garbage.parse_details().is_err());
    }
}
