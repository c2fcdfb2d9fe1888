use thiserror::Error;

use crate::kmip::kmip_types::{CertificateType, KeyFormatType, ResultReason, ResultStatus};

pub(crate) mod result;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KmipError {
    /// A field value that a constructor or builder cannot accept.
    #[error("Invalid KMIP value: {0}: {1}")]
    InvalidKmipValue(ResultReason, String),

    #[error("Key format type mismatch: expected {expected}, observed {observed}")]
    KeyFormatTypeMismatch {
        expected: KeyFormatType,
        observed: KeyFormatType,
    },

    #[error("Not Supported: certificate type {0} cannot be converted")]
    UnsupportedCertificateType(CertificateType),

    #[error("Not Supported: {0}")]
    UnsupportedVariant(String),
}

impl KmipError {
    /// The KMIP result reason a server would report for this error
    #[must_use]
    pub const fn reason(&self) -> ResultReason {
        match self {
            Self::InvalidKmipValue(reason, _) => *reason,
            Self::KeyFormatTypeMismatch { .. } => ResultReason::KeyFormatTypeNotSupported,
            Self::UnsupportedCertificateType(_) | Self::UnsupportedVariant(_) => {
                ResultReason::FeatureNotSupported
            }
        }
    }

    /// Conversion errors are never transient: the status is always a failure
    #[must_use]
    pub const fn result_status(&self) -> ResultStatus {
        ResultStatus::OperationFailed
    }

    /// Rewrap the error with another result reason, keeping its message
    #[must_use]
    pub fn with_reason(&self, reason: ResultReason) -> Self {
        match self {
            Self::InvalidKmipValue(_r, e) => Self::InvalidKmipValue(reason, e.clone()),
            e => Self::InvalidKmipValue(reason, e.to_string()),
        }
    }
}

/// Return early with an error if a condition is not satisfied.
///
/// This macro is equivalent to `if !$cond { return Err(From::from($err)); }`.
#[macro_export]
macro_rules! kmip_ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::kmip_error!($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return ::core::result::Result::Err($crate::kmip_error!($fmt, $($arg)*));
        }
    };
}

/// Construct an invalid field error from a string.
#[macro_export]
macro_rules! kmip_error {
    ($msg:literal) => {
        $crate::KmipError::InvalidKmipValue($crate::kmip::kmip_types::ResultReason::InvalidField, ::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::KmipError::InvalidKmipValue($crate::kmip::kmip_types::ResultReason::InvalidField, $err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::KmipError::InvalidKmipValue($crate::kmip::kmip_types::ResultReason::InvalidField, ::core::format_args!($fmt, $($arg)*).to_string())
    };
}

/// Return early with an error if a condition is not satisfied.
#[macro_export]
macro_rules! kmip_bail {
    ($msg:literal) => {
        return ::core::result::Result::Err($crate::kmip_error!($msg))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::kmip_error!($fmt, $($arg)*))
    };
}
