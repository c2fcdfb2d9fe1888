//! Conversion of managed objects between the simplified and the KMIP object models.
//!
//! Both directions are `TryFrom` implementations between [`simplified::Object`]
//! and [`kmip::Object`]; [`ManagedObjectConverter`] picks the direction from
//! the model the object belongs to.

use std::fmt::{self, Display};

use tracing::debug;

use crate::{error::result::KmipResult, kmip::kmip_objects as kmip, simplified};

mod key_wrapping;
mod to_kmip;
mod to_simplified;

pub use key_wrapping::{
    build_cryptographic_parameters, build_key_wrapping_data, build_kmip_cryptographic_parameters,
    build_kmip_key_wrapping_data,
};

/// A managed object from either object model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagedObject {
    Simplified(simplified::Object),
    Kmip(kmip::Object),
}

impl From<simplified::Object> for ManagedObject {
    fn from(object: simplified::Object) -> Self {
        Self::Simplified(object)
    }
}

impl From<kmip::Object> for ManagedObject {
    fn from(object: kmip::Object) -> Self {
        Self::Kmip(object)
    }
}

impl Display for ManagedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simplified(object) => write!(f, "simplified {object}"),
            Self::Kmip(object) => write!(f, "KMIP {object}"),
        }
    }
}

/// Converts a managed object to the other object model.
///
/// The converter holds no state: a single instance may be shared freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManagedObjectConverter;

impl ManagedObjectConverter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Convert a simplified object to a KMIP object, or a KMIP object to a
    /// simplified object.
    ///
    /// Either the whole object converts or an error is returned.
    pub fn convert(&self, object: ManagedObject) -> KmipResult<ManagedObject> {
        match object {
            ManagedObject::Simplified(object) => {
                let converted = kmip::Object::try_from(object)?;
                debug!("converted to KMIP {}", converted.object_type());
                Ok(ManagedObject::Kmip(converted))
            }
            ManagedObject::Kmip(object) => {
                let converted = simplified::Object::try_from(object)?;
                debug!("converted to simplified {}", converted.object_type());
                Ok(ManagedObject::Simplified(converted))
            }
        }
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests;
