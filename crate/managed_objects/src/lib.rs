#![allow(clippy::upper_case_acronyms)]

pub use converter::{ManagedObject, ManagedObjectConverter};
pub use error::{
    result::{KmipResult, KmipResultHelper},
    KmipError,
};

pub mod converter;
mod error;
pub mod kmip;
pub mod simplified;
