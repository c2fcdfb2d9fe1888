//! The protocol object model: KMIP managed objects as the wire model nests
//! them (Key Block, Key Value, Key Material).

pub mod kmip_data_structures;
pub mod kmip_objects;
pub mod kmip_types;
