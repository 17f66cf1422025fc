//! Provides the in-memory metadata object model.
//!
//! The structures defined in this crate describe an entity: its
//! identifying information, the enumerations its fields may draw from,
//! the data store it lives in, and the schema version it is published
//! under. They expose their contents as plain fields where no invariant
//! needs protecting.
//!
//! Two parts of the model are deliberately opaque. Custom properties
//! ([PropertyValue]) and data store configurations ([DataStore]) are
//! owned by plugins which know how to read and write them; this crate
//! only stores and compares them.
//!
//! ## Features
//!
//! * `proptest-strategies`: Provides `proptest::arbitrary::Arbitrary` implementations for
//!   the enumeration and version structures defined in this crate for use with
//!   [property-based testing](https://proptest-rs.github.io/proptest/intro.html).
//! * `serde`: Provides `serde::Deserialize` and `serde::Serialize` implemenations for
//!   the enumeration and version structures defined in this crate.

pub mod datastore;
pub mod entity;
pub mod enums;
pub mod property;

pub use datastore::DataStore;
pub use entity::{
    EntityInfo, EntityMetadata, EntitySchema, MetadataStatus, Version,
};
pub use enums::{Enum, EnumError, EnumValue, Enums};
pub use property::{Properties, PropertyValue};
