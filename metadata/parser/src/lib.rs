//! Converts metadata to and from tree-structured documents.
//!
//! [MetadataParser] walks an [EntityMetadata](metadata_model::EntityMetadata)
//! and writes it through a [DocumentAdapter], or reads one back. The
//! document representation is chosen by the adapter; [JsonAdapter] is
//! provided here and other crates provide others.
//!
//! Custom properties and data store configurations are not interpreted
//! here. They are handed to plugins registered by name in [Extensions]
//! before the parser is created.
//!
//! ```
//! use metadata_model::{Enum, EnumValue, Enums};
//! use metadata_parser::{Extensions, JsonAdapter, MetadataParser};
//!
//! let mut extensions = Extensions::new();
//! extensions.add_default_extensions();
//! let parser = MetadataParser::new(extensions, JsonAdapter);
//!
//! let enums = std::iter::once(
//!     Enum::with_values("color", vec![EnumValue::new("red")]).unwrap(),
//! )
//! .collect::<Enums>();
//!
//! let mut node = parser.new_node();
//! parser.convert_enums(&mut node, &enums);
//! assert_eq!(enums, parser.parse_enums(&node).unwrap());
//! ```

pub mod datastore;
pub mod document;
pub mod enums;
pub mod error;
pub mod extensions;
pub mod json;
pub mod parser;

pub use document::{DocumentAdapter, Element};
pub use error::{Error, ExtensionKind};
pub use extensions::{DataStoreParser, Extensions, PropertyParser};
pub use json::JsonAdapter;
pub use parser::MetadataParser;

pub type Result<T> = std::result::Result<T, error::Error>;
