//! MongoDB support for metadata conversion: BSON documents as the
//! document representation, and the `mongo` data store backend.

pub mod adapter;
pub mod datastore;

pub use adapter::BsonAdapter;
pub use datastore::{MongoDataStore, MongoDataStoreParser};

use metadata_parser::{Extensions, MetadataParser};

/// Registers the parsers of this crate.
pub fn add_mongo_extensions(extensions: &mut Extensions<BsonAdapter>) {
    extensions.register_data_store_parser(
        MongoDataStoreParser::BACKEND,
        MongoDataStoreParser,
    );
}

/// Returns a parser of BSON documents with the default and mongo extensions.
pub fn bson_parser() -> MetadataParser<BsonAdapter> {
    let mut extensions = Extensions::new();
    extensions.add_default_extensions();
    add_mongo_extensions(&mut extensions);
    MetadataParser::new(extensions, BsonAdapter)
}
