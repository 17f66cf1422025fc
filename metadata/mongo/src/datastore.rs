use std::any::Any;
use std::sync::Arc;

use anyhow::anyhow;
use bson::Document;
use metadata_model::DataStore;
use metadata_parser::{DataStoreParser, Error, MetadataParser, Result};

use crate::adapter::BsonAdapter;

pub const DATABASE: &str = "database";
pub const DATASOURCE: &str = "datasource";
pub const COLLECTION: &str = "collection";

/// Location of an entity's documents in MongoDB.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MongoDataStore {
    pub database_name: Option<String>,
    /// Name of the configured connection to use.
    pub datasource_name: Option<String>,
    pub collection_name: String,
}

impl MongoDataStore {
    pub fn new<S>(collection_name: S) -> Self
    where
        S: Into<String>,
    {
        MongoDataStore {
            collection_name: collection_name.into(),
            ..Default::default()
        }
    }
}

impl DataStore for MongoDataStore {
    fn backend(&self) -> &str {
        MongoDataStoreParser::BACKEND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DataStore) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MongoDataStoreParser;

impl MongoDataStoreParser {
    pub const BACKEND: &'static str = "mongo";

    fn validate_collection_name(name: &str) -> Result<()> {
        if name.is_empty() || name.contains('$') || name.contains('\0') {
            return Err(Error::Extension {
                name: Self::BACKEND.to_owned(),
                source: anyhow!("Invalid collection name: '{}'", name),
            });
        }
        Ok(())
    }
}

impl DataStoreParser<BsonAdapter> for MongoDataStoreParser {
    fn parse(
        &self,
        _backend: &str,
        parser: &MetadataParser<BsonAdapter>,
        node: &Document,
    ) -> Result<Arc<dyn DataStore>> {
        let collection_name = parser.get_required_string(node, COLLECTION)?;
        Self::validate_collection_name(&collection_name)?;

        Ok(Arc::new(MongoDataStore {
            database_name: parser.get_string(node, DATABASE)?,
            datasource_name: parser.get_string(node, DATASOURCE)?,
            collection_name,
        }))
    }

    fn convert(
        &self,
        parser: &MetadataParser<BsonAdapter>,
        node: &mut Document,
        data_store: &dyn DataStore,
    ) -> Result<()> {
        let Some(mongo) = data_store.downcast_ref::<MongoDataStore>() else {
            return Err(Error::unexpected_value_type::<MongoDataStore>(
                Self::BACKEND,
            ));
        };
        Self::validate_collection_name(&mongo.collection_name)?;

        if let Some(database_name) = mongo.database_name.as_ref() {
            parser.put_string(node, DATABASE, database_name);
        }
        if let Some(datasource_name) = mongo.datasource_name.as_ref() {
            parser.put_string(node, DATASOURCE, datasource_name);
        }
        parser.put_string(node, COLLECTION, &mongo.collection_name);
        tracing::trace!(
            "Converted mongo data store for collection '{}'",
            mongo.collection_name
        );
        Ok(())
    }
}
