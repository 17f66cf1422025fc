use std::any::Any;
use std::sync::Arc;

use metadata_model::DataStore;

use crate::document::DocumentAdapter;
use crate::error::Error;
use crate::extensions::DataStoreParser;
use crate::parser::MetadataParser;
use crate::Result;

/// A data store with no configuration beyond its backend name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmptyDataStore {
    backend: String,
}

impl EmptyDataStore {
    pub fn new<S>(backend: S) -> Self
    where
        S: Into<String>,
    {
        EmptyDataStore {
            backend: backend.into(),
        }
    }
}

impl DataStore for EmptyDataStore {
    fn backend(&self) -> &str {
        &self.backend
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DataStore) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }
}

/// Parses an [EmptyDataStore] for whichever backend it is registered under.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyDataStoreParser;

impl EmptyDataStoreParser {
    pub const BACKEND: &'static str = "empty";
}

impl<A: DocumentAdapter> DataStoreParser<A> for EmptyDataStoreParser {
    fn parse(
        &self,
        backend: &str,
        _parser: &MetadataParser<A>,
        _node: &A::Node,
    ) -> Result<Arc<dyn DataStore>> {
        Ok(Arc::new(EmptyDataStore::new(backend)))
    }

    fn convert(
        &self,
        _parser: &MetadataParser<A>,
        _node: &mut A::Node,
        data_store: &dyn DataStore,
    ) -> Result<()> {
        if data_store.downcast_ref::<EmptyDataStore>().is_none() {
            return Err(Error::unexpected_value_type::<EmptyDataStore>(
                data_store.backend(),
            ));
        }
        Ok(())
    }
}
