//! The registry of plugins which convert custom properties and data store
//! configurations.
//!
//! Plugins are looked up by name: a custom property by the key it is stored
//! under, a data store by its backend name. The registry knows nothing of
//! document shapes; that is left to the plugins.
//!
//! Registration happens during setup. Once an [Extensions] is handed to a
//! [MetadataParser] it can no longer be modified, so a parser may be shared
//! freely between threads.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use metadata_model::{DataStore, PropertyValue};

use crate::datastore::EmptyDataStoreParser;
use crate::document::DocumentAdapter;
use crate::error::{Error, ExtensionKind};
use crate::parser::MetadataParser;
use crate::Result;

/// Converts one named custom property between its document subtree and its value.
pub trait PropertyParser<A: DocumentAdapter>: Send + Sync {
    /// Parses the property stored under `name`, whose subtree is `node`.
    fn parse(
        &self,
        name: &str,
        parser: &MetadataParser<A>,
        node: &A::Node,
    ) -> Result<Arc<dyn PropertyValue>>;

    /// Writes `value` as a child of `parent`.
    ///
    /// This must be the exact inverse of [PropertyParser::parse] for any value
    /// which `parse` can produce.
    fn convert(
        &self,
        parser: &MetadataParser<A>,
        parent: &mut A::Node,
        value: &dyn PropertyValue,
    ) -> Result<()>;
}

/// Converts the data store configuration of one backend.
pub trait DataStoreParser<A: DocumentAdapter>: Send + Sync {
    /// Parses the data store node of an entity whose backend is `backend`.
    fn parse(
        &self,
        backend: &str,
        parser: &MetadataParser<A>,
        node: &A::Node,
    ) -> Result<Arc<dyn DataStore>>;

    /// Writes the backend-specific contents of `data_store` into its data store node.
    fn convert(
        &self,
        parser: &MetadataParser<A>,
        node: &mut A::Node,
        data_store: &dyn DataStore,
    ) -> Result<()>;
}

pub struct Extensions<A: DocumentAdapter> {
    property_parsers: HashMap<String, Arc<dyn PropertyParser<A>>>,
    data_store_parsers: HashMap<String, Arc<dyn DataStoreParser<A>>>,
}

impl<A: DocumentAdapter> Extensions<A> {
    pub fn new() -> Self {
        Extensions {
            property_parsers: HashMap::new(),
            data_store_parsers: HashMap::new(),
        }
    }

    /// Registers the parsers built into this crate.
    pub fn add_default_extensions(&mut self) {
        self.register_data_store_parser(
            EmptyDataStoreParser::BACKEND,
            EmptyDataStoreParser,
        );
    }

    /// Registers `parser` for the custom property `name`,
    /// replacing any parser previously registered for it.
    pub fn register_property_parser<S, P>(&mut self, name: S, parser: P)
    where
        S: Into<String>,
        P: PropertyParser<A> + 'static,
    {
        let name = name.into();
        if self
            .property_parsers
            .insert(name.clone(), Arc::new(parser))
            .is_some()
        {
            tracing::debug!("Replaced property parser '{}'", name);
        } else {
            tracing::debug!("Registered property parser '{}'", name);
        }
    }

    /// Registers `parser` for the data store backend `backend`,
    /// replacing any parser previously registered for it.
    pub fn register_data_store_parser<S, P>(&mut self, backend: S, parser: P)
    where
        S: Into<String>,
        P: DataStoreParser<A> + 'static,
    {
        let backend = backend.into();
        if self
            .data_store_parsers
            .insert(backend.clone(), Arc::new(parser))
            .is_some()
        {
            tracing::debug!("Replaced data store parser '{}'", backend);
        } else {
            tracing::debug!("Registered data store parser '{}'", backend);
        }
    }

    pub fn property_parser(&self, name: &str) -> Result<&dyn PropertyParser<A>> {
        self.property_parsers
            .get(name)
            .map(|p| p.as_ref())
            .ok_or_else(|| Error::UnknownExtension {
                kind: ExtensionKind::Property,
                name: name.to_owned(),
            })
    }

    pub fn data_store_parser(
        &self,
        backend: &str,
    ) -> Result<&dyn DataStoreParser<A>> {
        self.data_store_parsers
            .get(backend)
            .map(|p| p.as_ref())
            .ok_or_else(|| Error::UnknownExtension {
                kind: ExtensionKind::DataStore,
                name: backend.to_owned(),
            })
    }

    pub fn has_property_parser(&self, name: &str) -> bool {
        self.property_parsers.contains_key(name)
    }

    pub fn has_data_store_parser(&self, backend: &str) -> bool {
        self.data_store_parsers.contains_key(backend)
    }
}

impl<A: DocumentAdapter> Default for Extensions<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: DocumentAdapter> Debug for Extensions<A> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let mut properties = self.property_parsers.keys().collect::<Vec<_>>();
        properties.sort();
        let mut data_stores =
            self.data_store_parsers.keys().collect::<Vec<_>>();
        data_stores.sort();

        f.debug_struct("Extensions")
            .field("property_parsers", &properties)
            .field("data_store_parsers", &data_stores)
            .finish()
    }
}
