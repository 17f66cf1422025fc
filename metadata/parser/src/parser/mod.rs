
use std::sync::Arc;

use metadata_model::{
    DataStore, EntityInfo, EntityMetadata, EntitySchema, MetadataStatus,
    Properties, PropertyValue, Version,
};

use crate::document::{DocumentAdapter, Element};
use crate::enums::ENUMS;
use crate::error::{Error, Shape};
use crate::extensions::Extensions;
use crate::Result;

pub const ENTITY_INFO: &str = "entityInfo";
pub const SCHEMA: &str = "schema";
pub const NAME: &str = "name";
pub const DEFAULT_VERSION: &str = "defaultVersion";
pub const DATASTORE: &str = "datastore";
pub const BACKEND: &str = "backend";
pub const VERSION: &str = "version";
pub const VALUE: &str = "value";
pub const EXTENDS_VERSIONS: &str = "extendsVersions";
pub const CHANGELOG: &str = "changelog";
pub const STATUS: &str = "status";

const ENTITY_INFO_KEYS: [&str; 4] = [NAME, DEFAULT_VERSION, ENUMS, DATASTORE];
const SCHEMA_KEYS: [&str; 3] = [NAME, VERSION, STATUS];

/// Converts between [EntityMetadata] and documents of the adapter `A`.
///
/// Constructs which the metadata model does not interpret, custom properties
/// and data store configurations, are dispatched by name to the plugins
/// registered in the [Extensions] this parser was built with.
/// The registry cannot be modified afterwards.
#[derive(Debug)]
pub struct MetadataParser<A: DocumentAdapter> {
    extensions: Extensions<A>,
    adapter: A,
}

impl<A: DocumentAdapter> MetadataParser<A> {
    pub fn new(extensions: Extensions<A>, adapter: A) -> Self {
        tracing::debug!("Creating metadata parser with {:?}", extensions);
        MetadataParser {
            extensions,
            adapter,
        }
    }

    pub fn extensions(&self) -> &Extensions<A> {
        &self.extensions
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn new_node(&self) -> A::Node {
        self.adapter.new_node()
    }

    pub fn put_string(&self, node: &mut A::Node, key: &str, value: &str) {
        self.adapter.put_string(node, key, value)
    }

    pub fn put_object(&self, node: &mut A::Node, key: &str, child: A::Node) {
        self.adapter.put_object(node, key, child)
    }

    pub fn put_list(
        &self,
        node: &mut A::Node,
        key: &str,
        elements: Vec<Element<A::Node>>,
    ) {
        self.adapter.put_list(node, key, elements)
    }

    pub fn put_string_list<I, S>(&self, node: &mut A::Node, key: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let elements = values
            .into_iter()
            .map(|s| Element::String(s.into()))
            .collect::<Vec<_>>();
        self.adapter.put_list(node, key, elements)
    }

    pub fn get_string(&self, node: &A::Node, key: &str) -> Result<Option<String>> {
        self.adapter.get_string(node, key)
    }

    pub fn get_required_string(&self, node: &A::Node, key: &str) -> Result<String> {
        self.adapter
            .get_string(node, key)?
            .ok_or_else(|| Error::missing_key(key))
    }

    pub fn get_object<'a>(
        &self,
        node: &'a A::Node,
        key: &str,
    ) -> Result<Option<&'a A::Node>> {
        self.adapter.get_object(node, key)
    }

    pub fn get_required_object<'a>(
        &self,
        node: &'a A::Node,
        key: &str,
    ) -> Result<&'a A::Node> {
        self.adapter
            .get_object(node, key)?
            .ok_or_else(|| Error::missing_key(key))
    }

    pub fn get_list<'a>(
        &self,
        node: &'a A::Node,
        key: &str,
    ) -> Result<Option<Vec<Element<&'a A::Node>>>> {
        self.adapter.get_list(node, key)
    }

    /// Reads a list whose elements must all be strings.
    pub fn get_string_list(
        &self,
        node: &A::Node,
        key: &str,
    ) -> Result<Option<Vec<String>>> {
        let Some(elements) = self.adapter.get_list(node, key)? else {
            return Ok(None);
        };
        elements
            .into_iter()
            .map(|element| match element {
                Element::String(s) => Ok(s),
                Element::Node(_) => Err(Error::wrong_shape(key, Shape::String)),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    pub fn keys(&self, node: &A::Node) -> Vec<String> {
        self.adapter.keys(node)
    }

    pub fn parse_entity_metadata(&self, node: &A::Node) -> Result<EntityMetadata> {
        let entity_info =
            self.parse_entity_info(self.get_required_object(node, ENTITY_INFO)?)?;
        let schema =
            self.parse_entity_schema(self.get_required_object(node, SCHEMA)?)?;
        Ok(EntityMetadata {
            entity_info,
            schema,
        })
    }

    pub fn parse_entity_info(&self, node: &A::Node) -> Result<EntityInfo> {
        let name = self.get_required_string(node, NAME)?;
        tracing::debug!("Parsing entity info '{}'", name);

        let default_version = self.get_string(node, DEFAULT_VERSION)?;
        let enums = self.parse_enums(node)?;
        let data_store = match self.get_object(node, DATASTORE)? {
            Some(ds) => Some(self.parse_data_store(ds)?),
            None => None,
        };
        let properties = self.parse_properties(node, &ENTITY_INFO_KEYS)?;

        Ok(EntityInfo {
            name,
            default_version,
            enums,
            data_store,
            properties,
        })
    }

    pub fn parse_entity_schema(&self, node: &A::Node) -> Result<EntitySchema> {
        let name = self.get_required_string(node, NAME)?;
        tracing::debug!("Parsing schema '{}'", name);

        let version = self.parse_version(self.get_required_object(node, VERSION)?)?;
        let status = self.parse_status(self.get_required_object(node, STATUS)?)?;
        let properties = self.parse_properties(node, &SCHEMA_KEYS)?;

        Ok(EntitySchema {
            name,
            version,
            status,
            properties,
        })
    }

    pub fn parse_version(&self, node: &A::Node) -> Result<Version> {
        Ok(Version {
            value: self.get_required_string(node, VALUE)?,
            extends_versions: self
                .get_string_list(node, EXTENDS_VERSIONS)?
                .unwrap_or_default(),
            changelog: self.get_string(node, CHANGELOG)?,
        })
    }

    pub fn parse_status(&self, node: &A::Node) -> Result<MetadataStatus> {
        let value = self.get_required_string(node, VALUE)?;
        value
            .parse::<MetadataStatus>()
            .map_err(|_| Error::invalid_value(STATUS, value))
    }

    /// Parses the contents of a `datastore` node using the parser
    /// registered for its backend.
    pub fn parse_data_store(&self, node: &A::Node) -> Result<Arc<dyn DataStore>> {
        let backend = self.get_required_string(node, BACKEND)?;
        let parser = self.extensions.data_store_parser(&backend)?;
        tracing::trace!("Parsing data store with backend '{}'", backend);
        parser.parse(&backend, self, node)
    }

    /// Parses the custom property `name` whose subtree is `node`.
    pub fn parse_property(
        &self,
        name: &str,
        node: &A::Node,
    ) -> Result<Arc<dyn PropertyValue>> {
        let parser = self.extensions.property_parser(name)?;
        tracing::trace!("Parsing property '{}'", name);
        parser.parse(name, self, node)
    }

    /// Parses every key of `node` which is not one of `reserved` as a custom property.
    pub fn parse_properties(
        &self,
        node: &A::Node,
        reserved: &[&str],
    ) -> Result<Properties> {
        let mut properties = Properties::new();
        for key in self.keys(node) {
            if reserved.contains(&key.as_str()) {
                continue;
            }
            let Some(child) = self.get_object(node, &key)? else {
                // explicit null
                continue;
            };
            let value = self.parse_property(&key, child)?;
            properties.insert(key, value);
        }
        Ok(properties)
    }

    pub fn convert(&self, metadata: &EntityMetadata) -> Result<A::Node> {
        let mut node = self.new_node();
        let entity_info = self.convert_entity_info(&metadata.entity_info)?;
        self.put_object(&mut node, ENTITY_INFO, entity_info);
        let schema = self.convert_entity_schema(&metadata.schema)?;
        self.put_object(&mut node, SCHEMA, schema);
        Ok(node)
    }

    pub fn convert_entity_info(&self, info: &EntityInfo) -> Result<A::Node> {
        tracing::debug!("Converting entity info '{}'", info.name);

        let mut node = self.new_node();
        self.put_string(&mut node, NAME, &info.name);
        if let Some(default_version) = info.default_version.as_ref() {
            self.put_string(&mut node, DEFAULT_VERSION, default_version);
        }
        if !info.enums.is_empty() {
            self.convert_enums(&mut node, &info.enums);
        }
        if let Some(data_store) = info.data_store.as_ref() {
            self.convert_data_store(&mut node, data_store.as_ref())?;
        }
        self.convert_properties(&mut node, &info.properties)?;
        Ok(node)
    }

    pub fn convert_entity_schema(&self, schema: &EntitySchema) -> Result<A::Node> {
        tracing::debug!("Converting schema '{}'", schema.name);

        let mut node = self.new_node();
        self.put_string(&mut node, NAME, &schema.name);
        let version = self.convert_version(&schema.version);
        self.put_object(&mut node, VERSION, version);

        let mut status = self.new_node();
        self.put_string(&mut status, VALUE, schema.status.as_str());
        self.put_object(&mut node, STATUS, status);

        self.convert_properties(&mut node, &schema.properties)?;
        Ok(node)
    }

    pub fn convert_version(&self, version: &Version) -> A::Node {
        let mut node = self.new_node();
        self.put_string(&mut node, VALUE, &version.value);
        if !version.extends_versions.is_empty() {
            self.put_string_list(
                &mut node,
                EXTENDS_VERSIONS,
                version.extends_versions.iter().map(String::as_str),
            );
        }
        if let Some(changelog) = version.changelog.as_ref() {
            self.put_string(&mut node, CHANGELOG, changelog);
        }
        node
    }

    /// Writes `data_store` as the `datastore` node of `parent`.
    pub fn convert_data_store(
        &self,
        parent: &mut A::Node,
        data_store: &dyn DataStore,
    ) -> Result<()> {
        let backend = data_store.backend();
        let parser = self.extensions.data_store_parser(backend)?;
        tracing::trace!("Converting data store with backend '{}'", backend);

        let mut node = self.new_node();
        self.put_string(&mut node, BACKEND, backend);
        parser.convert(self, &mut node, data_store)?;
        self.put_object(parent, DATASTORE, node);
        Ok(())
    }

    pub fn convert_property(
        &self,
        parent: &mut A::Node,
        name: &str,
        value: &dyn PropertyValue,
    ) -> Result<()> {
        let parser = self.extensions.property_parser(name)?;
        tracing::trace!("Converting property '{}'", name);
        parser.convert(self, parent, value)
    }

    pub fn convert_properties(
        &self,
        parent: &mut A::Node,
        properties: &Properties,
    ) -> Result<()> {
        for (name, value) in properties.iter() {
            self.convert_property(parent, name, value.as_ref())?;
        }
        Ok(())
    }
}
