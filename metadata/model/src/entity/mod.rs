#[cfg(any(test, feature = "proptest-strategies"))]
pub mod strategy;

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::datastore::DataStore;
use crate::enums::Enums;
use crate::property::Properties;

/// Lifecycle status of a published metadata version.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MetadataStatus {
    #[default]
    Active,
    Deprecated,
    Disabled,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StatusError {
    #[error("Invalid metadata status: '{0}'")]
    InvalidStatus(String),
}

impl MetadataStatus {
    pub fn iter() -> impl Iterator<Item = MetadataStatus> {
        [Self::Active, Self::Deprecated, Self::Disabled].into_iter()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deprecated => "deprecated",
            Self::Disabled => "disabled",
        }
    }
}

impl Display for MetadataStatus {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetadataStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "deprecated" => Ok(Self::Deprecated),
            "disabled" => Ok(Self::Disabled),
            _ => Err(StatusError::InvalidStatus(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Version {
    pub value: String,
    /// Earlier versions which this version is compatible with.
    pub extends_versions: Vec<String>,
    pub changelog: Option<String>,
}

impl Version {
    pub fn new<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Version {
            value: value.into(),
            extends_versions: vec![],
            changelog: None,
        }
    }
}

/// Version-independent information about an entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityInfo {
    pub name: String,
    pub default_version: Option<String>,
    pub enums: Enums,
    pub data_store: Option<Arc<dyn DataStore>>,
    pub properties: Properties,
}

impl EntityInfo {
    pub fn new<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        EntityInfo {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A single published version of an entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntitySchema {
    pub name: String,
    pub version: Version,
    pub status: MetadataStatus,
    pub properties: Properties,
}

impl EntitySchema {
    pub fn new<S>(name: S, version: Version) -> Self
    where
        S: Into<String>,
    {
        EntitySchema {
            name: name.into(),
            version,
            status: MetadataStatus::default(),
            properties: Properties::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityMetadata {
    pub entity_info: EntityInfo,
    pub schema: EntitySchema,
}

impl EntityMetadata {
    pub fn new(entity_info: EntityInfo, schema: EntitySchema) -> Self {
        EntityMetadata {
            entity_info,
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.entity_info.name
    }
}
