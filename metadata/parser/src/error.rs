use std::fmt::{Display, Formatter, Result as FmtResult};

use metadata_model::EnumError;
use thiserror::Error;

/// The kind of plugin looked up in the extension registry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExtensionKind {
    Property,
    DataStore,
}

impl Display for ExtensionKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Property => write!(f, "property"),
            Self::DataStore => write!(f, "data store"),
        }
    }
}

/// The shape a document value was required to have.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shape {
    String,
    Node,
    List,
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::String => write!(f, "string"),
            Self::Node => write!(f, "node"),
            Self::List => write!(f, "list"),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MalformedDocumentError {
    #[error("Required key '{0}' is missing")]
    MissingKey(String),
    #[error("Key '{key}' is not a {expected}")]
    WrongShape { key: String, expected: Shape },
    #[error("Key '{key}' has invalid value '{value}'")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed document: {0}")]
    MalformedDocument(#[from] MalformedDocumentError),
    #[error("No {kind} parser is registered for '{name}'")]
    UnknownExtension { kind: ExtensionKind, name: String },
    #[error(transparent)]
    DuplicateEnumValue(#[from] EnumError),
    #[error("Extension '{name}' was given a value which is not a {expected}")]
    UnexpectedValueType {
        name: String,
        expected: &'static str,
    },
    #[error("Extension '{name}' error: {source}")]
    Extension {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    pub fn missing_key<K: Into<String>>(key: K) -> Self {
        MalformedDocumentError::MissingKey(key.into()).into()
    }

    pub fn wrong_shape<K: Into<String>>(key: K, expected: Shape) -> Self {
        MalformedDocumentError::WrongShape {
            key: key.into(),
            expected,
        }
        .into()
    }

    pub fn invalid_value<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        MalformedDocumentError::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
        .into()
    }

    pub fn unexpected_value_type<T>(name: &str) -> Self {
        Self::UnexpectedValueType {
            name: name.to_owned(),
            expected: std::any::type_name::<T>(),
        }
    }

    pub fn is_malformed_document(&self) -> bool {
        matches!(self, Self::MalformedDocument(_))
    }

    pub fn is_unknown_extension(&self) -> bool {
        matches!(self, Self::UnknownExtension { .. })
    }
}
