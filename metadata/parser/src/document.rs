//! The capability surface over generic tree documents.
//!
//! A [DocumentAdapter] knows how to create nodes of some document
//! representation and how to read and write keyed strings, nodes and
//! lists within them. Everything else in this crate is written against
//! this trait, so the same conversion logic targets any document format
//! with an adapter.

use std::fmt::Debug;

use crate::Result;

/// An element of a document list.
#[derive(Clone, Debug, PartialEq)]
pub enum Element<N> {
    String(String),
    Node(N),
}

impl<N> Element<N> {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_ref()),
            Self::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&N> {
        match self {
            Self::String(_) => None,
            Self::Node(n) => Some(n),
        }
    }
}

impl<N> From<String> for Element<N> {
    fn from(value: String) -> Self {
        Element::String(value)
    }
}

impl<N> From<&str> for Element<N> {
    fn from(value: &str) -> Self {
        Element::String(value.to_owned())
    }
}

/// Reads and writes keyed values of a mutable tree node.
///
/// Getters treat an absent key and a key holding an explicit null alike,
/// returning `Ok(None)`. A key holding a value of another shape than the
/// one requested is a malformed document.
pub trait DocumentAdapter {
    type Node: Clone + Debug;

    /// Allocates an empty, detached node.
    fn new_node(&self) -> Self::Node;

    fn put_string(&self, node: &mut Self::Node, key: &str, value: &str);

    fn put_object(&self, node: &mut Self::Node, key: &str, child: Self::Node);

    fn put_list(
        &self,
        node: &mut Self::Node,
        key: &str,
        elements: Vec<Element<Self::Node>>,
    );

    fn get_string(&self, node: &Self::Node, key: &str) -> Result<Option<String>>;

    fn get_object<'a>(
        &self,
        node: &'a Self::Node,
        key: &str,
    ) -> Result<Option<&'a Self::Node>>;

    fn get_list<'a>(
        &self,
        node: &'a Self::Node,
        key: &str,
    ) -> Result<Option<Vec<Element<&'a Self::Node>>>>;

    /// Returns the keys of `node`, in the order the document keeps them.
    fn keys(&self, node: &Self::Node) -> Vec<String>;
}
