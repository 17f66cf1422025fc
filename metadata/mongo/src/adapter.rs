use bson::{Bson, Document};
use metadata_parser::error::{Error, Shape};
use metadata_parser::{DocumentAdapter, Element, Result};

/// Adapts BSON documents as document nodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct BsonAdapter;

impl BsonAdapter {
    fn element_to_bson(element: Element<Document>) -> Bson {
        match element {
            Element::String(s) => Bson::String(s),
            Element::Node(d) => Bson::Document(d),
        }
    }
}

impl DocumentAdapter for BsonAdapter {
    type Node = Document;

    fn new_node(&self) -> Self::Node {
        Document::new()
    }

    fn put_string(&self, node: &mut Self::Node, key: &str, value: &str) {
        node.insert(key, value);
    }

    fn put_object(&self, node: &mut Self::Node, key: &str, child: Self::Node) {
        node.insert(key, Bson::Document(child));
    }

    fn put_list(
        &self,
        node: &mut Self::Node,
        key: &str,
        elements: Vec<Element<Self::Node>>,
    ) {
        let elements = elements
            .into_iter()
            .map(Self::element_to_bson)
            .collect::<Vec<Bson>>();
        node.insert(key, Bson::Array(elements));
    }

    fn get_string(&self, node: &Self::Node, key: &str) -> Result<Option<String>> {
        match node.get(key) {
            None | Some(Bson::Null) => Ok(None),
            Some(Bson::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(Error::wrong_shape(key, Shape::String)),
        }
    }

    fn get_object<'a>(
        &self,
        node: &'a Self::Node,
        key: &str,
    ) -> Result<Option<&'a Self::Node>> {
        match node.get(key) {
            None | Some(Bson::Null) => Ok(None),
            Some(Bson::Document(d)) => Ok(Some(d)),
            Some(_) => Err(Error::wrong_shape(key, Shape::Node)),
        }
    }

    fn get_list<'a>(
        &self,
        node: &'a Self::Node,
        key: &str,
    ) -> Result<Option<Vec<Element<&'a Self::Node>>>> {
        let elements = match node.get(key) {
            None | Some(Bson::Null) => return Ok(None),
            Some(Bson::Array(elements)) => elements,
            Some(_) => return Err(Error::wrong_shape(key, Shape::List)),
        };
        elements
            .iter()
            .map(|e| match e {
                Bson::String(s) => Ok(Element::String(s.clone())),
                Bson::Document(d) => Ok(Element::Node(d)),
                _ => Err(Error::invalid_value(key, e.to_string())),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    fn keys(&self, node: &Self::Node) -> Vec<String> {
        node.keys().cloned().collect()
    }
}
