use serde_json::{Map, Value};

use crate::document::{DocumentAdapter, Element};
use crate::error::{Error, Shape};
use crate::Result;

/// Adapts JSON objects as document nodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonAdapter;

impl JsonAdapter {
    fn element_to_value(element: Element<Map<String, Value>>) -> Value {
        match element {
            Element::String(s) => Value::String(s),
            Element::Node(n) => Value::Object(n),
        }
    }
}

impl DocumentAdapter for JsonAdapter {
    type Node = Map<String, Value>;

    fn new_node(&self) -> Self::Node {
        Map::new()
    }

    fn put_string(&self, node: &mut Self::Node, key: &str, value: &str) {
        node.insert(key.to_owned(), Value::String(value.to_owned()));
    }

    fn put_object(&self, node: &mut Self::Node, key: &str, child: Self::Node) {
        node.insert(key.to_owned(), Value::Object(child));
    }

    fn put_list(
        &self,
        node: &mut Self::Node,
        key: &str,
        elements: Vec<Element<Self::Node>>,
    ) {
        let elements = elements
            .into_iter()
            .map(Self::element_to_value)
            .collect::<Vec<Value>>();
        node.insert(key.to_owned(), Value::Array(elements));
    }

    fn get_string(&self, node: &Self::Node, key: &str) -> Result<Option<String>> {
        match node.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(Error::wrong_shape(key, Shape::String)),
        }
    }

    fn get_object<'a>(
        &self,
        node: &'a Self::Node,
        key: &str,
    ) -> Result<Option<&'a Self::Node>> {
        match node.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(n)) => Ok(Some(n)),
            Some(_) => Err(Error::wrong_shape(key, Shape::Node)),
        }
    }

    fn get_list<'a>(
        &self,
        node: &'a Self::Node,
        key: &str,
    ) -> Result<Option<Vec<Element<&'a Self::Node>>>> {
        let elements = match node.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Array(elements)) => elements,
            Some(_) => return Err(Error::wrong_shape(key, Shape::List)),
        };
        elements
            .iter()
            .map(|e| match e {
                Value::String(s) => Ok(Element::String(s.clone())),
                Value::Object(n) => Ok(Element::Node(n)),
                _ => Err(Error::invalid_value(key, e.to_string())),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    fn keys(&self, node: &Self::Node) -> Vec<String> {
        node.keys().cloned().collect()
    }
}
