//! Conversion of enumerations.
//!
//! An enumeration is written in one of two shapes. If none of its values
//! carries a description, the labels are written as a plain list:
//!
//! ```text
//! { "name": "color", "values": ["blue", "red"] }
//! ```
//!
//! Otherwise the values are written under `annotatedValues`, where each
//! described value is a `{ "name", "description" }` node and each
//! undescribed value remains a bare label:
//!
//! ```text
//! { "name": "color", "annotatedValues": [{ "name": "blue", "description": "sky" }, "red"] }
//! ```
//!
//! Both shapes are accepted when parsing, including a node carrying both keys.

use metadata_model::{Enum, EnumValue, Enums};

use crate::document::{DocumentAdapter, Element};
use crate::error::Error;
use crate::parser::MetadataParser;
use crate::Result;

pub const ENUMS: &str = "enums";
pub const NAME: &str = "name";
pub const VALUES: &str = "values";
pub const ANNOTATED_VALUES: &str = "annotatedValues";
pub const DESCRIPTION: &str = "description";

/// The document shape chosen for the values of one enumeration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EnumEncoding {
    /// Every value is a bare label under `values`.
    Compact,
    /// Values are listed under `annotatedValues`.
    Annotated,
}

impl EnumEncoding {
    pub fn for_enum(e: &Enum) -> Self {
        if e.has_descriptions() {
            Self::Annotated
        } else {
            Self::Compact
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Compact => VALUES,
            Self::Annotated => ANNOTATED_VALUES,
        }
    }
}

impl<A: DocumentAdapter> MetadataParser<A> {
    /// Writes `enums` as the `enums` list of `node`.
    pub fn convert_enums(&self, node: &mut A::Node, enums: &Enums) {
        let elements = enums
            .iter()
            .map(|e| Element::Node(self.convert_enum(e)))
            .collect::<Vec<_>>();
        self.put_list(node, ENUMS, elements);
    }

    pub fn convert_enum(&self, e: &Enum) -> A::Node {
        let encoding = EnumEncoding::for_enum(e);
        tracing::trace!(
            "Converting enumeration '{}' as {:?}",
            e.name(),
            encoding
        );

        let mut node = self.new_node();
        self.put_string(&mut node, NAME, e.name());

        let values = e
            .values()
            .map(|value| self.convert_enum_value(encoding, value))
            .collect::<Vec<_>>();
        self.put_list(&mut node, encoding.key(), values);
        node
    }

    fn convert_enum_value(
        &self,
        encoding: EnumEncoding,
        value: &EnumValue,
    ) -> Element<A::Node> {
        match (encoding, value.description.as_ref()) {
            (EnumEncoding::Annotated, Some(description)) => {
                let mut node = self.new_node();
                self.put_string(&mut node, NAME, &value.name);
                self.put_string(&mut node, DESCRIPTION, description);
                Element::Node(node)
            }
            // undescribed values stay bare labels in either encoding
            _ => Element::String(value.name.clone()),
        }
    }

    /// Parses the `enums` list of `node`. An absent list is an empty set.
    pub fn parse_enums(&self, node: &A::Node) -> Result<Enums> {
        let Some(elements) = self.get_list(node, ENUMS)? else {
            return Ok(Enums::new());
        };

        let mut enums = Enums::new();
        for element in elements {
            let enum_node = match element {
                Element::Node(n) => n,
                Element::String(s) => {
                    return Err(Error::invalid_value(ENUMS, s))
                }
            };
            let e = self.parse_enum(enum_node)?;
            if enums.get(e.name()).is_some() {
                return Err(Error::invalid_value(ENUMS, e.name()));
            }
            enums.add_enum(e);
        }
        Ok(enums)
    }

    pub fn parse_enum(&self, node: &A::Node) -> Result<Enum> {
        let name = self.get_required_string(node, NAME)?;

        let mut e = Enum::new(name);
        for label in self.get_string_list(node, VALUES)?.unwrap_or_default() {
            e.insert(EnumValue::new(label))?;
        }

        let Some(elements) = self.get_list(node, ANNOTATED_VALUES)? else {
            return Ok(e);
        };
        let annotated = Enum::with_values(
            e.name(),
            elements
                .into_iter()
                .map(|element| self.parse_enum_value(element))
                .collect::<Result<Vec<_>>>()?,
        )?;

        if e.is_empty() {
            return Ok(annotated);
        }

        // a label listed under both keys takes its annotated form
        let merged = e
            .values()
            .filter(|v| annotated.value(&v.name).is_none())
            .chain(annotated.values())
            .cloned()
            .collect::<Vec<_>>();
        e.set_values(merged)?;
        Ok(e)
    }

    fn parse_enum_value(&self, element: Element<&A::Node>) -> Result<EnumValue> {
        match element {
            Element::String(label) => Ok(EnumValue::new(label)),
            Element::Node(node) => Ok(EnumValue {
                name: self.get_required_string(node, NAME)?,
                description: self.get_string(node, DESCRIPTION)?,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use metadata_model::enums::strategy::Parameters as EnumParameters;
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};

    use super::*;
    use crate::error::MalformedDocumentError;
    use crate::extensions::Extensions;
    use crate::json::JsonAdapter;

    fn parser() -> MetadataParser<JsonAdapter> {
        let mut extensions = Extensions::new();
        extensions.add_default_extensions();
        MetadataParser::new(extensions, JsonAdapter)
    }

    fn node(value: Value) -> Map<String, Value> {
        let Value::Object(map) = value else {
            unreachable!()
        };
        map
    }

    fn fake_enum(values: Vec<EnumValue>) -> Enum {
        Enum::with_values("FakeEnum", values).unwrap()
    }

    #[test]
    fn convert_without_descriptions() {
        let p = parser();
        let enums = std::iter::once(fake_enum(vec![
            EnumValue::new("FakeEnumValue1"),
            EnumValue::new("FakeEnumValue2"),
        ]))
        .collect::<Enums>();

        let mut target = p.new_node();
        p.convert_enums(&mut target, &enums);

        assert_eq!(
            Value::Object(target.clone()),
            json!({
                "enums": [{
                    "name": "FakeEnum",
                    "values": ["FakeEnumValue1", "FakeEnumValue2"]
                }]
            })
        );

        // labels are plain strings, never named nodes
        let text = Value::Object(target).to_string();
        assert!(text.contains("FakeEnumValue1"));
        assert!(!text.contains("\"name\":\"FakeEnumValue1\""));
        assert!(text.contains("FakeEnumValue2"));
        assert!(!text.contains("\"name\":\"FakeEnumValue2\""));
    }

    #[test]
    fn convert_with_descriptions() {
        let p = parser();
        let e = fake_enum(vec![
            EnumValue::with_description(
                "FakeEnumValue1",
                "this is a fake description of enum value 1",
            ),
            EnumValue::with_description(
                "FakeEnumValue2",
                "this is a fake description of enum value 2",
            ),
            EnumValue::new("FakeEnumWithoutDescription"),
        ]);

        let node = p.convert_enum(&e);
        assert_eq!(
            Value::Object(node.clone()),
            json!({
                "name": "FakeEnum",
                "annotatedValues": [
                    {
                        "name": "FakeEnumValue1",
                        "description": "this is a fake description of enum value 1"
                    },
                    {
                        "name": "FakeEnumValue2",
                        "description": "this is a fake description of enum value 2"
                    },
                    "FakeEnumWithoutDescription"
                ]
            })
        );

        let text = Value::Object(node.clone()).to_string();
        assert!(!text.contains("\"name\":\"FakeEnumWithoutDescription\""));

        assert_eq!(e, p.parse_enum(&node).unwrap());
    }

    #[test]
    fn parse_values() {
        let p = parser();
        let e = p
            .parse_enum(&node(json!({
                "name": "FakeEnum",
                "values": ["FakeEnumValue1", "FakeEnumValue2"]
            })))
            .unwrap();

        assert_eq!("FakeEnum", e.name());
        assert_eq!(2, e.len());
        assert_eq!(
            Some(&EnumValue::new("FakeEnumValue1")),
            e.value("FakeEnumValue1")
        );
        assert_eq!(
            Some(&EnumValue::new("FakeEnumValue2")),
            e.value("FakeEnumValue2")
        );
    }

    #[test]
    fn parse_annotated_values() {
        let p = parser();
        let e = p
            .parse_enum(&node(json!({
                "name": "FakeEnum",
                "annotatedValues": [
                    {"name": "FakeEnumValue1", "description": "desc1"},
                    {"name": "FakeEnumValue2", "description": "desc2"}
                ]
            })))
            .unwrap();

        assert_eq!(
            fake_enum(vec![
                EnumValue::with_description("FakeEnumValue1", "desc1"),
                EnumValue::with_description("FakeEnumValue2", "desc2"),
            ]),
            e
        );
    }

    #[test]
    fn parse_annotated_mixed_elements() {
        let p = parser();
        let e = p
            .parse_enum(&node(json!({
                "name": "FakeEnum",
                "annotatedValues": [
                    {"name": "described", "description": ""},
                    {"name": "node_without_description"},
                    "bare"
                ]
            })))
            .unwrap();

        assert_eq!(
            fake_enum(vec![
                EnumValue::with_description("described", ""),
                EnumValue::new("node_without_description"),
                EnumValue::new("bare"),
            ]),
            e
        );
    }

    #[test]
    fn parse_both_keys() {
        let p = parser();
        let e = p
            .parse_enum(&node(json!({
                "name": "FakeEnum",
                "values": ["a", "b"],
                "annotatedValues": [
                    {"name": "b", "description": "bee"},
                    {"name": "c", "description": "sea"},
                    "d"
                ]
            })))
            .unwrap();

        assert_eq!(
            fake_enum(vec![
                EnumValue::new("a"),
                EnumValue::with_description("b", "bee"),
                EnumValue::with_description("c", "sea"),
                EnumValue::new("d"),
            ]),
            e
        );
    }

    #[test]
    fn parse_missing_name() {
        let p = parser();
        let err = p
            .parse_enum(&node(json!({"values": ["a"]})))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedDocument(MalformedDocumentError::MissingKey(ref key))
                if key == NAME
        ));
    }

    #[test]
    fn parse_node_in_values() {
        let p = parser();
        let err = p
            .parse_enum(&node(json!({
                "name": "FakeEnum",
                "values": [{"name": "a"}]
            })))
            .unwrap_err();
        assert!(err.is_malformed_document());
    }

    #[test]
    fn parse_duplicate_label() {
        let p = parser();
        let err = p
            .parse_enum(&node(json!({
                "name": "FakeEnum",
                "values": ["a", "a"]
            })))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateEnumValue(_)));

        let err = p
            .parse_enum(&node(json!({
                "name": "FakeEnum",
                "annotatedValues": ["a", {"name": "a", "description": "again"}]
            })))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateEnumValue(_)));
    }

    #[test]
    fn parse_enums_absent() {
        let p = parser();
        assert_eq!(Enums::new(), p.parse_enums(&p.new_node()).unwrap());
    }

    #[test]
    fn parse_enums_rejects_bare_string() {
        let p = parser();
        let err = p
            .parse_enums(&node(json!({"enums": ["FakeEnum"]})))
            .unwrap_err();
        assert!(err.is_malformed_document());
    }

    #[test]
    fn parse_enums_rejects_repeated_name() {
        let p = parser();
        let err = p
            .parse_enums(&node(json!({"enums": [
                {"name": "FakeEnum", "values": ["a"]},
                {"name": "FakeEnum", "values": ["b"]}
            ]})))
            .unwrap_err();
        assert!(err.is_malformed_document());
    }

    fn instance_enum_shape(e: Enum) {
        let p = parser();
        let node = p.convert_enum(&e);

        if e.has_descriptions() {
            assert!(!node.contains_key(VALUES));
            assert!(node.contains_key(ANNOTATED_VALUES));
            for element in p.get_list(&node, ANNOTATED_VALUES).unwrap().unwrap()
            {
                // exactly the described values are nodes
                match element {
                    Element::String(label) => {
                        assert!(!e.value(&label).unwrap().has_description())
                    }
                    Element::Node(n) => {
                        let label = p.get_required_string(n, NAME).unwrap();
                        assert_eq!(
                            e.value(&label).unwrap().description,
                            p.get_string(n, DESCRIPTION).unwrap()
                        );
                    }
                }
            }
        } else {
            assert!(node.contains_key(VALUES));
            assert!(!node.contains_key(ANNOTATED_VALUES));
            assert_eq!(
                e.labels().map(|l| l.to_owned()).collect::<Vec<_>>(),
                p.get_string_list(&node, VALUES).unwrap().unwrap()
            );
        }
    }

    fn instance_enum_roundtrip(e: Enum) {
        let p = parser();
        let node = p.convert_enum(&e);
        assert_eq!(e, p.parse_enum(&node).unwrap());
    }

    fn instance_enums_roundtrip(enums: Enums) {
        let p = parser();
        let mut node = p.new_node();
        p.convert_enums(&mut node, &enums);
        assert_eq!(enums, p.parse_enums(&node).unwrap());
    }

    proptest! {
        #[test]
        fn enum_shape(e in any::<Enum>()) {
            instance_enum_shape(e)
        }

        #[test]
        fn enum_roundtrip(e in any::<Enum>()) {
            instance_enum_roundtrip(e)
        }

        #[test]
        fn enum_roundtrip_undescribed(e in any_with::<Enum>(EnumParameters {
            annotated_likelihood: 0.0,
            ..Default::default()
        })) {
            instance_enum_roundtrip(e)
        }

        #[test]
        fn enums_roundtrip(enums in any::<Enums>()) {
            instance_enums_roundtrip(enums)
        }
    }
}
