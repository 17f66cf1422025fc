#[cfg(any(test, feature = "proptest-strategies"))]
pub mod strategy;

use std::collections::BTreeMap;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EnumError {
    #[error("Duplicate value '{value}' in enumeration '{enumeration}'")]
    DuplicateEnumValue { enumeration: String, value: String },
}

/// One label of an [Enum], optionally carrying a human-readable description.
///
/// A value with no description is distinct from a value whose description
/// is the empty string.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
}

impl EnumValue {
    pub fn new<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        EnumValue {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description<S, D>(name: S, description: D) -> Self
    where
        S: Into<String>,
        D: Into<String>,
    {
        EnumValue {
            name: name.into(),
            description: Some(description.into()),
        }
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }
}

/// A named, closed set of distinct labels usable as the allowed values of a field.
///
/// Labels are unique within an enumeration. Any operation which would
/// introduce a repeated label fails with [EnumError::DuplicateEnumValue]
/// and leaves the enumeration unchanged.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Enum {
    name: String,
    #[cfg_attr(
        feature = "serde",
        serde(
            serialize_with = "Enum::serialize_values",
            deserialize_with = "Enum::deserialize_values"
        )
    )]
    values: BTreeMap<String, EnumValue>,
}

impl Enum {
    pub fn new<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        Enum {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_values<S, I>(name: S, values: I) -> Result<Self, EnumError>
    where
        S: Into<String>,
        I: IntoIterator<Item = EnumValue>,
    {
        let mut e = Self::new(name);
        e.set_values(values)?;
        Ok(e)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the values of this enumeration, ordered by label.
    pub fn values(&self) -> impl Iterator<Item = &EnumValue> {
        self.values.values()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn value(&self, label: &str) -> Option<&EnumValue> {
        self.values.get(label)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns whether any value of this enumeration carries a description.
    pub fn has_descriptions(&self) -> bool {
        self.values.values().any(EnumValue::has_description)
    }

    pub fn insert(&mut self, value: EnumValue) -> Result<(), EnumError> {
        if self.values.contains_key(&value.name) {
            return Err(self.duplicate(value.name));
        }
        self.values.insert(value.name.clone(), value);
        Ok(())
    }

    /// Replaces all values of this enumeration.
    pub fn set_values<I>(&mut self, values: I) -> Result<(), EnumError>
    where
        I: IntoIterator<Item = EnumValue>,
    {
        let mut replacement = BTreeMap::new();
        for value in values {
            if replacement.contains_key(&value.name) {
                return Err(self.duplicate(value.name));
            }
            replacement.insert(value.name.clone(), value);
        }
        self.values = replacement;
        Ok(())
    }

    fn duplicate(&self, value: String) -> EnumError {
        EnumError::DuplicateEnumValue {
            enumeration: self.name.clone(),
            value,
        }
    }
}

#[cfg(feature = "serde")]
impl Enum {
    fn serialize_values<S>(
        values: &BTreeMap<String, EnumValue>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        values
            .values()
            .collect::<Vec<&EnumValue>>()
            .serialize(serializer)
    }

    fn deserialize_values<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<String, EnumValue>, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        let mut values = BTreeMap::new();
        for value in Vec::<EnumValue>::deserialize(deserializer)? {
            if values.contains_key(&value.name) {
                return Err(D::Error::custom(format!(
                    "duplicate enumeration value '{}'",
                    value.name
                )));
            }
            values.insert(value.name.clone(), value);
        }
        Ok(values)
    }
}

/// The enumerations of an entity, keyed by enumeration name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Enums {
    #[cfg_attr(
        feature = "serde",
        serde(
            serialize_with = "Enums::serialize_enums",
            deserialize_with = "Enums::deserialize_enums"
        )
    )]
    enums: BTreeMap<String, Enum>,
}

impl Enums {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an enumeration, returning the enumeration it replaced if one
    /// with the same name was already present.
    pub fn add_enum(&mut self, e: Enum) -> Option<Enum> {
        self.enums.insert(e.name.clone(), e)
    }

    pub fn get(&self, name: &str) -> Option<&Enum> {
        self.enums.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enum> {
        self.enums.values()
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

impl FromIterator<Enum> for Enums {
    fn from_iter<T: IntoIterator<Item = Enum>>(iter: T) -> Self {
        let mut enums = Enums::new();
        for e in iter {
            enums.add_enum(e);
        }
        enums
    }
}

impl IntoIterator for Enums {
    type Item = Enum;
    type IntoIter = std::collections::btree_map::IntoValues<String, Enum>;

    fn into_iter(self) -> Self::IntoIter {
        self.enums.into_values()
    }
}

#[cfg(feature = "serde")]
impl Enums {
    fn serialize_enums<S>(
        enums: &BTreeMap<String, Enum>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        enums.values().collect::<Vec<&Enum>>().serialize(serializer)
    }

    fn deserialize_enums<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Enum>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Enum>::deserialize(deserializer).map(|v| {
            v.into_iter()
                .map(|e| (e.name.clone(), e))
                .collect::<BTreeMap<_, _>>()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_label_rejected() {
        let err = Enum::with_values(
            "color",
            vec![
                EnumValue::new("red"),
                EnumValue::with_description("red", "the other red"),
            ],
        )
        .unwrap_err();
        assert_eq!(
            EnumError::DuplicateEnumValue {
                enumeration: "color".to_owned(),
                value: "red".to_owned()
            },
            err
        );
    }

    #[test]
    fn failed_set_values_keeps_previous() {
        let mut e =
            Enum::with_values("color", vec![EnumValue::new("red")]).unwrap();
        let before = e.clone();

        assert!(e
            .set_values(vec![EnumValue::new("blue"), EnumValue::new("blue")])
            .is_err());
        assert_eq!(before, e);

        assert!(e.insert(EnumValue::new("red")).is_err());
        assert_eq!(before, e);
    }

    #[test]
    fn has_descriptions() {
        let mut e = Enum::with_values(
            "color",
            vec![EnumValue::new("red"), EnumValue::new("blue")],
        )
        .unwrap();
        assert!(!e.has_descriptions());

        // an empty description is still a description
        e.insert(EnumValue::with_description("green", "")).unwrap();
        assert!(e.has_descriptions());
    }

    #[test]
    fn values_ordered_by_label() {
        let e = Enum::with_values(
            "letters",
            vec![
                EnumValue::new("c"),
                EnumValue::new("a"),
                EnumValue::new("b"),
            ],
        )
        .unwrap();
        assert_eq!(vec!["a", "b", "c"], e.labels().collect::<Vec<_>>());
    }

    #[test]
    fn add_enum_replaces() {
        let mut enums = Enums::new();
        assert!(enums.add_enum(Enum::new("color")).is_none());

        let replacement =
            Enum::with_values("color", vec![EnumValue::new("red")]).unwrap();
        let previous = enums.add_enum(replacement.clone());
        assert_eq!(Some(Enum::new("color")), previous);
        assert_eq!(1, enums.len());
        assert_eq!(Some(&replacement), enums.get("color"));
    }

    #[cfg(feature = "serde")]
    mod serde {
        use proptest::prelude::*;

        use super::super::*;

        proptest! {
            #[test]
            fn enum_roundtrip(e in any::<Enum>()) {
                assert_eq!(e, crate::test::serde::roundtrip(&e).unwrap());
            }

            #[test]
            fn enums_roundtrip(enums in any::<Enums>()) {
                assert_eq!(enums, crate::test::serde::roundtrip(&enums).unwrap());
            }
        }

        #[test]
        fn duplicate_rejected() {
            let json = r#"{"name":"color","values":[
                {"name":"red","description":null},
                {"name":"red","description":"again"}
            ]}"#;
            assert!(serde_json::from_str::<Enum>(json).is_err());
        }
    }
}
