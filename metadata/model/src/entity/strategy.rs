use proptest::collection::vec;
use proptest::prelude::*;

use crate::entity::{
    EntityInfo, EntityMetadata, EntitySchema, MetadataStatus, Version,
};
use crate::enums::Enums;

pub fn prop_entity_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-zA-Z0-9_]{0,15}")
        .expect("Error creating entity name strategy")
}

pub fn prop_version_value() -> impl Strategy<Value = String> {
    (0u32..10, 0u32..10, 0u32..10)
        .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
}

impl Arbitrary for MetadataStatus {
    type Parameters = ();
    type Strategy = BoxedStrategy<MetadataStatus>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(MetadataStatus::Active),
            Just(MetadataStatus::Deprecated),
            Just(MetadataStatus::Disabled),
        ]
        .boxed()
    }
}

impl Arbitrary for Version {
    type Parameters = ();
    type Strategy = BoxedStrategy<Version>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let max_extends = **metadata_proptest_config::METADATA_STRATEGY_VERSION_PARAMETERS_EXTENDS_VERSIONS_MAX;
        (
            prop_version_value(),
            vec(prop_version_value(), 0..=max_extends),
            proptest::option::of(
                proptest::string::string_regex("[a-zA-Z0-9 .,_-]{0,32}")
                    .expect("Error creating changelog strategy"),
            ),
        )
            .prop_map(|(value, extends_versions, changelog)| Version {
                value,
                extends_versions,
                changelog,
            })
            .boxed()
    }
}

/// Returns a strategy producing entity metadata with no data store
/// and no custom properties, as those are owned by plugins.
pub fn prop_entity_metadata() -> impl Strategy<Value = EntityMetadata> {
    (
        prop_entity_name(),
        proptest::option::of(prop_version_value()),
        any::<Enums>(),
        any::<Version>(),
        any::<MetadataStatus>(),
    )
        .prop_map(|(name, default_version, enums, version, status)| {
            EntityMetadata {
                entity_info: EntityInfo {
                    name: name.clone(),
                    default_version,
                    enums,
                    data_store: None,
                    properties: Default::default(),
                },
                schema: EntitySchema {
                    name,
                    version,
                    status,
                    properties: Default::default(),
                },
            }
        })
}

impl Arbitrary for EntityMetadata {
    type Parameters = ();
    type Strategy = BoxedStrategy<EntityMetadata>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_entity_metadata().boxed()
    }
}
