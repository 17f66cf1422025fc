use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

use crate::enums::{Enum, EnumValue, Enums};

pub fn prop_enum_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9_]+")
        .expect("Error creating enum name strategy")
}

pub fn prop_enum_value_label() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z][a-zA-Z0-9_]{0,15}")
        .expect("Error creating enum value label strategy")
}

/// Descriptions may be empty, which must not be confused with no description.
pub fn prop_enum_value_description() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9 .,_-]{0,32}")
        .expect("Error creating enum value description strategy")
}

impl Arbitrary for EnumValue {
    type Parameters = ();
    type Strategy = BoxedStrategy<EnumValue>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            prop_enum_value_label(),
            proptest::option::of(prop_enum_value_description()),
        )
            .prop_map(|(name, description)| EnumValue { name, description })
            .boxed()
    }
}

#[derive(Clone)]
pub struct Parameters {
    pub min_values: usize,
    pub max_values: usize,
    /// Likelihood that any value of the enumeration is described.
    pub annotated_likelihood: f64,
    /// Likelihood that a single value of a described enumeration is described.
    pub description_likelihood: f64,
}

impl Parameters {
    fn min_values_default() -> usize {
        **metadata_proptest_config::METADATA_STRATEGY_ENUM_PARAMETERS_NUM_VALUES_MIN
    }

    fn max_values_default() -> usize {
        **metadata_proptest_config::METADATA_STRATEGY_ENUM_PARAMETERS_NUM_VALUES_MAX
    }

    fn annotated_likelihood_default() -> f64 {
        **metadata_proptest_config::METADATA_STRATEGY_ENUM_PARAMETERS_ANNOTATED_LIKELIHOOD
    }

    fn description_likelihood_default() -> f64 {
        **metadata_proptest_config::METADATA_STRATEGY_ENUM_PARAMETERS_DESCRIPTION_LIKELIHOOD
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            min_values: Self::min_values_default(),
            max_values: Self::max_values_default(),
            annotated_likelihood: Self::annotated_likelihood_default(),
            description_likelihood: Self::description_likelihood_default(),
        }
    }
}

pub fn prop_enum(params: Parameters) -> impl Strategy<Value = Enum> {
    let annotated = proptest::bool::weighted(params.annotated_likelihood);
    (prop_enum_name(), annotated).prop_flat_map(move |(name, annotated)| {
        let description = if annotated {
            proptest::option::weighted(
                params.description_likelihood,
                prop_enum_value_description(),
            )
            .boxed()
        } else {
            Just(None).boxed()
        };
        btree_map(
            prop_enum_value_label(),
            description,
            params.min_values..=params.max_values,
        )
        .prop_map(move |values| {
            // labels are map keys, so they cannot repeat
            Enum::with_values(
                name.clone(),
                values
                    .into_iter()
                    .map(|(name, description)| EnumValue { name, description }),
            )
            .expect("Error constructing enum from unique labels")
        })
    })
}

impl Arbitrary for Enum {
    type Parameters = Parameters;
    type Strategy = BoxedStrategy<Enum>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        prop_enum(params).boxed()
    }
}

#[derive(Clone)]
pub struct EnumsParameters {
    pub min_enums: usize,
    pub max_enums: usize,
    pub enumeration: Parameters,
}

impl Default for EnumsParameters {
    fn default() -> Self {
        EnumsParameters {
            min_enums: **metadata_proptest_config::METADATA_STRATEGY_ENUMS_PARAMETERS_NUM_ENUMS_MIN,
            max_enums: **metadata_proptest_config::METADATA_STRATEGY_ENUMS_PARAMETERS_NUM_ENUMS_MAX,
            enumeration: Default::default(),
        }
    }
}

impl Arbitrary for Enums {
    type Parameters = EnumsParameters;
    type Strategy = BoxedStrategy<Enums>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        // enumerations generated with the same name collapse into one
        vec(
            any_with::<Enum>(params.enumeration),
            params.min_enums..=params.max_enums,
        )
        .prop_map(|enums| enums.into_iter().collect::<Enums>())
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn enum_within_bounds(e in any::<Enum>()) {
            let params = Parameters::default();
            assert!(e.len() >= params.min_values);
            assert!(e.len() <= params.max_values);
        }

        #[test]
        fn undescribed_enum(e in any_with::<Enum>(Parameters {
            annotated_likelihood: 0.0,
            ..Default::default()
        })) {
            assert!(!e.has_descriptions());
        }
    }
}
