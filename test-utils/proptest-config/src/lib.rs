use std::ops::Deref;
use std::str::FromStr;
use std::sync::LazyLock;

/// Reads `name` from the environment. A value which is present but does
/// not parse is a configuration mistake and panics.
fn try_parse_env<T>(name: &str) -> Option<T>
where
    T: FromStr,
{
    let value = std::env::var(name).ok()?;
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => panic!("Invalid value for {}: '{}'", name, value),
    }
}

/// A strategy parameter, remembering whether it was overridden
/// from the environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Configuration<T> {
    Default(T),
    Environmental(T),
}

impl<T> Configuration<T> {
    pub fn is_environmental(&self) -> bool {
        matches!(self, Self::Environmental(_))
    }
}

impl<T> Deref for Configuration<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Default(value) | Self::Environmental(value) => value,
        }
    }
}

macro_rules! config_param {
    ($name:ident, $type:ty, $default:expr) => {
        pub static $name: LazyLock<Configuration<$type>> =
            LazyLock::new(|| {
                if let Some(value) = try_parse_env::<$type>(stringify!($name)) {
                    Configuration::Environmental(value)
                } else {
                    Configuration::Default($default)
                }
            });
    };
}

// enums/strategy.rs
config_param!(METADATA_STRATEGY_ENUM_PARAMETERS_NUM_VALUES_MIN, usize, 0);
config_param!(METADATA_STRATEGY_ENUM_PARAMETERS_NUM_VALUES_MAX, usize, 16);
config_param!(
    METADATA_STRATEGY_ENUM_PARAMETERS_DESCRIPTION_LIKELIHOOD,
    f64,
    0.5
);
config_param!(
    METADATA_STRATEGY_ENUM_PARAMETERS_ANNOTATED_LIKELIHOOD,
    f64,
    0.5
);
config_param!(METADATA_STRATEGY_ENUMS_PARAMETERS_NUM_ENUMS_MIN, usize, 0);
config_param!(METADATA_STRATEGY_ENUMS_PARAMETERS_NUM_ENUMS_MAX, usize, 8);

// entity/strategy.rs
config_param!(
    METADATA_STRATEGY_VERSION_PARAMETERS_EXTENDS_VERSIONS_MAX,
    usize,
    4
);
