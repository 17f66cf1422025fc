use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

/// The value of a custom property.
///
/// Custom property values are owned by the plugin which parses them;
/// the metadata model never looks inside. Any `'static` type which can be
/// compared and debug-printed is a property value.
pub trait PropertyValue: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn dyn_eq(&self, other: &dyn PropertyValue) -> bool;
}

impl<T> PropertyValue for T
where
    T: Any + Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn PropertyValue) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }
}

impl dyn PropertyValue {
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for dyn PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}

/// Custom properties keyed by the name of the property,
/// which is also the name of the plugin which handles it.
pub type Properties = BTreeMap<String, Arc<dyn PropertyValue>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_same_type() {
        let a: Arc<dyn PropertyValue> = Arc::new(42i32);
        let b: Arc<dyn PropertyValue> = Arc::new(42i32);
        let c: Arc<dyn PropertyValue> = Arc::new(43i32);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn compare_different_type() {
        let a: Arc<dyn PropertyValue> = Arc::new(42i32);
        let b: Arc<dyn PropertyValue> = Arc::new(42i64);
        assert_ne!(a, b);
    }

    #[test]
    fn downcast() {
        let a: Arc<dyn PropertyValue> = Arc::new(String::from("answer"));
        assert_eq!(Some(&String::from("answer")), a.downcast_ref::<String>());
        assert_eq!(None, a.downcast_ref::<i32>());
    }
}
