use std::any::Any;
use std::fmt::Debug;

/// Configuration of the data store an entity is persisted in.
///
/// Each backend has its own configuration type, parsed and written by the
/// data store parser registered under [DataStore::backend].
pub trait DataStore: Any + Debug + Send + Sync {
    /// Returns the name of the backend, which identifies the parser
    /// responsible for this configuration.
    fn backend(&self) -> &str;

    fn as_any(&self) -> &dyn Any;

    fn dyn_eq(&self, other: &dyn DataStore) -> bool;
}

impl dyn DataStore {
    pub fn downcast_ref<T: DataStore>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for dyn DataStore {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other)
    }
}
