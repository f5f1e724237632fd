//! Type-erased registry entries for feature slices.
//!
//! A slice initializes once at startup and is then looked up by its concrete
//! type from the shared server state.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Marker trait for initialized feature state shared across threads.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Exposes the concrete type for downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// An initialized slice keyed by the `TypeId` of its concrete state.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    /// Wraps a concrete slice state for registration.
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        Self { id: TypeId::of::<T>(), state: Box::new(state) }
    }
}
