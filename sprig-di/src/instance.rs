//! Pointer types for bean instances and the [Inject] dependency slot.

use crate::descriptor::TypeKey;
use crate::error::SlotError;
use std::any::Any;
use std::error::Error;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};

pub type BeanInstancePtr<T> = Arc<T>;

pub type BeanInstanceAnyPtr = BeanInstancePtr<dyn Any + Send + Sync + 'static>;

pub type ErrorPtr = Arc<dyn Error + Send + Sync>;

/// Casts a type-erased bean into a boxed `BeanInstancePtr<Target>`, where `Target` is either the
/// concrete bean type or one of its capabilities. The source pointer is returned unchanged, if the
/// cast is not possible.
pub type CastFunction =
    fn(instance: BeanInstanceAnyPtr) -> Result<Box<dyn Any>, BeanInstanceAnyPtr>;

/// A dependency slot filled by the container during the injection phase.
///
/// Slots start empty and can be written exactly once, which allows wiring beans that are already
/// shared behind a [BeanInstancePtr]. `T` is either a concrete bean type or a capability, usually
/// `dyn Trait + Send + Sync`.
pub struct Inject<T: ?Sized + 'static> {
    slot: OnceLock<BeanInstancePtr<T>>,
}

impl<T: ?Sized + 'static> Inject<T> {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Returns the injected bean, or `None` if the slot was not selected for injection.
    #[inline]
    pub fn get(&self) -> Option<&BeanInstancePtr<T>> {
        self.slot.get()
    }

    #[inline]
    pub fn is_injected(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Stores a value produced by a [CastFunction] for type `T`. Used by generated field
    /// assignment glue.
    #[doc(hidden)]
    pub fn assign(&self, value: Box<dyn Any>) -> Result<(), SlotError> {
        let instance = value
            .downcast::<BeanInstancePtr<T>>()
            .map_err(|_| SlotError::IncompatibleValue(TypeKey::of::<T>()))?;

        self.slot
            .set(*instance)
            .map_err(|_| SlotError::AlreadyInjected)
    }
}

impl<T: ?Sized + 'static> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> Debug for Inject<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inject")
            .field("type", &TypeKey::of::<T>())
            .field("injected", &self.is_injected())
            .finish()
    }
}
