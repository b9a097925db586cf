use crate::descriptor::TypeKey;
use crate::instance::ErrorPtr;
use thiserror::Error;

/// Errors related to creating bean instances.
#[derive(Error, Clone, Debug)]
pub enum InstantiationError {
    #[error("Type {0} has no zero-argument constructor and cannot be instantiated.")]
    MissingConstructor(TypeKey),
    #[error("Constructor of bean {bean} failed: {source}")]
    ConstructorFailed { bean: TypeKey, source: ErrorPtr },
}

/// Errors related to looking up bean instances.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum BeanLookupError {
    #[error("Cannot find a bean satisfying type: {0}")]
    NotFound(TypeKey),
    #[error("Multiple beans satisfy type {requested} and none is marked as primary: {candidates:?}")]
    Ambiguous {
        requested: TypeKey,
        candidates: Vec<&'static str>,
    },
    #[error("Tried to cast bean to incompatible type: {0}")]
    IncompatibleBean(TypeKey),
}

/// Errors related to writing a single dependency slot.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum SlotError {
    #[error("Slot owner is not an instance of {0}")]
    IncompatibleOwner(TypeKey),
    #[error("Injected value is not compatible with slot type {0}")]
    IncompatibleValue(TypeKey),
    #[error("Slot has already been injected")]
    AlreadyInjected,
}

/// Errors related to the injection phase.
#[derive(Error, Clone, Eq, PartialEq, Hash, Debug)]
pub enum InjectionError {
    #[error("Cannot resolve dependency '{field}' of bean {bean}: {source}")]
    UnresolvedDependency {
        bean: TypeKey,
        field: &'static str,
        source: BeanLookupError,
    },
    #[error("Cannot assign dependency '{field}' of bean {bean}: {source}")]
    SlotAssignment {
        bean: TypeKey,
        field: &'static str,
        source: SlotError,
    },
}

/// Error aborting container construction.
#[derive(Error, Clone, Debug)]
pub enum ContainerError {
    #[error(transparent)]
    Instantiation(#[from] InstantiationError),
    #[error(transparent)]
    Injection(#[from] InjectionError),
}
