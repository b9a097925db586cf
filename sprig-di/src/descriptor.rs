//! Type descriptors are the introspection layer of the container. Each bean type is described by a
//! [TypeDescriptor], which knows how to construct the type, which dependency slots it declares and
//! which capabilities (traits) it can be viewed as.
//!
//! Descriptors are normally generated by `#[derive(Bean)]` and `#[capability]`, but can also be
//! assembled by hand:
//!
//! ```
//! use sprig_di::descriptor::{CapabilityDescriptor, FieldDescriptor, TypeDescriptor, TypeKey};
//! use sprig_di::instance::{BeanInstanceAnyPtr, BeanInstancePtr, ErrorPtr, Inject};
//! use std::any::Any;
//!
//! #[derive(Default)]
//! struct Repository;
//!
//! #[derive(Default)]
//! struct Service {
//!     repository: Inject<Repository>,
//! }
//!
//! fn construct_service() -> Result<BeanInstanceAnyPtr, ErrorPtr> {
//!     Ok(BeanInstancePtr::new(Service::default()) as BeanInstanceAnyPtr)
//! }
//!
//! fn cast_service(instance: BeanInstanceAnyPtr) -> Result<Box<dyn Any>, BeanInstanceAnyPtr> {
//!     instance
//!         .downcast::<Service>()
//!         .map(|p| Box::new(p) as Box<dyn Any>)
//! }
//!
//! let descriptor = TypeDescriptor::new(TypeKey::of::<Service>(), cast_service)
//!     .with_constructor(construct_service)
//!     .with_field(FieldDescriptor {
//!         name: "repository",
//!         declared_type: TypeKey::of::<Repository>(),
//!         is_marked: true,
//!         assign: |owner, value| {
//!             owner
//!                 .downcast_ref::<Service>()
//!                 .ok_or(sprig_di::error::SlotError::IncompatibleOwner(TypeKey::of::<Service>()))?
//!                 .repository
//!                 .assign(value)
//!         },
//!     });
//!
//! assert_eq!(descriptor.fields.len(), 1);
//! ```

use crate::error::SlotError;
use crate::instance::{BeanInstanceAnyPtr, CastFunction, ErrorPtr};
use derivative::Derivative;
use itertools::Itertools;
use std::any::{type_name, Any, TypeId};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Stable type identifier used as the key for beans and capabilities. Identity is based solely on
/// [TypeId], while the name is kept for diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Zero-argument constructor for type-erased instances.
pub type ConstructorFunction = fn() -> Result<BeanInstanceAnyPtr, ErrorPtr>;

/// Privileged field writer: receives the owning bean and a value produced by a [CastFunction] for
/// the field's declared type. Generated next to the struct, so field visibility doesn't matter.
pub type AssignFunction =
    fn(owner: &BeanInstanceAnyPtr, value: Box<dyn Any>) -> Result<(), SlotError>;

/// A dependency slot declared by a bean type.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct FieldDescriptor {
    pub name: &'static str,

    /// The type requested by this slot - a concrete bean type or a capability.
    pub declared_type: TypeKey,

    /// Whether the field carries an explicit injection marker.
    pub is_marked: bool,

    #[derivative(Debug = "ignore")]
    pub assign: AssignFunction,
}

/// A capability the described type can be viewed as, usually `dyn Trait + Send + Sync`.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct CapabilityDescriptor {
    pub type_key: TypeKey,

    /// With multiple beans providing given capability, one of them can be marked as primary and
    /// returned when requesting a single instance.
    pub is_primary: bool,

    #[derivative(Debug = "ignore")]
    pub cast: CastFunction,
}

/// Complete description of a bean type.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct TypeDescriptor {
    pub type_key: TypeKey,

    /// Human-readable bean name. Derive-based beans have their name generated from type name by
    /// converting it to snake case.
    pub name: String,

    /// Opaque component markers, e.g. "service" or "repository", used by type scanners.
    pub markers: Vec<&'static str>,

    /// Zero-argument constructor. Types without one (e.g. capabilities) cannot be instantiated.
    #[derivative(Debug = "ignore")]
    pub constructor: Option<ConstructorFunction>,

    /// Cast to the concrete type itself.
    #[derivative(Debug = "ignore")]
    pub cast: CastFunction,

    pub fields: Vec<FieldDescriptor>,

    pub capabilities: Vec<CapabilityDescriptor>,
}

impl TypeDescriptor {
    /// Creates a descriptor without constructor, fields or capabilities.
    pub fn new(type_key: TypeKey, cast: CastFunction) -> Self {
        Self {
            type_key,
            name: type_key.name().to_string(),
            markers: vec![],
            constructor: None,
            cast,
            fields: vec![],
            capabilities: vec![],
        }
    }

    pub fn with_name<T: ToString>(mut self, name: T) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_marker(mut self, marker: &'static str) -> Self {
        self.markers.push(marker);
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorFunction) -> Self {
        self.constructor = Some(constructor);
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_capability(mut self, capability: CapabilityDescriptor) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Checks if the described type is `type_key` or provides it as a capability.
    pub fn satisfies(&self, type_key: &TypeKey) -> bool {
        self.type_key == *type_key
            || self
                .capabilities
                .iter()
                .any(|capability| capability.type_key == *type_key)
    }

    #[inline]
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|candidate| *candidate == marker)
    }
}

/// Returns capabilities registered with `#[capability]` for given concrete type.
pub fn registered_capabilities(target: TypeId) -> Vec<CapabilityDescriptor> {
    inventory::iter::<internal::CapabilityRegisterer>
        .into_iter()
        .map(|registerer| (registerer.register)())
        .filter(|definition| definition.target == target)
        .map(|definition| definition.capability)
        .unique_by(|capability| capability.type_key)
        .collect()
}

/// Returns descriptors of all beans registered with `#[derive(Bean)]`, together with the module
/// path they were declared in.
pub fn registered_types() -> Vec<(&'static str, TypeDescriptor)> {
    inventory::iter::<internal::BeanRegisterer>
        .into_iter()
        .map(|registerer| (registerer.module_path, (registerer.register)()))
        .collect()
}

#[doc(hidden)]
pub mod internal {
    use crate::descriptor::{CapabilityDescriptor, TypeDescriptor};
    use inventory::collect;
    pub use inventory::submit;
    use std::any::TypeId;

    pub struct BeanRegisterer {
        pub module_path: &'static str,
        pub register: fn() -> TypeDescriptor,
    }

    #[derive(Clone)]
    pub struct CapabilityDefinition {
        pub target: TypeId,
        pub capability: CapabilityDescriptor,
    }

    pub struct CapabilityRegisterer {
        pub register: fn() -> CapabilityDefinition,
    }

    collect!(BeanRegisterer);
    collect!(CapabilityRegisterer);
}
