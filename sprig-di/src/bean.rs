//! One of the basic blocks of dependency injection is a [Bean]. Beans are objects owned by the
//! container, which themselves can declare dependencies to other beans.
//!
//! ## Declaring beans
//!
//! Any type which wants to be managed by the container, needs to implement `Bean`. For convenience,
//! the trait can be automatically derived with all infrastructure if the `derive` feature is
//! enabled:
//!
//! ```
//! use sprig_di::bean::Bean;
//! use sprig_di::instance::Inject;
//! use sprig_di::{capability, injectable, Bean};
//!
//! #[injectable]
//! trait TestTrait {}
//!
//! #[derive(Bean)]
//! struct TestDependency;
//!
//! #[capability]
//! impl TestTrait for TestDependency {}
//!
//! #[derive(Bean)]
//! #[bean(markers = ["service"])]
//! struct TestBean {
//!     // concrete type dependency
//!     #[bean(inject)]
//!     dependency_1: Inject<TestDependency>,
//!     // capability dependency - note Send + Sync
//!     #[bean(inject)]
//!     dependency_2: Inject<dyn TestTrait + Send + Sync>,
//!     // plain value initialized with Default::default()
//!     counter: u32,
//!     #[bean(default = "dummy_expr")]
//!     default_expr: i8,
//! }
//!
//! fn dummy_expr() -> i8 {
//!     -1
//! }
//!
//! assert_eq!(TestBean::descriptor().fields.len(), 2);
//! ```
//!
//! Every field declared as [Inject](crate::instance::Inject) is a dependency slot. Other fields are
//! initialized when the bean is instantiated and never touched by the container.
//!
//! ### Supported `#[bean]` struct configuration
//!
//! * `name = "name"` - use given name for diagnostics, instead of the auto-generated snake case one
//! * `markers = ["marker"]` - component markers consumed by type scanners, e.g. `service` or
//! `repository`
//! * `constructor = "expr"` - call `expr()` returning `Result<Self, ErrorPtr>` to instantiate the
//! bean, instead of using default field initialization
//!
//! ### Supported `#[bean]` field configuration
//!
//! * `inject` - mark the slot for injection; required by the
//! [MarkerDrivenPolicy](crate::injector::MarkerDrivenPolicy)
//! * `default` - use `Default::default()` initialization (the default for non-slot fields)
//! * `default = "expr"` - call `expr()` for initialization
//!
//! ## Declaring capabilities
//!
//! Capabilities are different types, which can refer to a concrete bean type. Usually they are
//! simply `dyn Traits`, which makes it possible to inject an abstract `dyn Trait + Send + Sync`
//! instead of a concrete bean type. Each injectable trait should be marked as such, which can be
//! done with the `#[injectable]` helper attribute.
//!
//! To automatically register a capability, use the `#[capability]` attribute on a trait
//! implementation. `#[capability(primary)]` marks the implementation as the one selected when
//! multiple beans provide the same capability.

use crate::descriptor::TypeDescriptor;
use crate::instance::BeanInstanceAnyPtr;
use std::any::Any;

/// Marker trait for injectable types - beans and capabilities.
pub trait Injectable: 'static {}

/// Base trait for beans managed by the container.
pub trait Bean: Injectable + Send + Sync + Sized {
    /// Describes the type: constructor, dependency slots and capabilities.
    fn descriptor() -> TypeDescriptor;
}

/// [CastFunction](crate::instance::CastFunction) to the concrete type `T`.
pub fn cast_to_self<T: Bean>(
    instance: BeanInstanceAnyPtr,
) -> Result<Box<dyn Any>, BeanInstanceAnyPtr> {
    instance.downcast::<T>().map(|p| Box::new(p) as Box<dyn Any>)
}
