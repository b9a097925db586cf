//! A dependency injection container based on generated type descriptors and two-phase autowiring.
//!
//! Beans are plain structs which declare their dependencies as [Inject](instance::Inject) slots.
//! A [Container](container::Container) first instantiates one bean per registered type, then fills
//! the slots with matching beans - either by concrete type, or by a capability (trait) the bean
//! provides. Since slots are filled after all beans exist, beans never need to know the order in
//! which they are created.
//!
//! Which slots are filled depends on the [InjectabilityPolicy](injector::InjectabilityPolicy):
//! every slot with a matching bean, or only slots marked with `#[bean(inject)]`.
//!
//! ### Features
//!
//! * `derive` - automatically derive `Bean` and register capabilities with `#[capability]`

pub mod bean;
pub mod bean_store;
pub mod container;
pub mod descriptor;
pub mod error;
pub mod injector;
pub mod instance;
pub mod scan;

#[cfg(feature = "derive")]
pub use sprig_di_derive::{capability, injectable, Bean};
