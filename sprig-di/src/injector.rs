//! Second phase of container construction: filling dependency slots of already instantiated beans.
//!
//! Which slots get filled is decided by an [InjectabilityPolicy]:
//!
//! * [TypeDrivenPolicy] - every slot whose declared type is satisfied by some bean
//! * [MarkerDrivenPolicy] - only slots explicitly marked with `#[bean(inject)]`

use crate::bean_store::{BeanStore, StoredBean};
use crate::descriptor::FieldDescriptor;
use crate::error::{BeanLookupError, InjectionError};
#[cfg(test)]
use mockall::automock;
use tracing::trace;

/// Decides if a given dependency slot should be injected.
#[cfg_attr(test, automock)]
pub trait InjectabilityPolicy {
    fn is_injectable(&self, field: &FieldDescriptor, store: &BeanStore) -> bool;
}

/// Injects every slot whose declared type matches the type or a capability of at least one bean.
/// Other slots are left empty.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
pub struct TypeDrivenPolicy;

impl InjectabilityPolicy for TypeDrivenPolicy {
    #[inline]
    fn is_injectable(&self, field: &FieldDescriptor, store: &BeanStore) -> bool {
        store.contains(&field.declared_type)
    }
}

/// Injects only slots marked with an injection marker. A marked slot without a matching bean is an
/// error.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
pub struct MarkerDrivenPolicy;

impl InjectabilityPolicy for MarkerDrivenPolicy {
    #[inline]
    fn is_injectable(&self, field: &FieldDescriptor, _store: &BeanStore) -> bool {
        field.is_marked
    }
}

/// Wires beans in a [BeanStore] according to a policy.
pub struct Injector<'a> {
    policy: &'a dyn InjectabilityPolicy,
}

impl<'a> Injector<'a> {
    pub fn new(policy: &'a dyn InjectabilityPolicy) -> Self {
        Self { policy }
    }

    /// Fills all injectable slots of all beans. Stops at the first slot which cannot be resolved.
    pub fn inject_all(&self, store: &BeanStore) -> Result<(), InjectionError> {
        store
            .iter()
            .try_for_each(|bean| self.inject_bean(bean, store))
    }

    fn inject_bean(&self, bean: &StoredBean, store: &BeanStore) -> Result<(), InjectionError> {
        for field in bean
            .descriptor
            .fields
            .iter()
            .filter(|field| self.policy.is_injectable(field, store))
        {
            self.inject_field(bean, field, store)?;
        }

        Ok(())
    }

    fn inject_field(
        &self,
        bean: &StoredBean,
        field: &FieldDescriptor,
        store: &BeanStore,
    ) -> Result<(), InjectionError> {
        let (dependency, cast) = store
            .find_by_capability(&field.declared_type)
            .map_err(|source| InjectionError::UnresolvedDependency {
                bean: bean.descriptor.type_key,
                field: field.name,
                source,
            })?;

        let bean_key = bean.descriptor.type_key;
        let dependency_key = field.declared_type;
        let value = cast(dependency).map_err(|_| InjectionError::UnresolvedDependency {
            bean: bean_key,
            field: field.name,
            source: BeanLookupError::IncompatibleBean(dependency_key),
        })?;

        (field.assign)(&bean.instance, value).map_err(|source| {
            InjectionError::SlotAssignment {
                bean: bean_key,
                field: field.name,
                source,
            }
        })?;

        trace!(
            bean = %bean_key,
            field = field.name,
            dependency = %dependency_key,
            "Injected dependency."
        );

        Ok(())
    }
}
