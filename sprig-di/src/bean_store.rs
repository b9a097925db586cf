//! The [BeanStore] holds exactly one instance per registered type. Instances are created eagerly
//! from [TypeDescriptor]s and can later be found either by their exact type, or by any capability
//! they provide.

use crate::descriptor::{TypeDescriptor, TypeKey};
use crate::error::{BeanLookupError, InstantiationError};
use crate::instance::{BeanInstanceAnyPtr, BeanInstancePtr, CastFunction};
use fxhash::FxHashMap;
use itertools::Itertools;
use tracing::debug;

/// A bean instance together with the descriptor it was created from.
#[derive(Clone, Debug)]
pub struct StoredBean {
    pub descriptor: TypeDescriptor,
    pub instance: BeanInstanceAnyPtr,
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    owner: TypeKey,
    is_primary: bool,
    cast: CastFunction,
}

/// Unordered set of beans, keyed by exact type. Membership is fixed at build time.
#[derive(Clone, Debug, Default)]
pub struct BeanStore {
    beans: FxHashMap<TypeKey, StoredBean>,
    candidates: FxHashMap<TypeKey, Vec<Candidate>>,
}

impl BeanStore {
    /// Instantiates one bean per distinct type. Fails on the first type which cannot be
    /// constructed.
    pub fn build<I: IntoIterator<Item = TypeDescriptor>>(
        types: I,
    ) -> Result<Self, InstantiationError> {
        let mut store = Self::default();

        for descriptor in types {
            let type_key = descriptor.type_key;
            if store.beans.contains_key(&type_key) {
                debug!(bean = %type_key, "Skipping duplicate type registration.");
                continue;
            }

            let constructor = descriptor
                .constructor
                .ok_or(InstantiationError::MissingConstructor(type_key))?;

            let instance = constructor().map_err(|source| {
                InstantiationError::ConstructorFailed {
                    bean: type_key,
                    source,
                }
            })?;

            debug!(bean = %type_key, name = %descriptor.name, "Instantiated bean.");

            store.index(&descriptor);
            store.beans.insert(
                type_key,
                StoredBean {
                    descriptor,
                    instance,
                },
            );
        }

        Ok(store)
    }

    fn index(&mut self, descriptor: &TypeDescriptor) {
        let owner = descriptor.type_key;

        self.candidates.entry(owner).or_default().push(Candidate {
            owner,
            is_primary: false,
            cast: descriptor.cast,
        });

        for capability in &descriptor.capabilities {
            self.candidates
                .entry(capability.type_key)
                .or_default()
                .push(Candidate {
                    owner,
                    is_primary: capability.is_primary,
                    cast: capability.cast,
                });
        }
    }

    /// Returns the bean whose concrete type is exactly `type_key`.
    pub fn find_by_type(
        &self,
        type_key: &TypeKey,
    ) -> Result<BeanInstanceAnyPtr, BeanLookupError> {
        self.beans
            .get(type_key)
            .map(|bean| bean.instance.clone())
            .ok_or(BeanLookupError::NotFound(*type_key))
    }

    /// Returns the bean which either is of type `type_key` or provides it as a capability, along
    /// with the [CastFunction] converting it to `type_key`. A concrete type always resolves to
    /// itself. Multiple capability providers resolve to the primary one, if present.
    pub fn find_by_capability(
        &self,
        type_key: &TypeKey,
    ) -> Result<(BeanInstanceAnyPtr, CastFunction), BeanLookupError> {
        if let Some(bean) = self.beans.get(type_key) {
            return Ok((bean.instance.clone(), bean.descriptor.cast));
        }

        let candidates = self
            .candidates
            .get(type_key)
            .filter(|candidates| !candidates.is_empty())
            .ok_or(BeanLookupError::NotFound(*type_key))?;

        let candidate = if let [candidate] = candidates.as_slice() {
            candidate
        } else {
            candidates
                .iter()
                .filter(|candidate| candidate.is_primary)
                .exactly_one()
                .map_err(|_| BeanLookupError::Ambiguous {
                    requested: *type_key,
                    candidates: candidates
                        .iter()
                        .map(|candidate| candidate.owner.name())
                        .sorted()
                        .collect(),
                })?
        };

        self.resolve_candidate(candidate)
            .map(|instance| (instance, candidate.cast))
    }

    /// Returns all beans satisfying `type_key`, in unspecified order.
    pub fn candidates(
        &self,
        type_key: &TypeKey,
    ) -> Result<Vec<(BeanInstanceAnyPtr, CastFunction)>, BeanLookupError> {
        self.candidates
            .get(type_key)
            .map(|candidates| {
                candidates
                    .iter()
                    .map(|candidate| {
                        self.resolve_candidate(candidate)
                            .map(|instance| (instance, candidate.cast))
                    })
                    .try_collect()
            })
            .unwrap_or_else(|| Ok(vec![]))
    }

    /// Typesafe version of [BeanStore::find_by_capability].
    pub fn find_typed<T: ?Sized + 'static>(&self) -> Result<BeanInstancePtr<T>, BeanLookupError> {
        let type_key = TypeKey::of::<T>();
        self.find_by_capability(&type_key)
            .and_then(|(instance, cast)| downcast_instance(instance, cast, type_key))
    }

    /// Typesafe version of [BeanStore::candidates].
    pub fn candidates_typed<T: ?Sized + 'static>(
        &self,
    ) -> Result<Vec<BeanInstancePtr<T>>, BeanLookupError> {
        let type_key = TypeKey::of::<T>();
        self.candidates(&type_key)?
            .into_iter()
            .map(|(instance, cast)| downcast_instance(instance, cast, type_key))
            .try_collect()
    }

    /// Checks if any bean satisfies given type.
    #[inline]
    pub fn contains(&self, type_key: &TypeKey) -> bool {
        self.candidates
            .get(type_key)
            .map(|candidates| !candidates.is_empty())
            .unwrap_or(false)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }

    /// Iterates over all beans in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &StoredBean> {
        self.beans.values()
    }

    fn resolve_candidate(
        &self,
        candidate: &Candidate,
    ) -> Result<BeanInstanceAnyPtr, BeanLookupError> {
        self.find_by_type(&candidate.owner)
    }
}

fn downcast_instance<T: ?Sized + 'static>(
    instance: BeanInstanceAnyPtr,
    cast: CastFunction,
    type_key: TypeKey,
) -> Result<BeanInstancePtr<T>, BeanLookupError> {
    cast(instance)
        .ok()
        .and_then(|instance| instance.downcast::<BeanInstancePtr<T>>().ok())
        .map(|instance| *instance)
        .ok_or(BeanLookupError::IncompatibleBean(type_key))
}
