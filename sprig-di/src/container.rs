//! The [Container] is the main entrypoint: it instantiates all registered types and wires them
//! together, then serves as an immutable lookup table.
//!
//! ```
//! use sprig_di::container::Container;
//! use sprig_di::injector::MarkerDrivenPolicy;
//! use sprig_di::bean::Bean;
//! use sprig_di::instance::Inject;
//! use sprig_di::{capability, injectable, Bean};
//!
//! #[injectable]
//! trait Greeter {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Bean)]
//! struct EnglishGreeter;
//!
//! #[capability]
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         "Hello".to_string()
//!     }
//! }
//!
//! #[derive(Bean)]
//! struct Greeting {
//!     #[bean(inject)]
//!     greeter: Inject<dyn Greeter + Send + Sync>,
//! }
//!
//! let container = Container::new(
//!     [EnglishGreeter::descriptor(), Greeting::descriptor()],
//!     &MarkerDrivenPolicy,
//! )
//! .unwrap();
//!
//! let greeting = container.bean::<Greeting>().unwrap();
//! assert_eq!(greeting.greeter.get().unwrap().greet(), "Hello");
//! ```

use crate::bean::Injectable;
use crate::bean_store::BeanStore;
use crate::descriptor::{TypeDescriptor, TypeKey};
use crate::error::{BeanLookupError, ContainerError};
use crate::injector::{InjectabilityPolicy, Injector};
use crate::instance::BeanInstancePtr;
use crate::scan::TypeScanner;
use tracing::{debug, info};

/// Construction lifecycle of a [Container]. Only `Ready` containers are ever handed out.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ContainerState {
    Uninitialized,
    Instantiating,
    Injecting,
    Ready,
    Failed,
}

/// Fully wired, immutable set of beans.
#[derive(Debug)]
pub struct Container {
    store: BeanStore,
}

impl Container {
    /// Instantiates one bean per type, then injects dependencies according to given policy.
    pub fn new<I: IntoIterator<Item = TypeDescriptor>>(
        types: I,
        policy: &dyn InjectabilityPolicy,
    ) -> Result<Self, ContainerError> {
        let mut bootstrap = Bootstrap::default();
        bootstrap.run(types, policy)
    }

    /// Discovers types in given namespace with a [TypeScanner], and builds the container from
    /// them.
    pub fn scan(
        scanner: &dyn TypeScanner,
        namespace: &str,
        policy: &dyn InjectabilityPolicy,
    ) -> Result<Self, ContainerError> {
        let types = scanner.discover_types(namespace);
        debug!(namespace, count = types.len(), "Discovered bean types.");

        Self::new(types, policy)
    }

    /// Returns the bean which is of type `T` or provides `T` as a capability. Each call returns
    /// the same instance.
    #[inline]
    pub fn bean<T: Injectable + ?Sized>(&self) -> Result<BeanInstancePtr<T>, BeanLookupError> {
        self.store.find_typed::<T>()
    }

    /// Returns all beans providing `T`, in unspecified order.
    #[inline]
    pub fn beans<T: Injectable + ?Sized>(
        &self,
    ) -> Result<Vec<BeanInstancePtr<T>>, BeanLookupError> {
        self.store.candidates_typed::<T>()
    }

    /// Checks if any bean provides `T`.
    #[inline]
    pub fn contains<T: Injectable + ?Sized>(&self) -> bool {
        self.store.contains(&TypeKey::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[derive(Debug)]
struct Bootstrap {
    state: ContainerState,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            state: ContainerState::Uninitialized,
        }
    }
}

impl Bootstrap {
    fn run<I: IntoIterator<Item = TypeDescriptor>>(
        &mut self,
        types: I,
        policy: &dyn InjectabilityPolicy,
    ) -> Result<Container, ContainerError> {
        let result = self.build(types, policy);
        if let Err(error) = &result {
            self.transition(ContainerState::Failed);
            debug!(%error, "Container construction failed.");
        }

        result
    }

    fn build<I: IntoIterator<Item = TypeDescriptor>>(
        &mut self,
        types: I,
        policy: &dyn InjectabilityPolicy,
    ) -> Result<Container, ContainerError> {
        self.transition(ContainerState::Instantiating);
        let store = BeanStore::build(types)?;

        self.transition(ContainerState::Injecting);
        Injector::new(policy).inject_all(&store)?;

        self.transition(ContainerState::Ready);
        info!(beans = store.len(), "Container ready.");

        Ok(Container { store })
    }

    fn transition(&mut self, state: ContainerState) {
        debug!(from = ?self.state, to = ?state, "Container state transition.");
        self.state = state;
    }
}

#[cfg(test)]
//noinspection DuplicatedCode
mod tests {
    use crate::bean::Injectable;
    use crate::container::{Bootstrap, Container, ContainerState};
    use crate::descriptor::{FieldDescriptor, TypeDescriptor, TypeKey};
    use crate::error::{
        BeanLookupError, ContainerError, InjectionError, InstantiationError, SlotError,
    };
    use crate::injector::{MarkerDrivenPolicy, TypeDrivenPolicy};
    use crate::instance::{BeanInstanceAnyPtr, BeanInstancePtr, ErrorPtr, Inject};
    use crate::scan::MockTypeScanner;
    use mockall::predicate::*;
    use std::any::Any;
    use std::thread;

    #[derive(Default)]
    struct TestDependency;

    impl Injectable for TestDependency {}

    #[derive(Default)]
    struct TestBean {
        dependency: Inject<TestDependency>,
    }

    impl Injectable for TestBean {}

    fn construct_dependency() -> Result<BeanInstanceAnyPtr, ErrorPtr> {
        Ok(BeanInstancePtr::new(TestDependency) as BeanInstanceAnyPtr)
    }

    fn construct_bean() -> Result<BeanInstanceAnyPtr, ErrorPtr> {
        Ok(BeanInstancePtr::new(TestBean::default()) as BeanInstanceAnyPtr)
    }

    fn cast_dependency(instance: BeanInstanceAnyPtr) -> Result<Box<dyn Any>, BeanInstanceAnyPtr> {
        instance
            .downcast::<TestDependency>()
            .map(|p| Box::new(p) as Box<dyn Any>)
    }

    fn cast_bean(instance: BeanInstanceAnyPtr) -> Result<Box<dyn Any>, BeanInstanceAnyPtr> {
        instance
            .downcast::<TestBean>()
            .map(|p| Box::new(p) as Box<dyn Any>)
    }

    fn dependency_descriptor() -> TypeDescriptor {
        TypeDescriptor::new(TypeKey::of::<TestDependency>(), cast_dependency)
            .with_constructor(construct_dependency)
    }

    fn bean_descriptor() -> TypeDescriptor {
        TypeDescriptor::new(TypeKey::of::<TestBean>(), cast_bean)
            .with_constructor(construct_bean)
            .with_field(FieldDescriptor {
                name: "dependency",
                declared_type: TypeKey::of::<TestDependency>(),
                is_marked: true,
                assign: |owner, value| {
                    owner
                        .downcast_ref::<TestBean>()
                        .ok_or(SlotError::IncompatibleOwner(TypeKey::of::<TestBean>()))?
                        .dependency
                        .assign(value)
                },
            })
    }

    #[test]
    fn should_build_wired_container() {
        let container =
            Container::new([dependency_descriptor(), bean_descriptor()], &MarkerDrivenPolicy)
                .unwrap();

        assert_eq!(container.len(), 2);
        assert!(!container.is_empty());
        assert!(container.contains::<TestBean>());

        let bean = container.bean::<TestBean>().unwrap();
        let dependency = container.bean::<TestDependency>().unwrap();
        assert!(BeanInstancePtr::ptr_eq(
            bean.dependency.get().unwrap(),
            &dependency
        ));
        assert!(BeanInstancePtr::ptr_eq(
            &bean,
            &container.bean::<TestBean>().unwrap()
        ));
    }

    #[test]
    fn should_build_empty_container() {
        let container = Container::new(Vec::<TypeDescriptor>::new(), &TypeDrivenPolicy).unwrap();
        assert!(container.is_empty());
        assert!(container.beans::<TestBean>().unwrap().is_empty());
    }

    #[test]
    fn should_fail_on_missing_dependency() {
        assert!(matches!(
            Container::new([bean_descriptor()], &MarkerDrivenPolicy).unwrap_err(),
            ContainerError::Injection(InjectionError::UnresolvedDependency {
                source: BeanLookupError::NotFound(_),
                ..
            })
        ));
    }

    #[test]
    fn should_fail_on_missing_constructor() {
        let descriptor = TypeDescriptor::new(TypeKey::of::<TestDependency>(), cast_dependency);

        assert!(matches!(
            Container::new([descriptor, bean_descriptor()], &MarkerDrivenPolicy).unwrap_err(),
            ContainerError::Instantiation(InstantiationError::MissingConstructor(_))
        ));
    }

    #[test]
    fn should_track_failed_state() {
        let mut bootstrap = Bootstrap::default();
        assert_eq!(bootstrap.state, ContainerState::Uninitialized);

        assert!(bootstrap
            .run([bean_descriptor()], &MarkerDrivenPolicy)
            .is_err());
        assert_eq!(bootstrap.state, ContainerState::Failed);
    }

    #[test]
    fn should_track_ready_state() {
        let mut bootstrap = Bootstrap::default();

        assert!(bootstrap
            .run([dependency_descriptor()], &MarkerDrivenPolicy)
            .is_ok());
        assert_eq!(bootstrap.state, ContainerState::Ready);
    }

    #[test]
    fn should_build_from_scanner() {
        let mut scanner = MockTypeScanner::new();
        scanner
            .expect_discover_types()
            .with(eq("app"))
            .times(1)
            .returning(|_| vec![dependency_descriptor(), bean_descriptor()]);

        let container = Container::scan(&scanner, "app", &MarkerDrivenPolicy).unwrap();
        assert!(container
            .bean::<TestBean>()
            .unwrap()
            .dependency
            .is_injected());
    }

    #[test]
    fn should_allow_concurrent_reads() {
        let container =
            Container::new([dependency_descriptor(), bean_descriptor()], &MarkerDrivenPolicy)
                .unwrap();
        let expected = container.bean::<TestDependency>().unwrap();

        thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| container.bean::<TestDependency>().unwrap()))
                .collect();

            for handle in handles {
                assert!(BeanInstancePtr::ptr_eq(&handle.join().unwrap(), &expected));
            }
        });
    }
}
