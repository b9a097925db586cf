#[cfg(feature = "derive")]
//noinspection DuplicatedCode
mod container_test {
    use sprig_di::bean::Bean;
    use sprig_di::container::Container;
    use sprig_di::descriptor::{TypeDescriptor, TypeKey};
    use sprig_di::error::{BeanLookupError, ContainerError, InjectionError, InstantiationError};
    use sprig_di::injector::{MarkerDrivenPolicy, TypeDrivenPolicy};
    use sprig_di::instance::{BeanInstancePtr, ErrorPtr, Inject};
    use sprig_di::{capability, injectable, Bean};
    use std::fmt::Error;
    use std::sync::Arc;

    #[injectable]
    trait Greeter {
        fn greet(&self) -> String;
    }

    #[injectable]
    trait Farewell {
        fn farewell(&self) -> String;
    }

    type GreeterPtr = dyn Greeter + Send + Sync;

    #[derive(Bean)]
    struct EnglishGreeter;

    #[capability]
    impl Greeter for EnglishGreeter {
        fn greet(&self) -> String {
            "Hello".to_string()
        }
    }

    #[derive(Bean)]
    struct FrenchGreeter;

    #[capability]
    impl Greeter for FrenchGreeter {
        fn greet(&self) -> String {
            "Bonjour".to_string()
        }
    }

    #[capability]
    impl Farewell for FrenchGreeter {
        fn farewell(&self) -> String {
            "Au revoir".to_string()
        }
    }

    #[derive(Bean)]
    struct GermanGreeter;

    #[capability(primary)]
    impl Greeter for GermanGreeter {
        fn greet(&self) -> String {
            "Hallo".to_string()
        }
    }

    #[derive(Bean)]
    struct Greeting {
        #[bean(inject)]
        greeter: Inject<GreeterPtr>,
    }

    #[derive(Bean)]
    struct Dependency;

    #[derive(Bean)]
    #[bean(name = "consumer")]
    struct Consumer {
        #[bean(inject)]
        marked: Inject<Dependency>,
        unmarked: Inject<Dependency>,
        #[bean(default = "default_label")]
        label: String,
        counter: u32,
    }

    fn default_label() -> String {
        "consumer".to_string()
    }

    #[derive(Bean)]
    struct ConcreteConsumer {
        english: Inject<EnglishGreeter>,
    }

    #[derive(Bean)]
    struct TupleConsumer(#[bean(inject)] Inject<Dependency>, u8);

    #[derive(Bean)]
    #[bean(constructor = "ConfiguredBean::new")]
    struct ConfiguredBean {
        value: i32,
    }

    impl ConfiguredBean {
        fn new() -> Result<Self, ErrorPtr> {
            Ok(Self { value: 42 })
        }
    }

    #[derive(Bean)]
    #[bean(constructor = "FailingBean::new")]
    struct FailingBean;

    impl FailingBean {
        fn new() -> Result<Self, ErrorPtr> {
            Err(Arc::new(Error) as ErrorPtr)
        }
    }

    fn cast_greeter(
        instance: sprig_di::instance::BeanInstanceAnyPtr,
    ) -> Result<Box<dyn std::any::Any>, sprig_di::instance::BeanInstanceAnyPtr> {
        Err(instance)
    }

    #[test]
    fn should_describe_derived_bean() {
        let descriptor = Consumer::descriptor();

        assert_eq!(descriptor.type_key, TypeKey::of::<Consumer>());
        assert_eq!(descriptor.name, "consumer");
        assert!(descriptor.constructor.is_some());
        assert_eq!(
            descriptor
                .fields
                .iter()
                .map(|field| (field.name, field.is_marked))
                .collect::<Vec<_>>(),
            [("marked", true), ("unmarked", false)]
        );
        assert!(descriptor.capabilities.is_empty());

        let descriptor = FrenchGreeter::descriptor();
        assert_eq!(descriptor.name, "french_greeter");
        assert!(descriptor.satisfies(&TypeKey::of::<GreeterPtr>()));
        assert!(descriptor.satisfies(&TypeKey::of::<dyn Farewell + Send + Sync>()));
        assert_eq!(descriptor.capabilities.len(), 2);
    }

    #[test]
    fn should_resolve_capability() {
        let container = Container::new(
            [EnglishGreeter::descriptor(), Greeting::descriptor()],
            &MarkerDrivenPolicy,
        )
        .unwrap();

        let greeting = container.bean::<Greeting>().unwrap();
        let greeter = greeting.greeter.get().unwrap();
        assert_eq!(greeter.greet(), "Hello");

        let english = container.bean::<EnglishGreeter>().unwrap();
        assert_eq!(
            BeanInstancePtr::as_ptr(greeter) as *const (),
            BeanInstancePtr::as_ptr(&english) as *const ()
        );
        assert_eq!(container.bean::<GreeterPtr>().unwrap().greet(), "Hello");
    }

    #[test]
    fn should_return_same_instance() {
        let container = Container::new(
            [EnglishGreeter::descriptor(), Greeting::descriptor()],
            &MarkerDrivenPolicy,
        )
        .unwrap();

        assert!(BeanInstancePtr::ptr_eq(
            &container.bean::<Greeting>().unwrap(),
            &container.bean::<Greeting>().unwrap()
        ));
    }

    #[test]
    fn should_inject_only_marked_fields() {
        let container = Container::new(
            [Dependency::descriptor(), Consumer::descriptor()],
            &MarkerDrivenPolicy,
        )
        .unwrap();

        let consumer = container.bean::<Consumer>().unwrap();
        assert!(BeanInstancePtr::ptr_eq(
            consumer.marked.get().unwrap(),
            &container.bean::<Dependency>().unwrap()
        ));
        assert!(!consumer.unmarked.is_injected());
        assert_eq!(consumer.label, "consumer");
        assert_eq!(consumer.counter, 0);
    }

    #[test]
    fn should_inject_all_matching_fields_by_type() {
        let container = Container::new(
            [Dependency::descriptor(), Consumer::descriptor()],
            &TypeDrivenPolicy,
        )
        .unwrap();

        let consumer = container.bean::<Consumer>().unwrap();
        assert!(consumer.marked.is_injected());
        assert!(consumer.unmarked.is_injected());
    }

    #[test]
    fn should_inject_only_compatible_beans() {
        let container = Container::new(
            [
                FrenchGreeter::descriptor(),
                EnglishGreeter::descriptor(),
                ConcreteConsumer::descriptor(),
            ],
            &TypeDrivenPolicy,
        )
        .unwrap();

        let consumer = container.bean::<ConcreteConsumer>().unwrap();
        assert!(BeanInstancePtr::ptr_eq(
            consumer.english.get().unwrap(),
            &container.bean::<EnglishGreeter>().unwrap()
        ));
    }

    #[test]
    fn should_inject_tuple_struct_fields() {
        let container = Container::new(
            [Dependency::descriptor(), TupleConsumer::descriptor()],
            &MarkerDrivenPolicy,
        )
        .unwrap();

        let consumer = container.bean::<TupleConsumer>().unwrap();
        assert!(consumer.0.is_injected());
        assert_eq!(consumer.1, 0);
    }

    #[test]
    fn should_fail_on_missing_dependency() {
        assert!(matches!(
            Container::new([Greeting::descriptor()], &MarkerDrivenPolicy).unwrap_err(),
            ContainerError::Injection(InjectionError::UnresolvedDependency {
                field: "greeter",
                source: BeanLookupError::NotFound(_),
                ..
            })
        ));
    }

    #[test]
    fn should_fail_on_ambiguous_dependency() {
        assert!(matches!(
            Container::new(
                [
                    EnglishGreeter::descriptor(),
                    FrenchGreeter::descriptor(),
                    Greeting::descriptor()
                ],
                &MarkerDrivenPolicy
            )
            .unwrap_err(),
            ContainerError::Injection(InjectionError::UnresolvedDependency {
                source: BeanLookupError::Ambiguous { .. },
                ..
            })
        ));
    }

    #[test]
    fn should_prefer_primary_capability() {
        let container = Container::new(
            [
                EnglishGreeter::descriptor(),
                GermanGreeter::descriptor(),
                Greeting::descriptor(),
            ],
            &MarkerDrivenPolicy,
        )
        .unwrap();

        let greeting = container.bean::<Greeting>().unwrap();
        assert_eq!(greeting.greeter.get().unwrap().greet(), "Hallo");
        assert_eq!(container.beans::<GreeterPtr>().unwrap().len(), 2);
    }

    #[test]
    fn should_fail_without_constructor() {
        let abstract_type = TypeDescriptor::new(TypeKey::of::<GreeterPtr>(), cast_greeter);

        assert!(matches!(
            Container::new(
                [EnglishGreeter::descriptor(), abstract_type],
                &MarkerDrivenPolicy
            )
            .unwrap_err(),
            ContainerError::Instantiation(InstantiationError::MissingConstructor(key))
                if key == TypeKey::of::<GreeterPtr>()
        ));
    }

    #[test]
    fn should_use_custom_constructor() {
        let container =
            Container::new([ConfiguredBean::descriptor()], &MarkerDrivenPolicy).unwrap();
        assert_eq!(container.bean::<ConfiguredBean>().unwrap().value, 42);
    }

    #[test]
    fn should_fail_on_constructor_error() {
        assert!(matches!(
            Container::new([FailingBean::descriptor()], &MarkerDrivenPolicy).unwrap_err(),
            ContainerError::Instantiation(InstantiationError::ConstructorFailed { .. })
        ));
    }
}
