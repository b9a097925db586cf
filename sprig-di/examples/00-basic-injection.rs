use sprig_di::bean::Bean;
use sprig_di::container::Container;
use sprig_di::injector::TypeDrivenPolicy;
use sprig_di::instance::Inject;
use sprig_di::{capability, injectable, Bean};

// this is a trait we would like to use in our bean
#[injectable]
trait TestTrait {
    fn foo(&self);
}

// this is a dependency which implements the above trait and also is a bean
#[derive(Bean)]
struct TestDependency;

// we're telling the container to provide TestDependency when asked for dyn TestTrait
#[capability]
impl TestTrait for TestDependency {
    fn foo(&self) {
        println!("Hello world!");
    }
}

// this is another bean, but with a dependency slot
#[derive(Bean)]
struct TestBean {
    // the container will fill the slot after all beans are created
    dependency: Inject<dyn TestTrait + Send + Sync>,
    // alternatively, you can inject the concrete type
    // dependency: Inject<TestDependency>,
}

impl TestBean {
    fn call_foo(&self) {
        if let Some(dependency) = self.dependency.get() {
            dependency.foo();
        }
    }
}

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // with the type-driven policy, every slot with a matching bean gets injected
    let container = Container::new(
        [TestDependency::descriptor(), TestBean::descriptor()],
        &TypeDrivenPolicy,
    )
    .expect("error creating container");

    let bean = container
        .bean::<TestBean>()
        .expect("error retrieving TestBean");

    // prints "Hello world!"
    bean.call_foo();
}
