use sprig_di::bean::Bean;
use sprig_di::container::Container;
use sprig_di::injector::MarkerDrivenPolicy;
use sprig_di::instance::Inject;
use sprig_di::{capability, injectable, Bean};

#[injectable]
trait Greeter {
    fn greet(&self) -> String;
}

#[derive(Bean)]
struct EnglishGreeter;

#[capability]
impl Greeter for EnglishGreeter {
    fn greet(&self) -> String {
        "Hello".to_string()
    }
}

#[derive(Bean)]
struct PolishGreeter;

// when multiple beans provide the same capability, the primary one is injected
#[capability(primary)]
impl Greeter for PolishGreeter {
    fn greet(&self) -> String {
        "Cześć".to_string()
    }
}

#[derive(Bean)]
struct Greeting {
    // only marked slots are injected with the marker-driven policy
    #[bean(inject)]
    greeter: Inject<dyn Greeter + Send + Sync>,
    // this one stays empty, even though a matching bean exists
    fallback: Inject<EnglishGreeter>,
    // plain fields are initialized when the bean is created
    #[bean(default = "default_name")]
    name: String,
}

fn default_name() -> String {
    "world".to_string()
}

impl Greeting {
    fn message(&self) -> Option<String> {
        self.greeter
            .get()
            .map(|greeter| format!("{} {}!", greeter.greet(), self.name))
    }
}

fn main() {
    let container = Container::new(
        [
            EnglishGreeter::descriptor(),
            PolishGreeter::descriptor(),
            Greeting::descriptor(),
        ],
        &MarkerDrivenPolicy,
    )
    .expect("error creating container");

    let greeting = container
        .bean::<Greeting>()
        .expect("error retrieving Greeting");

    // prints "Cześć world!"
    if let Some(message) = greeting.message() {
        println!("{message}");
    }

    // prints "false"
    println!("{}", greeting.fallback.is_injected());
}
