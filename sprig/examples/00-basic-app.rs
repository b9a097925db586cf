use sprig::application::Application;
use sprig::runner::{ApplicationRunner, ErrorPtr};
use sprig_di::instance::Inject;
use sprig_di::{capability, injectable, Bean};

// this trait is a dependency of our runner
#[injectable]
trait Greeter {
    fn greet(&self) -> String;
}

// beans need one of the configured markers to be discovered - "service" and "repository" by
// default
#[derive(Bean)]
#[bean(markers = ["service"])]
struct WorldGreeter;

#[capability]
impl Greeter for WorldGreeter {
    fn greet(&self) -> String {
        "Hello world!".to_string()
    }
}

// application runners are beans providing the ApplicationRunner capability
#[derive(Bean)]
#[bean(markers = ["service"])]
struct GreetingRunner {
    #[bean(inject)]
    greeter: Inject<dyn Greeter + Send + Sync>,
}

#[capability]
impl ApplicationRunner for GreetingRunner {
    fn run(&self) -> Result<(), ErrorPtr> {
        if let Some(greeter) = self.greeter.get() {
            println!("{}", greeter.greet());
        }

        Ok(())
    }
}

fn main() {
    // create the application from configuration found in the environment, build the container
    // and run all runners
    Application::from_environment()
        .and_then(|application| application.run())
        .expect("error running application");
}
