// note: this example assumes you've analyzed the previous ones

use sprig::application::Application;
use sprig::runner::{ApplicationRunner, ErrorPtr};
use sprig_di::{capability, Bean};

#[derive(Bean)]
#[bean(markers = ["service"])]
struct PrintHelloRunner;

#[capability]
impl ApplicationRunner for PrintHelloRunner {
    fn run(&self) -> Result<(), ErrorPtr> {
        print!("Hello ");
        Ok(())
    }

    // for ordered execution of application runners, priorities can be used
    fn priority(&self) -> i8 {
        3
    }
}

#[derive(Bean)]
#[bean(markers = ["service"])]
struct PrintWorldRunner;

#[capability]
impl ApplicationRunner for PrintWorldRunner {
    fn run(&self) -> Result<(), ErrorPtr> {
        print!("world");
        Ok(())
    }

    fn priority(&self) -> i8 {
        2
    }
}

#[derive(Bean)]
#[bean(markers = ["service"])]
struct PrintExclamationRunner;

#[capability]
impl ApplicationRunner for PrintExclamationRunner {
    fn run(&self) -> Result<(), ErrorPtr> {
        println!("!");
        Ok(())
    }

    fn priority(&self) -> i8 {
        1
    }
}

fn main() {
    // prints "Hello world!"
    Application::from_environment()
        .and_then(|application| application.run())
        .expect("error running application");
}
