// note: this example assumes you've analyzed the previous one

use sprig::application::Application;
use sprig::config::{ApplicationConfig, InjectionPolicy};
use sprig::runner::{ApplicationRunner, ErrorPtr};
use sprig_di::instance::Inject;
use sprig_di::{capability, Bean};

mod repositories {
    use sprig_di::Bean;

    #[derive(Bean)]
    #[bean(markers = ["repository"])]
    pub struct MessageRepository {
        #[bean(default = "MessageRepository::default_message")]
        pub message: String,
    }

    impl MessageRepository {
        fn default_message() -> String {
            "Configured!".to_string()
        }
    }
}

#[derive(Bean)]
#[bean(markers = ["controller"])]
struct ConfiguredRunner {
    // no marker needed with the type-driven policy
    repository: Inject<repositories::MessageRepository>,
}

#[capability]
impl ApplicationRunner for ConfiguredRunner {
    fn run(&self) -> Result<(), ErrorPtr> {
        if let Some(repository) = self.repository.get() {
            println!("{}", repository.message);
        }

        Ok(())
    }
}

fn main() {
    // config is usually read from "sprig.json" and SPRIG_* environment variables, e.g.
    // SPRIG_INJECTION_POLICY=type, but it can also be created manually
    let mut config = ApplicationConfig::default();
    config.injection_policy = InjectionPolicy::Type;
    config.component_markers = vec!["controller".to_string(), "repository".to_string()];
    config.scan_namespace = module_path!().to_string();

    let container = Application::new(config)
        .run()
        .expect("error running application");

    // the container stays available after the runners are done
    println!("{} beans created", container.len());
}
