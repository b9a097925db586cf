use sprig_di::container::Container;
use sprig_di::injector::MarkerDrivenPolicy;
use sprig_di::scan::StaticTypeScanner;

mod app {
    use sprig_di::instance::{ErrorPtr, Inject};
    use sprig_di::{capability, injectable, Bean};

    #[injectable]
    pub trait UserRepository {
        fn count(&self) -> usize;
    }

    // beans carrying component markers can be discovered by a scanner
    #[derive(Bean)]
    #[bean(markers = ["repository"], constructor = "InMemoryUserRepository::new")]
    pub struct InMemoryUserRepository {
        users: Vec<String>,
    }

    impl InMemoryUserRepository {
        fn new() -> Result<Self, ErrorPtr> {
            Ok(Self {
                users: vec!["alice".to_string(), "bob".to_string()],
            })
        }
    }

    #[capability]
    impl UserRepository for InMemoryUserRepository {
        fn count(&self) -> usize {
            self.users.len()
        }
    }

    #[derive(Bean)]
    #[bean(markers = ["service"])]
    pub struct UserService {
        #[bean(inject)]
        repository: Inject<dyn UserRepository + Send + Sync>,
    }

    impl UserService {
        pub fn user_count(&self) -> usize {
            self.repository
                .get()
                .map(|repository| repository.count())
                .unwrap_or_default()
        }
    }
}

fn main() {
    // the default scanner looks for "service" and "repository" markers
    let container = Container::scan(
        &StaticTypeScanner::default(),
        concat!(module_path!(), "::app"),
        &MarkerDrivenPolicy,
    )
    .expect("error creating container");

    let service = container
        .bean::<app::UserService>()
        .expect("error retrieving UserService");

    // prints "2"
    println!("{}", service.user_count());
}
