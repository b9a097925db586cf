//! Application framework based on [sprig_di] dependency injection.
//!
//! Traditional applications start in the `main()` function and often explicitly initialize and
//! pass around various services. With dependency injection in place, application components form
//! a graph wired by the container instead. This crate provides the entrypoint for such
//! applications in the form of [Application](application::Application): it reads
//! [configuration](config::ApplicationConfig), installs logging, scans for beans, builds the
//! [Container](sprig_di::container::Container) and runs all
//! [ApplicationRunners](runner::ApplicationRunner).
//!
//! ```no_run
//! use sprig::application::Application;
//! use sprig::runner::{ApplicationRunner, ErrorPtr};
//! use sprig_di::{capability, Bean};
//!
//! #[derive(Bean)]
//! #[bean(markers = ["service"])]
//! struct HelloRunner;
//!
//! #[capability]
//! impl ApplicationRunner for HelloRunner {
//!     fn run(&self) -> Result<(), ErrorPtr> {
//!         println!("Hello world!");
//!         Ok(())
//!     }
//! }
//!
//! Application::from_environment()
//!     .and_then(|application| application.run())
//!     .expect("error running application");
//! ```

pub mod application;
pub mod config;
pub mod runner;
