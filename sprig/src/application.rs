//! Core application framework functionality.

use crate::config::ApplicationConfig;
use crate::runner::ApplicationRunnerPtr;
use config::ConfigError;
use derive_more::Constructor;
use sprig_di::container::Container;
use sprig_di::error::{BeanLookupError, ContainerError};
use sprig_di::instance::{BeanInstancePtr, ErrorPtr};
use sprig_di::scan::StaticTypeScanner;
use std::cmp::Reverse;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Error loading configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Error creating container: {0}")]
    Container(#[from] ContainerError),
    #[error("Error retrieving runners: {0}")]
    RunnerLookup(#[from] BeanLookupError),
    #[error("Runner error: {0}")]
    Runner(ErrorPtr),
}

/// Main entrypoint for the application. Bootstraps the [Container] and runs
/// [ApplicationRunners](crate::runner::ApplicationRunner).
#[derive(Constructor, Clone, Debug)]
pub struct Application {
    config: ApplicationConfig,
}

impl Application {
    /// Creates an application configured from the environment. See [crate::config] for details.
    pub fn from_environment() -> Result<Self, ApplicationError> {
        ApplicationConfig::init_from_environment()
            .map(Self::new)
            .map_err(ApplicationError::Config)
    }

    #[inline]
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// Installs logging, if configured, and builds a container out of beans discovered in the
    /// configured namespace.
    pub fn bootstrap(&self) -> Result<Container, ApplicationError> {
        if self.config.install_tracing_logger {
            install_tracing_logger();
        }

        info!(
            namespace = %self.config.scan_namespace,
            policy = ?self.config.injection_policy,
            "Creating container..."
        );

        let scanner = StaticTypeScanner::new(&self.config.component_markers);
        Container::scan(
            &scanner,
            &self.config.scan_namespace,
            self.config.injection_policy.policy(),
        )
        .map_err(ApplicationError::Container)
    }

    /// Bootstraps the container and runs all runners found in it. Returns the container for any
    /// further use.
    pub fn run(&self) -> Result<Container, ApplicationError> {
        let container = self.bootstrap()?;

        info!("Searching for application runners...");

        let runners = container.beans::<ApplicationRunnerPtr>()?;
        run_runners(runners)?;
        Ok(container)
    }
}

fn install_tracing_logger() {
    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        debug!(%error, "Not installing tracing logger.");
    }
}

fn run_runners(
    mut runners: Vec<BeanInstancePtr<ApplicationRunnerPtr>>,
) -> Result<(), ApplicationError> {
    runners.sort_by_key(|runner| Reverse(runner.priority()));

    info!(count = runners.len(), "Running application runners...");

    for runner in &runners {
        runner.run().map_err(ApplicationError::Runner)?;
    }

    Ok(())
}
