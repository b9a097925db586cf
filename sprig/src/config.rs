//! Framework configuration used by [Application](crate::application::Application) to set up
//! logging, bean discovery and injection.
//!
//! By default, the config is created with opinionated default values, which can then be
//! overwritten by a `sprig.json` file or environment variables prefixed with `SPRIG_`, e.g.
//! `SPRIG_INJECTION_POLICY=type` or `SPRIG_COMPONENT_MARKERS=service,controller`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use sprig_di::injector::{InjectabilityPolicy, MarkerDrivenPolicy, TypeDrivenPolicy};
use sprig_di::scan::{REPOSITORY, SERVICE};

const CONFIG_ENV_PREFIX: &str = "SPRIG";
const LIST_SEPARATOR: &str = ",";
const COMPONENT_MARKERS_KEY: &str = "component_markers";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "sprig.json";

/// Strategy deciding which dependency slots get injected.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectionPolicy {
    /// Inject every slot for which a compatible bean exists.
    Type,
    /// Inject only slots marked with `#[bean(inject)]`.
    #[default]
    Marker,
}

impl InjectionPolicy {
    /// Returns the [InjectabilityPolicy] implementing this strategy.
    pub fn policy(&self) -> &'static dyn InjectabilityPolicy {
        match self {
            Self::Type => &TypeDrivenPolicy,
            Self::Marker => &MarkerDrivenPolicy,
        }
    }
}

/// Framework configuration.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApplicationConfig {
    /// Should a default tracing logger be installed in the scope of the application.
    pub install_tracing_logger: bool,
    /// Which slots get injected.
    pub injection_policy: InjectionPolicy,
    /// Module path prefix to scan for beans. Empty means all linked beans.
    pub scan_namespace: String,
    /// Markers which make a bean discoverable.
    pub component_markers: Vec<String>,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            install_tracing_logger: true,
            injection_policy: InjectionPolicy::default(),
            scan_namespace: String::new(),
            component_markers: vec![SERVICE.to_string(), REPOSITORY.to_string()],
        }
    }
}

impl From<OptionalApplicationConfig> for ApplicationConfig {
    fn from(value: OptionalApplicationConfig) -> Self {
        let default = Self::default();
        Self {
            install_tracing_logger: value
                .install_tracing_logger
                .unwrap_or(default.install_tracing_logger),
            injection_policy: value.injection_policy.unwrap_or(default.injection_policy),
            scan_namespace: value.scan_namespace.unwrap_or(default.scan_namespace),
            component_markers: value
                .component_markers
                .unwrap_or(default.component_markers),
        }
    }
}

impl ApplicationConfig {
    /// Reads the config from [CONFIG_FILE], if present, and `SPRIG_` environment variables.
    pub fn init_from_environment() -> Result<Self, ConfigError> {
        Self::init_from_builder(
            Config::builder()
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(environment()),
        )
    }

    fn init_from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .build()
            .and_then(|config| config.try_deserialize::<OptionalApplicationConfig>())
            .map(|config| config.into())
    }
}

fn environment() -> Environment {
    Environment::with_prefix(CONFIG_ENV_PREFIX)
        .try_parsing(true)
        .list_separator(LIST_SEPARATOR)
        .with_list_parse_key(COMPONENT_MARKERS_KEY)
}

#[derive(Deserialize)]
struct OptionalApplicationConfig {
    install_tracing_logger: Option<bool>,
    injection_policy: Option<InjectionPolicy>,
    scan_namespace: Option<String>,
    component_markers: Option<Vec<String>>,
}
