//! Eager-load settings
//!
//! Applications can load [`EagerLoadConfig`] from `config/config.toml`
//! (section `[eager_load]`) or from `HAS_MANY_MERGED__EAGER_LOAD__*`
//! environment variables using `EagerLoadConfig::load()`.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

const CONFIG_FILE: &str = "config/config.toml";
const ENV_PREFIX: &str = "HAS_MANY_MERGED";

/// What to do when a raw integer column receives a non-integer key value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixedKeyPolicy {
    /// Abort the batch with `TypeComparisonAmbiguity`
    #[default]
    Fail,
    /// Log a warning and use generic membership for that column
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EagerLoadConfig {
    /// Allow raw integer membership predicates on integer identity columns
    #[serde(default = "default_true")]
    pub integer_fast_path: bool,
    #[serde(default)]
    pub mixed_key_policy: MixedKeyPolicy,
    /// Reject batches where one related identity appears under two key tuples
    #[serde(default = "default_true")]
    pub verify_identities: bool,
}

fn default_true() -> bool {
    true
}

impl Default for EagerLoadConfig {
    fn default() -> Self {
        Self {
            integer_fast_path: true,
            mixed_key_policy: MixedKeyPolicy::default(),
            verify_identities: true,
        }
    }
}

impl EagerLoadConfig {
    /// Load the settings from `config/config.toml`, falling back to env vars.
    ///
    /// A missing `[eager_load]` section yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                if std::path::Path::new(CONFIG_FILE).exists() {
                    log::warn!(
                        "failed to load {}, falling back to environment: {}",
                        CONFIG_FILE,
                        err
                    );
                }
                Config::builder()
                    .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {}, then env-only error: {}",
                            err, env_err
                        ))
                    })?
            }
        };

        Self::from_settings(&settings)
    }

    /// Parse the `[eager_load]` section of a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Config) -> Result<Self, ConfigError> {
        match settings.get::<EagerLoadConfig>("eager_load") {
            Ok(cfg) => Ok(cfg),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(ConfigError::Message(format!(
                "Eager load configuration is invalid: {}",
                e
            ))),
        }
    }
}
