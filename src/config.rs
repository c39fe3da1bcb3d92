use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub session: SessionSettings,
    #[serde(default)]
    pub seed: SeedSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Id the local actor uses for likes and proposals
    #[serde(default = "default_local_user_id")]
    pub local_user_id: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            local_user_id: default_local_user_id(),
        }
    }
}

fn default_local_user_id() -> String { "current-user".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct SeedSettings {
    /// JSON seed file; the mock generator is used when absent
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,
    #[serde(default = "default_profile_count")]
    pub profile_count: usize,
    #[serde(default = "default_match_count")]
    pub match_count: usize,
    #[serde(default = "default_proposal_count")]
    pub proposal_count: usize,
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            file: None,
            rng_seed: default_rng_seed(),
            profile_count: default_profile_count(),
            match_count: default_match_count(),
            proposal_count: default_proposal_count(),
        }
    }
}

fn default_rng_seed() -> u64 { 42 }
fn default_profile_count() -> usize { 20 }
fn default_match_count() -> usize { 5 }
fn default_proposal_count() -> usize { 3 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LUME__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LUME__SESSION__LOCAL_USER_ID -> session.local_user_id
            .add_source(
                Environment::with_prefix("LUME")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("LUME")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Short, unprefixed variables commonly set in `.env`
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(seed_file) = env::var("SEED_FILE") {
        builder = builder.set_override("seed.file", seed_file)?;
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}
