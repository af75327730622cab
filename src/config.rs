use std::path::PathBuf;

use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "SIGBOOK";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub log_filter: String,
    pub snapshot_path: PathBuf,
}

impl Settings {
    /// Defaults, then the optional `basename` config file (any format `config`
    /// recognises by extension), then `SIGBOOK_*` environment variables.
    pub fn load(basename: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("log_filter", "info")?
            .set_default("snapshot_path", "sigbook-snapshot.json")?
            .add_source(File::with_name(basename).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }
}
