use config::{Config, ConfigError, Environment, File};
use infrastructure::{HttpServerConfig, MonitoringConfig};
use serde::Deserialize;

use crate::adapter::nest::Nest;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub http_server: HttpServerConfig,
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub nest: Nest,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config.toml").required(false))
            .add_source(environment());

        let s = builder.build()?;
        s.try_deserialize()
    }
}

/// `NEST_AWAY_NEST__URL` overrides `nest.url`.
fn environment() -> Environment {
    Environment::with_prefix("NEST_AWAY")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
