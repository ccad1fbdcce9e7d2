//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` and overridden by `SPLITBOOK__*` environment
//! variables (e.g. `SPLITBOOK__SERVER__PORT=8080`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
}

/// Balance engine policies. Unset values keep the engine defaults.
#[derive(Debug, Default, Deserialize)]
pub struct Engine {
    /// Seconds after an expense during which a new member still shares it.
    pub join_grace_secs: Option<i64>,
    /// Balances within this many minor units of zero count as settled.
    pub epsilon_minor: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
    #[serde(default)]
    pub engine: Engine,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("SPLITBOOK").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
