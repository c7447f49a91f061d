#[macro_use]
extern crate tracing;

mod app_config;
mod args;

use app_config::AppConfig;
pub use app_config::get_config_dir;
pub use args::ConfigArgs;
use color_eyre::Result;
use eyre::{
    eyre,
    Context as _,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};
use strum::{
    Display,
    EnumString,
};

#[derive(Debug, Default, Clone, Copy, Display, EnumString, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ErrorLogKind {
    /// Append to a file named after the polled host.
    #[default]
    File,
    /// Emit `tracing` warnings only.
    Tracing,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorLogConfig {
    #[serde(default)]
    pub kind: ErrorLogKind,
    #[serde(default = "current_dir")]
    pub directory: PathBuf,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten, skip_serializing)]
    pub app_config: AppConfig,
    pub host: String,
    pub timeout: String,
    pub error_log: ErrorLogConfig,
    #[serde(default = "current_dir")]
    pub export_dir: PathBuf,
}

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");
const ENV_PREFIX: &str = "SWXTCH_POLLER";

fn current_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl Config {
    /// Layers, lowest precedence first: built-in defaults, `config.yaml` in
    /// the config directory, `SWXTCH_POLLER__*` environment variables, `args`.
    pub fn new(args: ConfigArgs) -> Result<Self> {
        Self::load(args, &get_config_dir())
    }

    pub fn load(args: ConfigArgs, config_dir: &Path) -> Result<Self> {
        let builder = config::Config::builder()
            .set_default("config_dir", config_dir.display().to_string())?
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml))
            .add_source(
                config::File::from(config_dir.join("config.yaml"))
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .add_source(args);

        let cfg: Self = builder
            .build()?
            .try_deserialize()
            .context("Failed to load configuration")?;
        cfg.validate()?;
        debug!(host = %cfg.host, timeout = %cfg.timeout, error_log = %cfg.error_log.kind, "configuration loaded");

        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&format!("http://{}/", self.host))
            .wrap_err_with(|| format!("Invalid swxtch host {:?}", self.host))?;
        if url.path() != "/" || url.query().is_some() {
            return Err(eyre!("Swxtch host {:?} must not contain a path", self.host));
        }
        self.timeout()?;
        Ok(())
    }

    pub fn timeout(&self) -> Result<Duration> {
        let timeout = humantime::parse_duration(&self.timeout)
            .wrap_err_with(|| format!("Invalid timeout {:?}", self.timeout))?;
        if timeout.is_zero() {
            return Err(eyre!("Timeout must be greater than zero"));
        }
        Ok(timeout)
    }

    pub fn config_dir(&self) -> &Path {
        &self.app_config.config_dir
    }
}
