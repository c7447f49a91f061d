use std::path::PathBuf;

/// Settings that can be overridden from the command line.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Swxtch API address, `host[:port]`.
    #[arg(long = "swxtch-host", visible_alias = "host", value_name = "HOST", global = true)]
    pub host: Option<String>,

    /// Request timeout per endpoint, e.g. `10s` or `500ms`.
    #[arg(long, value_name = "DURATION", global = true)]
    pub timeout: Option<String>,

    /// Directory receiving the per-host fetch error logs.
    #[arg(long, value_name = "DIR", global = true)]
    pub error_log_dir: Option<PathBuf>,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for ConfigArgs {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(host) = &self.host {
                cache.insert("host".to_string(), host.clone().into());
            }
            if let Some(timeout) = &self.timeout {
                cache.insert("timeout".to_string(), timeout.clone().into());
            }
            if let Some(directory) = &self.error_log_dir {
                cache.insert(
                    "error_log.directory".to_string(),
                    directory.display().to_string().into(),
                );
            }
            Ok(cache)
        }
    }
}
