use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    env,
    path::PathBuf,
};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub config_dir: PathBuf,
}

lazy_static::lazy_static! {
    pub(crate) static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").trim_end_matches("_config").to_uppercase();
    static ref CONFIG_FOLDER: Option<PathBuf> = env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
        .ok()
        .map(PathBuf::from);
}

/// Where `config.yaml` is looked up: `SWXTCH_POLLER_CONFIG`, then the
/// platform config directory, then `./.config`.
pub fn get_config_dir() -> PathBuf {
    CONFIG_FOLDER
        .clone()
        .or_else(|| {
            ProjectDirs::from("io", "swxtch", "swxtch-poller").map(|dirs| dirs.config_local_dir().to_path_buf())
        })
        .unwrap_or_else(|| PathBuf::from(".").join(".config"))
}

#[cfg(test)]
mod test {
    #[test]
    fn project_name_drops_crate_suffix() {
        assert_eq!(super::PROJECT_NAME.as_str(), "SWXTCH_POLLER");
    }
}
