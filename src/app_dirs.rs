use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "shrinesplit";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", APP_NAME) {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from(format!("{APP_NAME}_config.json"))
        }
    }

    /// Default location for `--log-file` without a path
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join(format!("{APP_NAME}.log")))
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|proj_dirs| proj_dirs.data_local_dir().join(format!("{APP_NAME}.log")))
        }
    }
}
