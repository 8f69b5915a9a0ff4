//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.nbstatus/config.toml`
//! 3. **Project config** - `./.nbstatus/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::ConfigError;
use crate::types::{DisplayConfig, MessagesConfig, SchedulerConfig, StatusConfig, ThresholdConfig};
use crate::validation::validate_config;

const CONFIG_DIR: &str = ".nbstatus";
const CONFIG_FILE: &str = "config.toml";

/// Path of the user config file, if a home directory can be resolved.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Path of the project config file under `project_root`.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a present file fails to parse or the merged config
/// fails validation. Missing config files are not errors.
pub fn load_hierarchy() -> Result<StatusConfig, ConfigError> {
    let user = user_config_path();
    let project = project_config_path(&std::env::current_dir()?);
    load_from_paths(user.as_deref(), Some(&project))
}

/// Load and merge the user and project config files at explicit paths.
pub fn load_from_paths(
    user: Option<&Path>,
    project: Option<&Path>,
) -> Result<StatusConfig, ConfigError> {
    let mut config = StatusConfig::default();

    for path in [user, project].into_iter().flatten() {
        match load_config_file(path) {
            Ok(file_config) => {
                debug!(event = "config.file_loaded", path = %path.display());
                config = merge_configs(config, file_config);
            }
            Err(ConfigError::IoError { source })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!(event = "config.file_missing", path = %path.display());
            }
            Err(e) => return Err(e),
        }
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
fn load_config_file(path: &Path) -> Result<StatusConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with override_config taking precedence.
///
/// Only fields explicitly set in `override_config` replace base values.
pub fn merge_configs(base: StatusConfig, override_config: StatusConfig) -> StatusConfig {
    StatusConfig {
        thresholds: ThresholdConfig::merge(&base.thresholds, &override_config.thresholds),
        scheduler: SchedulerConfig::merge(&base.scheduler, &override_config.scheduler),
        messages: MessagesConfig::merge(&base.messages, &override_config.messages),
        display: DisplayConfig::merge(&base.display, &override_config.display),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TimezoneChoice;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let config = load_from_paths(Some(&missing), Some(&missing)).unwrap();
        assert_eq!(config, StatusConfig::default());
    }

    #[test]
    fn test_project_overrides_user() {
        let user_dir = tempfile::tempdir().unwrap();
        let project_dir = tempfile::tempdir().unwrap();
        let user = write_config(
            user_dir.path(),
            "[thresholds]\nseconds = 30\nminutes = 50\n\n[display]\ntimezone = \"utc\"\n",
        );
        let project = write_config(project_dir.path(), "[thresholds]\nminutes = 40\n");

        let config = load_from_paths(Some(&user), Some(&project)).unwrap();
        assert_eq!(config.thresholds.seconds(), 30);
        assert_eq!(config.thresholds.minutes(), 40);
        assert_eq!(config.display.timezone(), TimezoneChoice::Utc);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[thresholds\nseconds = ");

        let result = load_from_paths(Some(&path), None);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ConfigParseError { .. }
        ));
    }

    #[test]
    fn test_merged_config_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[thresholds]\nseconds = 0\n");

        let result = load_from_paths(Some(&path), None);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_user_config_path_under_home() {
        let dir = tempfile::tempdir().unwrap();
        temp_env::with_var("HOME", Some(dir.path()), || {
            let path = user_config_path().unwrap();
            assert_eq!(path, dir.path().join(".nbstatus").join("config.toml"));
        });
    }

    #[test]
    fn test_project_config_path() {
        let path = project_config_path(Path::new("/work/nb"));
        assert_eq!(path, PathBuf::from("/work/nb/.nbstatus/config.toml"));
    }
}
