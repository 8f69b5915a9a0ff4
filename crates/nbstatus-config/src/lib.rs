//! # nbstatus-config
//!
//! TOML configuration types, loading, and validation for the notebook
//! status widget.

mod defaults;
mod loading;
mod validation;

pub mod errors;
pub mod types;

// Public API re-exports
pub use errors::ConfigError;
pub use loading::{
    load_from_paths, load_hierarchy, merge_configs, project_config_path, user_config_path,
};
pub use types::{
    DisplayConfig, MessagesConfig, SchedulerConfig, StatusConfig, ThresholdConfig, TimezoneChoice,
};
pub use validation::validate_config;

impl StatusConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}
