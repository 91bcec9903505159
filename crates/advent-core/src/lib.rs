pub mod app_config;
pub mod config;
pub mod store;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, parse_duration};
pub use store::{Store, StoreProfile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("unknown store \"{0}\" (valid options: galaxus, digitec)")]
    UnknownStore(String),
}
