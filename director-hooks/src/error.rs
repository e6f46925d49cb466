use director_config::ConfigError;
use director_system::SystemError;

/// Errors raised by hook handlers and the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    #[error("failed to install package {package}: {source}")]
    PackageInstall {
        package: String,
        #[source]
        source: SystemError,
    },

    #[error("hook already registered: {0}")]
    DuplicateRegistration(String),

    #[error("license not accepted after {attempts} attempts")]
    LicenseNotYetAccepted { attempts: u32 },

    #[error("invalid value for {key}: {value}")]
    InvalidSetting { key: String, value: String },

    #[error("render {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    System(#[from] SystemError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, HookError>;
