use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid default for {field}: {message}")]
    InvalidDefault { field: &'static str, message: String },

    #[error("Invalid environment override {name}={value}: {message}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        message: String,
    },

    #[error("Admission error: {0}")]
    Admission(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error came from the defaults table rather than a resource.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::InvalidDefault { .. } | Error::InvalidEnv { .. }
        )
    }
}
