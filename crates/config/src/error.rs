use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading a configuration file
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a configuration file
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid compiler version `{version}`: {source}")]
    InvalidCompilerVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("optimizer runs must be greater than zero")]
    InvalidOptimizerRuns,

    #[error("network names must not be empty")]
    EmptyNetworkName,

    /// The requested network is not defined in the configuration
    #[error("unknown network `{0}`")]
    UnknownNetwork(String),
}
