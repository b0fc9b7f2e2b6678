//! Solidity compiler settings.

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Compiler version used when none is configured.
pub const DEFAULT_SOLC_VERSION: &str = "0.8.4";

/// Optimizer runs used when none are configured.
pub const DEFAULT_OPTIMIZER_RUNS: u32 = 200;

/// Solidity compiler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Semantic version of solc
    pub version: String,
    /// Optimizer settings
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

/// Optimizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub enabled: bool,
    /// Expected number of contract executions the optimizer tunes for
    pub runs: u32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            runs: DEFAULT_OPTIMIZER_RUNS,
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_SOLC_VERSION.to_string(),
            optimizer: OptimizerConfig::default(),
        }
    }
}

impl CompilerConfig {
    /// Check that the version is valid semver and the optimizer runs are positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        semver::Version::parse(&self.version).map_err(|source| {
            ConfigError::InvalidCompilerVersion {
                version: self.version.clone(),
                source,
            }
        })?;

        if self.optimizer.runs == 0 {
            return Err(ConfigError::InvalidOptimizerRuns);
        }

        Ok(())
    }
}
