//! Top-level configuration and its builder.

use crate::{
    env::{EnvSource, ProcessEnv},
    network::{url_var, ACCOUNTS_VAR, LOCAL_NETWORK, REMOTE_NETWORKS},
    CompilerConfig, ConfigError, NetworkConfig,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};
use tracing::debug;

/// Block-explorer API key shared by all verification-enabled networks.
pub const EXPLORER_API_KEY_VAR: &str = "ETHERSCAN_API_KEY";

/// Overrides the network tasks run against.
pub const NETWORK_VAR: &str = "DEVKIT_NETWORK";

/// Block-explorer API keys, keyed by network name.
///
/// A network whose key is unset has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationConfig {
    #[serde(default)]
    pub api_keys: BTreeMap<String, String>,
}

impl VerificationConfig {
    /// API key for `network`, if configured.
    pub fn api_key(&self, network: &str) -> Option<&str> {
        self.api_keys.get(network).map(String::as_str)
    }
}

/// Complete project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootConfig {
    /// Network to use when none is selected explicitly
    #[serde(default = "default_network")]
    pub default_network: String,
    /// Solidity compiler settings
    #[serde(default)]
    pub compiler: CompilerConfig,
    /// Named networks
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
    /// Contract verification settings
    #[serde(default)]
    pub verification: VerificationConfig,
}

fn default_network() -> String {
    LOCAL_NETWORK.to_string()
}

impl RootConfig {
    /// Load and validate a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&contents)?;

        for (name, network) in &mut config.networks {
            network.name = name.clone();
        }
        config.validate()?;

        Ok(config)
    }

    /// Check compiler settings and network names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compiler.validate()?;

        if self.networks.keys().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::EmptyNetworkName);
        }
        self.network(&self.default_network)?;

        Ok(())
    }

    /// Apply environment overrides on top of a loaded configuration.
    ///
    /// A non-blank [`NETWORK_VAR`] replaces `default_network`. The name is
    /// checked when the network is looked up, as for built configurations.
    pub fn apply_env(&mut self, source: &impl EnvSource) {
        if let Some(network) = non_blank(source, NETWORK_VAR) {
            debug!(network = %network, "Default network overridden by {}", NETWORK_VAR);
            self.default_network = network;
        }
    }

    /// Look up a network by name.
    pub fn network(&self, name: &str) -> Result<&NetworkConfig, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }
}

/// Builds a [`RootConfig`] from environment variables and built-in defaults.
///
/// Missing or blank variables are passed through as absent values. Whether a
/// network is usable is decided when it is first used, not here.
#[derive(Debug, Clone)]
pub struct ConfigBuilder<S> {
    source: S,
    compiler: CompilerConfig,
}

impl ConfigBuilder<ProcessEnv> {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::new(ProcessEnv)
    }
}

impl<S: EnvSource> ConfigBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            compiler: CompilerConfig::default(),
        }
    }

    /// Override the compiler settings.
    pub fn compiler(mut self, compiler: CompilerConfig) -> Self {
        self.compiler = compiler;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> RootConfig {
        let account = self.var(ACCOUNTS_VAR);
        let api_key = self.var(EXPLORER_API_KEY_VAR);

        let mut networks = BTreeMap::new();
        networks.insert(LOCAL_NETWORK.to_string(), NetworkConfig::local());

        let mut verification = VerificationConfig::default();

        for remote in REMOTE_NETWORKS {
            let network = NetworkConfig {
                name: remote.name.to_string(),
                chain_id: remote.chain_id,
                url: self.var(&url_var(remote.name)),
                accounts: account.clone().map(|key| vec![key]),
            };

            debug!(
                network = remote.name,
                has_url = network.url.is_some(),
                has_accounts = network.accounts.is_some(),
                "Configured network"
            );

            if remote.verify {
                if let Some(key) = &api_key {
                    verification
                        .api_keys
                        .insert(remote.name.to_string(), key.clone());
                }
            }

            networks.insert(remote.name.to_string(), network);
        }

        RootConfig {
            default_network: self.var(NETWORK_VAR).unwrap_or_else(default_network),
            compiler: self.compiler,
            networks,
            verification,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        non_blank(&self.source, key)
    }
}

/// Trimmed value of `key`, or `None` when it is unset or blank.
fn non_blank(source: &impl EnvSource, key: &str) -> Option<String> {
    source.var(key).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashMap, io::Write};

    fn source(vars: &[(&str, &str)]) -> HashMap<String, String> {
        vars.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_build_without_environment() {
        let config = ConfigBuilder::new(HashMap::new()).build();

        assert_eq!(config.default_network, "hardhat");
        assert_eq!(config.network("hardhat").unwrap().chain_id, 1337);

        for name in ["goerli", "rinkeby"] {
            let network = config.network(name).unwrap();
            assert_eq!(network.name, name);
            assert_eq!(network.url, None);
            assert_eq!(network.accounts, None);
        }
        assert!(config.verification.api_keys.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_build_with_network_credentials() {
        let config = ConfigBuilder::new(source(&[
            ("NETWORK_ENDPOINT_GOERLI", "https://goerli.example/rpc"),
            ("ACCOUNT_PK", "0xabc"),
        ]))
        .build();

        let goerli = config.network("goerli").unwrap();
        assert_eq!(goerli.chain_id, 5);
        assert_eq!(goerli.url.as_deref(), Some("https://goerli.example/rpc"));
        assert_eq!(goerli.accounts, Some(vec!["0xabc".to_string()]));

        let rinkeby = config.network("rinkeby").unwrap();
        assert_eq!(rinkeby.url, None);
        assert_eq!(rinkeby.accounts, Some(vec!["0xabc".to_string()]));
    }

    #[test]
    fn test_blank_values_are_absent() {
        let config = ConfigBuilder::new(source(&[
            ("NETWORK_ENDPOINT_RINKEBY", "   "),
            ("ACCOUNT_PK", ""),
            ("ETHERSCAN_API_KEY", ""),
        ]))
        .build();

        let rinkeby = config.network("rinkeby").unwrap();
        assert_eq!(rinkeby.url, None);
        assert_eq!(rinkeby.accounts, None);
        assert!(config.verification.api_keys.is_empty());
    }

    #[test]
    fn test_api_key_shared_across_networks() {
        let config = ConfigBuilder::new(source(&[("ETHERSCAN_API_KEY", "KEY123")])).build();

        assert_eq!(config.verification.api_key("goerli"), Some("KEY123"));
        assert_eq!(config.verification.api_key("rinkeby"), Some("KEY123"));
        assert_eq!(config.verification.api_key("hardhat"), None);
    }

    #[test]
    fn test_default_network_override() {
        let config = ConfigBuilder::new(source(&[("DEVKIT_NETWORK", "goerli")])).build();
        assert_eq!(config.default_network, "goerli");
    }

    #[test]
    fn test_optimizer_defaults() {
        let config = ConfigBuilder::new(HashMap::new()).build();
        assert_eq!(config.compiler.version, "0.8.4");
        assert!(config.compiler.optimizer.enabled);
        assert_eq!(config.compiler.optimizer.runs, 200);
    }

    #[test]
    fn test_compiler_override() {
        let compiler = CompilerConfig {
            version: "0.8.20".to_string(),
            ..Default::default()
        };

        let config = ConfigBuilder::new(HashMap::new())
            .compiler(compiler.clone())
            .build();

        assert_eq!(config.compiler, compiler);
        assert_eq!(config.compiler.optimizer.runs, 200);
    }

    #[test]
    fn test_unknown_network() {
        let config = ConfigBuilder::new(HashMap::new()).build();
        assert!(matches!(
            config.network("mainnet"),
            Err(ConfigError::UnknownNetwork(name)) if name == "mainnet"
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
default_network = "sepolia"

[compiler]
version = "0.8.20"

[compiler.optimizer]
enabled = false
runs = 1000

[networks.hardhat]
chain_id = 31337

[networks.sepolia]
chain_id = 11155111
url = "https://sepolia.example"
accounts = ["0x01", "0x02"]

[verification.api_keys]
sepolia = "KEY"
"#
        )
        .unwrap();

        let config = RootConfig::from_file(file.path()).unwrap();

        assert_eq!(config.compiler.version, "0.8.20");
        assert!(!config.compiler.optimizer.enabled);
        assert_eq!(config.compiler.optimizer.runs, 1000);

        let sepolia = config.network(&config.default_network).unwrap();
        assert_eq!(sepolia.name, "sepolia");
        assert_eq!(sepolia.chain_id, 11155111);
        assert_eq!(sepolia.accounts.as_ref().map(Vec::len), Some(2));
        assert!(config.network("hardhat").unwrap().is_local());
        assert_eq!(config.verification.api_key("sepolia"), Some("KEY"));
    }

    #[test]
    fn test_from_file_rejects_bad_compiler() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[compiler]
version = "latest"

[networks.hardhat]
chain_id = 1337
"#
        )
        .unwrap();

        let err = RootConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCompilerVersion { .. }));
    }

    #[test]
    fn test_from_file_requires_default_network() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[networks.goerli]
chain_id = 5
"#
        )
        .unwrap();

        let err = RootConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetwork(name) if name == "hardhat"));
    }

    #[test]
    fn test_env_overrides_file_default_network() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[networks.hardhat]
chain_id = 1337

[networks.goerli]
chain_id = 5
"#
        )
        .unwrap();
        let mut config = RootConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_network, "hardhat");

        config.apply_env(&source(&[("DEVKIT_NETWORK", " ")]));
        assert_eq!(config.default_network, "hardhat");

        config.apply_env(&source(&[("DEVKIT_NETWORK", "goerli")]));
        assert_eq!(config.default_network, "goerli");
        assert_eq!(config.network(&config.default_network).unwrap().chain_id, 5);
    }

    #[test]
    fn test_from_missing_file() {
        let err = RootConfig::from_file("does-not-exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_serialized_config_reloads() {
        let config = ConfigBuilder::new(source(&[
            ("NETWORK_ENDPOINT_GOERLI", "https://goerli.example/rpc"),
            ("ACCOUNT_PK", "0xabc"),
        ]))
        .build();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&config).unwrap().as_bytes())
            .unwrap();

        assert_eq!(RootConfig::from_file(file.path()).unwrap(), config);
    }
}
