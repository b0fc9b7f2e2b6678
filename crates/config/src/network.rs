//! Network configuration for contract deployment and tasks.
//!
//! Provides the built-in networks (local development chain and public
//! testnets) and the environment variables they read their endpoint and
//! credentials from.

use serde::{Deserialize, Serialize};

/// Name of the local development network.
pub const LOCAL_NETWORK: &str = "hardhat";

/// Chain ID of the local development network.
pub const LOCAL_CHAIN_ID: u64 = 1337;

/// RPC endpoint used for the local network when none is configured.
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

/// Variable holding the deployer private key shared by all remote networks.
pub const ACCOUNTS_VAR: &str = "ACCOUNT_PK";

/// Prefix of the per-network RPC endpoint variable.
pub const URL_VAR_PREFIX: &str = "NETWORK_ENDPOINT_";

/// A remote network known to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteNetwork {
    pub name: &'static str,
    pub chain_id: u64,
    /// Whether contracts on this network are verified on the block explorer
    pub verify: bool,
}

impl RemoteNetwork {
    /// Goerli testnet.
    pub const fn goerli() -> Self {
        Self {
            name: "goerli",
            chain_id: 5,
            verify: true,
        }
    }

    /// Rinkeby testnet.
    pub const fn rinkeby() -> Self {
        Self {
            name: "rinkeby",
            chain_id: 4,
            verify: true,
        }
    }
}

/// Remote networks configured by default.
pub const REMOTE_NETWORKS: [RemoteNetwork; 2] = [RemoteNetwork::goerli(), RemoteNetwork::rinkeby()];

/// Configuration of a single named network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network name, taken from its key in the network table
    #[serde(skip)]
    pub name: String,
    /// Chain ID
    pub chain_id: u64,
    /// RPC endpoint url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Private keys of the accounts used on this network, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<String>>,
}

impl NetworkConfig {
    /// Local development network configuration.
    pub fn local() -> Self {
        Self {
            name: LOCAL_NETWORK.to_string(),
            chain_id: LOCAL_CHAIN_ID,
            url: None,
            accounts: None,
        }
    }

    /// Remote network configuration with no endpoint or accounts yet.
    pub fn remote(name: impl Into<String>, chain_id: u64) -> Self {
        Self {
            name: name.into(),
            chain_id,
            url: None,
            accounts: None,
        }
    }

    /// Set the RPC endpoint.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the account private keys.
    pub fn with_accounts(mut self, accounts: Vec<String>) -> Self {
        self.accounts = Some(accounts);
        self
    }

    /// Whether this is the local development network, which needs no
    /// endpoint or credentials.
    pub fn is_local(&self) -> bool {
        self.name == LOCAL_NETWORK
    }

    /// Environment variable conventionally holding this network's RPC endpoint.
    pub fn url_var(&self) -> String {
        url_var(&self.name)
    }
}

/// Environment variable holding the RPC endpoint of `network`.
pub fn url_var(network: &str) -> String {
    format!("{URL_VAR_PREFIX}{}", network.to_ascii_uppercase())
}
