//! Network client for a configured network.
//!
//! Turns a [`NetworkConfig`] into local signers and an RPC provider. This is
//! where a network's endpoint and credentials are first used, so missing
//! values fail here with a [`ClientError::Configuration`].

mod dev_accounts;

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use config::{
    network::{ACCOUNTS_VAR, LOCAL_RPC_URL},
    NetworkConfig,
};
pub use dev_accounts::{dev_signers, DEV_ACCOUNT_COUNT, DEV_MNEMONIC};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Network is missing an endpoint or credentials it needs
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error deriving accounts from a mnemonic
    #[error("Mnemonic error: {0}")]
    Mnemonic(String),
}

/// Source of the signer accounts available on the selected network.
#[async_trait]
pub trait SignerProvider: Send + Sync {
    /// Addresses of the available signers, in configuration order.
    async fn signers(&self) -> Result<Vec<Address>, ClientError>;
}

/// Client for a single configured network.
#[derive(Debug, Clone)]
pub struct NetworkClient {
    name: String,
    chain_id: u64,
    url: reqwest::Url,
    signers: Vec<PrivateKeySigner>,
}

impl NetworkClient {
    /// Validate the network's endpoint and credentials and derive its signers.
    ///
    /// Remote networks need both a url and a non-empty account list. The
    /// local network falls back to [`LOCAL_RPC_URL`] and the development
    /// accounts.
    pub fn connect(network: &NetworkConfig) -> Result<Self, ClientError> {
        let url = match network.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ if network.is_local() => LOCAL_RPC_URL,
            _ => {
                return Err(ClientError::Configuration(format!(
                    "network `{}` has no RPC url; set {}",
                    network.name,
                    network.url_var()
                )))
            }
        };
        let url: reqwest::Url = url
            .parse()
            .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;

        let mut signers = match &network.accounts {
            Some(keys) if !keys.is_empty() || network.is_local() => keys
                .iter()
                .map(String::as_str)
                .map(parse_private_key)
                .collect::<Result<Vec<_>, _>>()?,
            None if network.is_local() => dev_signers(DEV_ACCOUNT_COUNT)?,
            _ => {
                return Err(ClientError::Configuration(format!(
                    "network `{}` has no accounts; set {}",
                    network.name, ACCOUNTS_VAR
                )))
            }
        };

        for signer in &mut signers {
            signer.set_chain_id(Some(network.chain_id));
        }

        debug!(
            network = %network.name,
            chain_id = network.chain_id,
            signers = signers.len(),
            "Connected network client"
        );

        Ok(Self {
            name: network.name.clone(),
            chain_id: network.chain_id,
            url,
            signers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub const fn url(&self) -> &reqwest::Url {
        &self.url
    }

    /// Addresses of the configured signers, in order.
    pub fn addresses(&self) -> Vec<Address> {
        self.signers.iter().map(PrivateKeySigner::address).collect()
    }

    /// Create a provider with wallet signing capability for every signer.
    ///
    /// The first signer is the wallet's default sender. No request is made
    /// until the provider is used.
    pub fn provider(&self) -> Result<impl Provider + Clone, ClientError> {
        let (first, rest) = self.signers.split_first().ok_or_else(|| {
            ClientError::Configuration(format!("network `{}` has no signers", self.name))
        })?;

        let mut wallet = EthereumWallet::from(first.clone());
        for signer in rest {
            wallet.register_signer(signer.clone());
        }

        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.url.clone());

        Ok(provider)
    }
}

#[async_trait]
impl SignerProvider for NetworkClient {
    async fn signers(&self) -> Result<Vec<Address>, ClientError> {
        Ok(self.addresses())
    }
}

fn parse_private_key(key: &str) -> Result<PrivateKeySigner, ClientError> {
    key.trim()
        .parse()
        .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))
}
