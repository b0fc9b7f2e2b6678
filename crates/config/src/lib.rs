//! Configuration types for the devkit task runner.
//!
//! This crate provides:
//! - Compiler settings (solc version, optimizer)
//! - Named network configurations (chain ID, RPC endpoint, accounts)
//! - Block-explorer API keys for contract verification
//! - `.env` loading and configuration building from the environment

pub mod compiler;
pub mod env;
pub mod error;
pub mod network;
pub mod root;

pub use compiler::{CompilerConfig, OptimizerConfig};
pub use env::{load_env_file, load_env_file_from, EnvFile, EnvSource, ProcessEnv};
pub use error::ConfigError;
pub use network::NetworkConfig;
pub use root::{ConfigBuilder, RootConfig, VerificationConfig};
