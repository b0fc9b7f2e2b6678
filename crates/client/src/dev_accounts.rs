//! Development accounts of the local network.

use crate::ClientError;
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};

/// Well-known mnemonic of the local development chain. Never use with real funds.
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// Number of development accounts exposed by the local network.
pub const DEV_ACCOUNT_COUNT: u32 = 20;

/// Derive the first `count` development signers on `m/44'/60'/0'/0/{index}`.
pub fn dev_signers(count: u32) -> Result<Vec<PrivateKeySigner>, ClientError> {
    let builder = MnemonicBuilder::<English>::default().phrase(DEV_MNEMONIC);

    (0..count)
        .map(|index| {
            builder
                .clone()
                .index(index)
                .and_then(|builder| builder.build())
                .map_err(|e| ClientError::Mnemonic(format!("{}", e)))
        })
        .collect()
}
