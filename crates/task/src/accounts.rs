//! Task printing the signer accounts of the selected network.

use crate::{Task, TaskContext, TaskError};
use async_trait::async_trait;
use tracing::debug;

pub const NAME: &str = "accounts";
pub const DESCRIPTION: &str = "Prints the list of accounts";

/// Writes each available signer address on its own line, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountsTask;

#[async_trait]
impl Task for AccountsTask {
    async fn run(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let accounts = ctx.signers.signers().await?;
        debug!(
            network = %ctx.network.name,
            count = accounts.len(),
            "Enumerated signers"
        );

        for account in accounts {
            writeln!(ctx.out, "{account}")?;
        }

        Ok(())
    }
}
