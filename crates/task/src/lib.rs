//! Named tasks run by the devkit CLI.
//!
//! Tasks are registered under a unique name together with a human-readable
//! description and run on demand against the selected network.

pub mod accounts;

use async_trait::async_trait;
use client::{ClientError, SignerProvider};
use config::NetworkConfig;
use std::{collections::BTreeMap, io::Write};
use thiserror::Error;
use tracing::debug;

pub use accounts::AccountsTask;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("task `{0}` is already registered")]
    Duplicate(String),

    #[error("unknown task `{0}`")]
    Unknown(String),

    /// Failure reported by the network client, passed through unchanged
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Error writing task output
    #[error("failed to write task output: {0}")]
    Output(#[from] std::io::Error),
}

/// Everything a task handler can use while running.
pub struct TaskContext<'a> {
    /// The selected network
    pub network: &'a NetworkConfig,
    /// Signers available on the selected network
    pub signers: &'a dyn SignerProvider,
    /// Output stream for task results
    pub out: &'a mut (dyn Write + Send),
}

/// An asynchronous task handler.
#[async_trait]
pub trait Task: Send + Sync {
    async fn run(&self, ctx: &mut TaskContext<'_>) -> Result<(), TaskError>;
}

struct Registered {
    description: String,
    handler: Box<dyn Task>,
}

/// Registry of named tasks.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Registered>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in tasks.
    pub fn with_builtins() -> Result<Self, TaskError> {
        let mut registry = Self::new();
        registry.register(accounts::NAME, accounts::DESCRIPTION, AccountsTask)?;
        Ok(registry)
    }

    /// Register `handler` under a unique `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl Task + 'static,
    ) -> Result<(), TaskError> {
        let name = name.into();
        if self.tasks.contains_key(&name) {
            return Err(TaskError::Duplicate(name));
        }

        debug!(task = %name, "Registered task");
        self.tasks.insert(
            name,
            Registered {
                description: description.into(),
                handler: Box::new(handler),
            },
        );

        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Registered `(name, description)` pairs, ordered by name.
    pub fn tasks(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tasks
            .iter()
            .map(|(name, task)| (name.as_str(), task.description.as_str()))
    }

    /// Run the task registered as `name`.
    pub async fn run(&self, name: &str, ctx: &mut TaskContext<'_>) -> Result<(), TaskError> {
        let task = self
            .tasks
            .get(name)
            .ok_or_else(|| TaskError::Unknown(name.to_string()))?;

        debug!(task = name, network = %ctx.network.name, "Running task");
        task.handler.run(ctx).await
    }
}
