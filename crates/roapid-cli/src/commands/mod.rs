//! Subcommands and the arguments they share

use clap::Args;
use roapid_core::{ResourceKey, StoreConfig};
use std::io::Read;
use std::path::PathBuf;

pub mod check;
pub mod save;
pub mod sync;

pub type CommandResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Where the store lives
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Store root directory (overrides the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// TOML file with `root = "<dir>"`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl StoreArgs {
    /// Flag beats config file beats the built-in default.
    pub fn resolve(&self) -> CommandResult<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::load(path)?,
            None => StoreConfig::default(),
        };
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        Ok(config)
    }
}

/// The document a subcommand operates on
#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// Resource key, e.g. `users-7.json`
    pub key: String,

    /// Read the payload from this file instead of stdin
    #[arg(long, short)]
    pub input: Option<PathBuf>,
}

impl PayloadArgs {
    pub fn key(&self) -> CommandResult<ResourceKey> {
        Ok(ResourceKey::new(self.key.as_str())?)
    }

    pub fn read_payload(&self) -> CommandResult<Vec<u8>> {
        match &self.input {
            Some(path) => std::fs::read(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e).into()),
            None => {
                let mut buf = Vec::new();
                std::io::stdin().read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }
}
