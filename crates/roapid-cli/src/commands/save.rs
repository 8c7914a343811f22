//! Snapshot save command

use super::{CommandResult, PayloadArgs};
use clap::Args;
use roapid_core::StoreConfig;
use roapid_store::SnapshotStore;
use std::io::Write;

#[derive(Debug, Args)]
pub struct SaveArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
}

pub fn execute(config: &StoreConfig, args: SaveArgs) -> CommandResult {
    let key = args.payload.key()?;
    let payload = args.payload.read_payload()?;

    let written = SnapshotStore::new(config).save(&key, &payload)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&written)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
