//! Sync command: check, persist, emit changed snapshots

use super::{CommandResult, PayloadArgs};
use clap::Args;
use roapid_core::StoreConfig;
use roapid_engine::commands::publish::CollectingPublishSink;
use roapid_engine::commands::sync::{sync_resource, SavePolicy};
use roapid_store::{ChangeDetector, SnapshotStore};
use std::io::Write;

#[derive(Debug, Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,

    /// Skip the save when nothing but the timestamp would change
    #[arg(long)]
    pub only_if_changed: bool,

    /// Print the persisted snapshot to stdout when it changed
    #[arg(long)]
    pub emit: bool,
}

pub fn execute(config: &StoreConfig, args: SyncArgs) -> CommandResult {
    let key = args.payload.key()?;
    let payload = args.payload.read_payload()?;

    let policy = if args.only_if_changed {
        SavePolicy::OnlyIfChanged
    } else {
        SavePolicy::Always
    };

    // Changed snapshots are "published" to stdout after the status line.
    let sink = CollectingPublishSink::new();
    let outcome = sync_resource(
        &ChangeDetector::new(config),
        &SnapshotStore::new(config),
        &key,
        &payload,
        policy,
        &sink,
    )?;

    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "{}",
        if outcome.changed { "changed" } else { "unchanged" }
    )?;
    if args.emit {
        for (_, snapshot) in sink.published() {
            stdout.write_all(&snapshot)?;
            stdout.write_all(b"\n")?;
        }
    }

    tracing::debug!(
        resource_key = key.as_str(),
        saved = outcome.snapshot.is_some(),
        published = outcome.published,
        "Sync finished"
    );
    Ok(())
}
