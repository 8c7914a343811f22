//! Change check command

use super::{CommandResult, PayloadArgs};
use clap::Args;
use roapid_core::StoreConfig;
use roapid_store::ChangeDetector;

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,

    /// Exit with status 2 when the payload is unchanged
    #[arg(long)]
    pub exit_code: bool,
}

pub fn execute(config: &StoreConfig, args: CheckArgs) -> CommandResult {
    let key = args.payload.key()?;
    let payload = args.payload.read_payload()?;

    let changed = ChangeDetector::new(config).has_changed(&key, &payload)?;
    println!("{}", if changed { "changed" } else { "unchanged" });

    if args.exit_code && !changed {
        std::process::exit(2);
    }
    Ok(())
}
