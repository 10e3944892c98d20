//! Slot classification commands for CLI.

use clap::Subcommand;
use escala_core::{day_name, EventKind, Slot};

use super::common::parse_datetime;

#[derive(Subcommand)]
pub enum SlotAction {
    /// Classify a timestamp (and optional service kind) into a slot
    Classify {
        /// Date/time, RFC3339 or "YYYY-MM-DD HH:MM"
        at: String,
        /// Service kind (e.g. culto_divino)
        #[arg(long)]
        kind: Option<String>,
    },
    /// List the recurring slot identifiers
    List,
}

pub fn run(action: SlotAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SlotAction::Classify { at, kind } => {
            let when = parse_datetime(&at)?;
            let kind = match kind {
                Some(raw) => Some(raw.parse::<EventKind>()?),
                None => None,
            };
            let slot = Slot::classify(when, kind);
            println!("{} ({})", slot, day_name(when));
        }
        SlotAction::List => {
            for slot in Slot::ALL {
                println!("{}", slot.as_str());
            }
        }
    }

    Ok(())
}
