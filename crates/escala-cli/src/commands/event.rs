//! Event management commands for CLI.

use clap::Subcommand;
use escala_core::{Event, EventKind};
use std::path::PathBuf;

use super::common::{open_db, parse_datetime};

#[derive(Subcommand)]
pub enum EventAction {
    /// Create an event
    Add {
        /// Event title
        title: String,
        /// Date/time, RFC3339 or "YYYY-MM-DD HH:MM"
        #[arg(long)]
        at: String,
        /// Service kind (e.g. culto_divino, escola_sabatina)
        #[arg(long)]
        kind: Option<String>,
        /// Owning church id
        #[arg(long)]
        church: Option<String>,
        /// Print the created event as JSON
        #[arg(long)]
        json: bool,
    },
    /// List a church's events
    List {
        /// Church id
        #[arg(long)]
        church: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(
    db_path: Option<PathBuf>,
    action: EventAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_db(db_path)?;

    match action {
        EventAction::Add {
            title,
            at,
            kind,
            church,
            json,
        } => {
            let starts_at = parse_datetime(&at)?;
            let mut event = Event::new(title, starts_at);
            event.church_id = church;
            event.kind = match kind {
                Some(raw) => Some(raw.parse::<EventKind>()?),
                None => None,
            };
            db.add_event(&event)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&event)?);
            } else {
                println!("Event created: {} ({})", event.title, event.id);
            }
        }
        EventAction::List { church, json } => {
            let events = db.list_events(&church)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                for event in &events {
                    let kind = event
                        .kind
                        .map(|k| k.as_str())
                        .unwrap_or("-");
                    println!(
                        "{}  {}  {:25} {kind}",
                        event.id,
                        event.starts_at.format("%Y-%m-%d %H:%M"),
                        event.title
                    );
                }
            }
        }
    }

    Ok(())
}
