//! Musician management commands for CLI.

use clap::Subcommand;
use escala_core::{Musician, Profile, Role, Slot};
use std::path::PathBuf;

use super::common::open_db;

#[derive(Subcommand)]
pub enum MusicianAction {
    /// Register a musician
    Add {
        /// Full name
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
        /// Role: musician, singer or instrumentalist
        #[arg(long, default_value = "musician")]
        role: String,
        /// Owning church id
        #[arg(long)]
        church: Option<String>,
        /// Instrument tag (repeatable)
        #[arg(long = "instrument")]
        instruments: Vec<String>,
        /// Vocal tag (repeatable)
        #[arg(long = "vocal")]
        vocals: Vec<String>,
        /// Print the created musician as JSON
        #[arg(long)]
        json: bool,
    },
    /// List a church's roster
    List {
        /// Church id
        #[arg(long)]
        church: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add penalty points for a missed commitment
    Penalty {
        /// Musician id
        id: String,
        /// Points to add
        #[arg(long, default_value_t = 1)]
        points: u32,
    },
    /// Record a completed participation
    Participated {
        /// Musician id
        id: String,
    },
    /// Mark a weekly slot available or unavailable
    Availability {
        /// Musician id
        id: String,
        /// Slot identifier (e.g. sabado_manha)
        slot: String,
        /// Mark as unavailable instead of available
        #[arg(long)]
        unavailable: bool,
    },
    /// Show stored availability per slot
    ShowAvailability {
        /// Musician id
        id: String,
    },
}

pub fn run(
    db_path: Option<PathBuf>,
    action: MusicianAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_db(db_path)?;

    match action {
        MusicianAction::Add {
            name,
            email,
            phone,
            role,
            church,
            instruments,
            vocals,
            json,
        } => {
            let role: Role = role.parse()?;
            let mut musician = Musician::new(name, email, role);
            musician.phone = phone;
            musician.church_id = church;
            if !instruments.is_empty() || !vocals.is_empty() {
                musician.profile = Some(Profile {
                    instruments,
                    vocals,
                    total_events: 0,
                });
            }
            db.add_musician(&musician)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&musician)?);
            } else {
                println!("Musician created: {} ({})", musician.name, musician.id);
            }
        }
        MusicianAction::List { church, json } => {
            let roster = db.roster(&church)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&roster)?);
            } else {
                for m in &roster {
                    println!(
                        "{}  {:20} {:15} events={} penalties={}",
                        m.id,
                        m.name,
                        m.role,
                        m.total_events(),
                        m.penalty_points
                    );
                }
            }
        }
        MusicianAction::Penalty { id, points } => {
            db.add_penalty(&id, points)?;
            println!("Penalty recorded for {id} (+{points})");
        }
        MusicianAction::Participated { id } => {
            db.record_participation(&id)?;
            println!("Participation recorded for {id}");
        }
        MusicianAction::Availability {
            id,
            slot,
            unavailable,
        } => {
            let slot: Slot = slot.parse()?;
            let mut musician = db.get_musician(&id)?;
            musician.availability.set(slot, !unavailable);
            db.set_availability(&id, &musician.availability)?;
            let state = if unavailable { "unavailable" } else { "available" };
            println!("{} is now {state} for {slot}", musician.name);
        }
        MusicianAction::ShowAvailability { id } => {
            for (slot, available) in db.availability_of(&id)? {
                let state = if available { "available" } else { "unavailable" };
                println!("{:13} {state}", slot.as_str());
            }
        }
    }

    Ok(())
}
