//! Generic suggestion command for CLI.

use clap::Args;
use escala_core::{suggest_for_event, Config, RequestContext, Role, SuggestionEngine};
use std::path::PathBuf;

use super::common::open_db;

#[derive(Args)]
pub struct SuggestArgs {
    /// Event id
    pub event: String,
    /// Church scope of the caller
    #[arg(long)]
    pub church: String,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(db_path: Option<PathBuf>, args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_db(db_path)?;
    let config = Config::load()?;
    let engine = SuggestionEngine::with_caps(config.caps());
    let ctx = RequestContext::new("cli", Role::Director, Some(args.church));

    let result = suggest_for_event(&ctx, &db, &engine, &args.event)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Slot: {} ({})", result.slot, result.day_name);
        println!(
            "Available: {} of {}",
            result.total_available, result.total_musicians
        );
        for (i, item) in result.suggestions.iter().enumerate() {
            println!(
                "{:2}. {:20} reliability={} penalties={}",
                i + 1,
                item.name,
                item.reliability,
                item.penalty_points
            );
        }
    }

    Ok(())
}
