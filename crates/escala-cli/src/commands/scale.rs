//! Full-scale generation command for CLI.

use clap::Args;
use escala_core::{scale_for_event, Config, RequestContext, Role, SuggestionEngine, SuggestionItem};
use std::path::PathBuf;

use super::common::open_db;

#[derive(Args)]
pub struct ScaleArgs {
    /// Event id
    pub event: String,
    /// Church scope of the caller
    #[arg(long)]
    pub church: String,
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(db_path: Option<PathBuf>, args: ScaleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db = open_db(db_path)?;
    let config = Config::load()?;
    let engine = SuggestionEngine::with_caps(config.caps());
    let ctx = RequestContext::new("cli", Role::Director, Some(args.church));

    let plan = scale_for_event(&ctx, &db, &engine, &args.event)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("Slot: {} ({})", plan.slot, plan.day_name);
        println!(
            "Available: {} of {} ({} unavailable)",
            plan.total_available, plan.total_musicians, plan.unavailable_count
        );
        print_section("Singers", &plan.singers);
        print_section("Instrumentalists", &plan.instrumentalists);
    }

    Ok(())
}

fn print_section(title: &str, items: &[SuggestionItem]) {
    println!("{title}:");
    if items.is_empty() {
        println!("  (none)");
        return;
    }
    for item in items {
        let tags: Vec<&str> = item
            .instruments
            .iter()
            .chain(item.vocals.iter())
            .map(String::as_str)
            .collect();
        println!(
            "  {:20} reliability={} [{}]",
            item.name,
            item.reliability,
            tags.join(", ")
        );
    }
}
