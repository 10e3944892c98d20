//! Configuration management commands for CLI.

use clap::Subcommand;
use escala_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Update suggestion caps
    SetCaps {
        /// Generic suggestion cap
        #[arg(long)]
        generic: Option<usize>,
        /// Singers cap for full-scale generation
        #[arg(long)]
        singers: Option<usize>,
        /// Instrumentalists cap for full-scale generation
        #[arg(long)]
        instrumentalists: Option<usize>,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetCaps {
            generic,
            singers,
            instrumentalists,
        } => {
            let mut config = Config::load()?;
            if let Some(cap) = generic {
                config.suggestion.generic_cap = cap;
            }
            if let Some(cap) = singers {
                config.suggestion.singers_cap = cap;
            }
            if let Some(cap) = instrumentalists {
                config.suggestion.instrumentalists_cap = cap;
            }
            config.save()?;
            let caps = config.caps();
            println!(
                "Caps: generic={} singers={} instrumentalists={}",
                caps.generic, caps.singers, caps.instrumentalists
            );
        }
    }

    Ok(())
}
