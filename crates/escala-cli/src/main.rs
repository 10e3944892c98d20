use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "escala-cli", version, about = "Escala CLI")]
struct Cli {
    /// Database file path (defaults to ~/.config/escala/escala.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Musician management
    Musician {
        #[command(subcommand)]
        action: commands::musician::MusicianAction,
    },
    /// Event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Suggest musicians for an event
    Suggest(commands::suggest::SuggestArgs),
    /// Generate a full scale (singers + instrumentalists) for an event
    Scale(commands::scale::ScaleArgs),
    /// Slot classification
    Slot {
        #[command(subcommand)]
        action: commands::slot::SlotAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions { shell: clap_complete::Shell },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Musician { action } => commands::musician::run(cli.db, action),
        Commands::Event { action } => commands::event::run(cli.db, action),
        Commands::Suggest(args) => commands::suggest::run(cli.db, args),
        Commands::Scale(args) => commands::scale::run(cli.db, args),
        Commands::Slot { action } => commands::slot::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "escala-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
