mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "nstore",
    version,
    about = "File, title, archive and pack notes in a markdown vault"
)]
struct Cli {
    /// Path to config file (default: ~/.config/notestore/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Profile to use from the config file
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// Create a new note in the store and print its path
    New,

    /// Move notes and assets into the store under generated names
    Move(MoveArgs),

    /// Give notes a level-1 heading named after the file
    Heading(BatchArgs),

    /// Add level-1 headings to the frontmatter aliases
    Aliases(BatchArgs),

    /// Archive a tagged note, or every tagged note in a folder
    Archive(ArchiveArgs),

    /// Copy a note and everything it links to into a pack folder
    Pack(PackArgs),
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Files to move (vault-relative or absolute)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Notes to process (vault-relative or absolute)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ArchiveArgs {
    /// Note or folder to archive
    pub path: PathBuf,

    /// Show what would be archived without moving anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct PackArgs {
    /// Note to pack
    pub path: PathBuf,

    /// List the files without copying them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::New => cmd::new::run(config, profile),
        Commands::Move(args) => cmd::move_cmd::run(config, profile, &args),
        Commands::Heading(args) => cmd::heading::run(config, profile, &args),
        Commands::Aliases(args) => cmd::aliases::run(config, profile, &args),
        Commands::Archive(args) => cmd::archive::run(config, profile, &args),
        Commands::Pack(args) => cmd::pack::run(config, profile, &args),
    }
}
