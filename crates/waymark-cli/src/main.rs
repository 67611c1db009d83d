#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use waymark_core::Config;

#[derive(Parser, Debug)]
#[command(name = "waymark")]
#[command(author, version, about = "Inspect how import specifiers resolve", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory (project root)
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// Path to the resolution config (defaults to waymark.json in the project root)
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Resolve a script or style specifier the way the bundler hook does
    Resolve {
        /// The import specifier (e.g. "@/components/Button")
        specifier: String,

        /// File containing the import
        #[arg(long, value_name = "FILE")]
        importer: Option<PathBuf>,
    },

    /// Show the raw alias candidates for a specifier
    Candidates {
        /// The import specifier
        specifier: String,

        /// Use stylesheet conventions (partials, index files) instead of script ones
        #[arg(long)]
        style: bool,
    },

    /// Run the stylesheet importers on an @import URL
    Import {
        /// The @import URL (e.g. "@/styles/variables" or "json:theme")
        url: String,

        /// Stylesheet containing the @import
        #[arg(long, value_name = "FILE")]
        prev: PathBuf,
    },

    /// List configured aliases and exclusions
    Aliases,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd.clone())
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(config.verbosity, config.json_logs);

    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Resolve {
            specifier,
            importer,
        }) => {
            let span = tracing::info_span!("resolve", cmd = "resolve", cwd = %cwd.display());
            let _guard = span.enter();
            commands::resolve::run(&config, config_path, &specifier, importer.as_deref(), cli.json)
        }
        Some(Commands::Candidates { specifier, style }) => {
            commands::candidates::run(&config, config_path, &specifier, style, cli.json)
        }
        Some(Commands::Import { url, prev }) => {
            let span = tracing::info_span!("import", cmd = "import", cwd = %cwd.display());
            let _guard = span.enter();
            commands::import::run(&config, config_path, &url, &prev, cli.json)
        }
        Some(Commands::Aliases) => commands::aliases::run(&config, config_path, cli.json),
    }
}
