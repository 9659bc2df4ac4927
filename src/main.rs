//! HyperLayers - hyper key sublayers for Karabiner-Elements
//!
//! Reads a layer spec (TOML, JSON or YAML), validates it and writes the
//! compiled rules into a Karabiner-Elements profile.

use clap::{Parser, Subcommand};
use hyperlayers::cli::{BuildArgs, ConfigArgs, ExitCode, InspectArgs, ValidateArgs};
use hyperlayers::constants::APP_BINARY_NAME;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// HyperLayers - compile hyper key sublayers into Karabiner-Elements rules
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a layer spec and write the Karabiner profile
    Build(BuildArgs),
    /// Validate a layer spec
    Validate(ValidateArgs),
    /// Show sublayers, flags and bindings of a layer spec
    Inspect(InspectArgs),
    /// Show or change the configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::Inspect(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::exit(ExitCode::Success.code()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code().code());
        }
    }
}
