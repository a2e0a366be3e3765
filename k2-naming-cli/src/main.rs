use std::path::PathBuf;

use clap::{Parser, Subcommand};
use k2_naming_cli::commands::{check, convert, load, schema};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "k2n", version, about = "k2n - snake-case naming for ORM mappings")]
struct Cli {
    /// Naming configuration file (default: k2-naming.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base strategy override (spring or jpa)
    #[arg(long, global = true)]
    base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert camel-case names
    Convert {
        /// Names to convert (e.g. imageURL)
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the tables, columns and constraints named for a mapping file
    Schema {
        /// YAML file with a list of entity mappings
        mapping: PathBuf,
    },
    /// Report identifiers that exceed a length limit
    Check {
        /// YAML file with a list of entity mappings
        mapping: PathBuf,
        /// Longest identifier accepted
        #[arg(long, default_value_t = 30)]
        max_length: usize,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert { names } => convert::run(&names),
        Commands::Schema { mapping } => load::load_config(cli.config.as_deref(), cli.base.as_deref())
            .and_then(|config| schema::run(&mapping, &config)),
        Commands::Check {
            mapping,
            max_length,
        } => load::load_config(cli.config.as_deref(), cli.base.as_deref())
            .and_then(|config| check::run(&mapping, &config, max_length)),
    };

    if let Err(e) = result {
        eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        std::process::exit(1);
    }
}
