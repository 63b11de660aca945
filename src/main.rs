//! typed-settings - read and edit flat settings files
//!
//! Run with `typed-settings --help` for usage. To print a value for a script:
//!
//! ```text
//! $ echo `typed-settings get display.cfg HeadPos 1`
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use typed_settings::{
    APP_NAME, Config, SettingsStore, VERSION,
    lookup::{DataIndex, FlatIndex, lookup},
    settings::convert,
};

/// Printed before any `get` failure on stderr
const ERROR_BANNER: &str = "lookup failed: ";

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "Read and edit typed values in flat settings files")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one value (no trailing newline)
    Get {
        /// Settings file
        file: PathBuf,

        /// Setting name
        name: String,

        /// For array values, the element to print
        #[arg(default_value_t = 0)]
        n: usize,
    },

    /// Set a typed value and save the file
    Set {
        /// Settings file (created if missing)
        file: PathBuf,

        /// Setting name
        name: String,

        /// Value text, converted to --kind
        value: String,

        /// Type to store the value as
        #[arg(short, long, value_enum, default_value_t = Kind::String)]
        kind: Kind,
    },

    /// Print a settings file in normalized form
    List {
        /// Settings file
        file: PathBuf,

        /// Print raw values as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Show configuration
    Config {
        /// Initialize config file with defaults
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Int,
    Float,
    String,
    IntVec,
    FloatVec,
    StringVec,
}

fn setup_logging(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_target(false))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter)
            .init();
    }

    Ok(())
}

/// Load `file` into a fresh store, or start empty if it does not exist
fn open_store(config: &Config, file: &Path) -> Result<SettingsStore> {
    let mut store = config.store();
    if file.exists() {
        config.codec().load(file, &mut store)?;
    } else {
        debug!("{:?} does not exist, starting empty", file);
    }
    Ok(store)
}

fn set_value(store: &mut SettingsStore, name: &str, value: &str, kind: Kind) {
    match kind {
        Kind::Int => store.set_int(name, convert::parse_int(value)),
        Kind::Float => store.set_float(name, convert::parse_float(value)),
        Kind::String => store.set_string(name, value),
        Kind::IntVec => store.set_int_vec(name, convert::parse_int_vec(value)),
        Kind::FloatVec => store.set_float_vec(name, convert::parse_float_vec(value)),
        Kind::StringVec => store.set_string_vec(name, convert::parse_string_vec(value)),
    }
}

fn run_get(config: &Config, file: &Path, name: &str, n: usize) -> Result<String> {
    let mut index = FlatIndex::new(config.codec());
    index.load(file, "/")?;
    Ok(lookup(&mut index, name, n)?)
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    });

    setup_logging(cli.debug || config.debug, config.log_file.as_deref())?;

    match cli.command {
        Commands::Get { file, name, n } => match run_get(&config, &file, &name, n) {
            Ok(value) => print!("{}", value),
            Err(e) => {
                eprintln!("{}{}", ERROR_BANNER, e);
                return Ok(ExitCode::FAILURE);
            }
        },

        Commands::Set {
            file,
            name,
            value,
            kind,
        } => {
            let mut store = open_store(&config, &file)?;
            set_value(&mut store, &name, &value, kind);
            config.codec().save(&file, &store)?;
            info!("Saved '{}' to {:?}", name, file);
        }

        Commands::List { file, json } => {
            let store = open_store(&config, &file)?;
            if json {
                let raw: serde_json::Map<String, serde_json::Value> = store
                    .iter()
                    .map(|(name, s)| (name.to_string(), s.raw.clone().into()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&raw)?);
            } else {
                print!("{}", config.codec().to_text(&store));
            }
        }

        Commands::Config { init } => {
            let path = match cli.config {
                Some(path) => path,
                None => Config::config_file_path()?,
            };
            if init {
                config.save_to(&path)?;
                println!("Configuration initialized at {:?}", path);
            } else {
                println!("Configuration:");
                println!("{}", toml::to_string_pretty(&config)?);
                println!("\nConfig file: {:?}", path);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
