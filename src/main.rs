//! docagent CLI - generate, read and convert documents

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docagent_lib::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "docagent")]
#[command(version)]
#[command(about = "Generate text with a hosted model and save it as TXT, DOCX or PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate content from a prompt and print or save it
    Generate(commands::generate::GenerateArgs),

    /// Read the text of a TXT, DOCX or PDF file
    Read {
        /// File to read
        input: PathBuf,

        /// Save the extracted text into another file (format from extension)
        #[arg(long)]
        save_as: Option<PathBuf>,
    },

    /// Convert between document formats
    Convert {
        /// Source file
        input: PathBuf,

        /// Destination file
        output: PathBuf,

        /// Conversion kind (docx-to-pdf, pdf-to-txt, pdf-to-docx); inferred from extensions when omitted
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show resolved configuration (API key redacted)
    Show,

    /// Show config file path
    Path,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stderr);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Generate(args) => commands::generate::run(&config, &args),
        Commands::Read { input, save_as } => commands::read::run(&config, &input, save_as.as_deref()),
        Commands::Convert { input, output, kind } => {
            commands::convert::run(&input, &output, kind.as_deref())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::show_path(cli.config.as_deref()),
        },
    }
}
