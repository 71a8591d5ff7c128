use anyhow::Result;
use clap::{Parser, Subcommand};
use passbook_ingest::ExportFormat;
use std::path::PathBuf;

mod config;
mod logging;
mod parse_cmd;
mod state;
mod text_cmd;

#[derive(Parser, Debug)]
#[command(
    name = "passbook",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PASSBOOK_BUILD_SHA"), ")"),
    about = "Turn bank statements (CSV, PDF) into normalized transactions"
)]
struct Cli {
    /// Config file (default: ~/.passbook/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging; repeat for debug and trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one or more statements and print the transactions
    Parse {
        /// CSV or PDF statements
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: json or csv
        #[arg(long, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// JSON table dump to use for the PDF instead of the configured extractor
        #[arg(long)]
        tables: Option<PathBuf>,
    },

    /// Print a document's text and the detected bank
    Text {
        file: PathBuf,

        /// Run OCR when the PDF has no text layer
        #[arg(long)]
        ocr: bool,
    },

    /// Manage ~/.passbook/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a config file with default settings
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    let config_path = config::config_path(cli.config.as_deref())?;

    match cli.command {
        Command::Parse {
            files,
            format,
            output,
            tables,
        } => {
            let cfg = config::load_config(&config_path)?;
            let opts = parse_cmd::ParseOptions {
                files,
                format,
                output,
                tables,
            };
            parse_cmd::run(opts, &cfg).await?;
        }

        Command::Text { file, ocr } => {
            let cfg = config::load_config(&config_path)?;
            text_cmd::run(&file, ocr, &cfg)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&config_path)?,
            ConfigCommand::Show => config::show_config(&config_path)?,
        },
    }

    Ok(())
}
