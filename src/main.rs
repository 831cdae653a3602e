use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use numport::app::{App, Outcome};
use numport::config::Config;
use numport::logging;
use numport::replay;

#[derive(Parser)]
#[command(name = "numport")]
#[command(about = "Terminal intake wizard for porting a mobile number")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Print the collected record as JSON after the wizard closes
    #[arg(long)]
    print_record: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a JSON script of stage actions without a terminal
    Replay {
        /// Script file: an array of `{"next": {...}}` or `"back"` entries
        file: PathBuf,
    },

    /// Show the effective configuration
    Config {
        /// Save it to the user config file instead of printing
        #[arg(short, long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    // The wizard owns the terminal, so it logs to a file
    let interactive = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, interactive, cli.debug)?;

    match cli.command {
        Some(Commands::Replay { file }) => cmd_replay(&file)?,
        Some(Commands::Config { write }) => cmd_config(&config, write)?,
        None => run_tui(config, cli.print_record, logging_handle.log_file_path)?,
    }

    Ok(())
}

fn run_tui(config: Config, print_record: bool, log_file_path: Option<PathBuf>) -> Result<()> {
    if let Some(path) = &log_file_path {
        tracing::debug!(path = %path.display(), "logging to file");
    }

    let outcome = App::new(config).run()?;

    if let Outcome::Aborted { stage, .. } = &outcome {
        eprintln!("Porting request not finished (stopped at step {stage}).");
    }
    if print_record {
        println!(
            "{}",
            serde_json::to_string_pretty(outcome.record()).context("Failed to encode record")?
        );
    }
    if let Some(path) = log_file_path {
        eprintln!("Log written to {}", path.display());
    }
    Ok(())
}

fn cmd_replay(file: &Path) -> Result<()> {
    let actions = replay::load_script(file)?;
    tracing::info!(actions = actions.len(), file = %file.display(), "replaying script");

    match replay::run_script(actions) {
        Ok(report) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to encode replay report")?
            );
            Ok(())
        }
        Err(err) => {
            for transition in &err.completed {
                println!(
                    "{}",
                    serde_json::to_string(transition).context("Failed to encode transition")?
                );
            }
            Err(err).context(format!("Replay of {} stopped", file.display()))
        }
    }
}

fn cmd_config(config: &Config, write: bool) -> Result<()> {
    if !write {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let path = Config::user_config_path().context("Could not determine the user config directory")?;
    config.save(&path)?;
    println!("Configuration written to {}", path.display());
    Ok(())
}
