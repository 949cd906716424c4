//! relevance CLI: Submit Google-Maps reviews to a relevance classifier

use clap::{Parser, Subcommand};
use relevance_engine::{
    example_review_text, ApiClient, Config, ConfigError, Session, API_BASE_ENV, CONFIG_PATH,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Review relevance client with TUI
#[derive(Parser)]
#[command(name = "relevance")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the classification service
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Probe the service and print the model it serves
    Health {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify one review read from a file or stdin
    Predict {
        /// Read the review from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output the raw service response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the example review
    Example,

    /// Write .relevance/config.json with the resolved settings
    Init,
}

/// Filter directives are read from this variable.
const LOG_ENV: &str = "RELEVANCE_LOG";

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();
    let tui = matches!(cli.command, None | Some(Commands::Tui));
    init_tracing(tui);

    let api_base = cli.api_base.as_deref();
    let result = match cli.command {
        None | Some(Commands::Tui) => cmd_tui(api_base),
        Some(Commands::Health { json }) => cmd_health(api_base, json),
        Some(Commands::Predict { file, json }) => cmd_predict(api_base, file.as_deref(), json),
        Some(Commands::Example) => {
            println!("{}", example_review_text());
            Ok(())
        }
        Some(Commands::Init) => cmd_init(api_base),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Install the global subscriber.
///
/// The TUI owns the terminal, so it logs to a file; everything else logs
/// warnings to stderr.
fn init_tracing(tui: bool) {
    let default_level = if tui { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    if tui {
        let log_dir = dirs::data_local_dir()
            .map(|d| d.join("relevance").join("logs"))
            .unwrap_or_else(std::env::temp_dir);
        let log_path = log_dir.join("tui.log");

        match open_log_file(&log_path) {
            Ok(log_file) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(log_file)
                    .with_ansi(false)
                    .init();
            }
            Err(e) => eprintln!("note: logging disabled, cannot open {}: {e}", log_path.display()),
        }
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Create the log file, and its directory if needed.
fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::File::create(path)
}

fn load_config(api_base: Option<&str>) -> Result<Config, ConfigError> {
    let env = std::env::var(API_BASE_ENV).ok();
    Config::resolve(api_base, env.as_deref(), Path::new(CONFIG_PATH))
}

fn runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
    tokio::runtime::Runtime::new()
}

fn cmd_tui(api_base: Option<&str>) -> CliResult {
    let config = load_config(api_base)?;
    runtime()?.block_on(relevance_tui::run_tui(&config))
}

fn cmd_health(api_base: Option<&str>, json: bool) -> CliResult {
    let config = load_config(api_base)?;
    let client = ApiClient::from_config(&config);
    let status = runtime()?.block_on(client.check_health())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Service at {} is up", client.base());
    match status.model.as_deref().filter(|m| !m.is_empty()) {
        Some(model) => println!("  Model: {model}"),
        None => println!("  Model: unknown"),
    }
    Ok(())
}

fn cmd_predict(api_base: Option<&str>, file: Option<&Path>, json: bool) -> CliResult {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let config = load_config(api_base)?;
    let client = ApiClient::from_config(&config);
    let mut session = Session::new();
    runtime()?.block_on(session.submit(&text, &client))?;

    let Some(verdict) = session.conversation().last() else {
        return Ok(());
    };
    let payload = verdict.attachment_pretty().unwrap_or_default();

    if json {
        println!("{payload}");
    } else {
        println!("{}", verdict.text());
        println!();
        println!("{payload}");
    }
    Ok(())
}

fn cmd_init(api_base: Option<&str>) -> CliResult {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    let config = load_config(api_base)?;
    config.save(config_path)?;
    println!("Created {}", config_path.display());
    println!("  API base: {}", config.api_base);
    Ok(())
}
