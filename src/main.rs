// TchtPath - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. config.toml loading
// 4. Backend selection and command dispatch

use clap::{Parser, Subcommand};
use serde::Serialize;
use tchtpath::core::prompt::{self, PromptDefaults};
use tchtpath::core::store::PathStore;
use tchtpath::platform;
use tchtpath::platform::config::AppConfig;
use tchtpath::util;
use tchtpath::util::error::Result;

/// TchtPath - install-location manager for the TCHT application suite.
///
/// Stores the suite's install directory in the host's native per-user
/// configuration store (registry on Windows, GSettings/dconf elsewhere)
/// and walks new users through choosing a location.
#[derive(Parser, Debug)]
#[command(name = "tchtpath", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stored install path (exit status 1 when unconfigured).
    Get,

    /// Persist a path without prompting.
    Set {
        /// Install directory to store.
        path: String,
    },

    /// Run the interactive location chooser, even when already configured.
    Setup,

    /// Report the selected backend and the stored path.
    Status {
        /// Emit machine-readable JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Payload for `status`, also serialised for `status --json` so other
/// suite tooling can consume it.
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    backend: &'a str,
    configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    // Config loads before logging so [logging] level can apply; loader
    // warnings are carried forward and logged once tracing is up.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    for warning in &config_warnings {
        tracing::warn!("{warning}");
    }

    tracing::debug!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "TchtPath starting"
    );

    let mut store = PathStore::from_platform();

    let outcome = match cli.command {
        None => run_get_or_prompt(&mut store, &config),
        Some(Command::Get) => run_get(&store),
        Some(Command::Set { ref path }) => run_set(&mut store, path),
        Some(Command::Setup) => run_setup(&mut store, &config),
        Some(Command::Status { json }) => run_status(&store, json),
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Default command: print the configured path, or walk the user through
/// choosing one when the store is empty.
fn run_get_or_prompt(store: &mut PathStore, config: &AppConfig) -> Result<i32> {
    let defaults = PromptDefaults::resolve(config);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let path = store.get_or_prompt(&mut input, &mut output, &defaults)?;
    println!("{}", path.display());
    Ok(0)
}

fn run_get(store: &PathStore) -> Result<i32> {
    match store.get()? {
        Some(path) => {
            println!("{path}");
            Ok(0)
        }
        None => {
            eprintln!("No install path is configured. Run 'tchtpath setup' to choose one.");
            Ok(1)
        }
    }
}

fn run_set(store: &mut PathStore, path: &str) -> Result<i32> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        eprintln!("Error: the install path may not be empty.");
        return Ok(2);
    }
    if trimmed.contains(' ') {
        tracing::warn!(
            path = trimmed,
            "Path contains a space; some suite tooling may break"
        );
    }

    store.set(trimmed)?;
    println!("Install location set to '{trimmed}'.");
    Ok(0)
}

fn run_setup(store: &mut PathStore, config: &AppConfig) -> Result<i32> {
    let defaults = PromptDefaults::resolve(config);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    prompt::run(&mut input, &mut output, store, &defaults)?;
    Ok(0)
}

fn run_status(store: &PathStore, json: bool) -> Result<i32> {
    let path = store.get()?;
    let report = StatusReport {
        backend: store.backend_name(),
        configured: path.is_some(),
        path,
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                tracing::error!(error = %e, "Could not serialise status report");
                return Ok(1);
            }
        }
    } else {
        println!("Backend:    {}", report.backend);
        match &report.path {
            Some(p) => {
                println!("Configured: yes");
                println!("Path:       {p}");
            }
            None => println!("Configured: no"),
        }
    }
    Ok(0)
}
