// # ddnsd - DDNS Daemon
//
// Thin integration layer: parses the command line, sets up logging, loads the
// configuration against the built-in plugins and holds the provider registry
// until shutdown.
//
// The daemon is responsible for:
// 1. Parsing command-line options
// 2. Initializing tracing
// 3. Registering the built-in plugins
// 4. Loading and validating the configuration file
// 5. Releasing every provider record on shutdown
//
// ## Example
//
// ```bash
// ddnsd --config /etc/ddnsd.toml --iface eth0
// ddnsd --config /etc/ddnsd.toml --check-config
// DDNS_LOG_LEVEL=debug ddnsd --dump
// ```

use anyhow::{Context, Result};
use clap::Parser;
use ddns_config::{ConfigLoader, GlobalConfig, LoadedConfig, Overrides, ProviderRecord};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Configuration file used when `--config` is not given
const DEFAULT_CONFIG_FILE: &str = "/etc/ddnsd.toml";

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// ddnsd - keeps DNS records pointed at a dynamic address.
#[derive(Parser, Debug)]
#[command(name = "ddnsd", version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short = 'f', long = "config", value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Network interface to read the address from, overrides `iface`
    #[arg(short, long, value_name = "IFNAME")]
    iface: Option<String>,

    /// Run a single update iteration
    #[arg(short = '1', long)]
    once: bool,

    /// Load and validate the configuration, then exit
    #[arg(long)]
    check_config: bool,

    /// Print the loaded configuration as JSON, then exit
    #[arg(long, conflicts_with = "check_config")]
    dump: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DDNS_LOG_LEVEL", default_value = "info")]
    log_level: Level,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            iface: self.iface.clone(),
            once: self.once,
        }
    }
}

/// JSON view of a loaded configuration, credentials without secrets
#[derive(Serialize)]
struct Dump<'a> {
    global: &'a GlobalConfig,
    providers: Vec<&'a ProviderRecord>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(cli.log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    info!("Starting ddnsd daemon");

    let plugins = ddns_plugins::default_registry();
    let loaded = match ConfigLoader::new(&plugins)
        .with_overrides(cli.overrides())
        .load_file(&cli.config)
    {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Configuration error: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    if cli.check_config {
        info!(
            "Configuration {} is valid: {} provider(s)",
            cli.config.display(),
            loaded.providers.len()
        );
        return DdnsExitCode::CleanShutdown.into();
    }

    if cli.dump {
        return match dump(&loaded) {
            Ok(json) => {
                println!("{}", json);
                DdnsExitCode::CleanShutdown.into()
            }
            Err(e) => {
                error!("Failed to dump configuration: {:#}", e);
                DdnsExitCode::RuntimeError.into()
            }
        };
    }

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(loaded).await {
            error!("Daemon error: {:#}", e);
            DdnsExitCode::RuntimeError
        } else {
            DdnsExitCode::CleanShutdown
        }
    });

    result.into()
}

fn dump(loaded: &LoadedConfig) -> Result<String> {
    let view = Dump {
        global: &loaded.global,
        providers: loaded.providers.iter().collect(),
    };
    serde_json::to_string_pretty(&view).context("Failed to serialize configuration")
}

/// Run the daemon
async fn run_daemon(mut loaded: LoadedConfig) -> Result<()> {
    for record in loaded.providers.iter_mut() {
        ddns_config::http::encode_credentials(record.credentials_mut());
        info!(
            "Provider {}: {} hostname(s) via {}",
            record.name(),
            record.hostnames().len(),
            record.update()
        );
    }

    info!(
        "Daemon initialized, update period {}s, {}",
        loaded.global.update_period_secs,
        if loaded.global.runs_forever() {
            "running until stopped".to_string()
        } else {
            format!("{} iteration(s)", loaded.global.total_iterations)
        }
    );

    let signal = wait_for_shutdown().await?;
    info!("Received shutdown signal: {}", signal);

    let released = loaded.providers.destroy_all();
    info!("Shutting down daemon, released {} provider(s)", released);

    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to setup SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to setup SIGINT handler")?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to wait for CTRL-C")?;
    Ok("SIGINT")
}
