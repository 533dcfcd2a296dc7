//! Terminal entry point for the users and roles admin console.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use admin_console::config::ConsoleSettings;
use admin_console::inbound::cli::{Cli, run};
use admin_console::outbound::rest::RestClient;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::runtime::Builder;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    let Cli {
        api_url,
        log_json,
        command,
    } = Cli::parse();
    init_tracing(log_json);

    let loaded = ConsoleSettings::from_environment()?;
    let settings = ConsoleSettings {
        api_url: api_url.or(loaded.api_url),
        ..loaded
    };
    let base_url = settings.api_url()?;
    debug!(%base_url, timeout = ?settings.request_timeout(), "resolved console settings");
    let client = Arc::new(RestClient::with_timeout(
        base_url,
        settings.request_timeout(),
    )?);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    runtime.block_on(run(command, Arc::clone(&client), client, &mut out))?;
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}
