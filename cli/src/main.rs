use anyhow::{Context, Result};
use clap::Parser;
use crudapi_core::config::{DEFAULT_BASE_URL, ENV_BASE_URL};
use crudapi_core::{ClientConfig, CrudClient};
use tracing_subscriber::EnvFilter;

/// Run every CRUD verb once against a remote API.
#[derive(Debug, Parser)]
#[command(name = "crudapi-demo", version)]
struct Cli {
    /// API key sent as the bearer token
    api_key: String,

    /// Base URL, including the trailing slash
    #[arg(long, env = ENV_BASE_URL, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Report request failures and trace every call
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "crudapi_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let config = ClientConfig::new(cli.base_url, cli.api_key).with_debug(cli.debug);
    let client = CrudClient::from_config(config);

    let steps = crudapi_cli::run_demo(&client).context("demo sequence failed")?;
    for step in steps {
        let pretty = serde_json::to_string_pretty(&step.result)?;
        println!("{}: {pretty}\n", step.label);
    }
    Ok(())
}
