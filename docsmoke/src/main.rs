//! docsmoke - run the document-database smoke suite from the command line
//!
//! Resolves the connection string (CLI > DOCSMOKE_MONGO_URI > config.toml >
//! compiled default), runs the selected scenarios in order and exits non-zero
//! if any of them fails.

use anyhow::Result;
use clap::Parser;
use docsmoke::{Scenario, SmokeSuite};
use docsmoke_common::config::{redact_uri, SettingsResolver};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "docsmoke", version, about = "Smoke-test a MongoDB deployment")]
struct Args {
    /// Connection string; must select a database, e.g. mongodb://host/h6
    #[arg(long)]
    uri: Option<String>,

    /// Config file (default: ~/.config/docsmoke/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Drop the posts and profiles collections before running
    #[arg(long)]
    reset: bool,

    /// Run only this scenario (repeatable); order is always the suite order
    #[arg(long = "only", value_name = "SCENARIO")]
    only: Vec<Scenario>,

    /// List scenarios and exit
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.list {
        for scenario in Scenario::ALL {
            println!("{:<18} {}", scenario.name(), scenario.description());
        }
        return Ok(());
    }

    let mut settings = SettingsResolver::new()
        .with_cli_uri(args.uri)
        .with_config_path(args.config)
        .resolve()?;
    settings.reset_collections |= args.reset;

    // RUST_LOG overrides the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .init();

    info!(
        "Starting docsmoke v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Endpoint: {}", redact_uri(&settings.mongo_uri));

    let suite = SmokeSuite::new(settings);
    let report = suite.run(&args.only).await?;

    for (scenario, message) in report.failures() {
        error!("FAILED {}: {}", scenario, message);
    }
    println!("{}", report.summary());

    if !report.all_passed() {
        anyhow::bail!("{} scenario(s) failed", report.failed());
    }

    Ok(())
}
