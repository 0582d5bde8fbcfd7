use std::path::PathBuf;

use clap::Parser;
use notion_sweep::{
    config::SweepConfig,
    credentials::ApiKey,
    notion::NotionClient,
    observability::init_tracing,
    sweep::run_sweep,
};

/// Environment variable that forces dry-run mode.
const DRY_RUN_ENV_VAR: &str = "DRY_RUN";

/// CLI arguments for the Notion sweep job
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Archive Notion database pages matching configured filters",
    long_about = None
)]
struct Args {
    /// Path to the config file (TOML, or legacy JSON with a .json extension)
    #[arg(short, long)]
    config: PathBuf,

    /// Log what would be archived without changing anything
    #[arg(long)]
    dry_run: bool,
}

/// `DRY_RUN` accepts `true`, `1` or `yes` (case-insensitive).
fn env_dry_run() -> bool {
    std::env::var(DRY_RUN_ENV_VAR)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let config = match SweepConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let dry_run = args.dry_run || env_dry_run() || config.dry_run;
    if dry_run {
        tracing::info!("DRY RUN MODE - no pages will be archived");
    }

    let api_key = match ApiKey::from_env() {
        Ok(key) => key,
        Err(e) => {
            tracing::error!(error = %e, "Invalid Notion credentials");
            std::process::exit(1);
        }
    };

    let client = match NotionClient::new(api_key, &config.notion) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create Notion client");
            std::process::exit(1);
        }
    };

    tracing::info!(
        config = %args.config.display(),
        databases = config.databases.len(),
        "Loaded configuration"
    );

    let summary = run_sweep(&client, &config.databases, dry_run, &config.limits).await;
    summary.log(dry_run);

    std::process::exit(summary.exit_code());
}
