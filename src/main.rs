use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use alertkeeper::application::config::AppConfig;
use alertkeeper::application::services::alert::AlertService;
use alertkeeper::infrastructure::persistence::sqlite_store::SqliteStore;
use alertkeeper::infrastructure::sync::create_synchronizer;
use alertkeeper::presentation::cli::app::{Cli, Commands};
use alertkeeper::presentation::cli::commands::alert::run_alert;
use alertkeeper::presentation::cli::commands::serve::run_serve;
use alertkeeper::presentation::cli::commands::user::run_user;
use alertkeeper::presentation::http::principal::TrustedHeaderResolver;
use alertkeeper::presentation::http::AppState;

fn print_banner() {
    println!("{}", "━".repeat(40).cyan());
    println!("{}", "  ALERTKEEPER — Alert API".bold().cyan());
    println!("{}", "━".repeat(40).cyan());
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path)?
    } else {
        AppConfig::load()?
    };

    // Manual DI: main.rs is the only place that knows concrete types
    let store = Arc::new(SqliteStore::new(&config.database.path)?);
    let synchronizer = create_synchronizer(&config.sync);
    let superuser = config.superuser().map(str::to_string);
    if superuser.is_none() {
        tracing::warn!("no superuser configured; only alert admins can manage alerts");
    }
    let service = Arc::new(AlertService::new(
        store.clone(),
        store,
        synchronizer,
        superuser,
    ));

    match cli.command {
        Some(Commands::Serve { bind }) => {
            serve(&config, service, bind.as_deref()).await?;
        }
        None => {
            serve(&config, service, None).await?;
        }
        Some(Commands::User { command }) => {
            run_user(&service, command)?;
        }
        Some(Commands::Alert { command }) => {
            run_alert(&service, command).await?;
        }
    }

    Ok(())
}

async fn serve(
    config: &AppConfig,
    service: Arc<AlertService>,
    bind: Option<&str>,
) -> anyhow::Result<()> {
    let resolver = TrustedHeaderResolver::new(&config.server.principal_header).map_err(|e| {
        anyhow::anyhow!(
            "invalid principal header {:?}: {e}",
            config.server.principal_header
        )
    })?;
    print_banner();
    let state = AppState::new(service, Arc::new(resolver));
    run_serve(state, bind.unwrap_or(&config.server.bind)).await
}
