use anyhow::Result;
use application::{AppContainer, ApplicationError, UserNotice};
use clap::Parser;
use cli::commands::account;
use cli::{render, Cli, CliContext, Commands, SessionStore};
use common::{init_structured_logging, LoggingConfig};
use infrastructure::config::{ConfigLoader, ConfigValidator};
use infrastructure::paths;
use std::process::ExitCode;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_path(path.clone());
    }
    let (config, sources) = loader.load_with_sources().await?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_structured_logging(LoggingConfig::from_settings(level, config.logging.structured))?;
    debug!(?sources, profile = config.profile.name(), "configuration loaded");

    if let Commands::Config(command) = &cli.command {
        return command.execute(&config).await;
    }

    ConfigValidator::new()
        .validate(&config)
        .map_err(|e| ApplicationError::configuration(e.to_string()))?;
    let ctx = CliContext::new(
        AppContainer::from_config(&config)?,
        SessionStore::new(paths::session_file()),
    );

    match &cli.command {
        Commands::Register(command) => command.execute(&ctx).await,
        Commands::Login(command) => command.execute(&ctx).await,
        Commands::Logout => account::logout(&ctx).await,
        Commands::Whoami => account::whoami(&ctx).await,
        Commands::Analyze(command) => command.execute(&ctx).await,
        Commands::ActionPlan(command) => command.execute(&ctx).await,
        Commands::BusinessPlan(command) => command.execute(&ctx).await,
        Commands::Insights(command) => command.execute(&ctx).await,
        Commands::History(command) => command.execute(&ctx).await,
        Commands::Profile(command) => command.execute(&ctx).await,
        Commands::Export(command) => command.execute(&ctx).await,
        Commands::Config(_) => Ok(()),
    }
}

/// Application errors become their notice; anything else prints as is
fn report(e: &anyhow::Error) {
    match e.downcast_ref::<ApplicationError>() {
        Some(app_error) => {
            error!(category = app_error.category(), error = %app_error, "command failed");
            eprintln!("{}", render::notice(&app_error.notice()));
        }
        None => {
            error!(error = %e, "command failed");
            let notice = UserNotice::new("Erreur", format!("{e:#}"));
            eprintln!("{}", render::notice(&notice));
        }
    }
}
