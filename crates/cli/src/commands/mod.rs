pub mod account;
pub mod analysis;
pub mod business_plan;
pub mod config;
pub mod export;
pub mod history;
pub mod insights;
pub mod profile;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use account::{LoginCommand, RegisterCommand};
pub use analysis::{ActionPlanCommand, AnalyzeCommand};
pub use business_plan::BusinessPlanCommand;
pub use config::{ConfigCommand, ConfigSubcommand};
pub use export::ExportCommand;
pub use history::HistoryCommand;
pub use insights::InsightsCommand;
pub use profile::{ProfileCommand, ProfileSubcommand};

#[derive(Debug, Parser)]
#[command(name = "prediktor")]
#[command(about = "Prediktor - analyse sectorielle et business plans pour PME")]
#[command(version)]
pub struct Cli {
    /// Configuration file read before the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level, whatever the configuration says
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register(RegisterCommand),
    /// Sign in with an existing account
    Login(LoginCommand),
    /// Sign out of the current session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Compare company figures with their sector
    Analyze(AnalyzeCommand),
    /// Build an action plan from the latest stored analysis
    #[command(name = "action-plan")]
    ActionPlan(ActionPlanCommand),
    /// Generate a business plan
    #[command(name = "business-plan")]
    BusinessPlan(BusinessPlanCommand),
    /// Derive growth and risk insights from the latest analysis
    Insights(InsightsCommand),
    /// List stored analyses, predictions or business plans
    History(HistoryCommand),
    /// Show or edit the user profile
    Profile(ProfileCommand),
    /// Write the latest business plan or analysis as a PDF
    Export(ExportCommand),
    /// Configuration helpers
    Config(ConfigCommand),
}
