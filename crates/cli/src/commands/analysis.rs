use anyhow::Result;
use clap::Args;
use domain::CompanyData;

use crate::context::CliContext;
use crate::progress::ProgressType;
use crate::render;

/// Company figures for one financial year
#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    #[arg(long)]
    pub year: String,

    /// Annual revenue
    #[arg(long)]
    pub revenue: f64,

    /// Annual expenses
    #[arg(long)]
    pub expenses: f64,

    #[arg(long)]
    pub employees: u32,

    #[arg(long)]
    pub sector: String,

    /// Geographic market
    #[arg(long)]
    pub market: String,

    /// Print the raw JSON result
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ActionPlanCommand {
    /// Print the raw JSON result
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeCommand {
    pub fn company(&self) -> CompanyData {
        CompanyData {
            year: self.year.clone(),
            revenue: self.revenue,
            expenses: self.expenses,
            employees: self.employees,
            sector: self.sector.clone(),
            market: self.market.clone(),
        }
    }

    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let session = ctx.session().await?;
        let company = self.company();

        let spinner = ProgressType::Generation.create_spinner("Analyse du secteur en cours...");
        let result = ctx.app.analysis.run_analysis(&session, &company).await;
        spinner.finish_and_clear();
        let outcome = result?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            print!("{}", render::outcome(&outcome));
        }
        Ok(())
    }
}

impl ActionPlanCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let session = ctx.session().await?;
        let latest = ctx.app.history.latest_analysis(&session).await?;

        let spinner = ProgressType::Generation.create_spinner("Génération du plan d'action...");
        let result = ctx.app.analysis.action_plan(&session, &latest.record).await;
        spinner.finish_and_clear();
        let plan = result?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            print!("{}", render::action_plan(&plan));
        }
        Ok(())
    }
}
