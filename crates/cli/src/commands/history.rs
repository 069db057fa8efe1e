use anyhow::Result;
use clap::{Args, ValueEnum};
use domain::format::group_thousands;

use crate::context::CliContext;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryKind {
    Analyses,
    Predictions,
    Plans,
}

#[derive(Debug, Args)]
pub struct HistoryCommand {
    #[arg(value_enum)]
    pub kind: HistoryKind,
}

impl HistoryCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let session = ctx.session().await?;
        let history = &ctx.app.history;

        let listing = match self.kind {
            HistoryKind::Analyses => {
                let records = history.analyses(&session).await?;
                render::history(&records, |analysis| {
                    format!(
                        "{} {} : CA {}, santé {:.0}/100",
                        analysis.company_data.sector,
                        analysis.company_data.year,
                        group_thousands(analysis.company_data.revenue),
                        analysis.health_score.overall
                    )
                })
            }
            HistoryKind::Predictions => {
                let records = history.predictions(&session).await?;
                render::history(&records, |report| {
                    format!(
                        "{} : croissance projetée {:.1}%, risque {}",
                        report.metadata.company_name,
                        report.growth_data.projected_12_months,
                        report.benchmark_data.risk_level
                    )
                })
            }
            HistoryKind::Plans => {
                let records = history.business_plans(&session).await?;
                render::history(&records, |plan| {
                    format!(
                        "{} ({})",
                        plan.metadata.company_name, plan.metadata.industry
                    )
                })
            }
        };
        println!("{}", listing.trim_end());
        Ok(())
    }
}
