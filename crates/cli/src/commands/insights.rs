use anyhow::Result;
use chrono::Utc;
use clap::Args;

use crate::context::CliContext;
use crate::render;

#[derive(Debug, Args)]
pub struct InsightsCommand {
    /// Print the raw JSON report
    #[arg(long)]
    pub json: bool,
}

impl InsightsCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let session = ctx.session().await?;
        let report = ctx.app.insights.generate(&session, Utc::now()).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render::insights(&report));
        }
        Ok(())
    }
}
