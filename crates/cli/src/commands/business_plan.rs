use anyhow::Result;
use chrono::Local;
use clap::{Args, ValueEnum};
use domain::entities::{BusinessPlanRequest, SectionToggles};

use crate::context::CliContext;
use crate::progress::ProgressType;
use crate::render;

/// Sections that can be left out of the generated plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanSection {
    ExecutiveSummary,
    CompanyDescription,
    MarketAnalysis,
    Organization,
    ProductsServices,
    MarketingSales,
    FinancialProjections,
    Funding,
}

#[derive(Debug, Args)]
pub struct BusinessPlanCommand {
    #[arg(long = "company")]
    pub company_name: String,

    #[arg(long)]
    pub industry: String,

    #[arg(long)]
    pub description: String,

    #[arg(long, default_value = "")]
    pub market_size: String,

    #[arg(long, default_value = "")]
    pub target_market: String,

    #[arg(long, default_value = "")]
    pub competitive_advantage: String,

    #[arg(long, default_value = "")]
    pub revenue_model: String,

    #[arg(long, default_value = "")]
    pub funding_required: String,

    #[arg(long, default_value = "")]
    pub team_size: String,

    #[arg(long, default_value = "")]
    pub timeline: String,

    /// Leave a section out of the prompt (repeatable)
    #[arg(long, value_enum)]
    pub skip: Vec<PlanSection>,

    /// Ask for an appendices section too
    #[arg(long)]
    pub appendices: bool,

    /// Write the plan as a PDF once generated
    #[arg(long)]
    pub export: bool,
}

impl BusinessPlanCommand {
    pub fn request(&self) -> BusinessPlanRequest {
        let mut sections = SectionToggles {
            appendices: self.appendices,
            ..SectionToggles::default()
        };
        for section in &self.skip {
            let toggle = match section {
                PlanSection::ExecutiveSummary => &mut sections.executive_summary,
                PlanSection::CompanyDescription => &mut sections.company_description,
                PlanSection::MarketAnalysis => &mut sections.market_analysis,
                PlanSection::Organization => &mut sections.organization,
                PlanSection::ProductsServices => &mut sections.products_services,
                PlanSection::MarketingSales => &mut sections.marketing_sales,
                PlanSection::FinancialProjections => &mut sections.financial_projections,
                PlanSection::Funding => &mut sections.funding,
            };
            *toggle = false;
        }

        BusinessPlanRequest {
            company_name: self.company_name.clone(),
            industry: self.industry.clone(),
            description: self.description.clone(),
            market_size: self.market_size.clone(),
            target_market: self.target_market.clone(),
            competitive_advantage: self.competitive_advantage.clone(),
            revenue_model: self.revenue_model.clone(),
            funding_required: self.funding_required.clone(),
            team_size: self.team_size.clone(),
            timeline: self.timeline.clone(),
            sections,
        }
    }

    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let session = ctx.session().await?;
        let request = self.request();

        let spinner = ProgressType::Generation.create_spinner("Rédaction du business plan...");
        let result = ctx.app.business_plans.generate(&session, &request).await;
        spinner.finish_and_clear();
        let plan = result?;

        print!("{}", render::business_plan(&plan));

        if self.export {
            let path = ctx
                .app
                .export
                .export_plan(&plan, Local::now().date_naive())?;
            println!(
                "{}",
                render::success(&format!("PDF écrit dans {}", path.display()))
            );
        }
        Ok(())
    }
}
