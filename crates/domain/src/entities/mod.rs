//! Domain Entities - core business objects of Prediktor

mod action_plan;
mod analysis;
mod business_plan;
mod company;
mod health;
mod insights;
mod profile;
mod record;
mod sector;
mod session;

pub use action_plan::{ActionCategory, ActionPlan, TimelinePhase};
pub use analysis::{
    AnalysisDelta, Charts, ComparativeAnalysis, CompetitivePosition, MarketPoint,
    Recommendations, RevenuePoint, TrendPoint,
};
pub use business_plan::{
    BusinessPlanRequest, GeneratedBusinessPlan, PlanMetadata, Section, SectionToggles,
    Subsection,
};
pub use company::{efficiency, profitability, CompanyData};
pub use health::{HealthDetails, HealthScore};
pub use insights::{
    AiScores, Benchmark, BenchmarkIndicator, GrowthProjection, InsightMetadata, InsightReport,
    MonthlyProjection, ObjectiveProbability, OpportunityHighlight, RecommendationHighlight,
    RiskLevel, RiskScore,
};
pub use profile::{
    IndustryCount, ProfileContext, ProfileStats, ProfileUpdate, UserProfile,
    DEFAULT_COMPANY_NAME, DEFAULT_COUNTRY, DEFAULT_CURRENCY, REQUIRED_PROFILE_FIELDS,
};
pub use record::{Collection, StoredRecord};
pub use sector::{KeyMetrics, SectorData};
pub use session::{Credential, Session};
