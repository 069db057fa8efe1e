//! InsightReport - forward-looking figures derived from the latest analysis

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    pub month: String,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    pub current: f64,
    #[serde(rename = "projected12Months")]
    pub projected_12_months: f64,
    pub min_growth: f64,
    pub max_growth: f64,
    #[serde(rename = "evolution12Months")]
    pub evolution_12_months: f64,
    pub monthly_projections: Vec<MonthlyProjection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkIndicator {
    pub indicator: String,
    pub company: f64,
    pub sector: f64,
}

/// Risk level in French, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Bas")]
    Low,
    #[serde(rename = "Modéré")]
    Moderate,
    #[serde(rename = "Élevé")]
    High,
}

impl RiskLevel {
    pub fn from_gap(gap: f64) -> Self {
        if gap > 5.0 {
            RiskLevel::Low
        } else if gap > 0.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Bas",
            RiskLevel::Moderate => "Modéré",
            RiskLevel::High => "Élevé",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub company_growth: f64,
    pub sector_growth: f64,
    pub gap: f64,
    pub risk_level: RiskLevel,
    pub indicators: Vec<BenchmarkIndicator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub value: RiskLevel,
    pub percentage: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveProbability {
    pub value: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationHighlight {
    pub title: String,
    pub description: String,
    /// Expected effect, e.g. `+5% de performance`
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityHighlight {
    pub title: String,
    pub description: String,
    pub potential: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiScores {
    pub risk_score: RiskScore,
    pub objective_probability: ObjectiveProbability,
    pub recommendation: RecommendationHighlight,
    pub opportunity: OpportunityHighlight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightMetadata {
    pub last_analysis_date: String,
    pub company_name: String,
    pub sector: String,
    pub is_demo_data: bool,
}

/// Persisted in the `predictions` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub growth_data: GrowthProjection,
    pub benchmark_data: Benchmark,
    pub ai_scores: AiScores,
    pub metadata: InsightMetadata,
}
