//! ComparativeAnalysis - the company set against its sector benchmark

use serde::{Deserialize, Serialize};

use super::{CompanyData, HealthScore, SectorData};
use crate::value_objects::PositionKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitivePosition {
    pub score: f64,
    pub position: PositionKind,
    pub description: String,
}

/// Recommendations grouped by horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub company: f64,
    pub sector: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub company: f64,
    pub sector: f64,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPoint {
    pub metric: String,
    pub company: f64,
    pub sector: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    pub revenue_comparison: Vec<RevenuePoint>,
    pub profitability_trend: Vec<TrendPoint>,
    pub market_position: Vec<MarketPoint>,
}

/// The part of an analysis produced by the comparative step itself.
///
/// Sector data and health score come from the two earlier calls and are
/// joined in by [`ComparativeAnalysis::assemble`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDelta {
    pub competitive_position: CompetitivePosition,
    pub recommendations: Recommendations,
    pub charts: Charts,
}

/// Full comparative analysis, persisted append-only in the `analyses` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparativeAnalysis {
    pub company_data: CompanyData,
    pub sector_data: SectorData,
    pub health_score: HealthScore,
    pub competitive_position: CompetitivePosition,
    pub recommendations: Recommendations,
    pub charts: Charts,
}

impl ComparativeAnalysis {
    pub fn assemble(
        company_data: CompanyData,
        sector_data: SectorData,
        health_score: HealthScore,
        delta: AnalysisDelta,
    ) -> Self {
        Self {
            company_data,
            sector_data,
            health_score,
            competitive_position: delta.competitive_position,
            recommendations: delta.recommendations,
            charts: delta.charts,
        }
    }

    /// Profitability gap in percentage points between company and sector
    pub fn profitability_gap(&self) -> f64 {
        self.company_data.profitability() - self.sector_data.key_metrics.profitability
    }
}
