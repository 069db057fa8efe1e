//! SectorData - benchmark figures for one sector, produced per analysis

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub profitability: f64,
    pub efficiency: f64,
    pub market_share: f64,
}

/// Sector benchmark. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorData {
    pub sector: String,
    pub average_revenue: f64,
    pub average_expenses: f64,
    pub average_employees: f64,
    pub growth_rate: f64,
    pub market_size: f64,
    pub key_metrics: KeyMetrics,
    pub trends: Vec<String>,
    pub challenges: Vec<String>,
    pub opportunities: Vec<String>,
}

impl SectorData {
    pub fn average_profit(&self) -> f64 {
        self.average_revenue - self.average_expenses
    }

    /// Average revenue per employee across the sector
    pub fn average_efficiency(&self) -> f64 {
        super::company::efficiency(self.average_revenue, self.average_employees)
    }
}
