//! HealthScore - overall and per-axis scores of the company

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDetails {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScore {
    pub overall: f64,
    pub profitability: f64,
    pub efficiency: f64,
    pub growth: f64,
    pub market_position: f64,
    pub details: HealthDetails,
}

impl HealthScore {
    /// The four sub-scores with their French labels, in display order
    pub fn sub_scores(&self) -> [(&'static str, f64); 4] {
        [
            ("Rentabilité", self.profitability),
            ("Efficacité", self.efficiency),
            ("Croissance", self.growth),
            ("Position marché", self.market_position),
        ]
    }
}
