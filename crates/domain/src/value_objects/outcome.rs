//! AnalysisOutcome - live result or demo substitute

use crate::entities::ComparativeAnalysis;
use serde::{Deserialize, Serialize};

/// Result of a comparative analysis request.
///
/// `Demo` is produced if and only if some step of the generation chain failed
/// and canned data was substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "origin", content = "analysis", rename_all = "lowercase")]
pub enum AnalysisOutcome {
    Live(ComparativeAnalysis),
    Demo(ComparativeAnalysis),
}

impl AnalysisOutcome {
    pub fn is_demo(&self) -> bool {
        matches!(self, AnalysisOutcome::Demo(_))
    }

    pub fn analysis(&self) -> &ComparativeAnalysis {
        match self {
            AnalysisOutcome::Live(analysis) | AnalysisOutcome::Demo(analysis) => analysis,
        }
    }

    pub fn into_analysis(self) -> ComparativeAnalysis {
        match self {
            AnalysisOutcome::Live(analysis) | AnalysisOutcome::Demo(analysis) => analysis,
        }
    }
}
