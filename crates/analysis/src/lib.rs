//! Analysis pipeline: prompt construction, response normalization,
//! demo fallback and insights derivation.

pub mod business_plan;
mod errors;
pub mod fallback;
pub mod insights;
pub mod normalizer;
pub mod prompts;
pub mod service;

pub use business_plan::BusinessPlanService;
pub use errors::{AnalysisError, AnalysisResult};
pub use insights::derive_insights;
pub use normalizer::Normalized;
pub use service::AnalysisService;
