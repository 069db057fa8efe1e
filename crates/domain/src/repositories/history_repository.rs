//! HistoryRepository - append-only per-user history

use crate::entities::{ComparativeAnalysis, GeneratedBusinessPlan, InsightReport, StoredRecord};
use crate::errors::DomainResult;
use crate::value_objects::UserId;
use async_trait::async_trait;

/// Write-once history of analyses, predictions and business plans.
///
/// Reads are filtered by owner and return newest first. There is no update
/// or delete.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Append an analysis to the `analyses` collection, returning the stored record
    async fn save_analysis(
        &self,
        user_id: &UserId,
        analysis: &ComparativeAnalysis,
    ) -> DomainResult<StoredRecord<ComparativeAnalysis>>;

    async fn get_user_analyses(
        &self,
        user_id: &UserId,
    ) -> DomainResult<Vec<StoredRecord<ComparativeAnalysis>>>;

    /// Append an insight report to the `predictions` collection
    async fn save_prediction(
        &self,
        user_id: &UserId,
        prediction: &InsightReport,
    ) -> DomainResult<StoredRecord<InsightReport>>;

    async fn get_user_predictions(
        &self,
        user_id: &UserId,
    ) -> DomainResult<Vec<StoredRecord<InsightReport>>>;

    /// Append a plan to the `businessPlans` collection
    async fn save_business_plan(
        &self,
        user_id: &UserId,
        plan: &GeneratedBusinessPlan,
    ) -> DomainResult<StoredRecord<GeneratedBusinessPlan>>;

    async fn get_user_business_plans(
        &self,
        user_id: &UserId,
    ) -> DomainResult<Vec<StoredRecord<GeneratedBusinessPlan>>>;
}
