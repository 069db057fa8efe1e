use async_trait::async_trait;
use domain::entities::{
    Collection, ComparativeAnalysis, GeneratedBusinessPlan, InsightReport, StoredRecord,
};
use domain::{DomainResult, HistoryRepository, UserId};

use crate::store::SqliteStore;

#[async_trait]
impl HistoryRepository for SqliteStore {
    async fn save_analysis(
        &self,
        user_id: &UserId,
        analysis: &ComparativeAnalysis,
    ) -> DomainResult<StoredRecord<ComparativeAnalysis>> {
        Ok(self.append(Collection::Analyses, user_id, analysis)?)
    }

    async fn get_user_analyses(
        &self,
        user_id: &UserId,
    ) -> DomainResult<Vec<StoredRecord<ComparativeAnalysis>>> {
        Ok(self.list(Collection::Analyses, user_id)?)
    }

    async fn save_prediction(
        &self,
        user_id: &UserId,
        prediction: &InsightReport,
    ) -> DomainResult<StoredRecord<InsightReport>> {
        Ok(self.append(Collection::Predictions, user_id, prediction)?)
    }

    async fn get_user_predictions(
        &self,
        user_id: &UserId,
    ) -> DomainResult<Vec<StoredRecord<InsightReport>>> {
        Ok(self.list(Collection::Predictions, user_id)?)
    }

    async fn save_business_plan(
        &self,
        user_id: &UserId,
        plan: &GeneratedBusinessPlan,
    ) -> DomainResult<StoredRecord<GeneratedBusinessPlan>> {
        Ok(self.append(Collection::BusinessPlans, user_id, plan)?)
    }

    async fn get_user_business_plans(
        &self,
        user_id: &UserId,
    ) -> DomainResult<Vec<StoredRecord<GeneratedBusinessPlan>>> {
        Ok(self.list(Collection::BusinessPlans, user_id)?)
    }
}
