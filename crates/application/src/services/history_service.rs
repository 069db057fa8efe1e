use domain::entities::{
    ComparativeAnalysis, GeneratedBusinessPlan, InsightReport, Session, StoredRecord,
};
use domain::{HistoryRepository, UserId};
use std::sync::Arc;

use crate::{ApplicationError, ApplicationResult};

/// Read side of the per-user history, newest first
pub struct HistoryService {
    history: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    pub async fn analyses(
        &self,
        session: &Session,
    ) -> ApplicationResult<Vec<StoredRecord<ComparativeAnalysis>>> {
        Ok(self.history.get_user_analyses(&session.user_id).await?)
    }

    pub async fn predictions(
        &self,
        session: &Session,
    ) -> ApplicationResult<Vec<StoredRecord<InsightReport>>> {
        Ok(self.history.get_user_predictions(&session.user_id).await?)
    }

    pub async fn business_plans(
        &self,
        session: &Session,
    ) -> ApplicationResult<Vec<StoredRecord<GeneratedBusinessPlan>>> {
        Ok(self.history.get_user_business_plans(&session.user_id).await?)
    }

    pub async fn latest_analysis(
        &self,
        session: &Session,
    ) -> ApplicationResult<StoredRecord<ComparativeAnalysis>> {
        latest_analysis(self.history.as_ref(), &session.user_id).await
    }
}

pub(crate) async fn latest_analysis(
    history: &dyn HistoryRepository,
    user_id: &UserId,
) -> ApplicationResult<StoredRecord<ComparativeAnalysis>> {
    history
        .get_user_analyses(user_id)
        .await?
        .into_iter()
        .next()
        .ok_or(ApplicationError::NoRecentAnalysis)
}

pub(crate) async fn latest_business_plan(
    history: &dyn HistoryRepository,
    user_id: &UserId,
) -> ApplicationResult<StoredRecord<GeneratedBusinessPlan>> {
    history
        .get_user_business_plans(user_id)
        .await?
        .into_iter()
        .next()
        .ok_or(ApplicationError::NoBusinessPlan)
}
