use chrono::NaiveDate;
use domain::entities::{ComparativeAnalysis, GeneratedBusinessPlan, Session};
use domain::HistoryRepository;
use export::PdfExporter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::instrument;

use super::history_service::{latest_analysis, latest_business_plan};
use crate::ApplicationResult;

/// PDF export of stored or freshly generated documents
pub struct ExportWorkflow {
    history: Arc<dyn HistoryRepository>,
    exporter: PdfExporter,
}

impl ExportWorkflow {
    pub fn new(history: Arc<dyn HistoryRepository>, exporter: PdfExporter) -> Self {
        Self { history, exporter }
    }

    pub fn exporter(&self) -> &PdfExporter {
        &self.exporter
    }

    #[instrument(skip_all, fields(user_id = %session.user_id))]
    pub async fn export_latest_plan(
        &self,
        session: &Session,
        today: NaiveDate,
    ) -> ApplicationResult<PathBuf> {
        let stored = latest_business_plan(self.history.as_ref(), &session.user_id).await?;
        self.export_plan(&stored.record, today)
    }

    #[instrument(skip_all, fields(user_id = %session.user_id))]
    pub async fn export_latest_analysis(
        &self,
        session: &Session,
        today: NaiveDate,
    ) -> ApplicationResult<PathBuf> {
        let stored = latest_analysis(self.history.as_ref(), &session.user_id).await?;
        self.export_analysis(&stored.record, today)
    }

    pub fn export_plan(
        &self,
        plan: &GeneratedBusinessPlan,
        today: NaiveDate,
    ) -> ApplicationResult<PathBuf> {
        Ok(self.exporter.export_business_plan(plan, today)?)
    }

    pub fn export_analysis(
        &self,
        analysis: &ComparativeAnalysis,
        today: NaiveDate,
    ) -> ApplicationResult<PathBuf> {
        Ok(self.exporter.export_analysis(analysis, today)?)
    }
}
