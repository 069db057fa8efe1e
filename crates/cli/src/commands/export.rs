use anyhow::Result;
use chrono::Local;
use clap::{Args, ValueEnum};

use crate::context::CliContext;
use crate::progress::ProgressType;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Latest stored business plan
    Plan,
    /// Latest stored comparative analysis
    Analysis,
}

#[derive(Debug, Args)]
pub struct ExportCommand {
    #[arg(value_enum)]
    pub kind: ExportKind,
}

impl ExportCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let session = ctx.session().await?;
        let today = Local::now().date_naive();
        let export = &ctx.app.export;

        let spinner = ProgressType::Local.create_spinner("Génération du PDF...");
        let result = match self.kind {
            ExportKind::Plan => export.export_latest_plan(&session, today).await,
            ExportKind::Analysis => export.export_latest_analysis(&session, today).await,
        };
        let path = match result {
            Ok(path) => path,
            Err(e) => {
                spinner.finish_error("Export impossible");
                return Err(e.into());
            }
        };
        spinner.finish_success(&format!("PDF écrit dans {}", path.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_kinds_parse_from_cli_names() {
        assert_eq!(ExportKind::from_str("plan", false), Ok(ExportKind::Plan));
        assert_eq!(
            ExportKind::from_str("analysis", false),
            Ok(ExportKind::Analysis)
        );
        assert!(ExportKind::from_str("pdf", false).is_err());
    }
}
