//! Business plan request and generated document

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Which sections the user asked for. Serialized under the request's `sections` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionToggles {
    pub executive_summary: bool,
    pub company_description: bool,
    pub market_analysis: bool,
    pub organization: bool,
    pub products_services: bool,
    pub marketing_sales: bool,
    pub financial_projections: bool,
    pub funding: bool,
    pub appendices: bool,
}

impl Default for SectionToggles {
    fn default() -> Self {
        Self {
            executive_summary: true,
            company_description: true,
            market_analysis: true,
            organization: true,
            products_services: true,
            marketing_sales: true,
            financial_projections: true,
            funding: true,
            appendices: false,
        }
    }
}

impl SectionToggles {
    /// Keys of the enabled sections, in document order
    pub fn selected(&self) -> Vec<&'static str> {
        [
            ("executiveSummary", self.executive_summary),
            ("companyDescription", self.company_description),
            ("marketAnalysis", self.market_analysis),
            ("organization", self.organization),
            ("productsServices", self.products_services),
            ("marketingSales", self.marketing_sales),
            ("financialProjections", self.financial_projections),
            ("funding", self.funding),
            ("appendices", self.appendices),
        ]
        .into_iter()
        .filter_map(|(key, enabled)| enabled.then_some(key))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPlanRequest {
    pub company_name: String,
    pub industry: String,
    pub description: String,
    pub market_size: String,
    pub target_market: String,
    pub competitive_advantage: String,
    pub revenue_model: String,
    pub funding_required: String,
    pub team_size: String,
    pub timeline: String,
    #[serde(default)]
    pub sections: SectionToggles,
}

impl BusinessPlanRequest {
    /// Company name, industry and description are required; the rest may be blank
    pub fn validate(&self) -> DomainResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(DomainError::MissingField("companyName".to_string()));
        }
        if self.industry.trim().is_empty() {
            return Err(DomainError::MissingField("industry".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::MissingField("description".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsections: Option<Vec<Subsection>>,
}

impl Section {
    pub fn subsections(&self) -> &[Subsection] {
        self.subsections.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    pub generated_at: String,
    pub company_name: String,
    pub industry: String,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBusinessPlan {
    pub executive_summary: Section,
    pub company_description: Section,
    pub market_analysis: Section,
    pub organization: Section,
    pub products_services: Section,
    pub marketing_sales: Section,
    pub financial_projections: Section,
    pub funding: Section,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appendices: Option<Section>,
    pub metadata: PlanMetadata,
}

impl GeneratedBusinessPlan {
    /// Sections in reading order, appendices last when present
    pub fn sections(&self) -> Vec<&Section> {
        let mut sections = vec![
            &self.executive_summary,
            &self.company_description,
            &self.market_analysis,
            &self.organization,
            &self.products_services,
            &self.marketing_sales,
            &self.financial_projections,
            &self.funding,
        ];
        if let Some(appendices) = &self.appendices {
            sections.push(appendices);
        }
        sections
    }
}
