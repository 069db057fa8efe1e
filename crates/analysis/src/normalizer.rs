//! Turns raw model text into typed records.
//!
//! Parsing is strict (no JSON, no record) but coercion is lenient: every
//! absent or mistyped field is replaced by its default and the field path is
//! recorded in [`Normalized::defaulted`].

use domain::entities::{
    ActionCategory, ActionPlan, AnalysisDelta, BusinessPlanRequest, Charts, CompetitivePosition,
    GeneratedBusinessPlan, HealthDetails, HealthScore, KeyMetrics, MarketPoint, PlanMetadata,
    Recommendations, RevenuePoint, Section, SectorData, Subsection, TimelinePhase, TrendPoint,
};
use domain::PositionKind;
use serde_json::Value;

use crate::errors::{AnalysisError, AnalysisResult};
use crate::fallback::{self, owned};

pub const SECTION_PLACEHOLDER: &str = "Contenu en cours de génération...";
pub const DEFAULT_TOTAL_PAGES: u32 = 25;

const DEFAULT_POSITION_DESCRIPTION: &str = "Position concurrentielle solide";
const PLACEHOLDER_ACTIONS: [&str; 3] = ["Action 1", "Action 2", "Action 3"];

static NULL: Value = Value::Null;

/// A normalized record plus the paths of every field that was substituted
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub value: T,
    pub defaulted: Vec<String>,
}

impl<T> Normalized<T> {
    /// True when the response conformed field for field
    pub fn is_clean(&self) -> bool {
        self.defaulted.is_empty()
    }

    pub fn was_defaulted(&self, path: &str) -> bool {
        self.defaulted.iter().any(|p| p == path)
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Strip markdown fences and surrounding prose, keeping the outermost object
pub fn clean_json_response(text: &str) -> &str {
    let mut cleaned = text.trim();

    if let Some(rest) = strip_prefix_ignore_case(cleaned, "```json") {
        cleaned = rest.trim_start();
    }
    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest.trim_start();
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest.trim_end();
    }

    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if end > start {
            cleaned = &cleaned[start..=end];
        }
    }

    cleaned.trim()
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let len = prefix.len();
    if text.len() >= len && text.is_char_boundary(len) && text[..len].eq_ignore_ascii_case(prefix)
    {
        Some(&text[len..])
    } else {
        None
    }
}

/// Clean then parse. Only a JSON syntax failure is an error.
pub fn parse_json(raw: &str) -> AnalysisResult<Value> {
    serde_json::from_str(clean_json_response(raw)).map_err(|e| AnalysisError::InvalidResponse {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Field-by-field reader that records every substitution
#[derive(Default)]
struct Reader {
    defaulted: Vec<String>,
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn child<'v>(parent: &'v Value, key: &str) -> &'v Value {
    parent.get(key).unwrap_or(&NULL)
}

impl Reader {
    fn note(&mut self, path: String) {
        self.defaulted.push(path);
    }

    fn number(&mut self, parent: &Value, path: &str, key: &str, default: f64) -> f64 {
        match parent.get(key).and_then(Value::as_f64) {
            Some(n) => n,
            None => {
                self.note(join(path, key));
                default
            }
        }
    }

    fn string(&mut self, parent: &Value, path: &str, key: &str, default: &str) -> String {
        match parent.get(key).and_then(Value::as_str) {
            Some(s) => s.to_string(),
            None => {
                self.note(join(path, key));
                default.to_string()
            }
        }
    }

    /// Keeps list length: non-string elements are stringified in place
    fn string_list(&mut self, parent: &Value, path: &str, key: &str, default: &[&str]) -> Vec<String> {
        let full = join(path, key);
        match parent.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => s.clone(),
                    other => {
                        self.note(format!("{full}[{i}]"));
                        other.to_string()
                    }
                })
                .collect(),
            _ => {
                self.note(full);
                owned(default)
            }
        }
    }

    /// Maps each element of an array; `fallback` supplies the whole list otherwise.
    /// With `require_items`, an empty array also falls back.
    fn list<T>(
        &mut self,
        parent: &Value,
        path: &str,
        key: &str,
        require_items: bool,
        mut item: impl FnMut(&mut Self, &Value, &str) -> T,
        fallback: impl FnOnce() -> Vec<T>,
    ) -> Vec<T> {
        let full = join(path, key);
        match parent.get(key) {
            Some(Value::Array(items)) if !(require_items && items.is_empty()) => items
                .iter()
                .enumerate()
                .map(|(i, value)| item(self, value, &format!("{full}[{i}]")))
                .collect(),
            _ => {
                self.note(full);
                fallback()
            }
        }
    }

    fn finish<T>(self, value: T) -> Normalized<T> {
        Normalized {
            value,
            defaulted: self.defaulted,
        }
    }
}

pub fn normalize_sector_data(raw: &str, requested_sector: &str) -> AnalysisResult<Normalized<SectorData>> {
    let root = parse_json(raw)?;
    Ok(sector_data_from_value(&root, requested_sector))
}

pub fn sector_data_from_value(root: &Value, requested_sector: &str) -> Normalized<SectorData> {
    let mut r = Reader::default();
    let metrics = child(root, "keyMetrics");

    let value = SectorData {
        sector: r.string(root, "", "sector", requested_sector),
        average_revenue: r.number(root, "", "averageRevenue", fallback::AVERAGE_REVENUE),
        average_expenses: r.number(root, "", "averageExpenses", fallback::AVERAGE_EXPENSES),
        average_employees: r.number(root, "", "averageEmployees", fallback::AVERAGE_EMPLOYEES),
        growth_rate: r.number(root, "", "growthRate", fallback::GROWTH_RATE),
        market_size: r.number(root, "", "marketSize", fallback::MARKET_SIZE),
        key_metrics: KeyMetrics {
            profitability: r.number(metrics, "keyMetrics", "profitability", fallback::KEY_PROFITABILITY),
            efficiency: r.number(metrics, "keyMetrics", "efficiency", fallback::KEY_EFFICIENCY),
            market_share: r.number(metrics, "keyMetrics", "marketShare", fallback::KEY_MARKET_SHARE),
        },
        trends: r.string_list(root, "", "trends", &fallback::TRENDS),
        challenges: r.string_list(root, "", "challenges", &fallback::CHALLENGES),
        opportunities: r.string_list(root, "", "opportunities", &fallback::OPPORTUNITIES),
    };
    r.finish(value)
}

pub fn normalize_health_score(raw: &str) -> AnalysisResult<Normalized<HealthScore>> {
    let root = parse_json(raw)?;
    Ok(health_score_from_value(&root))
}

pub fn health_score_from_value(root: &Value) -> Normalized<HealthScore> {
    let mut r = Reader::default();
    let details = child(root, "details");

    let value = HealthScore {
        overall: r.number(root, "", "overall", fallback::HEALTH_OVERALL),
        profitability: r.number(root, "", "profitability", fallback::HEALTH_PROFITABILITY),
        efficiency: r.number(root, "", "efficiency", fallback::HEALTH_EFFICIENCY),
        growth: r.number(root, "", "growth", fallback::HEALTH_GROWTH),
        market_position: r.number(root, "", "marketPosition", fallback::HEALTH_MARKET_POSITION),
        details: HealthDetails {
            strengths: r.string_list(details, "details", "strengths", &fallback::STRENGTHS),
            weaknesses: r.string_list(details, "details", "weaknesses", &fallback::WEAKNESSES),
            recommendations: r.string_list(
                details,
                "details",
                "recommendations",
                &fallback::HEALTH_RECOMMENDATIONS,
            ),
        },
    };
    r.finish(value)
}

/// Position, recommendations and charts of the comparative step
pub fn normalize_analysis_delta(raw: &str) -> AnalysisResult<Normalized<AnalysisDelta>> {
    let root = parse_json(raw)?;
    Ok(analysis_delta_from_value(&root))
}

pub fn analysis_delta_from_value(root: &Value) -> Normalized<AnalysisDelta> {
    let mut r = Reader::default();

    let position = child(root, "competitivePosition");
    let position_path = "competitivePosition";
    let position_kind = match position.get("position").and_then(Value::as_str) {
        Some(text) => match text.parse::<PositionKind>() {
            Ok(kind) => kind,
            Err(_) => {
                r.note(join(position_path, "position"));
                PositionKind::Strong
            }
        },
        None => {
            r.note(join(position_path, "position"));
            PositionKind::Strong
        }
    };
    let competitive_position = CompetitivePosition {
        score: r.number(position, position_path, "score", fallback::POSITION_SCORE),
        position: position_kind,
        description: r.string(position, position_path, "description", DEFAULT_POSITION_DESCRIPTION),
    };

    let recs = child(root, "recommendations");
    let recommendations = Recommendations {
        immediate: r.string_list(recs, "recommendations", "immediate", &fallback::IMMEDIATE),
        short_term: r.string_list(recs, "recommendations", "shortTerm", &fallback::SHORT_TERM),
        long_term: r.string_list(recs, "recommendations", "longTerm", &fallback::LONG_TERM),
    };

    let charts_value = child(root, "charts");
    let canned = fallback::canned_charts();
    let charts = Charts {
        revenue_comparison: r.list(
            charts_value,
            "charts",
            "revenueComparison",
            true,
            |r, item, path| RevenuePoint {
                company: r.number(item, path, "company", 0.0),
                sector: r.number(item, path, "sector", 0.0),
                label: r.string(item, path, "label", "Revenus"),
            },
            || canned.revenue_comparison.clone(),
        ),
        profitability_trend: r.list(
            charts_value,
            "charts",
            "profitabilityTrend",
            true,
            |r, item, path| TrendPoint {
                company: r.number(item, path, "company", 0.0),
                sector: r.number(item, path, "sector", 0.0),
                period: r.string(item, path, "period", "Actuel"),
            },
            || canned.profitability_trend.clone(),
        ),
        market_position: r.list(
            charts_value,
            "charts",
            "marketPosition",
            true,
            |r, item, path| MarketPoint {
                metric: r.string(item, path, "metric", "Métrique"),
                company: r.number(item, path, "company", 0.0),
                sector: r.number(item, path, "sector", 0.0),
            },
            || canned.market_position.clone(),
        ),
    };

    r.finish(AnalysisDelta {
        competitive_position,
        recommendations,
        charts,
    })
}

pub fn normalize_action_plan(raw: &str) -> AnalysisResult<Normalized<ActionPlan>> {
    let root = parse_json(raw)?;
    Ok(action_plan_from_value(&root))
}

pub fn action_plan_from_value(root: &Value) -> Normalized<ActionPlan> {
    let mut r = Reader::default();

    let objectives = r.string_list(root, "", "objectives", &fallback::OBJECTIVES);
    let actions = r.list(
        root,
        "",
        "actions",
        false,
        |r, item, path| ActionCategory {
            category: r.string(item, path, "category", "Catégorie"),
            actions: r.string_list(item, path, "actions", &PLACEHOLDER_ACTIONS),
        },
        fallback::fallback_action_categories,
    );
    let timeline = r.list(
        root,
        "",
        "timeline",
        false,
        |r, item, path| TimelinePhase {
            phase: r.string(item, path, "phase", "Phase"),
            duration: r.string(item, path, "duration", "1-3 mois"),
            actions: r.string_list(item, path, "actions", &PLACEHOLDER_ACTIONS),
        },
        fallback::fallback_timeline,
    );

    r.finish(ActionPlan {
        objectives,
        actions,
        timeline,
    })
}

/// `generated_at` fills `metadata.generatedAt` when the model omits it
pub fn normalize_business_plan(
    raw: &str,
    request: &BusinessPlanRequest,
    generated_at: &str,
) -> AnalysisResult<Normalized<GeneratedBusinessPlan>> {
    let root = parse_json(raw)?;
    Ok(business_plan_from_value(&root, request, generated_at))
}

pub fn business_plan_from_value(
    root: &Value,
    request: &BusinessPlanRequest,
    generated_at: &str,
) -> Normalized<GeneratedBusinessPlan> {
    let mut r = Reader::default();

    let section = |r: &mut Reader, key: &str, title: &str| -> Section {
        let value = child(root, key);
        Section {
            title: r.string(value, key, "title", title),
            content: r.string(value, key, "content", SECTION_PLACEHOLDER),
            subsections: Some(r.list(
                value,
                key,
                "subsections",
                false,
                |r, item, path| Subsection {
                    title: r.string(item, path, "title", "Sous-section"),
                    content: r.string(item, path, "content", SECTION_PLACEHOLDER),
                },
                Vec::new,
            )),
        }
    };

    let executive_summary = section(&mut r, "executiveSummary", "Résumé Exécutif");
    let company_description = section(&mut r, "companyDescription", "Description de l'Entreprise");
    let market_analysis = section(&mut r, "marketAnalysis", "Analyse de Marché");
    let organization = section(&mut r, "organization", "Organisation et Management");
    let products_services = section(&mut r, "productsServices", "Produits et Services");
    let marketing_sales = section(&mut r, "marketingSales", "Marketing et Ventes");
    let financial_projections = section(&mut r, "financialProjections", "Projections Financières");
    let funding = section(&mut r, "funding", "Financement Requis");
    let appendices = match root.get("appendices") {
        Some(value) if is_truthy(value) => Some(section(&mut r, "appendices", "Annexes")),
        _ => None,
    };

    let meta = child(root, "metadata");
    let metadata = PlanMetadata {
        generated_at: r.string(meta, "metadata", "generatedAt", generated_at),
        company_name: r.string(meta, "metadata", "companyName", &request.company_name),
        industry: r.string(meta, "metadata", "industry", &request.industry),
        total_pages: meta
            .get("totalPages")
            .and_then(Value::as_f64)
            .filter(|n| *n >= 0.0)
            .map(|n| n.round() as u32)
            .unwrap_or_else(|| {
                r.note("metadata.totalPages".to_string());
                DEFAULT_TOTAL_PAGES
            }),
    };

    r.finish(GeneratedBusinessPlan {
        executive_summary,
        company_description,
        market_analysis,
        organization,
        products_services,
        marketing_sales,
        financial_projections,
        funding,
        appendices,
        metadata,
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
