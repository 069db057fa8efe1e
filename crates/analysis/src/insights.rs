//! Insight derivation from a comparative analysis.
//!
//! Pure arithmetic, no generation calls. The growth projection interpolates
//! linearly from the current growth to an optimistic twelve-month target.

use chrono::{DateTime, SecondsFormat, Utc};
use domain::entities::{
    AiScores, Benchmark, BenchmarkIndicator, ComparativeAnalysis, GrowthProjection,
    InsightMetadata, InsightReport, MonthlyProjection, ObjectiveProbability,
    OpportunityHighlight, RecommendationHighlight, RiskLevel, RiskScore,
};

/// Ceiling of the twelve-month projection, in percent
pub const PROJECTION_CAP: f64 = 30.0;
const PROJECTION_FACTOR: f64 = 1.5;
/// Months on each side of the current month
const HORIZON: i32 = 12;
const SECTOR_RISK_REFERENCE: f64 = 5.0;

pub const DEFAULT_RECOMMENDATION: &str = "Optimiser la stratégie";
pub const DEFAULT_OPPORTUNITY: &str = "Nouveau marché";

/// Growth rate the projection starts from, in percent.
///
/// An analysis carries no company growth percentage (the health `growth`
/// value is a 0-100 score), so projections start from the sector rate.
pub fn company_growth(analysis: &ComparativeAnalysis) -> f64 {
    analysis.sector_data.growth_rate
}

pub fn month_label(offset: i32) -> String {
    match offset {
        0 => "M".to_string(),
        o if o < 0 => format!("M{o}"),
        o => format!("M+{o}"),
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn monthly_projections(base: f64, target: f64) -> Vec<MonthlyProjection> {
    let span = f64::from(2 * HORIZON);
    (-HORIZON..=HORIZON)
        .map(|offset| {
            let progress = f64::from(offset + HORIZON) / span;
            let growth = (base + (target - base) * progress).max(0.0);
            MonthlyProjection {
                month: month_label(offset),
                growth: round_tenth(growth),
            }
        })
        .collect()
}

pub fn risk_percentage(gap: f64) -> f64 {
    (100.0 - gap * 10.0).clamp(0.0, 100.0)
}

pub fn objective_probability(gap: f64) -> f64 {
    (85.0 + gap * 2.0).clamp(50.0, 95.0)
}

/// Build the insight report of `analysis`. `demo` is carried into the
/// metadata so a report derived from canned data stays flagged.
pub fn derive_insights(
    analysis: &ComparativeAnalysis,
    demo: bool,
    company_name: &str,
    now: DateTime<Utc>,
) -> InsightReport {
    let current = company_growth(analysis);
    let target = (current * PROJECTION_FACTOR).min(PROJECTION_CAP);
    let monthly = monthly_projections(current, target);
    let min_growth = monthly.iter().map(|p| p.growth).fold(f64::INFINITY, f64::min);
    let max_growth = monthly
        .iter()
        .map(|p| p.growth)
        .fold(f64::NEG_INFINITY, f64::max);

    let sector_growth = analysis.sector_data.growth_rate;
    let gap = current - sector_growth;
    let risk_level = RiskLevel::from_gap(gap);
    let risk_percentage = risk_percentage(gap);

    let indicators = vec![
        BenchmarkIndicator {
            indicator: "Croissance".to_string(),
            company: current,
            sector: sector_growth,
        },
        BenchmarkIndicator {
            indicator: "Rentabilité".to_string(),
            company: analysis.health_score.profitability,
            sector: analysis.sector_data.key_metrics.profitability,
        },
        BenchmarkIndicator {
            indicator: "Risque".to_string(),
            company: risk_percentage / 10.0,
            sector: SECTOR_RISK_REFERENCE,
        },
    ];

    let recommendation = analysis
        .recommendations
        .immediate
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_RECOMMENDATION);
    let opportunity = analysis
        .sector_data
        .opportunities
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_OPPORTUNITY);

    InsightReport {
        growth_data: GrowthProjection {
            current,
            projected_12_months: target,
            min_growth,
            max_growth,
            evolution_12_months: target - current,
            monthly_projections: monthly,
        },
        benchmark_data: Benchmark {
            company_growth: current,
            sector_growth,
            gap,
            risk_level,
            indicators,
        },
        ai_scores: AiScores {
            risk_score: RiskScore {
                value: risk_level,
                percentage: risk_percentage,
                description: format!("Risque {} selon l'IA", risk_level.label().to_lowercase()),
            },
            objective_probability: ObjectiveProbability {
                value: objective_probability(gap),
                description: "d'atteindre vos objectifs annuels".to_string(),
            },
            recommendation: RecommendationHighlight {
                title: recommendation.to_string(),
                description: "Recommandation basée sur l'analyse sectorielle".to_string(),
                impact: "+5% de performance".to_string(),
            },
            opportunity: OpportunityHighlight {
                title: opportunity.to_string(),
                description: "Opportunité détectée dans le secteur".to_string(),
                potential: "+10% CA".to_string(),
            },
        },
        metadata: InsightMetadata {
            last_analysis_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            company_name: company_name.to_string(),
            sector: analysis.company_data.sector.clone(),
            is_demo_data: demo,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::demo_analysis;
    use chrono::TimeZone;
    use domain::entities::CompanyData;

    fn commerce() -> CompanyData {
        CompanyData {
            year: "2024".to_string(),
            revenue: 5_000_000.0,
            expenses: 3_500_000.0,
            employees: 10,
            sector: "Commerce".to_string(),
            market: "Local".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_label(-12), "M-12");
        assert_eq!(month_label(0), "M");
        assert_eq!(month_label(3), "M+3");
    }

    #[test]
    fn test_projection_interpolates_and_rounds() {
        let points = monthly_projections(10.0, 15.0);
        assert_eq!(points.len(), 25);
        assert_eq!(points[0].month, "M-12");
        assert_eq!(points[0].growth, 10.0);
        assert_eq!(points[12].growth, 12.5);
        assert_eq!(points[24].month, "M+12");
        assert_eq!(points[24].growth, 15.0);
        // 10 + 5 * 1/24 = 10.208..
        assert_eq!(points[1].growth, 10.2);
    }

    #[test]
    fn test_projection_never_negative() {
        let points = monthly_projections(-4.0, -6.0);
        assert!(points.iter().all(|p| p.growth == 0.0));
    }

    #[test]
    fn test_risk_and_probability_clamps() {
        assert_eq!(risk_percentage(0.0), 100.0);
        assert_eq!(risk_percentage(3.0), 70.0);
        assert_eq!(risk_percentage(20.0), 0.0);
        assert_eq!(risk_percentage(-5.0), 100.0);

        assert_eq!(objective_probability(0.0), 85.0);
        assert_eq!(objective_probability(10.0), 95.0);
        assert_eq!(objective_probability(-30.0), 50.0);
    }

    #[test]
    fn test_derive_from_demo_analysis() {
        // Demo sector grows at 12%, the projection runs 12 -> 18
        let analysis = demo_analysis(&commerce());
        let report = derive_insights(&analysis, true, "Koné Import", now());

        let growth = &report.growth_data;
        assert_eq!(growth.current, 12.0);
        assert_eq!(growth.projected_12_months, 18.0);
        assert_eq!(growth.evolution_12_months, 6.0);
        assert_eq!(growth.min_growth, 12.0);
        assert_eq!(growth.max_growth, 18.0);

        let bench = &report.benchmark_data;
        assert_eq!(bench.company_growth, 12.0);
        assert_eq!(bench.sector_growth, 12.0);
        assert_eq!(bench.gap, 0.0);
        assert_eq!(bench.risk_level, RiskLevel::High);
        assert_eq!(bench.indicators[1].company, 80.0);
        assert_eq!(bench.indicators[1].sector, 15.0);
        assert_eq!(bench.indicators[2].company, 10.0);

        let scores = &report.ai_scores;
        assert_eq!(scores.risk_score.percentage, 100.0);
        assert_eq!(scores.risk_score.description, "Risque élevé selon l'IA");
        assert_eq!(scores.objective_probability.value, 85.0);
        assert_eq!(scores.recommendation.title, "Optimiser les coûts opérationnels");
        assert_eq!(scores.opportunity.title, "Marché en croissance");

        assert_eq!(report.metadata.company_name, "Koné Import");
        assert_eq!(report.metadata.sector, "Commerce");
        assert!(report.metadata.is_demo_data);
        assert_eq!(report.metadata.last_analysis_date, "2025-03-01T08:30:00.000Z");
    }

    #[test]
    fn test_health_growth_score_is_not_a_growth_rate() {
        let mut analysis = demo_analysis(&commerce());
        analysis.health_score.growth = 90.0;
        for point in &mut analysis.charts.market_position {
            point.company = 90.0;
        }
        analysis.sector_data.growth_rate = 25.0;
        analysis.recommendations.immediate.clear();
        analysis.sector_data.opportunities.clear();

        let report = derive_insights(&analysis, false, "X", now());
        assert_eq!(report.growth_data.current, 25.0);
        assert_eq!(report.growth_data.projected_12_months, PROJECTION_CAP);
        assert_eq!(report.benchmark_data.gap, 0.0);
        assert_eq!(report.ai_scores.recommendation.title, DEFAULT_RECOMMENDATION);
        assert_eq!(report.ai_scores.opportunity.title, DEFAULT_OPPORTUNITY);
        assert!(!report.metadata.is_demo_data);
    }
}
