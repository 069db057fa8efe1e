use chrono::NaiveDate;
use domain::entities::ComparativeAnalysis;
use domain::format::{french_date, group_thousands};

use crate::business_plan::{assemble, title_page};
use crate::charts::{bar_chart, line_chart, pie_chart, Frame, Pair};
use crate::document::Document;
use crate::layout::{PageWriter, CONTENT_WIDTH, MARGIN};

const CHART_HEIGHT: f64 = 90.0;

fn chart_frame(writer: &mut PageWriter) -> Frame {
    let top = writer.reserve(CHART_HEIGHT + 5.0);
    Frame {
        x: MARGIN,
        y: top,
        width: CONTENT_WIDTH,
        height: CHART_HEIGHT,
    }
}

fn bullet_block(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary(writer: &mut PageWriter, analysis: &ComparativeAnalysis) {
    let company = &analysis.company_data;
    let position = &analysis.competitive_position;
    writer.section_title("SYNTHÈSE");
    writer.paragraph(&format!(
        "Score de santé global : {:.0}/100",
        analysis.health_score.overall
    ));
    writer.paragraph(&format!(
        "Position concurrentielle : {} ({:.0}/100)",
        position.position.label(),
        position.score
    ));
    writer.paragraph(&position.description);
    writer.advance(6.0);
    writer.bullets(&[
        format!("Exercice : {}", company.year),
        format!("Marché : {}", company.market),
        format!("Revenus : {}", group_thousands(company.revenue)),
        format!("Charges : {}", group_thousands(company.expenses)),
        format!("Bénéfice : {}", group_thousands(company.profit())),
        format!("Rentabilité : {:.1} %", company.profitability()),
        format!("Employés : {}", company.employees),
    ]);
}

fn comparison(writer: &mut PageWriter, analysis: &ComparativeAnalysis) {
    writer.section_title("COMPARAISON AVEC LE SECTEUR");
    let pairs: Vec<Pair> = analysis
        .charts
        .revenue_comparison
        .iter()
        .map(|p| Pair {
            label: p.label.clone(),
            company: p.company,
            sector: p.sector,
        })
        .collect();
    let frame = chart_frame(writer);
    bar_chart(writer, frame, &pairs);
    for pair in &pairs {
        writer.paragraph(&format!(
            "{} : {} (secteur {})",
            pair.label,
            group_thousands(pair.company),
            group_thousands(pair.sector)
        ));
    }
    writer.advance(6.0);
    for point in &analysis.charts.market_position {
        writer.paragraph(&format!(
            "{} : {} / secteur {}",
            point.metric, point.company, point.sector
        ));
    }
}

fn trend(writer: &mut PageWriter, analysis: &ComparativeAnalysis) {
    writer.section_title("ÉVOLUTION DE LA RENTABILITÉ");
    let pairs: Vec<Pair> = analysis
        .charts
        .profitability_trend
        .iter()
        .map(|p| Pair {
            label: p.period.clone(),
            company: p.company,
            sector: p.sector,
        })
        .collect();
    let frame = chart_frame(writer);
    line_chart(writer, frame, &pairs);
    writer.paragraph(&format!(
        "Écart de rentabilité avec le secteur : {:+.1} points",
        analysis.profitability_gap()
    ));
}

fn health(writer: &mut PageWriter, analysis: &ComparativeAnalysis) {
    writer.section_title("SCORE DE SANTÉ");
    let slices: Vec<(String, f64)> = analysis
        .health_score
        .sub_scores()
        .iter()
        .map(|(label, value)| (label.to_string(), *value))
        .collect();
    let frame = chart_frame(writer);
    pie_chart(writer, frame, &slices);
    let details = &analysis.health_score.details;
    writer.subsection("Forces", &bullet_block(&details.strengths));
    writer.subsection("Faiblesses", &bullet_block(&details.weaknesses));
    writer.subsection("Recommandations", &bullet_block(&details.recommendations));
}

fn sector(writer: &mut PageWriter, analysis: &ComparativeAnalysis) {
    let sector = &analysis.sector_data;
    writer.section_title("DONNÉES SECTORIELLES");
    writer.bullets(&[
        format!("Revenus moyens : {}", group_thousands(sector.average_revenue)),
        format!("Charges moyennes : {}", group_thousands(sector.average_expenses)),
        format!("Employés moyens : {}", sector.average_employees),
        format!("Croissance : {} %", sector.growth_rate),
        format!("Taille du marché : {}", group_thousands(sector.market_size)),
        format!("Part de marché moyenne : {} %", sector.key_metrics.market_share),
    ]);
    writer.advance(10.0);
    writer.subsection("Tendances", &bullet_block(&sector.trends));
    writer.subsection("Défis", &bullet_block(&sector.challenges));
    writer.subsection("Opportunités", &bullet_block(&sector.opportunities));
}

fn recommendations(writer: &mut PageWriter, analysis: &ComparativeAnalysis) {
    let recs = &analysis.recommendations;
    writer.section_title("RECOMMANDATIONS");
    writer.subsection("Actions immédiates", &bullet_block(&recs.immediate));
    writer.subsection("Court terme", &bullet_block(&recs.short_term));
    writer.subsection("Long terme", &bullet_block(&recs.long_term));
}

type SectionWriter = fn(&mut PageWriter, &ComparativeAnalysis);

pub fn analysis_document(analysis: &ComparativeAnalysis, today: NaiveDate) -> Document {
    let company = &analysis.company_data;
    let title = title_page(
        "ANALYSE SECTORIELLE",
        &company.sector,
        &format!("Exercice {} - Marché {}", company.year, company.market),
        &french_date(today),
    );

    let sections: [(&str, SectionWriter); 6] = [
        ("Synthèse", summary),
        ("Comparaison avec le secteur", comparison),
        ("Évolution de la rentabilité", trend),
        ("Score de santé", health),
        ("Données sectorielles", sector),
        ("Recommandations", recommendations),
    ];

    let mut body = PageWriter::new();
    let mut starts = Vec::with_capacity(sections.len());
    for (i, (_, write)) in sections.iter().enumerate() {
        if i > 0 {
            body.new_page();
        }
        starts.push(body.page_index());
        write(&mut body, analysis);
    }

    let labels = sections.iter().map(|(label, _)| *label).collect();
    assemble(title, labels, body, starts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Command;
    use domain::entities::{
        AnalysisDelta, Charts, CompanyData, CompetitivePosition, HealthDetails, HealthScore,
        KeyMetrics, Recommendations, SectorData,
    };
    use domain::PositionKind;

    fn analysis(with_charts: bool) -> ComparativeAnalysis {
        let company = CompanyData {
            year: "2024".to_string(),
            revenue: 5_000_000.0,
            expenses: 3_500_000.0,
            employees: 10,
            sector: "Commerce".to_string(),
            market: "Local".to_string(),
        };
        let sector = SectorData {
            sector: "Commerce".to_string(),
            average_revenue: 50_000_000.0,
            average_expenses: 35_000_000.0,
            average_employees: 25.0,
            growth_rate: 12.0,
            market_size: 5_000_000_000.0,
            key_metrics: KeyMetrics {
                profitability: 15.0,
                efficiency: 75.0,
                market_share: 8.0,
            },
            trends: vec!["Digitalisation".to_string()],
            challenges: vec![],
            opportunities: vec!["Export".to_string()],
        };
        let health = HealthScore {
            overall: 75.0,
            profitability: 80.0,
            efficiency: 70.0,
            growth: 65.0,
            market_position: 75.0,
            details: HealthDetails {
                strengths: vec!["Marge".to_string()],
                weaknesses: vec![],
                recommendations: vec![],
            },
        };
        let mut charts = Charts {
            revenue_comparison: vec![],
            profitability_trend: vec![],
            market_position: vec![],
        };
        if with_charts {
            charts.revenue_comparison.push(domain::entities::RevenuePoint {
                company: 5_000_000.0,
                sector: 50_000_000.0,
                label: "Revenus".to_string(),
            });
            charts.profitability_trend.push(domain::entities::TrendPoint {
                company: 30.0,
                sector: 15.0,
                period: "2024".to_string(),
            });
        }
        ComparativeAnalysis::assemble(
            company,
            sector,
            health,
            AnalysisDelta {
                competitive_position: CompetitivePosition {
                    score: 75.0,
                    position: PositionKind::Strong,
                    description: "Position solide".to_string(),
                },
                recommendations: Recommendations {
                    immediate: vec!["Optimiser les coûts".to_string()],
                    short_term: vec![],
                    long_term: vec![],
                },
                charts,
            },
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    #[test]
    fn test_analysis_document_structure() {
        let doc = analysis_document(&analysis(true), today());
        assert_eq!(doc.pages.len(), 8);
        assert!(doc.pages[0].contains_text("ANALYSE SECTORIELLE"));
        assert!(doc.pages[0].contains_text("Généré le 30/06/2025"));
        assert!(doc.pages[2].contains_text("Position concurrentielle : Forte (75/100)"));
        assert!(doc.pages[2].contains_text("• Revenus : 5 000 000"));
        assert!(doc.pages[7].contains_text("• Optimiser les coûts"));
    }

    #[test]
    fn test_charts_are_drawn() {
        let doc = analysis_document(&analysis(true), today());
        let page = &doc.pages[doc.find_page("COMPARAISON AVEC LE SECTEUR").unwrap()];
        assert!(page.commands.iter().any(|c| matches!(c, Command::Rect { .. })));
        let health = &doc.pages[doc.find_page("SCORE DE SANTÉ").unwrap()];
        let wedges = health
            .commands
            .iter()
            .filter(|c| matches!(c, Command::Polygon { .. }))
            .count();
        assert_eq!(wedges, 4);
    }

    #[test]
    fn test_empty_series_do_not_fail() {
        let doc = analysis_document(&analysis(false), today());
        let page = &doc.pages[doc.find_page("ÉVOLUTION DE LA RENTABILITÉ").unwrap()];
        assert!(page.contains_text("Aucune donnée"));
        assert!(page.contains_text("Écart de rentabilité avec le secteur : +15.0 points"));
    }
}
