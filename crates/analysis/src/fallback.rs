//! Canned demo data used when the generation chain fails.
//!
//! Everything here is pure and deterministic. The same constants double as
//! the normalizer's per-field defaults.

use domain::entities::{
    ActionCategory, AnalysisDelta, Charts, CompanyData, ComparativeAnalysis,
    CompetitivePosition, HealthDetails, HealthScore, KeyMetrics, MarketPoint, Recommendations,
    RevenuePoint, SectorData, TimelinePhase, TrendPoint,
};
use domain::PositionKind;

pub const AVERAGE_REVENUE: f64 = 50_000_000.0;
pub const AVERAGE_EXPENSES: f64 = 35_000_000.0;
pub const AVERAGE_EMPLOYEES: f64 = 25.0;
pub const GROWTH_RATE: f64 = 12.0;
pub const MARKET_SIZE: f64 = 5_000_000_000.0;
pub const KEY_PROFITABILITY: f64 = 15.0;
pub const KEY_EFFICIENCY: f64 = 75.0;
pub const KEY_MARKET_SHARE: f64 = 8.0;

pub const TRENDS: [&str; 3] = [
    "Digitalisation accélérée",
    "Investissements locaux",
    "Innovation technologique",
];
pub const CHALLENGES: [&str; 3] = [
    "Accès au financement",
    "Infrastructure limitée",
    "Concurrence internationale",
];
pub const OPPORTUNITIES: [&str; 3] = [
    "Marché en croissance",
    "Développement digital",
    "Partenariats locaux",
];

pub const HEALTH_OVERALL: f64 = 75.0;
pub const HEALTH_PROFITABILITY: f64 = 80.0;
pub const HEALTH_EFFICIENCY: f64 = 70.0;
pub const HEALTH_GROWTH: f64 = 65.0;
pub const HEALTH_MARKET_POSITION: f64 = 75.0;

pub const STRENGTHS: [&str; 2] = [
    "Rentabilité supérieure à la moyenne",
    "Efficacité opérationnelle",
];
pub const WEAKNESSES: [&str; 2] = ["Taille d'équipe limitée", "Potentiel de croissance"];
pub const HEALTH_RECOMMENDATIONS: [&str; 2] =
    ["Investir dans la croissance", "Optimiser les processus"];

pub const POSITION_SCORE: f64 = 75.0;
pub const POSITION_DESCRIPTION: &str =
    "Position concurrentielle solide avec des opportunités d'amélioration";

pub const IMMEDIATE: [&str; 2] = [
    "Optimiser les coûts opérationnels",
    "Renforcer la présence digitale",
];
pub const SHORT_TERM: [&str; 2] = [
    "Développer de nouveaux marchés",
    "Investir dans la formation",
];
pub const LONG_TERM: [&str; 2] = ["Expansion géographique", "Innovation produit"];

pub const OBJECTIVES: [&str; 3] = [
    "Augmenter les revenus de 25% en 12 mois en développant de nouveaux marchés",
    "Réduire les coûts opérationnels de 15% en optimisant les processus",
    "Améliorer la satisfaction client de 30% en formant l'équipe",
];

/// Trend multipliers applied to company and sector profitability, per period
const TREND_STEPS: [(&str, f64, f64); 4] = [
    ("2022", 0.8, 0.9),
    ("2023", 0.9, 0.95),
    ("2024", 1.0, 1.0),
    ("2025", 1.1, 1.05),
];

pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn fallback_sector_data(sector: &str) -> SectorData {
    SectorData {
        sector: sector.to_string(),
        average_revenue: AVERAGE_REVENUE,
        average_expenses: AVERAGE_EXPENSES,
        average_employees: AVERAGE_EMPLOYEES,
        growth_rate: GROWTH_RATE,
        market_size: MARKET_SIZE,
        key_metrics: KeyMetrics {
            profitability: KEY_PROFITABILITY,
            efficiency: KEY_EFFICIENCY,
            market_share: KEY_MARKET_SHARE,
        },
        trends: owned(&TRENDS),
        challenges: owned(&CHALLENGES),
        opportunities: owned(&OPPORTUNITIES),
    }
}

pub fn fallback_health_score() -> HealthScore {
    HealthScore {
        overall: HEALTH_OVERALL,
        profitability: HEALTH_PROFITABILITY,
        efficiency: HEALTH_EFFICIENCY,
        growth: HEALTH_GROWTH,
        market_position: HEALTH_MARKET_POSITION,
        details: HealthDetails {
            strengths: owned(&STRENGTHS),
            weaknesses: owned(&WEAKNESSES),
            recommendations: owned(&HEALTH_RECOMMENDATIONS),
        },
    }
}

pub fn fallback_recommendations() -> Recommendations {
    Recommendations {
        immediate: owned(&IMMEDIATE),
        short_term: owned(&SHORT_TERM),
        long_term: owned(&LONG_TERM),
    }
}

/// Position, recommendations and charts computed from the company's own figures
pub fn fallback_analysis(
    company: &CompanyData,
    sector: &SectorData,
    health: &HealthScore,
) -> AnalysisDelta {
    let company_profitability = company.profitability();
    let sector_profitability = sector.key_metrics.profitability;

    let revenue_comparison = vec![
        revenue_point(company.revenue, sector.average_revenue, "Revenus"),
        revenue_point(company.expenses, sector.average_expenses, "Charges"),
        revenue_point(company.profit(), sector.average_profit(), "Bénéfice"),
        revenue_point(company.efficiency(), sector.average_efficiency(), "CA/Employé"),
    ];

    let profitability_trend = TREND_STEPS
        .iter()
        .map(|(period, company_factor, sector_factor)| TrendPoint {
            company: company_profitability * company_factor,
            sector: sector_profitability * sector_factor,
            period: period.to_string(),
        })
        .collect();

    let market_position = vec![
        market_point("Rentabilité", company_profitability, sector_profitability),
        market_point("Efficacité", company.efficiency(), sector.average_efficiency()),
        market_point("Croissance", health.growth, sector.growth_rate),
        market_point(
            "Taille",
            f64::from(company.employees),
            sector.average_employees,
        ),
    ];

    AnalysisDelta {
        competitive_position: CompetitivePosition {
            score: POSITION_SCORE,
            position: PositionKind::Strong,
            description: POSITION_DESCRIPTION.to_string(),
        },
        recommendations: fallback_recommendations(),
        charts: Charts {
            revenue_comparison,
            profitability_trend,
            market_position,
        },
    }
}

/// Complete demo analysis; `companyData` is always the caller's input
pub fn demo_analysis(company: &CompanyData) -> ComparativeAnalysis {
    let sector = fallback_sector_data(&company.sector);
    let health = fallback_health_score();
    let delta = fallback_analysis(company, &sector, &health);
    ComparativeAnalysis::assemble(company.clone(), sector, health, delta)
}

pub fn fallback_action_categories() -> Vec<ActionCategory> {
    let category = |name: &str, actions: [&str; 3]| ActionCategory {
        category: name.to_string(),
        actions: owned(&actions),
    };
    vec![
        category(
            "Marketing",
            [
                "Lancer une campagne Facebook Ads ciblée sur les clients potentiels",
                "Créer un site web responsive avec système de réservation en ligne",
                "Participer à 3 salons professionnels dans la région",
            ],
        ),
        category(
            "Opérations",
            [
                "Automatiser le processus de facturation avec un logiciel de gestion",
                "Négocier des contrats avec 3 nouveaux fournisseurs locaux",
                "Optimiser les horaires de travail pour réduire les coûts énergétiques",
            ],
        ),
        category(
            "Finance",
            [
                "Obtenir un prêt bancaire de 50M FCFA pour l'expansion",
                "Mettre en place un système de suivi budgétaire mensuel",
                "Diversifier les sources de revenus avec des services complémentaires",
            ],
        ),
        category(
            "Ressources Humaines",
            [
                "Former 5 employés aux techniques de vente modernes",
                "Recruter un expert sectoriel avec 5 ans d'expérience",
                "Mettre en place un système de bonus basé sur les performances",
            ],
        ),
    ]
}

pub fn fallback_timeline() -> Vec<TimelinePhase> {
    let phase = |name: &str, duration: &str, actions: [&str; 3]| TimelinePhase {
        phase: name.to_string(),
        duration: duration.to_string(),
        actions: owned(&actions),
    };
    vec![
        phase(
            "Phase 1 - Actions Immédiates",
            "1-3 mois",
            [
                "Audit complet des processus actuels et identification des goulots d'étranglement",
                "Formation de l'équipe aux nouvelles technologies et outils digitaux",
                "Lancement de la campagne marketing digitale avec budget de 2M FCFA",
            ],
        ),
        phase(
            "Phase 2 - Développement",
            "3-6 mois",
            [
                "Ouverture de 2 nouveaux points de vente dans les zones à fort potentiel",
                "Optimisation des processus de production pour réduire les coûts de 10%",
                "Recrutement et formation de 3 nouveaux employés qualifiés",
            ],
        ),
        phase(
            "Phase 3 - Expansion",
            "6-12 mois",
            [
                "Expansion vers 2 nouvelles régions avec partenariats locaux",
                "Lancement de 3 nouveaux produits/services innovants",
                "Partenariat stratégique avec une entreprise leader du secteur",
            ],
        ),
    ]
}

/// Series substituted by the normalizer when a chart comes back empty
pub fn canned_charts() -> Charts {
    Charts {
        revenue_comparison: vec![
            revenue_point(5_000_000.0, 8_000_000.0, "Revenus"),
            revenue_point(3_500_000.0, 6_000_000.0, "Charges"),
            revenue_point(1_500_000.0, 2_000_000.0, "Bénéfice"),
            revenue_point(250_000.0, 320_000.0, "CA/Employé"),
        ],
        profitability_trend: [
            ("2022", 18.0, 15.0),
            ("2023", 20.0, 16.0),
            ("2024", 22.0, 17.0),
            ("2025", 25.0, 18.0),
        ]
        .iter()
        .map(|(period, company, sector)| TrendPoint {
            company: *company,
            sector: *sector,
            period: period.to_string(),
        })
        .collect(),
        market_position: vec![
            market_point("Rentabilité", 22.0, 17.0),
            market_point("Efficacité", 250_000.0, 320_000.0),
            market_point("Croissance", 15.0, 12.0),
            market_point("Taille", 20.0, 25.0),
        ],
    }
}

fn revenue_point(company: f64, sector: f64, label: &str) -> RevenuePoint {
    RevenuePoint {
        company,
        sector,
        label: label.to_string(),
    }
}

fn market_point(metric: &str, company: f64, sector: f64) -> MarketPoint {
    MarketPoint {
        metric: metric.to_string(),
        company,
        sector,
    }
}
