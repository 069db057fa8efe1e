//! Terminal rendering of workflow results.
//!
//! Every function returns the text instead of printing it so commands decide
//! where output goes.

use application::UserNotice;
use colored::Colorize;
use domain::entities::{IndustryCount, ProfileStats};
use domain::format::group_thousands;
use domain::{
    ActionPlan, AnalysisOutcome, ComparativeAnalysis, GeneratedBusinessPlan, InsightReport,
    StoredRecord, UserProfile,
};
use std::fmt::Write;

pub fn notice(notice: &UserNotice) -> String {
    format!("{} {}\n  {}", "✗".red(), notice.title.red().bold(), notice.message)
}

pub fn success(message: &str) -> String {
    format!("{} {}", "✓".green(), message)
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title.cyan().bold());
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "  • {item}");
    }
}

pub fn outcome(outcome: &AnalysisOutcome) -> String {
    let mut out = String::new();
    if outcome.is_demo() {
        let _ = writeln!(
            out,
            "{}",
            "Données de démonstration : l'analyse en ligne a échoué.".yellow()
        );
    }
    out.push_str(&analysis(outcome.analysis()));
    out
}

pub fn analysis(analysis: &ComparativeAnalysis) -> String {
    let mut out = String::new();
    let company = &analysis.company_data;
    let sector = &analysis.sector_data;

    let _ = writeln!(
        out,
        "{} {} ({}, {})",
        "Analyse comparative".bold(),
        company.sector,
        company.market,
        company.year
    );

    heading(&mut out, "Score de santé");
    let _ = writeln!(out, "  Global : {:.0}/100", analysis.health_score.overall);
    for (label, score) in analysis.health_score.sub_scores() {
        let _ = writeln!(out, "  {label} : {score:.0}/100");
    }

    heading(&mut out, "Position concurrentielle");
    let position = &analysis.competitive_position;
    let _ = writeln!(
        out,
        "  {} ({:.0}/100)\n  {}",
        position.position.label().bold(),
        position.score,
        position.description
    );

    heading(&mut out, "Entreprise / secteur");
    let _ = writeln!(
        out,
        "  Chiffre d'affaires : {} / {}",
        group_thousands(company.revenue),
        group_thousands(sector.average_revenue)
    );
    let _ = writeln!(
        out,
        "  Rentabilité : {:.1}% / {:.1}%",
        company.profitability(),
        sector.key_metrics.profitability
    );
    let _ = writeln!(out, "  Croissance du secteur : {:.1}%", sector.growth_rate);

    let recommendations = &analysis.recommendations;
    heading(&mut out, "Recommandations immédiates");
    bullets(&mut out, &recommendations.immediate);
    heading(&mut out, "Court terme");
    bullets(&mut out, &recommendations.short_term);
    heading(&mut out, "Long terme");
    bullets(&mut out, &recommendations.long_term);
    out
}

pub fn action_plan(plan: &ActionPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({} actions)",
        "Plan d'action".bold(),
        plan.action_count()
    );

    heading(&mut out, "Objectifs");
    bullets(&mut out, &plan.objectives);

    for category in &plan.actions {
        heading(&mut out, &category.category);
        bullets(&mut out, &category.actions);
    }

    heading(&mut out, "Calendrier");
    for phase in &plan.timeline {
        let _ = writeln!(out, "  {} ({})", phase.phase.bold(), phase.duration);
        for action in &phase.actions {
            let _ = writeln!(out, "    - {action}");
        }
    }
    out
}

pub fn business_plan(plan: &GeneratedBusinessPlan) -> String {
    let mut out = String::new();
    let meta = &plan.metadata;
    let _ = writeln!(
        out,
        "{} {} ({}, {} pages)",
        "Business plan".bold(),
        meta.company_name,
        meta.industry,
        meta.total_pages
    );
    for section in plan.sections() {
        heading(&mut out, &section.title);
        if !section.content.is_empty() {
            let _ = writeln!(out, "{}", section.content);
        }
        for sub in section.subsections() {
            let _ = writeln!(out, "\n  {}\n  {}", sub.title.bold(), sub.content);
        }
    }
    out
}

pub fn insights(report: &InsightReport) -> String {
    let mut out = String::new();
    let meta = &report.metadata;
    let _ = writeln!(
        out,
        "{} {} ({}), analyse du {}",
        "Insights".bold(),
        meta.company_name,
        meta.sector,
        meta.last_analysis_date
    );

    let growth = &report.growth_data;
    heading(&mut out, "Croissance");
    let _ = writeln!(
        out,
        "  Actuelle : {:.1}%  Projetée à 12 mois : {:.1}%  (fourchette {:.1}% à {:.1}%)",
        growth.current, growth.projected_12_months, growth.min_growth, growth.max_growth
    );

    let benchmark = &report.benchmark_data;
    heading(&mut out, "Benchmark");
    let _ = writeln!(
        out,
        "  Entreprise {:.1}% / secteur {:.1}%, écart {:+.1} points, risque {}",
        benchmark.company_growth, benchmark.sector_growth, benchmark.gap, benchmark.risk_level
    );
    for indicator in &benchmark.indicators {
        let _ = writeln!(
            out,
            "  {} : {:.1} / {:.1}",
            indicator.indicator, indicator.company, indicator.sector
        );
    }

    let scores = &report.ai_scores;
    heading(&mut out, "Scores");
    let _ = writeln!(
        out,
        "  Risque : {} ({:.0}%) {}",
        scores.risk_score.value, scores.risk_score.percentage, scores.risk_score.description
    );
    let _ = writeln!(
        out,
        "  Probabilité d'atteinte des objectifs : {:.0}% {}",
        scores.objective_probability.value, scores.objective_probability.description
    );
    let _ = writeln!(
        out,
        "  {} : {}",
        scores.recommendation.title.bold(),
        scores.recommendation.description
    );
    let _ = writeln!(
        out,
        "  {} : {} ({})",
        scores.opportunity.title.bold(),
        scores.opportunity.description,
        scores.opportunity.potential
    );
    out
}

pub fn profile(profile: &UserProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {} <{}>",
        "Profil".bold(),
        profile.first_name,
        profile.last_name,
        profile.email
    );
    let rows = [
        ("Fonction", &profile.function),
        ("Téléphone", &profile.phone),
        ("Entreprise", &profile.company_name),
        ("Taille", &profile.company_size),
        ("Secteur", &profile.industry),
        ("Pays", &profile.country),
        ("Devise", &profile.currency),
        ("Site web", &profile.website),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label} : {value}");
    }

    let completion = format!("{}%", profile.completion_percentage());
    if profile.is_profile_complete {
        let _ = writeln!(out, "  Complétion : {}", completion.green());
    } else {
        let _ = writeln!(
            out,
            "  Complétion : {} (manquant : {})",
            completion.yellow(),
            profile.missing_fields().join(", ")
        );
    }
    out
}

pub fn profile_stats(stats: &ProfileStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({} complets, {} incomplets)",
        "Utilisateurs :".bold(),
        stats.total_users,
        stats.complete_profiles,
        stats.incomplete_profiles
    );
    for IndustryCount { industry, count } in &stats.top_industries {
        let _ = writeln!(out, "  {industry} : {count}");
    }
    out
}

/// One line per record: creation time and a caption built from the record
pub fn history<T>(records: &[StoredRecord<T>], caption: impl Fn(&T) -> String) -> String {
    if records.is_empty() {
        return "Aucun enregistrement.".dimmed().to_string();
    }
    let mut out = String::new();
    for stored in records {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            stored.created_at.dimmed(),
            caption(&stored.record),
            stored.id.dimmed()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::entities::{ActionCategory, TimelinePhase};
    use domain::UserId;

    #[test]
    fn test_notice_shows_title_and_message() {
        let text = notice(&UserNotice::new(
            "Aucun plan généré",
            "Veuillez d'abord générer un business plan.",
        ));
        assert!(text.contains("Aucun plan généré"));
        assert!(text.contains("Veuillez d'abord générer un business plan."));
    }

    #[test]
    fn test_action_plan_lists_categories_and_phases() {
        let plan = ActionPlan {
            objectives: vec!["Réduire les coûts".into()],
            actions: vec![ActionCategory {
                category: "Finances".into(),
                actions: vec!["Renégocier les contrats".into(), "Suivre la trésorerie".into()],
            }],
            timeline: vec![TimelinePhase {
                phase: "Phase 1".into(),
                duration: "3 mois".into(),
                actions: vec!["Audit".into()],
            }],
        };

        let text = action_plan(&plan);
        assert!(text.contains("(2 actions)"));
        assert!(text.contains("Finances"));
        assert!(text.contains("  • Renégocier les contrats"));
        assert!(text.contains("3 mois"));
        assert!(text.contains("    - Audit"));
    }

    #[test]
    fn test_history_lists_records_or_says_empty() {
        let empty: Vec<StoredRecord<String>> = Vec::new();
        assert!(history(&empty, |s| s.clone()).contains("Aucun enregistrement."));

        let records = vec![StoredRecord {
            id: "rec-1".to_string(),
            user_id: UserId::generate(),
            created_at: "2025-06-30T10:00:00.000Z".to_string(),
            record: "Commerce".to_string(),
        }];
        let text = history(&records, |s| format!("secteur {s}"));
        assert!(text.contains("secteur Commerce"));
        assert!(text.contains("rec-1"));
    }

    #[test]
    fn test_profile_stats_lists_industries() {
        let stats = ProfileStats {
            total_users: 3,
            complete_profiles: 1,
            incomplete_profiles: 2,
            top_industries: vec![IndustryCount {
                industry: "Commerce".into(),
                count: 2,
            }],
        };
        let text = profile_stats(&stats);
        assert!(text.contains("(1 complets, 2 incomplets)"));
        assert!(text.contains("Commerce : 2"));
    }
}
