//! French prompt templates.
//!
//! Each prompt embeds the inputs and an example of the expected JSON shape,
//! and asks for raw JSON only.

use domain::entities::{
    BusinessPlanRequest, CompanyData, ComparativeAnalysis, HealthScore, ProfileContext,
    SectorData,
};
use domain::format::group_thousands;

const STRICT_JSON_RULES: &str = "\
    INSTRUCTIONS CRITIQUES:
    - Réponds UNIQUEMENT avec du JSON valide
    - PAS de texte avant ou après le JSON
    - PAS de markdown, backticks, ou code blocks
    - PAS d'explications ou de commentaires
    - Commence directement par { et termine par }";

const NOT_PROVIDED: &str = "Non renseigné";
const NOT_PROVIDED_F: &str = "Non renseignée";

pub fn sector_prompt(sector: &str, ctx: &ProfileContext) -> String {
    let country = &ctx.country;
    let currency = &ctx.currency;
    format!(
        r#"
    Tu es un expert en analyse sectorielle. Analyse le secteur "{sector}" en {country}.

{STRICT_JSON_RULES}
    - IMPORTANT: Adapte les données au contexte économique de {country} et utilise {currency} comme devise

    CONTEXTE GÉOGRAPHIQUE ET ÉCONOMIQUE:
    - Pays: {country}
    - Devise: {currency}
    - Secteur: {sector}
    - Contexte: Marché africain avec spécificités locales

    Exemple de réponse attendue (remplace les valeurs par des données réalistes pour "{sector}" en {country}):
    {{
      "sector": "{sector}",
      "averageRevenue": 50000000,
      "averageExpenses": 35000000,
      "averageEmployees": 25,
      "growthRate": 12,
      "marketSize": 5000000000,
      "keyMetrics": {{
        "profitability": 15,
        "efficiency": 75,
        "marketShare": 8
      }},
      "trends": ["Digitalisation accélérée", "Investissements locaux", "Innovation technologique"],
      "challenges": ["Accès au financement", "Infrastructure limitée", "Concurrence internationale"],
      "opportunities": ["Marché en croissance", "Développement digital", "Partenariats locaux"]
    }}

    RÉPONSE REQUISE: JSON uniquement, sans formatage supplémentaire. Adapte les données au contexte de {country}.
    "#
    )
}

pub fn health_prompt(company: &CompanyData, sector: &SectorData, ctx: &ProfileContext) -> String {
    let country = &ctx.country;
    let currency = &ctx.currency;
    format!(
        r#"
    Tu es un expert en analyse financière. Calcule un score de santé pour une entreprise.

{STRICT_JSON_RULES}
    - IMPORTANT: Adapte l'analyse au contexte de {country} et utilise {currency}

    CONTEXTE DE L'ENTREPRISE:
    - Nom: {name}
    - Pays: {country}
    - Devise: {currency}
    - Revenus: {revenue} {currency}
    - Charges: {expenses} {currency}
    - Employés: {employees}
    - Secteur: {company_sector}

    DONNÉES SECTORIELLES ({country}):
    - Revenus moyens: {avg_revenue} {currency}
    - Charges moyennes: {avg_expenses} {currency}
    - Employés moyens: {avg_employees}
    - Croissance du secteur: {growth}%
    - Taille du marché: {market_size} {currency}

    Exemple de réponse attendue (adapte au contexte de {country}):
    {{
      "overall": 75,
      "profitability": 80,
      "efficiency": 70,
      "growth": 65,
      "marketPosition": 75,
      "details": {{
        "strengths": ["Rentabilité supérieure à la moyenne du secteur en {country}", "Efficacité opérationnelle"],
        "weaknesses": ["Taille d'équipe limitée", "Potentiel de croissance"],
        "recommendations": ["Investir dans la croissance", "Optimiser les processus"]
      }}
    }}

    RÉPONSE REQUISE: JSON uniquement, sans formatage supplémentaire. Adapte l'analyse au contexte de {country}.
    "#,
        name = ctx.company_name,
        revenue = company.revenue,
        expenses = company.expenses,
        employees = company.employees,
        company_sector = company.sector,
        avg_revenue = sector.average_revenue,
        avg_expenses = sector.average_expenses,
        avg_employees = sector.average_employees,
        growth = sector.growth_rate,
        market_size = sector.market_size,
    )
}

/// Third step of the comparative chain. The example charts are pre-filled
/// with the figures already known so the model only has to refine them.
pub fn comparative_prompt(
    company: &CompanyData,
    sector: &SectorData,
    health: &HealthScore,
    ctx: &ProfileContext,
) -> String {
    let country = &ctx.country;
    let currency = &ctx.currency;
    let company_sector = &company.sector;
    let profitability = company.profitability();
    let sector_profitability = sector.key_metrics.profitability;
    let company_efficiency = company.efficiency().round();
    let sector_efficiency = sector.average_efficiency().round();

    format!(
        r#"
      Tu es un expert en stratégie d'entreprise. Génère une analyse comparative complète.

{STRICT_JSON_RULES}
      - IMPORTANT: Génère TOUJOURS des données complètes pour les graphiques
      - IMPORTANT: Adapte l'analyse au contexte de {country} et utilise {currency}

      CONTEXTE DE L'ENTREPRISE:
      - Nom: {name}
      - Pays: {country}
      - Devise: {currency}
      - Site web: {website}
      - Taille: {size}
      - Revenus: {revenue} {currency}
      - Charges: {expenses} {currency}
      - Employés: {employees}
      - Secteur: {company_sector}

      Score de santé: {overall}/100

      Exemple de réponse attendue (actions CONCRÈTES pour le secteur {company_sector} en {country}):
      {{
        "competitivePosition": {{
          "score": 75,
          "position": "strong",
          "description": "Position concurrentielle solide avec des opportunités d'amélioration"
        }},
        "recommendations": {{
          "immediate": ["Optimiser les coûts opérationnels", "Renforcer la présence digitale"],
          "shortTerm": ["Développer de nouveaux marchés", "Investir dans la formation"],
          "longTerm": ["Expansion géographique", "Innovation produit"]
        }},
        "charts": {{
          "revenueComparison": [
            {{"company": {revenue}, "sector": {avg_revenue}, "label": "Revenus"}},
            {{"company": {expenses}, "sector": {avg_expenses}, "label": "Charges"}},
            {{"company": {profit}, "sector": {avg_profit}, "label": "Bénéfice"}},
            {{"company": {company_efficiency}, "sector": {sector_efficiency}, "label": "CA/Employé"}}
          ],
          "profitabilityTrend": [
            {{"company": {p22}, "sector": {s22}, "period": "2022"}},
            {{"company": {p23}, "sector": {s23}, "period": "2023"}},
            {{"company": {p24}, "sector": {sector_profitability}, "period": "2024"}},
            {{"company": {p25}, "sector": {s25}, "period": "2025"}}
          ],
          "marketPosition": [
            {{"metric": "Rentabilité", "company": {p24}, "sector": {sector_profitability}}},
            {{"metric": "Efficacité", "company": {company_efficiency}, "sector": {sector_efficiency}}},
            {{"metric": "Croissance", "company": {health_growth}, "sector": {growth}}},
            {{"metric": "Taille", "company": {employees}, "sector": {avg_employees}}}
          ]
        }}
      }}

      RÉPONSE REQUISE: JSON uniquement, sans formatage supplémentaire. Génère des actions CONCRÈTES et SPÉCIFIQUES au secteur {company_sector} en {country}.
      "#,
        name = ctx.company_name,
        website = ctx.website.as_deref().unwrap_or(NOT_PROVIDED),
        size = ctx.company_size.as_deref().unwrap_or(NOT_PROVIDED_F),
        revenue = company.revenue,
        expenses = company.expenses,
        employees = company.employees,
        overall = health.overall,
        avg_revenue = sector.average_revenue,
        avg_expenses = sector.average_expenses,
        avg_employees = sector.average_employees,
        profit = company.profit(),
        avg_profit = sector.average_profit(),
        p22 = (profitability * 0.8).round(),
        p23 = (profitability * 0.9).round(),
        p24 = profitability.round(),
        p25 = (profitability * 1.1).round(),
        s22 = (sector_profitability * 0.9).round(),
        s23 = (sector_profitability * 0.95).round(),
        s25 = (sector_profitability * 1.05).round(),
        health_growth = health.growth,
        growth = sector.growth_rate,
    )
}

pub fn action_plan_prompt(analysis: &ComparativeAnalysis, ctx: &ProfileContext) -> String {
    let country = &ctx.country;
    let currency = &ctx.currency;
    let name = &ctx.company_name;
    let company = &analysis.company_data;
    let sector = &analysis.sector_data;
    let details = &analysis.health_score.details;
    let recs = &analysis.recommendations;
    let company_sector = &company.sector;
    let fair_city = if country == domain::entities::DEFAULT_COUNTRY {
        "Abidjan"
    } else {
        "la capitale"
    };

    format!(
        r#"
    Tu es un expert en stratégie d'entreprise spécialisé dans le marché africain. Génère un plan d'action détaillé et personnalisé avec des actions CONCRÈTES et SPÉCIFIQUES.

{STRICT_JSON_RULES}
    - IMPORTANT: Génère des actions CONCRÈTES et SPÉCIFIQUES, PAS d'actions génériques comme "Action prioritaire 1"
    - Chaque action doit être détaillée et actionable
    - Adapte les actions au score de santé, au secteur spécifique et au contexte de {country}

    CONTEXTE DE L'ENTREPRISE:
    - Nom: {name}
    - Pays: {country}
    - Devise: {currency}
    - Site web: {website}
    - Taille: {size}
    - Secteur: {company_sector}
    - Revenus: {revenue} {currency}
    - Charges: {expenses} {currency}
    - Employés: {employees}
    - Score de santé: {overall}/100
    - Position concurrentielle: {position}

    DONNÉES SECTORIELLES ({country}):
    - Revenus moyens du secteur: {avg_revenue} {currency}
    - Croissance du secteur: {growth}%
    - Taille du marché: {market_size} {currency}

    FORCES ET FAIBLESSES IDENTIFIÉES:
    - Forces: {strengths}
    - Faiblesses: {weaknesses}

    RECOMMANDATIONS EXISTANTES:
    - Immédiates: {immediate}
    - Court terme: {short_term}
    - Long terme: {long_term}

    Exemple de réponse attendue (actions CONCRÈTES pour {name} en {country}):
    {{
      "objectives": [
        "Augmenter les revenus de 25% en 12 mois en développant 3 nouveaux marchés dans {country}",
        "Réduire les coûts opérationnels de 15% en optimisant la chaîne logistique",
        "Améliorer la satisfaction client de 30% en formant l'équipe aux nouvelles technologies"
      ],
      "actions": [
        {{
          "category": "Marketing",
          "actions": [
            "Lancer une campagne Facebook Ads ciblée sur les clients potentiels de {company_sector} en {country}",
            "Créer un site web responsive avec système de réservation en ligne",
            "Participer au Salon International de {company_sector} à {fair_city}"
          ]
        }},
        {{
          "category": "Opérations",
          "actions": [
            "Automatiser le processus de facturation avec un logiciel de gestion",
            "Négocier des contrats avec 3 nouveaux fournisseurs locaux en {country}",
            "Optimiser les horaires de travail pour réduire les coûts énergétiques"
          ]
        }},
        {{
          "category": "Finance",
          "actions": [
            "Obtenir un prêt bancaire de 50M {currency} pour l'expansion",
            "Mettre en place un système de suivi budgétaire mensuel",
            "Diversifier les sources de revenus avec des services complémentaires"
          ]
        }},
        {{
          "category": "Ressources Humaines",
          "actions": [
            "Former 5 employés aux techniques de vente modernes",
            "Recruter un expert en {company_sector} avec 5 ans d'expérience",
            "Mettre en place un système de bonus basé sur les performances"
          ]
        }}
      ],
      "timeline": [
        {{
          "phase": "Phase 1 - Actions Immédiates",
          "duration": "1-3 mois",
          "actions": [
            "Audit complet des processus actuels et identification des goulots d'étranglement",
            "Formation de l'équipe aux nouvelles technologies et outils digitaux",
            "Lancement de la campagne marketing digitale avec budget de 2M {currency}"
          ]
        }},
        {{
          "phase": "Phase 2 - Développement",
          "duration": "3-6 mois",
          "actions": [
            "Ouverture de 2 nouveaux points de vente dans les zones à fort potentiel de {country}",
            "Optimisation des processus de production pour réduire les coûts de 10%",
            "Recrutement et formation de 3 nouveaux employés qualifiés"
          ]
        }},
        {{
          "phase": "Phase 3 - Expansion",
          "duration": "6-12 mois",
          "actions": [
            "Expansion vers 2 nouvelles régions de {country} avec partenariats locaux",
            "Lancement de 3 nouveaux produits/services innovants",
            "Partenariat stratégique avec une entreprise leader du secteur en {country}"
          ]
        }}
      ]
    }}

    RÉPONSE REQUISE: JSON uniquement, sans formatage supplémentaire. Génère des actions CONCRÈTES et SPÉCIFIQUES pour {name} dans le secteur {company_sector} en {country}.
    "#,
        website = ctx.website.as_deref().unwrap_or(NOT_PROVIDED),
        size = ctx.company_size.as_deref().unwrap_or(NOT_PROVIDED_F),
        revenue = group_thousands(company.revenue),
        expenses = group_thousands(company.expenses),
        employees = company.employees,
        overall = analysis.health_score.overall,
        position = analysis.competitive_position.position,
        avg_revenue = group_thousands(sector.average_revenue),
        growth = sector.growth_rate,
        market_size = group_thousands(sector.market_size),
        strengths = details.strengths.join(", "),
        weaknesses = details.weaknesses.join(", "),
        immediate = recs.immediate.join(", "),
        short_term = recs.short_term.join(", "),
        long_term = recs.long_term.join(", "),
    )
}

/// Sections are requested by key; disabled toggles are left out of the list
pub fn business_plan_prompt(request: &BusinessPlanRequest, generated_at: &str) -> String {
    let sections = request.sections.selected().join(", ");
    let sample_section = |key: &str, title: &str, content: &str, sub_title: &str, sub_content: &str| {
        format!(
            r#"      "{key}": {{
        "title": "{title}",
        "content": "{content}",
        "subsections": [
          {{
            "title": "{sub_title}",
            "content": "{sub_content}"
          }}
        ]
      }},"#
        )
    };
    let samples = [
        sample_section("executiveSummary", "Résumé Exécutif", "Contenu du résumé exécutif...", "Synthèse de l'opportunité", "Description de l'opportunité..."),
        sample_section("companyDescription", "Description de l'Entreprise", "Description détaillée...", "Mission et Vision", "Mission et vision de l'entreprise..."),
        sample_section("marketAnalysis", "Analyse de Marché", "Analyse complète du marché...", "Taille et Croissance du Marché", "Données sur la taille du marché..."),
        sample_section("organization", "Organisation et Management", "Structure organisationnelle...", "Équipe de Direction", "Présentation de l'équipe..."),
        sample_section("productsServices", "Produits et Services", "Description des produits/services...", "Portefeuille de Produits", "Détail des produits..."),
        sample_section("marketingSales", "Marketing et Ventes", "Stratégie marketing...", "Stratégie Marketing", "Approche marketing..."),
        sample_section("financialProjections", "Projections Financières", "Projections financières...", "Revenus Projetés", "Projections de revenus..."),
        sample_section("funding", "Financement Requis", "Besoins en financement...", "Utilisation des Fonds", "Détail de l'utilisation..."),
    ]
    .join("\n");

    format!(
        r#"
    Tu es un expert en création de business plans spécialisé dans le marché africain. Génère un business plan complet et professionnel.

{STRICT_JSON_RULES}
    - Toutes les valeurs doivent être des chaînes de caractères simples
    - Structure le contenu de manière professionnelle et engageante

    INFORMATIONS DE L'ENTREPRISE:
    - Nom: {name}
    - Secteur: {industry}
    - Description: {description}
    - Taille du marché: {market_size} FCFA
    - Marché cible: {target}
    - Avantage concurrentiel: {advantage}
    - Modèle de revenus: {revenue_model}
    - Financement requis: {funding} FCFA
    - Taille équipe: {team}
    - Horizon temporel: {timeline}

    SECTIONS À GÉNÉRER: {sections}

    Exemple de réponse attendue (adapte au contexte africain):
    {{
{samples}
      "metadata": {{
        "generatedAt": "{generated_at}",
        "companyName": "{name}",
        "industry": "{industry}",
        "totalPages": 25
      }}
    }}

    RÈGLES IMPORTANTES:
    - Adapte le contenu au contexte africain et ouest-africain
    - Utilise des montants en FCFA
    - Inclus des données réalistes pour le marché local
    - Rends le contenu inspirant et engageant
    - Structure chaque section avec des sous-sections pertinentes
    - Inclus des métriques et KPIs mesurables
    - Propose des stratégies adaptées au marché africain

    RÉPONSE REQUISE: JSON uniquement, sans formatage supplémentaire.
    "#,
        name = request.company_name,
        industry = request.industry,
        description = request.description,
        market_size = request.market_size,
        target = request.target_market,
        advantage = request.competitive_advantage,
        revenue_model = request.revenue_model,
        funding = request.funding_required,
        team = request.team_size,
        timeline = request.timeline,
    )
}
