use chrono::{DateTime, NaiveDate};
use domain::entities::{GeneratedBusinessPlan, Section};
use domain::format::french_date;

use crate::document::{Align, Document, Page, TextStyle, PAGE_HEIGHT, PAGE_WIDTH};
use crate::layout::{PageWriter, MARGIN};

const CENTER: f64 = PAGE_WIDTH / 2.0;
/// Title page and table of contents precede the first section
const FRONT_MATTER_PAGES: usize = 2;

/// Heading printed on the section page and label used in the contents
fn headings(plan: &GeneratedBusinessPlan) -> Vec<(&'static str, &'static str, &Section)> {
    let mut entries = vec![
        ("RÉSUMÉ EXÉCUTIF", "Résumé Exécutif", &plan.executive_summary),
        (
            "DESCRIPTION DE L'ENTREPRISE",
            "Description de l'Entreprise",
            &plan.company_description,
        ),
        ("ANALYSE DE MARCHÉ", "Analyse de Marché", &plan.market_analysis),
        (
            "ORGANISATION ET MANAGEMENT",
            "Organisation et Management",
            &plan.organization,
        ),
        ("PRODUITS ET SERVICES", "Produits et Services", &plan.products_services),
        ("MARKETING ET VENTES", "Marketing et Ventes", &plan.marketing_sales),
        (
            "PROJECTIONS FINANCIÈRES",
            "Projections Financières",
            &plan.financial_projections,
        ),
        ("FINANCEMENT REQUIS", "Financement Requis", &plan.funding),
    ];
    if let Some(appendices) = &plan.appendices {
        entries.push(("ANNEXES", "Annexes", appendices));
    }
    entries
}

pub(crate) fn title_page(title: &str, subject: &str, detail: &str, generated_on: &str) -> Page {
    let mut writer = PageWriter::new();
    writer.text(CENTER, 80.0, title, TextStyle::bold(24.0), Align::Center);
    writer.text(CENTER, 100.0, subject, TextStyle::normal(18.0), Align::Center);
    writer.text(CENTER, 115.0, detail, TextStyle::normal(14.0), Align::Center);
    writer.text(
        CENTER,
        140.0,
        format!("Généré le {generated_on}"),
        TextStyle::normal(12.0),
        Align::Center,
    );
    writer.text(
        CENTER,
        PAGE_HEIGHT - 20.0,
        "Document généré par Prediktor - Plateforme d'analyse sectorielle",
        TextStyle::normal(8.0),
        Align::Center,
    );
    writer.finish().remove(0)
}

/// Contents page; page numbers are 1-based over the whole document
pub(crate) fn contents_page(entries: &[(&str, usize)]) -> Page {
    let mut writer = PageWriter::new();
    let mut y = MARGIN + 20.0;
    writer.text(MARGIN, y, "TABLE DES MATIÈRES", TextStyle::bold(16.0), Align::Left);
    y += 20.0;
    for (label, page) in entries {
        writer.text(MARGIN, y, *label, TextStyle::normal(12.0), Align::Left);
        writer.text(
            PAGE_WIDTH - MARGIN - 10.0,
            y,
            page.to_string(),
            TextStyle::normal(12.0),
            Align::Right,
        );
        y += 8.0;
    }
    writer.finish().remove(0)
}

/// Lays sections out first so the contents can point at real page numbers
pub(crate) fn assemble(
    title: Page,
    labels: Vec<&str>,
    body: PageWriter,
    starts: Vec<usize>,
) -> Document {
    let entries: Vec<(&str, usize)> = labels
        .into_iter()
        .zip(starts)
        .map(|(label, start)| (label, start + FRONT_MATTER_PAGES + 1))
        .collect();
    let mut pages = vec![title, contents_page(&entries)];
    pages.extend(body.finish());
    Document { pages }
}

pub fn business_plan_document(plan: &GeneratedBusinessPlan, today: NaiveDate) -> Document {
    let generated_on = DateTime::parse_from_rfc3339(&plan.metadata.generated_at)
        .map(|at| at.date_naive())
        .unwrap_or(today);
    let title = title_page(
        "BUSINESS PLAN",
        &plan.metadata.company_name,
        &plan.metadata.industry,
        &french_date(generated_on),
    );

    let sections = headings(plan);
    let mut body = PageWriter::new();
    let mut starts = Vec::with_capacity(sections.len());
    for (i, (heading, _, section)) in sections.iter().enumerate() {
        if i > 0 {
            body.new_page();
        }
        starts.push(body.page_index());
        body.section(heading, &section.content, section.subsections.as_deref());
    }

    let labels = sections.iter().map(|(_, label, _)| *label).collect();
    assemble(title, labels, body, starts)
}
