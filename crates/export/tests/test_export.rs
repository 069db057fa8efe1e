use chrono::NaiveDate;
use domain::entities::{GeneratedBusinessPlan, PlanMetadata, Section, Subsection};
use export::PdfExporter;
use tempfile::TempDir;

fn section(title: &str, content: &str, subsections: Option<Vec<Subsection>>) -> Section {
    Section {
        title: title.to_string(),
        content: content.to_string(),
        subsections,
    }
}

fn sparse_plan() -> GeneratedBusinessPlan {
    GeneratedBusinessPlan {
        executive_summary: section("Résumé Exécutif", "", None),
        company_description: section("Description", "", Some(vec![])),
        market_analysis: section(
            "Marché",
            "",
            Some(vec![Subsection {
                title: "Sous-section".to_string(),
                content: String::new(),
            }]),
        ),
        organization: section("Organisation", "", None),
        products_services: section("Produits", "", None),
        marketing_sales: section("Marketing", "", None),
        financial_projections: section("Finances", "", None),
        funding: section("Financement", "", None),
        appendices: None,
        metadata: PlanMetadata {
            generated_at: String::new(),
            company_name: "Koné   Import".to_string(),
            industry: "Commerce".to_string(),
            total_pages: 25,
        },
    }
}

#[test]
fn test_sparse_plan_exports_to_named_file() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let exporter = PdfExporter::new(dir.path().join("exports"));
    let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();

    let path = exporter
        .export_business_plan(&sparse_plan(), today)
        .expect("export failed");

    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        "Business_Plan_Koné_Import_2025-06-30.pdf"
    );
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    // Title page, contents, eight section pages
    assert!(String::from_utf8_lossy(&bytes).contains("/Count 10"));
}

#[test]
fn test_document_pages_match_sections() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    let doc = export::business_plan_document(&sparse_plan(), today);
    assert_eq!(doc.pages.len(), 10);
    let market = doc.find_page("ANALYSE DE MARCHÉ").unwrap();
    let texts: Vec<&str> = doc.pages[market].texts().collect();
    assert_eq!(texts, vec!["ANALYSE DE MARCHÉ", "Sous-section"]);
}
