use chrono::NaiveDate;

/// Whitespace runs become `_`; path separators are replaced too
fn file_component(name: &str) -> String {
    let joined = name.split_whitespace().collect::<Vec<_>>().join("_");
    joined.replace(['/', '\\'], "_")
}

pub fn business_plan_file_name(company_name: &str, date: NaiveDate) -> String {
    format!(
        "Business_Plan_{}_{}.pdf",
        file_component(company_name),
        date.format("%Y-%m-%d")
    )
}

pub fn analysis_file_name(sector: &str, date: NaiveDate) -> String {
    format!(
        "Analyse_{}_{}.pdf",
        file_component(sector),
        date.format("%Y-%m-%d")
    )
}
