//! French display formatting shared by prompts, exports and the CLI

use chrono::NaiveDate;

/// Rounded amount with French thousands grouping, e.g. `5 000 000`
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `dd/mm/yyyy`
pub fn french_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
