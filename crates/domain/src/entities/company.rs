//! CompanyData - figures supplied by the owner for one analysis run

use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Financial snapshot of the user's company.
///
/// Immutable once submitted: every analysis keeps the exact input it was run with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyData {
    pub year: String,
    pub revenue: f64,
    pub expenses: f64,
    pub employees: u32,
    pub sector: String,
    pub market: String,
}

impl CompanyData {
    /// Collect every rule violation, not just the first one
    pub fn violations(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.year.trim().is_empty() {
            errors.push("L'année est requise".to_string());
        }
        if !(self.revenue.is_finite() && self.revenue > 0.0) {
            errors.push("Le chiffre d'affaires doit être positif".to_string());
        }
        if !(self.expenses.is_finite() && self.expenses > 0.0) {
            errors.push("Les charges doivent être positives".to_string());
        }
        if self.employees == 0 {
            errors.push("Le nombre d'employés doit être positif".to_string());
        }
        if self.sector.trim().is_empty() {
            errors.push("Le secteur d'activité est requis".to_string());
        }
        if self.revenue > 0.0 && self.expenses > 0.0 && self.revenue < self.expenses {
            errors.push("Le chiffre d'affaires doit être supérieur aux charges".to_string());
        }

        errors
    }

    pub fn validate(&self) -> DomainResult<()> {
        let errors = self.violations();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidCompanyData(errors))
        }
    }

    pub fn profit(&self) -> f64 {
        self.revenue - self.expenses
    }

    /// Net margin in percent, 0 when there is no revenue
    pub fn profitability(&self) -> f64 {
        profitability(self.revenue, self.expenses)
    }

    /// Revenue per employee, 0 when there are no employees
    pub fn efficiency(&self) -> f64 {
        efficiency(self.revenue, f64::from(self.employees))
    }
}

pub fn profitability(revenue: f64, expenses: f64) -> f64 {
    if revenue == 0.0 {
        return 0.0;
    }
    (revenue - expenses) / revenue * 100.0
}

pub fn efficiency(revenue: f64, employees: f64) -> f64 {
    if employees == 0.0 {
        return 0.0;
    }
    revenue / employees
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_valid_company_passes() {
        assert!(commerce().validate().is_ok());
    }

    #[test]
    fn test_derived_metrics() {
        let company = commerce();
        assert!((company.profitability() - 30.0).abs() < 1e-9);
        assert!((company.efficiency() - 500_000.0).abs() < 1e-9);
        assert_eq!(company.profit(), 1_500_000.0);
    }

    #[test]
    fn test_zero_guards() {
        assert_eq!(profitability(0.0, 10.0), 0.0);
        assert_eq!(efficiency(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_all_violations_are_reported() {
        let company = CompanyData {
            year: String::new(),
            revenue: 0.0,
            expenses: -1.0,
            employees: 0,
            sector: " ".to_string(),
            market: String::new(),
        };
        let violations = company.violations();
        assert_eq!(violations.len(), 5);
        assert!(matches!(
            company.validate(),
            Err(DomainError::InvalidCompanyData(list)) if list.len() == 5
        ));
    }

    #[test]
    fn test_non_finite_figures_rejected() {
        let mut company = commerce();
        company.revenue = f64::INFINITY;
        company.expenses = 1_000.0;
        let violations = company.violations();
        assert_eq!(violations, vec!["Le chiffre d'affaires doit être positif".to_string()]);

        let mut company = commerce();
        company.expenses = f64::NAN;
        assert_eq!(company.violations().len(), 1);
        assert!(company.validate().is_err());
    }

    #[test]
    fn test_revenue_below_expenses_rejected() {
        let mut company = commerce();
        company.expenses = 6_000_000.0;
        let violations = company.violations();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("supérieur aux charges"));
    }

    #[test]
    fn test_serializes_in_camel_case() {
        let json = serde_json::to_value(commerce()).unwrap();
        assert_eq!(json["revenue"], 5_000_000.0);
        assert_eq!(json["employees"], 10);
        assert_eq!(json["sector"], "Commerce");
    }
}
