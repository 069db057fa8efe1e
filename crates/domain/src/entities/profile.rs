//! UserProfile - one document per user in the `users` collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fields that must be non-empty for a profile to count as complete
pub const REQUIRED_PROFILE_FIELDS: [&str; 5] =
    ["firstName", "lastName", "companyName", "industry", "country"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    // Personal
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub function: String,
    pub language: String,
    pub timezone: String,

    // Company
    pub company_name: String,
    pub company_size: String,
    pub industry: String,
    pub country: String,
    pub currency: String,
    pub address: String,
    pub website: String,

    // Notifications
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub weekly_reports: bool,
    pub monthly_reports: bool,

    // Integrations
    pub google_sheets: bool,
    pub google_analytics: bool,
    pub gemini_api: bool,

    // Security
    pub two_factor_auth: bool,
    pub session_timeout: String,
    pub data_retention: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_profile_complete: bool,
}

impl UserProfile {
    /// Blank profile created on first sign-up
    pub fn new_for(email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            phone: String::new(),
            function: String::new(),
            language: "fr".to_string(),
            timezone: "Africa/Abidjan".to_string(),
            company_name: String::new(),
            company_size: String::new(),
            industry: String::new(),
            country: String::new(),
            currency: "EUR".to_string(),
            address: String::new(),
            website: String::new(),
            email_notifications: true,
            push_notifications: true,
            weekly_reports: true,
            monthly_reports: false,
            google_sheets: false,
            google_analytics: false,
            gemini_api: true,
            two_factor_auth: false,
            session_timeout: "30".to_string(),
            data_retention: "2".to_string(),
            created_at: now,
            updated_at: now,
            is_profile_complete: false,
        }
    }

    fn required_values(&self) -> [&str; 5] {
        [
            &self.first_name,
            &self.last_name,
            &self.company_name,
            &self.industry,
            &self.country,
        ]
    }

    pub fn is_complete(&self) -> bool {
        self.required_values().iter().all(|v| !v.trim().is_empty())
    }

    pub fn completion_percentage(&self) -> u8 {
        let filled = self
            .required_values()
            .iter()
            .filter(|v| !v.trim().is_empty())
            .count();
        (filled as f64 / REQUIRED_PROFILE_FIELDS.len() as f64 * 100.0).round() as u8
    }

    /// Names of required fields still empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_PROFILE_FIELDS
            .iter()
            .zip(self.required_values())
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }

    /// Merge a partial update, refresh `updatedAt` and recompute completeness
    pub fn apply(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = update.$field { self.$field = value; })*
            };
        }
        merge!(
            first_name,
            last_name,
            phone,
            function,
            language,
            timezone,
            company_name,
            company_size,
            industry,
            country,
            currency,
            address,
            website,
            email_notifications,
            push_notifications,
            weekly_reports,
            monthly_reports,
            google_sheets,
            google_analytics,
            gemini_api,
            two_factor_auth,
            session_timeout,
            data_retention,
        );
        self.updated_at = now;
        self.is_profile_complete = self.is_complete();
    }
}

/// Partial profile update; `None` leaves a field untouched.
///
/// The email is owned by the credential record and cannot be changed here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub function: Option<String>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub company_name: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub email_notifications: Option<bool>,
    pub push_notifications: Option<bool>,
    pub weekly_reports: Option<bool>,
    pub monthly_reports: Option<bool>,
    pub google_sheets: Option<bool>,
    pub google_analytics: Option<bool>,
    pub gemini_api: Option<bool>,
    pub two_factor_auth: Option<bool>,
    pub session_timeout: Option<String>,
    pub data_retention: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Count of complete profiles in one industry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryCount {
    pub industry: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_users: usize,
    pub complete_profiles: usize,
    pub incomplete_profiles: usize,
    pub top_industries: Vec<IndustryCount>,
}

pub const DEFAULT_COUNTRY: &str = "Côte d'Ivoire";
pub const DEFAULT_CURRENCY: &str = "FCFA";
pub const DEFAULT_COMPANY_NAME: &str = "Votre entreprise";

/// Profile fields that personalize prompts, with blanks already defaulted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileContext {
    pub country: String,
    pub currency: String,
    pub company_name: String,
    pub website: Option<String>,
    pub company_size: Option<String>,
}

impl Default for ProfileContext {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            website: None,
            company_size: None,
        }
    }
}

impl ProfileContext {
    pub fn from_profile(profile: Option<&UserProfile>) -> Self {
        let Some(profile) = profile else {
            return Self::default();
        };
        let or_default = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        };
        let optional = |value: &str| (!value.trim().is_empty()).then(|| value.to_string());

        Self {
            country: or_default(&profile.country, DEFAULT_COUNTRY),
            currency: or_default(&profile.currency, DEFAULT_CURRENCY),
            company_name: or_default(&profile.company_name, DEFAULT_COMPANY_NAME),
            website: optional(&profile.website),
            company_size: optional(&profile.company_size),
        }
    }
}
