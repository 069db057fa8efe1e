use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use domain::entities::{IndustryCount, ProfileStats, ProfileUpdate, UserProfile};
use domain::{DomainError, DomainResult, ProfileRepository, UserId};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, instrument};

use crate::errors::StorageResult;
use crate::store::SqliteStore;

const TOP_INDUSTRIES: usize = 5;

fn read_profile(conn: &Connection, user_id: &UserId) -> StorageResult<Option<UserProfile>> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM users WHERE user_id = ?1",
            params![user_id.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(body.map(|b| serde_json::from_str(&b)).transpose()?)
}

fn write_profile(conn: &Connection, user_id: &UserId, profile: &UserProfile) -> StorageResult<()> {
    conn.execute(
        "INSERT INTO users (user_id, email, industry, is_complete, body)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(user_id) DO UPDATE SET
            email = excluded.email,
            industry = excluded.industry,
            is_complete = excluded.is_complete,
            body = excluded.body",
        params![
            user_id.as_str(),
            profile.email,
            profile.industry,
            profile.is_profile_complete,
            serde_json::to_string(profile)?,
        ],
    )?;
    Ok(())
}

fn all_profiles(conn: &Connection) -> StorageResult<Vec<UserProfile>> {
    let mut stmt = conn.prepare("SELECT body FROM users")?;
    let bodies = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    bodies
        .iter()
        .map(|b| Ok(serde_json::from_str(b)?))
        .collect()
}

fn complete_in_industry(conn: &Connection, industry: &str) -> StorageResult<Vec<UserProfile>> {
    let mut stmt = conn.prepare("SELECT body FROM users WHERE industry = ?1 AND is_complete = 1")?;
    let bodies = stmt
        .query_map(params![industry], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    bodies
        .iter()
        .map(|b| Ok(serde_json::from_str(b)?))
        .collect()
}

/// Complete profiles only, most frequent industry first
pub(crate) fn compute_stats(profiles: &[UserProfile]) -> ProfileStats {
    let complete: Vec<&UserProfile> = profiles.iter().filter(|p| p.is_profile_complete).collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for profile in &complete {
        if !profile.industry.is_empty() {
            *counts.entry(profile.industry.as_str()).or_default() += 1;
        }
    }
    let mut top: Vec<IndustryCount> = counts
        .into_iter()
        .map(|(industry, count)| IndustryCount {
            industry: industry.to_string(),
            count,
        })
        .collect();
    top.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.industry.cmp(&b.industry)));
    top.truncate(TOP_INDUSTRIES);

    ProfileStats {
        total_users: profiles.len(),
        complete_profiles: complete.len(),
        incomplete_profiles: profiles.len() - complete.len(),
        top_industries: top,
    }
}

#[async_trait]
impl ProfileRepository for SqliteStore {
    async fn load_profile(&self, user_id: &UserId) -> DomainResult<Option<UserProfile>> {
        Ok(read_profile(&*self.conn()?, user_id)?)
    }

    #[instrument(skip(self, email))]
    async fn create_profile(&self, user_id: &UserId, email: &str) -> DomainResult<UserProfile> {
        let conn = self.conn()?;
        if let Some(existing) = read_profile(&conn, user_id)? {
            return Ok(existing);
        }
        let profile = UserProfile::new_for(email, Utc::now());
        write_profile(&conn, user_id, &profile)?;
        debug!("blank profile created");
        Ok(profile)
    }

    #[instrument(skip(self, update))]
    async fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> DomainResult<UserProfile> {
        let conn = self.conn()?;
        let mut profile = read_profile(&conn, user_id)?
            .ok_or_else(|| DomainError::RecordNotFound(format!("profile of {user_id}")))?;
        profile.apply(update, Utc::now());
        write_profile(&conn, user_id, &profile)?;
        debug!(complete = profile.is_profile_complete, "profile updated");
        Ok(profile)
    }

    async fn users_by_industry(&self, industry: &str) -> DomainResult<Vec<UserProfile>> {
        Ok(complete_in_industry(&*self.conn()?, industry)?)
    }

    async fn profile_stats(&self) -> DomainResult<ProfileStats> {
        let profiles = all_profiles(&*self.conn()?)?;
        Ok(compute_stats(&profiles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(industry: &str, complete: bool) -> UserProfile {
        let mut p = UserProfile::new_for("a@b.ci", Utc::now());
        p.industry = industry.to_string();
        p.is_profile_complete = complete;
        p
    }

    #[test]
    fn test_stats_rank_complete_profiles_only() {
        let profiles = vec![
            profile("Commerce", true),
            profile("Commerce", true),
            profile("Agro", true),
            profile("Agro", false),
            profile("Agro", false),
            profile("", false),
        ];
        let stats = compute_stats(&profiles);
        assert_eq!(stats.total_users, 6);
        assert_eq!(stats.complete_profiles, 3);
        assert_eq!(stats.incomplete_profiles, 3);
        assert_eq!(
            stats.top_industries,
            vec![
                IndustryCount { industry: "Commerce".into(), count: 2 },
                IndustryCount { industry: "Agro".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_stats_keep_five_industries() {
        let profiles: Vec<UserProfile> = ["A", "B", "C", "D", "E", "F", "F"]
            .iter()
            .map(|i| profile(i, true))
            .collect();
        let stats = compute_stats(&profiles);
        assert_eq!(stats.top_industries.len(), 5);
        assert_eq!(stats.top_industries[0].industry, "F");
        assert_eq!(stats.top_industries[1].industry, "A");
    }
}
