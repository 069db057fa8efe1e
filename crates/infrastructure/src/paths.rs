//! Default locations of the database, session token and exports

use domain::config::PrediktorConfig;
use std::path::PathBuf;

const APP_DIR: &str = "prediktor";

/// Platform data directory, falling back to the working directory
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR))
}

pub fn database_path(config: &PrediktorConfig) -> PathBuf {
    config
        .storage
        .database_path
        .clone()
        .unwrap_or_else(|| data_dir().join("prediktor.db"))
}

/// File holding the token of the signed-in session
pub fn session_file() -> PathBuf {
    data_dir().join("session")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_database_path_wins() {
        let mut config = PrediktorConfig::default();
        assert!(database_path(&config).ends_with("prediktor/prediktor.db"));

        config.storage.database_path = Some(PathBuf::from("/tmp/p.db"));
        assert_eq!(database_path(&config), PathBuf::from("/tmp/p.db"));
    }
}
