use application::AppContainer;
use domain::entities::Session;

use crate::session_store::SessionStore;

/// Everything a command needs: the wired services and the token file
pub struct CliContext {
    pub app: AppContainer,
    pub sessions: SessionStore,
}

impl CliContext {
    pub fn new(app: AppContainer, sessions: SessionStore) -> Self {
        Self { app, sessions }
    }

    /// Resolve the stored token. Fails with `Unauthenticated` when signed out.
    pub async fn session(&self) -> anyhow::Result<Session> {
        let token = self.sessions.load().await?;
        Ok(self.app.auth.require_session(token.as_deref()).await?)
    }
}
