use anyhow::Result;
use clap::Args;
use console::Term;
use tracing::info;

use crate::context::CliContext;
use crate::render;

#[derive(Debug, Args)]
pub struct RegisterCommand {
    pub email: String,

    /// Prompted for when omitted
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoginCommand {
    pub email: String,

    /// Prompted for when omitted
    #[arg(short, long)]
    pub password: Option<String>,
}

impl RegisterCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let password = password_or_prompt(self.password.as_deref())?;
        let session = ctx.app.auth.register(&self.email, &password).await?;
        ctx.sessions.save(&session.token).await?;
        info!(user_id = %session.user_id, "registered from cli");
        println!(
            "{}",
            render::success(&format!("Compte créé, connecté en tant que {}", session.email))
        );
        Ok(())
    }
}

impl LoginCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let password = password_or_prompt(self.password.as_deref())?;
        let session = ctx.app.auth.login(&self.email, &password).await?;
        ctx.sessions.save(&session.token).await?;
        println!(
            "{}",
            render::success(&format!("Connecté en tant que {}", session.email))
        );
        Ok(())
    }
}

/// Revoke the stored session and forget the token, even if it was stale
pub async fn logout(ctx: &CliContext) -> Result<()> {
    if let Some(token) = ctx.sessions.load().await? {
        if let Ok(session) = ctx.app.auth.require_session(Some(&token)).await {
            ctx.app.auth.logout(&session).await?;
        }
    }
    ctx.sessions.clear().await?;
    println!("{}", render::success("Déconnecté"));
    Ok(())
}

pub async fn whoami(ctx: &CliContext) -> Result<()> {
    let session = ctx.session().await?;
    println!(
        "{} (depuis le {})",
        session.email,
        session.issued_at.format("%d/%m/%Y %H:%M")
    );
    Ok(())
}

fn password_or_prompt(given: Option<&str>) -> Result<String> {
    match given {
        Some(password) => Ok(password.to_string()),
        None => {
            let term = Term::stderr();
            term.write_str("Mot de passe : ")?;
            Ok(term.read_secure_line()?)
        }
    }
}
