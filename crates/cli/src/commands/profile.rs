use anyhow::Result;
use application::ApplicationError;
use clap::{Args, Subcommand};
use domain::entities::ProfileUpdate;
use domain::UserId;

use crate::context::CliContext;
use crate::render;

#[derive(Debug, Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileSubcommand {
    /// Show the signed-in user's profile
    Show,
    /// Change profile fields; omitted fields are kept
    Update(ProfileUpdateArgs),
    /// Completion statistics over all users
    Stats,
    /// Users whose profile names this industry
    Industry { industry: String },
}

#[derive(Debug, Default, Args)]
pub struct ProfileUpdateArgs {
    /// Profile to change, defaults to the signed-in user
    #[arg(long)]
    pub user: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub function: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub timezone: Option<String>,
    #[arg(long)]
    pub company_name: Option<String>,
    #[arg(long)]
    pub company_size: Option<String>,
    #[arg(long)]
    pub industry: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long)]
    pub email_notifications: Option<bool>,
    #[arg(long)]
    pub push_notifications: Option<bool>,
    #[arg(long)]
    pub weekly_reports: Option<bool>,
    #[arg(long)]
    pub monthly_reports: Option<bool>,
    #[arg(long)]
    pub google_sheets: Option<bool>,
    #[arg(long)]
    pub google_analytics: Option<bool>,
    #[arg(long)]
    pub gemini_api: Option<bool>,
    #[arg(long)]
    pub two_factor_auth: Option<bool>,
    #[arg(long)]
    pub session_timeout: Option<String>,
    #[arg(long)]
    pub data_retention: Option<String>,
}

impl ProfileUpdateArgs {
    pub fn update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            function: self.function.clone(),
            language: self.language.clone(),
            timezone: self.timezone.clone(),
            company_name: self.company_name.clone(),
            company_size: self.company_size.clone(),
            industry: self.industry.clone(),
            country: self.country.clone(),
            currency: self.currency.clone(),
            address: self.address.clone(),
            website: self.website.clone(),
            email_notifications: self.email_notifications,
            push_notifications: self.push_notifications,
            weekly_reports: self.weekly_reports,
            monthly_reports: self.monthly_reports,
            google_sheets: self.google_sheets,
            google_analytics: self.google_analytics,
            gemini_api: self.gemini_api,
            two_factor_auth: self.two_factor_auth,
            session_timeout: self.session_timeout.clone(),
            data_retention: self.data_retention.clone(),
        }
    }
}

impl ProfileCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        let session = ctx.session().await?;
        let profiles = &ctx.app.profiles;

        match &self.command {
            ProfileSubcommand::Show => {
                print!("{}", render::profile(&profiles.show(&session).await?));
            }
            ProfileSubcommand::Update(args) => {
                let update = args.update();
                if update.is_empty() {
                    println!("Aucun champ à modifier.");
                    return Ok(());
                }
                let owner = match &args.user {
                    Some(id) => UserId::parse(id).map_err(ApplicationError::from)?,
                    None => session.user_id.clone(),
                };
                let profile = profiles.update(&session, &owner, update).await?;
                println!("{}", render::success("Profil mis à jour"));
                print!("{}", render::profile(&profile));
            }
            ProfileSubcommand::Stats => {
                print!("{}", render::profile_stats(&profiles.stats(&session).await?));
            }
            ProfileSubcommand::Industry { industry } => {
                let users = profiles.users_by_industry(&session, industry).await?;
                if users.is_empty() {
                    println!("Aucun utilisateur dans ce secteur.");
                }
                for user in users {
                    println!(
                        "{} {}  {}  {}",
                        user.first_name, user.last_name, user.company_name, user.country
                    );
                }
            }
        }
        Ok(())
    }
}
