use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use survey_lib::types::UserUpdate;
use survey_lib::validation;
use survey_lib::CachedClient;

use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub username: String,

    /// Password (falls back to SURVEY_PASSWORD)
    #[arg(long, env = "SURVEY_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args)]
pub struct DeleteSurveyArgs {
    /// Survey id
    pub id: String,
}

#[derive(Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Change username, email or password
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Current password (falls back to SURVEY_PASSWORD)
        #[arg(long, env = "SURVEY_PASSWORD", hide_env_values = true)]
        old_password: String,
        #[arg(long)]
        new_password: Option<String>,
    },
    /// Delete the logged-in account
    Delete {
        /// Must match the logged-in username
        #[arg(long)]
        username: String,
        /// Current password (falls back to SURVEY_PASSWORD)
        #[arg(long, env = "SURVEY_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

/// Turns CLI flags into an update body. Blank values count as unchanged.
pub fn build_update(
    username: Option<&str>,
    email: Option<&str>,
    old_password: &str,
    new_password: Option<&str>,
) -> UserUpdate {
    let changed = |v: Option<&str>| v.map(str::trim).filter(|v| !v.is_empty()).map(String::from);
    UserUpdate {
        username: changed(username),
        email: changed(email),
        old_password: old_password.to_string(),
        new_password: new_password.filter(|p| !p.is_empty()).map(String::from),
    }
}

pub async fn run_account(args: &AccountArgs, client: &CachedClient) -> Result<()> {
    match &args.command {
        AccountCommand::Update {
            username,
            email,
            old_password,
            new_password,
        } => {
            let update = build_update(
                username.as_deref(),
                email.as_deref(),
                old_password,
                new_password.as_deref(),
            );
            client.update_user(&update).await?;
            eprintln!("Changed your user data");
            if update.changes_password() {
                eprintln!("Password changed; the current JWT is no longer valid, log in again");
            }
        }
        AccountCommand::Delete { username, password } => {
            let info = client.get_user_info().await?;
            if info.username != username.trim() {
                bail!("username does not match the logged-in user '{}'", info.username);
            }
            client.delete_user(password).await?;
            eprintln!("Deleted account {}; discard the current JWT", info.username);
        }
    }
    Ok(())
}

pub async fn run_login(args: &LoginArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let login = client.login(args.username.trim(), &args.password).await?;
    match format {
        OutputFormat::Json => print_json(&login),
        // Bare token so it can be captured into SURVEY_JWT.
        _ => println!("{}", login.jwt),
    }
    Ok(())
}

pub async fn run_whoami(client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let info = client.get_user_info().await?;
    match format {
        OutputFormat::Json => print_json(&info),
        _ => match &info.email {
            Some(email) => println!("{} <{}>", info.username, email),
            None => println!("{}", info.username),
        },
    }
    Ok(())
}

pub async fn run_delete_survey(args: &DeleteSurveyArgs, client: &CachedClient) -> Result<()> {
    let id = validation::validate_id(&args.id)?;
    client.delete_survey(&id).await?;
    eprintln!("Deleted survey {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_unchanged() {
        let update = build_update(Some("  "), None, "pw", Some(""));
        assert_eq!(update.username, None);
        assert_eq!(update.email, None);
        assert_eq!(update.new_password, None);
        assert!(!update.changes_password());
    }

    #[test]
    fn filled_fields_are_sent() {
        let update = build_update(Some(" ada2 "), Some("ada@example.org"), "pw", Some("pw2"));
        assert_eq!(update.username.as_deref(), Some("ada2"));
        assert_eq!(update.email.as_deref(), Some("ada@example.org"));
        assert_eq!(update.old_password, "pw");
        assert!(update.changes_password());
    }
}
