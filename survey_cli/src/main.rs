mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use survey_lib::{CachedClient, ClientConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "surveyctl")]
#[command(about = "Inspect and answer surveys on a survey backend")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Backend base URL (overrides SURVEY_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Authorization token sent verbatim (overrides SURVEY_JWT)
    #[arg(long, global = true)]
    jwt: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show submission counts (served from the count cache when fresh)
    Count(commands::counts::CountArgs),
    /// List a survey's submissions
    Submissions(commands::submissions::SubmissionsArgs),
    /// Show a single submission
    Submission(commands::submissions::SubmissionArgs),
    /// Submit answers to a survey
    Submit(commands::submit::SubmitArgs),
    /// Manage access tokens of secured surveys
    Tokens(commands::tokens::TokensArgs),
    /// Log in and print the JWT
    Login(commands::account::LoginArgs),
    /// Show the logged-in user
    Whoami,
    /// Change or delete the logged-in account
    Account(commands::account::AccountArgs),
    /// Delete a survey
    DeleteSurvey(commands::account::DeleteSurveyArgs),
    /// Manage the local count cache
    Cache(commands::cache::CacheArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("survey=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(jwt) = &cli.jwt {
        config.jwt = Some(jwt.clone());
    }
    let client = CachedClient::from_config(&config);

    match &cli.command {
        Commands::Count(args) => commands::counts::run(args, &client, &format).await?,
        Commands::Submissions(args) => commands::submissions::run_list(args, &client, &format).await?,
        Commands::Submission(args) => commands::submissions::run_one(args, &client, &format).await?,
        Commands::Submit(args) => commands::submit::run(args, &client, &format).await?,
        Commands::Tokens(args) => commands::tokens::run(args, &client, &format).await?,
        Commands::Login(args) => commands::account::run_login(args, &client, &format).await?,
        Commands::Whoami => commands::account::run_whoami(&client, &format).await?,
        Commands::Account(args) => commands::account::run_account(args, &client).await?,
        Commands::DeleteSurvey(args) => commands::account::run_delete_survey(args, &client).await?,
        Commands::Cache(args) => commands::cache::run(args, &client, &config),
    }

    Ok(())
}
