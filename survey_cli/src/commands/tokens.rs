use anyhow::Result;
use clap::{Args, Subcommand};
use survey_lib::validation;
use survey_lib::{CachedClient, Paginated, TokenQuery};

use crate::output::{print_json, print_tokens, OutputFormat};

#[derive(Args)]
pub struct TokensArgs {
    #[command(subcommand)]
    pub command: TokenCommand,
}

#[derive(Subcommand)]
pub enum TokenCommand {
    /// List access tokens of a survey
    List {
        #[arg(long)]
        survey_id: String,
        /// Only used (true) or unused (false) tokens
        #[arg(long)]
        used: Option<bool>,
        #[arg(long, default_value = "0")]
        page: i64,
        #[arg(long, default_value = "5")]
        page_size: i64,
    },
    /// Create new one-time access tokens
    Create {
        #[arg(long)]
        survey_id: String,
        #[arg(long, default_value = "1")]
        amount: u32,
    },
    /// Count access tokens
    Count {
        #[arg(long)]
        survey_id: String,
        #[arg(long)]
        used: Option<bool>,
    },
    /// Delete an access token
    Delete {
        /// Token id
        id: String,
    },
    /// Mail one access link to each address
    Email {
        #[arg(long)]
        survey_id: String,
        /// Recipient addresses
        #[arg(required = true)]
        emails: Vec<String>,
    },
}

pub async fn run(args: &TokensArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    match &args.command {
        TokenCommand::List {
            survey_id,
            used,
            page,
            page_size,
        } => {
            let mut query = TokenQuery::new(&validation::validate_id(survey_id)?)
                .with_page_number(validation::validate_page_number(*page)?)
                .with_page_size(validation::validate_page_size(*page_size)?);
            if let Some(used) = used {
                query = query.with_used(*used);
            }
            let tokens = client.get_tokens(&query).await?;
            print_tokens(&tokens, format)?;
        }
        TokenCommand::Create { survey_id, amount } => {
            let survey_id = validation::validate_id(survey_id)?;
            let amount = validation::validate_token_amount(*amount)?;
            let tokens = client.create_tokens(&survey_id, amount).await?;
            eprintln!("Created {} token(s) for survey {}", tokens.len(), survey_id);
            print_tokens(&tokens, format)?;
        }
        TokenCommand::Count { survey_id, used } => {
            let survey_id = validation::validate_id(survey_id)?;
            let count = client.get_token_count(&survey_id, *used).await?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "survey_id": survey_id,
                    "used": used,
                    "count": count,
                })),
                _ => println!("{}", count),
            }
        }
        TokenCommand::Delete { id } => {
            let id = validation::validate_id(id)?;
            client.delete_token(&id).await?;
            eprintln!("Deleted token {}", id);
        }
        TokenCommand::Email { survey_id, emails } => {
            let survey_id = validation::validate_id(survey_id)?;
            let emails = validation::validate_emails(emails)?;
            client.send_token_links(&survey_id, &emails).await?;
            eprintln!("Sent {} access link(s) for survey {}", emails.len(), survey_id);
        }
    }
    Ok(())
}
