use anyhow::Result;
use clap::Args;
use survey_lib::validation;
use survey_lib::{CachedClient, Paginated, SubmissionQuery};

use crate::output::{print_submissions, OutputFormat};

#[derive(Args)]
pub struct SubmissionsArgs {
    /// Survey whose submissions to list
    #[arg(long)]
    pub survey_id: String,

    /// Page number (0-indexed)
    #[arg(long, default_value = "0")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "3")]
    pub page_size: i64,
}

#[derive(Args)]
pub struct SubmissionArgs {
    /// Submission id, e.g. the one tied to a used access token
    pub id: String,
}

pub async fn run_list(
    args: &SubmissionsArgs,
    client: &CachedClient,
    format: &OutputFormat,
) -> Result<()> {
    let survey_id = validation::validate_id(&args.survey_id)?;
    let query = SubmissionQuery::new(&survey_id)
        .with_page_number(validation::validate_page_number(args.page)?)
        .with_page_size(validation::validate_page_size(args.page_size)?);

    let submissions = client.get_submissions(&query).await?;

    match client.submission_count(&survey_id).await {
        Some(total) => eprintln!(
            "Page {} ({} of {} submissions)",
            args.page,
            submissions.len(),
            total
        ),
        None => eprintln!("Page {} ({} submissions)", args.page, submissions.len()),
    }

    print_submissions(&submissions, format)
}

pub async fn run_one(args: &SubmissionArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let id = validation::validate_id(&args.id)?;
    let submission = client.get_submission(&id).await?;
    print_submissions(&[submission], format)
}
