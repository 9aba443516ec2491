use anyhow::Result;
use clap::Args;
use survey_lib::validation;
use survey_lib::CachedClient;

use crate::output::{build_count_row, print_counts, OutputFormat};

#[derive(Args)]
pub struct CountArgs {
    /// One or more survey ids. Repeated ids are answered from the cache.
    #[arg(required = true)]
    pub survey_ids: Vec<String>,
}

pub async fn run(args: &CountArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let mut rows = Vec::with_capacity(args.survey_ids.len());
    for raw in &args.survey_ids {
        let survey_id = validation::validate_id(raw)?;
        let count = client.submission_count(&survey_id).await;
        rows.push(build_count_row(&survey_id, count));
    }
    print_counts(rows, format)
}
