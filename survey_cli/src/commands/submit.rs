use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use survey_lib::types::{ConstrainedAnswer, FreestyleAnswer, SurveyDescriptor};
use survey_lib::validation;
use survey_lib::CachedClient;

use crate::output::{print_outcome, OutputFormat};

#[derive(Args)]
pub struct SubmitArgs {
    /// Survey to answer
    #[arg(long)]
    pub survey_id: String,

    /// The survey is secured and needs a one-time access token
    #[arg(long)]
    pub secured: bool,

    /// One-time access token for a secured survey
    #[arg(long)]
    pub token: Option<String>,

    /// JSON file with `constrained_answers` and `freestyle_answers` arrays
    #[arg(long)]
    pub answers: PathBuf,
}

#[derive(Deserialize, Debug, Default)]
pub struct AnswersFile {
    #[serde(default)]
    pub constrained_answers: Vec<ConstrainedAnswer>,
    #[serde(default)]
    pub freestyle_answers: Vec<FreestyleAnswer>,
}

pub fn load_answers(path: &Path) -> Result<AnswersFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file {}", path.display()))?;
    let answers: AnswersFile = serde_json::from_str(&raw)
        .with_context(|| format!("answers file {} is not valid JSON", path.display()))?;
    Ok(answers)
}

pub async fn run(args: &SubmitArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let survey_id = validation::validate_id(&args.survey_id)?;
    let answers = load_answers(&args.answers)?;
    let survey = if args.secured {
        SurveyDescriptor::secured(&survey_id)
    } else {
        SurveyDescriptor::public(&survey_id)
    };

    let outcome = client
        .submit(
            answers.constrained_answers,
            answers.freestyle_answers,
            &survey,
            args.token.as_deref(),
        )
        .await;
    print_outcome(&outcome, format);

    if !outcome.is_success() {
        anyhow::bail!("submission was not accepted ({})", outcome.kind);
    }
    Ok(())
}
