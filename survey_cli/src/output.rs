use anyhow::Result;
use serde::Serialize;
use survey_lib::types::{AccessToken, Submission};
use survey_lib::SubmitOutcome;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct CountRow {
    #[tabled(rename = "Survey")]
    #[serde(rename = "Survey")]
    survey_id: String,
    #[tabled(rename = "Submissions")]
    #[serde(rename = "Submissions")]
    count: String,
}

#[derive(Tabled, Serialize)]
struct SubmissionRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Survey")]
    #[serde(rename = "Survey")]
    survey_id: String,
    #[tabled(rename = "Choices")]
    #[serde(rename = "Choices")]
    constrained: usize,
    #[tabled(rename = "Free Text")]
    #[serde(rename = "Free Text")]
    freestyle: String,
}

#[derive(Tabled, Serialize)]
struct TokenRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Token")]
    #[serde(rename = "Token")]
    token: String,
    #[tabled(rename = "Used")]
    #[serde(rename = "Used")]
    used: String,
    #[tabled(rename = "Submission")]
    #[serde(rename = "Submission")]
    submission_id: String,
}

// -- Row builders --

/// `None` renders as "unavailable": the count could not be fetched, which is
/// not the same as zero submissions.
pub fn build_count_row(survey_id: &str, count: Option<u64>) -> CountRow {
    CountRow {
        survey_id: survey_id.to_string(),
        count: count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unavailable".to_string()),
    }
}

fn build_submission_rows(submissions: &[Submission]) -> Vec<SubmissionRow> {
    submissions
        .iter()
        .map(|s| SubmissionRow {
            id: s.id.clone(),
            survey_id: s.survey_id.clone(),
            constrained: s.constrained_answers.len(),
            freestyle: s
                .freestyle_answers
                .iter()
                .map(|a| truncate(&a.answer, 40))
                .collect::<Vec<_>>()
                .join(" | "),
        })
        .collect()
}

fn build_token_rows(tokens: &[AccessToken]) -> Vec<TokenRow> {
    tokens
        .iter()
        .map(|t| TokenRow {
            id: t.id.clone(),
            token: t.token.clone(),
            used: if t.used { "yes" } else { "no" }.to_string(),
            submission_id: t.submission_id.clone().unwrap_or_default(),
        })
        .collect()
}

// -- Printers --

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_counts(rows: Vec<CountRow>, format: &OutputFormat) -> Result<()> {
    print_rows(rows, format)
}

pub fn print_submissions(submissions: &[Submission], format: &OutputFormat) -> Result<()> {
    match format {
        // Raw records keep the full answer lists.
        OutputFormat::Json => {
            print_json(&submissions);
            Ok(())
        }
        _ => print_rows(build_submission_rows(submissions), format),
    }
}

pub fn print_tokens(tokens: &[AccessToken], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&tokens);
            Ok(())
        }
        _ => print_rows(build_token_rows(tokens), format),
    }
}

pub fn print_outcome(outcome: &SubmitOutcome, format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(outcome),
        _ => println!("{}", outcome),
    }
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
