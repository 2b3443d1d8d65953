//! Line-by-line conversion with exit-code tiers.
//!
//! Each input line converts independently. Failures are logged and counted
//! but never stop the batch; the summary decides the process exit code.

use std::collections::BTreeMap;
use std::io::{self, Write};

use aff_model::ErrorKind;
use aff_transform::Transformer;
use serde::Serialize;
use tracing::{error, info, warn};

/// Exit code when every line converted.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code when at least one line is malformed or its data is gone.
pub const EXIT_HARD_FAILURE: i32 = 1;
/// Exit code when the worst outcome is a missing rule or a low-confidence
/// conversion under strict mode.
pub const EXIT_SOFT_FAILURE: i32 = 2;

/// How converted lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The destination URL alone; failed lines print nothing.
    #[default]
    Url,
    /// One [`LineRecord`] per line as JSON.
    Json,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub strict: bool,
    pub output: OutputFormat,
}

/// What happened to one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    Converted,
    LowConfidence,
    /// Low confidence, rejected by strict mode.
    Escalated,
    Failed,
}

/// JSON record written for each line in [`OutputFormat::Json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    pub input: String,
    pub status: LineStatus,
    pub url: Option<String>,
    pub kind: Option<ErrorKind>,
    pub message: Option<String>,
}

/// Counts per outcome for a whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub low_confidence: usize,
    pub escalated: usize,
    pub failures: BTreeMap<ErrorKind, usize>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.converted + self.low_confidence + self.escalated + self.failed()
    }

    pub fn failed(&self) -> usize {
        self.failures.values().sum()
    }

    pub fn failed_with(&self, kind: ErrorKind) -> usize {
        self.failures.get(&kind).copied().unwrap_or(0)
    }

    fn record(&mut self, record: &LineRecord) {
        match (record.status, record.kind) {
            (LineStatus::Converted, _) => self.converted += 1,
            (LineStatus::LowConfidence, _) => self.low_confidence += 1,
            (LineStatus::Escalated, _) => self.escalated += 1,
            (LineStatus::Failed, Some(kind)) => *self.failures.entry(kind).or_default() += 1,
            (LineStatus::Failed, None) => {}
        }
    }

    /// Hard failures outrank soft ones; strict-mode escalations are soft.
    pub fn exit_code(&self) -> i32 {
        let hard = self
            .failures
            .iter()
            .any(|(kind, count)| !kind.is_soft() && *count > 0);
        if hard {
            EXIT_HARD_FAILURE
        } else if self.escalated > 0 || self.failed() > 0 {
            EXIT_SOFT_FAILURE
        } else {
            EXIT_SUCCESS
        }
    }
}

/// Converts one line and classifies the outcome.
pub fn convert_line(transformer: &Transformer<'_>, input: &str, strict: bool) -> LineRecord {
    let record = |status: LineStatus,
                  url: Option<String>,
                  kind: Option<ErrorKind>,
                  message: Option<String>| LineRecord {
        input: input.to_string(),
        status,
        url,
        kind,
        message,
    };
    match transformer.convert(input) {
        Ok(conversion) => match conversion.caveat {
            None => record(LineStatus::Converted, Some(conversion.url), None, None),
            Some(caveat) if strict => {
                error!(input, caveat = %caveat, "low-confidence conversion rejected");
                record(LineStatus::Escalated, None, None, Some(caveat.to_string()))
            }
            Some(caveat) => {
                warn!(input, url = %conversion.url, caveat = %caveat, "low-confidence conversion");
                record(
                    LineStatus::LowConfidence,
                    Some(conversion.url),
                    None,
                    Some(caveat.to_string()),
                )
            }
        },
        Err(err) => {
            let kind = err.kind();
            error!(input, kind = %kind, "{err}");
            record(LineStatus::Failed, None, Some(kind), Some(err.to_string()))
        }
    }
}

/// Converts every non-blank line, writing results to `out`.
///
/// # Errors
///
/// Only write failures on `out` end the batch early.
pub fn run_batch<I, S, W>(
    transformer: &Transformer<'_>,
    lines: I,
    options: BatchOptions,
    out: &mut W,
) -> io::Result<BatchSummary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    W: Write,
{
    let mut summary = BatchSummary::default();
    for line in lines {
        let input = line.as_ref().trim();
        if input.is_empty() {
            continue;
        }
        let record = convert_line(transformer, input, options.strict);
        summary.record(&record);
        match options.output {
            OutputFormat::Url => {
                if let Some(url) = &record.url {
                    writeln!(out, "{url}")?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &record).map_err(io::Error::other)?;
                writeln!(out)?;
            }
        }
    }
    info!(
        total = summary.total(),
        converted = summary.converted,
        low_confidence = summary.low_confidence,
        escalated = summary.escalated,
        failed = summary.failed(),
        "batch complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_tiers() {
        let mut summary = BatchSummary {
            converted: 3,
            ..BatchSummary::default()
        };
        assert_eq!(summary.exit_code(), EXIT_SUCCESS);

        summary.low_confidence = 1;
        assert_eq!(summary.exit_code(), EXIT_SUCCESS);

        summary.escalated = 1;
        assert_eq!(summary.exit_code(), EXIT_SOFT_FAILURE);

        summary.failures.insert(ErrorKind::NotImplemented, 2);
        assert_eq!(summary.exit_code(), EXIT_SOFT_FAILURE);

        summary.failures.insert(ErrorKind::UnsupportedData, 1);
        assert_eq!(summary.exit_code(), EXIT_HARD_FAILURE);
        assert_eq!(summary.total(), 3 + 1 + 1 + 3);
    }

    #[test]
    fn contract_violations_are_hard_failures() {
        let mut summary = BatchSummary::default();
        summary.failures.insert(ErrorKind::Contract, 1);
        assert_eq!(summary.exit_code(), EXIT_HARD_FAILURE);
    }
}
