//! Dataset identity on both sides of the translation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A legacy dataset reference as carried by a table link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetKey {
    /// Program code, e.g. `ACS` or `DEC`.
    pub program: String,
    /// Dataset code, often a packed two-digit year plus a span or suffix
    /// token (`13_5YR`, `10_SF1`), sometimes a bare year (`2016`).
    pub dataset: String,
    /// Table or product code.
    pub table: String,
    /// Year taken from elsewhere in the link; overrides any year packed into
    /// the dataset code.
    pub year: Option<String>,
}

impl DatasetKey {
    pub fn new(
        program: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            dataset: dataset.into(),
            table: table.into(),
            year: None,
        }
    }

    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.program, self.dataset, self.table)?;
        if let Some(year) = &self.year {
            write!(f, " ({year})")?;
        }
        Ok(())
    }
}

/// A resolved destination survey, year and table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurveyMapping {
    pub survey: String,
    /// Four-digit year.
    pub year: String,
    pub table: String,
}

impl SurveyMapping {
    pub fn new(
        survey: impl Into<String>,
        year: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            survey: survey.into(),
            year: year.into(),
            table: table.into(),
        }
    }

    /// Destination composite identifier: `SURVEY + YEAR + "." + TABLE`.
    pub fn tid(&self) -> String {
        format!("{}{}.{}", self.survey, self.year, self.table)
    }

    /// Whether every component is populated.
    pub fn is_complete(&self) -> bool {
        !(self.survey.is_empty() || self.year.is_empty() || self.table.is_empty())
    }
}
