//! Dataset mapping engine.
//!
//! Translates a legacy `(program, dataset, table, year?)` key into the
//! destination `(survey, year, table)` triple. Each program code is owned by
//! one [`ProgramResolver`] held in a [`ResolverRegistry`], so adding a
//! program never touches shared control flow.
//!
//! Much legacy data was never migrated. Resolvers fail with
//! `Unsupported` when the destination will never carry the data, and with
//! `NotImplemented` when the data exists but the table catalogs have not
//! been reconciled yet.
//!
//! # Registered Programs
//!
//! | Program | Status |
//! |---------|--------|
//! | ACS | 1/3/5-year estimates from 2010 |
//! | DEC | Summary File 1 and congressional district files from 2010 |
//! | NES | Nonemployer statistics from 2012 |
//! | SBO | Company summary tables only |
//! | ECN, BP | Pending table catalog reconciliation |
//! | ASM, COG, CFS, PEP, EEO | Never migrated |
//! | AHS, PP, GEP, SSF, SGF, STC, BES, SLF | Served by a different system |

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use aff_model::{DatasetKey, Result, SurveyMapping, TransformError};
use tracing::debug;

use crate::fields::{PackedDataset, short_year, widen_year, year_number};

/// Programs whose data never reached the destination portal.
pub const NEVER_MIGRATED: &[&str] = &["ASM", "COG", "CFS", "PEP", "EEO"];

/// Programs published through a different data access system.
pub const EXTERNAL_SYSTEM: &[&str] = &["AHS", "PP", "GEP", "SSF", "SGF", "STC", "BES", "SLF"];

const ACS_CUTOVER: u16 = 2010;
const DECENNIAL_CUTOVER: u16 = 2010;
const NONEMPLOYER_CUTOVER: u16 = 2012;

/// How much of a program's legacy data the destination carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SupportStatus {
    /// Some datasets or tables convert.
    Partial,
    /// A rule is needed but not written yet.
    Pending,
    /// Available elsewhere, never on the destination portal.
    ExternalSystem,
    /// Never migrated.
    NeverMigrated,
}

impl SupportStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Partial => "partial",
            Self::Pending => "pending",
            Self::ExternalSystem => "external system",
            Self::NeverMigrated => "never migrated",
        }
    }
}

impl fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution strategy for one legacy program code.
pub trait ProgramResolver: Send + Sync {
    /// The program code this resolver handles (e.g. "ACS").
    fn program_code(&self) -> &'static str;

    fn status(&self) -> SupportStatus;

    /// One-line description of what converts, for support listings.
    fn description(&self) -> &'static str;

    /// Resolves a dataset key whose program is [`Self::program_code`].
    ///
    /// # Errors
    ///
    /// `Unsupported` when the destination never carries the data,
    /// `NotImplemented` for pending rules, and input errors for keys that
    /// cannot be decoded.
    fn resolve(&self, key: &DatasetKey) -> Result<SurveyMapping>;
}

/// Registry of program resolvers indexed by program code.
pub struct ResolverRegistry {
    resolvers: BTreeMap<&'static str, Box<dyn ProgramResolver>>,
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("programs", &self.resolvers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ResolverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            resolvers: BTreeMap::new(),
        }
    }

    /// Registers a resolver for its program code, replacing any previous one.
    pub fn register(&mut self, resolver: Box<dyn ProgramResolver>) {
        self.resolvers.insert(resolver.program_code(), resolver);
    }

    pub fn get(&self, program: &str) -> Option<&dyn ProgramResolver> {
        self.resolvers.get(program).map(|resolver| resolver.as_ref())
    }

    /// Registered resolvers in program-code order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ProgramResolver> + '_ {
        self.resolvers.values().map(|resolver| resolver.as_ref())
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Resolves a dataset key with the resolver for its program.
    ///
    /// Unknown programs, and resolutions that leave any component empty,
    /// fail with `Unresolvable`.
    pub fn resolve(&self, key: &DatasetKey) -> Result<SurveyMapping> {
        let unresolvable = || TransformError::Unresolvable {
            program: key.program.clone(),
            dataset: key.dataset.clone(),
        };
        let resolver = self.get(&key.program).ok_or_else(unresolvable)?;
        let mapping = resolver.resolve(key)?;
        if !mapping.is_complete() {
            return Err(unresolvable());
        }
        debug!(
            key = %key,
            tid = %mapping.tid(),
            "resolved dataset"
        );
        Ok(mapping)
    }
}

/// Cached default registry with every known program.
static DEFAULT_REGISTRY: OnceLock<ResolverRegistry> = OnceLock::new();

/// Returns the default resolver registry.
pub fn default_registry() -> &'static ResolverRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> ResolverRegistry {
    let mut registry = ResolverRegistry::new();
    for &program in NEVER_MIGRATED {
        registry.register(Box::new(Withdrawn::never_migrated(program)));
    }
    for &program in EXTERNAL_SYSTEM {
        registry.register(Box::new(Withdrawn::external_system(program)));
    }
    // Economic census tables do not line up between the two catalogs.
    registry.register(Box::new(Pending {
        program: "ECN",
        reason: "economic census tables do not line up between the legacy and destination catalogs",
    }));
    // CB1600CZ21 != CB1600ZBP, whatever the published crosswalk says.
    registry.register(Box::new(Pending {
        program: "BP",
        reason: "business patterns table ids are not consistent between the legacy and destination catalogs",
    }));
    registry.register(Box::new(AmericanCommunitySurvey));
    registry.register(Box::new(DecennialCensus));
    registry.register(Box::new(Nonemployer));
    registry.register(Box::new(BusinessOwners));
    registry
}

/// Resolves a key with the default registry.
pub fn resolve(key: &DatasetKey) -> Result<SurveyMapping> {
    default_registry().resolve(key)
}

/// A program that always fails with `Unsupported`.
#[derive(Debug, Clone, Copy)]
pub struct Withdrawn {
    program: &'static str,
    status: SupportStatus,
}

impl Withdrawn {
    pub const fn never_migrated(program: &'static str) -> Self {
        Self {
            program,
            status: SupportStatus::NeverMigrated,
        }
    }

    pub const fn external_system(program: &'static str) -> Self {
        Self {
            program,
            status: SupportStatus::ExternalSystem,
        }
    }
}

impl ProgramResolver for Withdrawn {
    fn program_code(&self) -> &'static str {
        self.program
    }

    fn status(&self) -> SupportStatus {
        self.status
    }

    fn description(&self) -> &'static str {
        match self.status {
            SupportStatus::ExternalSystem => "published through a different data access system",
            _ => "not available on the destination portal",
        }
    }

    fn resolve(&self, _key: &DatasetKey) -> Result<SurveyMapping> {
        Err(TransformError::unsupported(format!(
            "{} data is {}",
            self.program,
            self.description()
        )))
    }
}

/// A program whose rule is known to be needed but not written yet.
#[derive(Debug, Clone, Copy)]
pub struct Pending {
    program: &'static str,
    reason: &'static str,
}

impl ProgramResolver for Pending {
    fn program_code(&self) -> &'static str {
        self.program
    }

    fn status(&self) -> SupportStatus {
        SupportStatus::Pending
    }

    fn description(&self) -> &'static str {
        self.reason
    }

    fn resolve(&self, _key: &DatasetKey) -> Result<SurveyMapping> {
        Err(TransformError::not_implemented(self.reason))
    }
}

/// American Community Survey.
///
/// Dataset codes end in a span token (`1YR`, `3YR`, `5YR`) that selects the
/// detailed-table survey (`ACSDT5Y`); profile and comparison tables live in
/// their own surveys.
#[derive(Debug, Clone, Copy)]
pub struct AmericanCommunitySurvey;

impl AmericanCommunitySurvey {
    const SPAN_TOKENS: &'static [(&'static str, &'static str)] =
        &[("1YR", "1Y"), ("3YR", "3Y"), ("5YR", "5Y")];

    fn survey_family(table: &str) -> &'static str {
        match table {
            "DP02" | "DP02PR" | "DP03" | "DP04" | "DP05" => "ACSDP",
            "CP02" | "CP03" | "CP04" | "CP05" => "ACSCP",
            "S0201" => "ACSSPP",
            _ => "ACSDT",
        }
    }
}

impl ProgramResolver for AmericanCommunitySurvey {
    fn program_code(&self) -> &'static str {
        "ACS"
    }

    fn status(&self) -> SupportStatus {
        SupportStatus::Partial
    }

    fn description(&self) -> &'static str {
        "1, 3 and 5-year estimates from 2010"
    }

    fn resolve(&self, key: &DatasetKey) -> Result<SurveyMapping> {
        let packed = PackedDataset::parse(&key.dataset);
        let span = Self::SPAN_TOKENS
            .iter()
            .find(|(token, _)| packed.token.ends_with(token))
            .map(|(_, span)| *span)
            .ok_or_else(|| {
                TransformError::unsupported(format!(
                    "ACS dataset {} does not exist on the destination portal",
                    key.dataset
                ))
            })?;
        let year = packed.resolve_year(key.year.as_deref())?;
        if year_number(&year)? < ACS_CUTOVER {
            return Err(TransformError::unsupported(format!(
                "pre-{ACS_CUTOVER} ACS data is not available on the destination portal"
            )));
        }
        let survey = format!("{}{span}", Self::survey_family(&key.table));
        Ok(SurveyMapping::new(survey, year, key.table.clone()))
    }
}

/// Decennial census.
///
/// The last three characters of the dataset code pick the destination survey.
#[derive(Debug, Clone, Copy)]
pub struct DecennialCensus;

impl DecennialCensus {
    const SURVEYS: &'static [(&'static str, &'static str)] = &[
        ("113", "DECENNIALCD113"),
        ("115", "DECENNIALCD115"),
        ("SF1", "DECENNIALSF1"),
    ];

    /// Geographic comparison tables were dropped from the destination.
    const DEPRECATED_TABLE_PREFIX: &'static str = "GCT";
}

impl ProgramResolver for DecennialCensus {
    fn program_code(&self) -> &'static str {
        "DEC"
    }

    fn status(&self) -> SupportStatus {
        SupportStatus::Partial
    }

    fn description(&self) -> &'static str {
        "Summary File 1 and congressional district files from 2010"
    }

    fn resolve(&self, key: &DatasetKey) -> Result<SurveyMapping> {
        if key.table.starts_with(Self::DEPRECATED_TABLE_PREFIX) {
            return Err(TransformError::unsupported(
                "decennial geographic comparison tables are not available on the destination portal",
            ));
        }
        let packed = PackedDataset::parse(&key.dataset);
        let survey = packed
            .suffix()
            .and_then(|suffix| {
                Self::SURVEYS
                    .iter()
                    .find(|(candidate, _)| *candidate == suffix)
            })
            .map(|(_, survey)| *survey)
            .ok_or_else(|| {
                TransformError::unsupported(format!(
                    "decennial dataset {} is not available on the destination portal",
                    key.dataset
                ))
            })?;
        let year = packed.resolve_year(key.year.as_deref())?;
        if year_number(&year)? < DECENNIAL_CUTOVER {
            return Err(TransformError::unsupported(format!(
                "pre-{DECENNIAL_CUTOVER} decennial data is not available on the destination portal"
            )));
        }
        Ok(SurveyMapping::new(survey, year, key.table.clone()))
    }
}

/// Nonemployer statistics: one table per year.
#[derive(Debug, Clone, Copy)]
pub struct Nonemployer;

impl ProgramResolver for Nonemployer {
    fn program_code(&self) -> &'static str {
        "NES"
    }

    fn status(&self) -> SupportStatus {
        SupportStatus::Partial
    }

    fn description(&self) -> &'static str {
        "nonemployer statistics from 2012"
    }

    fn resolve(&self, key: &DatasetKey) -> Result<SurveyMapping> {
        let year = widen_year(key.year.as_deref().unwrap_or(&key.dataset), "dataset")?;
        if year_number(&year)? < NONEMPLOYER_CUTOVER {
            return Err(TransformError::unsupported(format!(
                "pre-{NONEMPLOYER_CUTOVER} nonemployer data is not available on the destination portal"
            )));
        }
        let table = format!("NS{}00NONEMP", short_year(&year)?);
        Ok(SurveyMapping::new("NONEMP", year, table))
    }
}

/// Survey of Business Owners: only company summary tables were migrated.
#[derive(Debug, Clone, Copy)]
pub struct BusinessOwners;

impl BusinessOwners {
    const COMPANY_SUMMARY_MARKER: char = 'A';
}

impl ProgramResolver for BusinessOwners {
    fn program_code(&self) -> &'static str {
        "SBO"
    }

    fn status(&self) -> SupportStatus {
        SupportStatus::Partial
    }

    fn description(&self) -> &'static str {
        "company summary tables only"
    }

    fn resolve(&self, key: &DatasetKey) -> Result<SurveyMapping> {
        let year = widen_year(key.year.as_deref().unwrap_or(&key.dataset), "dataset")?;
        // Table codes look like `00CSA01`; the third character from the end
        // names the table family.
        if key.table.chars().rev().nth(2) != Some(Self::COMPANY_SUMMARY_MARKER) {
            return Err(TransformError::unsupported(
                "Survey of Business Owners tables other than the company summary are not available on the destination portal",
            ));
        }
        let table = format!("SB{}{}", short_year(&year)?, key.table);
        Ok(SurveyMapping::new("SBOCS", year, table))
    }
}
