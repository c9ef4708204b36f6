use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use kollectit_core::{DomainError, DomainResult, ValueObject};

/// Earliest year a SKU may carry (founding year of the catalog).
pub const MIN_YEAR: i32 = 2020;

/// Lowest sequence number in a (prefix, year) series.
pub const MIN_SEQUENCE: u16 = 1;

/// Highest sequence number representable by the 4-digit suffix.
pub const MAX_SEQUENCE: u16 = 9999;

/// Catch-all prefix, used when no category prefix is given.
pub const DEFAULT_PREFIX: &str = "KOL";

const PREFIX_MIN_LEN: usize = 3;
const PREFIX_MAX_LEN: usize = 4;

/// Known category prefixes and their display labels, for validation and
/// auto-completion.
pub const CATEGORY_PREFIXES: &[(&str, &str)] = &[
    ("MILI", "Militaria"),
    ("COLL", "Collectibles"),
    ("BOOK", "Rare Books"),
    ("ARTS", "Fine Art"),
    ("KOL", "General"), // legacy catch-all
];

/// Why a candidate SKU was rejected.
///
/// Every failure in this module is a returned value; nothing panics. Messages
/// are written to be surfaced directly to operators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkuError {
    /// Input was absent or empty.
    #[error("SKU is required")]
    Missing,

    /// Input does not match the `PREFIX-YYYY-NNNN` grammar. Carries the
    /// input as given, before any normalization.
    #[error("Invalid SKU format: \"{given}\". Expected: PREFIX-YYYY-NNNN (e.g., MILI-2026-0001)")]
    Malformed { given: String },

    /// Grammar matched but the year is outside `[2020, current year + 1]`.
    #[error("SKU year {year} is invalid. Must be between 2020 and {max_year}")]
    YearOutOfRange { year: i32, max_year: i32 },

    /// Grammar matched but the sequence is outside `[1, 9999]`.
    #[error("SKU sequence {sequence} is invalid. Must be between 0001 and 9999")]
    SequenceOutOfRange { sequence: u16 },

    /// Input does not match the legacy `SKU-YYYY-XXX` grammar.
    #[error("Invalid legacy SKU format: \"{given}\". Expected: SKU-YYYY-XXX (e.g., SKU-2025-001)")]
    LegacyMalformed { given: String },
}

impl From<SkuError> for DomainError {
    fn from(err: SkuError) -> Self {
        DomainError::validation(err.to_string())
    }
}

/// A parsed, validated SKU: `PREFIX-YYYY-NNNN`.
///
/// Compared by value; the canonical uppercase rendering is available through
/// `Display`. Construction always goes through validation, so a `Sku` in hand
/// is well-formed. The year bound is relative to the wall clock, which is why
/// every constructor has an `*_at` variant taking the current year explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sku {
    prefix: String,
    year: i32,
    sequence: u16,
}

impl ValueObject for Sku {}

impl Sku {
    /// Strict constructor: renders the parts, then validates the result.
    pub fn new(prefix: &str, year: i32, sequence: u16) -> Result<Self, SkuError> {
        Self::new_at(prefix, year, sequence, current_year())
    }

    /// [`Sku::new`] with the current year injected (deterministic).
    pub fn new_at(
        prefix: &str,
        year: i32,
        sequence: u16,
        current_year: i32,
    ) -> Result<Self, SkuError> {
        Self::parse_at(&format_sku(prefix, Some(year), Some(sequence)), current_year)
    }

    /// Parse and validate a candidate against the system clock.
    pub fn parse(candidate: &str) -> Result<Self, SkuError> {
        Self::parse_at(candidate, current_year())
    }

    /// Parse and validate with the current year injected (deterministic).
    ///
    /// Input is trimmed and uppercased before matching, so lowercase SKUs
    /// are accepted and normalized. Internal whitespace is not forgiven, and
    /// the grammar is anchored at both ends.
    pub fn parse_at(candidate: &str, current_year: i32) -> Result<Self, SkuError> {
        if candidate.is_empty() {
            return Err(SkuError::Missing);
        }

        let normalized = candidate.trim().to_ascii_uppercase();
        let (prefix, year, sequence) =
            split_grammar(&normalized).ok_or_else(|| SkuError::Malformed {
                given: candidate.to_string(),
            })?;

        let max_year = current_year + 1;
        if year < MIN_YEAR || year > max_year {
            return Err(SkuError::YearOutOfRange { year, max_year });
        }
        if sequence < MIN_SEQUENCE || sequence > MAX_SEQUENCE {
            return Err(SkuError::SequenceOutOfRange { sequence });
        }

        Ok(Self {
            prefix,
            year,
            sequence,
        })
    }

    /// Category prefix, always uppercase.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Canonical uppercase rendering, `PREFIX-YYYY-NNNN`.
    pub fn formatted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:04}", self.prefix, self.year, self.sequence)
    }
}

impl FromStr for Sku {
    type Err = SkuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split `PREFIX-YYYY-NNNN` into typed parts. Any leftover characters fail
/// the match.
fn split_grammar(normalized: &str) -> Option<(String, i32, u16)> {
    let mut parts = normalized.split('-');
    let prefix = parts.next()?;
    let year = parts.next()?;
    let sequence = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let prefix_ok = (PREFIX_MIN_LEN..=PREFIX_MAX_LEN).contains(&prefix.len())
        && prefix.chars().all(|c| c.is_ascii_uppercase());
    let year_ok = year.len() == 4 && year.chars().all(|c| c.is_ascii_digit());
    let sequence_ok = sequence.len() == 4 && sequence.chars().all(|c| c.is_ascii_digit());
    if !(prefix_ok && year_ok && sequence_ok) {
        return None;
    }

    // Four ASCII digits always fit.
    let year = year.parse().ok()?;
    let sequence = sequence.parse().ok()?;
    Some((prefix.to_string(), year, sequence))
}

/// The wall-clock year, the single ambient input of this module.
///
/// Every time-dependent operation has an `*_at` variant taking the year
/// explicitly; the plain variants just read the system clock through this.
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Build a SKU string from loosely-typed parts. Never fails.
///
/// An empty prefix falls back to [`DEFAULT_PREFIX`]; overlong prefixes are
/// silently truncated to 4 characters; year and sequence default to the
/// current year and 1. The sequence is not range-checked: values above 9999
/// render with five digits and will not pass validation afterwards. Use
/// [`Sku::new`] when the output must be a valid SKU.
pub fn format_sku(prefix: &str, year: Option<i32>, sequence: Option<u16>) -> String {
    let prefix = if prefix.is_empty() {
        DEFAULT_PREFIX.to_string()
    } else {
        prefix
            .chars()
            .take(PREFIX_MAX_LEN)
            .collect::<String>()
            .to_ascii_uppercase()
    };
    let year = year.unwrap_or_else(current_year);
    let sequence = sequence.unwrap_or(MIN_SEQUENCE);

    format!("{prefix}-{year}-{sequence:04}")
}

/// Decompose a SKU string, discarding the failure reason.
///
/// Callers that need to know *why* a candidate was rejected should use
/// [`Sku::parse`] or [`validate_sku`] instead.
pub fn parse_sku(sku: &str) -> Option<Sku> {
    Sku::parse(sku).ok()
}

/// Parsed SKU fields as surfaced to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSku {
    pub prefix: String,
    pub year: i32,
    pub sequence: u16,
    /// Normalized canonical rendering.
    pub formatted: String,
}

impl From<Sku> for ParsedSku {
    fn from(sku: Sku) -> Self {
        let formatted = sku.to_string();
        Self {
            prefix: sku.prefix,
            year: sku.year,
            sequence: sku.sequence,
            formatted,
        }
    }
}

/// Outcome of [`validate_sku`], shaped for direct JSON serialization at the
/// API boundary: failures are data, never panics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedSku>,
}

impl SkuValidation {
    pub fn ok(sku: Sku) -> Self {
        Self {
            valid: true,
            error: None,
            parsed: Some(sku.into()),
        }
    }

    pub fn rejected(err: &SkuError) -> Self {
        Self {
            valid: false,
            error: Some(err.to_string()),
            parsed: None,
        }
    }
}

/// Validate a candidate SKU against the system clock.
///
/// `None` stands in for absent input and reports "SKU is required".
pub fn validate_sku(candidate: Option<&str>) -> SkuValidation {
    validate_sku_at(candidate, current_year())
}

/// [`validate_sku`] with the current year injected (deterministic).
pub fn validate_sku_at(candidate: Option<&str>, current_year: i32) -> SkuValidation {
    let Some(candidate) = candidate else {
        return SkuValidation::rejected(&SkuError::Missing);
    };
    match Sku::parse_at(candidate, current_year) {
        Ok(sku) => SkuValidation::ok(sku),
        Err(err) => SkuValidation::rejected(&err),
    }
}

/// Display label for a known prefix, case-insensitive.
pub fn prefix_label(prefix: &str) -> Option<&'static str> {
    CATEGORY_PREFIXES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(prefix))
        .map(|(_, label)| *label)
}

/// Whether a prefix is in the known category registry.
pub fn is_known_prefix(prefix: &str) -> bool {
    prefix_label(prefix).is_some()
}

/// Suggest a category prefix for a free-text category slug.
///
/// Containment rules are tested in a fixed priority order; a slug matching
/// several rules resolves to the first hit. Callers rely on the ordering for
/// deterministic prefix assignment, so it is part of the contract. The
/// fallback (first four characters of the slug, uppercased, no padding) is
/// returned as-is even when it is not a known prefix.
pub fn suggested_prefix(category_slug: &str) -> String {
    let slug = category_slug.to_lowercase();

    if slug.contains("milit") {
        return "MILI".to_string();
    }
    if slug.contains("collect") {
        return "COLL".to_string();
    }
    if slug.contains("book") || slug.contains("rare") {
        return "BOOK".to_string();
    }
    if slug.contains("art") || slug.contains("fine") {
        return "ARTS".to_string();
    }

    slug.chars().take(PREFIX_MAX_LEN).collect::<String>().to_uppercase()
}

/// Next SKU in a (prefix, year) series, given the highest sequence already
/// allocated (`None` for an empty series).
///
/// Looking up the highest existing sequence, uniqueness, and race-free
/// allocation stay with the storage layer; this only computes the successor
/// and refuses once the 4-digit space is exhausted.
pub fn suggest_next_sku(
    prefix: &str,
    year: i32,
    highest_sequence: Option<u16>,
) -> DomainResult<Sku> {
    suggest_next_sku_at(prefix, year, highest_sequence, current_year())
}

/// [`suggest_next_sku`] with the current year injected (deterministic).
pub fn suggest_next_sku_at(
    prefix: &str,
    year: i32,
    highest_sequence: Option<u16>,
    current_year: i32,
) -> DomainResult<Sku> {
    let highest = highest_sequence.unwrap_or(0);
    if highest >= MAX_SEQUENCE {
        return Err(DomainError::invariant(format!(
            "SKU sequence space exhausted for {prefix}-{year}"
        )));
    }
    let sku = Sku::new_at(prefix, year, highest + 1, current_year)?;
    Ok(sku)
}
