//! Pre-migration SKU format support.
//!
//! Before the category-prefix scheme, catalog items carried `SKU-YYYY-XXX`
//! identifiers (fixed literal prefix, 3-digit sequence). These survive in
//! exports and old spreadsheets, so the codec keeps a reader for them and a
//! one-way migration into the current `KOL-YYYY-NNNN` form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sku::{DEFAULT_PREFIX, SkuError};

/// Literal prefix of every legacy SKU.
pub const LEGACY_PREFIX: &str = "SKU";

/// A parsed legacy `SKU-YYYY-XXX` identifier.
///
/// Unlike [`crate::Sku`], no year or sequence range checks apply: legacy data
/// predates the validation window and is accepted as recorded. Matching is
/// case-insensitive; surrounding whitespace is NOT trimmed (legacy readers
/// never did).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegacySku {
    year: i32,
    sequence: u16,
}

impl LegacySku {
    /// Parse a candidate legacy SKU.
    pub fn parse(candidate: &str) -> Result<Self, SkuError> {
        if candidate.is_empty() {
            return Err(SkuError::Missing);
        }
        let normalized = candidate.to_ascii_uppercase();
        split_legacy(&normalized).ok_or_else(|| SkuError::LegacyMalformed {
            given: candidate.to_string(),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn sequence(&self) -> u16 {
        self.sequence
    }
}

impl fmt::Display for LegacySku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LEGACY_PREFIX}-{}-{:03}", self.year, self.sequence)
    }
}

fn split_legacy(normalized: &str) -> Option<LegacySku> {
    let rest = normalized.strip_prefix(LEGACY_PREFIX)?.strip_prefix('-')?;
    let (year, sequence) = rest.split_once('-')?;
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if sequence.len() != 3 || !sequence.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(LegacySku {
        year: year.parse().ok()?,
        sequence: sequence.parse().ok()?,
    })
}

/// Rewrite a legacy `SKU-YYYY-XXX` identifier into the current
/// `KOL-YYYY-0XXX` form, or `None` when the input is not a legacy SKU.
///
/// The result is not checked against the current year window: migration runs
/// over historical data, and the window only constrains newly minted SKUs.
pub fn migrate_legacy_sku(legacy_sku: &str) -> Option<String> {
    let legacy = LegacySku::parse(legacy_sku).ok()?;
    Some(format!(
        "{DEFAULT_PREFIX}-{}-{:04}",
        legacy.year(),
        legacy.sequence()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sku::Sku;

    #[test]
    fn accepts_legacy_skus() {
        let legacy = LegacySku::parse("SKU-2025-001").unwrap();
        assert_eq!(legacy.year(), 2025);
        assert_eq!(legacy.sequence(), 1);
        assert_eq!(legacy.to_string(), "SKU-2025-001");
    }

    #[test]
    fn lowercase_legacy_input_is_accepted() {
        assert!(LegacySku::parse("sku-2024-042").is_ok());
    }

    #[test]
    fn no_range_checks_apply_to_legacy_data() {
        // Pre-2020 identifiers exist in exports and stay readable.
        let legacy = LegacySku::parse("SKU-2010-999").unwrap();
        assert_eq!(legacy.year(), 2010);
        assert_eq!(legacy.sequence(), 999);
    }

    #[test]
    fn rejects_non_legacy_shapes() {
        for input in [
            "KOL-2025-0001", // current format
            "SKU-2025-0001", // 4-digit sequence
            "SKU-25-001",    // 2-digit year
            "SKU-2025-001-X",
            " SKU-2025-001", // whitespace is not trimmed
        ] {
            let err = LegacySku::parse(input).unwrap_err();
            match err {
                SkuError::LegacyMalformed { given } => assert_eq!(given, input),
                other => panic!("expected LegacyMalformed for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_legacy_input_is_missing() {
        assert_eq!(LegacySku::parse("").unwrap_err(), SkuError::Missing);
    }

    #[test]
    fn migrates_to_the_current_format() {
        assert_eq!(
            migrate_legacy_sku("SKU-2025-001").as_deref(),
            Some("KOL-2025-0001")
        );
        assert_eq!(
            migrate_legacy_sku("sku-2023-117").as_deref(),
            Some("KOL-2023-0117")
        );
        assert_eq!(migrate_legacy_sku("KOL-2025-0001"), None);
    }

    #[test]
    fn migrated_recent_skus_pass_strict_validation() {
        let migrated = migrate_legacy_sku("SKU-2025-001").unwrap();
        assert!(Sku::parse_at(&migrated, 2026).is_ok());
    }

    #[test]
    fn migration_preserves_out_of_window_years() {
        // Historical years survive migration even though the strict
        // validator would reject them as new input.
        let migrated = migrate_legacy_sku("SKU-2010-001").unwrap();
        assert_eq!(migrated, "KOL-2010-0001");
        assert!(Sku::parse_at(&migrated, 2026).is_err());
    }
}
