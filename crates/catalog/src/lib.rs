//! Catalog domain module.
//!
//! SKU identifier rules for the Kollect-It catalog, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage). Persistence of
//! actual SKUs (uniqueness, race-free sequence allocation) belongs to the
//! storage layer; this crate only parses, validates and renders them.

pub mod legacy;
pub mod sku;

pub use legacy::{migrate_legacy_sku, LegacySku, LEGACY_PREFIX};
pub use sku::{
    current_year, format_sku, is_known_prefix, parse_sku, prefix_label, suggest_next_sku,
    suggest_next_sku_at, suggested_prefix, validate_sku, validate_sku_at, ParsedSku, Sku, SkuError,
    SkuValidation, CATEGORY_PREFIXES, DEFAULT_PREFIX, MAX_SEQUENCE, MIN_SEQUENCE, MIN_YEAR,
};
