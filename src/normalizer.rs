// 🧹 Row Normalizer
// Raw delimited fields → zero or one Item, with skip rules and numeric cleanup
//
// Field layout: identifier ; comment ; (unused) ; has-price flag ; worth

use crate::errors::{RowError, RowErrorKind};
use crate::item::Item;
use crate::locale::NumberLocale;
use crate::source::RawRow;

const ID_FIELD: usize = 0;
const COMMENT_FIELD: usize = 1;
const FLAG_FIELD: usize = 3;
const WORTH_FIELD: usize = 4;

/// Header token used by the stock spreadsheet template
pub const DEFAULT_HEADER_TOKEN: &str = "ID";

// ============================================================================
// OUTCOMES
// ============================================================================

/// Why a row produced no Item without being an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyId,
    Header,
    NoPriceFlag,
    NoWorth,
    /// Worth parsed to exactly zero: price not known yet
    ZeroWorth,
}

/// Result of normalizing one row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Item(Item),
    Skipped(SkipReason),
    Rejected(RowError),
}

// ============================================================================
// NORMALIZER
// ============================================================================

pub struct RowNormalizer {
    header_token: String,
    locale: NumberLocale,
}

impl RowNormalizer {
    pub fn new(header_token: impl Into<String>, locale: NumberLocale) -> Self {
        RowNormalizer {
            header_token: header_token.into(),
            locale,
        }
    }

    /// Turn one raw row into an Item, a skip, or a per-row rejection.
    pub fn normalize(&self, row: &RawRow) -> RowOutcome {
        let identifier = row.field(ID_FIELD);

        if identifier.is_empty() {
            return RowOutcome::Skipped(SkipReason::EmptyId);
        }
        if identifier == self.header_token {
            return RowOutcome::Skipped(SkipReason::Header);
        }
        if row.field(FLAG_FIELD).is_empty() {
            return RowOutcome::Skipped(SkipReason::NoPriceFlag);
        }
        if row.field(WORTH_FIELD).is_empty() {
            return RowOutcome::Skipped(SkipReason::NoWorth);
        }

        let reject = |kind| RowOutcome::Rejected(RowError::new(row.number, row.raw(), kind));

        let (id, variant) = match decompose_identifier(identifier) {
            Ok(key) => key,
            Err(kind) => return reject(kind),
        };

        let cleaned = clean_worth(row.field(WORTH_FIELD));
        let worth = match self.locale.parse_decimal(&cleaned) {
            Some(worth) => worth,
            None => return reject(RowErrorKind::NumberFormat { value: cleaned }),
        };

        match Item::new(id, variant, row.field(COMMENT_FIELD), worth) {
            Some(item) => RowOutcome::Item(item),
            None => RowOutcome::Skipped(SkipReason::ZeroWorth),
        }
    }
}

impl Default for RowNormalizer {
    fn default() -> Self {
        RowNormalizer::new(DEFAULT_HEADER_TOKEN, NumberLocale::default())
    }
}

// ============================================================================
// FIELD CLEANUP
// ============================================================================

/// Split an identifier such as "2 1", "2:1" or "#12/3" into (id, variant).
///
/// Every non-digit acts as a separator; the first digit group is the id and the
/// second, when present, the variant (0 otherwise). Later groups are ignored.
pub fn decompose_identifier(identifier: &str) -> Result<(u32, u32), RowErrorKind> {
    let digits_only: String = identifier
        .chars()
        .map(|c| if c.is_ascii_digit() { c } else { ' ' })
        .collect();
    let mut tokens = digits_only.split_whitespace();

    let id = match tokens.next() {
        Some(token) => parse_key(token, "id")?,
        None => {
            return Err(RowErrorKind::Decode(format!(
                "no digits in identifier '{}'",
                identifier
            )))
        }
    };
    let variant = match tokens.next() {
        Some(token) => parse_key(token, "variant")?,
        None => 0,
    };

    Ok((id, variant))
}

fn parse_key(token: &str, what: &str) -> Result<u32, RowErrorKind> {
    token
        .parse::<u32>()
        .map_err(|e| RowErrorKind::Decode(format!("{} '{}' is not a valid integer: {}", what, token, e)))
}

/// Strip whitespace and any wrapping punctuation or currency symbols from a worth.
///
/// "  € 1 234,50 " → "1234,50", "$42!" → "42". Characters inside the number are
/// left for the locale parser.
pub fn clean_worth(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    compact
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

// ============================================================================
// TESTS
// ============================================================================
