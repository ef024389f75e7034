// 🔁 Worth Pipeline
// rows → normalize → sort → emit, in one batch pass
//
// Every run rebuilds its items from scratch. Bad rows are collected into the
// report instead of aborting the batch; only an unreadable source is fatal.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::emitter::GroupEmitter;
use crate::errors::{RowError, SinkError, SourceError};
use crate::item::{sort_items, Item};
use crate::normalizer::{RowNormalizer, RowOutcome, SkipReason};
use crate::resolver::{IdResolver, NameResolver, NameTable};
use crate::sink::WorthSink;
use crate::source::{RawRow, RowSource};

// ============================================================================
// REPORT
// ============================================================================

/// How many rows each skip rule discarded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub empty_id: usize,
    pub header: usize,
    pub no_price_flag: usize,
    pub no_worth: usize,
    pub zero_worth: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::EmptyId => self.empty_id += 1,
            SkipReason::Header => self.header += 1,
            SkipReason::NoPriceFlag => self.no_price_flag += 1,
            SkipReason::NoWorth => self.no_worth += 1,
            SkipReason::ZeroWorth => self.zero_worth += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.empty_id + self.header + self.no_price_flag + self.no_worth + self.zero_worth
    }
}

/// Items (sorted) plus everything that did not become an item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRows {
    pub items: Vec<Item>,
    pub rejected: Vec<RowError>,
    pub skipped: SkipCounts,
}

/// Outcome of a full run
#[derive(Debug, Clone, PartialEq)]
pub struct WorthReport {
    pub text: String,
    pub items: Vec<Item>,
    pub rejected: Vec<RowError>,
    pub skipped: SkipCounts,
}

impl WorthReport {
    /// True when no row was rejected
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    pub fn write_to(&self, sink: &dyn WorthSink) -> Result<(), SinkError> {
        sink.write(&self.text)
    }

    pub fn summary(&self) -> String {
        format!(
            "Items: {}, Skipped: {}, Rejected: {}",
            self.items.len(),
            self.skipped.total(),
            self.rejected.len()
        )
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

pub struct WorthPipeline {
    normalizer: RowNormalizer,
    emitter: GroupEmitter,
    resolver: Box<dyn NameResolver>,
}

impl WorthPipeline {
    pub fn new(
        normalizer: RowNormalizer,
        emitter: GroupEmitter,
        resolver: Box<dyn NameResolver>,
    ) -> Self {
        WorthPipeline {
            normalizer,
            emitter,
            resolver,
        }
    }

    /// Build from configuration, loading the name table when names are in use.
    pub fn from_config(config: &Config) -> Result<Self> {
        let normalizer = RowNormalizer::new(config.header_token.clone(), config.number_locale());
        let emitter = GroupEmitter::new(config.section_label.clone(), config.banner.clone());

        let resolver: Box<dyn NameResolver> = match (&config.names_file, config.use_names) {
            (Some(path), true) => Box::new(
                NameTable::from_file(path)
                    .with_context(|| format!("Failed to load names from {:?}", path))?,
            ),
            _ => Box::new(IdResolver),
        };

        Ok(WorthPipeline::new(normalizer, emitter, resolver))
    }

    /// Normalize every row and sort the resulting items.
    pub fn parse_rows(&self, rows: &[RawRow]) -> ParsedRows {
        let mut parsed = ParsedRows::default();
        let mut items = Vec::new();

        for row in rows {
            match self.normalizer.normalize(row) {
                RowOutcome::Item(item) => items.push(item),
                RowOutcome::Skipped(reason) => parsed.skipped.record(reason),
                RowOutcome::Rejected(err) => parsed.rejected.push(err),
            }
        }

        parsed.items = sort_items(items);
        parsed
    }

    /// Render already sorted items.
    pub fn render(&self, items: &[Item]) -> String {
        self.emitter.render(items, self.resolver.as_ref())
    }

    /// Read the whole source, then parse, sort and render.
    pub fn run(&self, source: &dyn RowSource) -> Result<WorthReport, SourceError> {
        let rows = source.rows()?;
        let parsed = self.parse_rows(&rows);
        let text = self.render(&parsed.items);

        Ok(WorthReport {
            text,
            items: parsed.items,
            rejected: parsed.rejected,
            skipped: parsed.skipped,
        })
    }
}

impl Default for WorthPipeline {
    fn default() -> Self {
        WorthPipeline::new(
            RowNormalizer::default(),
            GroupEmitter::default(),
            Box::new(IdResolver),
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
