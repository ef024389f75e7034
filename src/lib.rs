// Worthgen - Core Library
// Spreadsheet of priced items → YAML worth table grouped by item id

pub mod config;
pub mod emitter;
pub mod errors;
pub mod item;
pub mod locale;
pub mod normalizer;
pub mod pipeline;
pub mod resolver;
pub mod sink;
pub mod source;

// Re-export commonly used types
pub use config::Config;
pub use emitter::{classify, format_worth, GroupEmitter, Position};
pub use errors::{RowError, RowErrorKind, SinkError, SourceError};
pub use item::{sort_items, sort_key, Item};
pub use locale::NumberLocale;
pub use normalizer::{clean_worth, decompose_identifier, RowNormalizer, RowOutcome, SkipReason};
pub use pipeline::{ParsedRows, SkipCounts, WorthPipeline, WorthReport};
pub use resolver::{IdResolver, NameResolver, NameTable};
pub use sink::{FileSink, StdoutSink, WorthSink};
pub use source::{CsvRowSource, MemoryRowSource, RawRow, RowSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
