// 🏷️ Name Resolution
// id → display key for the worth table; the emitter always goes through a resolver

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// NameResolver - maps an item id to the key written in the output
pub trait NameResolver {
    fn resolve(&self, id: u32) -> String;
}

/// Writes the numeric id itself ("id mode")
#[derive(Debug, Clone, Copy, Default)]
pub struct IdResolver;

impl NameResolver for IdResolver {
    fn resolve(&self, id: u32) -> String {
        id.to_string()
    }
}

// ============================================================================
// NAME TABLE
// ============================================================================

/// Lookup table of display names; unknown ids fall back to the numeric id.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: HashMap<u32, String>,
}

impl NameTable {
    pub fn new() -> Self {
        NameTable {
            names: HashMap::new(),
        }
    }

    /// Load a table from disk.
    ///
    /// `.json` files hold an object of `"id": "name"` pairs; anything else is
    /// read as `id;name` rows (blank names and non-numeric ids are ignored, so a
    /// header row is harmless).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read name table: {:?}", path))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_csv(&content)
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let raw: HashMap<String, String> =
            serde_json::from_str(content).context("Failed to parse name table JSON")?;

        let mut table = NameTable::new();
        for (key, name) in raw {
            let id = key
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Name table key '{}' is not an item id", key))?;
            table.insert(id, name);
        }
        Ok(table)
    }

    pub fn from_csv(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut table = NameTable::new();
        for (line, result) in reader.records().enumerate() {
            let record = result.with_context(|| format!("Failed to read name table line {}", line + 1))?;

            let id = record.get(0).and_then(|v| v.trim().parse::<u32>().ok());
            let name = record.get(1).map(str::trim).unwrap_or("");

            if let Some(id) = id {
                if !name.is_empty() {
                    table.insert(id, name.to_string());
                }
            }
        }
        Ok(table)
    }

    pub fn insert(&mut self, id: u32, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    pub fn get(&self, id: u32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl NameResolver for NameTable {
    fn resolve(&self, id: u32) -> String {
        self.get(id)
            .map(String::from)
            .unwrap_or_else(|| id.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
