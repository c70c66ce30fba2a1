// src/tests/utils.rs

use crate::config::SiteConfig;
use crate::errors::BuildError;
use crate::geocode::{GeoError, GeoLookup, GeoPoint, LookupOutcome};
use crate::rows::{RawRow, RowSource};
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

/// Row source backed by in-memory rows, standing in for the sheet.
pub struct StaticRows {
    rows: Vec<RawRow>,
}

impl StaticRows {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }
}

impl RowSource for StaticRows {
    fn fetch(&self) -> Result<Vec<RawRow>, BuildError> {
        Ok(self.rows.clone())
    }
}

/// Row source that always fails, for the fatal-abort path.
pub struct FailingRows;

impl RowSource for FailingRows {
    fn fetch(&self) -> Result<Vec<RawRow>, BuildError> {
        Err(BuildError::RowSource("sheet unavailable".into()))
    }
}

/// Lookup fake: every address resolves to a fixed point (or to nothing),
/// and every external call is counted.
pub struct CountingLookup {
    outcome: LookupOutcome,
    pub calls: Rc<Cell<u64>>,
}

impl CountingLookup {
    pub fn found(point: GeoPoint) -> Self {
        Self {
            outcome: LookupOutcome::Found(point),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn not_found() -> Self {
        Self {
            outcome: LookupOutcome::NotFound,
            calls: Rc::new(Cell::new(0)),
        }
    }
}

impl GeoLookup for CountingLookup {
    fn lookup(&self, _address: &str) -> Result<LookupOutcome, GeoError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.outcome)
    }
}

pub fn row(cols: &[(&str, &str)]) -> RawRow {
    RawRow::new(
        cols.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

/// Config pointing all filesystem state into a test directory.
pub fn test_config(dir: &Path) -> SiteConfig {
    SiteConfig {
        site_title: "測試站".into(),
        base_url: "https://example.com/site".into(),
        contact_name: "測試人".into(),
        contact_phone: "0900-000-000".into(),
        contact_line: "https://line.me/ti/p/test".into(),
        sheet_url: String::new(),
        geocode_endpoint: String::new(),
        output_dir: dir.join("site").to_string_lossy().into_owned(),
        cache_file: dir.join("geocode_cache.json").to_string_lossy().into_owned(),
    }
}
