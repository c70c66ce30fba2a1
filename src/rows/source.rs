// src/rows/source.rs

use super::RawRow;
use crate::errors::BuildError;
use rand::Rng;
use std::time::Duration;

const USER_AGENT: &str = "listing-site-builder/0.1 (+static site pipeline)";

/// Where the listing rows come from. The pipeline only needs an ordered
/// sequence of label→text rows; failing to produce one is fatal for the
/// whole build (the previous output must stay untouched).
pub trait RowSource {
    fn fetch(&self) -> Result<Vec<RawRow>, BuildError>;
}

/// Decode a CSV export. The header record supplies the labels; each
/// subsequent record becomes one RawRow, preserving column order. Rows
/// that are entirely blank are dropped here so downstream code never sees
/// them.
fn decode_csv(data: &[u8]) -> Result<Vec<RawRow>, BuildError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| BuildError::RowSource(format!("CSV header parse failed: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| BuildError::RowSource(format!("CSV record parse failed: {e}")))?;
        let columns = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        let row = RawRow::new(columns);
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Local CSV file, the zero-setup path for development.
pub struct CsvFileSource {
    path: String,
}

impl CsvFileSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for CsvFileSource {
    fn fetch(&self) -> Result<Vec<RawRow>, BuildError> {
        let data = std::fs::read(&self.path)
            .map_err(|e| BuildError::RowSource(format!("read {}: {e}", self.path)))?;
        decode_csv(&data)
    }
}

/// Published-sheet CSV fetched over HTTP (e.g. a Google Sheets
/// `output=csv` export link).
pub struct CsvHttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl CsvHttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self, BuildError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| BuildError::RowSource(format!("HTTP client init failed: {e}")))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    fn try_fetch(&self) -> Result<Vec<u8>, BuildError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| BuildError::RowSource(e.to_string()))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .map_err(|e| BuildError::RowSource(e.to_string()))?;

        if !status.is_success() {
            return Err(BuildError::RowSource(format!(
                "sheet fetch HTTP {status} from {}",
                self.url
            )));
        }
        Ok(bytes.to_vec())
    }
}

impl RowSource for CsvHttpSource {
    fn fetch(&self) -> Result<Vec<RawRow>, BuildError> {
        const MAX_ATTEMPTS: u64 = 3;
        const JITTER_MAX_SECS: u64 = 2;

        let mut last_err = None;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_fetch() {
                Ok(data) => return decode_csv(&data),
                Err(e) => {
                    eprintln!("⚠️ Sheet fetch attempt {attempt} failed: {e}");
                    last_err = Some(e);
                    let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_SECS);
                    std::thread::sleep(Duration::from_secs(attempt + jitter));
                }
            }
        }
        Err(last_err
            .unwrap_or_else(|| BuildError::RowSource("sheet fetch retry loop failed".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_header_and_rows_in_order() {
        let data = "案名,區域,價格\nA宅,西區,1200萬\nB宅,北區,980萬\n";
        let rows = decode_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("案名"), Some("A宅"));
        assert_eq!(rows[1].get("價格"), Some("980萬"));

        let labels: Vec<&str> = rows[0].iter().map(|(k, _)| k).collect();
        assert_eq!(labels, vec!["案名", "區域", "價格"]);
    }

    #[test]
    fn blank_rows_are_dropped() {
        let data = "案名,區域\nA宅,西區\n,\n";
        let rows = decode_csv(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn short_records_are_tolerated() {
        let data = "案名,區域,價格\nA宅,西區\n";
        let rows = decode_csv(data.as_bytes()).unwrap();
        assert_eq!(rows[0].get("價格"), None);
    }
}
