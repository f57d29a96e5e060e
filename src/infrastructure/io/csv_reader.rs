// ============================================================
// CSV READER
// ============================================================
// Parse CSV content with delimiter detection and encoding fallback

use csv::{ReaderBuilder, Trim};
use encoding_rs::WINDOWS_1252;
use std::path::Path;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{CellValue, Row, Table};

/// CSV reader producing row tables
pub struct CsvReader {
    delimiter: u8,
    trim: bool,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read a CSV file with automatic delimiter detection
    pub fn read_file_auto_detect(path: &Path) -> Result<Table> {
        let content = read_with_encoding_fallback(path)?;
        let delimiter = Self::detect_delimiter(&content);
        Self::new().with_delimiter(delimiter).parse_content(&content)
    }

    /// Parse CSV content into rows keyed by the header line
    pub fn parse_content(&self, content: &str) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {e}")))?
            .clone();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {e}", index + 1))
            })?;

            let mut row = Row::new();
            for (idx, header) in headers.iter().enumerate() {
                let value = record.get(idx).unwrap_or("");
                row.set(header.to_string(), CellValue::text(value));
            }
            rows.push(row);
        }

        Ok(rows)
    }

    /// Detect the delimiter from a content sample: the candidate with the
    /// most consistent per-line count wins
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let sample_lines: Vec<_> = content.lines().take(10).collect();
            if sample_lines.is_empty() {
                continue;
            }

            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());
            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}

/// Read a file as UTF-8, decoding through Windows-1252 when the bytes are
/// not valid UTF-8
fn read_with_encoding_fallback(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::IoError(format!("Failed to read {}: {e}", path.display())))?;

    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(err) => {
            let (decoded, _, _) = WINDOWS_1252.decode(err.as_bytes());
            Ok(decoded.into_owned())
        }
    }
}
