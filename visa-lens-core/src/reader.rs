use csv::StringRecord;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use visa_lens_common::Result;

/// The input tables are `;`-delimited.
pub const DELIMITER: u8 = b';';

#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub path: PathBuf,
    pub file_size: u64,
    pub header: Vec<String>,
}

/// An open dataset: header already consumed, data rows still streaming.
pub struct Dataset {
    pub info: DatasetInfo,
    reader: csv::Reader<File>,
}

impl Dataset {
    /// Open a dataset and read its header record. Widths are left
    /// flexible so that short data rows reach the aggregator, which
    /// rejects them with the offending row index instead of a generic
    /// parse error.
    pub fn open(path: &Path) -> Result<Dataset> {
        let file_size = std::fs::metadata(path)?.len();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        let header: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
        Ok(Dataset {
            info: DatasetInfo {
                path: path.to_path_buf(),
                file_size,
                header,
            },
            reader,
        })
    }

    /// Streaming iterator over the data rows, in encounter order.
    pub fn records(&mut self) -> impl Iterator<Item = csv::Result<StringRecord>> + '_ {
        self.reader.records()
    }
}

/// Header-only read, for diagnostics that do not need the data rows.
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    Ok(Dataset::open(path)?.info.header)
}
