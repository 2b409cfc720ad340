use crate::aggregate::aggregate;
use crate::filter::{Condition, RowFilter};
use crate::reader::Dataset;
use crate::report::{build_field_report, FieldReport};
use crate::schema::{resolve_column, resolve_columns};
use crate::topk::top_k;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use visa_lens_common::{Config, Result};

/// Everything one dataset run produces, in a form the writers and the
/// summary printer can consume directly.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub path: PathBuf,
    pub rows_scanned: u64,
    pub matched_rows: u64,
    pub top_k: usize,
    pub reports: Vec<FieldReport>,
}

/// Run the whole pipeline for one dataset: resolve columns against the
/// header, stream the rows once through the filter and the tallies, then
/// rank and annotate each field. Column resolution happens before any
/// row is read, so a misconfigured field aborts before aggregation
/// starts.
pub fn run_dataset(path: &Path, config: &Config) -> Result<DatasetReport> {
    let mut dataset = Dataset::open(path)?;

    let mut conditions = Vec::with_capacity(config.conditions.len());
    for (key, candidates) in &config.conditions {
        let column = resolve_column(&dataset.info.header, key, candidates)?;
        conditions.push(Condition { key: key.clone(), index: column.index });
    }
    let filter = RowFilter::new(conditions);
    let fields = resolve_columns(&dataset.info.header, &config.fields)?;

    let agg = aggregate(dataset.records(), &filter, fields)?;

    let mut reports = Vec::with_capacity(agg.tallies.len());
    for tally in &agg.tallies {
        let ranked = top_k(&tally.counts, config.top_k);
        reports.push(build_field_report(
            &tally.field,
            &tally.column_name,
            ranked,
            agg.matched_rows,
        )?);
    }

    Ok(DatasetReport {
        path: path.to_path_buf(),
        rows_scanned: agg.rows_scanned,
        matched_rows: agg.matched_rows,
        top_k: config.top_k,
        reports,
    })
}

/// Process independent datasets, each with its own counters and tallies.
/// Nothing is merged across datasets, so the rayon fan-out shares no
/// state; results come back in input order.
pub fn run_datasets(paths: &[PathBuf], config: &Config) -> Result<Vec<DatasetReport>> {
    let results: Vec<Result<DatasetReport>> = paths
        .par_iter()
        .map(|path| run_dataset(path, config))
        .collect();
    results.into_iter().collect()
}
