use crate::engine::DatasetReport;
use std::io::Write;
use std::path::{Path, PathBuf};
use visa_lens_common::{Result, VisaLensError};

/// Write one text file per field, named `top_<K>_<field>.txt`, into
/// `output_dir` (created if absent). Returns the written paths in field
/// order.
pub fn write_text_reports(output_dir: &Path, report: &DatasetReport) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;
    let mut written = Vec::with_capacity(report.reports.len());
    for field_report in &report.reports {
        let path = output_dir.join(format!("top_{}_{}.txt", report.top_k, field_report.field));
        let mut file = std::fs::File::create(&path)?;
        file.write_all(field_report.render().as_bytes())?;
        written.push(path);
    }
    Ok(written)
}

/// Pretty-printed JSON document covering every dataset in the run.
pub fn export_json(output_path: &Path, reports: &[DatasetReport]) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let doc = serde_json::json!({ "datasets": reports });
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, &doc)
        .map_err(|e| VisaLensError::Other(e.to_string()))?;
    Ok(())
}

pub fn print_summary(report: &DatasetReport) {
    println!("{:<16} {}", "Dataset:", report.path.display());
    println!("{:<16} {}", "Rows scanned:", report.rows_scanned);
    println!("{:<16} {}", "Rows matched:", report.matched_rows);
    for field_report in &report.reports {
        let leader = field_report
            .entries
            .first()
            .map(|e| format!("{} ({})", e.value, e.count))
            .unwrap_or_else(|| "-".into());
        println!("{:<16} {}", format!("Top {}:", field_report.field), leader);
    }
}
