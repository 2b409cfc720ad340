use std::path::{Path, PathBuf};
use visa_lens_common::Result;

fn is_csv(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("csv")
}

/// Recursively collect `.csv` files under a directory.
pub fn scan_directory(base: &Path) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();
    scan_recursive(base, &mut results)?;
    results.sort();
    Ok(results)
}

fn scan_recursive(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            scan_recursive(&path, out)?;
        } else if is_csv(&path) {
            out.push(path);
        }
    }
    Ok(())
}

/// Resolve an input argument to dataset paths: a single file, a directory
/// (scanned recursively), or a glob pattern. Results are sorted so the
/// same invocation always processes datasets in the same order.
pub fn resolve_paths(input: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if path.is_dir() {
        return scan_directory(path);
    }
    let mut results = Vec::new();
    if let Ok(entries) = glob::glob(input) {
        for entry in entries.flatten() {
            if entry.is_file() && is_csv(&entry) {
                results.push(entry);
            }
        }
    }
    results.sort();
    Ok(results)
}
