use serde::Serialize;
use std::collections::BTreeMap;
use visa_lens_common::{Result, VisaLensError};

/// A logical field bound to the header position of the first candidate
/// column name present in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedColumn {
    pub field: String,
    pub column_name: String,
    pub index: usize,
}

/// Resolve one logical field against a header. Candidates are tried in
/// list order, so a newer column name placed first takes priority over a
/// legacy one. No match is fatal: downstream counts would be meaningless
/// against a defaulted position.
pub fn resolve_column(header: &[String], field: &str, candidates: &[String]) -> Result<ResolvedColumn> {
    for candidate in candidates {
        if let Some(index) = header.iter().position(|name| name == candidate) {
            return Ok(ResolvedColumn {
                field: field.to_owned(),
                column_name: candidate.clone(),
                index,
            });
        }
    }
    Err(VisaLensError::UnresolvedColumn {
        field: field.to_owned(),
        candidates: candidates.to_vec(),
    })
}

/// Resolve every configured field, in configuration order. Fails on the
/// first field with no candidate in the header.
pub fn resolve_columns(
    header: &[String],
    fields: &BTreeMap<String, Vec<String>>,
) -> Result<Vec<ResolvedColumn>> {
    fields
        .iter()
        .map(|(field, candidates)| resolve_column(header, field, candidates))
        .collect()
}
