use crate::filter::RowFilter;
use crate::schema::ResolvedColumn;
use csv::StringRecord;
use serde::Serialize;
use std::collections::HashMap;
use visa_lens_common::{Result, VisaLensError};

/// Per-field value tally. Mutated only during aggregation; counts never
/// decrease.
#[derive(Debug, Clone, Serialize)]
pub struct FieldTally {
    pub field: String,
    pub column_name: String,
    pub index: usize,
    pub counts: HashMap<String, u64>,
}

impl FieldTally {
    pub fn new(column: ResolvedColumn) -> Self {
        Self {
            field: column.field,
            column_name: column.column_name,
            index: column.index,
            counts: HashMap::new(),
        }
    }

    fn add(&mut self, value: &str) {
        if let Some(count) = self.counts.get_mut(value) {
            *count += 1;
        } else {
            self.counts.insert(value.to_owned(), 1);
        }
    }

    /// Sum another shard's counts into this one. Per-value addition is
    /// commutative and associative, so merge order cannot change totals.
    pub fn merge(&mut self, other: FieldTally) {
        for (value, count) in other.counts {
            *self.counts.entry(value).or_insert(0) += count;
        }
    }

    pub fn distinct_values(&self) -> usize {
        self.counts.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Aggregation {
    pub rows_scanned: u64,
    pub matched_rows: u64,
    pub tallies: Vec<FieldTally>,
}

/// Single pass over the data rows: each row is filtered once and, on a
/// pass, contributes one count to every field's tally and one increment
/// to the matched-row counter. A row too short for any resolved position
/// aborts the run with the offending 1-based data-row index — skipping it
/// would leave the counter inconsistent with "all matching rows".
pub fn aggregate<I>(records: I, filter: &RowFilter, fields: Vec<ResolvedColumn>) -> Result<Aggregation>
where
    I: Iterator<Item = csv::Result<StringRecord>>,
{
    let mut tallies: Vec<FieldTally> = fields.into_iter().map(FieldTally::new).collect();
    let needed = tallies
        .iter()
        .map(|t| t.index + 1)
        .max()
        .unwrap_or(0)
        .max(filter.min_width());

    let mut rows_scanned = 0u64;
    let mut matched_rows = 0u64;
    for (i, record) in records.enumerate() {
        let row = record?;
        rows_scanned += 1;
        if row.len() < needed {
            return Err(VisaLensError::MalformedRow {
                row: i as u64 + 1,
                needed,
                found: row.len(),
            });
        }
        if !filter.matches(&row) {
            continue;
        }
        matched_rows += 1;
        for tally in &mut tallies {
            tally.add(&row[tally.index]);
        }
    }

    Ok(Aggregation {
        rows_scanned,
        matched_rows,
        tallies,
    })
}

#[cfg(test)]
mod tests_aggregate {
    use super::*;
    use crate::filter::Condition;

    fn records(rows: &[&[&str]]) -> Vec<csv::Result<StringRecord>> {
        rows.iter().map(|r| Ok(StringRecord::from(r.to_vec()))).collect()
    }

    fn field(name: &str, index: usize) -> ResolvedColumn {
        ResolvedColumn {
            field: name.to_owned(),
            column_name: name.to_uppercase(),
            index,
        }
    }

    fn status_filter() -> RowFilter {
        RowFilter::new(vec![Condition { key: "CERTIFIED".into(), index: 0 }])
    }

    #[test]
    fn counts_only_matching_rows() {
        let rows = records(&[
            &["CERTIFIED", "CA"],
            &["CERTIFIED", "CA"],
            &["DENIED", "CA"],
            &["CERTIFIED", "NY"],
        ]);
        let agg = aggregate(rows.into_iter(), &status_filter(), vec![field("states", 1)]).unwrap();
        assert_eq!(agg.matched_rows, 3);
        assert_eq!(agg.rows_scanned, 4);
        assert_eq!(agg.tallies[0].counts["CA"], 2);
        assert_eq!(agg.tallies[0].counts["NY"], 1);
        assert_eq!(agg.tallies[0].distinct_values(), 2);
    }

    #[test]
    fn every_field_gets_the_same_total() {
        let rows = records(&[
            &["CERTIFIED", "CA", "ENGINEER"],
            &["CERTIFIED", "NY", "ANALYST"],
        ]);
        let agg = aggregate(
            rows.into_iter(),
            &status_filter(),
            vec![field("states", 1), field("occupations", 2)],
        )
        .unwrap();
        for tally in &agg.tallies {
            let total: u64 = tally.counts.values().sum();
            assert_eq!(total, agg.matched_rows);
        }
    }

    #[test]
    fn short_row_aborts_with_its_index() {
        let rows = records(&[
            &["CERTIFIED", "CA"],
            &["CERTIFIED"],
            &["CERTIFIED", "NY"],
        ]);
        let err = aggregate(rows.into_iter(), &status_filter(), vec![field("states", 1)]).unwrap_err();
        match err {
            VisaLensError::MalformedRow { row, needed, found } => {
                assert_eq!(row, 2);
                assert_eq!(needed, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_aborts_even_when_it_would_not_match() {
        let rows = records(&[&["DENIED"]]);
        let err = aggregate(rows.into_iter(), &status_filter(), vec![field("states", 1)]).unwrap_err();
        assert!(matches!(err, VisaLensError::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn no_matches_leaves_tallies_empty() {
        let rows = records(&[&["DENIED", "CA"], &["WITHDRAWN", "NY"]]);
        let agg = aggregate(rows.into_iter(), &status_filter(), vec![field("states", 1)]).unwrap();
        assert_eq!(agg.matched_rows, 0);
        assert_eq!(agg.rows_scanned, 2);
        assert!(agg.tallies[0].counts.is_empty());
    }

    #[test]
    fn merge_sums_per_value() {
        let a_rows = records(&[&["CERTIFIED", "CA"], &["CERTIFIED", "NY"]]);
        let b_rows = records(&[&["CERTIFIED", "CA"], &["CERTIFIED", "TX"]]);
        let mut a = aggregate(a_rows.into_iter(), &status_filter(), vec![field("states", 1)])
            .unwrap()
            .tallies
            .remove(0);
        let b = aggregate(b_rows.into_iter(), &status_filter(), vec![field("states", 1)])
            .unwrap()
            .tallies
            .remove(0);
        a.merge(b);
        assert_eq!(a.counts["CA"], 2);
        assert_eq!(a.counts["NY"], 1);
        assert_eq!(a.counts["TX"], 1);
    }
}
