use crate::topk::RankedValue;
use serde::Serialize;
use visa_lens_common::{Result, VisaLensError};

/// Fixed middle column of the report header. The first column carries the
/// upper-cased field name, e.g. `TOP_OCCUPATIONS`.
pub const COUNT_HEADER: &str = "NUMBER_CERTIFIED_APPLICATIONS";

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub value: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub field: String,
    pub column_name: String,
    pub matched_rows: u64,
    pub entries: Vec<ReportEntry>,
}

/// Attach percentages of the matched-row total to a ranked list. A zero
/// denominator cannot be rendered and surfaces as an error instead of a
/// NaN or a silent 0.0.
pub fn build_field_report(
    field: &str,
    column_name: &str,
    ranked: Vec<RankedValue>,
    matched_rows: u64,
) -> Result<FieldReport> {
    if matched_rows == 0 {
        return Err(VisaLensError::ZeroDenominator { field: field.to_owned() });
    }
    let entries = ranked
        .into_iter()
        .map(|r| ReportEntry {
            percentage: r.count as f64 * 100.0 / matched_rows as f64,
            value: r.value,
            count: r.count,
        })
        .collect();
    Ok(FieldReport {
        field: field.to_owned(),
        column_name: column_name.to_owned(),
        matched_rows,
        entries,
    })
}

impl FieldReport {
    pub fn header_line(&self) -> String {
        format!("TOP_{};{};PERCENTAGE", self.field.to_uppercase(), COUNT_HEADER)
    }

    /// One line per entry: value, raw count, percentage with exactly one
    /// fractional digit.
    pub fn entry_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .map(|e| format!("{};{};{:.1}%", e.value, e.count, e.percentage))
    }

    pub fn render(&self) -> String {
        let mut out = self.header_line();
        out.push('\n');
        for line in self.entry_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests_report {
    use super::*;

    fn rv(value: &str, count: u64) -> RankedValue {
        RankedValue { value: value.to_string(), count }
    }

    #[test]
    fn percentage_rounds_to_one_digit() {
        let report = build_field_report("states", "STATE", vec![rv("CA", 2)], 3).unwrap();
        let line = report.entry_lines().next().unwrap();
        assert_eq!(line, "CA;2;66.7%");
    }

    #[test]
    fn header_upper_cases_the_field() {
        let report = build_field_report("occupations", "SOC_NAME", vec![], 1).unwrap();
        assert_eq!(
            report.header_line(),
            "TOP_OCCUPATIONS;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE"
        );
    }

    #[test]
    fn zero_denominator_is_an_error() {
        let err = build_field_report("states", "STATE", vec![rv("CA", 0)], 0).unwrap_err();
        assert!(matches!(err, VisaLensError::ZeroDenominator { ref field } if field == "states"));
    }

    #[test]
    fn render_is_header_then_entries() {
        let report =
            build_field_report("states", "STATE", vec![rv("CA", 2), rv("NY", 1)], 4).unwrap();
        assert_eq!(
            report.render(),
            "TOP_STATES;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE\nCA;2;50.0%\nNY;1;25.0%\n"
        );
    }

    #[test]
    fn full_share_renders_as_100() {
        let report = build_field_report("states", "STATE", vec![rv("CA", 7)], 7).unwrap();
        assert_eq!(report.entry_lines().next().unwrap(), "CA;7;100.0%");
    }

    #[test]
    fn empty_ranking_renders_header_only() {
        let report = build_field_report("states", "STATE", vec![], 5).unwrap();
        assert_eq!(report.render(), "TOP_STATES;NUMBER_CERTIFIED_APPLICATIONS;PERCENTAGE\n");
    }
}
