use csv::StringRecord;

/// One equality constraint: the row value at `index` must equal `key`
/// byte-for-byte. No trimming, no case folding.
#[derive(Debug, Clone)]
pub struct Condition {
    pub key: String,
    pub index: usize,
}

/// Conjunction of equality conditions over resolved column positions.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    conditions: Vec<Condition>,
}

impl RowFilter {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    /// True iff every condition matches. Short-circuits on the first
    /// failing condition; equivalent to evaluating all and ANDing.
    pub fn matches(&self, row: &StringRecord) -> bool {
        self.conditions
            .iter()
            .all(|c| row.get(c.index) == Some(c.key.as_str()))
    }

    /// Minimum number of columns a row must have for every condition
    /// position to exist.
    pub fn min_width(&self) -> usize {
        self.conditions.iter().map(|c| c.index + 1).max().unwrap_or(0)
    }
}
