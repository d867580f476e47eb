use std::fmt;

use super::model::Month;

// ---------------------------------------------------------------------------
// GroupKey – the x value of a summary point
// ---------------------------------------------------------------------------

/// The grouping key of one aggregated point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Year(i32),
    Month(Month),
    Category(String),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Year(y) => write!(f, "{y}"),
            GroupKey::Month(m) => write!(f, "{m}"),
            GroupKey::Category(c) => f.write_str(c),
        }
    }
}

/// How the presentation layer should draw a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    /// Proportional chart: each value is drawn as its share of the total.
    Pie,
}

// ---------------------------------------------------------------------------
// SummaryTable / SummarySet
// ---------------------------------------------------------------------------

/// One aggregated 2-D table, backing exactly one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    /// Stable table name, e.g. `"Monthly Sales"`.
    pub name: &'static str,
    /// Human-readable chart title.
    pub title: String,
    pub kind: ChartKind,
    pub x_field: &'static str,
    pub y_field: &'static str,
    /// Ordered `(x, y)` points. Never contains NaN.
    pub points: Vec<(GroupKey, f64)>,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of all y values; the denominator of a share chart.
    pub fn total(&self) -> f64 {
        self.points.iter().map(|(_, v)| v).sum()
    }
}

/// The four tables produced for one selection, in chart order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySet {
    pub tables: [SummaryTable; 4],
}

impl SummarySet {
    /// Layout pairs: charts 1–2 and charts 3–4.
    pub fn pairs(&self) -> [(&SummaryTable, &SummaryTable); 2] {
        let [a, b, c, d] = &self.tables;
        [(a, b), (c, d)]
    }

    #[cfg(test)]
    pub fn table(&self, name: &str) -> Option<&SummaryTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// True when every table is empty (the filter matched no rows).
    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(SummaryTable::is_empty)
    }
}
