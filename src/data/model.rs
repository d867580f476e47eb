use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};

// ---------------------------------------------------------------------------
// Month – calendar month of a sales record
// ---------------------------------------------------------------------------

/// Calendar month. The derived `Ord` follows calendar order, so a
/// `BTreeMap<Month, _>` iterates January → December rather than alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Inverse of [`Month::number`].
    pub fn from_number(n: u32) -> Option<Month> {
        n.checked_sub(1)
            .and_then(|i| Month::ALL.get(i as usize))
            .copied()
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Accepts `"Jan"`, `"January"` (any case) or a month number `"1"`..`"12"`.
impl FromStr for Month {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return Month::from_number(n)
                .ok_or_else(|| anyhow::anyhow!("month number {n} is out of range"));
        }
        let lower = s.to_ascii_lowercase();
        let found = Month::ALL.iter().copied().find(|m| {
            let abbrev = m.abbrev().to_ascii_lowercase();
            lower == abbrev || (lower.len() > 3 && full_name(*m) == lower)
        });
        match found {
            Some(m) => Ok(m),
            None => bail!("unrecognised month '{s}'"),
        }
    }
}

fn full_name(m: Month) -> &'static str {
    match m {
        Month::Jan => "january",
        Month::Feb => "february",
        Month::Mar => "march",
        Month::Apr => "april",
        Month::May => "may",
        Month::Jun => "june",
        Month::Jul => "july",
        Month::Aug => "august",
        Month::Sep => "september",
        Month::Oct => "october",
        Month::Nov => "november",
        Month::Dec => "december",
    }
}

// ---------------------------------------------------------------------------
// SalesRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single monthly sales observation.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub year: i32,
    pub month: Month,
    /// Whether the month falls inside an economic recession.
    pub recession: bool,
    pub vehicle_type: String,
    pub automobile_sales: f64,
    pub advertising_expenditure: f64,
}

impl SalesRecord {
    /// Reject values that cannot take part in a mean or a share chart.
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("Automobile_Sales", self.automobile_sales),
            ("Advertising_Expenditure", self.advertising_expenditure),
        ] {
            if !v.is_finite() || v < 0.0 {
                bail!("{name} must be a non-negative number, got {v}");
            }
        }
        if self.vehicle_type.trim().is_empty() {
            bail!("Vehicle_Type is empty");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built; the dashboard owns it for
/// the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
    /// Distinct vehicle types in first-seen order.
    vehicle_types: Vec<String>,
}

impl SalesDataset {
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        let mut seen = HashSet::new();
        let vehicle_types = records
            .iter()
            .filter(|r| seen.insert(r.vehicle_type.as_str()))
            .map(|r| r.vehicle_type.clone())
            .collect();
        SalesDataset {
            records,
            vehicle_types,
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn vehicle_types(&self) -> &[String] {
        &self.vehicle_types
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
