use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;

use super::model::{SalesDataset, SalesRecord};
use super::summary::{ChartKind, GroupKey, SummarySet, SummaryTable};

/// Years offered by the year selector.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1980..=2023;

pub const YEARLY_AVERAGE_SALES: &str = "Yearly Average Sales";
pub const AVG_SALES_BY_VEHICLE_TYPE: &str = "Avg Sales by Vehicle Type";
pub const ADVERTISING_EXPENDITURE_SHARE: &str = "Advertising Expenditure Share";
pub const UNEMPLOYMENT_EFFECT: &str = "Unemployment Effect";
pub const SALES_FOR_YEAR: &str = "Sales for Year";
pub const MONTHLY_SALES: &str = "Monthly Sales";
pub const ADVERTISING_EXPENDITURE_BY_TYPE: &str = "Advertising Expenditure by Type";

const YEAR: &str = "Year";
const MONTH: &str = "Month";
const VEHICLE_TYPE: &str = "Vehicle_Type";
const SALES: &str = "Automobile_Sales";
const ADVERTISING: &str = "Advertising_Expenditure";

// ---------------------------------------------------------------------------
// Group-by mean helpers
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
struct MeanAcc {
    sum: f64,
    count: usize,
}

impl MeanAcc {
    fn push(&mut self, v: f64) {
        self.sum += v;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

fn sales(r: &SalesRecord) -> f64 {
    r.automobile_sales
}

fn advertising(r: &SalesRecord) -> f64 {
    r.advertising_expenditure
}

/// Mean of `value` per key, ordered by the key's `Ord`.
///
/// Only keys that occur in `rows` get an accumulator, so empty groups can
/// never be emitted.
fn sorted_means<K: Ord>(
    rows: &[&SalesRecord],
    key: impl Fn(&SalesRecord) -> K,
    value: fn(&SalesRecord) -> f64,
    wrap: impl Fn(K) -> GroupKey,
) -> Vec<(GroupKey, f64)> {
    let mut groups: BTreeMap<K, MeanAcc> = BTreeMap::new();
    for &r in rows {
        groups.entry(key(r)).or_default().push(value(r));
    }
    groups
        .into_iter()
        .map(|(k, acc)| (wrap(k), acc.mean()))
        .collect()
}

/// Mean of `value` per vehicle type, in the order types first appear in `rows`.
fn vehicle_type_means(rows: &[&SalesRecord], value: fn(&SalesRecord) -> f64) -> Vec<(GroupKey, f64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, MeanAcc)> = Vec::new();
    for &r in rows {
        let slot = *index.entry(r.vehicle_type.as_str()).or_insert_with(|| {
            groups.push((r.vehicle_type.as_str(), MeanAcc::default()));
            groups.len() - 1
        });
        groups[slot].1.push(value(r));
    }
    groups
        .into_iter()
        .map(|(name, acc)| (GroupKey::Category(name.to_string()), acc.mean()))
        .collect()
}

fn table(
    name: &'static str,
    title: impl Into<String>,
    kind: ChartKind,
    x_field: &'static str,
    y_field: &'static str,
    points: Vec<(GroupKey, f64)>,
) -> SummaryTable {
    SummaryTable {
        name,
        title: title.into(),
        kind,
        x_field,
        y_field,
        points,
    }
}

// ---------------------------------------------------------------------------
// Report aggregations
// ---------------------------------------------------------------------------

/// Summaries over the months flagged as recession.
///
/// The fourth table repeats the vehicle-type sales means of the second one
/// under the unemployment title; the two are always identical.
pub fn recession_summary(dataset: &SalesDataset) -> SummarySet {
    let rows: Vec<&SalesRecord> = dataset.records().iter().filter(|r| r.recession).collect();

    let by_year = sorted_means(&rows, |r| r.year, sales, GroupKey::Year);
    let by_type = vehicle_type_means(&rows, sales);
    let ad_share = vehicle_type_means(&rows, advertising);
    let unemployment = by_type.clone();

    SummarySet {
        tables: [
            table(
                YEARLY_AVERAGE_SALES,
                "Average Automobile Sales Fluctuation Over Recession Period",
                ChartKind::Line,
                YEAR,
                SALES,
                by_year,
            ),
            table(
                AVG_SALES_BY_VEHICLE_TYPE,
                "Average No. of Vehicles Sold by Vehicle Type",
                ChartKind::Bar,
                VEHICLE_TYPE,
                SALES,
                by_type,
            ),
            table(
                ADVERTISING_EXPENDITURE_SHARE,
                "Advertising Expenditure Share by Vehicle Type",
                ChartKind::Pie,
                VEHICLE_TYPE,
                ADVERTISING,
                ad_share,
            ),
            table(
                UNEMPLOYMENT_EFFECT,
                "Effect of Unemployment Rate on Vehicle Type and Sales",
                ChartKind::Bar,
                VEHICLE_TYPE,
                SALES,
                unemployment,
            ),
        ],
    }
}

/// Summaries for a single year. A year outside [`SUPPORTED_YEARS`] or with
/// no rows yields four empty tables.
pub fn yearly_summary(dataset: &SalesDataset, year: i32) -> SummarySet {
    let rows: Vec<&SalesRecord> = if SUPPORTED_YEARS.contains(&year) {
        dataset.records().iter().filter(|r| r.year == year).collect()
    } else {
        log::warn!("year {year} is outside the supported range {SUPPORTED_YEARS:?}");
        Vec::new()
    };

    SummarySet {
        tables: [
            table(
                SALES_FOR_YEAR,
                format!("Automobile Sales for the Year {year}"),
                ChartKind::Line,
                YEAR,
                SALES,
                sorted_means(&rows, |r| r.year, sales, GroupKey::Year),
            ),
            table(
                MONTHLY_SALES,
                "Total Monthly Automobile Sales",
                ChartKind::Line,
                MONTH,
                SALES,
                sorted_means(&rows, |r| r.month, sales, GroupKey::Month),
            ),
            table(
                AVG_SALES_BY_VEHICLE_TYPE,
                format!("Average Vehicles Sold by Vehicle Type in the Year {year}"),
                ChartKind::Bar,
                VEHICLE_TYPE,
                SALES,
                vehicle_type_means(&rows, sales),
            ),
            table(
                ADVERTISING_EXPENDITURE_BY_TYPE,
                format!("Total Advertisement Expenditure for Each Vehicle Type in {year}"),
                ChartKind::Pie,
                VEHICLE_TYPE,
                ADVERTISING,
                vehicle_type_means(&rows, advertising),
            ),
        ],
    }
}
