use crate::data::aggregate;
use crate::data::loader;
use crate::data::model::SalesDataset;
use crate::data::summary::SummarySet;
use crate::error::DashboardError;
use crate::selector::{self, ReportMode, Route, Selection};

// ---------------------------------------------------------------------------
// Dashboard – selection-driven aggregation pipeline
// ---------------------------------------------------------------------------

/// Owns the immutable dataset and turns selections into summaries.
///
/// Every call recomputes from the dataset; nothing is remembered between
/// selections.
#[derive(Debug)]
pub struct Dashboard {
    dataset: SalesDataset,
}

impl Dashboard {
    pub fn new(dataset: SalesDataset) -> Self {
        Self { dataset }
    }

    /// Load the dataset from `source` (path or URL). Any failure here is
    /// fatal for the process.
    pub fn open(source: &str) -> Result<Self, DashboardError> {
        let unavailable = |reason: String| DashboardError::DatasetUnavailable {
            origin: source.to_string(),
            reason,
        };
        let dataset = loader::load_source(source).map_err(|e| unavailable(format!("{e:#}")))?;
        if dataset.is_empty() {
            return Err(unavailable("source contains no rows".to_string()));
        }
        log::info!(
            "Loaded {} records from {source} ({} vehicle types)",
            dataset.len(),
            dataset.vehicle_types().len()
        );
        Ok(Self::new(dataset))
    }

    pub fn dataset(&self) -> &SalesDataset {
        &self.dataset
    }

    pub fn year_input_enabled(&self, mode: ReportMode) -> bool {
        selector::year_input_enabled(mode)
    }

    /// Compute the summaries for `selection`, or `None` when there is nothing
    /// to render (yearly report without a year).
    pub fn handle_selection_change(&self, selection: &Selection) -> Option<SummarySet> {
        let summary = match selector::route(selection) {
            Route::None => {
                log::debug!("{selection:?}: nothing to render");
                return None;
            }
            Route::Recession => aggregate::recession_summary(&self.dataset),
            Route::Yearly(year) => aggregate::yearly_summary(&self.dataset, year),
        };
        log::debug!(
            "{selection:?}: table sizes {:?}",
            summary.tables.iter().map(|t| t.points.len()).collect::<Vec<_>>()
        );
        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{AVG_SALES_BY_VEHICLE_TYPE, UNEMPLOYMENT_EFFECT};
    use crate::data::model::{Month, SalesRecord};

    fn dashboard() -> Dashboard {
        let rec = |year, month, recession, vt: &str, sales| SalesRecord {
            year,
            month,
            recession,
            vehicle_type: vt.to_string(),
            automobile_sales: sales,
            advertising_expenditure: 100.0,
        };
        Dashboard::new(SalesDataset::from_records(vec![
            rec(2008, Month::Jan, true, "Car", 100.0),
            rec(2008, Month::Feb, true, "Truck", 200.0),
            rec(2009, Month::Jan, false, "Car", 300.0),
        ]))
    }

    #[test]
    fn yearly_without_year_renders_nothing() {
        let d = dashboard();
        assert!(d
            .handle_selection_change(&Selection::new(ReportMode::Yearly, None))
            .is_none());
        assert!(d.year_input_enabled(ReportMode::Yearly));
    }

    #[test]
    fn recession_ignores_year() {
        let d = dashboard();
        let a = d
            .handle_selection_change(&Selection::new(ReportMode::RecessionPeriod, None))
            .unwrap();
        let b = d
            .handle_selection_change(&Selection::new(ReportMode::RecessionPeriod, Some(2009)))
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.table(AVG_SALES_BY_VEHICLE_TYPE).unwrap().points,
            a.table(UNEMPLOYMENT_EFFECT).unwrap().points
        );
        assert!(!d.year_input_enabled(ReportMode::RecessionPeriod));
    }

    #[test]
    fn yearly_with_year_produces_four_tables() {
        let d = dashboard();
        let set = d
            .handle_selection_change(&Selection::new(ReportMode::Yearly, Some(2009)))
            .unwrap();
        assert_eq!(set.tables.len(), 4);
        assert_eq!(set.tables[2].points.len(), 1);
        let [(first, second), (third, fourth)] = set.pairs();
        assert_eq!(
            [first.name, second.name, third.name, fourth.name],
            set.tables.each_ref().map(|t| t.name)
        );
    }

    #[test]
    fn yearly_for_year_without_rows_is_empty_not_none() {
        let set = dashboard()
            .handle_selection_change(&Selection::new(ReportMode::Yearly, Some(1980)))
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn open_reports_unavailable_dataset() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing.csv");
        let err = Dashboard::open(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, DashboardError::DatasetUnavailable { .. }));

        let empty = dir.path().join("empty.csv");
        std::fs::write(
            &empty,
            "Year,Month,Recession,Vehicle_Type,Automobile_Sales,Advertising_Expenditure\n",
        )
        .unwrap();
        let err = Dashboard::open(empty.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("no rows"));
    }
}
