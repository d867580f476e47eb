use crate::color::ColorMap;
use crate::dashboard::Dashboard;
use crate::data::summary::SummarySet;
use crate::selector::{ReportMode, Selection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Pipeline over the loaded dataset.
    pub dashboard: Dashboard,

    /// Report drop-down value.
    pub mode: ReportMode,

    /// Year drop-down value (`None` until the user picks one).
    pub year: Option<i32>,

    /// What the central panel renders; replaced on every selection change.
    pub payload: Option<SummarySet>,

    /// Colours per vehicle type.
    pub color_map: ColorMap,

    /// Whether chart cards show their data grid.
    pub show_data: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, mode: ReportMode) -> Self {
        let color_map = ColorMap::new(dashboard.dataset().vehicle_types());
        let mut state = Self {
            dashboard,
            mode,
            year: None,
            payload: None,
            color_map,
            show_data: false,
            status_message: None,
        };
        state.refresh();
        state
    }

    pub fn year_input_enabled(&self) -> bool {
        self.dashboard.year_input_enabled(self.mode)
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.mode, self.year)
    }

    /// Recompute the payload for the current selection.
    pub fn refresh(&mut self) {
        self.payload = self.dashboard.handle_selection_change(&self.selection());
    }

    /// Apply a label picked in the report drop-down. Unknown labels are
    /// dropped and leave the current report untouched.
    pub fn select_report(&mut self, label: &str) {
        match label.parse::<ReportMode>() {
            Ok(mode) => self.set_mode(mode),
            Err(e) => log::warn!("Ignoring selection: {e}"),
        }
    }

    pub fn set_mode(&mut self, mode: ReportMode) {
        if self.mode != mode {
            self.mode = mode;
            self.refresh();
        }
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        if self.year != year {
            self.year = year;
            self.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Month, SalesDataset, SalesRecord};

    fn state() -> AppState {
        let dataset = SalesDataset::from_records(vec![SalesRecord {
            year: 2020,
            month: Month::Apr,
            recession: true,
            vehicle_type: "Sports".into(),
            automobile_sales: 50.0,
            advertising_expenditure: 10.0,
        }]);
        AppState::new(Dashboard::new(dataset), ReportMode::Yearly)
    }

    #[test]
    fn starts_with_nothing_to_render() {
        let s = state();
        assert!(s.payload.is_none());
        assert!(s.year_input_enabled());
    }

    #[test]
    fn selection_changes_recompute_payload() {
        let mut s = state();
        s.set_year(Some(2020));
        assert!(!s.payload.as_ref().unwrap().is_empty());

        s.select_report("Recession Period Statistics");
        assert!(!s.year_input_enabled());
        assert_eq!(
            s.payload.as_ref().unwrap().tables[0].name,
            "Yearly Average Sales"
        );

        s.set_mode(ReportMode::Yearly);
        s.set_year(None);
        assert!(s.payload.is_none());
    }

    #[test]
    fn unknown_report_label_is_ignored() {
        let mut s = state();
        s.set_year(Some(2020));
        let before = s.payload.clone();
        s.select_report("Quarterly Statistics");
        assert_eq!(s.mode, ReportMode::Yearly);
        assert_eq!(s.payload, before);
    }
}
