use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Report mode and selection
// ---------------------------------------------------------------------------

/// Which report the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    #[default]
    Yearly,
    RecessionPeriod,
}

impl ReportMode {
    pub const ALL: [ReportMode; 2] = [ReportMode::Yearly, ReportMode::RecessionPeriod];

    /// Label shown in the report drop-down.
    pub fn label(self) -> &'static str {
        match self {
            ReportMode::Yearly => "Yearly Statistics",
            ReportMode::RecessionPeriod => "Recession Period Statistics",
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportMode {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportMode::ALL
            .into_iter()
            .find(|m| m.label() == s)
            .ok_or_else(|| DashboardError::InvalidSelection(s.to_string()))
    }
}

/// The user's current choice. Built fresh for every UI event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub mode: ReportMode,
    pub year: Option<i32>,
}

impl Selection {
    pub fn new(mode: ReportMode, year: Option<i32>) -> Self {
        Self { mode, year }
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Which aggregation a selection triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Nothing to render yet.
    None,
    Yearly(i32),
    Recession,
}

/// Whether the year input should be enabled for `mode`.
pub fn year_input_enabled(mode: ReportMode) -> bool {
    mode != ReportMode::RecessionPeriod
}

/// Decide which aggregation to run. The year is ignored for recession reports.
pub fn route(selection: &Selection) -> Route {
    match (selection.mode, selection.year) {
        (ReportMode::RecessionPeriod, _) => Route::Recession,
        (ReportMode::Yearly, Some(year)) => Route::Yearly(year),
        (ReportMode::Yearly, None) => Route::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_input_follows_mode() {
        assert!(year_input_enabled(ReportMode::Yearly));
        assert!(!year_input_enabled(ReportMode::RecessionPeriod));
    }

    #[test]
    fn routes_cover_all_three_outcomes() {
        for year in [None, Some(1980), Some(2008), Some(3000)] {
            assert_eq!(
                route(&Selection::new(ReportMode::RecessionPeriod, year)),
                Route::Recession
            );
        }
        assert_eq!(route(&Selection::new(ReportMode::Yearly, None)), Route::None);
        assert_eq!(
            route(&Selection::new(ReportMode::Yearly, Some(2008))),
            Route::Yearly(2008)
        );
    }

    #[test]
    fn labels_round_trip_through_parsing() {
        assert_eq!(
            "Yearly Statistics".parse::<ReportMode>().unwrap(),
            ReportMode::Yearly
        );
        assert_eq!(
            "Recession Period Statistics".parse::<ReportMode>().unwrap(),
            ReportMode::RecessionPeriod
        );
    }

    #[test]
    fn unknown_label_is_an_invalid_selection() {
        let err = "Monthly Statistics".parse::<ReportMode>().unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSelection(ref s) if s == "Monthly Statistics"));
    }
}
