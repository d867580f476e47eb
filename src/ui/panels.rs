use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::aggregate::SUPPORTED_YEARS;
use crate::data::export::write_summary_csv;
use crate::selector::ReportMode;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – report selectors
// ---------------------------------------------------------------------------

/// Render the report and year drop-downs.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Report");
    ui.separator();

    ui.label("Select Statistics:");
    let mut label = state.mode.label();
    egui::ComboBox::from_id_salt("dropdown_statistics")
        .selected_text(label)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for m in ReportMode::ALL {
                ui.selectable_value(&mut label, m.label(), m.label());
            }
        });
    state.select_report(label);

    ui.add_space(8.0);

    let mut year = state.year;
    ui.add_enabled_ui(state.year_input_enabled(), |ui: &mut Ui| {
        let selected = year.map_or_else(|| "Select a year".to_string(), |y| y.to_string());
        egui::ComboBox::from_id_salt("select_year")
            .selected_text(selected)
            .width(ui.available_width())
            .height(300.0)
            .show_ui(ui, |ui: &mut Ui| {
                ui.selectable_value(&mut year, None, "Select a year");
                for y in SUPPORTED_YEARS {
                    ui.selectable_value(&mut year, Some(y), y.to_string());
                }
            });
    });
    state.set_year(year);

    ui.add_space(12.0);
    ui.separator();
    ui.label(
        RichText::new(format!(
            "{} records · {} vehicle types",
            state.dashboard.dataset().len(),
            state.dashboard.dataset().vehicle_types().len()
        ))
        .weak(),
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title and toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(
            RichText::new("Automobile Sales Statistics Dashboard")
                .size(28.0)
                .strong()
                .color(Color32::from_rgb(0, 0, 139)),
        );
    });

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let can_export = state.payload.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.selectable_label(state.show_data, "Show data").clicked() {
            state.show_data = !state.show_data;
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::DARK_GRAY));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let Some(summary) = &state.payload else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export summary tables")
        .add_filter("CSV", &["csv"])
        .set_file_name("automobile_sales_summary.csv")
        .save_file();

    if let Some(path) = file {
        match write_summary_csv(&path, summary) {
            Ok(()) => {
                log::info!("Exported {} to {}", state.mode, path.display());
                state.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export summary: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
