use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::summary::{ChartKind, GroupKey, SummaryTable};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;
const LINE_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Render the current summary as two rows of two charts.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    let Some(summary) = &state.payload else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Select a year to view yearly statistics");
        });
        return;
    };

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if summary.is_empty() {
                ui.label(RichText::new("No records match this selection.").weak());
            }
            for (left, right) in summary.pairs() {
                ui.columns(2, |cols| {
                    chart_card(&mut cols[0], left, state);
                    chart_card(&mut cols[1], right, state);
                });
                ui.add_space(8.0);
            }
        });
}

fn chart_card(ui: &mut Ui, table: &SummaryTable, state: &AppState) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.label(RichText::new(&table.title).strong().size(15.0));
        if table.is_empty() {
            ui.label(RichText::new("No data").weak());
        }

        match table.kind {
            ChartKind::Line => line_chart(ui, table),
            ChartKind::Bar => bar_chart(ui, table, &state.color_map),
            ChartKind::Pie => pie_chart(ui, table, &state.color_map),
        }

        if state.show_data {
            ui.push_id(table.name, |ui: &mut Ui| data_grid(ui, table));
        }
    });
}

// ---------------------------------------------------------------------------
// Plot helpers
// ---------------------------------------------------------------------------

/// Plot x coordinate of a point: years and months are numeric, categories
/// are laid out by position.
fn x_position(index: usize, key: &GroupKey) -> f64 {
    match key {
        GroupKey::Year(y) => *y as f64,
        GroupKey::Month(m) => m.number() as f64,
        GroupKey::Category(_) => index as f64,
    }
}

fn base_plot(table: &SummaryTable) -> Plot<'static> {
    let labels: Vec<(f64, String)> = table
        .points
        .iter()
        .enumerate()
        .map(|(i, (key, _))| (x_position(i, key), key.to_string()))
        .collect();

    Plot::new(table.name)
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label(table.x_field)
        .y_axis_label(table.y_field)
        .x_axis_formatter(move |mark, _range| {
            labels
                .iter()
                .find(|(x, _)| (x - mark.value).abs() < 1e-6)
                .map(|(_, label)| label.clone())
                .unwrap_or_default()
        })
}

fn line_chart(ui: &mut Ui, table: &SummaryTable) {
    let points: Vec<[f64; 2]> = table
        .points
        .iter()
        .enumerate()
        .map(|(i, (key, y))| [x_position(i, key), *y])
        .collect();

    base_plot(table).show(ui, |plot_ui| {
        plot_ui.line(
            Line::new(PlotPoints::from_iter(points.iter().copied()))
                .color(LINE_COLOR)
                .width(2.0)
                .name(table.y_field),
        );
        plot_ui.points(
            Points::new(PlotPoints::from_iter(points.iter().copied()))
                .radius(3.0)
                .color(LINE_COLOR),
        );
    });
}

fn bar_chart(ui: &mut Ui, table: &SummaryTable, colors: &ColorMap) {
    let bars: Vec<Bar> = table
        .points
        .iter()
        .enumerate()
        .map(|(i, (key, y))| {
            let label = key.to_string();
            Bar::new(x_position(i, key), *y)
                .width(0.6)
                .fill(colors.color_for(&label))
                .name(label)
        })
        .collect();

    base_plot(table).include_y(0.0).show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars));
    });
}

// ---------------------------------------------------------------------------
// Pie chart (painted directly, egui_plot has none)
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, table: &SummaryTable, colors: &ColorMap) {
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let total = table.total();
    if total <= 0.0 {
        return;
    }

    let painter = ui.painter_at(rect);
    let radius = (rect.height().min(rect.width() * 0.5) / 2.0 - 8.0).max(10.0);
    let center = egui::pos2(rect.left() + radius + 12.0, rect.center().y);
    let text_color = ui.visuals().text_color();

    let mut start = -FRAC_PI_2;
    let mut legend_y = rect.top() + 12.0;
    let legend_x = center.x + radius + 24.0;

    for (key, value) in &table.points {
        let label = key.to_string();
        let color = colors.color_for(&label);
        let share = value / total;
        let sweep = share as f32 * TAU;

        paint_sector(&painter, center, radius, start, sweep, color);
        start += sweep;

        painter.rect_filled(
            egui::Rect::from_min_size(egui::pos2(legend_x, legend_y - 6.0), egui::vec2(12.0, 12.0)),
            2.0,
            color,
        );
        painter.text(
            egui::pos2(legend_x + 18.0, legend_y),
            Align2::LEFT_CENTER,
            format!("{label}  {:.1}%", share * 100.0),
            FontId::proportional(12.0),
            text_color,
        );
        legend_y += 18.0;
    }
}

/// Fill one slice. Slices wider than a quarter turn are split so every
/// polygon handed to the painter stays convex.
fn paint_sector(painter: &Painter, center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) {
    const ARC_SEGMENTS: usize = 16;
    let chunks = ((sweep / FRAC_PI_2).ceil() as usize).max(1);
    let step = sweep / chunks as f32;

    for chunk in 0..chunks {
        let from = start + step * chunk as f32;
        let mut points = Vec::with_capacity(ARC_SEGMENTS + 2);
        points.push(center);
        for i in 0..=ARC_SEGMENTS {
            let angle = from + step * i as f32 / ARC_SEGMENTS as f32;
            points.push(center + radius * egui::vec2(angle.cos(), angle.sin()));
        }
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
    }

    painter.line_segment(
        [center, center + radius * egui::vec2(start.cos(), start.sin())],
        Stroke::new(1.0, Color32::WHITE),
    );
}

// ---------------------------------------------------------------------------
// Data grid
// ---------------------------------------------------------------------------

fn data_grid(ui: &mut Ui, table: &SummaryTable) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(table.x_field);
            });
            header.col(|ui| {
                ui.strong(table.y_field);
            });
        })
        .body(|mut body| {
            for (key, value) in &table.points {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(key.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{value:.2}"));
                    });
                });
            }
        });
}
