//! egui front end: class selector, generate button and the timetable grid.

use crate::state::FormState;
use eframe::egui::{self, Label, RichText, ScrollArea, TopBottomPanel};
use eframe::App;
use log::info;
use rusqlite::Connection;
use timetable_core::view::PERIOD_HEADER;
use timetable_core::{ScheduleConfig, TimetableView, ViewLayout};

const GRID_SPACING: f32 = 8.0;
const CONTROLS_HEIGHT: f32 = 80.0;

pub struct TimetableApp {
    conn: Connection,
    config: ScheduleConfig,
    layout: ViewLayout,
    form: FormState,
}

impl TimetableApp {
    /// Takes ownership of the store connection for the lifetime of the window
    /// and shows the first class that already has a stored timetable.
    pub fn new(mut conn: Connection, config: ScheduleConfig, layout: ViewLayout) -> Self {
        let mut form = FormState::default();
        form.restore(&mut conn, &config);
        Self {
            conn,
            config,
            layout,
            form,
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Class:");
            let current = self.form.selected_class().unwrap_or("Choose...").to_string();
            let mut picked = None;
            egui::ComboBox::from_id_source("class_select")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for name in self.config.class_names() {
                        let selected = self.form.selected_class() == Some(name.as_str());
                        if ui.selectable_label(selected, name.as_str()).clicked() {
                            picked = Some(name.clone());
                        }
                    }
                });
            if let Some(name) = picked {
                self.form.select(&mut self.conn, &self.config, name);
            }

            if ui.button("Generate Timetable").clicked() {
                self.form
                    .generate(&mut self.conn, &self.config, &mut rand::thread_rng());
            }
        });

        if let Some(status) = self.form.status() {
            ui.label(status);
        }
    }
}

impl App for TimetableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("controls").show(ctx, |ui| self.render_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::both().show(ui, |ui| {
                let view = self.form.view();
                let days = view.map_or(self.config.days(), TimetableView::day_headers);
                render_grid(ui, &self.layout, days, view);
            });
        });
    }
}

impl Drop for TimetableApp {
    fn drop(&mut self) {
        info!("event=app_shutdown module=app status=ok");
    }
}

/// Window size that fits the period column and every day column.
pub fn initial_window_size(layout: &ViewLayout, config: &ScheduleConfig) -> [f32; 2] {
    let columns = config.days().len() as f32;
    let rows = config.periods_per_day() as f32 + 1.0;
    [
        layout.period_column_width + columns * (layout.day_column_width + GRID_SPACING) + 32.0,
        CONTROLS_HEIGHT + rows * (layout.row_height + GRID_SPACING),
    ]
}

// Headers are always drawn; body rows only once a class has been shown.
fn render_grid(
    ui: &mut egui::Ui,
    layout: &ViewLayout,
    days: &[String],
    view: Option<&TimetableView>,
) {
    let period_cell = [layout.period_column_width, layout.row_height];
    let day_cell = [layout.day_column_width, layout.row_height];

    egui::Grid::new("timetable_grid")
        .striped(true)
        .spacing([GRID_SPACING, GRID_SPACING])
        .min_row_height(layout.row_height)
        .show(ui, |ui| {
            ui.add_sized(period_cell, Label::new(RichText::new(PERIOD_HEADER).strong()));
            for day in days {
                ui.add_sized(day_cell, Label::new(RichText::new(day.as_str()).strong()));
            }
            ui.end_row();

            let Some(view) = view else {
                return;
            };
            for row in &view.rows {
                ui.add_sized(period_cell, Label::new(row.label.as_str()));
                for cell in &row.cells {
                    ui.add_sized(day_cell, Label::new(cell.as_str()));
                }
                ui.end_row();
            }
        });
}

#[cfg(test)]
mod tests {
    use super::initial_window_size;
    use timetable_core::{ScheduleConfig, ViewLayout};

    #[test]
    fn window_fits_every_day_column() {
        let config = ScheduleConfig::standard();
        let [width, height] = initial_window_size(&ViewLayout::STANDARD, &config);
        assert!(width >= 100.0 + 5.0 * 150.0);
        assert!(height >= 9.0 * 40.0);
    }
}
