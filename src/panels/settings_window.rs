use egui::{DragValue, Slider};

use crate::CanvasApp;
use crate::element::common::{MAX_ERASER_RADIUS, MIN_ERASER_RADIUS};
use crate::settings::CanvasSettings;

/// Edits a copy of the settings and applies it when anything changed.
pub fn settings_window(app: &mut CanvasApp, ctx: &egui::Context) {
    if !app.show_settings {
        return;
    }

    let mut open = app.show_settings;
    let mut settings = app.settings().clone();
    let mut changed = false;

    egui::Window::new("Settings")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.label("Image zoom sensitivity");
                    changed |= ui
                        .add(DragValue::new(&mut settings.image_zoom_sensitivity).speed(0.001).range(0.001..=0.1))
                        .changed();
                    ui.end_row();

                    ui.label("Text zoom sensitivity");
                    changed |= ui
                        .add(DragValue::new(&mut settings.text_zoom_sensitivity).speed(0.001).range(0.001..=0.1))
                        .changed();
                    ui.end_row();

                    ui.label("Wheel zoom step");
                    changed |= ui
                        .add(Slider::new(&mut settings.wheel_zoom_step, 0.01..=0.5))
                        .changed();
                    ui.end_row();

                    ui.label("Duplicate offset");
                    changed |= ui
                        .add(Slider::new(&mut settings.duplicate_offset, 0.0..=100.0).suffix(" px"))
                        .changed();
                    ui.end_row();

                    ui.label("History depth");
                    changed |= ui
                        .add(Slider::new(&mut settings.history_limit, 1..=500))
                        .changed();
                    ui.end_row();

                    ui.label("Default eraser size");
                    changed |= ui
                        .add(Slider::new(
                            &mut settings.default_eraser_radius,
                            MIN_ERASER_RADIUS..=MAX_ERASER_RADIUS,
                        ))
                        .changed();
                    ui.end_row();

                    ui.label("Easing");
                    changed |= ui
                        .add(Slider::new(&mut settings.easing, 0.01..=1.0))
                        .changed();
                    ui.end_row();

                    ui.label("Show grid");
                    changed |= ui.checkbox(&mut settings.show_grid, "").changed();
                    ui.end_row();

                    ui.label("Grid spacing");
                    changed |= ui
                        .add(Slider::new(&mut settings.grid_spacing, 8.0..=128.0))
                        .changed();
                    ui.end_row();

                    ui.label("Background");
                    changed |= ui.color_edit_button_srgba(&mut settings.grid_background).changed();
                    ui.end_row();

                    ui.label("Dots");
                    changed |= ui.color_edit_button_srgba(&mut settings.grid_dot_color).changed();
                    ui.end_row();
                });

            ui.separator();
            if ui.button("Reset to defaults").clicked() {
                settings = CanvasSettings::default();
                changed = true;
            }
        });

    if changed {
        app.set_settings(settings);
    }
    app.show_settings = open;
}

/// Object counts, history depth and the grid view.
pub fn stats_window(app: &mut CanvasApp, ctx: &egui::Context) {
    if !app.show_stats {
        return;
    }

    let mut open = app.show_stats;
    let editor = app.editor();
    let view = *editor.document.view();

    egui::Window::new("Stats")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("stats_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.label("Images");
                    ui.label(editor.document.image_count().to_string());
                    ui.end_row();

                    ui.label("Texts");
                    ui.label(editor.document.text_count().to_string());
                    ui.end_row();

                    ui.label("Textures");
                    ui.label(app.renderer().texture_count().to_string());
                    ui.end_row();

                    ui.label("Undo steps");
                    ui.label(format!("{} / {}", editor.history.undo_depth(), editor.history.limit()));
                    ui.end_row();

                    ui.label("Redo steps");
                    ui.label(editor.history.redo_depth().to_string());
                    ui.end_row();

                    ui.label("Grid zoom");
                    ui.label(format!("{:.2}", view.scale));
                    ui.end_row();

                    ui.label("Grid offset");
                    ui.label(format!("({:.0}, {:.0})", view.offset.x, view.offset.y));
                    ui.end_row();

                    ui.label("Gesture");
                    ui.label(app.controller().state().name());
                    ui.end_row();
                });
        });

    app.show_stats = open;
}
