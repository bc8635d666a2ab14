use egui::Button;

use crate::CanvasApp;
use crate::command::Command;

pub fn top_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            load_image_button(app, ui);
            if ui.button("Add Text").clicked() {
                app.text_dialog.open = true;
            }
            let has_objects = !app.editor().document.is_empty();
            if ui.add_enabled(has_objects, Button::new("Clear All")).clicked() {
                let _ = app.run_command(Command::ClearAll);
            }

            ui.separator();

            // Undo/Redo section
            let can_undo = app.editor().history.can_undo();
            let can_redo = app.editor().history.can_redo();
            if ui.add_enabled(can_undo, Button::new("Undo")).clicked() {
                let _ = app.run_command(Command::Undo);
            }
            if ui.add_enabled(can_redo, Button::new("Redo")).clicked() {
                let _ = app.run_command(Command::Redo);
            }

            ui.separator();

            ui.toggle_value(&mut app.show_settings, "Settings");
            ui.toggle_value(&mut app.show_stats, "Stats");
        });
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn load_image_button(app: &mut CanvasApp, ui: &mut egui::Ui) {
    if ui.button("Load Image").clicked() {
        app.load_image_from_dialog();
    }
}

#[cfg(target_arch = "wasm32")]
fn load_image_button(_app: &mut CanvasApp, _ui: &mut egui::Ui) {}
