use egui::{Id, Order, Slider, pos2};

use crate::CanvasApp;
use crate::command::Command;
use crate::element::Transformable;
use crate::element::common::{MAX_ERASER_RADIUS, MIN_ERASER_RADIUS};

/// Gap between the toolbar and the top of the selection.
const TOOLBAR_GAP: f32 = 8.0;
const TOOLBAR_HEIGHT: f32 = 32.0;

/// Floating toolbar above the selected object.
///
/// Copy, Delete, To Back and Rotate are disabled while the eraser is on.
pub fn object_toolbar(app: &mut CanvasApp, ctx: &egui::Context) {
    let document = &app.editor().document;
    let Some(id) = document.selected() else {
        return;
    };
    let Ok(object) = document.open(id) else {
        return;
    };

    let bbox = object.bounding_box(document.view());
    let erasing = object.is_erasing();
    let can_mirror = object.can_mirror();
    let can_rotate = object.can_rotate();
    let eraser = object
        .as_image()
        .map(|image| (image.eraser_mode(), image.eraser_radius()));
    let rotating = app.controller().is_rotating();

    let mut commands = Vec::new();
    let mut rotate_at = None;

    let top = (bbox.min.y - TOOLBAR_GAP - TOOLBAR_HEIGHT).max(app.canvas_rect().min.y);
    egui::Area::new(Id::new("object_toolbar"))
        .order(Order::Foreground)
        .fixed_pos(pos2(bbox.min.x, top))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    if can_mirror && ui.button("Mirror").clicked() {
                        commands.push(Command::ToggleMirror(id));
                    }

                    if let Some((on, radius)) = eraser {
                        if ui.selectable_label(on, "Eraser").clicked() {
                            commands.push(Command::ToggleEraser(id));
                        }
                        if on {
                            let mut size = radius;
                            let slider = Slider::new(&mut size, MIN_ERASER_RADIUS..=MAX_ERASER_RADIUS)
                                .text("Size");
                            if ui.add(slider).changed() {
                                commands.push(Command::SetEraserRadius { id, radius: size });
                            }
                        }
                    }

                    ui.add_enabled_ui(!erasing, |ui| {
                        if ui.button("Copy").clicked() {
                            commands.push(Command::Duplicate(id));
                        }
                        if ui.button("Delete").clicked() {
                            commands.push(Command::Delete(id));
                        }
                        if ui.button("To Back").clicked() {
                            commands.push(Command::BringToBack(id));
                        }
                        if can_rotate {
                            // rotation follows the pointer while the button is held
                            let rotate = ui.selectable_label(rotating, "Rotate");
                            let pressed = ui.input(|i| i.pointer.primary_pressed());
                            if rotate.hovered() && pressed && !erasing {
                                rotate_at = ui.input(|i| i.pointer.interact_pos());
                            }
                        }
                    });
                });
            });
        });

    for command in commands {
        let _ = app.run_command(command);
    }
    if let Some(pointer) = rotate_at {
        app.toggle_rotate(id, pointer);
    }
}
