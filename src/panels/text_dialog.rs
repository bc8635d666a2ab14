use egui::{Color32, RichText};

use crate::element::TextStyle;
use crate::element::common::MAX_OUTLINE_WIDTH;
use crate::element::text::PRESET_SIZES;

/// The "Add Text" window.
pub struct TextDialog {
    pub open: bool,
    content: String,
    style: TextStyle,
}

impl Default for TextDialog {
    fn default() -> Self {
        Self {
            open: false,
            content: String::new(),
            style: TextStyle::default(),
        }
    }
}

impl TextDialog {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Returns the content and style when the user presses Add.
    ///
    /// The content is cleared after a successful add; the style is kept for
    /// the next text.
    pub fn show(&mut self, ctx: &egui::Context, font_names: &[String]) -> Option<(String, TextStyle)> {
        if !self.open {
            return None;
        }

        let mut open = self.open;
        let mut submitted = None;
        egui::Window::new("Add Text")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                egui::Grid::new("text_dialog_grid")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Font");
                        let selected = font_names
                            .get(self.style.font_index)
                            .cloned()
                            .unwrap_or_else(|| "Default".to_owned());
                        egui::ComboBox::from_id_salt("text_font")
                            .selected_text(selected)
                            .show_ui(ui, |ui| {
                                for (index, name) in font_names.iter().enumerate() {
                                    ui.selectable_value(&mut self.style.font_index, index, name);
                                }
                            });
                        ui.end_row();

                        ui.label("Size");
                        ui.horizontal(|ui| {
                            for size in PRESET_SIZES {
                                ui.selectable_value(
                                    &mut self.style.font_size,
                                    size,
                                    format!("{}", size as u32),
                                );
                            }
                        });
                        ui.end_row();

                        ui.label("Fill");
                        ui.color_edit_button_srgba(&mut self.style.fill);
                        ui.end_row();

                        ui.label("Outline");
                        ui.color_edit_button_srgba(&mut self.style.outline);
                        ui.end_row();

                        ui.label("Outline width");
                        ui.add(egui::Slider::new(&mut self.style.outline_width, 0.0..=MAX_OUTLINE_WIDTH));
                        ui.end_row();
                    });

                ui.separator();
                ui.add(
                    egui::TextEdit::multiline(&mut self.content)
                        .hint_text("Text")
                        .desired_rows(3),
                );

                ui.separator();
                ui.label("Preview");
                egui::Frame::canvas(ui.style())
                    .fill(Color32::from_rgb(18, 18, 28))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(&self.content)
                                .size(self.style.font_size)
                                .color(self.style.fill),
                        );
                    });

                ui.horizontal(|ui| {
                    let ready = !self.content.trim().is_empty();
                    if ui.add_enabled(ready, egui::Button::new("Add")).clicked() {
                        submitted = Some((std::mem::take(&mut self.content), self.style.clone()));
                    }
                    if ui.button("Cancel").clicked() {
                        self.open = false;
                    }
                });
            });

        if submitted.is_some() {
            open = false;
        }
        self.open = open && self.open;
        submitted
    }
}
