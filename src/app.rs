use egui::{Painter, Pos2, Rect, Response, vec2};
use log::{info, warn};

use crate::command::{Command, CommandResult, EditorContext};
use crate::element::{TextObject, TextStyle};
use crate::file_handler::{self, DecodedImage};
use crate::grid::DotGrid;
use crate::input::FrameInput;
use crate::interaction::InteractionController;
use crate::object_table::ObjectId;
use crate::panels::{self, TextDialog};
use crate::renderer::{EguiRenderer, FontProvider};
use crate::settings::CanvasSettings;

/// Screen offset from the canvas corner for images opened with Load Image.
pub const LOAD_IMAGE_OFFSET: f32 = 50.0;

/// The canvas editor window.
///
/// Only [`CanvasSettings`] survive a restart; the objects on the canvas are
/// gone when the app closes.
pub struct CanvasApp {
    editor: EditorContext,
    controller: InteractionController,
    renderer: EguiRenderer,
    pub(crate) text_dialog: TextDialog,
    pub(crate) show_settings: bool,
    pub(crate) show_stats: bool,
    canvas_rect: Rect,
}

impl CanvasApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = CanvasSettings::load(cc.storage);
        info!("Starting canvas with history limit {}", settings.history_limit);

        Self {
            editor: EditorContext::new(settings),
            controller: InteractionController::new(),
            renderer: EguiRenderer::new(&cc.egui_ctx),
            text_dialog: TextDialog::default(),
            show_settings: false,
            show_stats: false,
            canvas_rect: Rect::ZERO,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.editor.settings
    }

    pub fn set_settings(&mut self, settings: CanvasSettings) {
        self.editor.set_settings(settings);
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn renderer(&self) -> &EguiRenderer {
        &self.renderer
    }

    /// Screen rect of the canvas as of the last frame.
    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    pub fn run_command(&mut self, command: Command) -> CommandResult {
        self.controller
            .run_command(&mut self.editor, command, &mut self.renderer)
    }

    pub fn toggle_rotate(&mut self, id: ObjectId, pointer: Pos2) {
        if let Err(err) = self.controller.toggle_rotate(&mut self.editor, id, pointer) {
            warn!("Cannot rotate {}: {}", id, err);
        }
    }

    /// Adds a decoded image with its top-left corner at `screen_pos`.
    pub fn add_decoded_image(&mut self, decoded: DecodedImage, screen_pos: Pos2) -> CommandResult {
        let image = decoded.into_object(self.editor.settings.default_eraser_radius)?;
        self.run_command(Command::AddImage { image, screen_pos })
    }

    /// Runs the native file dialog and places the chosen image.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_image_from_dialog(&mut self) {
        match file_handler::pick_image() {
            Ok(Some(decoded)) => {
                let screen_pos = self.canvas_rect.min + vec2(LOAD_IMAGE_OFFSET, LOAD_IMAGE_OFFSET);
                let _ = self.add_decoded_image(decoded, screen_pos);
            }
            Ok(None) => info!("Load image cancelled"),
            Err(err) => warn!("Failed to load image: {}", err),
        }
    }

    /// Adds text with its top-left corner at the middle of the canvas.
    pub fn add_text(&mut self, content: &str, style: TextStyle) -> CommandResult {
        let text = TextObject::new(content, style, &self.renderer)?;
        let screen_pos = self.canvas_rect.center();
        self.run_command(Command::AddText { text, screen_pos })
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        for decoded in file_handler::take_dropped_images(ctx) {
            let size = vec2(decoded.width as f32, decoded.height as f32);
            let screen_pos = self.canvas_rect.center() - size / 2.0;
            let _ = self.add_decoded_image(decoded, screen_pos);
        }
    }

    /// Runs one tick of the canvas: background, input, objects, overlay.
    pub(crate) fn canvas_frame(&mut self, ctx: &egui::Context, response: &Response, painter: Painter) {
        let rect = response.rect;
        self.canvas_rect = rect;

        let settings = &self.editor.settings;
        painter.rect_filled(rect, 0.0, settings.grid_background);
        if settings.show_grid {
            DotGrid::layout(self.editor.document.view(), rect, settings.grid_spacing)
                .paint(&painter, settings.grid_dot_color);
        }

        self.renderer.begin_frame(painter);
        let input = FrameInput::from_egui(ctx, response);
        let animating = self
            .controller
            .tick(&mut self.editor, &input, &mut self.renderer);
        self.editor.document.render(&mut self.renderer);
        self.controller
            .draw_overlay(&self.editor, input.pointer_pos, &mut self.renderer);
        self.renderer.end_frame();

        if response.hovered() || !self.controller.state().is_idle() {
            if let Some(icon) = self.controller.cursor_icon(&self.editor, input.pointer_pos) {
                ctx.set_cursor_icon(icon);
            }
        }
        if animating {
            ctx.request_repaint();
        }
    }
}

impl eframe::App for CanvasApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.editor.settings.save(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::top_panel(self, ctx);
        panels::central_panel(self, ctx);
        panels::object_toolbar(self, ctx);

        let fonts = self.renderer.font_names();
        if let Some((content, style)) = self.text_dialog.show(ctx, &fonts) {
            let _ = self.add_text(&content, style);
        }
        panels::settings_window(self, ctx);
        panels::stats_window(self, ctx);

        self.handle_dropped_files(ctx);
        file_handler::preview_files_being_dropped(ctx);
    }
}
