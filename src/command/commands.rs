use egui::Pos2;
use log::{info, warn};

use super::{CommandResult, EditorContext};
use crate::element::{ImageObject, TextObject, Transformable};
use crate::error::CanvasError;
use crate::object_table::ObjectId;
use crate::renderer::CanvasRenderer;

/// Discrete user actions coming from toolbars, dialogs and shortcuts.
///
/// Continuous gestures (drag, corner zoom, rotate, erase, pan) are handled
/// by the interaction controller instead.
#[derive(Debug, Clone)]
pub enum Command {
    /// Place an image with its top-left corner at a screen position
    AddImage { image: ImageObject, screen_pos: Pos2 },
    /// Place text with its top-left corner at a screen position
    AddText { text: TextObject, screen_pos: Pos2 },
    Duplicate(ObjectId),
    Delete(ObjectId),
    BringToBack(ObjectId),
    ToggleMirror(ObjectId),
    /// Not recorded in history
    ToggleEraser(ObjectId),
    /// Not recorded in history
    SetEraserRadius { id: ObjectId, radius: u32 },
    ClearAll,
    Undo,
    Redo,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddImage { .. } => "add image",
            Command::AddText { .. } => "add text",
            Command::Duplicate(_) => "duplicate",
            Command::Delete(_) => "delete",
            Command::BringToBack(_) => "bring to back",
            Command::ToggleMirror(_) => "mirror",
            Command::ToggleEraser(_) => "toggle eraser",
            Command::SetEraserRadius { .. } => "set eraser radius",
            Command::ClearAll => "clear all",
            Command::Undo => "undo",
            Command::Redo => "redo",
        }
    }

    /// Returns true if executing the command pushes an undo step
    pub fn is_recorded(&self) -> bool {
        !matches!(
            self,
            Command::ToggleEraser(_)
                | Command::SetEraserRadius { .. }
                | Command::Undo
                | Command::Redo
        )
    }

    /// Execute the command with the given context.
    ///
    /// Recorded commands validate their target first and push the pre-change
    /// snapshot only when they are about to mutate, so a failing command
    /// leaves both the document and the history untouched.
    pub fn execute(
        self,
        ctx: &mut EditorContext,
        renderer: &mut dyn CanvasRenderer,
    ) -> CommandResult {
        let name = self.name();
        let result = self.apply(ctx, renderer);
        match &result {
            Ok(_) => info!("Executed {}", name),
            Err(err) => warn!("Command {} failed: {}", name, err),
        }
        result
    }

    fn apply(self, ctx: &mut EditorContext, renderer: &mut dyn CanvasRenderer) -> CommandResult {
        match self {
            Command::AddImage { image, screen_pos } => {
                ctx.history.record(&ctx.document);
                Ok(Some(ctx.document.add_image(image, screen_pos, renderer)))
            }

            Command::AddText { text, screen_pos } => {
                ctx.history.record(&ctx.document);
                Ok(Some(ctx.document.add_text(text, screen_pos)))
            }

            Command::Duplicate(id) => {
                ctx.document.open(id)?;
                ctx.history.record(&ctx.document);
                let offset = ctx.settings.duplicate_offset;
                ctx.document.duplicate(id, offset, renderer).map(Some)
            }

            Command::Delete(id) => {
                ctx.document.open(id)?;
                ctx.history.record(&ctx.document);
                ctx.document.remove(id)?;
                Ok(None)
            }

            Command::BringToBack(id) => {
                ctx.document.open(id)?;
                ctx.history.record(&ctx.document);
                ctx.document.bring_to_back(id)?;
                Ok(None)
            }

            Command::ToggleMirror(id) => {
                let object = ctx.document.open(id)?;
                if !object.can_mirror() {
                    return Err(CanvasError::Unsupported {
                        operation: "mirror",
                        element_type: object.element_type(),
                    });
                }
                ctx.history.record(&ctx.document);
                ctx.document.open_mut(id)?.toggle_mirror();
                Ok(None)
            }

            Command::ToggleEraser(id) => {
                let image = ctx.document.image_mut(id)?;
                let on = !image.eraser_mode();
                image.set_eraser_mode(on);
                if on {
                    // erasing only happens on the selected image
                    ctx.document.set_selected(id)?;
                }
                Ok(None)
            }

            Command::SetEraserRadius { id, radius } => {
                ctx.document.image_mut(id)?.set_eraser_radius(radius);
                Ok(None)
            }

            Command::ClearAll => {
                if !ctx.document.is_empty() {
                    ctx.history.record(&ctx.document);
                }
                ctx.document.clear(renderer);
                Ok(None)
            }

            Command::Undo => {
                ctx.history.undo(&mut ctx.document, renderer);
                Ok(None)
            }

            Command::Redo => {
                ctx.history.redo(&mut ctx.document, renderer);
                Ok(None)
            }
        }
    }
}
