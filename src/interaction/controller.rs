use egui::{CursorIcon, Pos2};
use log::{debug, warn};

use super::InteractionState;
use crate::command::{Command, CommandResult, EditorContext, HistorySnapshot};
use crate::element::{ElementType, Transformable};
use crate::error::{CanvasError, CanvasResult};
use crate::eraser;
use crate::input::FrameInput;
use crate::object_table::ObjectId;
use crate::renderer::{CanvasRenderer, SELECTION_COLOR};
use crate::transform;
use crate::widgets::{Corner, handle_at};

/// Turns per-frame input into document changes.
///
/// Gestures that touch an object capture a snapshot when they start and push
/// it to the history the first time they actually change something, so a
/// plain click never creates an undo step.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
    checkpoint: Option<HistorySnapshot>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_rotating(&self) -> bool {
        matches!(self.state, InteractionState::Rotating { .. })
    }

    /// Drops the current gesture without touching the document.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.checkpoint = None;
    }

    /// Processes one frame of input.
    ///
    /// Order: press, motion, release, wheel, shortcuts, compaction, easing.
    /// Returns true while something is still animating or a gesture is active.
    pub fn tick(
        &mut self,
        ctx: &mut EditorContext,
        input: &FrameInput,
        renderer: &mut dyn CanvasRenderer,
    ) -> bool {
        if input.pressed && input.over_canvas {
            if let Some(pos) = input.pointer_pos {
                self.state = self.resolve_press(ctx, pos);
                debug!("Press at {:?} -> {}", pos, self.state.name());
            }
        }

        if input.down {
            if let Some(pos) = input.pointer_pos {
                let state = std::mem::take(&mut self.state);
                self.state = self.apply_motion(state, ctx, pos, renderer);
            }
        }

        if input.released && !self.state.is_idle() {
            debug!("Release ends {}", self.state.name());
            self.reset();
        }

        if input.wheel_notches != 0.0 {
            if let Some(pos) = input.pointer_pos {
                let factor = (1.0 + input.wheel_notches * ctx.settings.wheel_zoom_step).max(0.1);
                let applied = ctx.document.zoom_view(pos, factor);
                if applied != 1.0 {
                    self.state.follow_grid_zoom(pos, applied, pos);
                }
            }
        }

        self.handle_shortcuts(ctx, input, renderer);

        let dropped = ctx.document.compact(renderer);
        self.forget_missing(ctx, &dropped);

        let easing = ctx.document.advance_easing(ctx.settings.easing);
        easing || !self.state.is_idle()
    }

    /// Executes a command, dropping any gesture that the command invalidates.
    pub fn run_command(
        &mut self,
        ctx: &mut EditorContext,
        command: Command,
        renderer: &mut dyn CanvasRenderer,
    ) -> CommandResult {
        let restores = matches!(command, Command::Undo | Command::Redo | Command::ClearAll);
        let result = command.execute(ctx, renderer);
        if restores {
            self.reset();
        }
        result
    }

    /// Starts rotating an object, or stops if it is already rotating.
    ///
    /// The rotation follows the pointer while the primary button is held.
    pub fn toggle_rotate(
        &mut self,
        ctx: &mut EditorContext,
        id: ObjectId,
        pointer: Pos2,
    ) -> CanvasResult<()> {
        if self.is_rotating() {
            self.reset();
            return Ok(());
        }

        let view = *ctx.document.view();
        let object = ctx.document.open(id)?;
        if !object.can_rotate() || object.is_erasing() {
            return Err(CanvasError::Unsupported {
                operation: "rotate",
                element_type: object.element_type(),
            });
        }

        let center = object.screen_rect(&view).center();
        self.checkpoint = Some(ctx.document.snapshot());
        self.state = InteractionState::Rotating {
            id,
            center,
            last_angle: transform::pointer_angle(center, pointer),
        };
        Ok(())
    }

    fn resolve_press(&mut self, ctx: &mut EditorContext, pos: Pos2) -> InteractionState {
        let view = *ctx.document.view();

        if let Some(id) = ctx.document.selected() {
            if let Ok(object) = ctx.document.open(id) {
                let bbox = object.bounding_box(&view);
                let handle = handle_at(
                    bbox,
                    pos,
                    ctx.settings.handle_size,
                    ctx.settings.handle_offset,
                );
                if let (Some(corner), false) = (handle, object.is_erasing()) {
                    let start_screen_pos = view.grid_to_screen(object.placement().target_position);
                    let state = InteractionState::ZoomingFromCorner {
                        id,
                        corner,
                        start_pointer: pos,
                        start_level: object.zoom_level(),
                        start_screen_pos,
                        anchor: corner.opposite().point_of(bbox),
                    };
                    self.checkpoint = Some(ctx.document.snapshot());
                    return state;
                }
            }
        }

        match ctx.document.topmost_at(pos) {
            Some(id) => {
                // snapshot before selecting so undo returns to the old selection
                self.checkpoint = Some(ctx.document.snapshot());
                if let Err(err) = ctx.document.set_selected(id) {
                    warn!("Could not select {}: {}", id, err);
                    return InteractionState::Idle;
                }
                let erasing = ctx.document.open(id).is_ok_and(ElementType::is_erasing);
                if erasing {
                    InteractionState::Erasing { id }
                } else {
                    InteractionState::Dragging {
                        id,
                        last_pointer: pos,
                    }
                }
            }
            None => {
                ctx.document.clear_selection();
                self.checkpoint = None;
                InteractionState::Panning { last_pointer: pos }
            }
        }
    }

    fn apply_motion(
        &mut self,
        state: InteractionState,
        ctx: &mut EditorContext,
        pos: Pos2,
        renderer: &mut dyn CanvasRenderer,
    ) -> InteractionState {
        let view = *ctx.document.view();

        match state {
            InteractionState::Idle => InteractionState::Idle,

            InteractionState::Dragging { id, last_pointer } => {
                if pos != last_pointer {
                    let delta = view.screen_delta_to_grid(pos - last_pointer);
                    let Ok(object) = ctx.document.open_mut(id) else {
                        return InteractionState::Idle;
                    };
                    object.translate(delta);
                    self.commit_checkpoint(ctx);
                }
                InteractionState::Dragging {
                    id,
                    last_pointer: pos,
                }
            }

            InteractionState::ZoomingFromCorner {
                id,
                corner,
                start_pointer,
                start_level,
                start_screen_pos,
                anchor,
            } => {
                let drag = pos - start_pointer;
                let sensitivity = match ctx.document.open(id) {
                    Ok(ElementType::Image(_)) => ctx.settings.image_zoom_sensitivity,
                    Ok(ElementType::Text(_)) => ctx.settings.text_zoom_sensitivity,
                    Err(_) => return InteractionState::Idle,
                };
                let factor = corner.zoom_factor(drag, sensitivity);

                let Ok(object) = ctx.document.open_mut(id) else {
                    return InteractionState::Idle;
                };
                let before = (object.zoom_level(), object.placement().target_position);

                object.set_zoom_level(start_level * factor);
                let ratio = object.zoom_level() / start_level;
                let target_screen = transform::scale_about(start_screen_pos, anchor, ratio);
                object.placement_mut().target_position = view.screen_to_grid(target_screen);

                if before != (object.zoom_level(), object.placement().target_position) {
                    self.commit_checkpoint(ctx);
                }
                state
            }

            InteractionState::Rotating {
                id,
                center,
                last_angle,
            } => {
                let angle = transform::pointer_angle(center, pos);
                let delta = transform::wrap_radians(angle - last_angle);
                if delta != 0.0 {
                    let Ok(object) = ctx.document.open_mut(id) else {
                        return InteractionState::Idle;
                    };
                    object.rotate_by(delta.to_degrees());
                    self.commit_checkpoint(ctx);
                }
                InteractionState::Rotating {
                    id,
                    center,
                    last_angle: angle,
                }
            }

            InteractionState::Erasing { id } => {
                let Ok(image) = ctx.document.image_mut(id) else {
                    return InteractionState::Idle;
                };
                if !image.eraser_mode() {
                    return InteractionState::Idle;
                }
                let outcome = eraser::erase_at(image, &view, pos);
                if !outcome.is_empty() {
                    image.sync_texture(renderer);
                    self.commit_checkpoint(ctx);
                }
                state
            }

            InteractionState::Panning { last_pointer } => {
                ctx.document.pan_view(pos - last_pointer);
                InteractionState::Panning { last_pointer: pos }
            }
        }
    }

    fn handle_shortcuts(
        &mut self,
        ctx: &mut EditorContext,
        input: &FrameInput,
        renderer: &mut dyn CanvasRenderer,
    ) {
        if !input.has_shortcut() {
            return;
        }

        if input.undo {
            let _ = self.run_command(ctx, Command::Undo, renderer);
        }
        if input.redo {
            let _ = self.run_command(ctx, Command::Redo, renderer);
        }

        let Some(id) = ctx.document.selected() else {
            return;
        };
        // the toolbar disables these while erasing, the keys follow suit
        let erasing = ctx.document.open(id).is_ok_and(ElementType::is_erasing);
        if erasing {
            return;
        }
        if input.duplicate {
            let _ = self.run_command(ctx, Command::Duplicate(id), renderer);
        }
        if input.delete {
            let _ = self.run_command(ctx, Command::Delete(id), renderer);
        }
    }

    fn commit_checkpoint(&mut self, ctx: &mut EditorContext) {
        if let Some(snapshot) = self.checkpoint.take() {
            ctx.history.push(snapshot);
        }
    }

    /// Returns to idle if the gesture's object is gone.
    fn forget_missing(&mut self, ctx: &EditorContext, dropped: &[ObjectId]) {
        if let Some(id) = self.state.target() {
            if dropped.contains(&id) || ctx.document.open(id).is_err() {
                debug!("Object {} vanished during {}", id, self.state.name());
                self.reset();
            }
        }
    }

    /// Selection outline, corner handles and eraser cursor.
    pub fn draw_overlay(
        &self,
        ctx: &EditorContext,
        pointer: Option<Pos2>,
        renderer: &mut dyn CanvasRenderer,
    ) {
        let Some(id) = ctx.document.selected() else {
            return;
        };
        let Ok(object) = ctx.document.open(id) else {
            return;
        };
        let view = ctx.document.view();
        let bbox = object.bounding_box(view);
        renderer.draw_outline(bbox, SELECTION_COLOR);

        match object {
            ElementType::Image(image) if image.eraser_mode() => {
                if let Some(pointer) = pointer.filter(|p| bbox.contains(*p)) {
                    let radius = image.eraser_radius() as f32 * image.scale();
                    renderer.draw_eraser_cursor(pointer, radius);
                }
            }
            _ => {
                let (size, offset) = (ctx.settings.handle_size, ctx.settings.handle_offset);
                for corner in Corner::ALL {
                    let rect = corner.handle_rect(bbox, size, offset);
                    let hovered = pointer.is_some_and(|p| rect.contains(p));
                    renderer.draw_handle(rect, hovered);
                }
            }
        }
    }

    /// Mouse cursor matching what a press at `pointer` would do.
    pub fn cursor_icon(&self, ctx: &EditorContext, pointer: Option<Pos2>) -> Option<CursorIcon> {
        match self.state {
            InteractionState::Dragging { .. } | InteractionState::Panning { .. } => {
                return Some(CursorIcon::Grabbing);
            }
            InteractionState::ZoomingFromCorner { corner, .. } => {
                return Some(corner.cursor_icon());
            }
            InteractionState::Rotating { .. } => return Some(CursorIcon::Alias),
            InteractionState::Erasing { .. } => return Some(CursorIcon::Crosshair),
            InteractionState::Idle => {}
        }

        let pointer = pointer?;
        let id = ctx.document.selected()?;
        let object = ctx.document.open(id).ok()?;
        if object.is_erasing() {
            return None;
        }
        let bbox = object.bounding_box(ctx.document.view());
        handle_at(bbox, pointer, ctx.settings.handle_size, ctx.settings.handle_offset)
            .map(|corner| corner.cursor_icon())
    }
}
