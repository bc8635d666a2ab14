mod common;

use common::{RecordingRenderer, alpha_at, gradient_image, text};
use eframe_canvas::element::Transformable;
use eframe_canvas::{
    Command, EditorContext, FrameInput, InteractionController, InteractionState, ObjectId,
};
use egui::{CursorIcon, Pos2, pos2, vec2};

struct Harness {
    ctx: EditorContext,
    controller: InteractionController,
    renderer: RecordingRenderer,
}

impl Harness {
    fn new() -> Self {
        Self {
            ctx: EditorContext::default(),
            controller: InteractionController::new(),
            renderer: RecordingRenderer::default(),
        }
    }

    /// 100x100 image with its top-left corner at screen (100, 100).
    fn with_image() -> (Self, ObjectId) {
        let mut harness = Self::new();
        let id = harness.ctx.document.add_image(
            gradient_image("img", 100, 100),
            pos2(100.0, 100.0),
            &mut harness.renderer,
        );
        (harness, id)
    }

    fn tick(&mut self, input: FrameInput) -> bool {
        self.controller
            .tick(&mut self.ctx, &input, &mut self.renderer)
    }

    fn gesture(&mut self, from: Pos2, to: Pos2) {
        self.tick(FrameInput::press(from));
        self.tick(FrameInput::drag(to));
        self.tick(FrameInput::release(to));
    }

    /// Ticks without input until nothing is animating.
    fn settle(&mut self) {
        for _ in 0..1000 {
            if !self.tick(FrameInput::default()) {
                return;
            }
        }
        panic!("easing did not converge");
    }

    fn screen_rect(&self, id: ObjectId) -> egui::Rect {
        let view = *self.ctx.document.view();
        self.ctx.document.open(id).unwrap().screen_rect(&view)
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.05
}

#[test]
fn test_drag_moves_object_one_to_one() {
    let (mut h, id) = Harness::with_image();

    h.tick(FrameInput::press(pos2(150.0, 150.0)));
    assert!(matches!(h.controller.state(), InteractionState::Dragging { .. }));
    assert_eq!(h.ctx.document.selected(), Some(id));

    h.tick(FrameInput::drag(pos2(170.0, 160.0)));
    h.tick(FrameInput::drag(pos2(180.0, 140.0)));
    h.tick(FrameInput::release(pos2(180.0, 140.0)));

    assert!(h.controller.state().is_idle());
    assert_eq!(h.screen_rect(id).min, pos2(130.0, 90.0));
    let placement = h.ctx.document.open(id).unwrap().placement();
    assert_eq!(placement.position, placement.target_position);
    // one gesture, one undo step
    assert_eq!(h.ctx.history.undo_depth(), 1);

    Command::Undo
        .execute(&mut h.ctx, &mut h.renderer)
        .unwrap();
    assert_eq!(h.screen_rect(id).min, pos2(100.0, 100.0));
}

#[test]
fn test_click_without_motion_records_nothing() {
    let (mut h, id) = Harness::with_image();

    h.tick(FrameInput::press(pos2(150.0, 150.0)));
    h.tick(FrameInput::release(pos2(150.0, 150.0)));

    assert_eq!(h.ctx.document.selected(), Some(id));
    assert!(!h.ctx.history.can_undo());
}

#[test]
fn test_corner_zoom_keeps_opposite_corner() {
    let (mut h, id) = Harness::with_image();
    h.ctx.document.set_selected(id).unwrap();

    // top-left handle spans (85, 85)..(95, 95)
    h.tick(FrameInput::press(pos2(90.0, 90.0)));
    assert!(matches!(
        h.controller.state(),
        InteractionState::ZoomingFromCorner { .. }
    ));
    // 50 px outward at 0.01 per px
    h.tick(FrameInput::drag(pos2(60.0, 50.0)));
    h.tick(FrameInput::release(pos2(60.0, 50.0)));
    h.settle();

    let object = h.ctx.document.open(id).unwrap();
    assert!(approx(object.zoom_level(), 1.5));
    let rect = h.screen_rect(id);
    assert!(approx(rect.max.x, 200.0) && approx(rect.max.y, 200.0));
    assert!(approx(rect.min.x, 50.0) && approx(rect.min.y, 50.0));
    assert_eq!(h.ctx.history.undo_depth(), 1);
}

#[test]
fn test_corner_zoom_inward_shrinks_and_clamps() {
    let (mut h, id) = Harness::with_image();
    h.ctx.document.set_selected(id).unwrap();

    // bottom-right handle, dragged far into the image
    h.tick(FrameInput::press(pos2(210.0, 210.0)));
    h.tick(FrameInput::drag(pos2(-2000.0, -2000.0)));
    h.tick(FrameInput::release(pos2(-2000.0, -2000.0)));
    h.settle();

    let object = h.ctx.document.open(id).unwrap();
    assert!(approx(object.zoom_level(), 0.1));
    // top-left corner is the anchor
    let rect = h.screen_rect(id);
    assert!(approx(rect.min.x, 100.0) && approx(rect.min.y, 100.0));
}

#[test]
fn test_text_corner_zoom_changes_font_size() {
    let mut h = Harness::new();
    let id = h.ctx.document.add_text(text("abcd", 40.0), pos2(100.0, 100.0));
    h.ctx.document.set_selected(id).unwrap();

    let view = *h.ctx.document.view();
    let bbox = h.ctx.document.open(id).unwrap().bounding_box(&view);
    let handle = bbox.right_bottom() + vec2(10.0, 10.0);

    h.tick(FrameInput::press(handle));
    // 100 px outward at 0.005 per px
    h.tick(FrameInput::drag(handle + vec2(60.0, 80.0)));
    h.tick(FrameInput::release(handle + vec2(60.0, 80.0)));
    h.settle();

    let object = h.ctx.document.open(id).unwrap();
    assert!(approx(object.zoom_level(), 60.0));
    let after = object.bounding_box(h.ctx.document.view());
    assert!(approx(after.min.x, bbox.min.x) && approx(after.min.y, bbox.min.y));
}

#[test]
fn test_rotation_follows_pointer_across_wrap() {
    let (mut h, id) = Harness::with_image();
    h.ctx.document.set_selected(id).unwrap();

    // center is (150, 150); start to the right of it
    h.controller
        .toggle_rotate(&mut h.ctx, id, pos2(250.0, 150.0))
        .unwrap();
    assert!(h.controller.is_rotating());

    let rotation = |h: &Harness| h.ctx.document.open(id).unwrap().placement().rotation;

    h.tick(FrameInput::drag(pos2(150.0, 250.0)));
    assert!(approx(rotation(&h), 90.0));
    h.tick(FrameInput::drag(pos2(50.0, 150.0)));
    assert!(approx(rotation(&h), 180.0));
    h.tick(FrameInput::drag(pos2(150.0, 50.0)));
    assert!(approx(rotation(&h), 270.0));
    h.tick(FrameInput::drag(pos2(250.0, 151.0)));
    let r = rotation(&h);
    assert!((0.0..360.0).contains(&r));
    assert!(r < 1.0);

    h.tick(FrameInput::release(pos2(250.0, 151.0)));
    assert!(h.controller.state().is_idle());
    assert_eq!(h.ctx.history.undo_depth(), 1);
}

#[test]
fn test_text_cannot_rotate() {
    let mut h = Harness::new();
    let id = h.ctx.document.add_text(text("abc", 24.0), pos2(0.0, 0.0));
    assert!(
        h.controller
            .toggle_rotate(&mut h.ctx, id, pos2(10.0, 10.0))
            .is_err()
    );
    assert!(h.controller.state().is_idle());
}

#[test]
fn test_erasing_through_the_controller() {
    let mut h = Harness::new();
    let id = h.ctx.document.add_image(
        gradient_image("img", 20, 20),
        pos2(0.0, 0.0),
        &mut h.renderer,
    );
    Command::ToggleEraser(id)
        .execute(&mut h.ctx, &mut h.renderer)
        .unwrap();

    h.tick(FrameInput::press(pos2(10.0, 10.0)));
    assert!(matches!(h.controller.state(), InteractionState::Erasing { .. }));
    h.tick(FrameInput::drag(pos2(10.0, 16.0)));
    h.tick(FrameInput::release(pos2(10.0, 16.0)));

    let image = h.ctx.document.open(id).unwrap().as_image().unwrap();
    assert_eq!(alpha_at(image, 10, 10), 0);
    assert_eq!(alpha_at(image, 10, 16), 0);
    assert_eq!(alpha_at(image, 0, 0), 255);
    // the texture follows the pixels
    let texture = image.texture().unwrap();
    assert_eq!(h.renderer.textures[&texture], image.pixels());
    assert!(h.renderer.updates >= 1);
    // the whole stroke is one undo step
    assert_eq!(h.ctx.history.undo_depth(), 1);
    // the image did not move
    assert_eq!(h.screen_rect(id).min, pos2(0.0, 0.0));
}

#[test]
fn test_empty_press_pans_and_deselects() {
    let (mut h, id) = Harness::with_image();
    h.ctx.document.set_selected(id).unwrap();

    h.gesture(pos2(500.0, 500.0), pos2(520.0, 510.0));

    assert_eq!(h.ctx.document.selected(), None);
    assert_eq!(h.ctx.document.view().offset, vec2(20.0, 10.0));
    assert_eq!(h.screen_rect(id).min, pos2(120.0, 110.0));
    assert!(!h.ctx.history.can_undo());
}

#[test]
fn test_wheel_zooms_about_pointer() {
    let (mut h, id) = Harness::with_image();

    h.tick(FrameInput::wheel(pos2(100.0, 100.0), 1.0));

    assert!(approx(h.ctx.document.view().scale, 1.1));
    let object = h.ctx.document.open(id).unwrap();
    assert!(approx(object.zoom_level(), 1.1));
    // the image corner was under the pointer and stays there
    let min = h.screen_rect(id).min;
    assert!(approx(min.x, 100.0) && approx(min.y, 100.0));
}

#[test]
fn test_wheel_zooms_during_drag_and_pan() {
    let (mut h, id) = Harness::with_image();

    h.tick(FrameInput::press(pos2(150.0, 150.0)));
    h.tick(FrameInput {
        wheel_notches: 1.0,
        ..FrameInput::drag(pos2(150.0, 150.0))
    });
    assert!(matches!(h.controller.state(), InteractionState::Dragging { .. }));
    assert!(approx(h.ctx.document.view().scale, 1.1));
    assert!(approx(h.ctx.document.open(id).unwrap().zoom_level(), 1.1));
    // zoomed about the pointer
    assert!(approx(h.screen_rect(id).min.x, 95.0));

    // the drag carries on 1:1 in screen pixels
    h.tick(FrameInput::drag(pos2(160.0, 150.0)));
    h.tick(FrameInput::release(pos2(160.0, 150.0)));
    assert!(approx(h.screen_rect(id).min.x, 105.0));

    h.tick(FrameInput::press(pos2(500.0, 500.0)));
    h.tick(FrameInput {
        wheel_notches: 1.0,
        ..FrameInput::drag(pos2(500.0, 500.0))
    });
    assert!(matches!(h.controller.state(), InteractionState::Panning { .. }));
    assert!(approx(h.ctx.document.view().scale, 1.21));
}

#[test]
fn test_wheel_during_corner_zoom_keeps_anchor_under_grid() {
    let (mut h, id) = Harness::with_image();
    h.ctx.document.set_selected(id).unwrap();

    h.tick(FrameInput::press(pos2(90.0, 90.0)));
    h.tick(FrameInput {
        wheel_notches: 1.0,
        ..FrameInput::drag(pos2(90.0, 90.0))
    });
    // the bottom-right anchor moved with the grid: 90 + 110 * 1.1
    assert!(approx(h.screen_rect(id).max.x, 211.0));

    // 50 px outward from the grab point
    h.tick(FrameInput::drag(pos2(60.0, 50.0)));
    h.tick(FrameInput::release(pos2(60.0, 50.0)));
    h.settle();

    let object = h.ctx.document.open(id).unwrap();
    assert!(approx(object.zoom_level(), 1.65));
    let rect = h.screen_rect(id);
    assert!(approx(rect.max.x, 211.0) && approx(rect.max.y, 211.0));
}

#[test]
fn test_wheel_during_rotation_does_not_spin() {
    let (mut h, id) = Harness::with_image();
    h.controller
        .toggle_rotate(&mut h.ctx, id, pos2(250.0, 150.0))
        .unwrap();

    h.tick(FrameInput {
        wheel_notches: 1.0,
        ..FrameInput::drag(pos2(250.0, 150.0))
    });
    let rotation = |h: &Harness| h.ctx.document.open(id).unwrap().placement().rotation;
    assert!(approx(rotation(&h), 0.0));

    // the center followed the zoom to (140, 150)
    h.tick(FrameInput::drag(pos2(140.0, 250.0)));
    assert!(approx(rotation(&h), 90.0));
}

#[test]
fn test_press_outside_canvas_is_ignored() {
    let (mut h, _) = Harness::with_image();
    h.tick(FrameInput {
        over_canvas: false,
        ..FrameInput::press(pos2(150.0, 150.0))
    });
    assert!(h.controller.state().is_idle());
    assert_eq!(h.ctx.document.selected(), None);
}

#[test]
fn test_delete_key_mid_drag_resets_gesture() {
    let (mut h, id) = Harness::with_image();

    h.tick(FrameInput::press(pos2(150.0, 150.0)));
    h.tick(FrameInput {
        delete: true,
        ..FrameInput::drag(pos2(160.0, 150.0))
    });

    assert!(h.ctx.document.get(id).is_none());
    assert!(h.controller.state().is_idle());
    assert_eq!(h.renderer.live_textures(), 0);

    h.tick(FrameInput {
        undo: true,
        ..FrameInput::hover(pos2(0.0, 0.0))
    });
    assert_eq!(h.ctx.document.image_count(), 1);
}

#[test]
fn test_shortcuts_skip_erasing_image() {
    let (mut h, id) = Harness::with_image();
    Command::ToggleEraser(id)
        .execute(&mut h.ctx, &mut h.renderer)
        .unwrap();

    h.tick(FrameInput {
        delete: true,
        duplicate: true,
        ..FrameInput::hover(pos2(0.0, 0.0))
    });
    assert_eq!(h.ctx.document.len(), 1);
}

#[test]
fn test_duplicate_and_redo_shortcuts() {
    let (mut h, id) = Harness::with_image();
    h.ctx.document.set_selected(id).unwrap();

    h.tick(FrameInput {
        duplicate: true,
        ..FrameInput::hover(pos2(0.0, 0.0))
    });
    assert_eq!(h.ctx.document.len(), 2);

    h.tick(FrameInput {
        undo: true,
        ..FrameInput::hover(pos2(0.0, 0.0))
    });
    assert_eq!(h.ctx.document.len(), 1);

    h.tick(FrameInput {
        redo: true,
        ..FrameInput::hover(pos2(0.0, 0.0))
    });
    assert_eq!(h.ctx.document.len(), 2);
}

#[test]
fn test_overlay_and_cursor() {
    let (mut h, id) = Harness::with_image();
    h.ctx.document.set_selected(id).unwrap();

    h.controller
        .draw_overlay(&h.ctx, Some(pos2(150.0, 150.0)), &mut h.renderer);
    assert_eq!(h.renderer.outlines, 1);
    assert_eq!(h.renderer.handles, 4);
    assert_eq!(
        h.controller.cursor_icon(&h.ctx, Some(pos2(90.0, 90.0))),
        Some(CursorIcon::ResizeNwSe)
    );
    assert_eq!(h.controller.cursor_icon(&h.ctx, Some(pos2(150.0, 150.0))), None);

    h.renderer.clear_draws();
    Command::ToggleEraser(id)
        .execute(&mut h.ctx, &mut h.renderer)
        .unwrap();
    h.controller
        .draw_overlay(&h.ctx, Some(pos2(150.0, 150.0)), &mut h.renderer);
    assert_eq!(h.renderer.handles, 0);
    assert_eq!(h.renderer.eraser_cursors, vec![(pos2(150.0, 150.0), 5.0)]);
}

#[test]
fn test_undo_resets_active_gesture() {
    let (mut h, id) = Harness::with_image();
    h.tick(FrameInput::press(pos2(150.0, 150.0)));
    h.tick(FrameInput::drag(pos2(160.0, 150.0)));

    h.controller
        .run_command(&mut h.ctx, Command::Undo, &mut h.renderer)
        .unwrap();
    assert!(h.controller.state().is_idle());
    assert_eq!(h.screen_rect(id).min, pos2(100.0, 100.0));
}

#[test]
fn test_erase_undo_redo_is_byte_identical() {
    let mut h = Harness::new();
    let id = h.ctx.document.add_image(
        gradient_image("img", 20, 20),
        pos2(0.0, 0.0),
        &mut h.renderer,
    );
    let untouched = gradient_image("img", 20, 20).pixels().to_vec();
    Command::ToggleEraser(id)
        .execute(&mut h.ctx, &mut h.renderer)
        .unwrap();

    h.gesture(pos2(10.0, 10.0), pos2(10.0, 16.0));
    let erased = h.ctx.document.open(id).unwrap().as_image().unwrap().pixels().to_vec();
    let placement = *h.ctx.document.open(id).unwrap().placement();
    assert_ne!(erased, untouched);

    h.controller
        .run_command(&mut h.ctx, Command::Undo, &mut h.renderer)
        .unwrap();
    let image = h.ctx.document.open(id).unwrap().as_image().unwrap();
    assert_eq!(image.pixels(), untouched.as_slice());

    let uploads = h.renderer.uploads;
    h.controller
        .run_command(&mut h.ctx, Command::Redo, &mut h.renderer)
        .unwrap();
    let object = h.ctx.document.open(id).unwrap();
    let image = object.as_image().unwrap();
    assert_eq!(image.pixels(), erased.as_slice());
    assert_eq!(*object.placement(), placement);
    // redo uploads the erased buffer again
    assert_eq!(h.renderer.uploads, uploads + 1);
    assert_eq!(h.renderer.textures[&image.texture().unwrap()], erased);
    assert_eq!(h.renderer.live_textures(), 1);
}
