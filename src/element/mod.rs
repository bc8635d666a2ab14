use egui::{Pos2, Rect, Vec2};

pub mod common;
pub mod image;
pub mod text;

pub use common::{ObjectMeta, Placement};
pub use image::ImageObject;
pub use text::{TextObject, TextStyle};

use crate::renderer::CanvasRenderer;
use crate::transform::{self, GridView};

/// Position, zoom and rotation of a canvas object.
pub trait Transformable {
    fn placement(&self) -> &Placement;

    fn placement_mut(&mut self) -> &mut Placement;

    /// The unrotated on-screen rectangle.
    fn screen_rect(&self, view: &GridView) -> Rect;

    /// The value corner zoom and grid zoom scale: image scale or font size.
    fn zoom_level(&self) -> f32;

    /// Sets the zoom level, clamped to [`Transformable::zoom_bounds`].
    fn set_zoom_level(&mut self, level: f32);

    fn zoom_bounds(&self) -> (f32, f32);

    fn can_rotate(&self) -> bool {
        true
    }

    fn can_mirror(&self) -> bool {
        true
    }

    /// Screen rectangle corners after rotation (TL, TR, BR, BL).
    fn corners(&self, view: &GridView) -> [Pos2; 4] {
        transform::rotated_corners(self.screen_rect(view), self.placement().rotation)
    }

    /// Axis-aligned box around the rotated object, used for hit testing and
    /// handle placement.
    fn bounding_box(&self, view: &GridView) -> Rect {
        transform::bounding_box(&self.corners(view))
    }

    /// Moves the object by a grid-space delta, skipping the easing.
    fn translate(&mut self, delta: Vec2) {
        self.placement_mut().translate(delta);
    }

    fn rotate_by(&mut self, degrees: f32) {
        if self.can_rotate() {
            let placement = self.placement_mut();
            placement.rotation = transform::normalize_degrees(placement.rotation + degrees);
        }
    }

    fn toggle_mirror(&mut self) {
        if self.can_mirror() {
            let placement = self.placement_mut();
            placement.mirrored = !placement.mirrored;
        }
    }

    /// Returns true while the object is still moving.
    fn ease_toward_target(&mut self, factor: f32) -> bool {
        self.placement_mut().ease(factor)
    }
}

pub trait Renderable {
    fn render(&self, view: &GridView, renderer: &mut dyn CanvasRenderer);
}

pub trait Selectable {
    fn meta(&self) -> &ObjectMeta;

    fn meta_mut(&mut self) -> &mut ObjectMeta;

    /// Called when the object loses the selection.
    fn on_deselect(&mut self) {}

    fn is_selected(&self) -> bool {
        self.meta().selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.meta_mut().selected = selected;
        if !selected {
            self.on_deselect();
        }
    }

    fn is_open(&self) -> bool {
        self.meta().open
    }

    fn z_order(&self) -> i64 {
        self.meta().z_order
    }
}

/// Enumeration of all object kinds on the canvas
#[derive(Debug, Clone)]
pub enum ElementType {
    Image(ImageObject),
    Text(TextObject),
}

impl ElementType {
    pub fn element_type(&self) -> &'static str {
        match self {
            ElementType::Image(_) => "image",
            ElementType::Text(_) => "text",
        }
    }

    pub fn as_image(&self) -> Option<&ImageObject> {
        match self {
            ElementType::Image(image) => Some(image),
            ElementType::Text(_) => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageObject> {
        match self {
            ElementType::Image(image) => Some(image),
            ElementType::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextObject> {
        match self {
            ElementType::Text(text) => Some(text),
            ElementType::Image(_) => None,
        }
    }

    /// True for an image with eraser mode on.
    pub fn is_erasing(&self) -> bool {
        self.as_image().is_some_and(ImageObject::eraser_mode)
    }
}

impl Transformable for ElementType {
    fn placement(&self) -> &Placement {
        match self {
            ElementType::Image(i) => i.placement(),
            ElementType::Text(t) => t.placement(),
        }
    }

    fn placement_mut(&mut self) -> &mut Placement {
        match self {
            ElementType::Image(i) => i.placement_mut(),
            ElementType::Text(t) => t.placement_mut(),
        }
    }

    fn screen_rect(&self, view: &GridView) -> Rect {
        match self {
            ElementType::Image(i) => i.screen_rect(view),
            ElementType::Text(t) => t.screen_rect(view),
        }
    }

    fn zoom_level(&self) -> f32 {
        match self {
            ElementType::Image(i) => i.zoom_level(),
            ElementType::Text(t) => t.zoom_level(),
        }
    }

    fn set_zoom_level(&mut self, level: f32) {
        match self {
            ElementType::Image(i) => i.set_zoom_level(level),
            ElementType::Text(t) => t.set_zoom_level(level),
        }
    }

    fn zoom_bounds(&self) -> (f32, f32) {
        match self {
            ElementType::Image(i) => i.zoom_bounds(),
            ElementType::Text(t) => t.zoom_bounds(),
        }
    }

    fn can_rotate(&self) -> bool {
        match self {
            ElementType::Image(i) => i.can_rotate(),
            ElementType::Text(t) => t.can_rotate(),
        }
    }

    fn can_mirror(&self) -> bool {
        match self {
            ElementType::Image(i) => i.can_mirror(),
            ElementType::Text(t) => t.can_mirror(),
        }
    }
}

impl Renderable for ElementType {
    fn render(&self, view: &GridView, renderer: &mut dyn CanvasRenderer) {
        match self {
            ElementType::Image(i) => i.render(view, renderer),
            ElementType::Text(t) => t.render(view, renderer),
        }
    }
}

impl Selectable for ElementType {
    fn meta(&self) -> &ObjectMeta {
        match self {
            ElementType::Image(i) => i.meta(),
            ElementType::Text(t) => t.meta(),
        }
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        match self {
            ElementType::Image(i) => i.meta_mut(),
            ElementType::Text(t) => t.meta_mut(),
        }
    }

    fn on_deselect(&mut self) {
        match self {
            ElementType::Image(i) => i.on_deselect(),
            ElementType::Text(t) => t.on_deselect(),
        }
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;
    use crate::error::CanvasResult;
    use crate::renderer::FontProvider;

    /// Create a new image element from an RGBA buffer
    pub fn create_image(
        name: &str,
        pixels: Vec<u8>,
        width: usize,
        height: usize,
    ) -> CanvasResult<ElementType> {
        ImageObject::new(name, pixels, width, height).map(ElementType::Image)
    }

    /// Create a new text element
    pub fn create_text(
        content: &str,
        style: TextStyle,
        fonts: &dyn FontProvider,
    ) -> CanvasResult<ElementType> {
        TextObject::new(content, style, fonts).map(ElementType::Text)
    }
}
