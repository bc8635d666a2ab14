use egui::{Color32, Pos2, Rect, Vec2};

use super::common::{self, ObjectMeta, Placement};
use super::{Renderable, Selectable, Transformable};
use crate::error::{CanvasError, CanvasResult};
use crate::renderer::{CanvasRenderer, FontProvider};
use crate::transform::GridView;

pub const PRESET_SIZES: [f32; 3] = [24.0, 48.0, 72.0];

/// How a text object is drawn.
///
/// `font_size` is the on-screen size at the current grid zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub fill: Color32,
    pub outline: Color32,
    pub outline_width: f32,
    pub font_size: f32,
    /// Index into the renderer's font table.
    pub font_index: usize,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            fill: Color32::WHITE,
            outline: Color32::BLACK,
            outline_width: 0.0,
            font_size: PRESET_SIZES[1],
            font_index: 0,
        }
    }
}

impl TextStyle {
    fn clamped(mut self) -> Self {
        self.font_size = common::clamp_text_size(self.font_size);
        self.outline_width = common::clamp_outline_width(self.outline_width);
        self
    }
}

/// Styled text placed on the canvas. Never rotated or mirrored.
#[derive(Debug, Clone)]
pub struct TextObject {
    content: String,
    style: TextStyle,
    /// Extent at [`common::MEASURE_REFERENCE_SIZE`].
    reference_extent: Vec2,
    placement: Placement,
    meta: ObjectMeta,
}

impl TextObject {
    pub fn new(
        content: impl Into<String>,
        style: TextStyle,
        fonts: &dyn FontProvider,
    ) -> CanvasResult<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(CanvasError::EmptyText);
        }

        let style = style.clamped();
        let reference_extent =
            fonts.measure(&content, style.font_index, common::MEASURE_REFERENCE_SIZE);

        Ok(Self {
            content,
            style,
            reference_extent,
            placement: Placement::at(Pos2::ZERO),
            meta: ObjectMeta::new(0),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn font_size(&self) -> f32 {
        self.style.font_size
    }

    /// Size of the rendered text without padding.
    pub fn extent(&self) -> Vec2 {
        self.reference_extent * (self.style.font_size / common::MEASURE_REFERENCE_SIZE)
    }

    pub fn padding(&self) -> f32 {
        self.style.font_size * common::TEXT_PADDING_RATIO
    }
}

impl Transformable for TextObject {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    /// The text box grown by the padding on every side.
    fn screen_rect(&self, view: &GridView) -> Rect {
        let origin = view.grid_to_screen(self.placement.position);
        let padding = Vec2::splat(self.padding());
        Rect::from_min_max(origin - padding, origin + self.extent() + padding)
    }

    fn zoom_level(&self) -> f32 {
        self.style.font_size
    }

    fn set_zoom_level(&mut self, level: f32) {
        self.style.font_size = common::clamp_text_size(level);
    }

    fn zoom_bounds(&self) -> (f32, f32) {
        (common::MIN_TEXT_SIZE, common::MAX_TEXT_SIZE)
    }

    fn can_rotate(&self) -> bool {
        false
    }

    fn can_mirror(&self) -> bool {
        false
    }
}

impl Renderable for TextObject {
    fn render(&self, view: &GridView, renderer: &mut dyn CanvasRenderer) {
        let origin = view.grid_to_screen(self.placement.position);
        renderer.draw_text(&self.content, &self.style, origin);
    }
}

impl Selectable for TextObject {
    fn meta(&self) -> &ObjectMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.meta
    }
}
