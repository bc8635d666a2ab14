use egui::epaint::{Mesh, Vertex};
use egui::{Align2, Color32, Context, FontFamily, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2, pos2};
use log::warn;

use crate::element::text::TextStyle;
use crate::texture_manager::{TextureError, TextureManager};

/// Renderer-side handle to an uploaded pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Drawing and texture primitives the canvas core needs from a backend.
///
/// Everything here takes screen-space coordinates.
pub trait CanvasRenderer {
    fn upload_texture(
        &mut self,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<TextureId, TextureError>;

    fn update_texture(
        &mut self,
        texture: TextureId,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<(), TextureError>;

    fn release_texture(&mut self, texture: TextureId);

    /// Draws `texture` onto a quad given as already-rotated corners
    /// (top-left, top-right, bottom-right, bottom-left).
    fn draw_quad(&mut self, corners: [Pos2; 4], texture: TextureId, uv: Rect);

    /// Stand-in for an image whose texture is not available.
    fn draw_placeholder(&mut self, corners: [Pos2; 4]);

    /// Draws `content` with its top-left corner at `position`.
    fn draw_text(&mut self, content: &str, style: &TextStyle, position: Pos2);

    fn draw_outline(&mut self, rect: Rect, color: Color32);

    fn draw_handle(&mut self, rect: Rect, hovered: bool);

    fn draw_eraser_cursor(&mut self, center: Pos2, radius: f32);
}

/// Measures text so objects know their extent without a renderer.
pub trait FontProvider {
    fn measure(&self, content: &str, font_index: usize, size: f32) -> Vec2;

    fn font_names(&self) -> Vec<String> {
        Vec::new()
    }
}

pub const SELECTION_COLOR: Color32 = Color32::from_rgb(180, 190, 254);
const HANDLE_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
const HANDLE_HOVER_COLOR: Color32 = Color32::WHITE;
const PLACEHOLDER_COLOR: Color32 = Color32::from_gray(90);

/// Step between the offset copies that make up a text outline.
const OUTLINE_STEP: f32 = 1.0;

/// egui implementation of [`CanvasRenderer`] and [`FontProvider`].
///
/// Drawing calls go to the painter set by [`EguiRenderer::begin_frame`] and are
/// dropped when no painter is set.
pub struct EguiRenderer {
    ctx: Context,
    textures: TextureManager,
    fonts: Vec<(String, FontFamily)>,
    painter: Option<Painter>,
}

impl EguiRenderer {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            textures: TextureManager::new(),
            fonts: vec![
                ("Default".to_owned(), FontFamily::Proportional),
                ("Monospace".to_owned(), FontFamily::Monospace),
            ],
            painter: None,
        }
    }

    pub fn begin_frame(&mut self, painter: Painter) {
        self.painter = Some(painter);
    }

    pub fn end_frame(&mut self) {
        self.painter = None;
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn font_id(&self, font_index: usize, size: f32) -> FontId {
        let family = self
            .fonts
            .get(font_index)
            .map(|(_, family)| family.clone())
            .unwrap_or(FontFamily::Proportional);
        FontId::new(size, family)
    }
}

impl CanvasRenderer for EguiRenderer {
    fn upload_texture(
        &mut self,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<TextureId, TextureError> {
        self.textures.upload(&self.ctx, pixels, width, height)
    }

    fn update_texture(
        &mut self,
        texture: TextureId,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<(), TextureError> {
        self.textures.update(texture, pixels, width, height)
    }

    fn release_texture(&mut self, texture: TextureId) {
        self.textures.release(texture);
    }

    fn draw_quad(&mut self, corners: [Pos2; 4], texture: TextureId, uv: Rect) {
        let Some(painter) = &self.painter else {
            return;
        };
        let Some(egui_texture) = self.textures.egui_id(texture) else {
            warn!("Drawing with unknown texture {:?}", texture);
            return;
        };

        let uvs = [
            uv.left_top(),
            uv.right_top(),
            uv.right_bottom(),
            uv.left_bottom(),
        ];
        let mut mesh = Mesh::with_texture(egui_texture);
        for (pos, uv) in corners.into_iter().zip(uvs) {
            mesh.vertices.push(Vertex {
                pos,
                uv,
                color: Color32::WHITE,
            });
        }
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        painter.add(Shape::mesh(mesh));
    }

    fn draw_placeholder(&mut self, corners: [Pos2; 4]) {
        if let Some(painter) = &self.painter {
            painter.add(Shape::convex_polygon(
                corners.to_vec(),
                PLACEHOLDER_COLOR,
                Stroke::new(1.0, Color32::from_gray(160)),
            ));
        }
    }

    fn draw_text(&mut self, content: &str, style: &TextStyle, position: Pos2) {
        let Some(painter) = &self.painter else {
            return;
        };
        let font = self.font_id(style.font_index, style.font_size);

        let width = style.outline_width;
        if width > 0.0 {
            let mut dx = -width;
            while dx <= width {
                let mut dy = -width;
                while dy <= width {
                    painter.text(
                        pos2(position.x + dx, position.y + dy),
                        Align2::LEFT_TOP,
                        content,
                        font.clone(),
                        style.outline,
                    );
                    dy += OUTLINE_STEP;
                }
                dx += OUTLINE_STEP;
            }
        }
        painter.text(position, Align2::LEFT_TOP, content, font, style.fill);
    }

    fn draw_outline(&mut self, rect: Rect, color: Color32) {
        if let Some(painter) = &self.painter {
            painter.rect_stroke(rect, 0.0, Stroke::new(2.0, color));
        }
    }

    fn draw_handle(&mut self, rect: Rect, hovered: bool) {
        if let Some(painter) = &self.painter {
            let color = if hovered { HANDLE_HOVER_COLOR } else { HANDLE_COLOR };
            painter.rect_filled(rect, 0.0, color);
        }
    }

    fn draw_eraser_cursor(&mut self, center: Pos2, radius: f32) {
        if let Some(painter) = &self.painter {
            painter.circle_stroke(center, radius, Stroke::new(1.0, Color32::WHITE));
            painter.circle_stroke(center, radius + 1.0, Stroke::new(1.0, Color32::BLACK));
        }
    }
}

impl FontProvider for EguiRenderer {
    fn measure(&self, content: &str, font_index: usize, size: f32) -> Vec2 {
        let font = self.font_id(font_index, size);
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(content.to_owned(), font, Color32::WHITE)
                .size()
        })
    }

    fn font_names(&self) -> Vec<String> {
        self.fonts.iter().map(|(name, _)| name.clone()).collect()
    }
}
