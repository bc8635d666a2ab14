#![allow(dead_code)]

use std::collections::HashMap;

use eframe_canvas::element::TextStyle;
use eframe_canvas::texture_manager::TextureError;
use eframe_canvas::{CanvasRenderer, FontProvider, ImageObject, TextObject, TextureId};
use egui::{Color32, Pos2, Rect, Vec2, vec2};

/// Renderer that keeps textures in memory and counts draw calls.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_id: u64,
    pub textures: HashMap<TextureId, Vec<u8>>,
    pub uploads: usize,
    pub updates: usize,
    pub releases: usize,
    pub quads: Vec<[Pos2; 4]>,
    pub texts: Vec<(String, Pos2)>,
    pub outlines: usize,
    pub handles: usize,
    pub eraser_cursors: Vec<(Pos2, f32)>,
}

impl RecordingRenderer {
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn clear_draws(&mut self) {
        self.quads.clear();
        self.texts.clear();
        self.outlines = 0;
        self.handles = 0;
        self.eraser_cursors.clear();
    }
}

impl CanvasRenderer for RecordingRenderer {
    fn upload_texture(
        &mut self,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<TextureId, TextureError> {
        if pixels.len() != width * height * 4 {
            return Err(TextureError::BufferMismatch {
                expected: width * height * 4,
                actual: pixels.len(),
            });
        }
        self.next_id += 1;
        let id = TextureId(self.next_id);
        self.textures.insert(id, pixels.to_vec());
        self.uploads += 1;
        Ok(id)
    }

    fn update_texture(
        &mut self,
        texture: TextureId,
        pixels: &[u8],
        _width: usize,
        _height: usize,
    ) -> Result<(), TextureError> {
        let stored = self
            .textures
            .get_mut(&texture)
            .ok_or(TextureError::UnknownTexture(texture))?;
        *stored = pixels.to_vec();
        self.updates += 1;
        Ok(())
    }

    fn release_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_some() {
            self.releases += 1;
        }
    }

    fn draw_quad(&mut self, corners: [Pos2; 4], _texture: TextureId, _uv: Rect) {
        self.quads.push(corners);
    }

    fn draw_placeholder(&mut self, corners: [Pos2; 4]) {
        self.quads.push(corners);
    }

    fn draw_text(&mut self, content: &str, _style: &TextStyle, position: Pos2) {
        self.texts.push((content.to_owned(), position));
    }

    fn draw_outline(&mut self, _rect: Rect, _color: Color32) {
        self.outlines += 1;
    }

    fn draw_handle(&mut self, _rect: Rect, _hovered: bool) {
        self.handles += 1;
    }

    fn draw_eraser_cursor(&mut self, center: Pos2, radius: f32) {
        self.eraser_cursors.push((center, radius));
    }
}

/// Every character is 0.5em wide and every line 1em tall.
pub struct FixedFonts;

impl FontProvider for FixedFonts {
    fn measure(&self, content: &str, _font_index: usize, size: f32) -> Vec2 {
        let columns = content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let rows = content.lines().count().max(1);
        vec2(columns as f32 * size * 0.5, rows as f32 * size)
    }

    fn font_names(&self) -> Vec<String> {
        vec!["Fixed".to_owned()]
    }
}

/// Opaque image whose pixel at (x, y) has red = x and green = y.
pub fn gradient_image(name: &str, width: usize, height: usize) -> ImageObject {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
        }
    }
    ImageObject::new(name, pixels, width, height).unwrap()
}

pub fn text(content: &str, size: f32) -> TextObject {
    let style = TextStyle {
        font_size: size,
        ..TextStyle::default()
    };
    TextObject::new(content, style, &FixedFonts).unwrap()
}

pub fn alpha_at(image: &ImageObject, x: usize, y: usize) -> u8 {
    image.pixels()[(y * image.width() + x) * 4 + 3]
}
