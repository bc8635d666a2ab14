use egui::{Pos2, Rect, pos2, vec2};
use log::info;

use super::common::{self, ObjectMeta, Placement};
use super::{Renderable, Selectable, Transformable};
use crate::error::{CanvasError, CanvasResult};
use crate::renderer::{CanvasRenderer, TextureId};
use crate::transform::GridView;

/// Raster image placed on the canvas.
///
/// Owns its RGBA pixels (row-major, 4 bytes per pixel). The GPU copy lives in
/// the renderer and is referenced through `texture`.
#[derive(Clone)]
pub struct ImageObject {
    name: String,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    scale: f32,
    eraser_radius: u32,
    eraser_mode: bool,
    texture: Option<TextureId>,
    placement: Placement,
    meta: ObjectMeta,
}

// Custom Debug implementation so the pixel buffer is not dumped
impl std::fmt::Debug for ImageObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageObject")
            .field("name", &self.name)
            .field("size", &(self.width, self.height))
            .field("data_len", &self.pixels.len())
            .field("scale", &self.scale)
            .field("eraser_radius", &self.eraser_radius)
            .field("eraser_mode", &self.eraser_mode)
            .field("texture", &self.texture)
            .field("placement", &self.placement)
            .field("meta", &self.meta)
            .finish()
    }
}

impl ImageObject {
    /// Wraps an RGBA buffer. Fails if the buffer does not hold exactly
    /// `width * height` pixels.
    pub fn new(
        name: impl Into<String>,
        pixels: Vec<u8>,
        width: usize,
        height: usize,
    ) -> CanvasResult<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(CanvasError::PixelBufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let name = name.into();
        info!("🖼️ Created image '{}': {}x{}", name, width, height);

        Ok(Self {
            name,
            width,
            height,
            pixels,
            scale: 1.0,
            eraser_radius: common::DEFAULT_ERASER_RADIUS,
            eraser_mode: false,
            texture: None,
            placement: Placement::at(Pos2::ZERO),
            meta: ObjectMeta::new(0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn eraser_radius(&self) -> u32 {
        self.eraser_radius
    }

    pub fn set_eraser_radius(&mut self, radius: u32) {
        self.eraser_radius = common::clamp_eraser_radius(radius);
    }

    pub fn eraser_mode(&self) -> bool {
        self.eraser_mode
    }

    pub fn set_eraser_mode(&mut self, on: bool) {
        self.eraser_mode = on;
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub(crate) fn set_texture(&mut self, texture: Option<TextureId>) {
        self.texture = texture;
    }

    pub(crate) fn take_texture(&mut self) -> Option<TextureId> {
        self.texture.take()
    }

    /// Uploads the pixels, replacing (and releasing) any previous texture.
    pub(crate) fn upload(&mut self, renderer: &mut dyn CanvasRenderer) {
        if let Some(old) = self.texture.take() {
            renderer.release_texture(old);
        }
        match renderer.upload_texture(&self.pixels, self.width, self.height) {
            Ok(texture) => self.texture = Some(texture),
            Err(err) => log::error!("Failed to upload texture for '{}': {}", self.name, err),
        }
    }

    /// Pushes the current pixels to the existing texture.
    pub(crate) fn sync_texture(&mut self, renderer: &mut dyn CanvasRenderer) {
        match self.texture {
            Some(texture) => {
                if let Err(err) =
                    renderer.update_texture(texture, &self.pixels, self.width, self.height)
                {
                    log::warn!("Texture update for '{}' failed ({}), re-uploading", self.name, err);
                    self.upload(renderer);
                }
            }
            None => self.upload(renderer),
        }
    }

    fn uv(&self) -> Rect {
        if self.placement.mirrored {
            Rect::from_min_max(pos2(1.0, 0.0), pos2(0.0, 1.0))
        } else {
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0))
        }
    }
}

impl Transformable for ImageObject {
    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    fn screen_rect(&self, view: &GridView) -> Rect {
        let size = vec2(self.width as f32, self.height as f32) * self.scale;
        Rect::from_min_size(view.grid_to_screen(self.placement.position), size)
    }

    fn zoom_level(&self) -> f32 {
        self.scale
    }

    fn set_zoom_level(&mut self, level: f32) {
        self.scale = common::clamp_scale(level);
    }

    fn zoom_bounds(&self) -> (f32, f32) {
        (common::MIN_SCALE, common::MAX_SCALE)
    }
}

impl Renderable for ImageObject {
    fn render(&self, view: &GridView, renderer: &mut dyn CanvasRenderer) {
        let corners = self.corners(view);
        match self.texture {
            Some(texture) => renderer.draw_quad(corners, texture, self.uv()),
            None => renderer.draw_placeholder(corners),
        }
    }
}

impl Selectable for ImageObject {
    fn meta(&self) -> &ObjectMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.meta
    }

    fn on_deselect(&mut self) {
        self.eraser_mode = false;
    }
}
