use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use log::{debug, warn};
use thiserror::Error;

use crate::renderer::TextureId;

/// Errors that can occur while moving pixels to the GPU
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TextureError {
    #[error("Invalid texture dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferMismatch { expected: usize, actual: usize },
    #[error("Unknown texture {0:?}")]
    UnknownTexture(TextureId),
}

/// Owns the egui textures backing image objects.
///
/// Dropping a [`TextureHandle`] frees the GPU texture, so releasing is just
/// removing the handle from the map.
pub struct TextureManager {
    textures: HashMap<TextureId, TextureHandle>,
    next_id: u64,
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            next_id: 1,
        }
    }

    /// Uploads an RGBA buffer and returns a fresh id for it.
    pub fn upload(
        &mut self,
        ctx: &Context,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<TextureId, TextureError> {
        let image = color_image(pixels, width, height)?;

        let id = TextureId(self.next_id);
        self.next_id += 1;

        let name = format!("canvas_object_{}", id.0);
        let handle = ctx.load_texture(name, image, TextureOptions::LINEAR);
        self.textures.insert(id, handle);

        debug!("Uploaded texture {:?} ({}x{})", id, width, height);
        Ok(id)
    }

    /// Replaces the pixels of an existing texture.
    pub fn update(
        &mut self,
        id: TextureId,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<(), TextureError> {
        let image = color_image(pixels, width, height)?;
        let handle = self
            .textures
            .get_mut(&id)
            .ok_or(TextureError::UnknownTexture(id))?;
        handle.set(image, TextureOptions::LINEAR);
        Ok(())
    }

    /// Frees a texture. Returns false if the id was not known.
    pub fn release(&mut self, id: TextureId) -> bool {
        let released = self.textures.remove(&id).is_some();
        if !released {
            warn!("Tried to release unknown texture {:?}", id);
        }
        released
    }

    pub fn egui_id(&self, id: TextureId) -> Option<egui::TextureId> {
        self.textures.get(&id).map(|handle| handle.id())
    }

    /// Returns the number of live textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

fn color_image(pixels: &[u8], width: usize, height: usize) -> Result<ColorImage, TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::InvalidDimensions { width, height });
    }
    let expected = width * height * 4;
    if pixels.len() != expected {
        return Err(TextureError::BufferMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(ColorImage::from_rgba_unmultiplied([width, height], pixels))
}
