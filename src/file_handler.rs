use eframe::egui;
use log::{info, warn};

use crate::element::ImageObject;
use crate::error::{CanvasError, CanvasResult};

/// File extensions offered by the Load Image dialog.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// An RGBA8 buffer decoded from an image file.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub name: String,
    pub pixels: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl DecodedImage {
    /// Turns the buffer into a canvas object with the given eraser radius.
    pub fn into_object(self, eraser_radius: u32) -> CanvasResult<ImageObject> {
        let mut image = ImageObject::new(&self.name, self.pixels, self.width, self.height)?;
        image.set_eraser_radius(eraser_radius);
        Ok(image)
    }
}

/// Decodes any format the `image` crate understands into RGBA8.
pub fn decode_image(name: &str, bytes: &[u8]) -> CanvasResult<DecodedImage> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = (rgba.width() as usize, rgba.height() as usize);
    if width == 0 || height == 0 {
        return Err(CanvasError::InvalidDimensions { width, height });
    }
    info!("Decoded {} ({}x{}, {} bytes)", name, width, height, bytes.len());
    Ok(DecodedImage {
        name: name.to_owned(),
        pixels: rgba.into_raw(),
        width,
        height,
    })
}

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = match &file.path {
        Some(path) => path.to_string_lossy().into_owned(),
        None => file.name.clone(),
    };
    std::path::Path::new(&name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Decodes one dropped file, reading it from disk if egui only gave a path.
pub fn decode_dropped(file: &egui::DroppedFile) -> CanvasResult<DecodedImage> {
    let name = display_name(file);
    if let Some(bytes) = &file.bytes {
        return decode_image(&name, bytes);
    }
    match &file.path {
        Some(path) => {
            let bytes = std::fs::read(path)?;
            decode_image(&name, &bytes)
        }
        None => Err(CanvasError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("dropped file {} has no accessible data", name),
        ))),
    }
}

/// Decodes every image dropped onto the window this frame.
///
/// Files that are not images or fail to decode are logged and skipped.
pub fn take_dropped_images(ctx: &egui::Context) -> Vec<DecodedImage> {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    dropped
        .iter()
        .filter(|file| {
            let is_image = is_image_file(file);
            if !is_image {
                warn!("Dropped file is not a supported type: {}", display_name(file));
            }
            is_image
        })
        .filter_map(|file| match decode_dropped(file) {
            Ok(image) => Some(image),
            Err(err) => {
                warn!("Failed to load {}: {}", display_name(file), err);
                None
            }
        })
        .collect()
}

/// Asks the user for an image file and decodes it.
///
/// Returns `Ok(None)` when the dialog is cancelled.
#[cfg(not(target_arch = "wasm32"))]
pub fn pick_image() -> CanvasResult<Option<DecodedImage>> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
    else {
        return Ok(None);
    };
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let bytes = std::fs::read(&path)?;
    decode_image(&name, &bytes).map(Some)
}

/// Dims the window while files hover over it.
pub fn preview_files_being_dropped(ctx: &egui::Context) {
    use egui::{Align2, Color32, FontId, Id, LayerId, Order};

    let count = ctx.input(|i| i.raw.hovered_files.len());
    if count == 0 {
        return;
    }

    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
    let screen_rect = ctx.screen_rect();
    painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
    painter.text(
        screen_rect.center(),
        Align2::CENTER_CENTER,
        format!("Drop to add {} image(s)", count),
        FontId::proportional(24.0),
        Color32::WHITE,
    );
}
