//! Destructive erasing of image pixels.
//!
//! The eraser stamps a filled circle of transparent pixels into the image's
//! own buffer. The pointer is mapped from screen space into the image's local
//! pixel grid first, undoing the object's scale, rotation and mirroring.

use egui::Pos2;

use crate::element::{ImageObject, Transformable};
use crate::transform::{self, GridView};

/// Pixel-space rectangle touched by an erase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EraseOutcome {
    /// Pixels whose alpha went from non-zero to zero.
    pub changed: usize,
    /// Part of the buffer that needs re-uploading, if anything changed.
    pub region: Option<PixelRect>,
}

impl EraseOutcome {
    pub fn is_empty(&self) -> bool {
        self.changed == 0
    }
}

/// Maps a screen point to integer pixel coordinates of `image`.
///
/// The result may lie outside the image.
pub fn screen_to_local(image: &ImageObject, view: &GridView, screen: Pos2) -> (i64, i64) {
    let placement = image.placement();
    let center = image.screen_rect(view).center();

    let unrotated = transform::rotate_vec(screen - center, -placement.rotation);
    let unscaled = unrotated / image.scale();

    let x = (unscaled.x + image.width() as f32 / 2.0).floor() as i64;
    let y = (unscaled.y + image.height() as f32 / 2.0).floor() as i64;

    let x = if placement.mirrored {
        image.width() as i64 - 1 - x
    } else {
        x
    };
    (x, y)
}

/// Erases a circle of the image's eraser radius under a screen point.
///
/// Nothing happens when the point falls outside the image. The caller is
/// responsible for pushing the new pixels to the renderer.
pub fn erase_at(image: &mut ImageObject, view: &GridView, screen: Pos2) -> EraseOutcome {
    let (x, y) = screen_to_local(image, view, screen);
    erase_local(image, x, y)
}

/// Erases a circle centered on a local pixel.
pub fn erase_local(image: &mut ImageObject, x: i64, y: i64) -> EraseOutcome {
    let width = image.width() as i64;
    let height = image.height() as i64;
    if x < 0 || y < 0 || x >= width || y >= height {
        return EraseOutcome::default();
    }

    let radius = image.eraser_radius() as i64;
    let min_x = (x - radius).max(0);
    let max_x = (x + radius).min(width - 1);
    let min_y = (y - radius).max(0);
    let max_y = (y + radius).min(height - 1);

    let pixels = image.pixels_mut();
    let mut changed = 0;
    for py in min_y..=max_y {
        let dy = py - y;
        for px in min_x..=max_x {
            let dx = px - x;
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let alpha = ((py * width + px) * 4 + 3) as usize;
            if pixels[alpha] != 0 {
                pixels[alpha] = 0;
                changed += 1;
            }
        }
    }

    let region = (changed > 0).then(|| PixelRect {
        x: min_x as usize,
        y: min_y as usize,
        width: (max_x - min_x + 1) as usize,
        height: (max_y - min_y + 1) as usize,
    });
    EraseOutcome { changed, region }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Vec2, pos2};

    fn opaque(width: usize, height: usize) -> ImageObject {
        ImageObject::new("opaque", vec![255; width * height * 4], width, height).unwrap()
    }

    fn alpha(image: &ImageObject, x: usize, y: usize) -> u8 {
        image.pixels()[(y * image.width() + x) * 4 + 3]
    }

    #[test]
    fn test_center_erase_clears_exact_disc() {
        let mut image = opaque(100, 100);
        image.set_eraser_radius(5);
        let view = GridView::default();

        let outcome = erase_at(&mut image, &view, pos2(50.0, 50.0));

        let mut expected = 0;
        for y in 0..100 {
            for x in 0..100 {
                let dx = x as i64 - 50;
                let dy = y as i64 - 50;
                let inside = dx * dx + dy * dy <= 25;
                if inside {
                    expected += 1;
                }
                assert_eq!(alpha(&image, x, y) == 0, inside, "pixel ({x}, {y})");
            }
        }
        assert_eq!(outcome.changed, expected);
        assert_eq!(
            outcome.region,
            Some(PixelRect {
                x: 45,
                y: 45,
                width: 11,
                height: 11
            })
        );
    }

    #[test]
    fn test_outside_image_is_noop() {
        let mut image = opaque(10, 10);
        let before = image.pixels().to_vec();

        let outcome = erase_at(&mut image, &GridView::default(), pos2(-3.0, 4.0));

        assert!(outcome.is_empty());
        assert_eq!(outcome.region, None);
        assert_eq!(image.pixels(), &before[..]);
    }

    #[test]
    fn test_erasing_twice_changes_nothing_new() {
        let mut image = opaque(20, 20);
        let view = GridView::default();
        let first = erase_at(&mut image, &view, pos2(10.0, 10.0));
        let second = erase_at(&mut image, &view, pos2(10.0, 10.0));
        assert!(first.changed > 0);
        assert_eq!(second.changed, 0);
    }

    #[test]
    fn test_edge_erase_is_clamped() {
        let mut image = opaque(10, 10);
        image.set_eraser_radius(3);
        let outcome = erase_local(&mut image, 0, 0);
        // quarter disc of radius 3 including the axes
        assert_eq!(outcome.changed, 11);
        assert_eq!(alpha(&image, 0, 0), 0);
        assert_eq!(alpha(&image, 3, 0), 0);
        assert_eq!(alpha(&image, 3, 3), 255);
    }

    #[test]
    fn test_mirror_reflects_x() {
        let mut image = opaque(10, 4);
        image.toggle_mirror();
        let view = GridView::default();
        // screen x 1.5 lands on column 1 before mirroring
        let (x, y) = screen_to_local(&image, &view, pos2(1.5, 2.5));
        assert_eq!((x, y), (8, 2));
    }

    #[test]
    fn test_rotation_is_undone() {
        let mut image = opaque(20, 10);
        image.rotate_by(90.0);
        let view = GridView::default();
        let center = image.screen_rect(&view).center();

        // after a quarter turn the image's +x axis points down the screen
        // and its +y axis points left
        let (x, y) = screen_to_local(&image, &view, center + Vec2::new(0.3, 6.5));
        assert_eq!((x, y), (16, 4));
    }

    #[test]
    fn test_scale_is_undone() {
        let mut image = opaque(10, 10);
        image.set_zoom_level(2.0);
        let view = GridView::default();
        let (x, y) = screen_to_local(&image, &view, pos2(19.0, 1.0));
        assert_eq!((x, y), (9, 0));
    }
}
