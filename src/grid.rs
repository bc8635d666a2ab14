//! Dot lattice drawn behind the canvas objects.

use egui::{Color32, Painter, Pos2, Rect, pos2};

use crate::transform::GridView;

/// Dots closer together than this are thinned out.
pub const MIN_DOT_SPACING: f32 = 10.0;
pub const BASE_DOT_SIZE: f32 = 1.0;
pub const MIN_DOT_SIZE: f32 = 0.5;
pub const MAX_DOTS: usize = 300 * 300;

/// Where the dots of one frame go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotGrid {
    /// Top-left dot, one spacing outside the viewport.
    pub first: Pos2,
    pub spacing: f32,
    /// Dot diameter.
    pub dot_size: f32,
    pub columns: usize,
    pub rows: usize,
}

impl DotGrid {
    pub fn layout(view: &GridView, viewport: Rect, base_spacing: f32) -> Self {
        let mut spacing = base_spacing * view.scale;
        let mut dot_size = BASE_DOT_SIZE * view.scale;

        if spacing < MIN_DOT_SPACING {
            let factor = (MIN_DOT_SPACING / spacing) as u32 + 1;
            spacing *= factor as f32;
            dot_size *= (factor as f32).sqrt();
        }
        let dot_size = dot_size.max(MIN_DOT_SIZE);

        // dots sit at offset + k * spacing
        let first = pos2(
            viewport.min.x + (view.offset.x - viewport.min.x).rem_euclid(spacing) - spacing,
            viewport.min.y + (view.offset.y - viewport.min.y).rem_euclid(spacing) - spacing,
        );
        let columns = ((viewport.max.x + spacing - first.x) / spacing).ceil().max(0.0) as usize;
        let rows = ((viewport.max.y + spacing - first.y) / spacing).ceil().max(0.0) as usize;

        Self {
            first,
            spacing,
            dot_size,
            columns,
            rows,
        }
    }

    /// Dot centers, column by column, capped at [`MAX_DOTS`].
    pub fn dots(&self) -> impl Iterator<Item = Pos2> + '_ {
        (0..self.columns)
            .flat_map(move |column| {
                (0..self.rows).map(move |row| {
                    pos2(
                        self.first.x + column as f32 * self.spacing,
                        self.first.y + row as f32 * self.spacing,
                    )
                })
            })
            .take(MAX_DOTS)
    }

    pub fn paint(&self, painter: &Painter, color: Color32) {
        let radius = self.dot_size / 2.0;
        for dot in self.dots() {
            painter.circle_filled(dot, radius, color);
        }
    }
}
