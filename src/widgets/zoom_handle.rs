use egui::{CursorIcon, Pos2, Rect, Vec2, pos2, vec2};

/// Represents a corner of an object's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Clockwise from the top-left, matching [`crate::transform::rotated_corners`].
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomRight => 2,
            Corner::BottomLeft => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top_left",
            Corner::TopRight => "top_right",
            Corner::BottomRight => "bottom_right",
            Corner::BottomLeft => "bottom_left",
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            Corner::TopLeft | Corner::BottomRight => CursorIcon::ResizeNwSe,
            Corner::TopRight | Corner::BottomLeft => CursorIcon::ResizeNeSw,
        }
    }

    /// Signs of the drag direction that points into the box from this corner.
    /// Dragging along either of them zooms out.
    pub fn inward_signs(self) -> Vec2 {
        match self {
            Corner::TopLeft => vec2(1.0, 1.0),
            Corner::TopRight => vec2(-1.0, 1.0),
            Corner::BottomRight => vec2(-1.0, -1.0),
            Corner::BottomLeft => vec2(1.0, -1.0),
        }
    }

    /// The corner of `rect` this value names.
    pub fn point_of(self, rect: Rect) -> Pos2 {
        match self {
            Corner::TopLeft => rect.left_top(),
            Corner::TopRight => rect.right_top(),
            Corner::BottomRight => rect.right_bottom(),
            Corner::BottomLeft => rect.left_bottom(),
        }
    }

    /// The square handle for this corner, `offset` pixels outside `bbox`.
    pub fn handle_rect(self, bbox: Rect, size: f32, offset: f32) -> Rect {
        let outer = size + offset;
        let min = match self {
            Corner::TopLeft => pos2(bbox.min.x - outer, bbox.min.y - outer),
            Corner::TopRight => pos2(bbox.max.x + offset, bbox.min.y - outer),
            Corner::BottomRight => pos2(bbox.max.x + offset, bbox.max.y + offset),
            Corner::BottomLeft => pos2(bbox.min.x - outer, bbox.max.y + offset),
        };
        Rect::from_min_size(min, Vec2::splat(size))
    }

    /// Whether a drag from the handle shrinks the object.
    pub fn zooms_out(self, drag: Vec2) -> bool {
        let inward = self.inward_signs();
        drag.x * inward.x > 0.0 || drag.y * inward.y > 0.0
    }

    /// Zoom factor for a drag of `drag` pixels away from where the handle was
    /// grabbed: `1 + distance * sensitivity`, inverted when zooming out.
    pub fn zoom_factor(self, drag: Vec2, sensitivity: f32) -> f32 {
        let factor = 1.0 + drag.length() * sensitivity;
        if self.zooms_out(drag) {
            1.0 / factor
        } else {
            factor
        }
    }
}

/// The handle under `pos`, if any.
pub fn handle_at(bbox: Rect, pos: Pos2, size: f32, offset: f32) -> Option<Corner> {
    Corner::ALL
        .into_iter()
        .find(|corner| corner.handle_rect(bbox, size, offset).contains(pos))
}
