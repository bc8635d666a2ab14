use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::element::common;

pub const SETTINGS_KEY: &str = "canvas_settings";

/// User tunables. Persisted through eframe storage; the document never is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct CanvasSettings {
    /// Zoom factor gained per pixel of corner drag on images.
    pub image_zoom_sensitivity: f32,
    /// Same for text, which reacts more strongly to size changes.
    pub text_zoom_sensitivity: f32,
    /// Grid zoom per mouse wheel notch.
    pub wheel_zoom_step: f32,
    /// Screen pixels between an object and its duplicate.
    pub duplicate_offset: f32,
    pub history_limit: usize,
    pub default_eraser_radius: u32,
    /// Share of the remaining distance covered per frame while easing.
    pub easing: f32,
    pub handle_size: f32,
    pub handle_offset: f32,
    pub show_grid: bool,
    pub grid_spacing: f32,
    pub grid_background: Color32,
    pub grid_dot_color: Color32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            image_zoom_sensitivity: 0.01,
            text_zoom_sensitivity: 0.005,
            wheel_zoom_step: 0.1,
            duplicate_offset: 20.0,
            history_limit: 100,
            default_eraser_radius: common::DEFAULT_ERASER_RADIUS,
            easing: common::DEFAULT_EASING,
            handle_size: 10.0,
            handle_offset: 5.0,
            show_grid: true,
            grid_spacing: 36.0,
            grid_background: Color32::from_rgb(18, 18, 28),
            grid_dot_color: Color32::from_rgb(179, 179, 204),
        }
    }
}

impl CanvasSettings {
    /// Restores settings saved by a previous run, falling back to defaults.
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| eframe::get_value::<Self>(storage, SETTINGS_KEY))
            .map(Self::sanitized)
            .unwrap_or_default()
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, self);
    }

    /// Pulls hand-edited or stale values back into usable ranges.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.image_zoom_sensitivity.is_nan() || self.image_zoom_sensitivity <= 0.0 {
            self.image_zoom_sensitivity = defaults.image_zoom_sensitivity;
        }
        if self.text_zoom_sensitivity.is_nan() || self.text_zoom_sensitivity <= 0.0 {
            self.text_zoom_sensitivity = defaults.text_zoom_sensitivity;
        }
        self.wheel_zoom_step = self.wheel_zoom_step.clamp(0.01, 0.9);
        self.history_limit = self.history_limit.max(1);
        self.default_eraser_radius = common::clamp_eraser_radius(self.default_eraser_radius);
        self.easing = self.easing.clamp(0.01, 1.0);
        self.handle_size = self.handle_size.max(1.0);
        self.handle_offset = self.handle_offset.max(0.0);
        if self.grid_spacing.is_nan() || self.grid_spacing < 1.0 {
            self.grid_spacing = defaults.grid_spacing;
        }
        self
    }
}
