use super::History;
use crate::document::Document;
use crate::settings::CanvasSettings;

/// Everything commands and the interaction controller operate on,
/// passed explicitly instead of living in globals.
#[derive(Debug)]
pub struct EditorContext {
    /// The document being edited
    pub document: Document,
    pub history: History,
    pub settings: CanvasSettings,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(CanvasSettings::default())
    }
}

impl EditorContext {
    pub fn new(settings: CanvasSettings) -> Self {
        Self {
            document: Document::new(),
            history: History::new(settings.history_limit),
            settings,
        }
    }

    /// Applies edited settings, resizing the history if needed.
    pub fn set_settings(&mut self, settings: CanvasSettings) {
        let settings = settings.sanitized();
        if settings.history_limit != self.history.limit() {
            self.history.set_limit(settings.history_limit);
        }
        self.settings = settings;
    }
}
