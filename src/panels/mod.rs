mod central_panel;
mod object_toolbar;
mod settings_window;
mod text_dialog;
mod top_panel;

pub use central_panel::central_panel;
pub use object_toolbar::object_toolbar;
pub use settings_window::{settings_window, stats_window};
pub use text_dialog::TextDialog;
pub use top_panel::top_panel;
