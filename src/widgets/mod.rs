pub mod zoom_handle;

pub use zoom_handle::{Corner, handle_at};
