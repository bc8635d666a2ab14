#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod document;
pub mod element;
pub mod eraser;
pub mod error;
pub mod file_handler;
pub mod grid;
pub mod input;
pub mod interaction;
pub mod object_table;
pub mod panels;
pub mod renderer;
pub mod settings;
pub mod texture_manager;
pub mod transform;
pub mod widgets;

pub use app::CanvasApp;
pub use command::{Command, EditorContext, History};
pub use document::Document;
pub use element::{ElementType, ImageObject, TextObject, TextStyle};
pub use error::{CanvasError, CanvasResult};
pub use input::FrameInput;
pub use interaction::{InteractionController, InteractionState};
pub use object_table::ObjectId;
pub use renderer::{CanvasRenderer, EguiRenderer, FontProvider, TextureId};
pub use settings::CanvasSettings;
pub use transform::GridView;
