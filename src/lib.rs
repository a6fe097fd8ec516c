#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod editor;
pub mod export;
pub mod model;
pub mod panels;
pub mod persistence;
pub mod render;
pub mod util;

pub use app::StudioApp;
pub use editor::{EditorNotice, EditorSession};
pub use export::{export_project, ExportError};
pub use model::{Frame, Project};
pub use persistence::{ProjectStore, SaveCoordinator, StoreError};
pub use render::{FontLibrary, FrameRenderer, RenderError};
