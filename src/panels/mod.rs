pub mod frames_panel;
pub mod preview_panel;
pub mod properties_panel;

pub use frames_panel::frames_panel;
pub use preview_panel::{preview_panel, PreviewCache};
pub use properties_panel::{properties_panel, PropertiesState};
