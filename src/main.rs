//! Carousel Studio: design multi-frame social carousels and export
//! them as image bundles.

use carousel_studio::app::{StudioApp, StudioConfig};

fn main() -> eframe::Result {
    env_logger::init();

    let config = StudioConfig::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Carousel Studio"),
        ..Default::default()
    };

    eframe::run_native(
        "carousel-studio",
        options,
        Box::new(|cc| Ok(Box::new(StudioApp::new(cc, config)))),
    )
}
