use uuid::Uuid;

use crate::editor::EditorSession;
use crate::render::{FontLibrary, FrameRenderer};

/// Width the preview is rasterized at; the on-screen widget scales the
/// resulting texture to the available space.
const PREVIEW_WIDTH: u32 = 432;

/// Caches the uploaded preview texture, keyed by (frame id, session
/// revision) so the frame is only re-rasterized after a mutation. A
/// failed render caches its message instead, kept until the key
/// changes, so every frame shows why the preview is missing.
#[derive(Default)]
pub struct PreviewCache {
    texture: Option<egui::TextureHandle>,
    error: Option<String>,
    key: Option<(Uuid, u64)>,
}

impl PreviewCache {
    pub fn invalidate(&mut self) {
        self.key = None;
        self.error = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn note_success(&mut self, key: (Uuid, u64), texture: egui::TextureHandle) {
        self.texture = Some(texture);
        self.error = None;
        self.key = Some(key);
    }

    fn note_failure(&mut self, key: (Uuid, u64), message: String) {
        self.texture = None;
        self.error = Some(message);
        self.key = Some(key);
    }
}

/// Central preview: rasterizes the active frame through the same
/// renderer the exporter uses, uploads it as a texture and draws it.
pub fn preview_panel(
    ui: &mut egui::Ui,
    session: &EditorSession,
    fonts: &FontLibrary,
    cache: &mut PreviewCache,
) {
    let key = (session.active_frame_id(), session.revision());
    if cache.key != Some(key) {
        let renderer = FrameRenderer::new(fonts);
        match renderer.render(session.project(), session.active_frame(), PREVIEW_WIDTH) {
            Ok(surface) => {
                let size = [surface.width() as usize, surface.height() as usize];
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, surface.as_raw());
                let texture = ui.ctx().load_texture(
                    "frame-preview",
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                cache.note_success(key, texture);
            }
            Err(e) => {
                log::warn!("preview render failed: {e}");
                cache.note_failure(key, e.to_string());
            }
        }
    }

    if let Some(message) = cache.message() {
        ui.colored_label(
            egui::Color32::LIGHT_RED,
            format!("Preview unavailable: {message}"),
        );
        return;
    }

    if let Some(texture) = &cache.texture {
        let tex_size = texture.size_vec2();
        let available = ui.available_size();
        let fit = (available.x / tex_size.x)
            .min(available.y / tex_size.y)
            .min(2.0)
            .max(0.05);
        ui.centered_and_justified(|ui| {
            ui.add(egui::Image::new((texture.id(), tex_size * fit)));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_survives_cache_hits() {
        let mut cache = PreviewCache::default();
        let key = (Uuid::new_v4(), 3);
        cache.note_failure(key, "no font".to_owned());

        // Later frames hit the cached key without re-rendering and must
        // still find the message to show.
        assert_eq!(cache.key, Some(key));
        assert_eq!(cache.message(), Some("no font"));

        cache.invalidate();
        assert_eq!(cache.message(), None);
    }
}
