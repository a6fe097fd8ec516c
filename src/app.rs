use std::path::{Path, PathBuf};

use crate::editor::EditorSession;
use crate::export;
use crate::model::Project;
use crate::panels::{frames_panel, preview_panel, properties_panel, PreviewCache, PropertiesState};
use crate::persistence::{self, LocalStore, ProjectStore, SaveCoordinator};
use crate::render::{FontLibrary, FrameRenderer};

/// Where the app reads and writes outside the process.
pub struct StudioConfig {
    /// Root of the [`LocalStore`] project files.
    pub data_dir: PathBuf,
    /// Directory scanned for `.ttf`/`.otf` files at startup.
    pub fonts_dir: PathBuf,
    /// Directory export archives are written to.
    pub export_dir: PathBuf,
    /// Owner id used to scope stored projects.
    pub owner: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            fonts_dir: PathBuf::from("assets/fonts"),
            export_dir: PathBuf::from("exports"),
            owner: "local".to_owned(),
        }
    }
}

impl StudioConfig {
    /// Reads overrides from `CAROUSEL_DATA_DIR` / `CAROUSEL_FONTS_DIR`
    /// / `CAROUSEL_EXPORT_DIR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("CAROUSEL_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("CAROUSEL_FONTS_DIR") {
            config.fonts_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("CAROUSEL_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }
        config
    }
}

/// The desktop editor application.
pub struct StudioApp {
    session: EditorSession,
    fonts: FontLibrary,
    store: LocalStore,
    save_coordinator: SaveCoordinator,
    config: StudioConfig,
    preview: PreviewCache,
    properties: PropertiesState,
    toasts: Vec<String>,
}

impl StudioApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: StudioConfig) -> Self {
        let mut fonts = FontLibrary::new();
        load_fonts_from_dir(&mut fonts, &config.fonts_dir);
        if fonts.is_empty() {
            log::warn!(
                "no fonts found under {}; frames with text will not render",
                config.fonts_dir.display()
            );
        }

        let store = LocalStore::new(&config.data_dir);
        let project = Project::new("Untitled carousel");

        Self {
            session: EditorSession::new(project),
            fonts,
            store,
            save_coordinator: SaveCoordinator::new(),
            config,
            preview: PreviewCache::default(),
            properties: PropertiesState::default(),
            toasts: Vec::new(),
        }
    }

    fn toast(&mut self, message: String) {
        self.toasts.push(message);
    }

    /// Saves through the coordinator so a re-entrant request while a
    /// save is running coalesces instead of racing it.
    fn save_now(&mut self) {
        let project = self.session.project();
        let blob = match persistence::serialize_project(project) {
            Ok(blob) => blob,
            Err(e) => {
                self.toast(format!("Save failed: {e}"));
                return;
            }
        };
        let key = project.name.clone();
        let mut next = self.save_coordinator.begin(blob);
        while let Some(blob) = next {
            match self.store.save(&self.config.owner, &key, &blob) {
                Ok(()) => {
                    self.session.mark_saved(crate::util::time::timestamp_secs());
                    self.toast("Project saved".to_owned());
                }
                Err(e) => self.toast(format!("Save failed: {e}")),
            }
            next = self.save_coordinator.finish();
        }
    }

    fn load_now(&mut self) {
        let key = self.session.project().name.clone();
        match persistence::load_project(&self.store, &self.config.owner, &key) {
            Ok(Some(project)) => {
                self.session = EditorSession::new(project);
                self.preview.invalidate();
                self.toast("Project loaded".to_owned());
            }
            Ok(None) => self.toast(format!("No saved project named {key:?}")),
            // A malformed blob must not take the editor down; the
            // current in-memory project stays as it was.
            Err(e) => self.toast(format!("{e}")),
        }
    }

    fn export_now(&mut self) {
        let project = self.session.project();
        if let Err(e) = std::fs::create_dir_all(&self.config.export_dir) {
            self.toast(format!("Export failed: {e}"));
            return;
        }
        let path = self
            .config
            .export_dir
            .join(format!("{}.zip", project.name.replace(['/', '\\'], "_")));
        let renderer = FrameRenderer::new(&self.fonts);
        match export::export_to_file(project, &renderer, &path) {
            Ok(()) => self.toast(format!("Exported to {}", path.display())),
            Err(e) => self.toast(format!("Export failed: {e}")),
        }
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut name = self.session.project().name.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut name).desired_width(220.0))
                .changed()
            {
                self.session.update_project(crate::model::ProjectPatch {
                    name: Some(name),
                    ..Default::default()
                });
            }
            ui.separator();
            if ui.button("💾 Save").clicked() {
                self.save_now();
            }
            if ui.button("📂 Load").clicked() {
                self.load_now();
            }
            if ui.button("⬇ Export").clicked() {
                self.export_now();
            }
        });
    }

    fn show_toasts(&mut self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }
        let mut dismiss = None;
        egui::Window::new("Notices")
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .show(ctx, |ui| {
                for (index, message) in self.toasts.iter().enumerate() {
                    ui.horizontal(|ui| {
                        ui.label(message);
                        if ui.small_button("✕").clicked() {
                            dismiss = Some(index);
                        }
                    });
                }
            });
        if let Some(index) = dismiss {
            self.toasts.remove(index);
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.top_bar(ui);
        });

        let mut notice = None;
        egui::SidePanel::left("frames_panel")
            .default_width(180.0)
            .show(ctx, |ui| {
                notice = frames_panel(ui, &mut self.session);
            });
        if let Some(n) = notice {
            self.toast(n.to_string());
        }

        let families = self.fonts.families();
        egui::SidePanel::right("properties_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    properties_panel(ui, &mut self.session, &families, &mut self.properties);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            preview_panel(ui, &self.session, &self.fonts, &mut self.preview);
        });

        self.show_toasts(ctx);
    }
}

/// Registers every `.ttf`/`.otf` under `dir`. The family name is the
/// file stem; a `-bold` / `-italic` / `-bolditalic` suffix selects the
/// style slot (e.g. `Inter-Bold.ttf` registers the bold face of
/// "Inter").
fn load_fonts_from_dir(fonts: &mut FontLibrary, dir: &Path) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let is_font = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"));
        if !is_font {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let (family, bold, italic) = parse_font_stem(stem);
        match std::fs::read(&path) {
            Ok(bytes) => {
                if let Err(e) = fonts.register(&family, bold, italic, &bytes) {
                    log::warn!("skipping font {}: {e}", path.display());
                } else {
                    log::info!(
                        "registered font {family:?} (bold={bold}, italic={italic}) from {}",
                        path.display()
                    );
                }
            }
            Err(e) => log::warn!("skipping font {}: {e}", path.display()),
        }
    }
}

fn parse_font_stem(stem: &str) -> (String, bool, bool) {
    match stem.rsplit_once('-') {
        Some((family, suffix)) => {
            let suffix = suffix.to_ascii_lowercase();
            let bold = suffix.contains("bold");
            let italic = suffix.contains("italic");
            if bold || italic {
                (family.to_owned(), bold, italic)
            } else {
                (stem.to_owned(), false, false)
            }
        }
        None => (stem.to_owned(), false, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_stem_parsing() {
        assert_eq!(parse_font_stem("Inter"), ("Inter".to_owned(), false, false));
        assert_eq!(parse_font_stem("Inter-Bold"), ("Inter".to_owned(), true, false));
        assert_eq!(
            parse_font_stem("Inter-BoldItalic"),
            ("Inter".to_owned(), true, true)
        );
        // A hyphenated family without a style suffix stays whole.
        assert_eq!(
            parse_font_stem("PT-Serif"),
            ("PT-Serif".to_owned(), false, false)
        );
    }
}
