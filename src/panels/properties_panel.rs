use egui::color_picker::{color_edit_button_srgba, Alpha};

use crate::editor::EditorSession;
use crate::model::{
    Dimensions, FrameElement, FramePatch, HexColor, ProjectPatch, SignaturePosition, TextAlign,
    VerticalAlign,
};

/// Transient text inputs owned by the shell, not the project.
#[derive(Default)]
pub struct PropertiesState {
    new_image_src: String,
}

/// Properties sidebar: active frame typography and overrides on top,
/// project-wide settings below. All edits flow through the session's
/// patch operations. `font_families` lists the registered typefaces.
pub fn properties_panel(
    ui: &mut egui::Ui,
    session: &mut EditorSession,
    font_families: &[String],
    state: &mut PropertiesState,
) {
    frame_section(ui, session, font_families, state);
    ui.separator();
    project_section(ui, session, font_families);
}

fn frame_section(
    ui: &mut egui::Ui,
    session: &mut EditorSession,
    font_families: &[String],
    state: &mut PropertiesState,
) {
    ui.heading("Frame");

    let frame = session.active_frame().clone();
    let id = frame.id;
    let mut patch = FramePatch::default();

    let mut text = frame.text.clone();
    if ui.text_edit_multiline(&mut text).changed() {
        patch.text = Some(text);
    }

    ui.horizontal(|ui| {
        ui.label("Size");
        let mut font_size = frame.font_size;
        if ui
            .add(egui::Slider::new(&mut font_size, 8..=200).suffix("px"))
            .changed()
        {
            patch.font_size = Some(font_size.max(1));
        }
    });

    ui.horizontal(|ui| {
        ui.label("Line height");
        let mut line_height = frame.line_height;
        if ui
            .add(egui::Slider::new(&mut line_height, 0.8..=3.0))
            .changed()
        {
            patch.line_height = Some(line_height);
        }
        ui.label("Tracking");
        let mut letter_spacing = frame.letter_spacing;
        if ui
            .add(egui::Slider::new(&mut letter_spacing, -5.0..=20.0))
            .changed()
        {
            patch.letter_spacing = Some(letter_spacing);
        }
    });

    ui.horizontal(|ui| {
        let mut bold = frame.is_bold;
        if ui.toggle_value(&mut bold, "B").changed() {
            patch.is_bold = Some(bold);
        }
        let mut italic = frame.is_italic;
        if ui.toggle_value(&mut italic, "I").changed() {
            patch.is_italic = Some(italic);
        }
        let mut underline = frame.is_underline;
        if ui.toggle_value(&mut underline, "U").changed() {
            patch.is_underline = Some(underline);
        }
    });

    ui.horizontal(|ui| {
        for (align, label) in [
            (TextAlign::Left, "⬅"),
            (TextAlign::Center, "⬌"),
            (TextAlign::Right, "➡"),
        ] {
            if ui
                .selectable_label(frame.text_align == align, label)
                .clicked()
            {
                patch.text_align = Some(align);
            }
        }
        ui.separator();
        for (valign, label) in [
            (VerticalAlign::Top, "⬆"),
            (VerticalAlign::Center, "⬍"),
            (VerticalAlign::Bottom, "⬇"),
        ] {
            if ui
                .selectable_label(frame.vertical_align == valign, label)
                .clicked()
            {
                patch.vertical_align = Some(valign);
            }
        }
    });

    egui::ComboBox::from_label("Font")
        .selected_text(frame.font_family.as_deref().unwrap_or("(project font)"))
        .show_ui(ui, |ui| {
            if ui
                .selectable_label(frame.font_family.is_none(), "(project font)")
                .clicked()
            {
                patch.font_family = Some(None);
            }
            for family in font_families {
                if ui
                    .selectable_label(frame.font_family.as_deref() == Some(family), family)
                    .clicked()
                {
                    patch.font_family = Some(Some(family.clone()));
                }
            }
        });

    override_color_row(ui, "Background", &frame.background_color, &mut patch.background_color);
    override_color_row(ui, "Text color", &frame.text_color, &mut patch.text_color);

    ui.horizontal(|ui| {
        ui.label("Bg image");
        let mut src = frame.background_image.clone().unwrap_or_default();
        if ui
            .add(egui::TextEdit::singleline(&mut src).hint_text("image path"))
            .changed()
        {
            patch.background_image = Some(if src.is_empty() { None } else { Some(src) });
        }
    });

    if patch_has_changes(&patch) {
        // FrameNotFound cannot happen for the active frame id
        let _ = session.update_frame(id, patch);
    }

    elements_section(ui, session, &frame.elements, state);
}

/// Element list for the active frame: remove per row, add a circle or
/// an image sourced from the path field.
fn elements_section(
    ui: &mut egui::Ui,
    session: &mut EditorSession,
    elements: &[FrameElement],
    state: &mut PropertiesState,
) {
    let frame_id = session.active_frame_id();
    ui.separator();
    ui.label("Elements");

    let mut removed = None;
    for element in elements {
        ui.horizontal(|ui| {
            match element {
                FrameElement::Image { src, .. } => ui.label(format!("Image ({src})")),
                FrameElement::Shape { .. } => ui.label("Circle"),
            };
            if ui.small_button("✕").clicked() {
                removed = Some(element.id());
            }
        });
    }
    if let Some(element_id) = removed {
        // ElementNotFound cannot happen for ids read this frame
        let _ = session.remove_element(frame_id, element_id);
    }

    ui.horizontal(|ui| {
        if ui.button("➕ Circle").clicked() {
            let _ = session.add_element(
                frame_id,
                FrameElement::circle(390.0, 390.0, 300.0, 300.0, HexColor::black()),
            );
        }
        let add_image = ui.button("➕ Image").clicked();
        ui.add(
            egui::TextEdit::singleline(&mut state.new_image_src)
                .desired_width(120.0)
                .hint_text("image path"),
        );
        if add_image && !state.new_image_src.trim().is_empty() {
            let src = std::mem::take(&mut state.new_image_src);
            let _ = session.add_element(
                frame_id,
                FrameElement::image(390.0, 390.0, 300.0, 300.0, src),
            );
        }
    });
}

/// One row of the frame section: a checkbox toggling the override plus
/// a color button when the override is set.
fn override_color_row(
    ui: &mut egui::Ui,
    label: &str,
    current: &Option<HexColor>,
    out: &mut Option<Option<HexColor>>,
) {
    ui.horizontal(|ui| {
        let mut overridden = current.is_some();
        if ui.checkbox(&mut overridden, label).changed() {
            *out = Some(if overridden {
                Some(current.clone().unwrap_or_else(HexColor::black))
            } else {
                None
            });
        }
        if let Some(color) = current {
            let mut color32 = color.to_color32();
            if color_edit_button_srgba(ui, &mut color32, Alpha::Opaque).changed() {
                *out = Some(Some(HexColor::from_color32(color32)));
            }
        }
    });
}

fn patch_has_changes(patch: &FramePatch) -> bool {
    patch.text.is_some()
        || patch.font_size.is_some()
        || patch.text_align.is_some()
        || patch.vertical_align.is_some()
        || patch.is_bold.is_some()
        || patch.is_italic.is_some()
        || patch.is_underline.is_some()
        || patch.line_height.is_some()
        || patch.letter_spacing.is_some()
        || patch.font_family.is_some()
        || patch.background_color.is_some()
        || patch.text_color.is_some()
        || patch.background_image.is_some()
}

fn project_section(ui: &mut egui::Ui, session: &mut EditorSession, font_families: &[String]) {
    ui.heading("Project");

    let project = session.project();
    let mut patch = ProjectPatch::default();

    egui::ComboBox::from_label("Default font")
        .selected_text(project.font_family.as_str())
        .show_ui(ui, |ui| {
            for family in font_families {
                if ui
                    .selectable_label(project.font_family == *family, family)
                    .clicked()
                {
                    patch.font_family = Some(family.clone());
                }
            }
        });

    let mut dimensions = project.dimensions;
    egui::ComboBox::from_label("Dimensions")
        .selected_text(dimensions.as_str())
        .show_ui(ui, |ui| {
            for preset in Dimensions::ALL {
                if ui
                    .selectable_value(&mut dimensions, preset, preset.as_str())
                    .changed()
                {
                    patch.dimensions = Some(preset);
                }
            }
        });

    ui.horizontal(|ui| {
        ui.label("Background");
        let mut bg = project.background_color.to_color32();
        if color_edit_button_srgba(ui, &mut bg, Alpha::Opaque).changed() {
            patch.background_color = Some(HexColor::from_color32(bg));
        }
        ui.label("Text");
        let mut fg = project.text_color.to_color32();
        if color_edit_button_srgba(ui, &mut fg, Alpha::Opaque).changed() {
            patch.text_color = Some(HexColor::from_color32(fg));
        }
    });

    let mut margin_enabled = project.margin_enabled;
    if ui.checkbox(&mut margin_enabled, "Margins").changed() {
        patch.margin_enabled = Some(margin_enabled);
    }
    if project.margin_enabled {
        ui.horizontal(|ui| {
            let mut mh = project.margin_horizontal;
            if ui
                .add(egui::Slider::new(&mut mh, 0..=300).text("horizontal"))
                .changed()
            {
                patch.margin_horizontal = Some(mh);
            }
        });
        ui.horizontal(|ui| {
            let mut mv = project.margin_vertical;
            if ui
                .add(egui::Slider::new(&mut mv, 0..=300).text("vertical"))
                .changed()
            {
                patch.margin_vertical = Some(mv);
            }
        });
    }

    // An empty path clears the overlay; position/size controls only
    // make sense once an image is set.
    ui.horizontal(|ui| {
        ui.label("Signature");
        let mut src = project.signature_image.clone().unwrap_or_default();
        if ui
            .add(egui::TextEdit::singleline(&mut src).hint_text("image path"))
            .changed()
        {
            patch.signature_image = Some(if src.is_empty() { None } else { Some(src) });
        }
    });
    if project.signature_image.is_some() {
        let mut position = project.signature_position;
        egui::ComboBox::from_label("Position")
            .selected_text(position.label())
            .show_ui(ui, |ui| {
                for anchor in SignaturePosition::ALL {
                    if ui
                        .selectable_value(&mut position, anchor, anchor.label())
                        .changed()
                    {
                        patch.signature_position = Some(anchor);
                    }
                }
            });
        let mut size = project.signature_size;
        if ui
            .add(egui::Slider::new(&mut size, 32..=320).text("size"))
            .changed()
        {
            patch.signature_size = Some(size);
        }
    }

    if patch.name.is_some()
        || patch.dimensions.is_some()
        || patch.background_color.is_some()
        || patch.text_color.is_some()
        || patch.font_family.is_some()
        || patch.margin_enabled.is_some()
        || patch.margin_horizontal.is_some()
        || patch.margin_vertical.is_some()
        || patch.signature_image.is_some()
        || patch.signature_position.is_some()
        || patch.signature_size.is_some()
    {
        session.update_project(patch);
    }
}
