use carousel_studio::model::{
    Dimensions, FrameElement, HexColor, Project, SignaturePosition, CANONICAL_WIDTH,
};
use carousel_studio::render::{
    FontFace, FontLibrary, FrameRenderer, GlyphMetrics, MemoryImageSource, RenderError,
    TextMeasurer,
};
use image::{Rgba, RgbaImage};

fn color(s: &str) -> HexColor {
    s.parse().unwrap()
}

/// Synthetic face drawing every non-space glyph as a solid square, so
/// the text layer can be exercised without shipping a font file.
struct BlockFace;

impl TextMeasurer for BlockFace {
    fn advance(&self, _ch: char, px: f32) -> f32 {
        px / 2.0
    }

    fn line_metrics(&self, px: f32) -> (f32, f32) {
        (px * 0.75, px * 0.25)
    }
}

impl FontFace for BlockFace {
    fn rasterize(&self, ch: char, px: f32) -> (GlyphMetrics, Vec<u8>) {
        let advance = px / 2.0;
        if ch.is_whitespace() {
            return (
                GlyphMetrics {
                    width: 0,
                    height: 0,
                    xmin: 0,
                    ymin: 0,
                    advance_width: advance,
                },
                Vec::new(),
            );
        }
        let side = (px / 2.0).round().max(1.0) as usize;
        (
            GlyphMetrics {
                width: side,
                height: side,
                xmin: 0,
                ymin: 0,
                advance_width: advance,
            },
            vec![255; side * side],
        )
    }
}

/// A library whose default project family resolves to [`BlockFace`].
fn block_fonts() -> FontLibrary {
    let mut fonts = FontLibrary::new();
    fonts.register_face("Inter", false, false, Box::new(BlockFace));
    fonts
}

/// A project whose single frame draws nothing font-dependent, so the
/// pipeline can run without font files.
fn textless_project() -> Project {
    let mut project = Project::new("render");
    project.frames[0].text = String::new();
    project
}

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

fn assert_px(surface: &RgbaImage, x: u32, y: u32, expected: [u8; 4]) {
    let got = surface.get_pixel(x, y).0;
    for i in 0..4 {
        assert!(
            got[i].abs_diff(expected[i]) <= 2,
            "pixel ({x}, {y}) was {got:?}, expected ~{expected:?}"
        );
    }
}

#[test]
fn identical_inputs_produce_identical_pixels() {
    // P4: rendering is a pure function of its inputs.
    let mut project = textless_project();
    project.background_color = color("#336699");
    project.frames[0]
        .elements
        .push(FrameElement::circle(100.0, 100.0, 400.0, 400.0, color("#ff8800")));

    let fonts = FontLibrary::new();
    let renderer = FrameRenderer::new(&fonts);

    let first = renderer.render(&project, &project.frames[0], 540).unwrap();
    let second = renderer.render(&project, &project.frames[0], 540).unwrap();
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn target_size_follows_the_aspect_preset() {
    for (dimensions, expected_height) in [
        (Dimensions::Square, 1080),
        (Dimensions::Portrait, 1350),
        (Dimensions::Story, 1920),
    ] {
        assert_eq!(
            FrameRenderer::target_size(dimensions, CANONICAL_WIDTH),
            (1080, expected_height)
        );
    }
    // A 400-wide preview of a portrait project keeps the aspect ratio.
    assert_eq!(FrameRenderer::target_size(Dimensions::Portrait, 400), (400, 500));
}

#[test]
fn drawn_text_is_deterministic() {
    let mut project = Project::new("text");
    project.background_color = color("#ffffff");
    project.frames[0].text = "Hello world".to_owned();

    let fonts = block_fonts();
    let renderer = FrameRenderer::new(&fonts);
    let first = renderer.render(&project, &project.frames[0], 216).unwrap();
    let second = renderer.render(&project, &project.frames[0], 216).unwrap();
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn text_pixels_carry_the_resolved_color_inside_the_content_rect() {
    let mut project = Project::new("text");
    project.background_color = color("#ffffff");
    project.text_color = color("#000000");
    project.margin_enabled = true;
    project.margin_horizontal = 100;
    project.margin_vertical = 100;
    let frame = &mut project.frames[0];
    frame.text = "Hello world".to_owned();
    // The frame override, not the project global, must color the text.
    frame.text_color = Some(color("#ff0000"));

    let fonts = block_fonts();
    let renderer = FrameRenderer::new(&fonts);
    let surface = renderer.render(&project, &project.frames[0], 216).unwrap();

    // 100px canonical margins scale to 20px at a 216-wide render.
    let inset = 20;
    let mut drawn = 0u32;
    for (x, y, px) in surface.enumerate_pixels() {
        if px.0 == [255, 0, 0, 255] {
            drawn += 1;
            assert!(
                x >= inset && x < 216 - inset && y >= inset && y < 216 - inset,
                "text pixel ({x}, {y}) escaped the content rect"
            );
        } else {
            // Only the background and the text color appear on canvas.
            assert_eq!(px.0, [255, 255, 255, 255], "unexpected pixel at ({x}, {y})");
        }
    }
    assert!(drawn > 0, "no text pixels were drawn");
}

#[test]
fn background_color_fills_the_canvas() {
    let mut project = textless_project();
    project.background_color = color("#ff0000");

    let fonts = FontLibrary::new();
    let renderer = FrameRenderer::new(&fonts);
    let surface = renderer.render(&project, &project.frames[0], 108).unwrap();

    assert_eq!(surface.dimensions(), (108, 108));
    assert_px(&surface, 0, 0, [255, 0, 0, 255]);
    assert_px(&surface, 54, 54, [255, 0, 0, 255]);
    assert_px(&surface, 107, 107, [255, 0, 0, 255]);
}

#[test]
fn frame_background_override_beats_the_global() {
    let mut project = textless_project();
    project.background_color = color("#ff0000");
    project.frames[0].background_color = Some(color("#00ff00"));

    let fonts = FontLibrary::new();
    let renderer = FrameRenderer::new(&fonts);
    let surface = renderer.render(&project, &project.frames[0], 54).unwrap();
    assert_px(&surface, 27, 27, [0, 255, 0, 255]);
}

#[test]
fn background_image_covers_the_whole_canvas() {
    // A wide source on a square canvas must still fill every pixel
    // (cover-fit crops, it never letterboxes).
    let mut project = textless_project();
    project.background_color = color("#ffffff");
    project.frames[0].background_image = Some("bg".to_owned());

    let mut images = MemoryImageSource::new();
    images.insert("bg", solid(64, 16, [0, 0, 255, 255]));

    let fonts = FontLibrary::new();
    let renderer = FrameRenderer::with_image_source(&fonts, &images);
    let surface = renderer.render(&project, &project.frames[0], 108).unwrap();

    for (x, y) in [(0, 0), (107, 0), (0, 107), (107, 107), (54, 54)] {
        assert_px(&surface, x, y, [0, 0, 255, 255]);
    }
}

#[test]
fn elements_draw_in_array_order_above_the_background() {
    let mut project = textless_project();
    project.background_color = color("#000000");
    let frame = &mut project.frames[0];
    // Two overlapping circles: the later one must win where they overlap.
    frame
        .elements
        .push(FrameElement::circle(0.0, 0.0, 1080.0, 1080.0, color("#ff0000")));
    frame
        .elements
        .push(FrameElement::circle(270.0, 270.0, 540.0, 540.0, color("#00ff00")));

    let fonts = FontLibrary::new();
    let renderer = FrameRenderer::new(&fonts);
    let surface = renderer.render(&project, &project.frames[0], 108).unwrap();

    // Canvas corner: outside both circles, background shows.
    assert_px(&surface, 1, 1, [0, 0, 0, 255]);
    // Inside the big circle only.
    assert_px(&surface, 54, 8, [255, 0, 0, 255]);
    // Overlap region: the second circle is on top.
    assert_px(&surface, 54, 54, [0, 255, 0, 255]);
}

#[test]
fn signature_draws_topmost_at_its_anchor() {
    let mut project = textless_project();
    project.background_color = color("#000000");
    project.signature_image = Some("sig".to_owned());
    project.signature_position = SignaturePosition::BottomRight;
    project.signature_size = 100;
    // A full-canvas circle underneath proves the signature is on top.
    project.frames[0]
        .elements
        .push(FrameElement::circle(0.0, 0.0, 1080.0, 1080.0, color("#0000ff")));

    let mut images = MemoryImageSource::new();
    images.insert("sig", solid(50, 50, [255, 255, 0, 255]));

    let fonts = FontLibrary::new();
    let renderer = FrameRenderer::with_image_source(&fonts, &images);
    let surface = renderer
        .render(&project, &project.frames[0], CANONICAL_WIDTH)
        .unwrap();

    // Center of the signature box: (1080 - 100) + 50.
    assert_px(&surface, 1030, 1030, [255, 255, 0, 255]);
    // Away from the signature box the circle shows through.
    assert_px(&surface, 540, 900, [0, 0, 255, 255]);
}

#[test]
fn signature_respects_margin_insets_and_preview_scale() {
    let mut project = textless_project();
    project.background_color = color("#000000");
    project.margin_enabled = true;
    project.margin_horizontal = 100;
    project.margin_vertical = 50;
    project.signature_image = Some("sig".to_owned());
    project.signature_position = SignaturePosition::TopLeft;
    project.signature_size = 100;

    let mut images = MemoryImageSource::new();
    images.insert("sig", solid(10, 10, [255, 255, 0, 255]));

    let fonts = FontLibrary::new();
    let renderer = FrameRenderer::with_image_source(&fonts, &images);

    // Full resolution: box spans x 100..200, y 50..150.
    let full = renderer
        .render(&project, &project.frames[0], CANONICAL_WIDTH)
        .unwrap();
    assert_px(&full, 150, 100, [255, 255, 0, 255]);
    assert_px(&full, 50, 100, [0, 0, 0, 255]);

    // Half-size preview scales the insets with everything else.
    let half = renderer.render(&project, &project.frames[0], 540).unwrap();
    assert_px(&half, 75, 50, [255, 255, 0, 255]);
    assert_px(&half, 25, 50, [0, 0, 0, 255]);
}

#[test]
fn missing_image_is_a_render_error() {
    let mut project = textless_project();
    project.frames[0].background_image = Some("nowhere".to_owned());

    let images = MemoryImageSource::new();
    let fonts = FontLibrary::new();
    let renderer = FrameRenderer::with_image_source(&fonts, &images);

    assert!(matches!(
        renderer.render(&project, &project.frames[0], 108),
        Err(RenderError::ImageUnreadable { .. })
    ));
}

#[test]
fn text_without_a_registered_font_is_a_render_error() {
    let mut project = Project::new("needs-font");
    project.frames[0].text = "Hello".to_owned();

    let fonts = FontLibrary::new();
    let renderer = FrameRenderer::new(&fonts);
    assert!(matches!(
        renderer.render(&project, &project.frames[0], 108),
        Err(RenderError::FontUnavailable { .. })
    ));
}

#[test]
fn zero_width_target_is_rejected() {
    let project = textless_project();
    let fonts = FontLibrary::new();
    let renderer = FrameRenderer::new(&fonts);
    assert!(matches!(
        renderer.render(&project, &project.frames[0], 0),
        Err(RenderError::InvalidTargetWidth)
    ));
}
