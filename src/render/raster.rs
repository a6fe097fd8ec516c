//! Pixel-level drawing primitives shared by the frame renderer.
//!
//! Everything here blends in plain sRGB space with the standard `over`
//! operator and is purely deterministic.

use image::{imageops, Rgba, RgbaImage};

/// Integer clip rectangle, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl ClipRect {
    pub fn full(canvas: &RgbaImage) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: canvas.width(),
            y1: canvas.height(),
        }
    }

    /// Shrinks by the given insets, collapsing to an empty rect rather
    /// than inverting.
    pub fn inset(self, dx: u32, dy: u32) -> Self {
        let x0 = (self.x0 + dx).min(self.x1);
        let y0 = (self.y0 + dy).min(self.y1);
        let x1 = self.x1.saturating_sub(dx).max(x0);
        let y1 = self.y1.saturating_sub(dy).max(y0);
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Standard `over` blend of an sRGB color onto one pixel.
pub fn blend_pixel(dst: &mut Rgba<u8>, src: [u8; 4]) {
    let sa = src[3] as u32;
    if sa == 0 {
        return;
    }
    if sa == 255 {
        *dst = Rgba(src);
        return;
    }
    let inv = 255 - sa;
    for i in 0..3 {
        dst.0[i] = ((src[i] as u32 * sa + dst.0[i] as u32 * inv + 127) / 255) as u8;
    }
    dst.0[3] = (sa + dst.0[3] as u32 * inv / 255).min(255) as u8;
}

/// Fills the whole canvas with an opaque color.
pub fn fill(canvas: &mut RgbaImage, color: [u8; 4]) {
    for px in canvas.pixels_mut() {
        *px = Rgba(color);
    }
}

/// Fills an axis-aligned rect (f32 box, clipped to the canvas and clip
/// rect) with the given color.
pub fn fill_rect(canvas: &mut RgbaImage, clip: ClipRect, x: f32, y: f32, w: f32, h: f32, color: [u8; 4]) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let x0 = (x.floor().max(0.0) as u32).max(clip.x0);
    let y0 = (y.floor().max(0.0) as u32).max(clip.y0);
    let x1 = ((x + w).ceil().max(0.0) as u32).min(clip.x1);
    let y1 = ((y + h).ceil().max(0.0) as u32).min(clip.y1);
    for py in y0..y1 {
        for px in x0..x1 {
            blend_pixel(canvas.get_pixel_mut(px, py), color);
        }
    }
}

/// Fills the circle inscribed in the box `(x, y, w, h)`, radius
/// `min(w, h) / 2` about the box center, with a one-pixel anti-aliased
/// edge.
pub fn fill_circle(canvas: &mut RgbaImage, clip: ClipRect, x: f32, y: f32, w: f32, h: f32, color: [u8; 4]) {
    let radius = (w.min(h)) / 2.0;
    if radius <= 0.0 {
        return;
    }
    let cx = x + w / 2.0;
    let cy = y + h / 2.0;
    let x0 = ((cx - radius).floor().max(0.0) as u32).max(clip.x0);
    let y0 = ((cy - radius).floor().max(0.0) as u32).max(clip.y0);
    let x1 = ((cx + radius).ceil().max(0.0) as u32).min(clip.x1);
    let y1 = ((cy + radius).ceil().max(0.0) as u32).min(clip.y1);
    for py in y0..y1 {
        for px in x0..x1 {
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            // Coverage ramps over the outermost pixel.
            let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let a = (color[3] as f32 * coverage + 0.5) as u8;
                blend_pixel(
                    canvas.get_pixel_mut(px, py),
                    [color[0], color[1], color[2], a],
                );
            }
        }
    }
}

/// Draws `src` into the box `(x, y, w, h)` with cover-fit semantics:
/// scaled to fill the box, center-cropping whatever overflows.
pub fn draw_cover_fit(
    canvas: &mut RgbaImage,
    clip: ClipRect,
    src: &RgbaImage,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
) {
    if w < 1.0 || h < 1.0 || src.width() == 0 || src.height() == 0 {
        return;
    }
    let dst_w = w.round().max(1.0) as u32;
    let dst_h = h.round().max(1.0) as u32;

    // Crop the source to the destination aspect ratio, centered.
    let src_aspect = src.width() as f32 / src.height() as f32;
    let dst_aspect = dst_w as f32 / dst_h as f32;
    let (crop_w, crop_h) = if src_aspect > dst_aspect {
        ((src.height() as f32 * dst_aspect).round() as u32, src.height())
    } else {
        (src.width(), (src.width() as f32 / dst_aspect).round() as u32)
    };
    let crop_w = crop_w.clamp(1, src.width());
    let crop_h = crop_h.clamp(1, src.height());
    let crop_x = (src.width() - crop_w) / 2;
    let crop_y = (src.height() - crop_h) / 2;

    let cropped = imageops::crop_imm(src, crop_x, crop_y, crop_w, crop_h).to_image();
    let scaled = imageops::resize(&cropped, dst_w, dst_h, imageops::FilterType::Triangle);

    let ox = x.round() as i64;
    let oy = y.round() as i64;
    for (sx, sy, pixel) in scaled.enumerate_pixels() {
        let px = ox + sx as i64;
        let py = oy + sy as i64;
        if px < 0 || py < 0 {
            continue;
        }
        let (px, py) = (px as u32, py as u32);
        if clip.contains(px, py) {
            blend_pixel(canvas.get_pixel_mut(px, py), pixel.0);
        }
    }
}

/// Composites a grayscale coverage mask (one glyph bitmap) in the given
/// color at `(x, y)`, clipped.
pub fn composite_mask(
    canvas: &mut RgbaImage,
    clip: ClipRect,
    mask: &[u8],
    mask_w: usize,
    mask_h: usize,
    x: i64,
    y: i64,
    color: [u8; 4],
) {
    for my in 0..mask_h {
        for mx in 0..mask_w {
            let coverage = mask[my * mask_w + mx];
            if coverage == 0 {
                continue;
            }
            let px = x + mx as i64;
            let py = y + my as i64;
            if px < 0 || py < 0 {
                continue;
            }
            let (px, py) = (px as u32, py as u32);
            if !clip.contains(px, py) {
                continue;
            }
            let a = (color[3] as u32 * coverage as u32 / 255) as u8;
            blend_pixel(
                canvas.get_pixel_mut(px, py),
                [color[0], color[1], color[2], a],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_blend_replaces() {
        let mut px = Rgba([10, 20, 30, 255]);
        blend_pixel(&mut px, [200, 100, 50, 255]);
        assert_eq!(px.0, [200, 100, 50, 255]);
    }

    #[test]
    fn transparent_blend_is_noop() {
        let mut px = Rgba([10, 20, 30, 255]);
        blend_pixel(&mut px, [200, 100, 50, 0]);
        assert_eq!(px.0, [10, 20, 30, 255]);
    }

    #[test]
    fn circle_stays_inside_box() {
        let mut canvas = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]));
        let clip = ClipRect::full(&canvas);
        fill_circle(&mut canvas, clip, 10.0, 10.0, 20.0, 20.0, [255, 0, 0, 255]);

        // Center painted, box corner untouched.
        assert_eq!(canvas.get_pixel(20, 20).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(10, 10).0, [0, 0, 0, 255]);
    }

    #[test]
    fn clip_rect_inset_collapses_instead_of_inverting() {
        let clip = ClipRect { x0: 0, y0: 0, x1: 10, y1: 10 };
        let collapsed = clip.inset(20, 20);
        assert_eq!(collapsed.width(), 0);
        assert_eq!(collapsed.height(), 0);
    }
}
