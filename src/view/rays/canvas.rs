//! Minimal raster drawing on `RgbaImage`.

use glam::Vec2;
use image::{Rgba, RgbaImage};

use crate::state::Color;

pub fn rgba(color: Color) -> Rgba<u8> {
    let [r, g, b] = color.0;
    Rgba([r, g, b, 255])
}

pub fn fill(image: &mut RgbaImage, color: Rgba<u8>) {
    for pixel in image.pixels_mut() {
        *pixel = color;
    }
}

/// Fill the pixel rows `y0..y1` (clamped to the image).
pub fn fill_rows(image: &mut RgbaImage, y0: f32, y1: f32, color: Rgba<u8>) {
    let h = image.height() as f32;
    let start = y0.clamp(0.0, h).round() as u32;
    let end = y1.clamp(0.0, h).round() as u32;
    for y in start..end {
        for x in 0..image.width() {
            image.put_pixel(x, y, color);
        }
    }
}

fn stamp(image: &mut RgbaImage, center: Vec2, radius: f32, color: Rgba<u8>) {
    let r = radius.max(0.5);
    let x0 = (center.x - r).floor().max(0.0) as i64;
    let y0 = (center.y - r).floor().max(0.0) as i64;
    let x1 = ((center.x + r).ceil() as i64).min(image.width() as i64 - 1);
    let y1 = ((center.y + r).ceil() as i64).min(image.height() as i64 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            if d.length_squared() <= r * r {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Line of `width` pixels. Parts outside the image are clipped.
pub fn draw_line(image: &mut RgbaImage, from: Vec2, to: Vec2, width: f32, color: Rgba<u8>) {
    let length = (to - from).length();
    let steps = (length * 2.0).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let p = from.lerp(to, i as f32 / steps as f32);
        stamp(image, p, width * 0.5, color);
    }
}

/// Fill a polygon using the even-odd rule, sampling pixel centres.
pub fn fill_polygon(image: &mut RgbaImage, points: &[Vec2], color: Rgba<u8>) {
    if points.len() < 3 {
        return;
    }
    let mut crossings = Vec::new();
    for y in 0..image.height() {
        let sy = y as f32 + 0.5;
        crossings.clear();
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if (a.y <= sy) != (b.y <= sy) {
                crossings.push(a.x + (sy - a.y) / (b.y - a.y) * (b.x - a.x));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for pair in crossings.chunks_exact(2) {
            let start = (pair[0] - 0.5).ceil().max(0.0) as u32;
            let end = ((pair[1] - 0.5).floor() as i64).min(image.width() as i64 - 1);
            if end < start as i64 {
                continue;
            }
            for x in start..=end as u32 {
                image.put_pixel(x, y, color);
            }
        }
    }
}

/// Blend every pixel toward black by `amount` in [0, 1].
pub fn darken(image: &mut RgbaImage, amount: f32) {
    let keep = 1.0 - amount.clamp(0.0, 1.0);
    for pixel in image.pixels_mut() {
        for c in &mut pixel.0[..3] {
            *c = (*c as f32 * keep).round() as u8;
        }
    }
}

/// Measurement marker: a line with arrow heads at both ends.
pub fn draw_double_arrow(image: &mut RgbaImage, from: Vec2, to: Vec2, width: f32, color: Rgba<u8>) {
    draw_line(image, from, to, width, color);
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let head = width * 4.0;
    let side = dir.perp() * head * 0.6;
    for (tip, back) in [(from, dir), (to, -dir)] {
        let base = tip + back * head;
        draw_line(image, tip, base + side, width, color);
        draw_line(image, tip, base - side, width, color);
    }
}
