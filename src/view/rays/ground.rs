//! Ground-centric sunray diagram: flat ground, angled rays.

use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::canvas;
use super::DiagramParams;

const SKY: Rgba<u8> = Rgba([0x9c, 0xc9, 0xf0, 255]);
const MARKER: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 255]);

/// Fraction of the height where the ground begins.
pub const GROUND_LEVEL: f32 = 0.75;

/// Rays per image width, measured perpendicular to the rays.
pub const RAYS_PER_WIDTH: f32 = 8.0;

/// Where ray `k` meets the ground, for a ray angle with positive sine.
pub fn ground_hit_x(width: f32, angle_degrees: f32, k: i32) -> f32 {
    let spacing = width / RAYS_PER_WIDTH;
    width * 0.5 + k as f32 * spacing / angle_degrees.to_radians().sin()
}

pub fn draw(image: &mut RgbaImage, params: &DiagramParams) {
    let (w, h) = (image.width() as f32, image.height() as f32);
    let ground_y = h * GROUND_LEVEL;

    canvas::fill(image, SKY);
    canvas::fill_rows(image, ground_y, h, canvas::rgba(params.ground_color));

    if params.is_polar_night() {
        canvas::darken(image, 0.6);
        return;
    }

    let a = params.angle_degrees.to_radians();
    if a.sin() < 1e-3 {
        // Grazing light never reaches the ground inside the frame
        return;
    }
    let dir = Vec2::new(a.cos(), a.sin());
    let ray_length = ground_y / a.sin();
    let ground_spacing = w / RAYS_PER_WIDTH / a.sin();
    let overhang = ray_length * a.cos().abs();
    let count = (((w + overhang) / ground_spacing).ceil() as i32 + 1).min(64);
    let line_width = (w / 200.0).max(1.5);
    let ray_color = canvas::rgba(params.sunray_color);

    for k in -count..=count {
        let hit = Vec2::new(ground_hit_x(w, params.angle_degrees, k), ground_y);
        canvas::draw_line(image, hit - dir * ray_length, hit, line_width, ray_color);
    }

    if params.dist_marker {
        let y = ground_y + line_width * 6.0;
        let from = Vec2::new(ground_hit_x(w, params.angle_degrees, 0), y);
        let to = Vec2::new(ground_hit_x(w, params.angle_degrees, 1), y);
        canvas::draw_double_arrow(image, from, to, line_width, MARKER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Color;

    fn params(angle: f32, marker: bool) -> DiagramParams {
        DiagramParams {
            angle_degrees: angle,
            sunray_color: Color::rgb(0xff, 0xff, 0x00),
            ground_color: Color::rgb(0x00, 0x80, 0x00),
            dist_marker: marker,
        }
    }

    #[test]
    fn test_ground_spacing_grows_as_sun_lowers() {
        let high = ground_hit_x(800.0, 90.0, 1) - ground_hit_x(800.0, 90.0, 0);
        let low = ground_hit_x(800.0, 30.0, 1) - ground_hit_x(800.0, 30.0, 0);
        assert!((high - 100.0).abs() < 1e-3);
        assert!((low - 200.0).abs() < 1e-2);
    }

    #[test]
    fn test_vertical_rays_hit_center() {
        let mut image = RgbaImage::new(160, 100);
        draw(&mut image, &params(90.0, false));
        assert_eq!(*image.get_pixel(80, 40), Rgba([0xff, 0xff, 0x00, 255]));
        assert_eq!(*image.get_pixel(90, 40), SKY);
        assert_eq!(*image.get_pixel(90, 90), Rgba([0x00, 0x80, 0x00, 255]));
    }

    #[test]
    fn test_polar_night_has_no_rays() {
        let mut image = RgbaImage::new(160, 100);
        draw(&mut image, &params(-5.0, true));
        let sky_dark = image.get_pixel(80, 40);
        assert!(sky_dark.0[2] < SKY.0[2]);
        assert!(image.pixels().all(|p| p.0[0] != 0xff || p.0[1] != 0xff));
    }

    #[test]
    fn test_marker_drawn_only_when_enabled() {
        let mut without = RgbaImage::new(160, 100);
        draw(&mut without, &params(90.0, false));
        let mut with = RgbaImage::new(160, 100);
        draw(&mut with, &params(90.0, true));
        assert!(without.pixels().all(|p| *p != MARKER));
        assert!(with.pixels().any(|p| *p == MARKER));
    }
}
