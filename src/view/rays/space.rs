//! Space-centric sunray diagram: vertical rays, rotated ground.
//!
//! The ground is turned by `90 - angle` degrees so the rays meet it at the
//! same incidence angle as in the ground-centric diagram.

use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::canvas;
use super::ground::RAYS_PER_WIDTH;
use super::DiagramParams;

const SPACE: Rgba<u8> = Rgba([0x0b, 0x0d, 0x1c, 255]);
const MARKER: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 255]);

/// Ground tangent and outward (downward) normal for an incidence angle.
pub fn ground_frame(angle_degrees: f32) -> (Vec2, Vec2) {
    let phi = (90.0 - angle_degrees).to_radians();
    let tangent = Vec2::new(phi.cos(), phi.sin());
    let normal = Vec2::new(-phi.sin(), phi.cos());
    (tangent, normal)
}

pub fn draw(image: &mut RgbaImage, params: &DiagramParams) {
    let (w, h) = (image.width() as f32, image.height() as f32);
    let center = Vec2::new(w * 0.5, h * 0.6);
    let (tangent, normal) = ground_frame(params.angle_degrees);
    let extent = w + h;

    canvas::fill(image, SPACE);
    let ground = [
        center - tangent * extent,
        center + tangent * extent,
        center + tangent * extent + normal * extent,
        center - tangent * extent + normal * extent,
    ];
    canvas::fill_polygon(image, &ground, canvas::rgba(params.ground_color));

    if params.is_polar_night() {
        canvas::darken(image, 0.6);
        return;
    }
    // cos(phi) == sin(angle); near zero the ground is vertical
    if tangent.x < 1e-3 {
        return;
    }

    let spacing = w / RAYS_PER_WIDTH;
    let slope = tangent.y / tangent.x;
    let line_width = (w / 200.0).max(1.5);
    let ray_color = canvas::rgba(params.sunray_color);
    let count = (w / spacing / 2.0).ceil() as i32 + 1;
    for k in -count..=count {
        let x = center.x + k as f32 * spacing;
        let end_y = center.y + (x - center.x) * slope;
        if end_y <= 0.0 {
            continue;
        }
        canvas::draw_line(image, Vec2::new(x, 0.0), Vec2::new(x, end_y), line_width, ray_color);
    }

    if params.dist_marker {
        let along = spacing / tangent.x;
        let offset = -normal * line_width * 6.0;
        canvas::draw_double_arrow(image, center + offset, center + tangent * along + offset, line_width, MARKER);
    }
}
