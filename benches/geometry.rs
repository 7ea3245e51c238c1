use criterion::{criterion_group, criterion_main, Criterion, black_box};

use glam::Vec3;
use image::RgbaImage;

use seasons::astro::{
    ground_color_ramp, lat_long_from_direction, orbital_position, sunray_angle_degrees, surface_direction,
};
use seasons::math::Ray;
use seasons::state::SimulationState;
use seasons::view::orbit::day_from_orbit_ray;
use seasons::view::rays::{ground, space, DiagramParams};

fn bench_orbital_position(c: &mut Criterion) {
    c.bench_function("orbital_position_year", |b| {
        b.iter(|| {
            let mut acc = Vec3::ZERO;
            for day in 0..365 {
                acc += orbital_position(black_box(day as f32));
            }
            acc
        });
    });
}

fn bench_sunray_angle(c: &mut Criterion) {
    c.bench_function("sunray_angle_grid", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for day in (0..365).step_by(5) {
                for lat in (-90..=90).step_by(10) {
                    sum += sunray_angle_degrees(black_box(day as f32), 23.44, lat as f32);
                }
            }
            sum
        });
    });
}

fn bench_lat_long_round_trip(c: &mut Criterion) {
    let tilt = 23.44_f32.to_radians();
    c.bench_function("lat_long_from_direction", |b| {
        let mut rotation = 0.0_f32;
        b.iter(|| {
            rotation += 0.01;
            let dir = surface_direction(40.11, -88.2, tilt, rotation);
            lat_long_from_direction(black_box(dir), tilt, rotation)
        });
    });
}

fn bench_picking(c: &mut Criterion) {
    let planet = orbital_position(80.0);
    let eye = planet + Vec3::new(0.0, 10.0, 30.0);
    let ray = Ray::new(eye, (planet - eye).normalize());

    c.bench_function("ray_sphere_pick", |b| {
        b.iter(|| black_box(&ray).intersect_sphere(planet, 5.0));
    });

    let from_above = Ray::new(Vec3::new(0.0, 400.0, 0.0), (planet - Vec3::new(0.0, 400.0, 0.0)).normalize());
    c.bench_function("orbit_drag_day", |b| {
        b.iter(|| day_from_orbit_ray(black_box(&from_above)));
    });
}

fn bench_ground_ramp(c: &mut Criterion) {
    let ramp = ground_color_ramp();
    c.bench_function("ground_color_ramp_sample", |b| {
        let mut day = 0.0_f32;
        b.iter(|| {
            day = (day + 1.3) % 365.0;
            ramp.sample(black_box(day))
        });
    });
}

fn bench_diagrams(c: &mut Criterion) {
    let params = DiagramParams::from_state(&SimulationState::default());
    let mut image = RgbaImage::new(400, 300);

    c.bench_function("ground_diagram_400x300", |b| {
        b.iter(|| ground::draw(&mut image, black_box(&params)));
    });
    c.bench_function("space_diagram_400x300", |b| {
        b.iter(|| space::draw(&mut image, black_box(&params)));
    });
}

criterion_group!(
    benches,
    bench_orbital_position,
    bench_sunray_angle,
    bench_lat_long_round_trip,
    bench_picking,
    bench_ground_ramp,
    bench_diagrams,
);
criterion_main!(benches);
