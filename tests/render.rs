use approx::assert_relative_eq;
use sdf_tracer::config::{Preset, RenderConfig};
use sdf_tracer::math::{v, V3};
use sdf_tracer::render::{Camera, Framebuffer, RenderSettings, Renderer, BACKGROUND};
use sdf_tracer::sdf::{sd_sphere, Sphere};
use sdf_tracer::shading::Light;
use std::f64::consts::PI;

fn lights() -> Vec<Light> {
    RenderConfig::preset(Preset::Reference).lights
}

fn settings(samples: u32, seed: u64) -> RenderSettings {
    RenderSettings {
        samples,
        seed,
        ..RenderSettings::default()
    }
}

#[test]
fn sphere_covers_the_center_of_a_tiny_image() {
    let scene = Sphere::at_origin(2.);
    let lights = lights();
    let renderer = Renderer::new(&scene, &lights).with_camera(Camera {
        position: v(0., 0., -5.),
        fov: PI / 3.,
    });

    // each pixel center of a 2x2 image looks at the sphere
    for (x, y) in [(0., 0.), (1., 0.), (0., 1.), (1., 1.)] {
        assert_ne!(renderer.trace_pixel(2, 2, x, y), BACKGROUND);
    }

    let fb = renderer.render(2, 2).unwrap();
    assert_eq!(fb.pixels.len(), 4);
    assert!(fb.pixels.iter().any(|p| *p != BACKGROUND));
}

#[test]
fn camera_facing_away_sees_background() {
    let scene = Sphere::at_origin(2.);
    let lights = lights();
    let fb = Renderer::new(&scene, &lights)
        .with_camera(Camera {
            position: v(0., 0., 10.),
            ..Camera::default()
        })
        .render(2, 2)
        .unwrap();
    for p in &fb.pixels {
        assert_relative_eq!(p.x, 0.34, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.6, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.8, epsilon = 1e-12);
    }
}

#[test]
fn same_seed_same_image() {
    let config = RenderConfig {
        width: 24,
        height: 16,
        settings: settings(4, 1234),
        ..RenderConfig::default()
    };
    let a = config.render().unwrap();
    let b = config.render().unwrap();
    assert_eq!(a, b);
}

#[test]
fn different_seed_different_image() {
    let base = RenderConfig {
        width: 24,
        height: 16,
        settings: settings(2, 1),
        ..RenderConfig::default()
    };
    let other = RenderConfig {
        settings: settings(2, 2),
        ..base.clone()
    };
    assert_ne!(base.render().unwrap(), other.render().unwrap());
}

#[test]
fn thread_count_does_not_change_the_image() {
    let config = RenderConfig {
        width: 20,
        height: 12,
        settings: settings(3, 99),
        ..RenderConfig::default()
    };
    let parallel = config.render().unwrap();
    let serial = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| config.render().unwrap());
    assert_eq!(parallel, serial);
}

#[test]
fn render_into_fills_existing_buffer() {
    let scene = |p: &V3| sd_sphere(p, 2.);
    let lights = lights();
    let renderer = Renderer::new(&scene, &lights).with_settings(settings(1, 5));
    let mut fb = Framebuffer::new(8, 6).unwrap();
    renderer.render_into(&mut fb).unwrap();
    assert_eq!(fb, renderer.render(8, 6).unwrap());
    // corners look past the sphere
    assert_eq!(fb.get(0, 0), BACKGROUND);
    assert_eq!(fb.get(7, 5), BACKGROUND);
}

#[test]
fn showcase_and_scene_file_render() {
    let showcase = RenderConfig {
        width: 16,
        height: 9,
        settings: settings(1, 0),
        ..RenderConfig::preset(Preset::Showcase)
    };
    let fb = showcase.render().unwrap();
    // the ground fills the bottom row
    assert!((0..16).all(|x| fb.get(x, 8) != BACKGROUND));

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/rings.json");
    let mut rings = RenderConfig::from_file(path).unwrap();
    rings.width = 16;
    rings.height = 9;
    let fb = rings.render().unwrap();
    assert_eq!(fb.pixels.len(), 16 * 9);
}
