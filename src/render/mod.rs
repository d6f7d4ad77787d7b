use crate::marcher::{sphere_trace, MarchParams};
use crate::math::{mul, normalize, v, Ray, O, V3};
use crate::shading::{shade, Light, ShadingParams};
use crate::{Error, Result, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::time::Instant;
use tracing::{debug, info};

pub const BACKGROUND: V3 = V3 {
    x: 0.34,
    y: 0.6,
    z: 0.8,
};
pub const NUM_SAMPLES: u32 = 16;

/// Pinhole camera looking down +z.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub position: V3,
    /// Vertical field of view in radians.
    pub fov: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            position: v(0., 0., -5.),
            fov: PI / 3.,
        }
    }
}

impl Camera {
    /// Primary ray through the image plane point `(x, y)`, measured in pixels
    /// from the top-left corner of a `width`x`height` image. Integer
    /// coordinates address the corner of a pixel, `+0.5` its center.
    pub fn ray(&self, width: usize, height: usize, x: f64, y: f64) -> Ray {
        let (w, h) = (width as f64, height as f64);
        let d = v(
            x + 0.5 - w / 2.,
            -(y + 0.5 - h / 2.),
            h / (2. * (self.fov / 2.).tan()),
        );
        Ray {
            x: self.position,
            d: normalize(&d),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Jittered samples per pixel.
    pub samples: u32,
    pub seed: u64,
    pub background: V3,
    pub march: MarchParams,
    pub shading: ShadingParams,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            samples: NUM_SAMPLES,
            seed: 0,
            background: BACKGROUND,
            march: MarchParams::default(),
            shading: ShadingParams::default(),
        }
    }
}

/// Row-major pixel colors, top-left first.
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<V3>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        Ok(Framebuffer {
            width,
            height,
            pixels: vec![O; len],
        })
    }

    pub fn get(&self, x: usize, y: usize) -> V3 {
        self.pixels[y * self.width + x]
    }
}

pub struct Renderer<'a, S: Scene + ?Sized> {
    pub scene: &'a S,
    pub lights: &'a [Light],
    pub camera: Camera,
    pub settings: RenderSettings,
}

impl<'a, S: Scene + ?Sized> Renderer<'a, S> {
    pub fn new(scene: &'a S, lights: &'a [Light]) -> Self {
        Renderer {
            scene,
            lights,
            camera: Camera::default(),
            settings: RenderSettings::default(),
        }
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Color seen through image plane point `(x, y)`: shaded surface on a
    /// hit, background otherwise.
    pub fn trace_pixel(&self, width: usize, height: usize, x: f64, y: f64) -> V3 {
        let ray = self.camera.ray(width, height, x, y);
        match sphere_trace(self.scene, &ray, &self.settings.march) {
            Some(hit) => shade(
                self.scene,
                self.lights,
                &hit.x,
                &self.settings.march,
                &self.settings.shading,
            ),
            None => self.settings.background,
        }
    }

    pub fn render(&self, width: usize, height: usize) -> Result<Framebuffer> {
        let mut framebuffer = Framebuffer::new(width, height)?;
        self.render_into(&mut framebuffer)?;
        Ok(framebuffer)
    }

    /// Fills `framebuffer` with the average of `samples` jittered rays per
    /// pixel. Rows are rendered in parallel. Every row draws its jitter from
    /// its own generator seeded from the settings seed and the row index, so
    /// the result does not depend on the number of threads.
    pub fn render_into(&self, framebuffer: &mut Framebuffer) -> Result<()> {
        let (width, height) = (framebuffer.width, framebuffer.height);
        let len = check_dimensions(width, height)?;
        if framebuffer.pixels.len() != len {
            return Err(Error::InvalidSettings(format!(
                "framebuffer holds {} pixels, expected {len}",
                framebuffer.pixels.len()
            )));
        }
        check_settings(&self.camera, &self.settings)?;

        let samples = self.settings.samples;
        let seed = self.settings.seed;
        let jitter = Uniform::new(-0.5, 0.5);
        info!(width, height, samples, seed, "rendering");
        debug!(camera = ?self.camera, lights = self.lights.len(), "render setup");
        let start = Instant::now();

        framebuffer
            .pixels
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                let mut rng = StdRng::seed_from_u64(row_seed(seed, y));
                for (x, pixel) in row.iter_mut().enumerate() {
                    let mut col = O;
                    for _ in 0..samples {
                        let px = x as f64 + jitter.sample(&mut rng);
                        let py = y as f64 + jitter.sample(&mut rng);
                        col += self.trace_pixel(width, height, px, py);
                    }
                    *pixel = mul(1. / samples as f64, &col);
                }
            });

        info!("render took {} s", start.elapsed().as_secs_f32());
        Ok(())
    }
}

/// Pixel count of a `width`x`height` image. Each side has to fit the `u32`
/// the image encoders use.
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<usize> {
    let too_big = |side: usize| u32::try_from(side).is_err();
    if width == 0 || height == 0 || too_big(width) || too_big(height) {
        return Err(Error::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(Error::InvalidDimensions { width, height })
}

pub(crate) fn check_settings(camera: &Camera, settings: &RenderSettings) -> Result<()> {
    if settings.samples == 0 {
        return Err(Error::InvalidSettings("samples must be positive".into()));
    }
    let fov = camera.fov;
    if !(fov > 0. && fov < PI) {
        return Err(Error::InvalidSettings(format!(
            "field of view must be in (0, pi), got {fov}"
        )));
    }
    let march = &settings.march;
    if !(march.eps > 0.) {
        return Err(Error::InvalidSettings(format!(
            "march eps must be positive, got {}",
            march.eps
        )));
    }
    if march.max_steps == 0 {
        return Err(Error::InvalidSettings("max_steps must be positive".into()));
    }
    if !(march.max_distance > march.eps) {
        return Err(Error::InvalidSettings(format!(
            "max_distance must exceed eps, got {}",
            march.max_distance
        )));
    }
    let bias = settings.shading.shadow_bias;
    if !(bias >= 0.) {
        return Err(Error::InvalidSettings(format!(
            "shadow_bias can't be negative, got {bias}"
        )));
    }
    Ok(())
}

fn row_seed(seed: u64, row: usize) -> u64 {
    seed ^ (row as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
