//! Render configuration: scene description, camera, lights and settings,
//! loadable from JSON.

use crate::math::{v, V3};
use crate::render::{check_dimensions, check_settings, Camera, Framebuffer, RenderSettings, Renderer};
use crate::sdf::{Cap, Cup, Node, Plane, Sphere, Subtract, Torus, Translate};
use crate::shading::Light;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Scene tree as written in a scene file.
///
/// ```json
/// { "type": "subtraction",
///   "base": { "type": "sphere", "radius": 2.0 },
///   "cut": { "type": "torus", "major_radius": 2.0, "minor_radius": 0.5 } }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneDesc {
    Sphere {
        #[serde(default)]
        center: V3,
        radius: f64,
    },
    Torus {
        #[serde(default)]
        center: V3,
        major_radius: f64,
        minor_radius: f64,
    },
    Plane {
        #[serde(default)]
        point: V3,
        axis: V3,
    },
    Union {
        parts: Vec<SceneDesc>,
    },
    Intersection {
        parts: Vec<SceneDesc>,
    },
    Subtraction {
        base: Box<SceneDesc>,
        cut: Box<SceneDesc>,
    },
    Translate {
        offset: V3,
        inner: Box<SceneDesc>,
    },
}

impl SceneDesc {
    pub fn build(&self) -> Node {
        match self {
            SceneDesc::Sphere { center, radius } => Box::new(Sphere {
                center: *center,
                radius: *radius,
            }),
            SceneDesc::Torus {
                center,
                major_radius,
                minor_radius,
            } => Box::new(Torus {
                center: *center,
                major_radius: *major_radius,
                minor_radius: *minor_radius,
            }),
            SceneDesc::Plane { point, axis } => Box::new(Plane::new(*point, *axis)),
            SceneDesc::Union { parts } => Box::new(Cup::new(parts.iter().map(|p| p.build()).collect())),
            SceneDesc::Intersection { parts } => {
                Box::new(Cap::new(parts.iter().map(|p| p.build()).collect()))
            }
            SceneDesc::Subtraction { base, cut } => Box::new(Subtract {
                base: base.build(),
                cut: cut.build(),
            }),
            SceneDesc::Translate { offset, inner } => Box::new(Translate {
                offset: *offset,
                inner: inner.build(),
            }),
        }
    }

    fn sphere(center: V3, radius: f64) -> Self {
        SceneDesc::Sphere { center, radius }
    }

    fn torus(center: V3, major_radius: f64, minor_radius: f64) -> Self {
        SceneDesc::Torus {
            center,
            major_radius,
            minor_radius,
        }
    }

    fn minus(self, cut: SceneDesc) -> Self {
        SceneDesc::Subtraction {
            base: Box::new(self),
            cut: Box::new(cut),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Sphere with a torus carved out of its equator.
    Reference,
    /// Several spheres and tori on a huge ground sphere.
    Showcase,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub scene: SceneDesc,
    pub settings: RenderSettings,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig::preset(Preset::Reference)
    }
}

impl RenderConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Reference => RenderConfig {
                width: 640,
                height: 360,
                camera: Camera::default(),
                lights: vec![
                    Light {
                        position: v(3., 2., -2.),
                        color: v(1., 0.5, 0.4),
                    },
                    Light {
                        position: v(-4., -1., -2.),
                        color: v(0.2, 1., 0.5),
                    },
                ],
                scene: SceneDesc::sphere(V3::default(), 2.)
                    .minus(SceneDesc::torus(V3::default(), 2., 0.5)),
                settings: RenderSettings::default(),
            },
            Preset::Showcase => RenderConfig {
                lights: vec![
                    Light {
                        position: v(2., 5., -1.),
                        color: v(0.3, 0.3, 0.3),
                    },
                    Light {
                        position: v(-2., 5., -1.),
                        color: v(0.3, 0.3, 0.3),
                    },
                    Light {
                        position: v(0., 10., 0.),
                        color: v(0.1, 0.15, 0.2),
                    },
                ],
                scene: SceneDesc::Union {
                    parts: vec![
                        SceneDesc::sphere(V3::default(), 1.5),
                        SceneDesc::sphere(v(2., 0., 0.), 1.),
                        SceneDesc::sphere(v(0., -100., 0.), 100.),
                        SceneDesc::torus(v(0., 2., 0.), 1., 0.2),
                    ],
                }
                .minus(SceneDesc::torus(v(0., 1., 0.), 1., 0.2))
                .minus(SceneDesc::sphere(v(-2., 0., -2.), 1.)),
                ..RenderConfig::preset(Preset::Reference)
            },
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::SceneFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading scene file");
        RenderConfig::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height)?;
        check_settings(&self.camera, &self.settings)
    }

    pub fn render(&self) -> Result<Framebuffer> {
        let scene = self.scene.build();
        Renderer::new(scene.as_ref(), &self.lights)
            .with_camera(self.camera)
            .with_settings(self.settings)
            .render(self.width, self.height)
    }
}
