use crate::math::{normalize, sub, O, V3};
use crate::sdf::{sd_plane, sd_sphere, sd_torus};
use crate::Scene;

pub struct Sphere {
    pub center: V3,
    pub radius: f64,
}

/// Torus lying in the xz plane, around the vertical axis through `center`.
pub struct Torus {
    pub center: V3,
    pub major_radius: f64,
    pub minor_radius: f64,
}

pub struct Plane {
    pub point: V3,
    pub axis: V3,
}

impl Sphere {
    pub fn at_origin(radius: f64) -> Self {
        Sphere { center: O, radius }
    }
}

impl Torus {
    pub fn at_origin(major_radius: f64, minor_radius: f64) -> Self {
        Torus {
            center: O,
            major_radius,
            minor_radius,
        }
    }
}

impl Plane {
    pub fn new(point: V3, axis: V3) -> Self {
        Plane {
            point,
            axis: normalize(&axis),
        }
    }
}

impl Scene for Sphere {
    fn sdf(&self, x: &V3) -> f64 {
        sd_sphere(&sub(x, &self.center), self.radius)
    }
}

impl Scene for Torus {
    fn sdf(&self, x: &V3) -> f64 {
        sd_torus(&sub(x, &self.center), self.major_radius, self.minor_radius)
    }
}

impl Scene for Plane {
    fn sdf(&self, x: &V3) -> f64 {
        sd_plane(&sub(x, &self.point), &self.axis)
    }
}
