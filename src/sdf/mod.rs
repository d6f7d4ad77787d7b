//! Distance functions and the constructive solid geometry operators used to
//! compose them into scenes.

use crate::math::{abs, sub, V3};
use crate::Scene;

pub mod primitives;

pub use primitives::{Plane, Sphere, Torus};

pub fn sd_sphere(p: &V3, r: f64) -> f64 {
    abs(p) - r
}

/// Torus around the vertical axis through the origin. `r1` is the ring
/// radius, `r2` the tube radius.
pub fn sd_torus(p: &V3, r1: f64, r2: f64) -> f64 {
    let qx = (p.x * p.x + p.z * p.z).sqrt() - r1;
    let qy = p.y;
    (qx * qx + qy * qy).sqrt() - r2
}

pub fn sd_plane(p: &V3, n: &V3) -> f64 {
    crate::math::dot(p, n)
}

pub fn op_union(d1: f64, d2: f64) -> f64 {
    d1.min(d2)
}

pub fn op_subtraction(d1: f64, d2: f64) -> f64 {
    d1.max(-d2)
}

pub fn op_intersection(d1: f64, d2: f64) -> f64 {
    d1.max(d2)
}

pub type Node = Box<dyn Scene>;

// Empty unions are nothing, empty intersections are all of space.
#[derive(Default)]
pub struct Cup {
    pub parts: Vec<Node>,
}

#[derive(Default)]
pub struct Cap {
    pub parts: Vec<Node>,
}

pub struct Subtract {
    pub base: Node,
    pub cut: Node,
}

pub struct Translate {
    pub offset: V3,
    pub inner: Node,
}

impl Cup {
    pub fn new(parts: Vec<Node>) -> Self {
        Cup { parts }
    }
}

impl Cap {
    pub fn new(parts: Vec<Node>) -> Self {
        Cap { parts }
    }
}

impl Subtract {
    pub fn new(base: impl Scene + 'static, cut: impl Scene + 'static) -> Self {
        Subtract {
            base: Box::new(base),
            cut: Box::new(cut),
        }
    }
}

impl Scene for Cup {
    fn sdf(&self, x: &V3) -> f64 {
        self.parts
            .iter()
            .map(|p| p.sdf(x))
            .fold(f64::INFINITY, op_union)
    }
}

impl Scene for Cap {
    fn sdf(&self, x: &V3) -> f64 {
        self.parts
            .iter()
            .map(|p| p.sdf(x))
            .fold(f64::NEG_INFINITY, op_intersection)
    }
}

impl Scene for Subtract {
    fn sdf(&self, x: &V3) -> f64 {
        op_subtraction(self.base.sdf(x), self.cut.sdf(x))
    }
}

impl Scene for Translate {
    fn sdf(&self, x: &V3) -> f64 {
        self.inner.sdf(&sub(x, &self.offset))
    }
}
