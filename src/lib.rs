use crate::math::V3;

pub mod config;
pub mod error;
pub mod marcher;
pub mod math;
pub mod output;
pub mod render;
pub mod sdf;
pub mod shading;

pub use error::{Error, Result};

/// A signed distance field: distance from `x` to the nearest surface,
/// negative inside solids.
pub trait Scene: Send + Sync {
    fn sdf(&self, x: &V3) -> f64;
}

impl<F> Scene for F
where
    F: Fn(&V3) -> f64 + Send + Sync,
{
    fn sdf(&self, x: &V3) -> f64 {
        self(x)
    }
}
