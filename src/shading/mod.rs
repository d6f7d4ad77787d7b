use crate::marcher::{dsdf, sphere_trace, MarchParams};
use crate::math::{abs, dot, mul, normalize, Ray, O, V3};
use crate::Scene;
use serde::{Deserialize, Serialize};

/// Point light. Color channels are usually in [0, 1] but aren't bounded.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: V3,
    pub color: V3,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingParams {
    /// Clamp `n . l` at zero so back faces never subtract light.
    pub clamp_lambert: bool,
    /// Shadow rays start this far along the surface normal.
    pub shadow_bias: f64,
}

impl Default for ShadingParams {
    fn default() -> Self {
        ShadingParams {
            clamp_lambert: true,
            shadow_bias: 1e-3,
        }
    }
}

/// Unit surface normal at `x`, estimated from the distance field.
pub fn normal<S: Scene + ?Sized>(scene: &S, x: &V3, eps: f64) -> V3 {
    normalize(&dsdf(scene, x, eps))
}

/// Diffuse light arriving at `x` from `light`, zero when something sits
/// between `x` and the light. Shadows are hard: no attenuation, no penumbra.
pub fn light_contribution<S: Scene + ?Sized>(
    scene: &S,
    x: &V3,
    light: &Light,
    march: &MarchParams,
    params: &ShadingParams,
) -> V3 {
    let n = normal(scene, x, march.eps);
    let l = normalize(&(light.position - *x));
    let origin = *x + params.shadow_bias * n;
    let to_light = light.position - origin;
    let shadow_ray = Ray {
        x: origin,
        d: normalize(&to_light),
    };
    // geometry behind the light doesn't shadow
    match sphere_trace(scene, &shadow_ray, march) {
        Some(hit) if hit.t < abs(&to_light) => return O,
        _ => {}
    }
    let cos = dot(&n, &l);
    let cos = if params.clamp_lambert { cos.max(0.) } else { cos };
    mul(cos, &light.color)
}

pub fn shade<S: Scene + ?Sized>(
    scene: &S,
    lights: &[Light],
    x: &V3,
    march: &MarchParams,
    params: &ShadingParams,
) -> V3 {
    lights.iter().fold(O, |col, light| {
        col + light_contribution(scene, x, light, march, params)
    })
}
