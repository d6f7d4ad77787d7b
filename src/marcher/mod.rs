use crate::math::{mul, Ray, B1, B2, B3, V3};
use crate::Scene;
use serde::{Deserialize, Serialize};

pub const EPS: f64 = 1e-4;
pub const MAX_STEPS: u32 = 128;
pub const MAX_DISTANCE: f64 = 100.;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchParams {
    /// Starting distance along the ray, the relative hit tolerance and the
    /// finite difference step for normals.
    pub eps: f64,
    pub max_steps: u32,
    /// Far plane. Rays that travel further than this are misses.
    pub max_distance: f64,
}

impl Default for MarchParams {
    fn default() -> Self {
        MarchParams {
            eps: EPS,
            max_steps: MAX_STEPS,
            max_distance: MAX_DISTANCE,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Hit {
    pub x: V3,
    pub t: f64,
}

/// Sphere traces `ray` through `scene`.
///
/// The hit tolerance grows with the distance travelled (`|d| < eps * t`), so
/// far away surfaces converge in fewer steps. `ray.d` has to be unit length,
/// otherwise the distance field no longer bounds the step. `None` means the
/// ray left the far plane or ran out of steps.
pub fn sphere_trace<S: Scene + ?Sized>(scene: &S, ray: &Ray, params: &MarchParams) -> Option<Hit> {
    let mut t = params.eps;
    for _ in 0..params.max_steps {
        let x = ray.at(t);
        let d = scene.sdf(&x);
        if d.abs() < params.eps * t {
            return Some(Hit { x, t });
        }
        t += d;
        if t > params.max_distance {
            return None;
        }
    }
    None
}

/// Central difference gradient of the distance field at `x`, not normalized.
pub fn dsdf<S: Scene + ?Sized>(scene: &S, x: &V3, eps: f64) -> V3 {
    let dx = mul(eps, &B1);
    let dy = mul(eps, &B2);
    let dz = mul(eps, &B3);

    V3 {
        x: scene.sdf(&(*x + dx)) - scene.sdf(&(*x - dx)),
        y: scene.sdf(&(*x + dy)) - scene.sdf(&(*x - dy)),
        z: scene.sdf(&(*x + dz)) - scene.sdf(&(*x - dz)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{normalize, v, O};
    use crate::sdf::{Cup, Sphere};
    use approx::assert_abs_diff_eq;

    #[test]
    fn hits_sphere_at_expected_distance() {
        let scene = Sphere::at_origin(2.);
        let origin = v(0., 0., -5.);
        let ray = Ray {
            x: origin,
            d: normalize(&(O - origin)),
        };
        let hit = sphere_trace(&scene, &ray, &MarchParams::default()).unwrap();
        assert_abs_diff_eq!(hit.t, 3., epsilon = EPS * 3.);
        assert_abs_diff_eq!(hit.x.z, -2., epsilon = EPS * 3.);
    }

    #[test]
    fn hits_from_an_oblique_origin() {
        let scene = Sphere::at_origin(1.5);
        let origin = v(4., -3., 7.);
        let ray = Ray {
            x: origin,
            d: normalize(&(O - origin)),
        };
        let hit = sphere_trace(&scene, &ray, &MarchParams::default()).unwrap();
        let expected = crate::math::abs(&origin) - 1.5;
        assert_abs_diff_eq!(hit.t, expected, epsilon = EPS * expected);
    }

    #[test]
    fn ray_pointing_up_misses() {
        let scene = Sphere::at_origin(2.);
        let ray = Ray {
            x: v(0., 5., 0.),
            d: B2,
        };
        assert!(sphere_trace(&scene, &ray, &MarchParams::default()).is_none());
    }

    #[test]
    fn empty_scene_misses() {
        let ray = Ray { x: O, d: B3 };
        assert!(sphere_trace(&Cup::default(), &ray, &MarchParams::default()).is_none());
    }

    #[test]
    fn step_budget_exhaustion_is_a_miss() {
        // grazing a sphere needs many small steps
        let scene = Sphere::at_origin(1.);
        let ray = Ray {
            x: v(-50., 1.0001, 0.),
            d: B1,
        };
        let params = MarchParams {
            max_steps: 2,
            ..MarchParams::default()
        };
        assert!(sphere_trace(&scene, &ray, &params).is_none());
    }

    #[test]
    fn gradient_of_sphere_points_outward() {
        let scene = Sphere::at_origin(2.);
        let g = normalize(&dsdf(&scene, &v(0., 0., -2.), EPS));
        assert_abs_diff_eq!(g.z, -1., epsilon = 1e-6);
        assert_abs_diff_eq!(g.x, 0., epsilon = 1e-6);
    }
}
