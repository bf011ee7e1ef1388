//! Sphere primitive and the closed surface variant.
//!
//! Intersection uses the half-b form of the ray/sphere quadratic so the
//! factor of 2 drops out of the discriminant and the roots.

use glam::Vec3A;

use crate::hittable::{HitRecord, MaterialId};
use crate::interval::Interval;
use crate::ray::Ray;

/// Sphere defined by center, signed radius, and a material handle.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    /// Center point in world coordinates.
    pub center: Vec3A,
    /// Signed radius.
    ///
    /// A negative radius flips the outward normal (the division by radius
    /// changes sign), turning the sphere inside out. Hollow glass shells
    /// rely on this; see [`crate::scenes::hollow_glass_scene`].
    pub radius: f32,
    /// Handle into the scene's material arena.
    pub material: MaterialId,
}

impl Sphere {
    /// Create a sphere. The radius keeps its sign.
    pub fn new(center: Vec3A, radius: f32, material: MaterialId) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Test the ray against this sphere within `ray_t`.
    ///
    /// Solves |O + tD - C|^2 = r^2 with half-coefficients: a = d.d,
    /// h = oc.d, c = oc.oc - r^2, discriminant h^2 - a*c. The nearer root
    /// is preferred; the farther one is tried if the nearer falls outside
    /// the interval. A zero-length direction or zero radius is a defined
    /// miss, not an error.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - r.origin;

        let a = r.direction.length_squared();
        if a == 0.0 || self.radius == 0.0 {
            // Degenerate direction or point sphere; a ray through the
            // center of a zero-radius sphere would otherwise produce a
            // discriminant of exactly zero and a NaN normal.
            return None;
        }
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range.
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::new(r, root, p, outward_normal, self.material))
    }
}

/// Closed set of surface shapes the scene can contain.
///
/// Dispatch is a pattern match rather than a trait object, keeping the
/// variant set exhaustively checkable.
#[derive(Debug, Clone, Copy)]
pub enum Surface {
    /// Spherical surface.
    Sphere(Sphere),
}

impl Surface {
    /// Test the ray against this surface within `ray_t`.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Surface::Sphere(sphere) => sphere.hit(r, ray_t),
        }
    }
}
