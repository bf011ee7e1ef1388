//! Hit records and the scene container.
//!
//! The scene owns two arenas: the surfaces themselves and the materials
//! they reference by [`MaterialId`]. Materials never point back at
//! surfaces, so plain indices replace shared pointers.

use glam::Vec3A;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::sphere::{Sphere, Surface};

/// Handle into a scene's material arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaterialId(u32);

/// Ray-surface intersection information.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Point where the ray intersects the surface.
    pub p: Vec3A,
    /// Surface normal at the hit point, always facing the incoming ray.
    pub normal: Vec3A,
    /// Ray parameter at the intersection.
    pub t: f32,
    /// True if the ray hit the outward-facing side of the surface.
    pub front_face: bool,
    /// Material of the surface at the hit point.
    pub material: MaterialId,
}

impl HitRecord {
    /// Build a record from the geometric outward normal.
    ///
    /// Orientation invariant: `front_face` is true iff the ray direction
    /// opposes the outward normal, and the stored normal is flipped when
    /// the hit is on the back face.
    pub fn new(r: &Ray, t: f32, p: Vec3A, outward_normal: Vec3A, material: MaterialId) -> Self {
        let front_face = r.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            p,
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// A renderable scene: surfaces plus the material arena they index into.
///
/// Read-only during rendering; intersection is a linear scan over all
/// surfaces (no acceleration structure).
#[derive(Debug, Default)]
pub struct Scene {
    materials: Vec<Material>,
    surfaces: Vec<Surface>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return its handle.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        id
    }

    /// Add a surface to the scene.
    pub fn add(&mut self, surface: Surface) {
        self.surfaces.push(surface);
    }

    /// Convenience: add a sphere referencing an already-registered material.
    pub fn add_sphere(&mut self, center: Vec3A, radius: f32, material: MaterialId) {
        self.add(Surface::Sphere(Sphere::new(center, radius, material)));
    }

    /// Look up a material by handle.
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0 as usize]
    }

    /// Number of surfaces in the scene.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Number of registered materials.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Surfaces in insertion order.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Find the nearest intersection along the ray within `ray_t`.
    ///
    /// The interval max shrinks to the best t found so far, so farther
    /// hits are rejected without comparison.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for surface in &self.surfaces {
            if let Some(rec) = surface.hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
