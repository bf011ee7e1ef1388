//! Reference scene builders.

use clap::ValueEnum;
use glam::Vec3A;

use crate::camera::Camera;
use crate::hittable::Scene;
use crate::material::{Color, Material};
use crate::sampler::Sampler;

/// Built-in scenes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Book-cover scene: ground plane, ~480 random small spheres, three
    /// large feature spheres.
    Cover,
    /// One diffuse sphere over a huge ground sphere.
    Simple,
    /// Simple scene plus a hollow glass sphere (negative-radius inner shell).
    HollowGlass,
}

/// Build the selected scene.
///
/// Only the cover scene consumes randomness; the sampler is threaded
/// through so a seeded run reproduces the same sphere field.
pub fn build(kind: SceneKind, sampler: &mut Sampler) -> Scene {
    match kind {
        SceneKind::Cover => cover_scene(sampler),
        SceneKind::Simple => simple_scene(),
        SceneKind::HollowGlass => hollow_glass_scene(),
    }
}

/// Camera matching the selected scene's framing.
pub fn camera_for(kind: SceneKind, aspect_ratio: f32) -> Camera {
    match kind {
        SceneKind::Cover => Camera::new(
            Vec3A::new(13.0, 2.0, 3.0),
            Vec3A::ZERO,
            Vec3A::Y,
            20.0,
            aspect_ratio,
            0.1,
            10.0,
        ),
        SceneKind::Simple | SceneKind::HollowGlass => Camera::new(
            Vec3A::ZERO,
            Vec3A::new(0.0, 0.0, -1.0),
            Vec3A::Y,
            90.0,
            aspect_ratio,
            0.0,
            1.0,
        ),
    }
}

/// The classic cover scene with a 22x22 field of random small spheres.
pub fn cover_scene(sampler: &mut Sampler) -> Scene {
    let mut scene = Scene::new();

    let ground = scene.add_material(Material::Lambertian {
        albedo: Color::new(0.5, 0.5, 0.5),
    });
    scene.add_sphere(Vec3A::new(0.0, -1000.0, 0.0), 1000.0, ground);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = sampler.random_f32();
            let center = Vec3A::new(
                a as f32 + 0.9 * sampler.random_f32(),
                0.2,
                b as f32 + 0.9 * sampler.random_f32(),
            );

            // Keep clear of the metal feature sphere's spot.
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                Material::Lambertian {
                    albedo: sampler.random_color() * sampler.random_color(),
                }
            } else if choose_mat < 0.95 {
                Material::metal(
                    sampler.random_color_range(0.5, 1.0),
                    sampler.random_f32_range(0.0, 0.5),
                )
            } else {
                Material::Dielectric {
                    refraction_index: 1.5,
                }
            };

            let id = scene.add_material(material);
            scene.add_sphere(center, 0.2, id);
        }
    }

    let glass = scene.add_material(Material::Dielectric {
        refraction_index: 1.5,
    });
    scene.add_sphere(Vec3A::new(0.0, 1.0, 0.0), 1.0, glass);

    let diffuse = scene.add_material(Material::Lambertian {
        albedo: Color::new(0.4, 0.2, 0.1),
    });
    scene.add_sphere(Vec3A::new(-4.0, 1.0, 0.0), 1.0, diffuse);

    let metal = scene.add_material(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    scene.add_sphere(Vec3A::new(4.0, 1.0, 0.0), 1.0, metal);

    scene
}

/// A small sphere resting on a huge ground sphere.
pub fn simple_scene() -> Scene {
    let mut scene = Scene::new();
    let center = scene.add_material(Material::Lambertian {
        albedo: Color::new(0.7, 0.3, 0.3),
    });
    let ground = scene.add_material(Material::Lambertian {
        albedo: Color::new(0.8, 0.8, 0.0),
    });
    scene.add_sphere(Vec3A::new(0.0, 0.0, -1.0), 0.5, center);
    scene.add_sphere(Vec3A::new(0.0, -100.5, -1.0), 100.0, ground);
    scene
}

/// Simple scene with a hollow glass sphere beside the diffuse one.
///
/// The inner shell has a negative radius, which flips its normals so the
/// dielectric treats it as air inside glass.
pub fn hollow_glass_scene() -> Scene {
    let mut scene = Scene::new();
    let center = scene.add_material(Material::Lambertian {
        albedo: Color::new(0.1, 0.2, 0.5),
    });
    let ground = scene.add_material(Material::Lambertian {
        albedo: Color::new(0.8, 0.8, 0.0),
    });
    let glass = scene.add_material(Material::Dielectric {
        refraction_index: 1.5,
    });
    let metal = scene.add_material(Material::metal(Color::new(0.8, 0.6, 0.2), 0.0));

    scene.add_sphere(Vec3A::new(0.0, -100.5, -1.0), 100.0, ground);
    scene.add_sphere(Vec3A::new(0.0, 0.0, -1.0), 0.5, center);
    scene.add_sphere(Vec3A::new(-1.0, 0.0, -1.0), 0.5, glass);
    scene.add_sphere(Vec3A::new(-1.0, 0.0, -1.0), -0.45, glass);
    scene.add_sphere(Vec3A::new(1.0, 0.0, -1.0), 0.5, metal);
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Surface;

    #[test]
    fn cover_scene_is_geometrically_valid() {
        let mut sampler = Sampler::seeded(1234);
        let scene = cover_scene(&mut sampler);

        // Ground + up to 484 small spheres (minus the reserved zone) + 3.
        assert!(scene.surface_count() > 400);
        assert!(scene.surface_count() <= 1 + 484 + 3);

        for surface in scene.surfaces() {
            let Surface::Sphere(sphere) = surface;
            assert!(sphere.radius > 0.0);
            assert!((sphere.center - Vec3A::new(4.0, 0.2, 0.0)).length() > 0.9
                || sphere.radius >= 1.0);
            match scene.material(sphere.material) {
                Material::Lambertian { albedo } => {
                    assert!(albedo.min_element() >= 0.0 && albedo.max_element() < 1.0);
                }
                Material::Metal { albedo, fuzz } => {
                    assert!((0.0..=1.0).contains(fuzz));
                    assert!(albedo.min_element() >= 0.0 && albedo.max_element() <= 1.0);
                }
                Material::Dielectric { refraction_index } => {
                    assert_eq!(*refraction_index, 1.5);
                }
            }
        }
    }

    #[test]
    fn cover_scene_reproducible_for_a_seed() {
        let a = cover_scene(&mut Sampler::seeded(7));
        let b = cover_scene(&mut Sampler::seeded(7));
        assert_eq!(a.surface_count(), b.surface_count());
        for (x, y) in a.surfaces().iter().zip(b.surfaces()) {
            let (Surface::Sphere(x), Surface::Sphere(y)) = (x, y);
            assert_eq!(x.center, y.center);
            assert_eq!(x.radius, y.radius);
        }
    }

    #[test]
    fn hollow_glass_has_a_negative_shell() {
        let scene = hollow_glass_scene();
        let negative = scene
            .surfaces()
            .iter()
            .filter(|Surface::Sphere(s)| s.radius < 0.0)
            .count();
        assert_eq!(negative, 1);
    }
}
