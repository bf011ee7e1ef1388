//! Material system for ray tracing.
//!
//! A closed enum of scattering policies: Lambertian (diffuse), Metal
//! (specular with roughness), and Dielectric (transparent). Dispatch is a
//! pattern match, so the variant set stays exhaustively checkable.

use glam::Vec3A;

use crate::hittable::HitRecord;
use crate::ray::Ray;
use crate::sampler::Sampler;

/// RGB color type using Vec3A for SIMD-friendly arithmetic.
pub type Color = Vec3A;

/// Result of a successful material scatter.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    /// Fractional color multiplier applied along the scattered path.
    pub attenuation: Color,
    /// The scattered ray, originating at the hit point.
    pub ray: Ray,
}

/// Surface scattering policy.
///
/// Materials are stateless: scattering is a pure function of the incoming
/// ray, the hit record, and the sampler.
#[derive(Debug, Clone, Copy)]
pub enum Material {
    /// Diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },
    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f32,
    },
    /// Transparent material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass).
        refraction_index: f32,
    },
}

impl Material {
    /// Create a metal material, clamping fuzz to [0, 1].
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns `None` when the ray is absorbed.
    pub fn scatter(&self, r_in: &Ray, rec: &HitRecord, sampler: &mut Sampler) -> Option<Scatter> {
        match *self {
            Material::Lambertian { albedo } => scatter_lambertian(albedo, rec, sampler),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec, sampler),
            Material::Dielectric { refraction_index } => {
                scatter_dielectric(refraction_index, r_in, rec, sampler)
            }
        }
    }
}

/// Diffuse scattering with an approximately cosine-weighted distribution.
fn scatter_lambertian(albedo: Color, rec: &HitRecord, sampler: &mut Sampler) -> Option<Scatter> {
    let mut scatter_direction = rec.normal + sampler.random_unit_vector();

    // Catch degenerate scatter direction (sampled vector nearly opposite
    // the normal); fall back to the normal itself.
    if scatter_direction.length_squared() < 1e-8 {
        scatter_direction = rec.normal;
    }

    Some(Scatter {
        attenuation: albedo,
        ray: Ray::new(rec.p, scatter_direction),
    })
}

/// Metallic reflection with optional fuzz.
fn scatter_metal(
    albedo: Color,
    fuzz: f32,
    r_in: &Ray,
    rec: &HitRecord,
    sampler: &mut Sampler,
) -> Option<Scatter> {
    let reflected = reflect(r_in.direction.normalize(), rec.normal);
    let direction = reflected + fuzz * sampler.random_unit_vector();

    // A fuzzed reflection can end up below the surface; absorb it.
    if direction.dot(rec.normal) > 0.0 {
        Some(Scatter {
            attenuation: albedo,
            ray: Ray::new(rec.p, direction),
        })
    } else {
        None
    }
}

/// Dielectric scattering: reflect or refract by Snell's law, with Schlick's
/// approximation deciding reflection probabilistically.
fn scatter_dielectric(
    refraction_index: f32,
    r_in: &Ray,
    rec: &HitRecord,
    sampler: &mut Sampler,
) -> Option<Scatter> {
    // Glass absorbs nothing.
    let attenuation = Color::ONE;

    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract || reflectance(cos_theta, ri) > sampler.random_f32() {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    Some(Scatter {
        attenuation,
        ray: Ray::new(rec.p, direction),
    })
}

/// Reflect v off a surface with normal n.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract unit vector uv through an interface with normal n and relative
/// index of refraction etai_over_etat.
pub fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Fresnel reflectance via Schlick's approximation.
fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
