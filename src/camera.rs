//! Thin-lens camera mapping normalized image coordinates to world rays.

use glam::Vec3A;

use crate::ray::Ray;
use crate::sampler::Sampler;

/// Immutable camera with an orthonormal basis and viewport geometry.
///
/// Built once from look-from/look-at/up, a vertical field of view, the
/// image aspect ratio, and a lens aperture + focus distance for
/// depth-of-field. The viewport lives on the plane at `focus_dist`, so
/// objects at that distance stay sharp for any aperture.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3A,
    lower_left_corner: Vec3A,
    horizontal: Vec3A,
    vertical: Vec3A,
    u: Vec3A,
    v: Vec3A,
    lens_radius: f32,
}

impl Camera {
    /// Construct a camera.
    ///
    /// `vfov` is the vertical field of view in degrees; `aperture` is the
    /// lens diameter (0 disables defocus blur); `focus_dist` is the
    /// distance to the plane of perfect focus.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lookfrom: Vec3A,
        lookat: Vec3A,
        vup: Vec3A,
        vfov: f32,
        aspect_ratio: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let theta = vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Orthonormal camera frame: w points opposite the view direction.
        let w = (lookfrom - lookat).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = lookfrom;
        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: aperture / 2.0,
        }
    }

    /// Generate a ray through normalized screen coordinates (s, t) in [0, 1].
    ///
    /// With a nonzero aperture the origin is jittered on the lens disk and
    /// the target point on the focus plane is corrected by the same offset.
    pub fn get_ray(&self, s: f32, t: f32, sampler: &mut Sampler) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * sampler.random_in_unit_disk();
            rd.x * self.u + rd.y * self.v
        } else {
            Vec3A::ZERO
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
        )
    }
}
