//! Recursive light-transport integrator and the per-pixel sampling loop.

use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::camera::Camera;
use crate::hittable::Scene;
use crate::interval::Interval;
use crate::material::Color;
use crate::ray::Ray;
use crate::sampler::Sampler;

/// Offset on t_min that keeps scattered rays from re-hitting their own
/// surface (shadow acne).
const T_MIN: f32 = 0.001;

/// How hits are turned into color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeMode {
    /// Full recursive material scattering.
    PathTrace,
    /// Visualize the oriented surface normal at the first hit as
    /// 0.5 * (normal + 1); no recursion. Debug aid.
    Normals,
}

/// Single-threaded brute-force renderer.
///
/// Pixels are mutually independent (the scene and camera are read-only
/// once rendering starts), so rows could be farmed out to workers with
/// per-worker samplers if parallelism is ever wanted.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Number of jittered camera rays averaged per pixel.
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces before the path is cut off.
    pub max_depth: u32,
    /// Shading mode.
    pub mode: ShadeMode,
}

impl Renderer {
    /// Render the scene into a linear f32 framebuffer (row 0 at the top).
    ///
    /// Gamma correction is left to the output writers; the buffer holds
    /// linear radiance averages.
    pub fn render(
        &self,
        scene: &Scene,
        camera: &Camera,
        width: u32,
        height: u32,
        sampler: &mut Sampler,
    ) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(width, height);
        let scale = 1.0 / self.samples_per_pixel as f32;

        info!(
            "Rendering {}x{} at {} spp, max depth {}...",
            width, height, self.samples_per_pixel, self.max_depth
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(height as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} rows ETA: {eta}")
                .unwrap(),
        );

        // Scanlines from the top of the image; the viewport t coordinate
        // counts from the bottom, so row y maps to j = height - 1 - y.
        for y in 0..height {
            let j = height - 1 - y;
            for x in 0..width {
                let mut pixel_color = Color::ZERO;
                for _ in 0..self.samples_per_pixel {
                    let s = (x as f32 + sampler.random_f32()) / (width - 1) as f32;
                    let t = (j as f32 + sampler.random_f32()) / (height - 1) as f32;
                    let r = camera.get_ray(s, t, sampler);
                    pixel_color += self.ray_color(&r, scene, self.max_depth, sampler);
                }
                pixel_color *= scale;
                image.put_pixel(x, y, Rgb([pixel_color.x, pixel_color.y, pixel_color.z]));
            }
            pb.inc(1);
        }

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }

    /// Trace a ray and compute its color contribution.
    ///
    /// Recursion terminates on (in priority order): the bounce limit
    /// (returns black), an absorbed scatter (black), or a miss (sky
    /// gradient). Attenuations multiply element-wise down the path.
    pub fn ray_color(&self, r: &Ray, scene: &Scene, depth: u32, sampler: &mut Sampler) -> Color {
        // Bounce limit reached: no more light is gathered.
        if depth == 0 {
            return Color::ZERO;
        }

        if let Some(rec) = scene.hit(r, Interval::new(T_MIN, f32::INFINITY)) {
            return match self.mode {
                ShadeMode::Normals => 0.5 * (rec.normal + Color::ONE),
                ShadeMode::PathTrace => {
                    match scene.material(rec.material).scatter(r, &rec, sampler) {
                        Some(scatter) => {
                            scatter.attenuation
                                * self.ray_color(&scatter.ray, scene, depth - 1, sampler)
                        }
                        // Absorbed.
                        None => Color::ZERO,
                    }
                }
            };
        }

        // Miss: vertical sky gradient from white to light blue.
        let unit_direction = r.direction.normalize();
        let a = 0.5 * (unit_direction.y + 1.0);
        (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use glam::Vec3A;

    fn path_tracer() -> Renderer {
        Renderer {
            samples_per_pixel: 4,
            max_depth: 8,
            mode: ShadeMode::PathTrace,
        }
    }

    fn single_sphere_scene(material: Material) -> Scene {
        let mut scene = Scene::new();
        let id = scene.add_material(material);
        scene.add_sphere(Vec3A::new(0.0, 0.0, -1.0), 0.5, id);
        scene
    }

    #[test]
    fn depth_zero_is_black() {
        let renderer = path_tracer();
        let scene = single_sphere_scene(Material::Lambertian {
            albedo: Color::splat(0.5),
        });
        let mut sampler = Sampler::seeded(1);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        assert_eq!(renderer.ray_color(&r, &scene, 0, &mut sampler), Color::ZERO);
    }

    #[test]
    fn background_gradient_endpoints() {
        let renderer = path_tracer();
        let empty = Scene::new();
        let mut sampler = Sampler::seeded(1);

        let up = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        let c = renderer.ray_color(&up, &empty, 8, &mut sampler);
        assert!((c - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);

        let down = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, -1.0, 0.0));
        let c = renderer.ray_color(&down, &empty, 8, &mut sampler);
        assert!((c - Color::new(1.0, 1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn normals_mode_visualizes_front_normal() {
        // Sphere at (0,0,-1) r=0.5 viewed from the origin: the camera-facing
        // normal is +Z, so the visualized color is (0.5, 0.5, 1.0).
        let renderer = Renderer {
            mode: ShadeMode::Normals,
            ..path_tracer()
        };
        let scene = single_sphere_scene(Material::Lambertian {
            albedo: Color::splat(0.5),
        });
        let mut sampler = Sampler::seeded(1);
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let c = renderer.ray_color(&r, &scene, 8, &mut sampler);
        assert!((c - Color::new(0.5, 0.5, 1.0)).length() < 1e-5);
    }

    #[test]
    fn path_traced_color_never_exceeds_unity() {
        // Sky peaks at 1 and every material attenuates, so no channel can
        // exceed 1 anywhere along a path.
        let renderer = path_tracer();
        let scene = single_sphere_scene(Material::Lambertian {
            albedo: Color::new(0.8, 0.6, 0.2),
        });
        let mut sampler = Sampler::seeded(13);
        for _ in 0..50 {
            let dir = sampler.random_unit_vector();
            let r = Ray::new(Vec3A::ZERO, dir);
            let c = renderer.ray_color(&r, &scene, 16, &mut sampler);
            assert!(c.max_element() <= 1.0 + 1e-6);
            assert!(c.min_element() >= 0.0);
        }
    }

    #[test]
    fn render_fills_the_framebuffer() {
        let renderer = Renderer {
            samples_per_pixel: 2,
            max_depth: 4,
            mode: ShadeMode::PathTrace,
        };
        let scene = single_sphere_scene(Material::Lambertian {
            albedo: Color::splat(0.5),
        });
        let camera = Camera::new(
            Vec3A::ZERO,
            Vec3A::new(0.0, 0.0, -1.0),
            Vec3A::Y,
            90.0,
            2.0,
            0.0,
            1.0,
        );
        let mut sampler = Sampler::seeded(2);
        let image = renderer.render(&scene, &camera, 8, 4, &mut sampler);
        assert_eq!(image.dimensions(), (8, 4));
        // Top rows look at sky; every channel is finite and in range.
        for pixel in image.pixels() {
            for channel in pixel.0 {
                assert!(channel.is_finite());
                assert!((0.0..=1.0 + 1e-6).contains(&channel));
            }
        }
    }

    #[test]
    fn seeded_renders_are_reproducible() {
        let renderer = Renderer {
            samples_per_pixel: 2,
            max_depth: 4,
            mode: ShadeMode::PathTrace,
        };
        let scene = single_sphere_scene(Material::metal(Color::splat(0.8), 0.3));
        let camera = Camera::new(
            Vec3A::ZERO,
            Vec3A::new(0.0, 0.0, -1.0),
            Vec3A::Y,
            90.0,
            1.0,
            0.0,
            1.0,
        );
        let a = renderer.render(&scene, &camera, 4, 4, &mut Sampler::seeded(99));
        let b = renderer.render(&scene, &camera, 4, 4, &mut Sampler::seeded(99));
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
