//! Lumapath: an offline, single-threaded sphere path tracer.
//!
//! Renders scenes of Lambertian, metal, and dielectric spheres with a
//! thin-lens camera and a recursive light-transport integrator. Output
//! formats: PPM (P3), PNG, EXR, and a TEV live viewer push.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod cli;
pub mod hittable;
pub mod interval;
pub mod logger;
pub mod material;
pub mod output;
pub mod ray;
pub mod renderer;
pub mod sampler;
pub mod scenes;
pub mod sphere;
