use clap::Parser;
use log::info;

use lumapath::cli::Args;
use lumapath::logger::init_logger;
use lumapath::output::{
    save_image_as_exr, save_image_as_png, save_image_as_ppm, send_image_to_tev,
};
use lumapath::renderer::{Renderer, ShadeMode};
use lumapath::sampler::Sampler;
use lumapath::scenes;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    info!(
        "Lumapath - Git Version {} ({})",
        env!("GIT_HASH"),
        env!("GIT_DATE")
    );
    info!(
        "Image resolution: {}x{}, samples per pixel: {}",
        args.width, args.height, args.samples_per_pixel
    );

    let mut sampler = match args.seed {
        Some(seed) => {
            info!("Sampler seeded with {}", seed);
            Sampler::seeded(seed)
        }
        None => Sampler::from_entropy(),
    };

    let scene = scenes::build(args.scene, &mut sampler);
    info!(
        "Scene built: {} surfaces, {} materials",
        scene.surface_count(),
        scene.material_count()
    );

    let aspect_ratio = args.width as f32 / args.height as f32;
    let camera = scenes::camera_for(args.scene, aspect_ratio);

    let renderer = Renderer {
        samples_per_pixel: args.samples_per_pixel,
        max_depth: args.max_depth,
        mode: if args.normals {
            ShadeMode::Normals
        } else {
            ShadeMode::PathTrace
        },
    };

    let image = renderer.render(&scene, &camera, args.width, args.height, &mut sampler);

    // Send image to TEV if requested
    if args.tev || args.tev_address.is_some() {
        let tev_address = args.tev_address.as_deref().unwrap_or("localhost:14158");
        send_image_to_tev(&image, tev_address);
    }

    // Save image based on file extension
    if args.output.ends_with(".ppm") {
        save_image_as_ppm(&image, &args.output);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output);
    } else if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .ppm, .png and .exr formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
