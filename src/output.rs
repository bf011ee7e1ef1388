//! Image writers: PPM, PNG, EXR, and the TEV live viewer.
//!
//! All writers consume the renderer's linear f32 framebuffer. PPM applies
//! the classic square-root gamma and `floor(255.999 * channel)`
//! quantization; PNG applies the sRGB transfer curve; EXR stays linear.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::net::TcpStream;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::{debug, info, warn};
use tev_client::{PacketCreateImage, PacketUpdateImage, TevClient};

use crate::interval::Interval;

/// Linear f32 framebuffer produced by the renderer.
pub type Framebuffer = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Write the framebuffer as plain-text PPM (P3).
///
/// Format contract: header `P3\n<width> <height>\n255\n`, then rows
/// top-to-bottom, pixels left-to-right, each pixel `R G B` with channels
/// clamped to [0, 1], square-root gamma corrected, and scaled by 255.999
/// (truncation biases just below a true 256 scale).
pub fn write_ppm<W: Write>(out: &mut W, image: &Framebuffer) -> io::Result<()> {
    let (width, height) = image.dimensions();
    writeln!(out, "P3\n{} {}\n255", width, height)?;

    // The framebuffer stores row 0 at the top, which is already the PPM
    // row order.
    for pixel in image.pixels() {
        let quantize = |c: f32| (255.999 * Interval::UNIT.clamp(c).sqrt()) as u32;
        writeln!(
            out,
            "{} {} {}",
            quantize(pixel[0]),
            quantize(pixel[1]),
            quantize(pixel[2])
        )?;
    }

    Ok(())
}

/// Save the framebuffer as a PPM file.
pub fn save_image_as_ppm(image: &Framebuffer, output_path: &str) {
    let result = File::create(output_path).and_then(|file| {
        let mut out = BufWriter::new(file);
        write_ppm(&mut out, image)?;
        out.flush()
    });
    match result {
        Ok(()) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save PPM image: {}", e),
    }
}

/// Save the framebuffer as an 8-bit PNG with sRGB gamma.
pub fn save_image_as_png(image: &Framebuffer, output_path: &str) {
    let (width, height) = image.dimensions();
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = image.get_pixel(x, y);

        // sRGB transfer curve with the linear toe for dark values.
        let linear_to_gamma = |linear: f32| -> f32 {
            if linear <= 0.0 {
                0.0
            } else if linear <= 0.0031308 {
                12.92 * linear
            } else {
                1.055 * linear.powf(1.0 / 2.4) - 0.055
            }
        };

        Rgb([
            (linear_to_gamma(pixel[0].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_gamma(pixel[1].clamp(0.0, 1.0)) * 255.0) as u8,
            (linear_to_gamma(pixel[2].clamp(0.0, 1.0)) * 255.0) as u8,
        ])
    });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save the framebuffer as linear f32 EXR.
pub fn save_image_as_exr(image: &Framebuffer, output_path: &str) {
    let (width, height) = image.dimensions();
    let pixels = image
        .pixels()
        .map(|rgb| (rgb[0], rgb[1], rgb[2]))
        .collect::<Vec<(f32, f32, f32)>>();

    let result = write_rgb_file(output_path, width as usize, height as usize, |x, y| {
        pixels[y * width as usize + x]
    });

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}

/// Push the framebuffer to a running TEV viewer over TCP.
///
/// TEV wants planar channel data (all R, then all G, then all B); the
/// framebuffer is interleaved, so the data is re-laid-out before sending.
pub fn send_image_to_tev(image: &Framebuffer, tev_address: &str) {
    let (width, height) = image.dimensions();

    // Add the default port if none was given.
    let tev_address = if tev_address.contains(':') {
        tev_address.to_string()
    } else {
        format!("{}:14158", tev_address)
    };

    debug!("Connecting to TEV at {}", tev_address);
    let stream = match TcpStream::connect(&tev_address) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Failed to connect to TEV on {}: {}", tev_address, e);
            return;
        }
    };
    if let Err(e) = stream.set_nodelay(true) {
        debug!("Failed to set TCP_NODELAY: {}", e);
    }
    let mut client = TevClient::wrap(stream);

    if let Err(e) = client.send(PacketCreateImage {
        image_name: "lumapath_output",
        width,
        height,
        channel_names: &["R", "G", "B"],
        grab_focus: true,
    }) {
        warn!("Failed to create image in TEV: {}", e);
        return;
    }

    let pixel_count = (width * height) as usize;
    let mut rgb_data = Vec::with_capacity(pixel_count * 3);
    for channel in 0..3usize {
        for pixel in image.pixels() {
            rgb_data.push(pixel[channel]);
        }
    }

    let start_time = std::time::Instant::now();
    let update = PacketUpdateImage {
        image_name: "lumapath_output",
        grab_focus: false,
        channel_names: &["R", "G", "B"],
        x: 0,
        y: 0,
        width,
        height,
        channel_offsets: &[0, pixel_count as u64, 2 * pixel_count as u64],
        channel_strides: &[1, 1, 1],
        data: &rgb_data,
    };
    match client.send(update) {
        Ok(_) => info!(
            "Image sent to TEV at {} in {:.2?}",
            tev_address,
            start_time.elapsed()
        ),
        Err(e) => warn!("Failed to send image data to TEV: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(pixels: &[[f32; 3]], width: u32, height: u32) -> Framebuffer {
        let mut image = Framebuffer::new(width, height);
        for (i, p) in pixels.iter().enumerate() {
            image.put_pixel(i as u32 % width, i as u32 / width, Rgb(*p));
        }
        image
    }

    #[test]
    fn ppm_header_and_quantization() {
        // 0.25 gamma-corrects to 0.5, and floor(255.999 * 0.5) = 127.
        let image = buffer(&[[0.0, 0.25, 1.0], [1.0, 1.0, 1.0]], 2, 1);
        let mut out = Vec::new();
        write_ppm(&mut out, &image).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n0 127 255\n255 255 255\n");
    }

    #[test]
    fn ppm_clamps_out_of_range_channels() {
        let image = buffer(&[[2.0, -0.5, 0.9999]], 1, 1);
        let mut out = Vec::new();
        write_ppm(&mut out, &image).unwrap();
        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(3).unwrap();
        assert_eq!(row, "255 0 255");
    }

    #[test]
    fn ppm_rows_come_out_top_first() {
        // Row 0 of the framebuffer is the top row and must be written first.
        let image = buffer(&[[1.0, 1.0, 1.0], [0.0, 0.0, 0.0]], 1, 2);
        let mut out = Vec::new();
        write_ppm(&mut out, &image).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().skip(3).collect();
        assert_eq!(rows, vec!["255 255 255", "0 0 0"]);
    }
}
