//! Framebuffer output as binary PPM and PNG.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tinyray_renderer::ImageBuffer;

/// Write a binary (P6) PPM.
pub fn write_ppm(image: &ImageBuffer, writer: &mut impl Write) -> std::io::Result<()> {
    write!(writer, "P6\n{} {}\n255\n", image.width, image.height)?;
    writer.write_all(&image.to_rgb8())?;
    writer.flush()
}

pub fn save_ppm(image: &ImageBuffer, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer).with_context(|| format!("writing {}", path.display()))
}

pub fn save_png(image: &ImageBuffer, path: &Path) -> Result<()> {
    image::save_buffer(
        path,
        &image.to_rgb8(),
        image.width,
        image.height,
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("writing {}", path.display()))
}

/// Write `out.ppm` and `out.png` into `dir`, creating it if needed.
pub fn save_all(image: &ImageBuffer, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let ppm = dir.join("out.ppm");
    save_ppm(image, &ppm)?;
    log::info!("Saved {}", ppm.display());

    let png = dir.join("out.png");
    save_png(image, &png)?;
    log::info!("Saved {}", png.display());

    Ok(())
}
