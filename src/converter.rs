use anyhow::{Context, Result};
use resvg::usvg::{self, Tree};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tiny_skia::Pixmap;

/// Longest side of a rasterised drawing, in pixels
pub const MAX_PIXELS: f32 = 8192.0;

pub fn convert_svg_to_png(
    svg_content: &str,
    output_path: &Path,
    background: Option<(u8, u8, u8, u8)>,
    quality: u8,
    dpi: Option<u32>,
) -> Result<()> {
    // drawings carry no text, no fonts are loaded
    let options = usvg::Options::default();
    let tree = Tree::from_str(svg_content, &options)?;

    // Calculate scale factor from DPI (assume source is 96 DPI)
    const SOURCE_DPI: f32 = 96.0;
    let size = tree.size();
    let mut scale = dpi.map(|d| d as f32 / SOURCE_DPI).unwrap_or(1.0);
    let longest = size.width().max(size.height()) * scale;
    if longest > MAX_PIXELS {
        log::debug!("clamping raster size from {longest}px to {MAX_PIXELS}px");
        scale *= MAX_PIXELS / longest;
    }

    let width = ((size.width() * scale).ceil() as u32).max(100);
    let height = ((size.height() * scale).ceil() as u32).max(100);

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to create {width}x{height} pixmap"))?;

    // Fill with background (default white if None)
    let (r, g, b, a) = background.unwrap_or((255, 255, 255, 255));
    if a > 0 {
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    write_png(&pixmap, output_path, quality)?;

    Ok(())
}

/// Compression level from a 0-100 quality knob: up to 25 is fast, up to 75
/// default, above that best.
fn compression_for(quality: u8) -> png::Compression {
    match quality {
        0..=25 => png::Compression::Fast,
        26..=75 => png::Compression::Default,
        _ => png::Compression::Best,
    }
}

fn write_png(pixmap: &Pixmap, output_path: &Path, quality: u8) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create PNG file: {output_path:?}"))?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_filter(png::FilterType::Paeth);
    encoder.set_compression(compression_for(quality));

    // tiny-skia stores premultiplied alpha, PNG expects straight alpha
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let c = pixel.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    let mut writer = encoder.write_header().context("Failed to write PNG header")?;
    writer
        .write_image_data(&data)
        .context("Failed to write PNG data")?;
    Ok(())
}
