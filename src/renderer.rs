use std::fmt::Write;

use crate::errors::Result;
use crate::models::{Drawing, Polyline, ViewBox};

/// Bounding box of every point, in SVG coordinates (y pointing down),
/// padded on all sides.
pub fn calculate_viewbox(polylines: &[Polyline]) -> ViewBox {
    const PADDING: f64 = 40.0;

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(x, y) in polylines.iter().flatten() {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        let y = -y;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    if min_x > max_x {
        return ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width: 800.0,
            height: 600.0,
        };
    }

    ViewBox {
        min_x: min_x - PADDING,
        min_y: min_y - PADDING,
        width: max_x - min_x + PADDING * 2.0,
        height: max_y - min_y + PADDING * 2.0,
    }
}

/// Path data for one polyline. The y axis is flipped so patterns keep the
/// counterclockwise orientation of the maths. Non-finite samples break the
/// line instead of poisoning the whole path.
fn path_data(polyline: &Polyline) -> String {
    let mut d = String::with_capacity(polyline.len() * 20);
    let mut pen_down = false;
    for &(x, y) in polyline {
        if !(x.is_finite() && y.is_finite()) {
            pen_down = false;
            continue;
        }
        let command = if pen_down { 'L' } else { 'M' };
        if !d.is_empty() {
            d.push(' ');
        }
        // writing into a String cannot fail
        let _ = write!(d, "{command}{:.3},{:.3}", x, -y);
        pen_down = true;
    }
    d
}

pub fn generate_svg(drawing: &Drawing) -> Result<String> {
    let stroke_color = drawing.stroke.validate()?;
    let viewbox = calculate_viewbox(&drawing.polylines);

    let paths_svg = drawing
        .polylines
        .iter()
        .map(path_data)
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"  <path d="{d}"/>"#))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        "<svg viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n <g fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\">\n{}\n </g>\n</svg>\n",
        viewbox.min_x,
        viewbox.min_y,
        viewbox.width,
        viewbox.height,
        viewbox.width,
        viewbox.height,
        stroke_color,
        drawing.stroke.width,
        paths_svg
    ))
}
