use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};

use super::template::Slice;
use crate::error::ChartGenError;

// 6in x 5in figure rasterized at 100 dpi.
const CHART_WIDTH_PX: u32 = 600;
const CHART_HEIGHT_PX: u32 = 500;

struct PieStyle;

impl PieStyle {
    const DPI: f64 = 100.0;
    const LABEL_FONT_PT: f64 = 11.0;
    const RADIUS: f64 = 160.0;
    const START_ANGLE_DEG: f64 = 90.0;
    const PERCENT_DISTANCE: f64 = 0.6;
    const LABEL_DISTANCE: f64 = 1.15;
    const SHADOW_OFFSET_PX: f64 = 5.0;
    const ARC_STEP_DEG: f64 = 2.0;
    const BACKGROUND: RGBColor = WHITE;
    const TEXT: RGBColor = BLACK;
    const SHADOW: RGBColor = RGBColor(120, 120, 120);

    fn font_px() -> f64 {
        Self::LABEL_FONT_PT * Self::DPI / 72.0
    }
}

struct WedgeGeometry {
    apex: (f64, f64),
    start_deg: f64,
    sweep_deg: f64,
    fraction: f64,
}

/// Rasterizes the slices as a pie chart and returns the encoded PNG bytes.
///
/// Wedges start at 90 degrees and advance counterclockwise; an exploded
/// slice is shifted outward along its bisector. A negative slice value
/// sweeps backwards instead of being rejected.
pub(super) fn render_pie_png(slices: &[Slice]) -> Result<Vec<u8>, ChartGenError> {
    let total: f64 = slices.iter().map(|slice| slice.value).sum();
    if !total.is_finite() || total == 0.0 {
        return Err(ChartGenError::Degenerate(
            "slice values must have a non-zero finite total",
        ));
    }

    let width = CHART_WIDTH_PX;
    let height = CHART_HEIGHT_PX;
    let center = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    let geometries = wedge_layout(slices, total, center, PieStyle::RADIUS);
    let mut rgb_buffer = vec![255u8; width as usize * height as usize * 3];

    {
        let drawing_area =
            BitMapBackend::with_buffer(&mut rgb_buffer, (width, height)).into_drawing_area();
        drawing_area
            .fill(&PieStyle::BACKGROUND)
            .map_err(|error| ChartGenError::Backend(format!("background fill error: {:?}", error)))?;

        // Shadow silhouettes go down first so every wedge paints over them.
        for geometry in &geometries {
            let shift = (-PieStyle::SHADOW_OFFSET_PX, PieStyle::SHADOW_OFFSET_PX);
            drawing_area
                .draw(&Polygon::new(
                    wedge_outline(geometry, PieStyle::RADIUS, shift),
                    PieStyle::SHADOW.filled(),
                ))
                .map_err(|error| {
                    ChartGenError::Backend(format!("shadow draw error: {:?}", error))
                })?;
        }

        for (slice, geometry) in slices.iter().zip(&geometries) {
            drawing_area
                .draw(&Polygon::new(
                    wedge_outline(geometry, PieStyle::RADIUS, (0.0, 0.0)),
                    slice.color.filled(),
                ))
                .map_err(|error| ChartGenError::Backend(format!("wedge draw error: {:?}", error)))?;
        }

        let font = FontDesc::new(FontFamily::SansSerif, PieStyle::font_px(), FontStyle::Bold);
        let percent_style = TextStyle::from(font.clone())
            .color(&PieStyle::TEXT)
            .pos(Pos::new(HPos::Center, VPos::Center));

        for (slice, geometry) in slices.iter().zip(&geometries) {
            let percent_text = format!("{:.1}%", geometry.fraction * 100.0);
            let (percent_at, _) =
                ring_point(geometry, PieStyle::RADIUS * PieStyle::PERCENT_DISTANCE);
            drawing_area
                .draw(&Text::new(percent_text, percent_at, percent_style.clone()))
                .map_err(|error| ChartGenError::FontUnavailable(format!("{:?}", error)))?;

            let (label_at, bisector_cos) =
                ring_point(geometry, PieStyle::RADIUS * PieStyle::LABEL_DISTANCE);
            let label_style = TextStyle::from(font.clone())
                .color(&PieStyle::TEXT)
                .pos(Pos::new(label_alignment(bisector_cos), VPos::Center));
            drawing_area
                .draw(&Text::new(slice.label, label_at, label_style))
                .map_err(|error| ChartGenError::FontUnavailable(format!("{:?}", error)))?;
        }

        drawing_area
            .present()
            .map_err(|error| ChartGenError::Backend(format!("present error: {:?}", error)))?;
    }

    let rgb_image = RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| ChartGenError::Backend("image buffer conversion failed".to_string()))?;
    let mut output = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb_image)
        .write_to(&mut output, ImageFormat::Png)
        .map_err(|error| ChartGenError::PngEncoding(error.to_string()))?;

    Ok(output.into_inner())
}

fn wedge_layout(
    slices: &[Slice],
    total: f64,
    center: (f64, f64),
    radius: f64,
) -> Vec<WedgeGeometry> {
    let mut start_deg = PieStyle::START_ANGLE_DEG;

    slices
        .iter()
        .map(|slice| {
            let fraction = slice.value / total;
            let sweep_deg = fraction * 360.0;
            let bisector = (start_deg + sweep_deg / 2.0).to_radians();
            let offset = slice.explode * radius;
            let geometry = WedgeGeometry {
                apex: (
                    center.0 + offset * bisector.cos(),
                    center.1 - offset * bisector.sin(),
                ),
                start_deg,
                sweep_deg,
                fraction,
            };
            start_deg += sweep_deg;
            geometry
        })
        .collect()
}

fn wedge_outline(geometry: &WedgeGeometry, radius: f64, shift: (f64, f64)) -> Vec<(i32, i32)> {
    let steps = ((geometry.sweep_deg.abs() / PieStyle::ARC_STEP_DEG).ceil() as usize).max(2);
    let apex = (geometry.apex.0 + shift.0, geometry.apex.1 + shift.1);
    let mut points = Vec::with_capacity(steps + 2);
    points.push((apex.0.round() as i32, apex.1.round() as i32));

    for step in 0..=steps {
        let angle = (geometry.start_deg + geometry.sweep_deg * step as f64 / steps as f64)
            .to_radians();
        points.push((
            (apex.0 + radius * angle.cos()).round() as i32,
            (apex.1 - radius * angle.sin()).round() as i32,
        ));
    }

    points
}

fn ring_point(geometry: &WedgeGeometry, distance: f64) -> ((i32, i32), f64) {
    let bisector = (geometry.start_deg + geometry.sweep_deg / 2.0).to_radians();
    let point = (
        (geometry.apex.0 + distance * bisector.cos()).round() as i32,
        (geometry.apex.1 - distance * bisector.sin()).round() as i32,
    );
    (point, bisector.cos())
}

fn label_alignment(bisector_cos: f64) -> HPos {
    if bisector_cos > 0.05 {
        HPos::Left
    } else if bisector_cos < -0.05 {
        HPos::Right
    } else {
        HPos::Center
    }
}
