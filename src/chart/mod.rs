mod render;
mod template;

use serde_json::{Map, Value};

pub(crate) use template::ChartKind;

use crate::error::ChartGenError;

#[derive(Debug)]
pub(crate) struct GeneratedChart {
    pub(crate) chart_type: &'static str,
    pub(crate) png_bytes: Vec<u8>,
}

pub(crate) fn generate_chart(
    kind: ChartKind,
    data: &Map<String, Value>,
) -> Result<GeneratedChart, ChartGenError> {
    let slices = kind.slices(data)?;
    let png_bytes = render::render_pie_png(&slices)?;

    Ok(GeneratedChart {
        chart_type: kind.name(),
        png_bytes,
    })
}
