use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ChartGenError;

#[derive(Debug, Deserialize)]
struct RawRequest {
    #[serde(rename = "chartType", default)]
    chart_type: Option<String>,
    #[serde(default)]
    data: Option<Map<String, Value>>,
}

#[derive(Debug)]
pub(crate) struct ChartRequest {
    pub(crate) chart_type: String,
    pub(crate) data: Map<String, Value>,
}

/// Resolves the process's single positional argument into a chart request.
/// An empty `chartType` string or empty `data` object counts as missing;
/// malformed JSON propagates as a payload error.
pub(crate) fn resolve_request(raw_argument: Option<&str>) -> Result<ChartRequest, ChartGenError> {
    let raw_argument = raw_argument.ok_or(ChartGenError::MissingArgument)?;
    let request: RawRequest = serde_json::from_str(raw_argument)?;

    let (Some(chart_type), Some(data)) = (request.chart_type, request.data) else {
        return Err(ChartGenError::MissingField);
    };

    if chart_type.is_empty() || data.is_empty() {
        return Err(ChartGenError::MissingField);
    }

    Ok(ChartRequest { chart_type, data })
}
