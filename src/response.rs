use base64::Engine;
use serde::Serialize;

use crate::chart::GeneratedChart;

const FALLBACK_FAILURE_LINE: &str = r#"{"success":false,"error":"response serialization failed"}"#;

#[derive(Debug, Serialize)]
pub(crate) struct SuccessResponse {
    success: bool,
    image: String,
    #[serde(rename = "chartType")]
    chart_type: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct FailureResponse {
    success: bool,
    error: String,
}

impl SuccessResponse {
    pub(crate) fn from_chart(chart: &GeneratedChart) -> Self {
        Self {
            success: true,
            image: base64::engine::general_purpose::STANDARD.encode(&chart.png_bytes),
            chart_type: chart.chart_type.to_string(),
        }
    }
}

impl FailureResponse {
    pub(crate) fn from_message(message: String) -> Self {
        Self {
            success: false,
            error: message,
        }
    }
}

// Serialization of these shapes cannot fail in practice; the fallback keeps
// the output a valid JSON line if it ever does.
pub(crate) fn to_json_line<T: Serialize>(response: &T) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| FALLBACK_FAILURE_LINE.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::{to_json_line, FailureResponse, SuccessResponse};
    use crate::chart::GeneratedChart;

    #[test]
    fn success_line_carries_image_and_echoed_type() {
        let chart = GeneratedChart {
            chart_type: "employment",
            png_bytes: vec![1, 2, 3],
        };
        let line = to_json_line(&SuccessResponse::from_chart(&chart));
        let parsed: Value = serde_json::from_str(&line).expect("line should be valid JSON");

        assert_eq!(parsed["success"], Value::Bool(true));
        assert_eq!(parsed["chartType"], "employment");
        assert_eq!(parsed["image"], "AQID");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn failure_line_carries_the_message() {
        let line = to_json_line(&FailureResponse::from_message("boom".to_string()));
        let parsed: Value = serde_json::from_str(&line).expect("line should be valid JSON");

        assert_eq!(parsed["success"], Value::Bool(false));
        assert_eq!(parsed["error"], "boom");
        assert!(!line.contains('\n'));
    }
}
