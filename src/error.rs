use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ChartGenError {
    #[error("no data provided")]
    MissingArgument,
    #[error("missing chartType or data")]
    MissingField,
    #[error("Unknown chart type: {0}")]
    UnknownChartType(String),
    #[error("invalid request payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("missing or non-numeric data field: {0}")]
    DataField(&'static str),
    #[error("cannot draw pie: {0}")]
    Degenerate(&'static str),
    #[error("font unavailable: {0}")]
    FontUnavailable(String),
    #[error("render backend failure: {0}")]
    Backend(String),
    #[error("png encoding failure: {0}")]
    PngEncoding(String),
}

impl ChartGenError {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::MissingArgument => "CHART_MISSING_ARGUMENT",
            Self::MissingField => "CHART_MISSING_FIELD",
            Self::UnknownChartType(_) => "CHART_UNKNOWN_TYPE",
            Self::Payload(_) => "CHART_PAYLOAD_ERROR",
            Self::DataField(_) => "CHART_DATA_FIELD",
            Self::Degenerate(_) => "CHART_DEGENERATE_DATA",
            Self::FontUnavailable(_) => "CHART_FONT_UNAVAILABLE",
            Self::Backend(_) => "CHART_BACKEND_ERROR",
            Self::PngEncoding(_) => "CHART_PNG_ENCODING_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChartGenError;

    #[test]
    fn unknown_chart_type_message_names_the_literal() {
        let error = ChartGenError::UnknownChartType("bogus".to_string());
        assert!(error.to_string().contains("bogus"));
    }

    #[test]
    fn codes_are_stable_for_logging() {
        assert_eq!(ChartGenError::MissingArgument.code(), "CHART_MISSING_ARGUMENT");
        assert_eq!(ChartGenError::MissingField.code(), "CHART_MISSING_FIELD");
        assert_eq!(
            ChartGenError::DataField("wages").code(),
            "CHART_DATA_FIELD"
        );
    }
}
