mod chart;
mod error;
mod request;
mod response;

use std::process::ExitCode;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use crate::chart::{generate_chart, ChartKind, GeneratedChart};
use crate::error::ChartGenError;
use crate::request::resolve_request;
use crate::response::{to_json_line, FailureResponse, SuccessResponse};

// stdout carries the single response line, so all diagnostics go to stderr.
// The default filter keeps the rendering stack below warning level.
const DEFAULT_LOG_FILTER: &str = "info,plotters=error,image=error";

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

fn run(raw_argument: Option<&str>) -> Result<GeneratedChart, ChartGenError> {
    let request = resolve_request(raw_argument)?;
    let kind = ChartKind::parse(&request.chart_type)
        .ok_or_else(|| ChartGenError::UnknownChartType(request.chart_type.clone()))?;

    generate_chart(kind, &request.data)
}

fn main() -> ExitCode {
    init_json_logging();

    let started_at = Instant::now();
    let raw_argument = std::env::args().nth(1);

    match run(raw_argument.as_deref()) {
        Ok(chart) => {
            println!("{}", to_json_line(&SuccessResponse::from_chart(&chart)));
            log::info!(
                "chart_generated chart_type={} png_bytes={} elapsed_ms={}",
                chart.chart_type,
                chart.png_bytes.len(),
                started_at.elapsed().as_millis()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("chart_failed code={} error={}", error.code(), error);
            println!(
                "{}",
                to_json_line(&FailureResponse::from_message(error.to_string()))
            );
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use serde_json::Value;

    use super::run;
    use crate::error::ChartGenError;
    use crate::response::{to_json_line, FailureResponse, SuccessResponse};

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

    fn employment_argument() -> &'static str {
        r#"{"chartType":"employment","data":{"personsDemanded":100,"personsEmployed":80}}"#
    }

    #[test]
    fn employment_request_yields_a_png_success_line() {
        let chart = run(Some(employment_argument())).expect("run should succeed");
        let line = to_json_line(&SuccessResponse::from_chart(&chart));
        let parsed: Value = serde_json::from_str(&line).expect("line should be valid JSON");

        assert_eq!(parsed["success"], Value::Bool(true));
        assert_eq!(parsed["chartType"], "employment");

        let image = parsed["image"].as_str().expect("image should be a string");
        let png_bytes = base64::engine::general_purpose::STANDARD
            .decode(image)
            .expect("image should be valid base64");
        assert_eq!(&png_bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn identical_requests_produce_identical_images() {
        let first = run(Some(employment_argument())).expect("run should succeed");
        let second = run(Some(employment_argument())).expect("run should succeed");

        assert_eq!(first.png_bytes, second.png_bytes);
    }

    #[test]
    fn no_argument_yields_a_failure_line() {
        let error = run(None).expect_err("missing argument should fail");
        let line = to_json_line(&FailureResponse::from_message(error.to_string()));
        let parsed: Value = serde_json::from_str(&line).expect("line should be valid JSON");

        assert_eq!(parsed["success"], Value::Bool(false));
        assert!(parsed.get("image").is_none());
    }

    #[test]
    fn unknown_chart_type_reports_the_literal_value() {
        let error = run(Some(r#"{"chartType":"bogus","data":{"x":1}}"#))
            .expect_err("bogus chart type should fail");

        assert!(matches!(error, ChartGenError::UnknownChartType(_)));
        assert!(error.to_string().contains("bogus"));
    }

    #[test]
    fn missing_data_field_yields_a_failure() {
        let error = run(Some(r#"{"chartType":"works","data":{"total":10}}"#))
            .expect_err("incomplete works data should fail");
        let parsed: Value =
            serde_json::from_str(&to_json_line(&FailureResponse::from_message(error.to_string())))
                .expect("line should be valid JSON");

        assert_eq!(parsed["success"], Value::Bool(false));
    }

    #[test]
    fn works_request_with_overrun_progress_still_succeeds() {
        let chart = run(Some(
            r#"{"chartType":"works","data":{"total":10,"completed":9,"inProgress":5}}"#,
        ))
        .expect("clamped works chart should render");

        assert_eq!(chart.chart_type, "works");
        assert_eq!(&chart.png_bytes[..8], &PNG_SIGNATURE);
    }
}
