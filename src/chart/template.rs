use plotters::style::RGBColor;
use serde_json::{Map, Value};

use crate::error::ChartGenError;

/// Outward offset of the emphasized slice, as a fraction of the pie radius.
const EXPLODE_OFFSET: f64 = 0.05;

#[derive(Clone, Copy)]
pub(crate) enum ChartKind {
    Employment,
    Expenditure,
    Works,
}

#[derive(Debug)]
pub(crate) struct Slice {
    pub(crate) label: &'static str,
    pub(crate) value: f64,
    pub(crate) color: RGBColor,
    pub(crate) explode: f64,
}

impl ChartKind {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        match input {
            "employment" => Some(Self::Employment),
            "expenditure" => Some(Self::Expenditure),
            "works" => Some(Self::Works),
            _ => None,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Employment => "employment",
            Self::Expenditure => "expenditure",
            Self::Works => "works",
        }
    }

    pub(crate) fn slices(self, data: &Map<String, Value>) -> Result<Vec<Slice>, ChartGenError> {
        match self {
            Self::Employment => {
                let employed = numeric_field(data, "personsEmployed")?;
                let demanded = numeric_field(data, "personsDemanded")?;

                // The remainder is not clamped: more employed than demanded
                // yields a negative slice.
                Ok(vec![
                    Slice {
                        label: "Got Work",
                        value: employed,
                        color: RGBColor(0x2e, 0xcc, 0x71),
                        explode: EXPLODE_OFFSET,
                    },
                    Slice {
                        label: "Didn't Get Work",
                        value: demanded - employed,
                        color: RGBColor(0xe7, 0x4c, 0x3c),
                        explode: 0.0,
                    },
                ])
            }
            Self::Expenditure => Ok(vec![
                Slice {
                    label: "Wages Paid",
                    value: numeric_field(data, "wages")?,
                    color: RGBColor(0x34, 0x98, 0xdb),
                    explode: EXPLODE_OFFSET,
                },
                Slice {
                    label: "Material Cost",
                    value: numeric_field(data, "material")?,
                    color: RGBColor(0xf3, 0x9c, 0x12),
                    explode: 0.0,
                },
                Slice {
                    label: "Administration",
                    value: numeric_field(data, "admin")?,
                    color: RGBColor(0x9b, 0x59, 0xb6),
                    explode: 0.0,
                },
            ]),
            Self::Works => {
                let total = numeric_field(data, "total")?;
                let completed = numeric_field(data, "completed")?;
                let in_progress = numeric_field(data, "inProgress")?;
                let not_started = (total - completed - in_progress).max(0.0);

                Ok(vec![
                    Slice {
                        label: "Completed Works",
                        value: completed,
                        color: RGBColor(0x27, 0xae, 0x60),
                        explode: EXPLODE_OFFSET,
                    },
                    Slice {
                        label: "In Progress",
                        value: in_progress,
                        color: RGBColor(0xf3, 0x9c, 0x12),
                        explode: 0.0,
                    },
                    Slice {
                        label: "Not Started",
                        value: not_started,
                        color: RGBColor(0x95, 0xa5, 0xa6),
                        explode: 0.0,
                    },
                ])
            }
        }
    }
}

fn numeric_field(data: &Map<String, Value>, field: &'static str) -> Result<f64, ChartGenError> {
    data.get(field)
        .and_then(Value::as_f64)
        .ok_or(ChartGenError::DataField(field))
}
