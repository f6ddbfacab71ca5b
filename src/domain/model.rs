use crate::utils::error::{ConverterError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body as it arrives on the wire. Every field is optional here so
/// that a missing field is reported by name instead of as a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversionPayload {
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub from_unit: Option<String>,
    #[serde(default)]
    pub to_unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversionResult {
    pub converted_value: f64,
}

impl TryFrom<ConversionPayload> for ConversionRequest {
    type Error = ConverterError;

    fn try_from(payload: ConversionPayload) -> Result<Self> {
        let value = match payload.value {
            Some(raw) => parse_value(&raw)?,
            None => {
                return Err(ConverterError::InvalidValue {
                    value: String::new(),
                    reason: "field 'value' is required".to_string(),
                })
            }
        };
        let from_unit = payload
            .from_unit
            .ok_or_else(|| ConverterError::missing_field("from_unit"))?;
        let to_unit = payload
            .to_unit
            .ok_or_else(|| ConverterError::missing_field("to_unit"))?;

        Ok(Self {
            value,
            from_unit,
            to_unit,
        })
    }
}

/// Accepts a JSON number or a numeric string and yields a finite f64.
pub fn parse_value(raw: &Value) -> Result<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(ConverterError::InvalidValue {
            value: raw.to_string(),
            reason: "value must be a finite number".to_string(),
        }),
        None => Err(ConverterError::InvalidValue {
            value: raw.to_string(),
            reason: "value is not a number".to_string(),
        }),
    }
}
