//! Unit conversion arithmetic.
//!
//! Length and weight are ratio conversions through a base unit and round
//! their output (3 and 4 decimals). Temperature is affine, goes through
//! Celsius, and is never rounded.

use crate::domain::model::{ConversionRequest, ConversionResult};
use crate::domain::units::{LengthUnit, Measure, RatioUnit, TemperatureUnit, WeightUnit};
use crate::utils::error::{ConverterError, Result};

pub const LENGTH_PRECISION: usize = 3;
pub const WEIGHT_PRECISION: usize = 4;

pub fn convert_length(value: f64, from_unit: &str, to_unit: &str) -> Result<f64> {
    convert_ratio::<LengthUnit>(Measure::Length, value, from_unit, to_unit)
        .map(|v| round_to(v, LENGTH_PRECISION))
}

pub fn convert_weight(value: f64, from_unit: &str, to_unit: &str) -> Result<f64> {
    convert_ratio::<WeightUnit>(Measure::Weight, value, from_unit, to_unit)
        .map(|v| round_to(v, WEIGHT_PRECISION))
}

/// Converts between C, F and K. Same-unit conversions return `value`
/// untouched.
pub fn convert_temperature(value: f64, from_unit: &str, to_unit: &str) -> Result<f64> {
    let (from, to) = match (
        from_unit.parse::<TemperatureUnit>(),
        to_unit.parse::<TemperatureUnit>(),
    ) {
        (Ok(from), Ok(to)) => (from, to),
        _ => {
            return Err(ConverterError::invalid_unit(
                Measure::Temperature,
                from_unit,
                to_unit,
            ))
        }
    };

    if from == to {
        return Ok(value);
    }

    Ok(to.from_celsius(from.to_celsius(value)))
}

/// Dispatches to the converter of `measure`.
pub fn convert(measure: Measure, request: &ConversionRequest) -> Result<ConversionResult> {
    let converted_value = match measure {
        Measure::Length => convert_length(request.value, &request.from_unit, &request.to_unit)?,
        Measure::Weight => convert_weight(request.value, &request.from_unit, &request.to_unit)?,
        Measure::Temperature => {
            convert_temperature(request.value, &request.from_unit, &request.to_unit)?
        }
    };

    tracing::debug!(
        %measure,
        value = request.value,
        from = %request.from_unit,
        to = %request.to_unit,
        converted_value,
        "converted"
    );

    Ok(ConversionResult { converted_value })
}

fn convert_ratio<U: RatioUnit>(
    measure: Measure,
    value: f64,
    from_unit: &str,
    to_unit: &str,
) -> Result<f64> {
    match (from_unit.parse::<U>(), to_unit.parse::<U>()) {
        (Ok(from), Ok(to)) => {
            let converted = if from == to {
                value
            } else {
                // Factor ratio first only when the product alone overflows.
                let direct = value * from.factor() / to.factor();
                if direct.is_finite() {
                    direct
                } else {
                    value * (from.factor() / to.factor())
                }
            };
            if converted.is_finite() {
                Ok(converted)
            } else {
                Err(ConverterError::InvalidValue {
                    value: value.to_string(),
                    reason: format!("{from_unit} to {to_unit} overflows the numeric range"),
                })
            }
        }
        _ => Err(ConverterError::invalid_unit(measure, from_unit, to_unit)),
    }
}

/// Rounds the exact binary value to `places` decimals, ties to even.
/// Decimal formatting is correctly rounded and never overflows.
fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LENGTH_CODES: [&str; 8] = ["mm", "cm", "m", "km", "in", "ft", "yd", "mi"];
    const WEIGHT_CODES: [&str; 5] = ["mg", "g", "kg", "oz", "lb"];
    const TEMPERATURE_CODES: [&str; 3] = ["C", "F", "K"];

    #[test]
    fn test_length_known_values() {
        assert_eq!(convert_length(1000.0, "mm", "m").unwrap(), 1.0);
        assert_eq!(convert_length(1.0, "mi", "km").unwrap(), 1.609);
        assert_eq!(convert_length(1.0, "m", "in").unwrap(), 39.37);
        assert_eq!(convert_length(3.0, "ft", "yd").unwrap(), 1.0);
        assert_eq!(convert_length(-2.5, "km", "m").unwrap(), -2500.0);
        assert_eq!(convert_length(0.0, "in", "cm").unwrap(), 0.0);
    }

    #[test]
    fn test_length_rounds_to_three_decimals() {
        // 1 in = 0.0254 m
        assert_eq!(convert_length(1.0, "in", "m").unwrap(), 0.025);
        // 1 ft = 0.000189394... mi
        assert_eq!(convert_length(1.0, "ft", "mi").unwrap(), 0.0);
        assert_eq!(convert_length(100.0, "ft", "mi").unwrap(), 0.019);
    }

    #[test]
    fn test_rounding_uses_exact_binary_value() {
        // 20.4425 is stored just below the tie
        assert_eq!(convert_length(20.4425, "mm", "mm").unwrap(), 20.442);
        assert_eq!(convert_length(602.082, "in", "ft").unwrap(), 50.173);
    }

    #[test]
    fn test_identity_holds_for_large_values() {
        assert_eq!(convert_length(1e306, "m", "m").unwrap(), 1e306);
        assert_eq!(convert_weight(1e305, "g", "g").unwrap(), 1e305);
        assert_eq!(convert_length(-1e306, "km", "km").unwrap(), -1e306);
    }

    #[test]
    fn test_overflowing_conversion_is_rejected() {
        assert!(matches!(
            convert_length(1e306, "km", "mm"),
            Err(ConverterError::InvalidValue { .. })
        ));
        assert!(convert_weight(f64::MAX, "kg", "mg").is_err());
    }

    #[test]
    fn test_large_values_convert_when_result_fits() {
        // 1e306 km is 1e309 m, but fewer miles than f64::MAX
        let miles = convert_length(1e306, "km", "mi").unwrap();
        assert!(miles.is_finite());
        assert!((miles / 6.2137e302 - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_weight_known_values() {
        assert_eq!(convert_weight(1.0, "kg", "g").unwrap(), 1000.0);
        assert_eq!(convert_weight(16.0, "oz", "lb").unwrap(), 1.0);
        assert_eq!(convert_weight(1.0, "lb", "kg").unwrap(), 0.4536);
        assert_eq!(convert_weight(500.0, "mg", "g").unwrap(), 0.5);
    }

    #[test]
    fn test_weight_rounds_to_four_decimals() {
        // 1 g = 0.0352740... oz
        assert_eq!(convert_weight(1.0, "g", "oz").unwrap(), 0.0353);
        assert_eq!(convert_weight(1.0, "mg", "kg").unwrap(), 0.0);
    }

    #[test]
    fn test_temperature_known_values() {
        assert_eq!(convert_temperature(0.0, "C", "F").unwrap(), 32.0);
        assert_eq!(convert_temperature(212.0, "F", "C").unwrap(), 100.0);
        assert_eq!(convert_temperature(0.0, "K", "C").unwrap(), -273.15);
        assert_eq!(convert_temperature(100.0, "C", "K").unwrap(), 373.15);
        assert_eq!(convert_temperature(-40.0, "F", "C").unwrap(), -40.0);
    }

    #[test]
    fn test_temperature_is_not_rounded() {
        let f = convert_temperature(1.0, "C", "F").unwrap();
        assert!((f - 33.8).abs() < 1e-12);
        let c = convert_temperature(100.0, "F", "C").unwrap();
        assert!((c - 37.777_777_777_777_78).abs() < 1e-9);
        assert_ne!(c, 37.778);
    }

    #[test]
    fn test_temperature_identity_returns_value_unchanged() {
        for code in TEMPERATURE_CODES {
            assert_eq!(convert_temperature(36.6125, code, code).unwrap(), 36.6125);
            assert_eq!(convert_temperature(-0.123_456_789, code, code).unwrap(), -0.123_456_789);
        }
    }

    #[test]
    fn test_identity_law_for_ratio_domains() {
        for code in LENGTH_CODES {
            assert_eq!(convert_length(12.345, code, code).unwrap(), 12.345, "{code}");
        }
        for code in WEIGHT_CODES {
            assert_eq!(convert_weight(12.3456, code, code).unwrap(), 12.3456, "{code}");
        }
    }

    #[test]
    fn test_round_trip_within_precision() {
        let value = 7.0;
        for from in LENGTH_CODES {
            for to in LENGTH_CODES {
                let there = convert_length(value, from, to).unwrap();
                let back = convert_length(there, to, from).unwrap();
                // Rounding the intermediate value loses at most half a unit of
                // the third decimal in the target unit, scaled back.
                let tolerance = 0.0005 * factor_ratio::<LengthUnit>(to, from) + 0.0005 + 1e-9;
                assert!((back - value).abs() <= tolerance, "{from}->{to}: {back}");
            }
        }
        for from in WEIGHT_CODES {
            for to in WEIGHT_CODES {
                let there = convert_weight(value, from, to).unwrap();
                let back = convert_weight(there, to, from).unwrap();
                let tolerance = 0.000_05 * factor_ratio::<WeightUnit>(to, from) + 0.000_05 + 1e-9;
                assert!((back - value).abs() <= tolerance, "{from}->{to}: {back}");
            }
        }
        for from in TEMPERATURE_CODES {
            for to in TEMPERATURE_CODES {
                let there = convert_temperature(value, from, to).unwrap();
                let back = convert_temperature(there, to, from).unwrap();
                assert!((back - value).abs() < 1e-9, "{from}->{to}: {back}");
            }
        }
    }

    fn factor_ratio<U: RatioUnit>(from: &str, to: &str) -> f64 {
        let from: U = from.parse().unwrap();
        let to: U = to.parse().unwrap();
        from.factor() / to.factor()
    }

    #[test]
    fn test_invalid_units_fail_in_every_domain() {
        assert!(matches!(
            convert_length(1.0, "xx", "m"),
            Err(ConverterError::InvalidUnit { measure: Measure::Length, .. })
        ));
        assert!(matches!(
            convert_weight(1.0, "kg", "xx"),
            Err(ConverterError::InvalidUnit { measure: Measure::Weight, .. })
        ));
        assert!(matches!(
            convert_temperature(1.0, "xx", "C"),
            Err(ConverterError::InvalidUnit { measure: Measure::Temperature, .. })
        ));
        // units from another domain are rejected too
        assert!(convert_length(1.0, "kg", "g").is_err());
        assert!(convert_weight(1.0, "m", "km").is_err());
    }

    #[test]
    fn test_same_invalid_code_is_still_rejected() {
        assert!(convert_temperature(5.0, "xx", "xx").is_err());
        assert!(convert_length(5.0, "xx", "xx").is_err());
    }

    #[test]
    fn test_convert_dispatches_by_measure() {
        let request = ConversionRequest {
            value: 1.0,
            from_unit: "mi".to_string(),
            to_unit: "km".to_string(),
        };
        assert_eq!(
            convert(Measure::Length, &request).unwrap(),
            ConversionResult { converted_value: 1.609 }
        );
        assert!(convert(Measure::Weight, &request).is_err());
    }
}
