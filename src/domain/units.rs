use std::fmt;
use std::str::FromStr;

/// A measurement domain served by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Length,
    Weight,
    Temperature,
}

impl Measure {
    pub const ALL: [Measure; 3] = [Measure::Length, Measure::Weight, Measure::Temperature];

    pub fn label(self) -> &'static str {
        match self {
            Measure::Length => "Length",
            Measure::Weight => "Weight",
            Measure::Temperature => "Temperature",
        }
    }

    /// Route serving conversions for this domain.
    pub fn endpoint(self) -> &'static str {
        match self {
            Measure::Length => "/length_conversion",
            Measure::Weight => "/weight_conversion",
            Measure::Temperature => "/temp_conversion",
        }
    }

    /// `(code, name)` pairs offered by this domain's form.
    pub fn choices(self) -> Vec<(&'static str, &'static str)> {
        match self {
            Measure::Length => LengthUnit::ALL.iter().map(|u| (u.code(), u.name())).collect(),
            Measure::Weight => WeightUnit::ALL.iter().map(|u| (u.code(), u.name())).collect(),
            Measure::Temperature => TemperatureUnit::ALL
                .iter()
                .map(|u| (u.code(), u.name()))
                .collect(),
        }
    }

    /// Units preselected in the form, as `(from, to)` codes.
    pub fn default_units(self) -> (&'static str, &'static str) {
        match self {
            Measure::Length => (LengthUnit::Meter.code(), LengthUnit::Inch.code()),
            Measure::Weight => (WeightUnit::Milligram.code(), WeightUnit::Kilogram.code()),
            Measure::Temperature => (
                TemperatureUnit::Celsius.code(),
                TemperatureUnit::Fahrenheit.code(),
            ),
        }
    }

    pub fn is_valid_code(self, code: &str) -> bool {
        match self {
            Measure::Length => code.parse::<LengthUnit>().is_ok(),
            Measure::Weight => code.parse::<WeightUnit>().is_ok(),
            Measure::Temperature => code.parse::<TemperatureUnit>().is_ok(),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Measure::Length => "length",
            Measure::Weight => "weight",
            Measure::Temperature => "temperature",
        })
    }
}

/// Returned when a code is not part of a unit table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUnit(pub String);

impl fmt::Display for UnknownUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown unit code: {}", self.0)
    }
}

impl std::error::Error for UnknownUnit {}

/// Units whose conversions are a pure ratio of a common base unit.
pub trait RatioUnit: Copy + PartialEq + FromStr<Err = UnknownUnit> {
    /// Size of one unit expressed in the domain's base unit.
    fn factor(self) -> f64;
}

macro_rules! unit_table {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($code:literal, $label:literal $(, $factor:expr)?)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownUnit;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    other => Err(UnknownUnit(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }

        unit_table!(@factor $name { $($variant $(=> $factor)?),+ });
    };

    (@factor $name:ident { $($variant:ident => $factor:expr),+ }) => {
        impl RatioUnit for $name {
            fn factor(self) -> f64 {
                match self {
                    $($name::$variant => $factor),+
                }
            }
        }
    };

    (@factor $name:ident { $($variant:ident),+ }) => {};
}

unit_table! {
    /// Length units, base meter.
    LengthUnit {
        Millimeter => ("mm", "Millimeter", 0.001),
        Centimeter => ("cm", "Centimeter", 0.01),
        Meter => ("m", "Meter", 1.0),
        Kilometer => ("km", "Kilometer", 1000.0),
        Inch => ("in", "Inch", 0.0254),
        Foot => ("ft", "Foot", 0.3048),
        Yard => ("yd", "Yard", 0.9144),
        Mile => ("mi", "Mile", 1609.34),
    }
}

unit_table! {
    /// Weight units, base gram.
    WeightUnit {
        Milligram => ("mg", "Milligram", 0.001),
        Gram => ("g", "Gram", 1.0),
        Kilogram => ("kg", "Kilogram", 1000.0),
        Ounce => ("oz", "Ounce", 28.3495),
        Pound => ("lb", "Pound", 453.592),
    }
}

unit_table! {
    /// Temperature scales. These are affine, so they carry no ratio factor.
    TemperatureUnit {
        Celsius => ("C", "Celsius"),
        Fahrenheit => ("F", "Fahrenheit"),
        Kelvin => ("K", "Kelvin"),
    }
}

impl TemperatureUnit {
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureUnit::Kelvin => value - 273.15,
        }
    }

    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            TemperatureUnit::Kelvin => celsius + 273.15,
        }
    }
}
