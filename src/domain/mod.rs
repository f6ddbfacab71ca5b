// Domain layer: unit tables and request/response models. No HTTP types here.

pub mod model;
pub mod units;

pub use model::{ConversionPayload, ConversionRequest, ConversionResult};
pub use units::{LengthUnit, Measure, RatioUnit, TemperatureUnit, UnknownUnit, WeightUnit};
