pub mod converter;

pub use converter::{convert, convert_length, convert_temperature, convert_weight};
pub use crate::domain::model::{ConversionRequest, ConversionResult};
pub use crate::utils::error::Result;
