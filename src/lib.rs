pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::{routes::router, server::Server, AppState};
pub use config::{AppConfig, CliConfig};
pub use crate::core::converter::{convert, convert_length, convert_temperature, convert_weight};
pub use domain::{ConversionRequest, ConversionResult, Measure};
pub use utils::error::{ConverterError, Result};
