pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod storage;

pub use config::IconConfig;
pub use crate::core::{BadgeRenderer, BatchReport, IconPipeline, PixelBuffer, PngEncoder};
pub use error::IconError;
