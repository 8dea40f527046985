pub mod checksum;
pub mod chunk;
pub mod encoder;
pub mod pipeline;
pub mod pixel;
pub mod raster;
pub mod shape;

pub use checksum::{crc32, Crc32, CRC_TABLE};
pub use chunk::{frame_chunk, ChunkTag};
pub use encoder::{validate_dimensions, ImageHeader, PngEncoder, PNG_SIGNATURE};
pub use pipeline::{BatchReport, IconPipeline, SizeFailure, WrittenIcon};
pub use pixel::PixelBuffer;
pub use raster::{BadgeLayout, BadgeRenderer, LayerCoverage, SUBSAMPLES};
pub use shape::{Footprint, Rgb, Shape, ShapeKind, BADGE_LAYERS, LAYER_COUNT};
