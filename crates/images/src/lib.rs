//! Image cache, conversion pipeline and reference resolution for exports.

pub mod convert;
pub mod error;
pub mod resolve;
pub mod store;

pub use convert::{ConvertOptions, ConvertedImage, convert_to_jpeg, generate_key, import_image};
pub use error::{ImageError, Result};
pub use resolve::{IMAGES_DIR, ImageResolver, ImageSource, PLACEHOLDER_PATH, ResolvedImage};
pub use store::{CachedImage, FsImageStore, ImageMetadata, ImageStore, MemoryImageStore};
