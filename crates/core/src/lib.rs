pub mod color;
pub mod config;
pub mod elements;
pub mod error;
pub mod types;

pub use color::{color_or, parse_color};
pub use config::{ExportConfig, ExportMode, parse_export_toml, parse_site_json};
pub use elements::ContentElement;
pub use error::{Error, Result};
pub use types::*;
