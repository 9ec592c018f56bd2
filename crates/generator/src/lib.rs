//! Static site generation: site data in, HTML/CSS/JS/images out.

pub mod bundle;
pub mod chart;
pub mod context;
pub mod elements;
pub mod export;
pub mod features;
pub mod html;
pub mod layout;
pub mod legal;
pub mod script;
pub mod sitemap;
pub mod styles;

pub use bundle::{write_dir, write_zip};
pub use export::{ExportReport, SkippedFeature, export_site, export_site_on};
pub use html::html_escape;
pub use script::generate_app_js;
pub use styles::generate_styles;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// An optional feature could not be produced; the export goes on without it.
    #[error("{feature}: {reason}")]
    Feature {
        feature: &'static str,
        reason: String,
    },

    #[error("Invalid output path '{0}'")]
    InvalidPath(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to write ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Files produced by an export, paths relative to the site root.
#[derive(Debug, Clone, Default)]
pub struct GeneratedSite {
    pub pages: Vec<(String, String)>,   // (path, contents)
    pub assets: Vec<(String, Vec<u8>)>, // (path, data)
}

impl GeneratedSite {
    pub fn page(&self, path: &str) -> Option<&str> {
        self.pages
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, html)| html.as_str())
    }

    pub fn asset(&self, path: &str) -> Option<&[u8]> {
        self.assets
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, data)| data.as_slice())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.page(path).is_some() || self.asset(path).is_some()
    }

    /// Every output path, pages first.
    pub fn paths(&self) -> Vec<&str> {
        self.pages
            .iter()
            .map(|(p, _)| p.as_str())
            .chain(self.assets.iter().map(|(p, _)| p.as_str()))
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.pages.len() + self.assets.len()
    }

    pub fn total_bytes(&self) -> u64 {
        let pages: usize = self.pages.iter().map(|(_, s)| s.len()).sum();
        let assets: usize = self.assets.iter().map(|(_, d)| d.len()).sum();
        (pages + assets) as u64
    }
}
