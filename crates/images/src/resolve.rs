//! Map image references found in site data to files in the exported bundle.
//!
//! Site data links images to the cache by convention only. A reference may be
//! a cache key, a path from a previous export, the user's original file name,
//! the `blob:` URL the editor displayed, an inline `data:` URL, or an external
//! URL. [`ImageResolver`] tries each interpretation in turn and falls back to a
//! placeholder, so rendering never fails because of an image.

use crate::store::{ImageMetadata, ImageStore};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

/// Directory of bundled images inside the export.
pub const IMAGES_DIR: &str = "assets/images";
pub const PLACEHOLDER_PATH: &str = "assets/images/placeholder.svg";

pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="450" viewBox="0 0 800 450">
  <rect width="800" height="450" fill="#e5e7eb"/>
  <path d="M330 270l50-60 40 45 30-35 70 80H280z" fill="#9ca3af"/>
  <circle cx="350" cy="180" r="22" fill="#9ca3af"/>
  <text x="400" y="340" font-family="sans-serif" font-size="20" fill="#6b7280" text-anchor="middle">Image unavailable</text>
</svg>
"##;

/// Which heuristic matched a bundled image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    CacheKey,
    ExportedPath,
    OriginalName,
    BlobUrl,
    DataUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImage {
    /// Written into the bundle at `path`.
    Bundled { path: String, source: ImageSource },
    /// Left as-is (absolute or non-base64 data URL).
    External(String),
    Placeholder,
}

impl ResolvedImage {
    /// Value for `src`/`url()` in generated pages (pages live at the bundle root).
    pub fn src(&self) -> &str {
        match self {
            ResolvedImage::Bundled { path, .. } => path,
            ResolvedImage::External(url) => url,
            ResolvedImage::Placeholder => PLACEHOLDER_PATH,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ResolvedImage::Placeholder)
    }
}

pub struct ImageResolver<'a> {
    store: &'a dyn ImageStore,
    bundled: BTreeMap<String, Vec<u8>>,
    resolved: HashMap<String, ResolvedImage>,
    index: Option<Vec<ImageMetadata>>,
    unresolved: Vec<String>,
    placeholder_used: bool,
}

impl<'a> ImageResolver<'a> {
    pub fn new(store: &'a dyn ImageStore) -> Self {
        Self {
            store,
            bundled: BTreeMap::new(),
            resolved: HashMap::new(),
            index: None,
            unresolved: Vec::new(),
            placeholder_used: false,
        }
    }

    /// Resolve one reference. Results are memoized per reference string.
    pub fn resolve(&mut self, reference: &str) -> ResolvedImage {
        let reference = reference.trim();
        if let Some(done) = self.resolved.get(reference) {
            return done.clone();
        }

        let result = self.resolve_uncached(reference);
        if result.is_placeholder() {
            self.placeholder_used = true;
            if !reference.is_empty() {
                log::warn!("Image '{}' not found in cache, using placeholder", reference);
                self.unresolved.push(reference.to_string());
            }
        }
        self.resolved.insert(reference.to_string(), result.clone());
        result
    }

    /// Shorthand for `resolve(reference).src().to_string()`.
    pub fn src(&mut self, reference: &str) -> String {
        self.resolve(reference).src().to_string()
    }

    fn resolve_uncached(&mut self, reference: &str) -> ResolvedImage {
        if reference.is_empty() {
            return ResolvedImage::Placeholder;
        }

        let lower = reference.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") || reference.starts_with("//")
        {
            return ResolvedImage::External(reference.to_string());
        }

        if lower.starts_with("data:") {
            return self.bundle_data_url(reference);
        }

        if let Some(found) = self.bundle_key(reference, ImageSource::CacheKey) {
            return found;
        }

        if let Some(key) = exported_key(reference)
            && let Some(found) = self.bundle_key(key, ImageSource::ExportedPath)
        {
            return found;
        }

        if lower.starts_with("blob:") {
            let key = self
                .index()
                .iter()
                .find(|m| m.source_url.as_deref() == Some(reference))
                .map(|m| m.key.clone());
            if let Some(key) = key
                && let Some(found) = self.bundle_key(&key, ImageSource::BlobUrl)
            {
                return found;
            }
            return ResolvedImage::Placeholder;
        }

        let name = basename(reference);
        let key = self
            .index()
            .iter()
            .find(|m| !m.original_name.is_empty() && m.original_name.eq_ignore_ascii_case(name))
            .map(|m| m.key.clone());
        if let Some(key) = key
            && let Some(found) = self.bundle_key(&key, ImageSource::OriginalName)
        {
            return found;
        }

        ResolvedImage::Placeholder
    }

    fn index(&mut self) -> &[ImageMetadata] {
        if self.index.is_none() {
            let listed = self.store.list().unwrap_or_else(|e| {
                log::warn!("Could not list image cache: {}", e);
                Vec::new()
            });
            self.index = Some(listed);
        }
        self.index.as_deref().unwrap_or_default()
    }

    fn bundle_key(&mut self, key: &str, source: ImageSource) -> Option<ResolvedImage> {
        let path = format!("{}/{}", IMAGES_DIR, key);
        if self.bundled.contains_key(&path) {
            return Some(ResolvedImage::Bundled { path, source });
        }

        match self.store.get(key) {
            Ok(Some(cached)) => {
                log::debug!("resolved image {} via {:?}", key, source);
                self.bundled.insert(path.clone(), cached.bytes);
                Some(ResolvedImage::Bundled { path, source })
            }
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read cached image {}: {}", key, e);
                None
            }
        }
    }

    fn bundle_data_url(&mut self, reference: &str) -> ResolvedImage {
        let Some((header, payload)) = reference
            .get("data:".len()..)
            .and_then(|rest| rest.split_once(','))
        else {
            return ResolvedImage::Placeholder;
        };

        let Some(mime) = header.strip_suffix(";base64") else {
            // Percent-encoded payloads (typically inline SVG) work as-is in src attributes.
            return ResolvedImage::External(reference.to_string());
        };

        let bytes = match STANDARD.decode(payload.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Invalid base64 image data: {}", e);
                return ResolvedImage::Placeholder;
            }
        };

        let ext = mime_guess::get_mime_extensions_str(mime)
            .and_then(|exts| exts.first().copied())
            .map(|e| if e == "jpe" { "jpg" } else { e })
            .unwrap_or("bin");
        let digest = Sha256::digest(&bytes);
        let hash: String = digest.iter().take(6).map(|b| format!("{:02x}", b)).collect();
        let path = format!("{}/inline-{}.{}", IMAGES_DIR, hash, ext);

        self.bundled.entry(path.clone()).or_insert(bytes);
        ResolvedImage::Bundled {
            path,
            source: ImageSource::DataUrl,
        }
    }

    /// References that fell back to the placeholder, in first-seen order.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// Files to write into the bundle, including the placeholder when used.
    pub fn into_assets(self) -> Vec<(String, Vec<u8>)> {
        let mut assets: Vec<(String, Vec<u8>)> = self.bundled.into_iter().collect();
        if self.placeholder_used {
            assets.push((
                PLACEHOLDER_PATH.to_string(),
                PLACEHOLDER_SVG.as_bytes().to_vec(),
            ));
        }
        assets
    }
}

/// Cache key inside a path written by an earlier export, e.g.
/// `./assets/images/photo-abc.jpg` -> `photo-abc.jpg`.
fn exported_key(reference: &str) -> Option<&str> {
    let trimmed = reference.trim_start_matches("./").trim_start_matches('/');
    let trimmed = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
    trimmed
        .strip_prefix("assets/images/")
        .or_else(|| trimmed.strip_prefix("images/"))
        .filter(|k| !k.is_empty() && !k.contains('/'))
}

fn basename(reference: &str) -> &str {
    let without_query = reference.split(['?', '#']).next().unwrap_or(reference);
    without_query
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(without_query)
}
