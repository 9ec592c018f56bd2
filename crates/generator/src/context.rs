use sitekit_core::SiteData;
use sitekit_core::color_or;
use sitekit_core::config::ExportConfig;
use sitekit_images::{ImageResolver, ImageStore, ResolvedImage};
use std::collections::BTreeSet;

/// Third-party scripts a page pulls from the CDN when an element needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CdnLibrary {
    QrCode,
    Prism,
}

impl CdnLibrary {
    pub fn script_url(&self, cdn_base: &str) -> String {
        match self {
            CdnLibrary::QrCode => format!("{}/qrcode@1.4.4/build/qrcode.min.js", cdn_base),
            CdnLibrary::Prism => format!("{}/prismjs@1.29.0/prism.min.js", cdn_base),
        }
    }

    pub fn stylesheet_url(&self, cdn_base: &str) -> Option<String> {
        match self {
            CdnLibrary::QrCode => None,
            CdnLibrary::Prism => Some(format!("{}/prismjs@1.29.0/themes/prism.min.css", cdn_base)),
        }
    }
}

/// Mutable state threaded through rendering of one export.
///
/// Owns the image resolver (so every bundled image is collected once) and
/// tracks the CDN libraries used by the page currently being rendered.
pub struct RenderContext<'a> {
    resolver: ImageResolver<'a>,
    libraries: BTreeSet<CdnLibrary>,
    next_id: usize,
    unsupported: usize,
    pub allow_embed_html: bool,
    /// Validated theme primary color, used as the default accent.
    pub accent: String,
}

impl<'a> RenderContext<'a> {
    pub fn new(site: &SiteData, store: &'a dyn ImageStore, config: &ExportConfig) -> Self {
        Self {
            resolver: ImageResolver::new(store),
            libraries: BTreeSet::new(),
            next_id: 0,
            unsupported: 0,
            allow_embed_html: config.features.allow_embed_html,
            accent: color_or(Some(&site.theme.primary_color), "#4f46e5"),
        }
    }

    /// Escaped-ready `src` for an image reference (placeholder when unresolved).
    pub fn image_src(&mut self, reference: &str) -> String {
        self.resolver.src(reference)
    }

    pub fn resolve_image(&mut self, reference: &str) -> ResolvedImage {
        self.resolver.resolve(reference)
    }

    pub fn require(&mut self, library: CdnLibrary) {
        self.libraries.insert(library);
    }

    /// Libraries required since the last call; resets for the next page.
    pub fn take_libraries(&mut self) -> BTreeSet<CdnLibrary> {
        std::mem::take(&mut self.libraries)
    }

    /// Unique DOM id for interactive elements (`acc-1`, `tabs-2`, ...).
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    /// Accent color from an element override, else the theme primary.
    pub fn accent_or(&self, color: Option<&str>) -> String {
        color_or(color, &self.accent)
    }

    /// Record an element that was left out of the page.
    pub fn note_unsupported(&mut self) {
        self.unsupported += 1;
    }

    pub fn unsupported_elements(&self) -> usize {
        self.unsupported
    }

    pub fn unresolved_images(&self) -> Vec<String> {
        self.resolver.unresolved().to_vec()
    }

    /// Image files collected while rendering.
    pub fn into_assets(self) -> Vec<(String, Vec<u8>)> {
        self.resolver.into_assets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_images::MemoryImageStore;

    #[test]
    fn test_libraries_reset_per_page() {
        let store = MemoryImageStore::new();
        let site = SiteData::default();
        let mut ctx = RenderContext::new(&site, &store, &ExportConfig::default());

        ctx.require(CdnLibrary::Prism);
        ctx.require(CdnLibrary::QrCode);
        ctx.require(CdnLibrary::Prism);
        let libs: Vec<_> = ctx.take_libraries().into_iter().collect();
        assert_eq!(libs, vec![CdnLibrary::QrCode, CdnLibrary::Prism]);
        assert!(ctx.take_libraries().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let store = MemoryImageStore::new();
        let site = SiteData::default();
        let mut ctx = RenderContext::new(&site, &store, &ExportConfig::default());
        assert_eq!(ctx.next_id("acc"), "acc-1");
        assert_eq!(ctx.next_id("tabs"), "tabs-2");
    }

    #[test]
    fn test_accent_falls_back_to_theme() {
        let store = MemoryImageStore::new();
        let mut site = SiteData::default();
        site.theme.primary_color = "#FF0000".to_string();
        let ctx = RenderContext::new(&site, &store, &ExportConfig::default());
        assert_eq!(ctx.accent_or(None), "#ff0000");
        assert_eq!(ctx.accent_or(Some("bogus;")), "#ff0000");
        assert_eq!(ctx.accent_or(Some("#00F")), "#00f");
    }

    #[test]
    fn test_cdn_urls() {
        let base = "https://cdn.test/npm";
        assert_eq!(
            CdnLibrary::QrCode.script_url(base),
            "https://cdn.test/npm/qrcode@1.4.4/build/qrcode.min.js"
        );
        assert!(CdnLibrary::QrCode.stylesheet_url(base).is_none());
        assert!(CdnLibrary::Prism.stylesheet_url(base).is_some());
    }
}
