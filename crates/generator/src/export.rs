//! Single- and multi-page exporters.
//!
//! Every optional feature runs as its own step: if it fails, the failure is
//! logged, recorded in [`ExportReport::skipped`], and the export continues
//! without it. Only the core pages are unconditional.

use crate::bundle::validate_bundle_path;
use crate::context::RenderContext;
use crate::features::{age_gate, cookie_banner, live_chat, thank_you_body};
use crate::html::{PageMeta, page_shell};
use crate::layout::{
    NavItem, has_contact, render_contact, render_footer, render_header, render_hero,
    render_section, render_section_teaser,
};
use crate::legal::{LegalPage, render_legal_body};
use crate::script::generate_app_js;
use crate::sitemap::{generate_robots, generate_sitemap};
use crate::styles::generate_styles;
use crate::{ExportError, GeneratedSite};
use chrono::{Datelike, NaiveDate, Utc};
use sitekit_core::config::{ExportConfig, ExportMode};
use sitekit_core::SiteData;
use sitekit_images::{ImageStore, PLACEHOLDER_PATH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFeature {
    pub feature: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub skipped: Vec<SkippedFeature>,
    /// Image references that were replaced by the placeholder.
    pub unresolved_images: Vec<String>,
    pub unsupported_elements: usize,
}

impl ExportReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.unresolved_images.is_empty()
    }

    fn skip(&mut self, feature: &str, reason: String) {
        log::warn!("Skipping {}: {}", feature, reason);
        self.skipped.push(SkippedFeature {
            feature: feature.to_string(),
            reason,
        });
    }

    /// Run an optional step, recording a failure instead of propagating it.
    fn step<T>(&mut self, feature: &str, f: impl FnOnce() -> Result<T, ExportError>) -> Option<T> {
        match f() {
            Ok(value) => Some(value),
            Err(ExportError::Feature { reason, .. }) => {
                self.skip(feature, reason);
                None
            }
            Err(e) => {
                self.skip(feature, e.to_string());
                None
            }
        }
    }
}

/// Export with today's date for sitemap and legal pages.
pub fn export_site(
    site: &SiteData,
    store: &dyn ImageStore,
    config: &ExportConfig,
) -> (GeneratedSite, ExportReport) {
    export_site_on(site, store, config, Utc::now().date_naive())
}

/// Where a page sits, for rewriting `#anchor` links.
#[derive(Clone, Copy, PartialEq, Eq)]
enum PageKind {
    Index,
    Other,
}

struct Exporter<'s> {
    site: &'s SiteData,
    config: &'s ExportConfig,
    slugs: Vec<String>,
    today: NaiveDate,
    legal: Vec<LegalPage>,
    show_contact: bool,
    /// Cookie banner, age gate and chat markup appended to every page.
    overlays: String,
}

impl Exporter<'_> {
    fn mode(&self) -> ExportMode {
        self.config.mode
    }

    /// Rewrite an in-page anchor for the page it appears on.
    ///
    /// Multi-page exports send section anchors to the section's own page;
    /// anchors on secondary pages point back to `index.html`.
    fn resolve_href(&self, href: &str, page: PageKind) -> String {
        let href = href.trim();
        let Some(anchor) = href.strip_prefix('#') else {
            return href.to_string();
        };
        if self.mode() == ExportMode::Multi && self.slugs.iter().any(|s| s == anchor) {
            return format!("{}.html", anchor);
        }
        if anchor.is_empty() || anchor == "top" {
            return match page {
                PageKind::Index => "#top".to_string(),
                PageKind::Other => "index.html".to_string(),
            };
        }
        match page {
            PageKind::Index => href.to_string(),
            PageKind::Other => format!("index.html{}", href),
        }
    }

    fn nav_items(&self, page: PageKind) -> Vec<NavItem> {
        let links = &self.site.header.nav_links;
        if !links.is_empty() {
            return links
                .iter()
                .filter(|l| !l.label.trim().is_empty())
                .map(|l| NavItem {
                    label: l.label.clone(),
                    href: self.resolve_href(&l.href, page),
                })
                .collect();
        }

        let mut items: Vec<NavItem> = self
            .site
            .sections
            .iter()
            .zip(&self.slugs)
            .map(|(section, slug)| NavItem {
                label: if section.title.trim().is_empty() {
                    slug.clone()
                } else {
                    section.title.clone()
                },
                href: self.resolve_href(&format!("#{}", slug), page),
            })
            .collect();
        if self.show_contact {
            items.push(NavItem {
                label: self.site.contact.title.clone(),
                href: self.resolve_href("#contact", page),
            });
        }
        items
    }

    fn document(
        &self,
        ctx: &mut RenderContext<'_>,
        file_name: &str,
        title: String,
        main: &str,
        page: PageKind,
    ) -> String {
        let header = render_header(self.site, &self.nav_items(page), ctx);
        let footer = render_footer(self.site, &self.legal, self.today.year());
        let body = format!("{}\n{}\n{}", header, main, footer);
        let libraries = ctx.take_libraries();
        page_shell(
            self.site,
            &PageMeta {
                file_name,
                title,
                description: &self.site.seo.description,
            },
            &body,
            &self.overlays,
            &libraries,
            &self.config.cdn_base,
        )
    }

    fn hero(&self, ctx: &mut RenderContext<'_>, report: &mut ExportReport) -> String {
        let background = self
            .site
            .hero
            .background_image
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .and_then(|reference| {
                report.step("hero image", || {
                    let image = ctx.resolve_image(reference);
                    if image.is_placeholder() {
                        return Err(ExportError::Feature {
                            feature: "hero image",
                            reason: format!("'{}' is not in the image cache", reference),
                        });
                    }
                    Ok(image.src().to_string())
                })
            });
        render_hero(
            self.site,
            background.as_deref(),
            &self.resolve_href(&self.site.hero.button_link, PageKind::Index),
        )
    }

    fn index_page(&self, ctx: &mut RenderContext<'_>, report: &mut ExportReport) -> String {
        let mut main = vec![self.hero(ctx, report)];
        for (section, slug) in self.site.sections.iter().zip(&self.slugs) {
            main.push(match self.mode() {
                ExportMode::Single => render_section(section, slug, ctx),
                ExportMode::Multi => render_section_teaser(section, slug),
            });
        }
        if self.show_contact {
            main.push(render_contact(&self.site.contact));
        }
        let main = format!("<main>\n{}\n</main>", main.join("\n"));
        self.document(ctx, "index.html", self.site.site_title(), &main, PageKind::Index)
    }
}

/// Export with an explicit date (used for sitemap `lastmod`, legal pages and
/// the footer year).
pub fn export_site_on(
    site: &SiteData,
    store: &dyn ImageStore,
    config: &ExportConfig,
    today: NaiveDate,
) -> (GeneratedSite, ExportReport) {
    let mut report = ExportReport::default();
    let mut ctx = RenderContext::new(site, store, config);
    let today_str = today.format("%Y-%m-%d").to_string();

    let legal = if config.features.legal_pages {
        LegalPage::ALL.to_vec()
    } else {
        Vec::new()
    };

    let mut overlays = Vec::new();
    if site.age_verification.enabled
        && let Some(html) = report.step("age verification", || age_gate(site))
    {
        overlays.push(html);
    }
    if site.cookie_consent.enabled {
        let policy = legal
            .contains(&LegalPage::CookiePolicy)
            .then(|| LegalPage::CookiePolicy.file_name());
        if let Some(html) = report.step("cookie consent", || cookie_banner(site, policy)) {
            overlays.push(html);
        }
    }
    if site.live_chat.enabled
        && let Some(html) = report.step("live chat", || live_chat(site))
    {
        overlays.push(html);
    }

    let exporter = Exporter {
        site,
        config,
        slugs: site.section_slugs(),
        today,
        legal,
        show_contact: has_contact(&site.contact),
        overlays: overlays.join("\n"),
    };

    let mut out = GeneratedSite::default();
    log::info!(
        "exporting {} section(s) as {:?}",
        site.sections.len(),
        config.mode
    );

    let index = exporter.index_page(&mut ctx, &mut report);
    out.pages.push(("index.html".to_string(), index));

    if config.mode == ExportMode::Multi {
        for (section, slug) in site.sections.iter().zip(&exporter.slugs) {
            let file_name = format!("{}.html", slug);
            let main = format!("<main>\n{}\n</main>", render_section(section, slug, &mut ctx));
            let title = if section.title.trim().is_empty() {
                site.site_title()
            } else {
                format!("{} | {}", section.title.trim(), site.site_title())
            };
            let html = exporter.document(&mut ctx, &file_name, title, &main, PageKind::Other);
            out.pages.push((file_name, html));
        }
    }

    for page in &exporter.legal {
        let body = render_legal_body(*page, site, &today_str);
        let title = format!("{} | {}", page.default_title(), site.site_title());
        let html = exporter.document(&mut ctx, page.file_name(), title, &body, PageKind::Other);
        out.pages.push((page.file_name().to_string(), html));
    }

    if config.features.thank_you_page {
        let title = format!("Thank you | {}", site.site_title());
        let html = exporter.document(&mut ctx, "merci.html", title, thank_you_body(), PageKind::Other);
        out.pages.push(("merci.html".to_string(), html));
    }

    let mut sitemap_written = false;
    if config.features.sitemap {
        let pages: Vec<&str> = out
            .pages
            .iter()
            .map(|(p, _)| p.as_str())
            .filter(|p| *p != "merci.html")
            .collect();
        if let Some(xml) = report.step("sitemap", || {
            generate_sitemap(site.seo.base_url.as_deref(), &pages, &today_str)
        }) {
            out.pages.push(("sitemap.xml".to_string(), xml));
            sitemap_written = true;
        }
    }
    if config.features.robots {
        out.pages.push((
            "robots.txt".to_string(),
            generate_robots(site.seo.base_url.as_deref(), sitemap_written),
        ));
    }

    out.assets.push((
        "assets/css/styles.css".to_string(),
        generate_styles(site).into_bytes(),
    ));
    out.assets.push((
        "assets/js/app.js".to_string(),
        generate_app_js(site).into_bytes(),
    ));

    report.unresolved_images = ctx.unresolved_images();
    report.unsupported_elements = ctx.unsupported_elements();
    for (path, bytes) in ctx.into_assets() {
        // The hero drops an unresolved background instead of showing the placeholder.
        if path == PLACEHOLDER_PATH
            && !out.pages.iter().any(|(_, page)| page.contains(PLACEHOLDER_PATH))
        {
            log::debug!("no page shows the placeholder, leaving it out");
            continue;
        }
        if report
            .step("cached images", || validate_bundle_path(&path))
            .is_some()
        {
            out.assets.push((path, bytes));
        }
    }

    log::info!(
        "export produced {} file(s), {} skipped feature(s)",
        out.file_count(),
        report.skipped.len()
    );
    (out, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_core::config::parse_site_json_str;
    use sitekit_images::{ImageMetadata, MemoryImageStore};

    fn site(json: &str) -> SiteData {
        parse_site_json_str(json).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()
    }

    fn config(mode: ExportMode) -> ExportConfig {
        ExportConfig {
            mode,
            ..Default::default()
        }
    }

    const SITE: &str = r##"{
        "headerData": {"siteName": "Bakery"},
        "heroData": {"title": "Fresh bread", "buttonText": "Order", "buttonLink": "#menu"},
        "sectionsData": [
            {"title": "Menu", "cards": [{"title": "Baguette"}]},
            {"title": "About", "elements": [{"type": "qr-code", "value": "https://bakery.test"}]}
        ],
        "contactData": {"email": "hi@bakery.test"},
        "seo": {"baseUrl": "https://bakery.test"}
    }"##;

    #[test]
    fn test_single_page_export() {
        let store = MemoryImageStore::new();
        let (out, report) = export_site_on(&site(SITE), &store, &config(ExportMode::Single), day());

        let index = out.page("index.html").unwrap();
        assert!(index.contains("id=\"menu\""));
        assert!(index.contains("<h3>Baguette</h3>"));
        assert!(index.contains("id=\"contact\""));
        assert!(index.contains("<a href=\"#menu\">Menu</a>"));
        assert!(index.contains("qrcode.min.js"));
        assert!(!out.contains("menu.html"));

        for path in [
            "privacy-policy.html",
            "cookie-policy.html",
            "terms-of-service.html",
            "merci.html",
            "sitemap.xml",
            "robots.txt",
            "assets/css/styles.css",
            "assets/js/app.js",
        ] {
            assert!(out.contains(path), "missing {}", path);
        }
        assert!(report.skipped.is_empty(), "{:?}", report.skipped);
        assert!(report.is_clean());
    }

    #[test]
    fn test_multi_page_export() {
        let store = MemoryImageStore::new();
        let (out, _) = export_site_on(&site(SITE), &store, &config(ExportMode::Multi), day());

        let index = out.page("index.html").unwrap();
        assert!(index.contains("section-teaser"));
        assert!(!index.contains("<h3>Baguette</h3>"));
        assert!(index.contains("<a href=\"menu.html\">Menu</a>"));
        assert!(index.contains("href=\"menu.html\">Order</a>"));
        assert!(!index.contains("qrcode.min.js"));

        let menu = out.page("menu.html").unwrap();
        assert!(menu.contains("<h3>Baguette</h3>"));
        assert!(menu.contains("<title>Menu | Bakery</title>"));
        assert!(menu.contains("href=\"index.html#contact\""));

        let about = out.page("about.html").unwrap();
        assert!(about.contains("qrcode.min.js"));

        let sitemap = out.page("sitemap.xml").unwrap();
        assert!(sitemap.contains("<loc>https://bakery.test/menu.html</loc>"));
        assert!(sitemap.contains("<lastmod>2030-06-01</lastmod>"));
        assert!(!sitemap.contains("merci.html"));
    }

    #[test]
    fn test_failed_features_are_skipped_not_fatal() {
        let s = site(
            r#"{
                "headerData": {"siteName": "A"},
                "heroData": {"backgroundImage": "missing.jpg"},
                "liveChatData": {"enabled": true, "provider": "tawk"},
                "ageVerification": {"enabled": true, "minimumAge": 0}
            }"#,
        );
        let store = MemoryImageStore::new();
        let (out, report) = export_site_on(&s, &store, &config(ExportMode::Single), day());

        let skipped: Vec<&str> = report.skipped.iter().map(|s| s.feature.as_str()).collect();
        assert_eq!(skipped, vec!["age verification", "live chat", "hero image", "sitemap"]);
        assert_eq!(report.unresolved_images, vec!["missing.jpg".to_string()]);

        let index = out.page("index.html").unwrap();
        assert!(!index.contains("background-image"));
        assert!(!out.contains(PLACEHOLDER_PATH));
        assert!(out.contains("robots.txt"));
        assert_eq!(out.page("robots.txt"), Some("User-agent: *\nAllow: /\n"));
    }

    #[test]
    fn test_overlays_are_on_every_page() {
        let s = site(
            r#"{
                "cookieConsent": {"enabled": true},
                "liveChatData": {"enabled": true, "provider": "crisp", "widgetId": "abc"}
            }"#,
        );
        let store = MemoryImageStore::new();
        let (out, report) = export_site_on(&s, &store, &config(ExportMode::Single), day());
        assert!(report.skipped.iter().all(|s| s.feature == "sitemap"));
        for (path, html) in out.pages.iter().filter(|(p, _)| p.ends_with(".html")) {
            assert!(html.contains("id=\"cookie-banner\""), "{}", path);
            assert!(html.contains("CRISP_WEBSITE_ID"), "{}", path);
        }
        let index = out.page("index.html").unwrap();
        assert!(index.contains("<a href=\"cookie-policy.html\">Learn more</a>"));
    }

    #[test]
    fn test_feature_flags_disable_outputs() {
        let mut cfg = config(ExportMode::Single);
        cfg.features.legal_pages = false;
        cfg.features.thank_you_page = false;
        cfg.features.sitemap = false;
        cfg.features.robots = false;
        let store = MemoryImageStore::new();
        let (out, report) = export_site_on(&site(SITE), &store, &cfg, day());

        let pages: Vec<&str> = out.pages.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(pages, vec!["index.html"]);
        assert!(report.skipped.is_empty());
        assert!(!out.page("index.html").unwrap().contains("legal-links"));
    }

    #[test]
    fn test_cached_images_are_bundled() {
        let mut store = MemoryImageStore::new();
        store
            .save(
                b"jpeg",
                ImageMetadata {
                    key: "bread-0a1b2c3d4e5f.jpg".to_string(),
                    original_name: "bread.png".to_string(),
                    content_type: "image/jpeg".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        let s = site(
            r#"{
                "heroData": {"backgroundImage": "bread.png"},
                "sectionsData": [{"title": "Menu", "cards": [
                    {"title": "A", "image": "assets/images/bread-0a1b2c3d4e5f.jpg"},
                    {"title": "B", "image": "gone.png"}
                ]}]
            }"#,
        );
        let (out, report) = export_site_on(&s, &store, &config(ExportMode::Single), day());

        assert_eq!(out.asset("assets/images/bread-0a1b2c3d4e5f.jpg"), Some(&b"jpeg"[..]));
        assert!(out.contains("assets/images/placeholder.svg"));
        assert_eq!(report.unresolved_images, vec!["gone.png".to_string()]);
        let index = out.page("index.html").unwrap();
        assert!(index.contains("url('assets/images/bread-0a1b2c3d4e5f.jpg')"));
    }

    #[test]
    fn test_nav_links_are_rewritten_per_mode() {
        let s = site(
            r##"{
                "headerData": {"navLinks": [
                    {"label": "Menu", "href": "#menu"},
                    {"label": "Contact", "href": "#contact"},
                    {"label": "Blog", "href": "https://blog.test"}
                ]},
                "sectionsData": [{"title": "Menu"}],
                "contactData": {"email": "a@b.test"}
            }"##,
        );
        let store = MemoryImageStore::new();
        let (out, _) = export_site_on(&s, &store, &config(ExportMode::Multi), day());
        let index = out.page("index.html").unwrap();
        assert!(index.contains("<a href=\"menu.html\">Menu</a>"));
        assert!(index.contains("<a href=\"#contact\">Contact</a>"));
        let legal = out.page("privacy-policy.html").unwrap();
        assert!(legal.contains("<a href=\"index.html#contact\">Contact</a>"));
        assert!(legal.contains("href=\"https://blog.test\" target=\"_blank\""));
    }

    #[test]
    fn test_unsupported_elements_are_counted() {
        let s = site(r#"{"sectionsData": [{"elements": [{"type": "hologram"}, {"type": "spacer"}]}]}"#);
        let store = MemoryImageStore::new();
        let (out, report) = export_site_on(&s, &store, &config(ExportMode::Single), day());
        assert_eq!(report.unsupported_elements, 1);
        assert!(
            out.page("index.html")
                .unwrap()
                .contains("<!-- unsupported content element: hologram -->")
        );
    }

    #[test]
    fn test_elements_dropped_while_rendering_are_counted() {
        let s = site(
            r#"{"sectionsData": [
                {"title": "Launch", "elements": [{"type": "countdown", "targetDate": "someday"}]},
                {"title": "Find us", "elements": [{"type": "map"}, {"type": "hologram"}]}
            ]}"#,
        );
        let store = MemoryImageStore::new();
        for mode in [ExportMode::Single, ExportMode::Multi] {
            let (out, report) = export_site_on(&s, &store, &config(mode), day());
            assert_eq!(report.unsupported_elements, 3, "{:?}", mode);
            let page = match mode {
                ExportMode::Single => "index.html",
                ExportMode::Multi => "launch.html",
            };
            assert!(
                out.page(page)
                    .unwrap()
                    .contains("<!-- unsupported content element: countdown -->")
            );
        }
    }
}
