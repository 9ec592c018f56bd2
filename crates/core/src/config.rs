use crate::error::{Error, Result};
use crate::types::SiteData;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Whether sections share one page or each get their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    #[default]
    #[serde(alias = "single-page", alias = "onepage")]
    Single,
    #[serde(alias = "multi-page", alias = "multipage")]
    Multi,
}

/// Exporter options, loaded from `export.toml` next to `site.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub mode: ExportMode,
    /// Base name of the ZIP archive (`<output_name>.zip`).
    pub output_name: String,
    /// Image cache directory, relative to the project directory.
    pub cache_dir: PathBuf,
    /// CDN serving UMD bundles for client-side elements.
    pub cdn_base: String,
    pub images: ImageSettings,
    pub features: FeatureFlags,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            mode: ExportMode::Single,
            output_name: "site".to_string(),
            cache_dir: PathBuf::from("images"),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            images: ImageSettings::default(),
            features: FeatureFlags::default(),
        }
    }
}

pub const DEFAULT_CDN_BASE: &str = "https://cdn.jsdelivr.net/npm";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSettings {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            max_width: 1920,
            max_height: 1080,
            quality: 85,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub sitemap: bool,
    pub robots: bool,
    pub legal_pages: bool,
    pub thank_you_page: bool,
    /// Emit `embed` elements as raw HTML; when off their markup is shown escaped.
    pub allow_embed_html: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            sitemap: true,
            robots: true,
            legal_pages: true,
            thank_you_page: true,
            allow_embed_html: true,
        }
    }
}

/// Raw TOML structure of `export.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExportToml {
    #[serde(default)]
    export: RawExportSection,
    #[serde(default)]
    images: RawImages,
    #[serde(default)]
    features: RawFeatures,
}

#[derive(Debug, Default, Deserialize)]
struct RawExportSection {
    mode: Option<ExportMode>,
    output_name: Option<String>,
    cache_dir: Option<String>, // Validated into PathBuf
    cdn_base: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawImages {
    max_width: Option<u32>,
    max_height: Option<u32>,
    quality: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFeatures {
    sitemap: Option<bool>,
    robots: Option<bool>,
    legal_pages: Option<bool>,
    thank_you_page: Option<bool>,
    allow_embed_html: Option<bool>,
}

/// Parse site data from a `site.json` file
pub fn parse_site_json<P: AsRef<Path>>(path: P) -> Result<SiteData> {
    let content = fs::read_to_string(path)?;
    parse_site_json_str(&content)
}

/// Parse site data from a string (useful for testing)
pub fn parse_site_json_str(content: &str) -> Result<SiteData> {
    let site: SiteData = serde_json::from_str(content)?;

    let unsupported = site
        .sections
        .iter()
        .flat_map(|s| s.elements.iter())
        .filter(|e| !e.is_supported())
        .count();
    if unsupported > 0 {
        log::warn!(
            "{} content element(s) could not be understood and will be skipped",
            unsupported
        );
    }

    Ok(site)
}

/// Parse `export.toml`. A missing file yields the defaults.
pub fn parse_export_toml<P: AsRef<Path>>(path: P) -> Result<ExportConfig> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("{} not found, using default export settings", path.display());
        return Ok(ExportConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_export_toml_str(&content)
}

/// Parse `export.toml` from a string (useful for testing)
pub fn parse_export_toml_str(content: &str) -> Result<ExportConfig> {
    let raw: RawExportToml = toml::from_str(content)?;
    let defaults = ExportConfig::default();

    let cache_dir = match raw.export.cache_dir {
        Some(dir) => validate_path(&dir, "export.cache_dir")?,
        None => defaults.cache_dir,
    };

    let output_name = raw.export.output_name.unwrap_or(defaults.output_name);
    if output_name.trim().is_empty()
        || output_name.contains(['/', '\\'])
        || output_name.contains("..")
    {
        return Err(Error::ConfigParse(format!(
            "Invalid export.output_name '{}': use a plain file name",
            output_name
        )));
    }

    let cdn_base = raw
        .export
        .cdn_base
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or(defaults.cdn_base);
    if !cdn_base.starts_with("https://") {
        return Err(Error::ConfigParse(format!(
            "export.cdn_base must be an https:// URL, got '{}'",
            cdn_base
        )));
    }

    let images = ImageSettings {
        max_width: raw.images.max_width.unwrap_or(defaults.images.max_width),
        max_height: raw.images.max_height.unwrap_or(defaults.images.max_height),
        quality: raw.images.quality.unwrap_or(defaults.images.quality),
    };
    if images.max_width == 0 || images.max_height == 0 {
        return Err(Error::ConfigParse(
            "images.max_width and images.max_height must be greater than 0".to_string(),
        ));
    }
    if !(1..=100).contains(&images.quality) {
        return Err(Error::ConfigParse(format!(
            "images.quality must be between 1 and 100, got {}",
            images.quality
        )));
    }

    let d = defaults.features;
    let features = FeatureFlags {
        sitemap: raw.features.sitemap.unwrap_or(d.sitemap),
        robots: raw.features.robots.unwrap_or(d.robots),
        legal_pages: raw.features.legal_pages.unwrap_or(d.legal_pages),
        thank_you_page: raw.features.thank_you_page.unwrap_or(d.thank_you_page),
        allow_embed_html: raw.features.allow_embed_html.unwrap_or(d.allow_embed_html),
    };

    Ok(ExportConfig {
        mode: raw.export.mode.unwrap_or_default(),
        output_name,
        cache_dir,
        cdn_base,
        images,
        features,
    })
}

/// Validate a relative path taken from configuration.
///
/// Rejects absolute paths, parent directory references (`..`) and empty
/// values so a project file cannot point the exporter outside its directory.
pub fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    let path = Path::new(path_str);

    if path.is_absolute() || path_str.starts_with('/') || path_str.starts_with('\\') {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    if path
        .components()
        .any(|c| c == std::path::Component::ParentDir)
    {
        return Err(Error::ConfigParse(format!(
            "Parent directory references (..) not allowed in '{}': '{}'",
            field_name, path_str
        )));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ContentElement;
    use std::io::Write;

    #[test]
    fn test_validate_path_valid_relative() {
        assert!(validate_path("images", "cache_dir").is_ok());
        assert!(validate_path("assets/cache", "cache_dir").is_ok());
        assert!(validate_path("./images", "cache_dir").is_ok());
    }

    #[test]
    fn test_validate_path_rejects_absolute() {
        let result = validate_path("/etc/passwd", "export.cache_dir");
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("Absolute paths not allowed"));
        assert!(msg.contains("export.cache_dir"));
    }

    #[test]
    fn test_validate_path_rejects_parent_dir() {
        for p in ["../secret", "images/../../etc", "a/b/../../../c"] {
            let result = validate_path(p, "cache_dir");
            assert!(
                result
                    .unwrap_err()
                    .to_string()
                    .contains("Parent directory references"),
                "{} should be rejected",
                p
            );
        }
    }

    #[test]
    fn test_validate_path_rejects_empty() {
        assert!(
            validate_path("   ", "cache_dir")
                .unwrap_err()
                .to_string()
                .contains("Empty path")
        );
    }

    #[test]
    fn test_export_toml_defaults() {
        let config = parse_export_toml_str("").unwrap();
        assert_eq!(config.mode, ExportMode::Single);
        assert_eq!(config.output_name, "site");
        assert_eq!(config.images, ImageSettings::default());
        assert!(config.features.sitemap);
        assert_eq!(config.cdn_base, DEFAULT_CDN_BASE);
    }

    #[test]
    fn test_export_toml_full() {
        let toml = r#"
[export]
mode = "multi-page"
output_name = "bakery"
cache_dir = "media/cache"
cdn_base = "https://unpkg.com/"

[images]
max_width = 1280
max_height = 720
quality = 70

[features]
sitemap = false
allow_embed_html = false
"#;
        let config = parse_export_toml_str(toml).unwrap();
        assert_eq!(config.mode, ExportMode::Multi);
        assert_eq!(config.output_name, "bakery");
        assert_eq!(config.cache_dir, PathBuf::from("media/cache"));
        assert_eq!(config.cdn_base, "https://unpkg.com");
        assert_eq!(config.images.max_width, 1280);
        assert_eq!(config.images.quality, 70);
        assert!(!config.features.sitemap);
        assert!(!config.features.allow_embed_html);
        assert!(config.features.legal_pages);
    }

    #[test]
    fn test_export_toml_rejects_bad_values() {
        assert!(parse_export_toml_str("[images]\nquality = 0").is_err());
        assert!(parse_export_toml_str("[images]\nmax_width = 0").is_err());
        assert!(parse_export_toml_str("[export]\ncache_dir = \"../x\"").is_err());
        assert!(parse_export_toml_str("[export]\noutput_name = \"a/b\"").is_err());
        assert!(parse_export_toml_str("[export]\ncdn_base = \"http://cdn\"").is_err());
        assert!(parse_export_toml_str("[export]\nmode = \"spa\"").is_err());
        assert!(parse_export_toml_str("[unknown]\nx = 1").is_err());
    }

    #[test]
    fn test_missing_export_toml_is_default() {
        let dir = std::env::temp_dir().join(format!("sitekit-missing-{}", std::process::id()));
        let config = parse_export_toml(dir.join("export.toml")).unwrap();
        assert_eq!(config.output_name, "site");
    }

    #[test]
    fn test_parse_site_json_file() {
        let path = std::env::temp_dir().join(format!("sitekit-site-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r##"{{
  "headerData": {{ "siteName": "Acme", "navLinks": [{{ "label": "Home", "href": "#top" }}] }},
  "heroData": {{ "title": "Fresh bread", "backgroundImage": "hero.jpg" }},
  "sectionsData": [
    {{
      "id": "menu",
      "title": "Menu",
      "cards": [{{ "title": "Croissant", "description": "Buttery" }}],
      "elements": [
        {{ "type": "heading", "data": {{ "text": "Today" }} }},
        {{ "type": "sparkles" }}
      ]
    }}
  ],
  "contactData": {{ "email": "hi@acme.test", "formEnabled": false }},
  "legalDocuments": {{ "privacyPolicy": "Private." }},
  "liveChatData": {{ "enabled": true, "provider": "tawk", "widgetId": "abc/def" }}
}}"##
        )
        .unwrap();
        drop(file);

        let site = parse_site_json(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(site.header.site_name, "Acme");
        assert_eq!(site.header.nav_links[0].href, "#top");
        assert_eq!(site.hero.background_image.as_deref(), Some("hero.jpg"));
        assert_eq!(site.sections[0].cards[0].text, "Buttery");
        assert!(matches!(
            site.sections[0].elements[0],
            ContentElement::Heading(_)
        ));
        assert!(!site.sections[0].elements[1].is_supported());
        assert!(!site.contact.form_enabled);
        assert!(site.legal.privacy_policy.is_some());
        assert!(site.live_chat.enabled);
        assert_eq!(site.live_chat.widget_id, "abc/def");
    }

    #[test]
    fn test_parse_site_json_rejects_malformed() {
        let result = parse_site_json_str("{ not json");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("JSON error"));
    }
}
