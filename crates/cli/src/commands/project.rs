use anyhow::{Context, Result};
use sitekit_core::config::{ExportConfig, ExportMode, parse_export_toml, parse_site_json};
use sitekit_core::SiteData;
use sitekit_generator::{ExportReport, GeneratedSite, export_site};
use sitekit_images::FsImageStore;
use std::path::{Path, PathBuf};

pub const SITE_FILE: &str = "site.json";
pub const EXPORT_FILE: &str = "export.toml";

/// A loaded project directory: content, exporter options and image cache.
pub struct Project {
    pub dir: PathBuf,
    pub site: SiteData,
    pub config: ExportConfig,
    pub store: FsImageStore,
}

impl Project {
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            anyhow::bail!("Project directory does not exist: {}", dir.display());
        }

        let site_path = dir.join(SITE_FILE);
        if !site_path.exists() {
            anyhow::bail!(
                "{} not found in {}\nRun 'sitekit init {}' first",
                SITE_FILE,
                dir.display(),
                dir.display()
            );
        }

        let site = parse_site_json(&site_path)
            .with_context(|| format!("Failed to parse {}", site_path.display()))?;
        let config = parse_export_toml(dir.join(EXPORT_FILE))
            .with_context(|| format!("Failed to parse {}", EXPORT_FILE))?;
        let store = FsImageStore::open(dir.join(&config.cache_dir))
            .context("Failed to open image cache")?;

        log::debug!(
            "loaded {} ({} section(s), cache at {})",
            site_path.display(),
            site.sections.len(),
            store.dir().display()
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            site,
            config,
            store,
        })
    }

    /// Apply a `--mode` flag over `export.toml`.
    pub fn with_mode(mut self, mode: Option<ExportMode>) -> Self {
        if let Some(mode) = mode {
            self.config.mode = mode;
        }
        self
    }

    pub fn export(&self) -> (GeneratedSite, ExportReport) {
        export_site(&self.site, &self.store, &self.config)
    }
}

/// Print what the export had to leave out.
pub fn print_report(report: &ExportReport) {
    for skipped in &report.skipped {
        println!("   ⚠ Skipped {}: {}", skipped.feature, skipped.reason);
    }
    if !report.unresolved_images.is_empty() {
        println!(
            "   ⚠ {} image(s) replaced by a placeholder:",
            report.unresolved_images.len()
        );
        for reference in &report.unresolved_images {
            println!("     - {}", reference);
        }
    }
    if report.unsupported_elements > 0 {
        println!(
            "   ⚠ {} unsupported content element(s) left out",
            report.unsupported_elements
        );
    }
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_requires_site_json() {
        let dir = TempDir::new().unwrap();
        let err = Project::load(dir.path()).err().unwrap();
        assert!(err.to_string().contains("site.json not found"));
    }

    #[test]
    fn test_load_with_defaults_and_mode_override() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SITE_FILE), r#"{"headerData": {"siteName": "A"}}"#).unwrap();

        let project = Project::load(dir.path()).unwrap();
        assert_eq!(project.config.mode, ExportMode::Single);
        assert!(dir.path().join("images").is_dir());

        let project = project.with_mode(Some(ExportMode::Multi));
        assert_eq!(project.config.mode, ExportMode::Multi);
        let (site, _) = project.export();
        assert!(site.contains("index.html"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
