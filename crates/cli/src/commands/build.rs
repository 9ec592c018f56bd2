use anyhow::{Context, Result};
use sitekit_core::config::ExportMode;
use sitekit_generator::write_dir;
use std::path::PathBuf;

use super::project::{Project, format_size, print_report};

/// Export the site into a directory.
pub async fn run(path: PathBuf, output: PathBuf, mode: Option<ExportMode>) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let project = Project::load(&path)?.with_mode(mode);
    println!("✓ Loaded: {}", project.site.site_title());
    println!("  Sections: {}", project.site.sections.len());
    println!("  Mode: {:?}", project.config.mode);
    println!();

    println!("📄 Generating pages...");
    let (site, report) = project.export();
    print_report(&report);
    println!("   ✓ Generated {} file(s)", site.file_count());

    println!("📁 Writing files...");
    write_dir(&site, &output)
        .with_context(|| format!("Failed to write site to {}", output.display()))?;
    println!("   ✓ Wrote {}", format_size(site.total_bytes()));

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   cd {} && python3 -m http.server 8000", output.display());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_writes_site() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("site.json"),
            r#"{"sectionsData": [{"title": "Menu"}]}"#,
        )
        .unwrap();
        let out = dir.path().join("dist");

        run(dir.path().to_path_buf(), out.clone(), Some(ExportMode::Multi))
            .await
            .unwrap();

        assert!(out.join("index.html").is_file());
        assert!(out.join("menu.html").is_file());
        assert!(out.join("assets/css/styles.css").is_file());
    }
}
