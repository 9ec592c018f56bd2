use anyhow::{Context, Result};
use sitekit_core::config::ExportMode;
use sitekit_generator::write_zip;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::project::{Project, format_size, print_report};

/// `<project>/<output_name>.zip` unless `-o` was given.
fn zip_path(project: &Project, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| {
        project
            .dir
            .join(format!("{}.zip", project.config.output_name))
    })
}

fn write_archive(project: &Project, target: &Path) -> Result<u64> {
    let (site, report) = project.export();
    print_report(&report);

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }
    let file = File::create(target)
        .with_context(|| format!("Failed to create {}", target.display()))?;
    let writer = write_zip(&site, BufWriter::new(file)).context("Failed to write ZIP archive")?;
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush ZIP archive")?;

    println!("   ✓ Packed {} file(s)", site.file_count());
    Ok(fs::metadata(target)?.len())
}

/// Export the site as a ZIP archive.
pub async fn run(path: PathBuf, output: Option<PathBuf>, mode: Option<ExportMode>) -> Result<()> {
    println!("📦 Exporting site...");

    let project = Project::load(&path)?.with_mode(mode);
    let target = zip_path(&project, output);
    println!("✓ Loaded: {}", project.site.site_title());
    println!("  Mode: {:?}", project.config.mode);
    println!();

    let size = write_archive(&project, &target)?;

    println!();
    println!("✅ Export complete!");
    println!("   Archive: {} ({})", target.display(), format_size(size));
    println!();

    Ok(())
}
