use anyhow::{Context, Result};
use sitekit_images::{ConvertOptions, ImageStore, import_image};
use std::fs;
use std::path::{Path, PathBuf};

use super::project::{Project, format_size};

/// Import files into the cache, returning the new keys.
pub fn import_files(
    store: &mut dyn ImageStore,
    files: &[PathBuf],
    opts: ConvertOptions,
) -> Result<Vec<String>> {
    let mut keys = Vec::with_capacity(files.len());
    for file in files {
        let name = file_name(file)?;
        let bytes = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
        let metadata = import_image(store, name, &bytes, None, opts)
            .with_context(|| format!("Failed to import {}", file.display()))?;
        println!(
            "   ✓ {} → {} ({}x{}, {})",
            name,
            metadata.key,
            metadata.width,
            metadata.height,
            format_size(metadata.size)
        );
        keys.push(metadata.key);
    }
    Ok(keys)
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid image file name: {}", path.display()))
}

pub async fn add(path: PathBuf, files: Vec<PathBuf>) -> Result<()> {
    let mut project = Project::load(&path)?;
    println!("🖼  Importing {} image(s)...", files.len());

    let opts = ConvertOptions::from(project.config.images);
    let keys = import_files(&mut project.store, &files, opts)?;

    println!();
    println!("✓ Cached {} image(s) in {}", keys.len(), project.store.dir().display());
    println!("  Reference them in site.json by original file name or by key.");
    Ok(())
}

pub async fn list(path: PathBuf) -> Result<()> {
    let project = Project::load(&path)?;
    let mut images = project.store.list().context("Failed to list image cache")?;
    images.sort_by(|a, b| a.key.cmp(&b.key));

    if images.is_empty() {
        println!("Image cache is empty: {}", project.store.dir().display());
        println!("Add images with: sitekit image add {} <files..>", path.display());
        return Ok(());
    }

    println!("{} cached image(s):", images.len());
    for meta in &images {
        let added = meta
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<48} {:<24} {:>5}x{:<5} {:>9}  {}",
            meta.key,
            meta.original_name,
            meta.width,
            meta.height,
            format_size(meta.size),
            added
        );
    }
    Ok(())
}
