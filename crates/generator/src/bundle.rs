//! Writing a [`GeneratedSite`] to disk or into a ZIP archive.

use crate::{ExportError, GeneratedSite, Result};
use std::fs;
use std::io::{Seek, Write};
use std::path::{Component, Path};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Output paths must be relative, `/`-separated and stay inside the site root.
pub fn validate_bundle_path(path: &str) -> Result<()> {
    let valid = !path.is_empty()
        && !path.contains('\\')
        && !path.contains('\0')
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if valid {
        Ok(())
    } else {
        Err(ExportError::InvalidPath(path.to_string()))
    }
}

fn entries(site: &GeneratedSite) -> impl Iterator<Item = (&str, &[u8])> {
    site.pages
        .iter()
        .map(|(p, html)| (p.as_str(), html.as_bytes()))
        .chain(site.assets.iter().map(|(p, data)| (p.as_str(), data.as_slice())))
}

/// Write the site as a ZIP archive (Deflate) into `writer`.
pub fn write_zip<W: Write + Seek>(site: &GeneratedSite, writer: W) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (path, data) in entries(site) {
        validate_bundle_path(path)?;
        zip.start_file(path, options)?;
        zip.write_all(data)?;
    }

    let writer = zip.finish()?;
    log::debug!("wrote {} files to archive", site.file_count());
    Ok(writer)
}

/// Write the site into `dir`, creating parent directories as needed.
pub fn write_dir(site: &GeneratedSite, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    for (path, data) in entries(site) {
        validate_bundle_path(path)?;
        let target = dir.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, data)?;
    }
    log::debug!("wrote {} files to {}", site.file_count(), dir.display());
    Ok(())
}
