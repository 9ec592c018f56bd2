use crate::error::{ImageError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const METADATA_SUFFIX: &str = ".meta.json";
const MAX_KEY_LEN: usize = 200;

/// Metadata stored next to every cached image blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageMetadata {
    pub key: String,
    /// File name the user picked before conversion.
    pub original_name: String,
    pub content_type: String,
    pub width: u32,
    pub height: u32,
    pub size: u64,
    pub created_at: Option<DateTime<Utc>>,
    /// Editor-side URL (usually `blob:`) the image was first shown under.
    pub source_url: Option<String>,
}

impl Default for ImageMetadata {
    fn default() -> Self {
        Self {
            key: String::new(),
            original_name: String::new(),
            content_type: "application/octet-stream".to_string(),
            width: 0,
            height: 0,
            size: 0,
            created_at: None,
            source_url: None,
        }
    }
}

impl ImageMetadata {
    /// Entry for a blob whose metadata is missing: everything derived from the key.
    pub fn blank(key: &str, size: u64) -> Self {
        Self {
            key: key.to_string(),
            original_name: key.to_string(),
            content_type: mime_guess::from_path(key)
                .first_or_octet_stream()
                .to_string(),
            size,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedImage {
    pub metadata: ImageMetadata,
    pub bytes: Vec<u8>,
}

/// Key/value cache of image blobs plus metadata.
pub trait ImageStore {
    /// Store `bytes` under `metadata.key`, replacing any previous entry.
    fn save(&mut self, bytes: &[u8], metadata: ImageMetadata) -> Result<()>;

    fn get(&self, key: &str) -> Result<Option<CachedImage>>;

    fn metadata(&self, key: &str) -> Result<Option<ImageMetadata>>;

    /// All entries, sorted by key.
    fn list(&self) -> Result<Vec<ImageMetadata>>;

    /// Returns whether an entry was removed.
    fn remove(&mut self, key: &str) -> Result<bool>;

    fn contains(&self, key: &str) -> bool {
        matches!(self.metadata(key), Ok(Some(_)))
    }
}

/// Reject keys that could escape the cache directory or clash with metadata files.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && !key.starts_with('.')
        && !key.contains(['/', '\\', '\0'])
        && !key.contains("..")
        && !key.ends_with(METADATA_SUFFIX);
    if valid {
        Ok(())
    } else {
        Err(ImageError::InvalidKey(key.to_string()))
    }
}

/// Directory-backed cache: `<dir>/<key>` holds the blob and
/// `<dir>/<key>.meta.json` its metadata.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    dir: PathBuf,
}

impl FsImageStore {
    /// Open (and create if needed) a cache directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn metadata_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}", key, METADATA_SUFFIX))
    }

    fn read_metadata(&self, key: &str, size: u64) -> ImageMetadata {
        let path = self.metadata_path(key);
        let parsed = fs::read_to_string(&path)
            .ok()
            .map(|json| serde_json::from_str::<ImageMetadata>(&json));

        match parsed {
            Some(Ok(mut meta)) => {
                meta.key = key.to_string();
                meta
            }
            Some(Err(e)) => {
                log::warn!("Ignoring corrupt metadata {}: {}", path.display(), e);
                ImageMetadata::blank(key, size)
            }
            None => ImageMetadata::blank(key, size),
        }
    }
}

impl ImageStore for FsImageStore {
    fn save(&mut self, bytes: &[u8], mut metadata: ImageMetadata) -> Result<()> {
        validate_key(&metadata.key)?;
        metadata.size = bytes.len() as u64;

        fs::write(self.blob_path(&metadata.key), bytes)?;
        let json = serde_json::to_string_pretty(&metadata)?;
        fs::write(self.metadata_path(&metadata.key), json)?;

        log::debug!("cached image {} ({} bytes)", metadata.key, metadata.size);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<CachedImage>> {
        if validate_key(key).is_err() {
            return Ok(None);
        }
        let path = self.blob_path(key);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let metadata = self.read_metadata(key, bytes.len() as u64);
        Ok(Some(CachedImage { metadata, bytes }))
    }

    fn metadata(&self, key: &str) -> Result<Option<ImageMetadata>> {
        if validate_key(key).is_err() {
            return Ok(None);
        }
        let path = self.blob_path(key);
        if !path.is_file() {
            return Ok(None);
        }
        let size = fs::metadata(&path)?.len();
        Ok(Some(self.read_metadata(key, size)))
    }

    fn list(&self) -> Result<Vec<ImageMetadata>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') || name.ends_with(METADATA_SUFFIX) {
                continue;
            }
            let size = entry.metadata()?.len();
            entries.push(self.read_metadata(&name, size));
        }
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        if validate_key(key).is_err() {
            return Ok(false);
        }
        let blob = self.blob_path(key);
        if !blob.exists() {
            return Ok(false);
        }
        fs::remove_file(blob)?;
        let meta = self.metadata_path(key);
        if meta.exists() {
            fs::remove_file(meta)?;
        }
        Ok(true)
    }
}

/// In-memory cache, used by tests and one-off exports.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    entries: BTreeMap<String, CachedImage>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ImageStore for MemoryImageStore {
    fn save(&mut self, bytes: &[u8], mut metadata: ImageMetadata) -> Result<()> {
        validate_key(&metadata.key)?;
        metadata.size = bytes.len() as u64;
        self.entries.insert(
            metadata.key.clone(),
            CachedImage {
                metadata,
                bytes: bytes.to_vec(),
            },
        );
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<CachedImage>> {
        Ok(self.entries.get(key).cloned())
    }

    fn metadata(&self, key: &str) -> Result<Option<ImageMetadata>> {
        Ok(self.entries.get(key).map(|e| e.metadata.clone()))
    }

    fn list(&self) -> Result<Vec<ImageMetadata>> {
        Ok(self.entries.values().map(|e| e.metadata.clone()).collect())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}
