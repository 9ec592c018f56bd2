use crate::error::{ImageError, Result};
use crate::store::{ImageMetadata, ImageStore};
use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use sha2::{Digest, Sha256};
use sitekit_core::config::ImageSettings;
use sitekit_core::slugify;
use std::path::Path;

const MAX_STEM_LEN: usize = 40;

/// Re-encoding options for imported images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG quality, 1-100
    pub quality: u8,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ImageSettings::default().into()
    }
}

impl From<ImageSettings> for ConvertOptions {
    fn from(settings: ImageSettings) -> Self {
        Self {
            max_width: settings.max_width,
            max_height: settings.max_height,
            quality: settings.quality.clamp(1, 100),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Largest size with the same aspect ratio that fits in `max_w` x `max_h`.
/// Images already inside the box keep their size.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width <= max_w && height <= max_h {
        return (width, height);
    }
    let scale = f64::min(max_w as f64 / width as f64, max_h as f64 / height as f64);
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    (w, h)
}

/// Decode any supported raster format, shrink it to fit, and re-encode as JPEG.
///
/// Transparent pixels are composited onto white since JPEG has no alpha.
pub fn convert_to_jpeg(bytes: &[u8], opts: ConvertOptions) -> Result<ConvertedImage> {
    let img = image::load_from_memory(bytes).map_err(ImageError::Conversion)?;

    let (w, h) = fit_within(img.width(), img.height(), opts.max_width, opts.max_height);
    let img = if (w, h) != img.dimensions() {
        img.resize_exact(w, h, FilterType::Lanczos3)
    } else {
        img
    };

    let rgb = flatten_onto_white(&img);

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, opts.quality.clamp(1, 100));
    encoder
        .encode_image(&rgb)
        .map_err(ImageError::Conversion)?;

    Ok(ConvertedImage {
        bytes: out,
        width: w,
        height: h,
    })
}

fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = a as u32;
        let blend = |c: u8| ((c as u32 * a + 255 * (255 - a)) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Cache key for an imported image: `<name-slug>-<content hash>.<ext>`.
///
/// The hash makes re-importing identical content land on the same key.
pub fn generate_key(original_name: &str, bytes: &[u8], extension: &str) -> String {
    let stem = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(slugify)
        .unwrap_or_default();
    let stem: String = if stem.is_empty() {
        "image".to_string()
    } else {
        stem.chars().take(MAX_STEM_LEN).collect::<String>()
    };
    let stem = stem.trim_end_matches('-');

    let digest = Sha256::digest(bytes);
    let hash: String = digest.iter().take(6).map(|b| format!("{:02x}", b)).collect();

    format!("{}-{}.{}", stem, hash, extension)
}

fn is_svg(original_name: &str, bytes: &[u8]) -> bool {
    let by_name = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]).to_lowercase();
    by_name && (head.contains("<svg") || head.contains("<?xml"))
}

/// Convert a user-picked file and write it into the cache.
///
/// Raster images become JPEGs; SVGs are stored untouched. The key is derived
/// from the picked bytes, so importing the same content twice returns the
/// existing entry without converting again. A new `source_url` replaces the
/// stored one.
pub fn import_image(
    store: &mut dyn ImageStore,
    original_name: &str,
    bytes: &[u8],
    source_url: Option<&str>,
    opts: ConvertOptions,
) -> Result<ImageMetadata> {
    let svg = is_svg(original_name, bytes);
    let key = generate_key(original_name, bytes, if svg { "svg" } else { "jpg" });

    if let Some(cached) = store.get(&key)? {
        log::debug!("{} already cached as {}", original_name, key);
        let mut existing = cached.metadata;
        if let Some(url) = source_url
            && existing.source_url.as_deref() != Some(url)
        {
            existing.source_url = Some(url.to_string());
            store.save(&cached.bytes, existing.clone())?;
        }
        return Ok(existing);
    }

    let (stored, content_type, width, height) = if svg {
        (bytes.to_vec(), "image/svg+xml", 0, 0)
    } else {
        let converted = convert_to_jpeg(bytes, opts)?;
        (
            converted.bytes,
            "image/jpeg",
            converted.width,
            converted.height,
        )
    };

    let metadata = ImageMetadata {
        key,
        original_name: original_name.to_string(),
        content_type: content_type.to_string(),
        width,
        height,
        size: stored.len() as u64,
        created_at: Some(Utc::now()),
        source_url: source_url.map(str::to_string),
    };
    store.save(&stored, metadata.clone())?;
    Ok(metadata)
}
