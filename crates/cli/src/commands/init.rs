use anyhow::{Context, Result};
use serde_json::{Value, json};
use sitekit_core::config::parse_export_toml_str;
use sitekit_core::{parse_site_json, slugify};
use sitekit_images::{ConvertOptions, FsImageStore};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::image::import_files;
use super::project::{EXPORT_FILE, SITE_FILE};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];
const CACHE_DIR: &str = "images";
const MAX_SCAN_DEPTH: usize = 2; // Maximum directory depth for image scanning

/// Escape a string for a TOML basic string.
///
/// `export.toml` is written from a commented template, so values are
/// spliced in by hand rather than serialized.
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Basic email shape check: one `@`, non-empty local part, dotted domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') || local.is_empty() || local.len() > 64 {
        return false;
    }
    if domain.is_empty() || domain.len() > 255 || !domain.contains('.') {
        return false;
    }
    if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) || domain.contains("..") {
        return false;
    }
    domain.rsplit('.').next().is_some_and(|tld| tld.len() >= 2)
}

/// Initialize a site project directory.
///
/// Creates `site.json` with starter content, a commented `export.toml` and
/// the `images/` cache. Images already in the directory are imported into the
/// cache; the first one becomes the hero background.
pub async fn run(path: PathBuf, name: Option<String>, email: Option<String>) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let site_path = path.join(SITE_FILE);
    if site_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            SITE_FILE,
            site_path.display()
        );
    }
    if let Some(e) = email.as_deref()
        && !is_valid_email(e)
    {
        anyhow::bail!("Invalid email format: '{}'", e);
    }

    fs::create_dir_all(&path).context("Failed to create project directory")?;
    let name = name.unwrap_or_else(|| default_name(&path));

    println!("\nAnalyzing directory...");
    let found = scan_image_files(&path)?;
    let mut store =
        FsImageStore::open(path.join(CACHE_DIR)).context("Failed to create image cache")?;
    let hero = if found.is_empty() {
        println!("  No images found");
        None
    } else {
        println!("✓ Found {} image(s)", found.len());
        let keys = import_files(&mut store, &found, ConvertOptions::default())?;
        keys.into_iter().next()
    };

    generate_export_toml(&path, &name)?;
    generate_site_json(&path, &name, email.as_deref(), hero.as_deref())?;

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.json            ← Edit this to change content");
    println!("  ├── export.toml          ← Export mode and features");
    println!("  └── {}/", CACHE_DIR);
    if let Some(key) = &hero {
        println!("      └── {}", key);
    }

    println!("\nNext steps:");
    println!("  1. Edit site.json (header, sections, contact)");
    println!("  2. Add images: sitekit image add {} <files..>", path.display());
    println!("  3. Preview: sitekit preview {}", path.display());

    Ok(())
}

fn default_name(path: &Path) -> String {
    path.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "My Site".to_string())
}

/// Image files in `dir` (up to `MAX_SCAN_DEPTH`), excluding the cache itself.
fn scan_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let cache = dir.join(CACHE_DIR);
    let mut images = Vec::new();

    for entry in WalkDir::new(dir)
        .max_depth(MAX_SCAN_DEPTH)
        .into_iter()
        .filter_entry(|e| e.path() != cache)
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(ext) = entry.path().extension()
            && IMAGE_EXTENSIONS.contains(&ext.to_string_lossy().to_lowercase().as_str())
        {
            images.push(entry.path().to_path_buf());
        }
    }

    images.sort();
    Ok(images)
}

fn generate_export_toml(base: &Path, name: &str) -> Result<()> {
    let slug = slugify(name);
    let output_name = toml_escape_string(if slug.is_empty() { "site" } else { &slug });

    let toml = format!(
        r##"# Generated by sitekit init
# Every key is optional; missing keys use the defaults shown here.

[export]
mode = "single"            # "single" or "multi" (one page per section)
output_name = "{output_name}"
cache_dir = "{CACHE_DIR}"
# cdn_base = "https://cdn.jsdelivr.net/npm"

[images]
max_width = 1920
max_height = 1080
quality = 85

[features]
sitemap = true             # needs seo.baseUrl in site.json
robots = true
legal_pages = true
thank_you_page = true
allow_embed_html = true
"##
    );

    parse_export_toml_str(&toml)
        .context("Generated export.toml is invalid - this is a bug in the template generator")?;
    fs::write(base.join(EXPORT_FILE), toml)?;
    Ok(())
}

fn starter_site(name: &str, email: Option<&str>, hero: Option<&str>) -> Value {
    let mut hero_data = json!({
        "title": name,
        "subtitle": "A short sentence about what you do.",
        "buttonText": "Get in touch",
        "buttonLink": "#contact"
    });
    if let Some(key) = hero {
        hero_data["backgroundImage"] = json!(key);
    }

    json!({
        "headerData": {
            "siteName": name,
            "sticky": true
        },
        "heroData": hero_data,
        "sectionsData": [
            {
                "title": "About",
                "subtitle": "Who we are",
                "elements": [
                    {"type": "paragraph", "text": "Tell your visitors about yourself."}
                ]
            },
            {
                "title": "Services",
                "layout": "grid",
                "cards": [
                    {"title": "First service", "text": "Describe it here."},
                    {"title": "Second service", "text": "Describe it here."},
                    {"title": "Third service", "text": "Describe it here."}
                ]
            }
        ],
        "contactData": {
            "title": "Contact",
            "email": email.unwrap_or_default(),
            "formEnabled": email.is_some()
        },
        "seo": {
            "description": format!("{} website", name),
            "language": "en"
        }
    })
}

fn generate_site_json(
    base: &Path,
    name: &str,
    email: Option<&str>,
    hero: Option<&str>,
) -> Result<()> {
    let path = base.join(SITE_FILE);
    let content = serde_json::to_string_pretty(&starter_site(name, email, hero))?;
    fs::write(&path, content + "\n")?;

    parse_site_json(&path)
        .context("Generated site.json is invalid - this is a bug in the template generator")?;
    Ok(())
}
