use crate::ExportError;
use crate::html::html_escape;

/// Absolute URL of an exported page; `index.html` maps to the site root.
fn page_url(base: &str, page: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    if page == "index.html" {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, page)
    }
}

fn usable_base(base_url: Option<&str>) -> Option<&str> {
    base_url
        .map(str::trim)
        .filter(|b| b.starts_with("https://") || b.starts_with("http://"))
}

/// `sitemap.xml` listing every page. Sitemaps need absolute URLs, so this
/// fails without a base URL.
pub fn generate_sitemap(
    base_url: Option<&str>,
    pages: &[&str],
    lastmod: &str,
) -> Result<String, ExportError> {
    let base = usable_base(base_url).ok_or_else(|| ExportError::Feature {
        feature: "sitemap",
        reason: "seo.baseUrl must be an absolute http(s) URL".to_string(),
    })?;

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for page in pages {
        let priority = if *page == "index.html" { "1.0" } else { "0.8" };
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <priority>{}</priority>\n  </url>\n",
            html_escape(&page_url(base, page)),
            lastmod,
            priority
        ));
    }
    xml.push_str("</urlset>\n");
    Ok(xml)
}

pub fn generate_robots(base_url: Option<&str>, with_sitemap: bool) -> String {
    let mut robots = String::from("User-agent: *\nAllow: /\n");
    if with_sitemap && let Some(base) = usable_base(base_url) {
        robots.push_str(&format!("\nSitemap: {}\n", page_url(base, "sitemap.xml")));
    }
    robots
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sitemap() {
        let xml = generate_sitemap(
            Some("https://bakery.test/"),
            &["index.html", "menu.html"],
            "2030-01-02",
        )
        .unwrap();
        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://bakery.test/</loc>
    <lastmod>2030-01-02</lastmod>
    <priority>1.0</priority>
  </url>
  <url>
    <loc>https://bakery.test/menu.html</loc>
    <lastmod>2030-01-02</lastmod>
    <priority>0.8</priority>
  </url>
</urlset>
"#
        );
    }

    #[test]
    fn test_sitemap_requires_base_url() {
        assert!(generate_sitemap(None, &["index.html"], "2030-01-01").is_err());
        assert!(generate_sitemap(Some("bakery.test"), &["index.html"], "2030-01-01").is_err());
    }

    #[test]
    fn test_robots() {
        assert_eq!(generate_robots(None, true), "User-agent: *\nAllow: /\n");
        assert_eq!(
            generate_robots(Some("https://a.test"), true),
            "User-agent: *\nAllow: /\n\nSitemap: https://a.test/sitemap.xml\n"
        );
        assert_eq!(
            generate_robots(Some("https://a.test"), false),
            "User-agent: *\nAllow: /\n"
        );
    }
}
