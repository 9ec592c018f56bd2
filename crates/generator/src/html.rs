use crate::context::CdnLibrary;
use sitekit_core::SiteData;
use std::collections::BTreeSet;

/// HTML-escape a string to prevent XSS attacks
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text and turn line breaks into `<br>`.
pub fn text_with_breaks(s: &str) -> String {
    html_escape(s.trim())
        .replace("\r\n", "\n")
        .replace('\n', "<br>\n")
}

/// `javascript:`/`vbscript:` URLs, including ones padded with whitespace or
/// control characters.
pub fn is_script_url(url: &str) -> bool {
    let compact: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.starts_with("javascript:") || compact.starts_with("vbscript:")
}

/// Escaped URL for `href`/`src`, with script URLs replaced by `#`.
pub fn safe_url(url: &str) -> String {
    if is_script_url(url) {
        log::warn!("Dropping script URL '{}'", url);
        return "#".to_string();
    }
    html_escape(url.trim())
}

/// Whether a link leaves the site (opens in a new tab).
pub fn is_external(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

/// `target`/`rel` attributes for external links, empty otherwise.
pub fn link_target(url: &str) -> &'static str {
    if is_external(url) {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    }
}

/// Percent-encode a value for use inside a URL query string.
pub fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'!' | b'~' | b'*'
            | b'(' | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// URL for a quoted CSS `url('...')` inside a `style` attribute.
///
/// Quotes, parentheses, backslashes and whitespace are percent-encoded so the
/// value cannot close the `url()` after the browser decodes the attribute.
pub fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.trim().chars() {
        match c {
            '\'' | '"' | '(' | ')' | '\\' | '<' | '>' => {
                out.push_str(&format!("%{:02X}", c as u32))
            }
            c if c.is_ascii_whitespace() || c.is_ascii_control() => {
                out.push_str(&format!("%{:02X}", c as u32))
            }
            c if c.is_whitespace() || c.is_control() => {}
            c => out.push(c),
        }
    }
    html_escape(&out)
}

/// CSS length from user input: bare numbers become pixels, anything other
/// than `px`, `%`, `rem`, `em` or `vw` is rejected.
pub fn css_length(value: &str) -> Option<String> {
    let v = value.trim();
    let split = v
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(v.len());
    let (number, unit) = v.split_at(split);
    if number.is_empty() || number.parse::<f64>().is_err() {
        return None;
    }
    match unit {
        "" => Some(format!("{}px", number)),
        "px" | "%" | "rem" | "em" | "vw" => Some(v.to_string()),
        _ => None,
    }
}

/// Format a number without a trailing `.0`.
pub fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

/// Per-page values for the document shell.
pub struct PageMeta<'a> {
    pub file_name: &'a str,
    pub title: String,
    pub description: &'a str,
}

/// Wrap a rendered body into a complete HTML document.
///
/// `extras` is inserted before the scripts (cookie banner, age gate, chat).
pub fn page_shell(
    site: &SiteData,
    meta: &PageMeta<'_>,
    body: &str,
    extras: &str,
    libraries: &BTreeSet<CdnLibrary>,
    cdn_base: &str,
) -> String {
    let lang = if site.seo.language.trim().is_empty() {
        "en".to_string()
    } else {
        html_escape(site.seo.language.trim())
    };

    let mut head = String::new();
    if !meta.description.trim().is_empty() {
        let description = html_escape(meta.description.trim());
        head.push_str(&format!(
            "    <meta name=\"description\" content=\"{}\">\n    <meta property=\"og:description\" content=\"{}\">\n",
            description, description
        ));
    }
    if !site.seo.keywords.is_empty() {
        head.push_str(&format!(
            "    <meta name=\"keywords\" content=\"{}\">\n",
            html_escape(&site.seo.keywords.join(", "))
        ));
    }
    if let Some(base) = site.seo.base_url.as_deref().filter(|b| is_external(b)) {
        let base = base.trim_end_matches('/');
        let canonical = if meta.file_name == "index.html" {
            format!("{}/", base)
        } else {
            format!("{}/{}", base, meta.file_name)
        };
        head.push_str(&format!(
            "    <link rel=\"canonical\" href=\"{}\">\n",
            html_escape(&canonical)
        ));
    }
    for lib in libraries {
        if let Some(css) = lib.stylesheet_url(cdn_base) {
            head.push_str(&format!("    <link rel=\"stylesheet\" href=\"{}\">\n", css));
        }
    }

    let scripts: String = libraries
        .iter()
        .map(|lib| format!("<script src=\"{}\" defer></script>\n", lib.script_url(cdn_base)))
        .collect();

    let title = html_escape(&meta.title);

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta property="og:title" content="{title}">
{head}    <link rel="stylesheet" href="assets/css/styles.css">
</head>
<body>
{body}
{extras}
{scripts}<script src="assets/js/app.js" defer></script>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape_basic_characters() {
        assert_eq!(html_escape("Hello World"), "Hello World");
        assert_eq!(html_escape("Test & Test"), "Test &amp; Test");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("'single'"), "&#x27;single&#x27;");
    }

    #[test]
    fn test_html_escape_xss_attempts() {
        assert_eq!(
            html_escape("<script>alert('XSS')</script>"),
            "&lt;script&gt;alert(&#x27;XSS&#x27;)&lt;/script&gt;"
        );
        assert_eq!(
            html_escape("\" onmouseover=\"alert(1)"),
            "&quot; onmouseover=&quot;alert(1)"
        );
    }

    #[test]
    fn test_html_escape_unicode() {
        assert_eq!(html_escape("Boulangerie été"), "Boulangerie été");
        assert_eq!(html_escape(""), "");
    }

    #[test]
    fn test_text_with_breaks() {
        assert_eq!(text_with_breaks("a\nb"), "a<br>\nb");
        assert_eq!(text_with_breaks("  <b>\r\n "), "&lt;b&gt;");
    }

    #[test]
    fn test_safe_url() {
        assert_eq!(safe_url("https://a.test/?x=1&y=2"), "https://a.test/?x=1&amp;y=2");
        assert_eq!(safe_url("javascript:alert(1)"), "#");
        assert_eq!(safe_url(" JavaScript:alert(1)"), "#");
        assert_eq!(safe_url("java\tscript:alert(1)"), "#");
        assert_eq!(safe_url("#contact"), "#contact");
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c"), "a%20b%26c");
        assert_eq!(encode_uri_component("café"), "caf%C3%A9");
        assert_eq!(encode_uri_component("safe-_.~"), "safe-_.~");
    }

    #[test]
    fn test_css_url() {
        assert_eq!(css_url("assets/images/hero.jpg"), "assets/images/hero.jpg");
        assert_eq!(
            css_url("https://x.test/a');color:red;('"),
            "https://x.test/a%27%29;color:red;%28%27"
        );
        assert_eq!(css_url("a b\\c&d"), "a%20b%5Cc&amp;d");
    }

    #[test]
    fn test_css_length() {
        assert_eq!(css_length("300"), Some("300px".to_string()));
        assert_eq!(css_length("50%"), Some("50%".to_string()));
        assert_eq!(css_length("1.5rem"), Some("1.5rem".to_string()));
        assert_eq!(css_length("10px;color:red"), None);
        assert_eq!(css_length("auto"), None);
        assert_eq!(css_length(""), None);
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(3.0), "3");
        assert_eq!(fmt_num(2.5), "2.5");
        assert_eq!(fmt_num(1.234), "1.23");
        assert_eq!(fmt_num(-4.0), "-4");
    }

    #[test]
    fn test_page_shell_includes_meta_and_scripts() {
        let mut site = SiteData::default();
        site.seo.description = "Fresh & local".to_string();
        site.seo.base_url = Some("https://bakery.test/".to_string());
        site.seo.language = "fr".to_string();

        let mut libs = BTreeSet::new();
        libs.insert(CdnLibrary::QrCode);

        let html = page_shell(
            &site,
            &PageMeta {
                file_name: "menu.html",
                title: "Menu <Bakery>".to_string(),
                description: &site.seo.description,
            },
            "<main>body</main>",
            "<div id=\"extra\"></div>",
            &libs,
            "https://cdn.test",
        );

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="fr">"#));
        assert!(html.contains("<title>Menu &lt;Bakery&gt;</title>"));
        assert!(html.contains(r#"content="Fresh &amp; local""#));
        assert!(html.contains(r#"<link rel="canonical" href="https://bakery.test/menu.html">"#));
        assert!(html.contains("https://cdn.test/qrcode@1.4.4/build/qrcode.min.js"));
        assert!(html.contains(r#"<script src="assets/js/app.js" defer></script>"#));
        let extra = html.find("id=\"extra\"").unwrap();
        let app = html.find("assets/js/app.js").unwrap();
        assert!(extra < app);
    }
}
