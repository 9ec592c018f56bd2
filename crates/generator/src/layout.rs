//! Page-level blocks shared by every exported page.

use crate::context::RenderContext;
use crate::elements::{render_elements, render_social_links};
use crate::html::{css_url, html_escape, link_target, safe_url, text_with_breaks};
use crate::legal::LegalPage;
use sitekit_core::types::{Card, ContactData, FieldKind, Section, SectionLayout};
use sitekit_core::{SiteData, color_or};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

pub fn render_header(site: &SiteData, nav: &[NavItem], ctx: &mut RenderContext<'_>) -> String {
    let header = &site.header;
    let logo = header
        .logo
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            format!(
                "<img class=\"brand-logo\" src=\"{}\" alt=\"\">",
                html_escape(&ctx.image_src(l))
            )
        })
        .unwrap_or_default();
    let name = if header.site_name.trim().is_empty() {
        site.site_title()
    } else {
        header.site_name.trim().to_string()
    };
    let links: String = nav
        .iter()
        .map(|item| {
            format!(
                "<li><a href=\"{}\"{}>{}</a></li>",
                safe_url(&item.href),
                link_target(&item.href),
                html_escape(&item.label)
            )
        })
        .collect();

    format!(
        r#"<header class="site-header{}" style="background-color:{};color:{}">
  <div class="container header-inner">
    <a class="brand" href="index.html">{}<span>{}</span></a>
    <button class="nav-toggle" type="button" aria-label="Toggle navigation" aria-expanded="false" aria-controls="site-nav">&#9776;</button>
    <nav class="site-nav" id="site-nav"><ul>{}</ul></nav>
  </div>
</header>"#,
        if header.sticky { " sticky" } else { "" },
        color_or(Some(&header.background_color), "#ffffff"),
        color_or(Some(&header.text_color), "#1f2937"),
        logo,
        html_escape(&name),
        links
    )
}

/// Hero banner. `background` is the resolved image `src`, if any.
pub fn render_hero(site: &SiteData, background: Option<&str>, button_href: &str) -> String {
    let hero = &site.hero;
    let mut style = format!(
        "background-color:{};color:{}",
        color_or(Some(&hero.background_color), "#1a1a2e"),
        color_or(Some(&hero.text_color), "#ffffff")
    );
    let overlay = match background {
        Some(src) => {
            style.push_str(&format!(";background-image:url('{}')", css_url(src)));
            format!(
                "<div class=\"hero-overlay\" style=\"opacity:{:.2}\"></div>",
                hero.overlay_opacity.clamp(0.0, 1.0)
            )
        }
        None => String::new(),
    };
    let title = if hero.title.trim().is_empty() {
        site.site_title()
    } else {
        hero.title.clone()
    };
    let subtitle = if hero.subtitle.trim().is_empty() {
        String::new()
    } else {
        format!("<p class=\"hero-subtitle\">{}</p>", text_with_breaks(&hero.subtitle))
    };
    let button = if hero.button_text.trim().is_empty() {
        String::new()
    } else {
        format!(
            "<a class=\"btn btn-filled\" href=\"{}\">{}</a>",
            safe_url(button_href),
            html_escape(&hero.button_text)
        )
    };

    format!(
        r#"<section class="hero" id="top" style="{}">
  {}<div class="container hero-content">
    <h1>{}</h1>
    {}{}
  </div>
</section>"#,
        style,
        overlay,
        html_escape(&title),
        subtitle,
        button
    )
}

fn layout_class(layout: SectionLayout) -> &'static str {
    match layout {
        SectionLayout::Grid => "grid",
        SectionLayout::List => "list",
        SectionLayout::Columns => "columns",
    }
}

fn render_card(card: &Card, ctx: &mut RenderContext<'_>) -> String {
    let mut style = Vec::new();
    if let Some(bg) = card.background_color.as_deref().and_then(sitekit_core::parse_color) {
        style.push(format!("background-color:{}", bg));
    }
    if let Some(fg) = card.text_color.as_deref().and_then(sitekit_core::parse_color) {
        style.push(format!("color:{}", fg));
    }
    let style = if style.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", style.join(";"))
    };
    let image = card
        .image
        .as_deref()
        .filter(|i| !i.trim().is_empty())
        .map(|i| {
            format!(
                "<img class=\"card-image\" src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                html_escape(&ctx.image_src(i)),
                html_escape(&card.title)
            )
        })
        .unwrap_or_default();
    let link = card
        .link
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            format!(
                "<a class=\"btn btn-outlined\" href=\"{}\"{}>{}</a>",
                safe_url(l),
                link_target(l),
                html_escape(card.button_text.as_deref().unwrap_or("Learn more"))
            )
        })
        .unwrap_or_default();

    format!(
        "<article class=\"card\"{}>{}<div class=\"card-body\"><h3>{}</h3><p>{}</p>{}</div></article>",
        style,
        image,
        html_escape(&card.title),
        text_with_breaks(&card.text),
        link
    )
}

fn section_style(section: &Section) -> String {
    let mut rules = Vec::new();
    if let Some(bg) = section.background_color.as_deref().and_then(sitekit_core::parse_color) {
        rules.push(format!("background-color:{}", bg));
    }
    if let Some(fg) = section.text_color.as_deref().and_then(sitekit_core::parse_color) {
        rules.push(format!("color:{}", fg));
    }
    if rules.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", rules.join(";"))
    }
}

/// A full section: heading, cards and content elements.
pub fn render_section(section: &Section, slug: &str, ctx: &mut RenderContext<'_>) -> String {
    let layout = layout_class(section.layout);
    let title = if section.title.is_empty() {
        String::new()
    } else {
        format!("<h2 class=\"section-title\">{}</h2>\n", html_escape(&section.title))
    };
    let subtitle = if section.subtitle.is_empty() {
        String::new()
    } else {
        format!(
            "<p class=\"section-subtitle\">{}</p>\n",
            text_with_breaks(&section.subtitle)
        )
    };
    let cards = if section.cards.is_empty() {
        String::new()
    } else {
        let rendered: String = section.cards.iter().map(|c| render_card(c, ctx)).collect();
        format!("<div class=\"cards cards-{}\">{}</div>\n", layout, rendered)
    };
    let elements = if section.elements.is_empty() {
        String::new()
    } else {
        format!(
            "<div class=\"section-elements\">\n{}\n</div>\n",
            render_elements(&section.elements, ctx)
        )
    };

    format!(
        "<section class=\"section section-{}\" id=\"{}\"{}>\n<div class=\"container\">\n{}{}{}{}</div>\n</section>",
        layout,
        html_escape(slug),
        section_style(section),
        title,
        subtitle,
        cards,
        elements
    )
}

/// Short index-page entry linking to a section's own page.
pub fn render_section_teaser(section: &Section, slug: &str) -> String {
    let title = if section.title.is_empty() {
        slug.to_string()
    } else {
        section.title.clone()
    };
    let summary = if !section.subtitle.is_empty() {
        section.subtitle.clone()
    } else {
        section
            .cards
            .first()
            .map(|c| c.title.clone())
            .unwrap_or_default()
    };
    format!(
        "<section class=\"section section-teaser\" id=\"{slug}\"{}>\n<div class=\"container\">\n<h2 class=\"section-title\">{}</h2>\n<p class=\"section-subtitle\">{}</p>\n<a class=\"btn btn-outlined\" href=\"{slug}.html\">Learn more</a>\n</div>\n</section>",
        section_style(section),
        html_escape(&title),
        html_escape(&summary),
        slug = html_escape(slug)
    )
}

/// Whether the contact block has anything to show.
pub fn has_contact(contact: &ContactData) -> bool {
    contact_form(contact).is_some()
        || !contact.email.trim().is_empty()
        || !contact.phone.trim().is_empty()
        || !contact.address.trim().is_empty()
}

fn contact_form(contact: &ContactData) -> Option<String> {
    if !contact.form_enabled {
        return None;
    }
    let (open, hidden) = match contact.form_action.as_deref().filter(|a| !a.trim().is_empty()) {
        Some(action) => (
            format!(
                "<form class=\"contact-form\" action=\"{}\" method=\"post\">",
                safe_url(action)
            ),
            "<input type=\"hidden\" name=\"_next\" value=\"merci.html\">".to_string(),
        ),
        None if !contact.email.trim().is_empty() => (
            format!(
                "<form class=\"contact-form\" action=\"merci.html\" method=\"get\" data-mailto=\"{}\">",
                html_escape(contact.email.trim())
            ),
            String::new(),
        ),
        None => return None,
    };

    let fields: String = contact
        .fields
        .iter()
        .filter(|f| !f.name.trim().is_empty())
        .map(|field| {
            let name = html_escape(field.name.trim());
            let label = if field.label.is_empty() {
                name.clone()
            } else {
                html_escape(&field.label)
            };
            let required = if field.required { " required" } else { "" };
            let input = match field.kind {
                FieldKind::Textarea => format!(
                    "<textarea id=\"field-{name}\" name=\"{name}\" rows=\"5\"{required}></textarea>"
                ),
                kind => {
                    let input_type = match kind {
                        FieldKind::Email => "email",
                        FieldKind::Tel => "tel",
                        _ => "text",
                    };
                    format!(
                        "<input id=\"field-{name}\" type=\"{input_type}\" name=\"{name}\"{required}>"
                    )
                }
            };
            format!(
                "<div class=\"form-field\"><label for=\"field-{name}\">{label}</label>{input}</div>"
            )
        })
        .collect();

    Some(format!(
        "{}{}{}<button class=\"btn btn-filled\" type=\"submit\">{}</button></form>",
        open,
        hidden,
        fields,
        html_escape(&contact.submit_label)
    ))
}

pub fn render_contact(contact: &ContactData) -> String {
    let mut details = String::new();
    let email = contact.email.trim();
    if !email.is_empty() {
        details.push_str(&format!(
            "<li><span aria-hidden=\"true\">&#9993;</span> <a href=\"mailto:{}\">{}</a></li>",
            html_escape(email),
            html_escape(email)
        ));
    }
    let phone = contact.phone.trim();
    if !phone.is_empty() {
        let dial: String = phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        details.push_str(&format!(
            "<li><span aria-hidden=\"true\">&#9742;</span> <a href=\"tel:{}\">{}</a></li>",
            dial,
            html_escape(phone)
        ));
    }
    if !contact.address.trim().is_empty() {
        details.push_str(&format!(
            "<li><span aria-hidden=\"true\">&#8962;</span> {}</li>",
            text_with_breaks(&contact.address)
        ));
    }
    let social = if contact.social_links.is_empty() {
        String::new()
    } else {
        render_social_links(&contact.social_links, 36, None)
    };
    let description = if contact.description.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", text_with_breaks(&contact.description))
    };
    let form = contact_form(contact).unwrap_or_default();

    format!(
        r#"<section class="section contact" id="contact">
<div class="container contact-grid">
<div class="contact-info"><h2 class="section-title">{}</h2>{}<ul class="contact-details">{}</ul>{}</div>
{}
</div>
</section>"#,
        html_escape(&contact.title),
        description,
        details,
        social,
        form
    )
}

pub fn render_footer(site: &SiteData, legal: &[LegalPage], year: i32) -> String {
    let links: Vec<String> = legal
        .iter()
        .map(|page| {
            format!(
                "<a href=\"{}\">{}</a>",
                page.file_name(),
                html_escape(page.default_title())
            )
        })
        .collect();
    let nav = if links.is_empty() {
        String::new()
    } else {
        format!("<nav class=\"legal-links\">{}</nav>", links.join(" &middot; "))
    };
    format!(
        r#"<footer class="site-footer">
  <div class="container footer-inner">
    <p>&copy; {} {}</p>
    {}
  </div>
</footer>"#,
        year,
        html_escape(&site.site_title()),
        nav
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_core::config::{ExportConfig, parse_site_json_str};
    use sitekit_images::MemoryImageStore;

    fn site(json: &str) -> SiteData {
        parse_site_json_str(json).unwrap()
    }

    #[test]
    fn test_header_nav_and_sticky() {
        let s = site(r#"{"headerData": {"siteName": "Bakery & Co", "sticky": true}}"#);
        let store = MemoryImageStore::new();
        let mut ctx = RenderContext::new(&s, &store, &ExportConfig::default());
        let nav = vec![
            NavItem {
                label: "Menu".into(),
                href: "#menu".into(),
            },
            NavItem {
                label: "Shop".into(),
                href: "https://shop.test".into(),
            },
        ];
        let html = render_header(&s, &nav, &mut ctx);
        assert!(html.contains("site-header sticky"));
        assert!(html.contains("<span>Bakery &amp; Co</span>"));
        assert!(html.contains("<a href=\"#menu\">Menu</a>"));
        assert!(html.contains("href=\"https://shop.test\" target=\"_blank\""));
    }

    #[test]
    fn test_hero_with_and_without_image() {
        let s = site(r#"{"heroData": {"title": "Welcome", "buttonText": "Call us"}}"#);
        let html = render_hero(&s, None, "#contact");
        assert!(!html.contains("hero-overlay"));
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("href=\"#contact\">Call us</a>"));

        let html = render_hero(&s, Some("assets/images/hero.jpg"), "index.html#contact");
        assert!(html.contains("background-image:url('assets/images/hero.jpg')"));
        assert!(html.contains("opacity:0.40"));
    }

    #[test]
    fn test_hero_background_cannot_break_out_of_url() {
        let s = site(r#"{"heroData": {"title": "Welcome"}}"#);
        let html = render_hero(&s, Some("https://x.test/a');color:red;('"), "#contact");
        assert!(html.contains("background-image:url('https://x.test/a%27%29;color:red;%28%27')"));
        assert!(!html.contains("');color:red"));
        assert!(!html.contains("&#x27;"));
    }

    #[test]
    fn test_section_renders_cards_and_elements() {
        let s = site(
            r##"{"sectionsData": [{
                "title": "Services",
                "layout": "list",
                "backgroundColor": "#fafafa",
                "cards": [{"title": "Bread", "text": "Daily", "link": "javascript:x"}],
                "elements": [{"type": "heading", "text": "More"}]
            }]}"##,
        );
        let store = MemoryImageStore::new();
        let mut ctx = RenderContext::new(&s, &store, &ExportConfig::default());
        let html = render_section(&s.sections[0], "services", &mut ctx);
        assert!(html.contains("class=\"section section-list\" id=\"services\" style=\"background-color:#fafafa\""));
        assert!(html.contains("<div class=\"cards cards-list\">"));
        assert!(html.contains("<h3>Bread</h3>"));
        assert!(html.contains("href=\"#\""));
        assert!(html.contains("el-heading"));
    }

    #[test]
    fn test_teaser_links_to_page() {
        let s = site(r#"{"sectionsData": [{"title": "About", "subtitle": "Who we are"}]}"#);
        let html = render_section_teaser(&s.sections[0], "about");
        assert!(html.contains("href=\"about.html\""));
        assert!(html.contains("Who we are"));
    }

    #[test]
    fn test_contact_form_mailto_fallback() {
        let s = site(r#"{"contactData": {"email": "hi@bakery.test", "phone": "+33 1 23"}}"#);
        let html = render_contact(&s.contact);
        assert!(html.contains("data-mailto=\"hi@bakery.test\""));
        assert!(html.contains("action=\"merci.html\""));
        assert!(html.contains("href=\"tel:+33123\""));
        assert!(html.contains("<textarea id=\"field-message\" name=\"message\" rows=\"5\" required>"));
    }

    #[test]
    fn test_contact_form_external_action() {
        let s = site(
            r#"{"contactData": {"formAction": "https://formspree.io/f/abc", "submitLabel": "Go"}}"#,
        );
        let html = render_contact(&s.contact);
        assert!(html.contains("action=\"https://formspree.io/f/abc\" method=\"post\""));
        assert!(html.contains("name=\"_next\" value=\"merci.html\""));
        assert!(html.contains(">Go</button>"));
    }

    #[test]
    fn test_has_contact() {
        assert!(!has_contact(&site(r#"{}"#).contact));
        assert!(has_contact(&site(r#"{"contactData": {"phone": "123"}}"#).contact));
        assert!(!has_contact(
            &site(r#"{"contactData": {"formEnabled": false}}"#).contact
        ));
    }

    #[test]
    fn test_footer_legal_links() {
        let s = site(r#"{"headerData": {"siteName": "Acme"}}"#);
        let html = render_footer(&s, &LegalPage::ALL, 2030);
        assert!(html.contains("&copy; 2030 Acme"));
        assert!(html.contains("<a href=\"privacy-policy.html\">Privacy Policy</a>"));
        assert!(html.contains("terms-of-service.html"));

        let html = render_footer(&s, &[], 2030);
        assert!(!html.contains("legal-links"));
    }
}
