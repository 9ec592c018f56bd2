//! Pre-export checks over site data.
//!
//! Export itself never fails on bad content; it degrades to defaults and
//! placeholders. This report tells the author what will degrade before it does.

use sitekit_core::types::{ChatProvider, SiteData};
use sitekit_core::{ContentElement, parse_color};
use sitekit_images::{ImageResolver, ImageStore};

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Validate site data against the image cache it will be exported with.
pub fn validate_site(site: &SiteData, store: &dyn ImageStore) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_title(site, &mut report);
    check_colors(site, &mut report);
    check_links(site, &mut report);
    check_sections(site, &mut report);
    check_contact(site, &mut report);
    check_features(site, &mut report);
    check_images(site, store, &mut report);

    report.info.push(format!("Sections: {}", site.sections.len()));
    report.info.push(format!("Cards: {}", site.card_count()));
    report
        .info
        .push(format!("Content elements: {}", site.element_count()));
    match store.list() {
        Ok(images) => report.info.push(format!("Cached images: {}", images.len())),
        Err(e) => report.warn(format!("Image cache could not be listed: {}", e)),
    }

    log::debug!(
        "validation finished: {} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    );
    report
}

fn check_title(site: &SiteData, report: &mut ValidationReport) {
    if site.site_title() == "Site" {
        report.warn("No site title: set seo.title, headerData.siteName or heroData.title");
    }
}

fn check_colors(site: &SiteData, report: &mut ValidationReport) {
    let theme = [
        ("theme.primaryColor", &site.theme.primary_color),
        ("theme.secondaryColor", &site.theme.secondary_color),
        ("theme.backgroundColor", &site.theme.background_color),
        ("theme.textColor", &site.theme.text_color),
    ];
    for (field, value) in theme {
        if parse_color(value).is_none() {
            report.error(format!("Invalid color in {}: '{}'", field, value));
        }
    }

    let mut optional: Vec<(String, &str)> = vec![
        ("headerData.backgroundColor".into(), site.header.background_color.as_str()),
        ("headerData.textColor".into(), site.header.text_color.as_str()),
        ("heroData.backgroundColor".into(), site.hero.background_color.as_str()),
        ("heroData.textColor".into(), site.hero.text_color.as_str()),
        ("liveChatData.color".into(), site.live_chat.color.as_str()),
    ];
    for (i, section) in site.sections.iter().enumerate() {
        if let Some(c) = &section.background_color {
            optional.push((format!("sectionsData[{}].backgroundColor", i), c.as_str()));
        }
        if let Some(c) = &section.text_color {
            optional.push((format!("sectionsData[{}].textColor", i), c.as_str()));
        }
        for (j, card) in section.cards.iter().enumerate() {
            if let Some(c) = &card.background_color {
                optional.push((
                    format!("sectionsData[{}].cards[{}].backgroundColor", i, j),
                    c.as_str(),
                ));
            }
        }
    }
    for (field, value) in optional {
        if parse_color(value).is_none() {
            report.warn(format!(
                "Invalid color in {}: '{}' (default will be used)",
                field, value
            ));
        }
    }
}

fn is_script_url(url: &str) -> bool {
    let compact: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    compact.to_ascii_lowercase().starts_with("javascript:")
}

fn check_links(site: &SiteData, report: &mut ValidationReport) {
    let mut links: Vec<(&str, &str)> = site
        .header
        .nav_links
        .iter()
        .map(|l| ("headerData.navLinks", l.href.as_str()))
        .collect();
    links.push(("heroData.buttonLink", site.hero.button_link.as_str()));
    for section in &site.sections {
        for card in &section.cards {
            if let Some(link) = &card.link {
                links.push(("card.link", link.as_str()));
            }
        }
    }
    for (field, url) in links {
        if is_script_url(url) {
            report.error(format!("Script URL not allowed in {}: '{}'", field, url));
        }
    }
}

fn check_sections(site: &SiteData, report: &mut ValidationReport) {
    if site.sections.is_empty() {
        report.warn("Site has no sections");
    }

    let slugs = site.section_slugs();
    for (i, (section, slug)) in site.sections.iter().zip(&slugs).enumerate() {
        if *slug != section.slug(i) {
            report.warn(format!(
                "Section '{}' shares its slug with an earlier section, exported as '{}'",
                section.title, slug
            ));
        }

        for element in &section.elements {
            if let ContentElement::Unsupported { kind, reason } = element {
                let kind = if kind.is_empty() { "<untyped>" } else { kind.as_str() };
                report.warn(format!(
                    "Section '{}': content element '{}' will be skipped ({})",
                    section.title, kind, reason
                ));
            }
        }
    }
}

fn check_contact(site: &SiteData, report: &mut ValidationReport) {
    let contact = &site.contact;
    if contact.form_enabled && contact.email.trim().is_empty() && contact.form_action.is_none() {
        report.error("Contact form is enabled but has neither an email nor a formAction");
    }
    if !contact.email.is_empty() && !contact.email.contains('@') {
        report.warn(format!("Contact email looks invalid: '{}'", contact.email));
    }
    if let Some(action) = &contact.form_action
        && !(action.starts_with("https://") || action.starts_with('/'))
    {
        report.warn(format!(
            "Contact formAction should be an https:// URL: '{}'",
            action
        ));
    }
}

fn check_features(site: &SiteData, report: &mut ValidationReport) {
    if site.cookie_consent.enabled && site.legal.cookie_policy.is_none() {
        report.warn("Cookie consent is enabled but no cookie policy was written; default text will be used");
    }

    let chat = &site.live_chat;
    if chat.enabled {
        match chat.provider {
            ChatProvider::Tawk | ChatProvider::Crisp if chat.widget_id.trim().is_empty() => {
                report.warn("Live chat is enabled without a widgetId; the widget will be skipped");
            }
            ChatProvider::Custom
                if chat.contact_url.is_none() && site.contact.email.trim().is_empty() =>
            {
                report.warn("Custom live chat has no contactUrl or contact email to send visitors to");
            }
            _ => {}
        }
    }

    if site.age_verification.enabled && site.age_verification.minimum_age == 0 {
        report.warn("Age verification is enabled with a minimum age of 0");
    }
}

fn check_images(site: &SiteData, store: &dyn ImageStore, report: &mut ValidationReport) {
    let mut resolver = ImageResolver::new(store);

    let mut refs: Vec<&str> = Vec::new();
    refs.extend(site.header.logo.as_deref());
    refs.extend(site.hero.background_image.as_deref());
    for section in &site.sections {
        refs.extend(section.cards.iter().filter_map(|c| c.image.as_deref()));
        for element in &section.elements {
            refs.extend(element.image_refs());
        }
    }

    for reference in refs.into_iter().filter(|r| !r.trim().is_empty()) {
        resolver.resolve(reference);
    }
    for missing in resolver.unresolved() {
        report.warn(format!(
            "Image '{}' is not in the cache; a placeholder will be exported",
            missing
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_core::config::parse_site_json_str;
    use sitekit_images::{ImageMetadata, MemoryImageStore};

    fn site(json: &str) -> SiteData {
        parse_site_json_str(json).unwrap()
    }

    #[test]
    fn test_minimal_valid_site() {
        let s = site(
            r#"{
                "headerData": {"siteName": "Acme"},
                "sectionsData": [{"title": "About"}],
                "contactData": {"email": "hi@acme.test"}
            }"#,
        );
        let report = validate_site(&s, &MemoryImageStore::new());
        assert!(report.is_ok(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(report.info.iter().any(|i| i == "Sections: 1"));
        assert!(report.info.iter().any(|i| i == "Cached images: 0"));
    }

    #[test]
    fn test_contact_form_without_destination_is_error() {
        let s = site(r#"{"headerData": {"siteName": "A"}, "sectionsData": [{"title": "x"}]}"#);
        let report = validate_site(&s, &MemoryImageStore::new());
        assert!(!report.is_ok());
        assert!(report.errors[0].contains("Contact form"));
    }

    #[test]
    fn test_invalid_theme_color_is_error() {
        let s = site(
            r#"{"theme": {"primaryColor": "blue;}"}, "contactData": {"formEnabled": false}}"#,
        );
        let report = validate_site(&s, &MemoryImageStore::new());
        assert!(report.errors.iter().any(|e| e.contains("theme.primaryColor")));
    }

    #[test]
    fn test_invalid_section_color_is_warning() {
        let s = site(
            r#"{"sectionsData": [{"title": "A", "backgroundColor": "nope"}], "contactData": {"formEnabled": false}}"#,
        );
        let report = validate_site(&s, &MemoryImageStore::new());
        assert!(report.is_ok());
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.contains("sectionsData[0].backgroundColor"))
        );
    }

    #[test]
    fn test_script_urls_are_errors() {
        let s = site(
            r#"{"headerData": {"navLinks": [{"label": "x", "href": "java script:alert(1)"}]}, "contactData": {"formEnabled": false}}"#,
        );
        let report = validate_site(&s, &MemoryImageStore::new());
        assert!(report.errors.iter().any(|e| e.contains("Script URL")));
    }

    #[test]
    fn test_unsupported_elements_and_duplicate_slugs_warn() {
        let s = site(
            r#"{
                "sectionsData": [
                    {"title": "News", "elements": [{"type": "hologram"}]},
                    {"title": "News"}
                ],
                "contactData": {"formEnabled": false}
            }"#,
        );
        let report = validate_site(&s, &MemoryImageStore::new());
        assert!(report.warnings.iter().any(|w| w.contains("'hologram'")));
        assert!(report.warnings.iter().any(|w| w.contains("'news-2'")));
    }

    #[test]
    fn test_missing_images_warn() {
        let mut store = MemoryImageStore::new();
        store
            .save(
                b"x",
                ImageMetadata {
                    key: "hero-1.jpg".to_string(),
                    original_name: "hero.png".to_string(),
                    ..Default::default()
                },
            )
            .unwrap();
        let s = site(
            r#"{
                "heroData": {"title": "Hi", "backgroundImage": "hero.png"},
                "sectionsData": [{"title": "A", "cards": [{"title": "c", "image": "gone.jpg"}]}],
                "contactData": {"formEnabled": false}
            }"#,
        );
        let report = validate_site(&s, &store);
        let image_warnings: Vec<_> = report
            .warnings
            .iter()
            .filter(|w| w.contains("not in the cache"))
            .collect();
        assert_eq!(image_warnings.len(), 1);
        assert!(image_warnings[0].contains("gone.jpg"));
    }

    #[test]
    fn test_feature_warnings() {
        let s = site(
            r#"{
                "headerData": {"siteName": "A"},
                "sectionsData": [{"title": "x"}],
                "contactData": {"formEnabled": false},
                "cookieConsent": {"enabled": true},
                "liveChatData": {"enabled": true, "provider": "crisp"},
                "ageVerification": {"enabled": true, "minimumAge": 0}
            }"#,
        );
        let report = validate_site(&s, &MemoryImageStore::new());
        assert!(report.is_ok());
        assert!(report.warnings.iter().any(|w| w.contains("cookie policy")));
        assert!(report.warnings.iter().any(|w| w.contains("widgetId")));
        assert!(report.warnings.iter().any(|w| w.contains("minimum age")));
    }
}
