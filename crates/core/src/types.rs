use crate::elements::ContentElement;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Everything the user authored for one site.
///
/// Field names match the JSON document produced by the editor
/// (`headerData`, `heroData`, `sectionsData`, ...). Every block is optional
/// on the wire; `null` and missing blocks load as their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteData {
    #[serde(rename = "headerData", deserialize_with = "nullable")]
    pub header: HeaderData,
    #[serde(rename = "heroData", deserialize_with = "nullable")]
    pub hero: HeroData,
    #[serde(rename = "sectionsData", deserialize_with = "deserialize_sections")]
    pub sections: Vec<Section>,
    #[serde(rename = "contactData", deserialize_with = "nullable")]
    pub contact: ContactData,
    #[serde(rename = "legalDocuments", deserialize_with = "nullable")]
    pub legal: LegalDocuments,
    #[serde(rename = "liveChatData", deserialize_with = "nullable")]
    pub live_chat: LiveChatData,
    #[serde(deserialize_with = "nullable")]
    pub theme: Theme,
    #[serde(deserialize_with = "nullable")]
    pub seo: Seo,
    #[serde(deserialize_with = "nullable")]
    pub cookie_consent: CookieConsent,
    #[serde(deserialize_with = "nullable")]
    pub age_verification: AgeVerification,
}

impl SiteData {
    /// Title used in `<title>` and the sitemap: SEO title, then site name,
    /// then hero title.
    pub fn site_title(&self) -> String {
        [
            self.seo.title.as_deref(),
            Some(self.header.site_name.as_str()),
            Some(self.hero.title.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or("Site")
        .to_string()
    }

    /// Unique slugs for every section, in order.
    ///
    /// Collisions get a numeric suffix (`about`, `about-2`, ...).
    pub fn section_slugs(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::with_capacity(self.sections.len());
        for (i, section) in self.sections.iter().enumerate() {
            let base = section.slug(i);
            let mut candidate = base.clone();
            let mut n = 2;
            while seen.contains(&candidate) {
                candidate = format!("{}-{}", base, n);
                n += 1;
            }
            seen.push(candidate);
        }
        seen
    }

    pub fn element_count(&self) -> usize {
        self.sections.iter().map(|s| s.elements.len()).sum()
    }

    pub fn card_count(&self) -> usize {
        self.sections.iter().map(|s| s.cards.len()).sum()
    }
}

/// Treat an explicit JSON `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `sectionsData` arrives either as an array or as an object keyed by id.
fn deserialize_sections<'de, D>(deserializer: D) -> Result<Vec<Section>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(D::Error::custom))
            .collect(),
        Value::Object(map) => map
            .into_iter()
            .map(|(key, v)| {
                let mut section: Section = serde_json::from_value(v).map_err(D::Error::custom)?;
                if section.id.trim().is_empty() {
                    section.id = key;
                }
                Ok(section)
            })
            .collect(),
        other => Err(D::Error::custom(format!(
            "sectionsData must be an array or an object, found {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Lowercase ASCII slug: alphanumerics kept, whitespace/`-`/`_` become
/// single dashes, everything else dropped.
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c)
            } else if c.is_whitespace() || c == '-' || c == '_' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// File names the exporter writes itself; sections may not shadow them.
pub const RESERVED_PAGE_SLUGS: &[&str] = &[
    "index",
    "merci",
    "privacy-policy",
    "cookie-policy",
    "terms-of-service",
    "sitemap",
    "robots",
    "assets",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderData {
    #[serde(alias = "title", alias = "siteTitle")]
    pub site_name: String,
    pub logo: Option<String>,
    #[serde(alias = "menuItems", alias = "navigation")]
    pub nav_links: Vec<NavLink>,
    pub background_color: String,
    pub text_color: String,
    pub sticky: bool,
}

impl Default for HeaderData {
    fn default() -> Self {
        Self {
            site_name: String::new(),
            logo: None,
            nav_links: Vec::new(),
            background_color: "#ffffff".to_string(),
            text_color: "#1f2937".to_string(),
            sticky: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavLink {
    #[serde(alias = "text", alias = "title")]
    pub label: String,
    #[serde(alias = "url", alias = "link")]
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroData {
    pub title: String,
    #[serde(alias = "description")]
    pub subtitle: String,
    #[serde(alias = "backgroundImageUrl", alias = "image")]
    pub background_image: Option<String>,
    pub background_color: String,
    pub text_color: String,
    #[serde(alias = "ctaText")]
    pub button_text: String,
    #[serde(alias = "ctaLink")]
    pub button_link: String,
    pub overlay_opacity: f32,
}

impl Default for HeroData {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            background_image: None,
            background_color: "#1a1a2e".to_string(),
            text_color: "#ffffff".to_string(),
            button_text: String::new(),
            button_link: "#contact".to_string(),
            overlay_opacity: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionLayout {
    List,
    Columns,
    #[default]
    #[serde(other)]
    Grid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(alias = "description")]
    pub subtitle: String,
    pub layout: SectionLayout,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    #[serde(alias = "items")]
    pub cards: Vec<Card>,
    #[serde(alias = "contentElements")]
    pub elements: Vec<ContentElement>,
}

impl Section {
    /// URL-safe slug from the id, else the title, else `section-<n>`.
    ///
    /// Slugs that collide with exporter-owned pages get a `-section` suffix.
    pub fn slug(&self, index: usize) -> String {
        let from_id = slugify(&self.id);
        let base = if !from_id.is_empty() {
            from_id
        } else {
            slugify(&self.title)
        };

        if base.is_empty() {
            format!("section-{}", index + 1)
        } else if RESERVED_PAGE_SLUGS.contains(&base.as_str()) {
            format!("{}-section", base)
        } else {
            base
        }
    }

    /// File name of this section's page in multi-page exports.
    pub fn page_file_name(&self, index: usize) -> String {
        format!("{}.html", self.slug(index))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Card {
    pub title: String,
    #[serde(alias = "description", alias = "content")]
    pub text: String,
    #[serde(alias = "imageUrl")]
    pub image: Option<String>,
    pub link: Option<String>,
    pub button_text: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactData {
    pub title: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub form_enabled: bool,
    pub fields: Vec<FormField>,
    pub submit_label: String,
    /// External form endpoint; when absent the form posts to `merci.html`.
    pub form_action: Option<String>,
    pub social_links: Vec<SocialLink>,
}

impl Default for ContactData {
    fn default() -> Self {
        Self {
            title: "Contact".to_string(),
            description: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            form_enabled: true,
            fields: vec![
                FormField::new("name", "Name", FieldKind::Text),
                FormField::new("email", "Email", FieldKind::Email),
                FormField::new("message", "Message", FieldKind::Textarea),
            ],
            submit_label: "Send".to_string(),
            form_action: None,
            social_links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Email,
    Tel,
    Textarea,
    #[default]
    #[serde(other)]
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: true,
        }
    }
}

impl Default for FormField {
    fn default() -> Self {
        Self::new("", "", FieldKind::Text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLink {
    #[serde(alias = "network", alias = "name")]
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalDocuments {
    #[serde(alias = "privacy")]
    pub privacy_policy: Option<LegalDocument>,
    #[serde(alias = "cookies", alias = "cookiesPolicy")]
    pub cookie_policy: Option<LegalDocument>,
    #[serde(alias = "terms", alias = "termsOfUse")]
    pub terms_of_service: Option<LegalDocument>,
}

/// A legal page body in markdown. A bare string on the wire is its content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawLegalDocument")]
pub struct LegalDocument {
    pub title: String,
    pub content: String,
    pub last_updated: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLegalDocument {
    Text(String),
    #[serde(rename_all = "camelCase")]
    Full {
        #[serde(default)]
        title: String,
        #[serde(default)]
        content: String,
        #[serde(default)]
        last_updated: Option<String>,
    },
}

impl From<RawLegalDocument> for LegalDocument {
    fn from(raw: RawLegalDocument) -> Self {
        match raw {
            RawLegalDocument::Text(content) => LegalDocument {
                content,
                ..Default::default()
            },
            RawLegalDocument::Full {
                title,
                content,
                last_updated,
            } => LegalDocument {
                title,
                content,
                last_updated,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatProvider {
    Tawk,
    Crisp,
    #[default]
    #[serde(other)]
    Custom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChatPosition {
    BottomLeft,
    #[default]
    #[serde(other)]
    BottomRight,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiveChatData {
    pub enabled: bool,
    pub provider: ChatProvider,
    #[serde(alias = "propertyId", alias = "websiteId")]
    pub widget_id: String,
    #[serde(alias = "welcomeMessage")]
    pub greeting: String,
    pub position: ChatPosition,
    pub color: String,
    /// Where the custom bubble sends visitors (mailto:, WhatsApp link, ...).
    pub contact_url: Option<String>,
}

impl Default for LiveChatData {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: ChatProvider::Custom,
            widget_id: String::new(),
            greeting: "Hi! How can we help?".to_string(),
            position: ChatPosition::BottomRight,
            color: "#4f46e5".to_string(),
            contact_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieConsent {
    pub enabled: bool,
    pub message: String,
    pub accept_label: String,
    pub decline_label: String,
    pub policy_link_label: String,
}

impl Default for CookieConsent {
    fn default() -> Self {
        Self {
            enabled: false,
            message: "This site uses cookies to improve your experience.".to_string(),
            accept_label: "Accept".to_string(),
            decline_label: "Decline".to_string(),
            policy_link_label: "Learn more".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgeVerification {
    pub enabled: bool,
    pub minimum_age: u8,
    pub message: String,
    pub exit_url: String,
}

impl Default for AgeVerification {
    fn default() -> Self {
        Self {
            enabled: false,
            minimum_age: 18,
            message: String::new(),
            exit_url: "https://www.google.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub font_family: String,
    pub heading_font: Option<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#4f46e5".to_string(),
            secondary_color: "#06b6d4".to_string(),
            background_color: "#ffffff".to_string(),
            text_color: "#1f2937".to_string(),
            font_family: "system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif".to_string(),
            heading_font: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seo {
    pub title: Option<String>,
    pub description: String,
    /// Public URL of the deployed site; enables canonical links and absolute sitemap entries.
    pub base_url: Option<String>,
    pub language: String,
    pub keywords: Vec<String>,
}

impl Default for Seo {
    fn default() -> Self {
        Self {
            title: None,
            description: String::new(),
            base_url: None,
            language: "en".to_string(),
            keywords: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("About Us"), "about-us");
        assert_eq!(slugify("  Our   Services "), "our-services");
        assert_eq!(slugify("Café & Bar"), "caf-bar");
        assert_eq!(slugify("snake_case-id"), "snake-case-id");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_section_slug_fallbacks() {
        let section = Section {
            title: "Our Team".to_string(),
            ..Default::default()
        };
        assert_eq!(section.slug(0), "our-team");

        let section = Section {
            id: "team_1".to_string(),
            title: "Our Team".to_string(),
            ..Default::default()
        };
        assert_eq!(section.slug(0), "team-1");

        let section = Section::default();
        assert_eq!(section.slug(3), "section-4");
        assert_eq!(section.page_file_name(3), "section-4.html");
    }

    #[test]
    fn test_section_slug_avoids_reserved_pages() {
        let section = Section {
            title: "Index".to_string(),
            ..Default::default()
        };
        assert_eq!(section.slug(0), "index-section");

        let section = Section {
            id: "privacy-policy".to_string(),
            ..Default::default()
        };
        assert_eq!(section.page_file_name(0), "privacy-policy-section.html");
    }

    #[test]
    fn test_section_slugs_are_unique() {
        let site = SiteData {
            sections: vec![
                Section {
                    title: "About".to_string(),
                    ..Default::default()
                },
                Section {
                    title: "About".to_string(),
                    ..Default::default()
                },
                Section {
                    title: "about".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(site.section_slugs(), vec!["about", "about-2", "about-3"]);
    }

    #[test]
    fn test_site_title_fallbacks() {
        let mut site = SiteData::default();
        assert_eq!(site.site_title(), "Site");

        site.hero.title = "Welcome".to_string();
        assert_eq!(site.site_title(), "Welcome");

        site.header.site_name = "Acme".to_string();
        assert_eq!(site.site_title(), "Acme");

        site.seo.title = Some("  ".to_string());
        assert_eq!(site.site_title(), "Acme");

        site.seo.title = Some("Acme Bakery".to_string());
        assert_eq!(site.site_title(), "Acme Bakery");
    }

    #[test]
    fn test_sections_from_array_and_object() {
        let site: SiteData = serde_json::from_str(
            r#"{"sectionsData": [{"id": "a", "title": "A"}, {"title": "B"}]}"#,
        )
        .unwrap();
        assert_eq!(site.sections.len(), 2);
        assert_eq!(site.sections[1].title, "B");

        let site: SiteData = serde_json::from_str(
            r#"{"sectionsData": {"services": {"title": "Services"}, "team": {"id": "crew", "title": "Team"}}}"#,
        )
        .unwrap();
        assert_eq!(site.sections.len(), 2);
        assert_eq!(site.sections[0].id, "services");
        assert_eq!(site.sections[1].id, "crew");
    }

    #[test]
    fn test_null_blocks_use_defaults() {
        let site: SiteData = serde_json::from_str(
            r#"{"heroData": null, "sectionsData": null, "contactData": null}"#,
        )
        .unwrap();
        assert!(site.sections.is_empty());
        assert_eq!(site.hero.text_color, "#ffffff");
        assert_eq!(site.contact.fields.len(), 3);
    }

    #[test]
    fn test_sections_rejects_scalar() {
        let result: Result<SiteData, _> = serde_json::from_str(r#"{"sectionsData": 3}"#);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("a number"));
    }

    #[test]
    fn test_legal_document_accepts_plain_string() {
        let legal: LegalDocuments = serde_json::from_str(
            r#"{"privacyPolicy": "We respect your privacy.", "terms": {"title": "Terms", "content": "Be nice."}}"#,
        )
        .unwrap();
        assert_eq!(
            legal.privacy_policy.unwrap().content,
            "We respect your privacy."
        );
        let terms = legal.terms_of_service.unwrap();
        assert_eq!(terms.title, "Terms");
        assert_eq!(terms.content, "Be nice.");
        assert!(legal.cookie_policy.is_none());
    }

    #[test]
    fn test_unknown_enum_values_fall_back() {
        let chat: LiveChatData =
            serde_json::from_str(r#"{"enabled": true, "provider": "intercom", "position": "top"}"#)
                .unwrap();
        assert_eq!(chat.provider, ChatProvider::Custom);
        assert_eq!(chat.position, ChatPosition::BottomRight);

        let section: Section = serde_json::from_str(r#"{"layout": "masonry"}"#).unwrap();
        assert_eq!(section.layout, SectionLayout::Grid);

        let field: FormField = serde_json::from_str(r#"{"name": "when", "type": "date"}"#).unwrap();
        assert_eq!(field.kind, FieldKind::Text);
    }

    #[test]
    fn test_known_enum_values_parse() {
        let section: Section = serde_json::from_str(r#"{"layout": "columns"}"#).unwrap();
        assert_eq!(section.layout, SectionLayout::Columns);

        let field: FormField = serde_json::from_str(r#"{"type": "textarea"}"#).unwrap();
        assert_eq!(field.kind, FieldKind::Textarea);

        let chat: LiveChatData = serde_json::from_str(r#"{"position": "bottom-left"}"#).unwrap();
        assert_eq!(chat.position, ChatPosition::BottomLeft);
        assert_eq!(LiveChatData::default().position, ChatPosition::BottomRight);
    }
}
