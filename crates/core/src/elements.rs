//! Content elements: independently renderable blocks placed inside a section.
//!
//! On the wire an element is an object with a `type` tag and its properties
//! either flattened next to the tag or nested under `data`. Both shapes load;
//! when both are present, `data` wins. An element that cannot be understood
//! loads as [`ContentElement::Unsupported`] instead of failing the document.

use crate::types::SocialLink;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ContentElement {
    Heading(Heading),
    Paragraph(Paragraph),
    Image(ImageElement),
    Button(Button),
    Divider(Divider),
    Spacer(Spacer),
    Quote(Quote),
    List(ListElement),
    Accordion(Accordion),
    Tabs(Tabs),
    ProgressBar(ProgressBar),
    Rating(Rating),
    Counter(Counter),
    Countdown(Countdown),
    Timeline(Timeline),
    PricingTable(PricingTable),
    Testimonial(Testimonial),
    Video(Video),
    Map(MapElement),
    QrCode(QrCode),
    Chart(Chart),
    ShareButtons(ShareButtons),
    SocialLinks(SocialLinks),
    CodeBlock(CodeBlock),
    Alert(Alert),
    Table(Table),
    Gallery(Gallery),
    Stats(Stats),
    Embed(Embed),
    Unsupported { kind: String, reason: String },
}

impl<'de> Deserialize<'de> for ContentElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(Value::deserialize(deserializer)?))
    }
}

impl ContentElement {
    /// Build an element from its JSON form. Never fails.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut obj) = value else {
            return Self::unsupported("", "element is not an object");
        };

        let kind = match obj.remove("type") {
            Some(Value::String(tag)) => normalize_kind(&tag),
            _ => return Self::unsupported("", "missing element type"),
        };

        let props = match obj.remove("data") {
            Some(Value::Object(data)) => {
                let mut merged = obj;
                merged.extend(data);
                merged
            }
            _ => obj,
        };

        let parsed = match kind.as_str() {
            "heading" => parse(props).map(Self::Heading),
            "paragraph" => parse(props).map(Self::Paragraph),
            "image" => parse(props).map(Self::Image),
            "button" => parse(props).map(Self::Button),
            "divider" => parse(props).map(Self::Divider),
            "spacer" => parse(props).map(Self::Spacer),
            "quote" => parse(props).map(Self::Quote),
            "list" => parse(props).map(Self::List),
            "accordion" => parse(props).map(Self::Accordion),
            "tabs" => parse(props).map(Self::Tabs),
            "progress-bar" => parse(props).map(Self::ProgressBar),
            "rating" => parse(props).map(Self::Rating),
            "counter" => parse(props).map(Self::Counter),
            "countdown" => parse(props).map(Self::Countdown),
            "timeline" => parse(props).map(Self::Timeline),
            "pricing-table" => parse(props).map(Self::PricingTable),
            "testimonial" => parse(props).map(Self::Testimonial),
            "video" => parse(props).map(Self::Video),
            "map" => parse(props).map(Self::Map),
            "qr-code" => parse(props).map(Self::QrCode),
            "chart" => parse(props).map(Self::Chart),
            "share-buttons" => parse(props).map(Self::ShareButtons),
            "social-links" => parse(props).map(Self::SocialLinks),
            "code-block" => parse(props).map(Self::CodeBlock),
            "alert" => parse(props).map(Self::Alert),
            "table" => parse(props).map(Self::Table),
            "gallery" => parse(props).map(Self::Gallery),
            "stats" => parse(props).map(Self::Stats),
            "embed" => parse(props).map(Self::Embed),
            _ => {
                log::debug!("unknown content element type '{}'", kind);
                return Self::unsupported(&kind, "unknown element type");
            }
        };

        parsed.unwrap_or_else(|e| {
            log::debug!("content element '{}' has invalid properties: {}", kind, e);
            Self::unsupported(&kind, &e.to_string())
        })
    }

    fn unsupported(kind: &str, reason: &str) -> Self {
        Self::Unsupported {
            kind: kind.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Canonical kebab-case tag of this element.
    pub fn kind(&self) -> &str {
        match self {
            Self::Heading(_) => "heading",
            Self::Paragraph(_) => "paragraph",
            Self::Image(_) => "image",
            Self::Button(_) => "button",
            Self::Divider(_) => "divider",
            Self::Spacer(_) => "spacer",
            Self::Quote(_) => "quote",
            Self::List(_) => "list",
            Self::Accordion(_) => "accordion",
            Self::Tabs(_) => "tabs",
            Self::ProgressBar(_) => "progress-bar",
            Self::Rating(_) => "rating",
            Self::Counter(_) => "counter",
            Self::Countdown(_) => "countdown",
            Self::Timeline(_) => "timeline",
            Self::PricingTable(_) => "pricing-table",
            Self::Testimonial(_) => "testimonial",
            Self::Video(_) => "video",
            Self::Map(_) => "map",
            Self::QrCode(_) => "qr-code",
            Self::Chart(_) => "chart",
            Self::ShareButtons(_) => "share-buttons",
            Self::SocialLinks(_) => "social-links",
            Self::CodeBlock(_) => "code-block",
            Self::Alert(_) => "alert",
            Self::Table(_) => "table",
            Self::Gallery(_) => "gallery",
            Self::Stats(_) => "stats",
            Self::Embed(_) => "embed",
            Self::Unsupported { kind, .. } => kind,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported { .. })
    }

    /// Image references carried by this element, in render order.
    pub fn image_refs(&self) -> Vec<&str> {
        match self {
            Self::Image(img) => vec![img.src.as_str()],
            Self::Testimonial(t) => t.avatar.as_deref().into_iter().collect(),
            Self::Gallery(g) => g.images.iter().map(|i| i.src.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn parse<T: DeserializeOwned>(props: Map<String, Value>) -> serde_json::Result<T> {
    serde_json::from_value(Value::Object(props))
}

/// Map any spelling of an element tag (`progressBar`, `progress_bar`,
/// `ProgressBar`, legacy aliases) to its kebab-case form.
pub fn normalize_kind(tag: &str) -> String {
    let mut kebab = String::with_capacity(tag.len() + 4);
    for (i, c) in tag.trim().chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !kebab.ends_with('-') {
                kebab.push('-');
            }
            kebab.push(c.to_ascii_lowercase());
        } else if c == '_' || c == ' ' {
            kebab.push('-');
        } else {
            kebab.push(c);
        }
    }

    let canonical = match kebab.as_str() {
        "title" | "header" => "heading",
        "text" | "rich-text" => "paragraph",
        "img" | "picture" => "image",
        "cta" | "link-button" => "button",
        "separator" | "hr" => "divider",
        "blockquote" => "quote",
        "faq" => "accordion",
        "progress" => "progress-bar",
        "star-rating" | "stars" => "rating",
        "stat-counter" | "animated-counter" => "counter",
        "countdown-timer" | "timer" => "countdown",
        "pricing" => "pricing-table",
        "review" => "testimonial",
        "youtube" | "vimeo" => "video",
        "google-map" | "google-maps" => "map",
        "qrcode" | "qr" | "q-r-code" => "qr-code",
        "bar-chart" | "line-chart" | "pie-chart" => "chart",
        "share" | "social-share" => "share-buttons",
        "social" | "social-icons" => "social-links",
        "code" => "code-block",
        "notice" | "callout" => "alert",
        "image-gallery" | "carousel" => "gallery",
        "statistics" | "stat" => "stats",
        "html" | "custom-html" => "embed",
        other => other,
    };
    canonical.to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Center,
    Right,
    #[default]
    #[serde(other)]
    Left,
}

impl Align {
    pub fn as_css(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Heading {
    #[serde(alias = "content", alias = "title")]
    pub text: String,
    pub level: u8,
    pub align: Align,
    pub color: Option<String>,
}

impl Default for Heading {
    fn default() -> Self {
        Self {
            text: String::new(),
            level: 2,
            align: Align::Left,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    #[serde(alias = "content")]
    pub text: String,
    pub align: Align,
    pub color: Option<String>,
    pub font_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageElement {
    #[serde(alias = "url", alias = "imageUrl", alias = "image")]
    pub src: String,
    pub alt: String,
    pub caption: Option<String>,
    pub width: Option<String>,
    pub rounded: bool,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Outlined,
    Text,
    #[default]
    #[serde(other)]
    Filled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Button {
    #[serde(alias = "label")]
    pub text: String,
    #[serde(alias = "link", alias = "href")]
    pub url: String,
    #[serde(alias = "variant")]
    pub style: ButtonStyle,
    pub background_color: Option<String>,
    pub text_color: String,
    pub align: Align,
    pub new_tab: bool,
}

impl Default for Button {
    fn default() -> Self {
        Self {
            text: "Click here".to_string(),
            url: "#".to_string(),
            style: ButtonStyle::Filled,
            background_color: None,
            text_color: "#ffffff".to_string(),
            align: Align::Left,
            new_tab: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Divider {
    pub color: String,
    pub thickness: u32,
    pub style: String,
    pub width: String,
}

impl Default for Divider {
    fn default() -> Self {
        Self {
            color: "#e5e7eb".to_string(),
            thickness: 1,
            style: "solid".to_string(),
            width: "100%".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spacer {
    pub height: u32,
}

impl Default for Spacer {
    fn default() -> Self {
        Self { height: 40 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quote {
    #[serde(alias = "content", alias = "quote")]
    pub text: String,
    pub author: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListElement {
    pub items: Vec<String>,
    pub ordered: bool,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccordionItem {
    #[serde(alias = "question")]
    pub title: String,
    #[serde(alias = "answer", alias = "text")]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Accordion {
    pub items: Vec<AccordionItem>,
    pub allow_multiple: bool,
    pub accent_color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabItem {
    #[serde(alias = "title")]
    pub label: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tabs {
    #[serde(alias = "items")]
    pub tabs: Vec<TabItem>,
    pub accent_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressBar {
    pub label: String,
    #[serde(alias = "progress", alias = "percentage")]
    pub value: f64,
    pub max: f64,
    pub color: Option<String>,
    pub show_percentage: bool,
    pub height: u32,
}

impl ProgressBar {
    /// Fill percentage clamped to `0..=100`; a non-positive max reads as empty.
    pub fn percent(&self) -> f64 {
        if self.max <= 0.0 || !self.value.is_finite() {
            return 0.0;
        }
        (self.value / self.max * 100.0).clamp(0.0, 100.0)
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self {
            label: String::new(),
            value: 0.0,
            max: 100.0,
            color: None,
            show_percentage: true,
            height: 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rating {
    #[serde(alias = "rating")]
    pub value: f64,
    #[serde(alias = "maxRating")]
    pub max: u8,
    pub color: String,
    pub label: Option<String>,
    pub show_value: bool,
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            value: 4.0,
            max: 5,
            color: "#f5b301".to_string(),
            label: None,
            show_value: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Counter {
    #[serde(alias = "end", alias = "target")]
    pub value: f64,
    pub prefix: String,
    pub suffix: String,
    pub label: String,
    pub duration_ms: u32,
    pub color: Option<String>,
}

impl Default for Counter {
    fn default() -> Self {
        Self {
            value: 0.0,
            prefix: String::new(),
            suffix: String::new(),
            label: String::new(),
            duration_ms: 2000,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Countdown {
    /// ISO 8601 date or date-time.
    #[serde(alias = "date", alias = "endDate")]
    pub target_date: String,
    pub label: String,
    pub expired_text: String,
    pub color: Option<String>,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            target_date: String::new(),
            label: String::new(),
            expired_text: "The event has started".to_string(),
            color: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineItem {
    pub date: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timeline {
    #[serde(alias = "events")]
    pub items: Vec<TimelineItem>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingPlan {
    pub name: String,
    pub price: String,
    pub period: String,
    pub features: Vec<String>,
    pub button_text: String,
    pub button_link: String,
    #[serde(alias = "featured", alias = "popular")]
    pub highlighted: bool,
}

impl Default for PricingPlan {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            period: "/month".to_string(),
            features: Vec::new(),
            button_text: "Choose".to_string(),
            button_link: "#contact".to_string(),
            highlighted: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingTable {
    pub plans: Vec<PricingPlan>,
    pub currency: String,
    pub accent_color: Option<String>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            plans: Vec::new(),
            currency: "€".to_string(),
            accent_color: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    #[serde(alias = "text", alias = "content")]
    pub quote: String,
    #[serde(alias = "name")]
    pub author: String,
    pub role: String,
    pub avatar: Option<String>,
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Video {
    #[serde(alias = "src", alias = "videoUrl")]
    pub url: String,
    pub title: String,
    pub autoplay: bool,
    pub controls: bool,
}

impl Default for Video {
    fn default() -> Self {
        Self {
            url: String::new(),
            title: "Video".to_string(),
            autoplay: false,
            controls: true,
        }
    }
}

impl Video {
    /// Embed URL for YouTube/Vimeo links, `None` for direct video files.
    pub fn embed_url(&self) -> Option<String> {
        let url = self.url.trim();
        let youtube_id = if let Some(rest) = url.split_once("youtube.com/watch?v=") {
            Some(rest.1)
        } else if let Some(rest) = url.split_once("youtu.be/") {
            Some(rest.1)
        } else if let Some(rest) = url.split_once("youtube.com/embed/") {
            Some(rest.1)
        } else {
            None
        };

        if let Some(id) = youtube_id {
            let id: String = id
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .collect();
            if id.is_empty() {
                return None;
            }
            let autoplay = if self.autoplay { "?autoplay=1&mute=1" } else { "" };
            return Some(format!("https://www.youtube.com/embed/{}{}", id, autoplay));
        }

        if let Some((_, rest)) = url.split_once("vimeo.com/") {
            let id: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            if !id.is_empty() {
                let autoplay = if self.autoplay { "?autoplay=1&muted=1" } else { "" };
                return Some(format!("https://player.vimeo.com/video/{}{}", id, autoplay));
            }
        }

        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapElement {
    #[serde(alias = "location")]
    pub address: String,
    pub embed_url: Option<String>,
    pub height: u32,
    pub zoom: u8,
}

impl Default for MapElement {
    fn default() -> Self {
        Self {
            address: String::new(),
            embed_url: None,
            height: 300,
            zoom: 14,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrCode {
    #[serde(alias = "url", alias = "text", alias = "content")]
    pub value: String,
    pub size: u32,
    #[serde(alias = "fgColor")]
    pub foreground: String,
    #[serde(alias = "bgColor")]
    pub background: String,
    pub caption: Option<String>,
}

impl Default for QrCode {
    fn default() -> Self {
        Self {
            value: String::new(),
            size: 160,
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
            caption: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Pie,
    Doughnut,
    #[default]
    #[serde(other)]
    Bar,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartDataset {
    pub label: String,
    #[serde(alias = "data")]
    pub values: Vec<f64>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Chart {
    #[serde(alias = "type", alias = "kind")]
    pub chart_type: ChartType,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    /// Shorthand for a single unnamed dataset.
    pub values: Vec<f64>,
    pub height: u32,
    pub show_legend: bool,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Bar,
            title: String::new(),
            labels: Vec::new(),
            datasets: Vec::new(),
            values: Vec::new(),
            height: 300,
            show_legend: true,
        }
    }
}

impl Chart {
    /// Datasets to draw, with the `values` shorthand folded in.
    pub fn effective_datasets(&self) -> Vec<ChartDataset> {
        if !self.datasets.is_empty() {
            return self.datasets.clone();
        }
        if self.values.is_empty() {
            return Vec::new();
        }
        vec![ChartDataset {
            label: self.title.clone(),
            values: self.values.clone(),
            color: None,
        }]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
    Facebook,
    #[serde(alias = "x")]
    Twitter,
    Linkedin,
    Whatsapp,
    Email,
    Pinterest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShareButtons {
    pub platforms: Vec<SharePlatform>,
    /// Shared URL; the current page when absent.
    pub url: Option<String>,
    pub text: String,
    pub rounded: bool,
}

impl Default for ShareButtons {
    fn default() -> Self {
        Self {
            platforms: vec![
                SharePlatform::Facebook,
                SharePlatform::Twitter,
                SharePlatform::Linkedin,
                SharePlatform::Email,
            ],
            url: None,
            text: String::new(),
            rounded: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLinks {
    pub links: Vec<SocialLink>,
    pub size: u32,
    pub color: Option<String>,
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            links: Vec::new(),
            size: 32,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeBlock {
    pub code: String,
    pub language: String,
    pub show_line_numbers: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertVariant {
    Success,
    Warning,
    Error,
    #[default]
    #[serde(other)]
    Info,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alert {
    #[serde(alias = "message", alias = "content")]
    pub text: String,
    pub title: Option<String>,
    #[serde(alias = "severity")]
    pub variant: AlertVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    #[serde(alias = "columns")]
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub striped: bool,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            striped: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryImage {
    #[serde(alias = "url")]
    pub src: String,
    pub alt: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Gallery {
    pub images: Vec<GalleryImage>,
    pub columns: u8,
    pub gap: u32,
}

impl Default for Gallery {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            columns: 3,
            gap: 8,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatItem {
    #[serde(alias = "number")]
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    #[serde(alias = "stats")]
    pub items: Vec<StatItem>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Embed {
    #[serde(alias = "code", alias = "content")]
    pub html: String,
}
