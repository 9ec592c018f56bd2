//! HTML for content elements.

use crate::chart::render_chart;
use crate::context::{CdnLibrary, RenderContext};
use crate::html::{
    css_length, encode_uri_component, fmt_num, html_escape, link_target, safe_url,
    text_with_breaks,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sitekit_core::elements::*;
use sitekit_core::types::SocialLink;
use sitekit_core::{ContentElement, color_or, slugify};

/// Render one element. Never fails: anything that cannot be shown becomes
/// an HTML comment.
pub fn render_element(element: &ContentElement, ctx: &mut RenderContext<'_>) -> String {
    match element {
        ContentElement::Heading(h) => heading(h),
        ContentElement::Paragraph(p) => paragraph(p),
        ContentElement::Image(img) => image(img, ctx),
        ContentElement::Button(b) => button(b, ctx),
        ContentElement::Divider(d) => divider(d),
        ContentElement::Spacer(s) => format!(
            "<div class=\"el-spacer\" style=\"height:{}px\" aria-hidden=\"true\"></div>",
            s.height.min(1000)
        ),
        ContentElement::Quote(q) => quote(q, ctx),
        ContentElement::List(l) => list(l),
        ContentElement::Accordion(a) => accordion(a, ctx),
        ContentElement::Tabs(t) => tabs(t, ctx),
        ContentElement::ProgressBar(p) => progress_bar(p, ctx),
        ContentElement::Rating(r) => rating(r),
        ContentElement::Counter(c) => counter(c, ctx),
        ContentElement::Countdown(c) => countdown(c, ctx),
        ContentElement::Timeline(t) => timeline(t, ctx),
        ContentElement::PricingTable(p) => pricing_table(p, ctx),
        ContentElement::Testimonial(t) => testimonial(t, ctx),
        ContentElement::Video(v) => video(v, ctx),
        ContentElement::Map(m) => map(m, ctx),
        ContentElement::QrCode(q) => qr_code(q, ctx),
        ContentElement::Chart(c) => render_chart(c),
        ContentElement::ShareButtons(s) => share_buttons(s),
        ContentElement::SocialLinks(s) => {
            render_social_links(&s.links, s.size, s.color.as_deref())
        }
        ContentElement::CodeBlock(c) => code_block(c, ctx),
        ContentElement::Alert(a) => alert(a),
        ContentElement::Table(t) => table(t),
        ContentElement::Gallery(g) => gallery(g, ctx),
        ContentElement::Stats(s) => stats(s, ctx),
        ContentElement::Embed(e) => embed(e, ctx),
        ContentElement::Unsupported { kind, reason } => {
            log::warn!("Skipping content element '{}': {}", kind, reason);
            unsupported(kind, ctx)
        }
    }
}

/// Render a list of elements, one per line.
pub fn render_elements(elements: &[ContentElement], ctx: &mut RenderContext<'_>) -> String {
    elements
        .iter()
        .map(|e| render_element(e, ctx))
        .collect::<Vec<_>>()
        .join("\n")
}

fn unsupported(kind: &str, ctx: &mut RenderContext<'_>) -> String {
    ctx.note_unsupported();
    let kind = slugify(kind);
    let kind = if kind.is_empty() { "unknown".to_string() } else { kind };
    format!("<!-- unsupported content element: {} -->", kind)
}

fn style_attr(rules: &[(&str, Option<String>)]) -> String {
    let css: Vec<String> = rules
        .iter()
        .filter_map(|(prop, value)| value.as_ref().map(|v| format!("{}:{}", prop, v)))
        .collect();
    if css.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", css.join(";"))
    }
}

fn optional_color(color: Option<&str>) -> Option<String> {
    color.and_then(sitekit_core::parse_color)
}

fn heading(h: &Heading) -> String {
    let level = h.level.clamp(1, 6);
    format!(
        "<h{level} class=\"el-heading\"{}>{}</h{level}>",
        style_attr(&[
            ("text-align", Some(h.align.as_css().to_string())),
            ("color", optional_color(h.color.as_deref())),
        ]),
        html_escape(&h.text)
    )
}

fn paragraph(p: &Paragraph) -> String {
    format!(
        "<p class=\"el-paragraph\"{}>{}</p>",
        style_attr(&[
            ("text-align", Some(p.align.as_css().to_string())),
            ("color", optional_color(p.color.as_deref())),
            ("font-size", p.font_size.map(|s| format!("{}px", s.clamp(8, 96)))),
        ]),
        text_with_breaks(&p.text)
    )
}

fn image(img: &ImageElement, ctx: &mut RenderContext<'_>) -> String {
    let src = ctx.image_src(&img.src);
    let class = if img.rounded { " class=\"rounded\"" } else { "" };
    let mut tag = format!(
        "<img src=\"{}\" alt=\"{}\" loading=\"lazy\"{}>",
        html_escape(&src),
        html_escape(&img.alt),
        class
    );
    if let Some(link) = img.link.as_deref().filter(|l| !l.trim().is_empty()) {
        tag = format!("<a href=\"{}\"{}>{}</a>", safe_url(link), link_target(link), tag);
    }
    let caption = img
        .caption
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!("<figcaption>{}</figcaption>", html_escape(c)))
        .unwrap_or_default();
    format!(
        "<figure class=\"el-image\"{}>{}{}</figure>",
        style_attr(&[("max-width", img.width.as_deref().and_then(css_length))]),
        tag,
        caption
    )
}

fn button(b: &Button, ctx: &mut RenderContext<'_>) -> String {
    let accent = ctx.accent_or(b.background_color.as_deref());
    let text_color = color_or(Some(&b.text_color), "#ffffff");
    let (class, style) = match b.style {
        ButtonStyle::Filled => (
            "btn btn-filled",
            format!(
                "background-color:{};border-color:{};color:{}",
                accent, accent, text_color
            ),
        ),
        ButtonStyle::Outlined => (
            "btn btn-outlined",
            format!("background-color:transparent;border-color:{};color:{}", accent, accent),
        ),
        ButtonStyle::Text => ("btn btn-text", format!("color:{}", accent)),
    };
    let target = if b.new_tab || crate::html::is_external(&b.url) {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };
    format!(
        "<div class=\"el-button\" style=\"text-align:{}\"><a class=\"{}\" href=\"{}\" style=\"{}\"{}>{}</a></div>",
        b.align.as_css(),
        class,
        safe_url(&b.url),
        style,
        target,
        html_escape(&b.text)
    )
}

fn divider(d: &Divider) -> String {
    let style = match d.style.as_str() {
        "dashed" | "dotted" | "double" => d.style.as_str(),
        _ => "solid",
    };
    let width = css_length(&d.width).unwrap_or_else(|| "100%".to_string());
    format!(
        "<hr class=\"el-divider\" style=\"border:none;border-top:{}px {} {};width:{}\">",
        d.thickness.clamp(1, 20),
        style,
        color_or(Some(&d.color), "#e5e7eb"),
        width
    )
}

fn quote(q: &Quote, ctx: &mut RenderContext<'_>) -> String {
    let author = q
        .author
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .map(|a| format!("<cite>{}</cite>", html_escape(a)))
        .unwrap_or_default();
    format!(
        "<blockquote class=\"el-quote\" style=\"border-left-color:{}\"><p>{}</p>{}</blockquote>",
        ctx.accent_or(q.color.as_deref()),
        text_with_breaks(&q.text),
        author
    )
}

fn list(l: &ListElement) -> String {
    let tag = if l.ordered { "ol" } else { "ul" };
    let icon = l.icon.as_deref().filter(|i| !i.trim().is_empty());
    let class = if icon.is_some() { "el-list el-list-icon" } else { "el-list" };
    let items: String = l
        .items
        .iter()
        .map(|item| match icon {
            Some(icon) => format!(
                "<li><span class=\"list-icon\" aria-hidden=\"true\">{}</span>{}</li>",
                html_escape(icon),
                html_escape(item)
            ),
            None => format!("<li>{}</li>", html_escape(item)),
        })
        .collect();
    format!("<{tag} class=\"{}\">{}</{tag}>", class, items)
}

fn accordion(a: &Accordion, ctx: &mut RenderContext<'_>) -> String {
    let id = ctx.next_id("acc");
    let items: String = a
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "<div class=\"accordion-item\"><button class=\"accordion-header\" type=\"button\" aria-expanded=\"false\" aria-controls=\"{id}-{i}\">{}<span class=\"accordion-icon\" aria-hidden=\"true\">+</span></button><div class=\"accordion-panel\" id=\"{id}-{i}\" hidden><p>{}</p></div></div>",
                html_escape(&item.title),
                text_with_breaks(&item.content)
            )
        })
        .collect();
    format!(
        "<div class=\"el-accordion\" data-multiple=\"{}\" style=\"--accent:{}\">{}</div>",
        a.allow_multiple,
        ctx.accent_or(a.accent_color.as_deref()),
        items
    )
}

fn tabs(t: &Tabs, ctx: &mut RenderContext<'_>) -> String {
    let id = ctx.next_id("tabs");
    let buttons: String = t
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            format!(
                "<button class=\"tab-button\" type=\"button\" role=\"tab\" aria-selected=\"{}\" aria-controls=\"{id}-{i}\">{}</button>",
                i == 0,
                html_escape(&tab.label)
            )
        })
        .collect();
    let panels: String = t
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            format!(
                "<div class=\"tab-panel\" id=\"{id}-{i}\" role=\"tabpanel\"{}><p>{}</p></div>",
                if i == 0 { "" } else { " hidden" },
                text_with_breaks(&tab.content)
            )
        })
        .collect();
    format!(
        "<div class=\"el-tabs\" style=\"--accent:{}\"><div class=\"tab-list\" role=\"tablist\">{}</div>{}</div>",
        ctx.accent_or(t.accent_color.as_deref()),
        buttons,
        panels
    )
}

fn progress_bar(p: &ProgressBar, ctx: &mut RenderContext<'_>) -> String {
    let pct = p.percent();
    let value = if p.show_percentage {
        format!("<span>{}%</span>", pct.round())
    } else {
        String::new()
    };
    format!(
        "<div class=\"el-progress\"><div class=\"progress-label\"><span>{}</span>{}</div><div class=\"progress-track\" style=\"height:{}px\" role=\"progressbar\" aria-valuenow=\"{}\" aria-valuemin=\"0\" aria-valuemax=\"100\"><div class=\"progress-fill\" style=\"width:{}%;background-color:{}\"></div></div></div>",
        html_escape(&p.label),
        value,
        p.height.clamp(2, 64),
        pct.round(),
        fmt_num(pct),
        ctx.accent_or(p.color.as_deref())
    )
}

/// Full, half and empty star counts for a rating.
pub fn star_counts(value: f64, max: u8) -> (usize, usize, usize) {
    let max = max.clamp(1, 10) as usize;
    let value = if value.is_finite() {
        value.clamp(0.0, max as f64)
    } else {
        0.0
    };
    let full = value.floor() as usize;
    let half = usize::from(value - value.floor() >= 0.5 && full < max);
    (full, half, max - full - half)
}

fn stars(value: f64, max: u8) -> String {
    let (full, half, empty) = star_counts(value, max);
    let mut out = String::new();
    out.push_str(&"<span class=\"star full\">★</span>".repeat(full));
    out.push_str(&"<span class=\"star half\">★</span>".repeat(half));
    out.push_str(&"<span class=\"star empty\">☆</span>".repeat(empty));
    out
}

fn rating(r: &Rating) -> String {
    let max = r.max.clamp(1, 10);
    let value = if r.show_value {
        format!(
            "<span class=\"rating-value\">{}/{}</span>",
            fmt_num(r.value.clamp(0.0, max as f64)),
            max
        )
    } else {
        String::new()
    };
    let label = r
        .label
        .as_deref()
        .map(|l| format!("<span class=\"rating-label\">{}</span>", html_escape(l)))
        .unwrap_or_default();
    format!(
        "<div class=\"el-rating\" style=\"color:{}\" aria-label=\"Rated {} out of {}\">{}{}{}</div>",
        color_or(Some(&r.color), "#f5b301"),
        fmt_num(r.value),
        max,
        stars(r.value, max),
        value,
        label
    )
}

fn counter(c: &Counter, ctx: &mut RenderContext<'_>) -> String {
    let decimals = if c.value.fract() == 0.0 { 0 } else { 2 };
    format!(
        "<div class=\"el-counter\" style=\"color:{}\"><span class=\"counter-value\">{}<span class=\"counter-number\" data-target=\"{}\" data-duration=\"{}\" data-decimals=\"{}\">{}</span>{}</span><span class=\"counter-label\">{}</span></div>",
        ctx.accent_or(c.color.as_deref()),
        html_escape(&c.prefix),
        c.value,
        c.duration_ms.min(60_000),
        decimals,
        fmt_num(c.value),
        html_escape(&c.suffix),
        html_escape(&c.label)
    )
}

/// Normalize a countdown target to an ISO timestamp JavaScript can parse.
pub fn parse_countdown_target(input: &str) -> Option<String> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.to_rfc3339());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(|d| format!("{}T00:00:00", d.format("%Y-%m-%d")))
}

fn countdown(c: &Countdown, ctx: &mut RenderContext<'_>) -> String {
    let Some(target) = parse_countdown_target(&c.target_date) else {
        log::warn!("Countdown has an invalid target date '{}'", c.target_date);
        return unsupported("countdown", ctx);
    };
    let units: String = [("days", "Days"), ("hours", "Hours"), ("minutes", "Minutes"), ("seconds", "Seconds")]
        .iter()
        .map(|(unit, label)| {
            format!(
                "<div class=\"countdown-unit\"><span class=\"countdown-number\" data-unit=\"{}\">--</span><span class=\"countdown-unit-label\">{}</span></div>",
                unit, label
            )
        })
        .collect();
    format!(
        "<div class=\"el-countdown\" data-target=\"{}\" data-expired=\"{}\" style=\"--accent:{}\"><div class=\"countdown-label\">{}</div><div class=\"countdown-units\">{}</div></div>",
        target,
        html_escape(&c.expired_text),
        ctx.accent_or(c.color.as_deref()),
        html_escape(&c.label),
        units
    )
}

fn timeline(t: &Timeline, ctx: &mut RenderContext<'_>) -> String {
    let items: String = t
        .items
        .iter()
        .map(|item| {
            format!(
                "<li class=\"timeline-item\"><span class=\"timeline-date\">{}</span><h4>{}</h4><p>{}</p></li>",
                html_escape(&item.date),
                html_escape(&item.title),
                text_with_breaks(&item.description)
            )
        })
        .collect();
    format!(
        "<ol class=\"el-timeline\" style=\"--accent:{}\">{}</ol>",
        ctx.accent_or(t.color.as_deref()),
        items
    )
}

fn pricing_table(p: &PricingTable, ctx: &mut RenderContext<'_>) -> String {
    let accent = ctx.accent_or(p.accent_color.as_deref());
    let plans: String = p
        .plans
        .iter()
        .map(|plan| {
            let numeric = plan.price.trim().starts_with(|c: char| c.is_ascii_digit());
            let currency = if numeric {
                format!("<span class=\"currency\">{}</span>", html_escape(&p.currency))
            } else {
                String::new()
            };
            let period = plan.period.trim().trim_start_matches('/');
            let period = if period.is_empty() {
                String::new()
            } else {
                format!("<span class=\"period\">/{}</span>", html_escape(period))
            };
            let features: String = plan
                .features
                .iter()
                .map(|f| format!("<li>{}</li>", html_escape(f)))
                .collect();
            format!(
                "<div class=\"pricing-plan{}\"><h3>{}</h3><div class=\"pricing-price\">{}{}{}</div><ul>{}</ul><a class=\"btn btn-filled\" href=\"{}\" style=\"background-color:{};border-color:{}\">{}</a></div>",
                if plan.highlighted { " featured" } else { "" },
                html_escape(&plan.name),
                currency,
                html_escape(plan.price.trim()),
                period,
                features,
                safe_url(&plan.button_link),
                accent,
                accent,
                html_escape(&plan.button_text)
            )
        })
        .collect();
    format!(
        "<div class=\"el-pricing\" style=\"--accent:{}\">{}</div>",
        accent, plans
    )
}

fn testimonial(t: &Testimonial, ctx: &mut RenderContext<'_>) -> String {
    let avatar = t
        .avatar
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .map(|a| {
            format!(
                "<img class=\"testimonial-avatar\" src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                html_escape(&ctx.image_src(a)),
                html_escape(&t.author)
            )
        })
        .unwrap_or_default();
    let rating = t
        .rating
        .map(|r| format!("<div class=\"el-rating\">{}</div>", stars(r as f64, 5)))
        .unwrap_or_default();
    let role = if t.role.is_empty() {
        String::new()
    } else {
        format!("<span>{}</span>", html_escape(&t.role))
    };
    format!(
        "<figure class=\"el-testimonial\">{}<blockquote>{}</blockquote>{}<figcaption><strong>{}</strong>{}</figcaption></figure>",
        avatar,
        text_with_breaks(&t.quote),
        rating,
        html_escape(&t.author),
        role
    )
}

fn video(v: &Video, ctx: &mut RenderContext<'_>) -> String {
    if v.url.trim().is_empty() {
        return unsupported("video", ctx);
    }
    if let Some(embed) = v.embed_url() {
        return format!(
            "<div class=\"el-video\"><iframe src=\"{}\" title=\"{}\" allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" allowfullscreen loading=\"lazy\"></iframe></div>",
            safe_url(&embed),
            html_escape(if v.title.is_empty() { "Video" } else { &v.title })
        );
    }
    let mut attrs = String::new();
    if v.controls {
        attrs.push_str(" controls");
    }
    if v.autoplay {
        attrs.push_str(" autoplay muted");
    }
    format!(
        "<div class=\"el-video\"><video src=\"{}\"{} playsinline preload=\"metadata\"></video></div>",
        safe_url(&v.url),
        attrs
    )
}

fn map(m: &MapElement, ctx: &mut RenderContext<'_>) -> String {
    let src = match m.embed_url.as_deref().filter(|u| u.trim().starts_with("https://")) {
        Some(url) => url.trim().to_string(),
        None if !m.address.trim().is_empty() => format!(
            "https://maps.google.com/maps?q={}&z={}&output=embed",
            encode_uri_component(m.address.trim()),
            m.zoom.clamp(1, 20)
        ),
        None => return unsupported("map", ctx),
    };
    format!(
        "<div class=\"el-map\"><iframe src=\"{}\" title=\"{}\" style=\"height:{}px\" loading=\"lazy\" referrerpolicy=\"no-referrer-when-downgrade\"></iframe></div>",
        safe_url(&src),
        html_escape(if m.address.is_empty() { "Map" } else { &m.address }),
        m.height.clamp(100, 1000)
    )
}

fn qr_code(q: &QrCode, ctx: &mut RenderContext<'_>) -> String {
    if q.value.trim().is_empty() {
        return unsupported("qr-code", ctx);
    }
    ctx.require(CdnLibrary::QrCode);
    let size = q.size.clamp(64, 1024);
    let caption = q
        .caption
        .as_deref()
        .map(|c| format!("<p class=\"qr-caption\">{}</p>", html_escape(c)))
        .unwrap_or_default();
    format!(
        "<div class=\"el-qrcode\"><canvas class=\"qr-canvas\" width=\"{size}\" height=\"{size}\" data-qr-value=\"{}\" data-qr-size=\"{size}\" data-qr-dark=\"{}\" data-qr-light=\"{}\"></canvas>{}<noscript><p>{}</p></noscript></div>",
        html_escape(&q.value),
        color_or(Some(&q.foreground), "#000000"),
        color_or(Some(&q.background), "#ffffff"),
        caption,
        html_escape(&q.value)
    )
}

/// Share link for one platform. `url` and `text` are raw (unencoded).
pub fn share_href(platform: SharePlatform, url: &str, text: &str) -> String {
    let u = encode_uri_component(url);
    let t = encode_uri_component(text);
    match platform {
        SharePlatform::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={}", u),
        SharePlatform::Twitter => format!("https://twitter.com/intent/tweet?url={}&text={}", u, t),
        SharePlatform::Linkedin => {
            format!("https://www.linkedin.com/sharing/share-offsite/?url={}", u)
        }
        SharePlatform::Whatsapp => {
            let message = if text.is_empty() {
                u
            } else {
                encode_uri_component(&format!("{} {}", text, url))
            };
            format!("https://wa.me/?text={}", message)
        }
        SharePlatform::Email => format!("mailto:?subject={}&body={}", t, u),
        SharePlatform::Pinterest => format!(
            "https://pinterest.com/pin/create/button/?url={}&description={}",
            u, t
        ),
    }
}

fn platform_name(platform: SharePlatform) -> (&'static str, &'static str) {
    match platform {
        SharePlatform::Facebook => ("facebook", "Facebook"),
        SharePlatform::Twitter => ("twitter", "X"),
        SharePlatform::Linkedin => ("linkedin", "LinkedIn"),
        SharePlatform::Whatsapp => ("whatsapp", "WhatsApp"),
        SharePlatform::Email => ("email", "Email"),
        SharePlatform::Pinterest => ("pinterest", "Pinterest"),
    }
}

fn share_buttons(s: &ShareButtons) -> String {
    let fixed_url = s.url.as_deref().filter(|u| !u.trim().is_empty());
    let buttons: String = s
        .platforms
        .iter()
        .map(|platform| {
            let (key, label) = platform_name(*platform);
            // Without a fixed URL app.js fills in the page address on load.
            let href = fixed_url
                .map(|url| html_escape(&share_href(*platform, url, &s.text)))
                .unwrap_or_else(|| "#".to_string());
            format!(
                "<a class=\"share-btn share-{key}\" data-share=\"{key}\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                href, label
            )
        })
        .collect();
    format!(
        "<div class=\"el-share{}\" data-share-text=\"{}\">{}</div>",
        if s.rounded { " rounded" } else { "" },
        html_escape(&s.text),
        buttons
    )
}

fn social_glyph(platform: &str) -> String {
    match platform.to_ascii_lowercase().as_str() {
        "facebook" => "f".to_string(),
        "twitter" | "x" => "𝕏".to_string(),
        "instagram" => "IG".to_string(),
        "linkedin" => "in".to_string(),
        "youtube" => "▶".to_string(),
        "tiktok" => "♪".to_string(),
        "github" => "GH".to_string(),
        "whatsapp" => "WA".to_string(),
        other => other
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "•".to_string()),
    }
}

/// Round icon links to social profiles; shared by the contact block.
pub fn render_social_links(links: &[SocialLink], size: u32, color: Option<&str>) -> String {
    let size = size.clamp(16, 96);
    let background = optional_color(color);
    let items: String = links
        .iter()
        .filter(|l| !l.url.trim().is_empty())
        .map(|link| {
            let platform = slugify(&link.platform);
            format!(
                "<a class=\"social-link social-{}\" href=\"{}\" aria-label=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"{}>{}</a>",
                platform,
                safe_url(&link.url),
                html_escape(&link.platform),
                style_attr(&[
                    ("width", Some(format!("{}px", size))),
                    ("height", Some(format!("{}px", size))),
                    ("background-color", background.clone()),
                ]),
                html_escape(&social_glyph(&link.platform))
            )
        })
        .collect();
    format!("<div class=\"el-social\">{}</div>", items)
}

fn code_block(c: &CodeBlock, ctx: &mut RenderContext<'_>) -> String {
    let language: String = c
        .language
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-' || *ch == '+')
        .collect::<String>()
        .to_ascii_lowercase();
    let code_class = if language.is_empty() {
        String::new()
    } else {
        ctx.require(CdnLibrary::Prism);
        format!(" class=\"language-{}\"", language)
    };
    format!(
        "<pre class=\"el-code{}\"><code{}>{}</code></pre>",
        if c.show_line_numbers { " line-numbers" } else { "" },
        code_class,
        html_escape(&c.code)
    )
}

fn alert(a: &Alert) -> String {
    let (variant, role) = match a.variant {
        AlertVariant::Info => ("info", "status"),
        AlertVariant::Success => ("success", "status"),
        AlertVariant::Warning => ("warning", "alert"),
        AlertVariant::Error => ("error", "alert"),
    };
    let title = a
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| format!("<strong>{}</strong> ", html_escape(t)))
        .unwrap_or_default();
    format!(
        "<div class=\"el-alert alert-{}\" role=\"{}\">{}{}</div>",
        variant,
        role,
        title,
        text_with_breaks(&a.text)
    )
}

fn table(t: &Table) -> String {
    let head = if t.headers.is_empty() {
        String::new()
    } else {
        let cells: String = t
            .headers
            .iter()
            .map(|h| format!("<th>{}</th>", html_escape(h)))
            .collect();
        format!("<thead><tr>{}</tr></thead>", cells)
    };
    let rows: String = t
        .rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|c| format!("<td>{}</td>", html_escape(c)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();
    format!(
        "<div class=\"el-table-wrap\"><table class=\"el-table{}\">{}<tbody>{}</tbody></table></div>",
        if t.striped { " striped" } else { "" },
        head,
        rows
    )
}

fn gallery(g: &Gallery, ctx: &mut RenderContext<'_>) -> String {
    let figures: String = g
        .images
        .iter()
        .map(|img| {
            let caption = img
                .caption
                .as_deref()
                .map(|c| format!("<figcaption>{}</figcaption>", html_escape(c)))
                .unwrap_or_default();
            format!(
                "<figure><img src=\"{}\" alt=\"{}\" loading=\"lazy\">{}</figure>",
                html_escape(&ctx.image_src(&img.src)),
                html_escape(&img.alt),
                caption
            )
        })
        .collect();
    format!(
        "<div class=\"el-gallery\" style=\"grid-template-columns:repeat({},1fr);gap:{}px\">{}</div>",
        g.columns.clamp(1, 6),
        g.gap.min(64),
        figures
    )
}

fn stats(s: &Stats, ctx: &mut RenderContext<'_>) -> String {
    let items: String = s
        .items
        .iter()
        .map(|item| {
            format!(
                "<div class=\"stat\"><span class=\"stat-value\">{}</span><span class=\"stat-label\">{}</span></div>",
                html_escape(&item.value),
                html_escape(&item.label)
            )
        })
        .collect();
    format!(
        "<div class=\"el-stats\" style=\"--accent:{}\">{}</div>",
        ctx.accent_or(s.color.as_deref()),
        items
    )
}

fn embed(e: &Embed, ctx: &mut RenderContext<'_>) -> String {
    if ctx.allow_embed_html {
        format!("<div class=\"el-embed\">{}</div>", e.html)
    } else {
        format!("<pre class=\"el-embed-escaped\">{}</pre>", html_escape(&e.html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_core::SiteData;
    use sitekit_core::config::ExportConfig;
    use sitekit_images::MemoryImageStore;
    use serde_json::json;

    fn render(value: serde_json::Value) -> String {
        let store = MemoryImageStore::new();
        let site = SiteData::default();
        let mut ctx = RenderContext::new(&site, &store, &ExportConfig::default());
        render_element(&ContentElement::from_value(value), &mut ctx)
    }

    #[test]
    fn test_heading_level_and_escape() {
        let html = render(json!({"type": "heading", "text": "<Hi>", "level": 9, "color": "red"}));
        assert!(html.starts_with("<h6 class=\"el-heading\""));
        assert!(html.contains("&lt;Hi&gt;"));
        assert!(html.contains("color:red"));
    }

    #[test]
    fn test_invalid_color_is_dropped() {
        let html = render(json!({"type": "heading", "text": "x", "color": "red;background:url(x)"}));
        assert!(!html.contains("url(x)"));
    }

    #[test]
    fn test_button_rejects_script_urls() {
        let html = render(json!({"type": "button", "text": "Go", "url": "javascript:alert(1)"}));
        assert!(html.contains("href=\"#\""));
        assert!(!html.contains("javascript"));
    }

    #[test]
    fn test_button_external_opens_new_tab() {
        let html = render(json!({"type": "button", "url": "https://example.com", "style": "outlined"}));
        assert!(html.contains("btn-outlined"));
        assert!(html.contains("target=\"_blank\""));
    }

    #[test]
    fn test_image_missing_uses_placeholder() {
        let html = render(json!({"type": "image", "src": "nope.jpg", "alt": "A", "caption": "Cap"}));
        assert!(html.contains("src=\"assets/images/placeholder.svg\""));
        assert!(html.contains("<figcaption>Cap</figcaption>"));
    }

    #[test]
    fn test_accordion_and_tabs_ids() {
        let store = MemoryImageStore::new();
        let site = SiteData::default();
        let mut ctx = RenderContext::new(&site, &store, &ExportConfig::default());
        let acc = ContentElement::from_value(json!({
            "type": "accordion",
            "items": [{"title": "Q", "content": "A"}, {"title": "Q2", "content": "A2"}]
        }));
        let tabs = ContentElement::from_value(json!({
            "type": "tabs",
            "tabs": [{"label": "One", "content": "1"}, {"label": "Two", "content": "2"}]
        }));
        let html = render_elements(&[acc, tabs], &mut ctx);
        assert!(html.contains("aria-controls=\"acc-1-0\""));
        assert!(html.contains("id=\"acc-1-1\" hidden"));
        assert!(html.contains("aria-controls=\"tabs-2-1\""));
        assert!(html.contains("id=\"tabs-2-0\" role=\"tabpanel\"><p>1</p>"));
        assert!(html.contains("id=\"tabs-2-1\" role=\"tabpanel\" hidden"));
    }

    #[test]
    fn test_star_counts() {
        assert_eq!(star_counts(4.0, 5), (4, 0, 1));
        assert_eq!(star_counts(3.5, 5), (3, 1, 1));
        assert_eq!(star_counts(3.4, 5), (3, 0, 2));
        assert_eq!(star_counts(9.0, 5), (5, 0, 0));
        assert_eq!(star_counts(-1.0, 5), (0, 0, 5));
        assert_eq!(star_counts(f64::NAN, 3), (0, 0, 3));
    }

    #[test]
    fn test_progress_bar_clamps() {
        let html = render(json!({"type": "progress-bar", "label": "Done", "value": 150}));
        assert!(html.contains("width:100%"));
        assert!(html.contains("<span>100%</span>"));
    }

    #[test]
    fn test_counter_shows_final_value() {
        let html = render(json!({"type": "counter", "value": 1200, "suffix": "+", "label": "Clients"}));
        assert!(html.contains("data-target=\"1200\""));
        assert!(html.contains(">1200</span>+</span>"));
    }

    #[test]
    fn test_parse_countdown_target() {
        assert_eq!(
            parse_countdown_target("2030-01-02").as_deref(),
            Some("2030-01-02T00:00:00")
        );
        assert_eq!(
            parse_countdown_target("2030-01-02T10:30").as_deref(),
            Some("2030-01-02T10:30:00")
        );
        assert_eq!(
            parse_countdown_target("2030-01-02T10:30:00Z").as_deref(),
            Some("2030-01-02T10:30:00+00:00")
        );
        assert_eq!(parse_countdown_target("soon"), None);
    }

    #[test]
    fn test_countdown_with_bad_date_is_comment() {
        let html = render(json!({"type": "countdown", "targetDate": "tomorrow"}));
        assert_eq!(html, "<!-- unsupported content element: countdown -->");
    }

    #[test]
    fn test_pricing_currency_only_for_numeric_prices() {
        let html = render(json!({"type": "pricing-table", "plans": [
            {"name": "Basic", "price": "9", "period": "month", "features": ["A"]},
            {"name": "Custom", "price": "On request", "highlighted": true}
        ]}));
        assert!(html.contains("<span class=\"currency\">€</span>9<span class=\"period\">/month</span>"));
        assert!(html.contains("pricing-plan featured"));
        assert_eq!(html.matches("class=\"currency\"").count(), 1);
    }

    #[test]
    fn test_video_embeds_youtube() {
        let html = render(json!({"type": "video", "url": "https://youtu.be/abc123"}));
        assert!(html.contains("<iframe src=\"https://www.youtube.com/embed/abc123\""));

        let html = render(json!({"type": "video", "url": "https://cdn.test/clip.mp4", "autoplay": true}));
        assert!(html.contains("<video src=\"https://cdn.test/clip.mp4\" controls autoplay muted"));
    }

    #[test]
    fn test_map_from_address() {
        let html = render(json!({"type": "map", "address": "1 Rue de Rivoli, Paris", "zoom": 12}));
        assert!(html.contains("q=1%20Rue%20de%20Rivoli%2C%20Paris&amp;z=12&amp;output=embed"));
    }

    #[test]
    fn test_qr_code_requires_cdn_library() {
        let store = MemoryImageStore::new();
        let site = SiteData::default();
        let mut ctx = RenderContext::new(&site, &store, &ExportConfig::default());
        let qr = ContentElement::from_value(json!({"type": "qr-code", "value": "https://a.test"}));
        let html = render_element(&qr, &mut ctx);
        assert!(html.contains("<canvas class=\"qr-canvas\""));
        assert!(ctx.take_libraries().contains(&CdnLibrary::QrCode));
    }

    #[test]
    fn test_share_href() {
        assert_eq!(
            share_href(SharePlatform::Facebook, "https://a.test/x?y=1", ""),
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fa.test%2Fx%3Fy%3D1"
        );
        assert_eq!(
            share_href(SharePlatform::Email, "https://a.test", "Hi there"),
            "mailto:?subject=Hi%20there&body=https%3A%2F%2Fa.test"
        );
    }

    #[test]
    fn test_share_buttons_without_url_are_filled_client_side() {
        let html = render(json!({"type": "share-buttons", "platforms": ["facebook", "x"]}));
        assert_eq!(html.matches("href=\"#\"").count(), 2);
        assert!(html.contains("data-share=\"twitter\""));
    }

    #[test]
    fn test_code_block_escapes_and_requests_prism() {
        let store = MemoryImageStore::new();
        let site = SiteData::default();
        let mut ctx = RenderContext::new(&site, &store, &ExportConfig::default());
        let code = ContentElement::from_value(
            json!({"type": "code-block", "code": "<div>", "language": "HTML\"x"}),
        );
        let html = render_element(&code, &mut ctx);
        assert!(html.contains("<code class=\"language-htmlx\">&lt;div&gt;</code>"));
        assert!(ctx.take_libraries().contains(&CdnLibrary::Prism));
    }

    #[test]
    fn test_table_and_gallery() {
        let html = render(json!({"type": "table", "headers": ["A"], "rows": [["1"], ["<2>"]]}));
        assert!(html.contains("<thead><tr><th>A</th></tr></thead>"));
        assert!(html.contains("<td>&lt;2&gt;</td>"));

        let html = render(json!({"type": "gallery", "columns": 12, "images": [{"src": "x.jpg"}]}));
        assert!(html.contains("repeat(6,1fr)"));
    }

    #[test]
    fn test_embed_respects_feature_flag() {
        let store = MemoryImageStore::new();
        let site = SiteData::default();
        let mut config = ExportConfig::default();
        let element = ContentElement::from_value(json!({"type": "embed", "html": "<b>x</b>"}));

        let mut ctx = RenderContext::new(&site, &store, &config);
        assert_eq!(render_element(&element, &mut ctx), "<div class=\"el-embed\"><b>x</b></div>");

        config.features.allow_embed_html = false;
        let mut ctx = RenderContext::new(&site, &store, &config);
        assert!(render_element(&element, &mut ctx).contains("&lt;b&gt;"));
    }

    #[test]
    fn test_unsupported_renders_comment() {
        let html = render(json!({"type": "hologram--3d"}));
        assert_eq!(html, "<!-- unsupported content element: hologram-3d -->");
    }

    #[test]
    fn test_social_links_skip_empty_urls() {
        let links = vec![
            SocialLink {
                platform: "Instagram".into(),
                url: "https://instagram.com/x".into(),
            },
            SocialLink {
                platform: "GitHub".into(),
                url: "".into(),
            },
        ];
        let html = render_social_links(&links, 32, Some("#000"));
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains("social-instagram"));
        assert!(html.contains(">IG</a>"));
        assert!(html.contains("background-color:#000"));
    }
}
