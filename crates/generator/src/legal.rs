//! Legal pages rendered from markdown, with built-in text for documents the
//! author never wrote.

use crate::html::{html_escape, is_script_url};
use pulldown_cmark::{Event, Options, Parser, Tag, html};
use sitekit_core::SiteData;
use sitekit_core::types::{LegalDocument, LegalDocuments};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegalPage {
    PrivacyPolicy,
    CookiePolicy,
    TermsOfService,
}

impl LegalPage {
    pub const ALL: [LegalPage; 3] = [
        LegalPage::PrivacyPolicy,
        LegalPage::CookiePolicy,
        LegalPage::TermsOfService,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            LegalPage::PrivacyPolicy => "privacy-policy.html",
            LegalPage::CookiePolicy => "cookie-policy.html",
            LegalPage::TermsOfService => "terms-of-service.html",
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            LegalPage::PrivacyPolicy => "Privacy Policy",
            LegalPage::CookiePolicy => "Cookie Policy",
            LegalPage::TermsOfService => "Terms of Service",
        }
    }

    pub fn document<'a>(&self, docs: &'a LegalDocuments) -> Option<&'a LegalDocument> {
        let doc = match self {
            LegalPage::PrivacyPolicy => docs.privacy_policy.as_ref(),
            LegalPage::CookiePolicy => docs.cookie_policy.as_ref(),
            LegalPage::TermsOfService => docs.terms_of_service.as_ref(),
        };
        doc.filter(|d| !d.content.trim().is_empty())
    }

    fn default_content(&self, site: &SiteData) -> String {
        let name = site.site_title();
        let contact = if site.contact.email.trim().is_empty() {
            "through the contact form on this site".to_string()
        } else {
            format!("at <{}>", site.contact.email.trim())
        };
        match self {
            LegalPage::PrivacyPolicy => format!(
                "## Who we are\n\n{name} operates this website.\n\n\
                 ## What we collect\n\n\
                 When you use the contact form we receive the information you enter \
                 (such as your name, email address and message). We use it only to \
                 answer your request.\n\n\
                 ## How long we keep it\n\n\
                 Messages are kept for as long as needed to handle your request.\n\n\
                 ## Your rights\n\n\
                 You may ask to access, correct or delete your personal data. \
                 Contact us {contact}.\n"
            ),
            LegalPage::CookiePolicy => format!(
                "## What are cookies\n\n\
                 Cookies are small files stored by your browser.\n\n\
                 ## How {name} uses them\n\n\
                 This site stores your cookie choice in your browser's local storage. \
                 Embedded third-party content (videos, maps, chat) may set its own \
                 cookies once loaded.\n\n\
                 ## Managing cookies\n\n\
                 You can clear or block cookies in your browser settings at any time. \
                 Questions? Contact us {contact}.\n"
            ),
            LegalPage::TermsOfService => format!(
                "## Use of this site\n\n\
                 By using this website you agree to these terms.\n\n\
                 ## Content\n\n\
                 All content on this site belongs to {name} unless stated otherwise \
                 and may not be reused without permission.\n\n\
                 ## Liability\n\n\
                 Information on this site is provided as is, without warranty.\n\n\
                 ## Contact\n\n\
                 Contact us {contact}.\n"
            ),
        }
    }
}

/// Markdown to HTML. Raw HTML in the source is shown as text and script
/// URLs in links and images become `#`.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => {
            log::warn!("Dropping script URL '{}' from legal text", dest_url);
            Event::Start(Tag::Link {
                link_type,
                dest_url: "#".into(),
                title,
                id,
            })
        }
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => {
            log::warn!("Dropping script URL '{}' from legal text", dest_url);
            Event::Start(Tag::Image {
                link_type,
                dest_url: "#".into(),
                title,
                id,
            })
        }
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// `<main>` body of a legal page.
pub fn render_legal_body(page: LegalPage, site: &SiteData, today: &str) -> String {
    let doc = page.document(&site.legal);
    let title = doc
        .map(|d| d.title.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(page.default_title());
    let content = match doc {
        Some(d) => d.content.clone(),
        None => {
            log::debug!("using default text for {}", page.file_name());
            page.default_content(site)
        }
    };
    let updated = doc
        .and_then(|d| d.last_updated.as_deref())
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(today);

    format!(
        r#"<main class="legal-page">
<div class="container">
<h1>{}</h1>
<p class="legal-updated">Last updated: {}</p>
{}<p><a href="index.html">&larr; Back to home</a></p>
</div>
</main>"#,
        html_escape(title),
        html_escape(updated),
        render_markdown(&content)
    )
}
