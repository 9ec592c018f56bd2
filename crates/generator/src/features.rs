//! Optional page overlays and the thank-you page.
//!
//! Each builder returns an [`ExportError::Feature`] when its configuration
//! cannot produce a working widget, so the exporter can skip it.

use crate::ExportError;
use crate::html::{html_escape, safe_url, text_with_breaks};
use sitekit_core::color_or;
use sitekit_core::types::{ChatPosition, ChatProvider, SiteData};

/// Key under which the cookie choice is stored in `localStorage`.
pub const CONSENT_STORAGE_KEY: &str = "sitekit-cookie-consent";
/// Key under which a passed age check is stored in `localStorage`.
pub const AGE_STORAGE_KEY: &str = "sitekit-age-verified";

fn feature_error(feature: &'static str, reason: impl Into<String>) -> ExportError {
    ExportError::Feature {
        feature,
        reason: reason.into(),
    }
}

/// Banner plus the inline script that records the visitor's choice.
pub fn cookie_banner(site: &SiteData, policy_page: Option<&str>) -> Result<String, ExportError> {
    let consent = &site.cookie_consent;
    if consent.message.trim().is_empty() {
        return Err(feature_error("cookie consent", "banner message is empty"));
    }
    let policy = policy_page
        .map(|page| {
            format!(
                " <a href=\"{}\">{}</a>",
                page,
                html_escape(&consent.policy_link_label)
            )
        })
        .unwrap_or_default();

    Ok(format!(
        r#"<div class="cookie-banner" id="cookie-banner" role="dialog" aria-live="polite" aria-label="Cookie consent" hidden>
  <p>{}{}</p>
  <div class="cookie-actions">
    <button class="btn btn-outlined" type="button" data-consent="declined">{}</button>
    <button class="btn btn-filled" type="button" data-consent="accepted">{}</button>
  </div>
</div>
<script>
(function () {{
  var key = '{}';
  var banner = document.getElementById('cookie-banner');
  var stored = null;
  try {{ stored = localStorage.getItem(key); }} catch (e) {{}}
  if (!stored) banner.hidden = false;
  banner.querySelectorAll('[data-consent]').forEach(function (button) {{
    button.addEventListener('click', function () {{
      try {{ localStorage.setItem(key, button.getAttribute('data-consent')); }} catch (e) {{}}
      banner.hidden = true;
    }});
  }});
}})();
</script>"#,
        html_escape(&consent.message),
        policy,
        html_escape(&consent.decline_label),
        html_escape(&consent.accept_label),
        CONSENT_STORAGE_KEY
    ))
}

/// Blocking modal asking the visitor to confirm their age.
pub fn age_gate(site: &SiteData) -> Result<String, ExportError> {
    let age = &site.age_verification;
    if age.minimum_age == 0 {
        return Err(feature_error("age verification", "minimum age must be at least 1"));
    }
    let exit_url = age.exit_url.trim();
    if !(exit_url.starts_with("https://") || exit_url.starts_with("http://")) {
        return Err(feature_error(
            "age verification",
            format!("exit URL '{}' is not an http(s) URL", exit_url),
        ));
    }
    let message = if age.message.trim().is_empty() {
        format!(
            "You must be at least {} years old to enter this site.",
            age.minimum_age
        )
    } else {
        age.message.clone()
    };

    Ok(format!(
        r#"<div class="age-gate" id="age-gate" role="dialog" aria-modal="true" aria-labelledby="age-gate-title" hidden>
  <div class="age-gate-box">
    <h2 id="age-gate-title">{}+</h2>
    <p>{}</p>
    <div class="age-gate-actions">
      <a class="btn btn-outlined" href="{}">Leave</a>
      <button class="btn btn-filled" type="button" id="age-gate-confirm">I am {} or older</button>
    </div>
  </div>
</div>
<script>
(function () {{
  var key = '{}';
  var gate = document.getElementById('age-gate');
  var ok = null;
  try {{ ok = localStorage.getItem(key); }} catch (e) {{}}
  if (ok === 'yes') return;
  gate.hidden = false;
  document.body.classList.add('no-scroll');
  document.getElementById('age-gate-confirm').addEventListener('click', function () {{
    try {{ localStorage.setItem(key, 'yes'); }} catch (e) {{}}
    gate.hidden = true;
    document.body.classList.remove('no-scroll');
  }});
}})();
</script>"#,
        age.minimum_age,
        text_with_breaks(&message),
        safe_url(exit_url),
        age.minimum_age,
        AGE_STORAGE_KEY
    ))
}

fn widget_id(raw: &str) -> Result<&str, ExportError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(feature_error("live chat", "widget id is missing"));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/'))
    {
        return Err(feature_error(
            "live chat",
            format!("widget id '{}' contains invalid characters", id),
        ));
    }
    Ok(id)
}

/// Chat widget snippet for the configured provider.
pub fn live_chat(site: &SiteData) -> Result<String, ExportError> {
    let chat = &site.live_chat;
    match chat.provider {
        ChatProvider::Tawk => {
            let id = widget_id(&chat.widget_id)?;
            Ok(format!(
                r#"<script>
var Tawk_API = Tawk_API || {{}}, Tawk_LoadStart = new Date();
(function () {{
  var s1 = document.createElement('script'), s0 = document.getElementsByTagName('script')[0];
  s1.async = true;
  s1.src = 'https://embed.tawk.to/{}';
  s1.charset = 'UTF-8';
  s1.setAttribute('crossorigin', '*');
  s0.parentNode.insertBefore(s1, s0);
}})();
</script>"#,
                id
            ))
        }
        ChatProvider::Crisp => {
            let id = widget_id(&chat.widget_id)?;
            Ok(format!(
                r#"<script>
window.$crisp = [];
window.CRISP_WEBSITE_ID = '{}';
(function () {{
  var s = document.createElement('script');
  s.src = 'https://client.crisp.chat/l.js';
  s.async = 1;
  document.getElementsByTagName('head')[0].appendChild(s);
}})();
</script>"#,
                id
            ))
        }
        ChatProvider::Custom => {
            let target = chat
                .contact_url
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string)
                .or_else(|| {
                    let email = site.contact.email.trim();
                    (!email.is_empty()).then(|| format!("mailto:{}", email))
                })
                .ok_or_else(|| {
                    feature_error("live chat", "custom chat needs a contactUrl or a contact email")
                })?;
            let position = match chat.position {
                ChatPosition::BottomRight => "chat-bottom-right",
                ChatPosition::BottomLeft => "chat-bottom-left",
            };
            Ok(format!(
                r#"<div class="chat-widget {}" style="--chat-color:{}">
  <div class="chat-panel" id="chat-panel" hidden>
    <p>{}</p>
    <a class="btn btn-filled" href="{}" target="_blank" rel="noopener noreferrer">Start a conversation</a>
  </div>
  <button class="chat-bubble" type="button" aria-label="Open chat" aria-expanded="false" aria-controls="chat-panel">&#128172;</button>
</div>"#,
                position,
                color_or(Some(&chat.color), "#4f46e5"),
                html_escape(&chat.greeting),
                safe_url(&target)
            ))
        }
    }
}

/// `<main>` body of `merci.html`.
pub fn thank_you_body() -> &'static str {
    r#"<main class="thank-you">
<div class="container">
<h1>Thank you!</h1>
<p>Your message has been sent. We will get back to you soon.</p>
<a class="btn btn-filled" href="index.html">Back to home</a>
</div>
</main>"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_core::config::parse_site_json_str;

    fn site(json: &str) -> SiteData {
        parse_site_json_str(json).unwrap()
    }

    #[test]
    fn test_cookie_banner_links_policy() {
        let s = site(r#"{"cookieConsent": {"enabled": true, "message": "We <3 cookies"}}"#);
        let html = cookie_banner(&s, Some("cookie-policy.html")).unwrap();
        assert!(html.contains("We &lt;3 cookies"));
        assert!(html.contains("<a href=\"cookie-policy.html\">Learn more</a>"));
        assert!(html.contains(CONSENT_STORAGE_KEY));

        let html = cookie_banner(&s, None).unwrap();
        assert!(!html.contains("cookie-policy.html"));
    }

    #[test]
    fn test_cookie_banner_needs_message() {
        let s = site(r#"{"cookieConsent": {"enabled": true, "message": " "}}"#);
        assert!(matches!(
            cookie_banner(&s, None),
            Err(ExportError::Feature { feature: "cookie consent", .. })
        ));
    }

    #[test]
    fn test_age_gate() {
        let s = site(r#"{"ageVerification": {"enabled": true, "minimumAge": 21}}"#);
        let html = age_gate(&s).unwrap();
        assert!(html.contains("<h2 id=\"age-gate-title\">21+</h2>"));
        assert!(html.contains("at least 21 years old"));
        assert!(html.contains("href=\"https://www.google.com\""));

        let s = site(r#"{"ageVerification": {"enabled": true, "minimumAge": 0}}"#);
        assert!(age_gate(&s).is_err());

        let s = site(r#"{"ageVerification": {"enabled": true, "exitUrl": "javascript:x"}}"#);
        assert!(age_gate(&s).is_err());
    }

    #[test]
    fn test_tawk_and_crisp_snippets() {
        let s = site(r#"{"liveChatData": {"enabled": true, "provider": "tawk", "widgetId": "abc123/default"}}"#);
        assert!(live_chat(&s).unwrap().contains("https://embed.tawk.to/abc123/default"));

        let s = site(r#"{"liveChatData": {"enabled": true, "provider": "crisp", "websiteId": "0000-1111"}}"#);
        assert!(live_chat(&s).unwrap().contains("CRISP_WEBSITE_ID = '0000-1111'"));
    }

    #[test]
    fn test_chat_rejects_bad_widget_ids() {
        let s = site(r#"{"liveChatData": {"enabled": true, "provider": "tawk"}}"#);
        assert!(live_chat(&s).is_err());
        let s = site(r#"{"liveChatData": {"enabled": true, "provider": "crisp", "widgetId": "x';alert(1)//"}}"#);
        assert!(live_chat(&s).is_err());
    }

    #[test]
    fn test_custom_chat_falls_back_to_email() {
        let s = site(
            r#"{"liveChatData": {"enabled": true, "position": "bottom-left"}, "contactData": {"email": "hi@a.test"}}"#,
        );
        let html = live_chat(&s).unwrap();
        assert!(html.contains("chat-bottom-left"));
        assert!(html.contains("href=\"mailto:hi@a.test\""));

        let s = site(r#"{"liveChatData": {"enabled": true}}"#);
        assert!(live_chat(&s).is_err());
    }
}
