use sitekit_core::{SiteData, color_or};

const BASE_CSS: &str = r#"*, *::before, *::after { box-sizing: border-box; }
html { scroll-behavior: smooth; }
body {
  margin: 0;
  font-family: var(--font-body);
  color: var(--color-text);
  background: var(--color-background);
  line-height: 1.6;
}
body.no-scroll { overflow: hidden; }
h1, h2, h3, h4, h5, h6 { font-family: var(--font-heading); line-height: 1.25; margin: 0 0 0.5em; }
img { max-width: 100%; height: auto; }
a { color: var(--color-primary); }
.container { width: 100%; max-width: 1120px; margin: 0 auto; padding: 0 1.25rem; }

.btn {
  display: inline-block;
  padding: 0.7rem 1.4rem;
  border: 2px solid var(--color-primary);
  border-radius: 8px;
  font-weight: 600;
  text-decoration: none;
  cursor: pointer;
  transition: transform 0.15s ease, opacity 0.15s ease;
}
.btn:hover { transform: translateY(-1px); opacity: 0.9; }
.btn-filled { background: var(--color-primary); color: #fff; }
.btn-outlined { background: transparent; color: var(--color-primary); }
.btn-text { background: none; border-color: transparent; padding-left: 0; padding-right: 0; }

/* header */
.site-header { position: relative; z-index: 50; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.08); }
.site-header.sticky { position: sticky; top: 0; }
.header-inner { display: flex; align-items: center; justify-content: space-between; min-height: 64px; gap: 1rem; }
.brand { display: flex; align-items: center; gap: 0.6rem; color: inherit; text-decoration: none; font-weight: 700; font-size: 1.2rem; }
.brand-logo { height: 40px; width: auto; }
.site-nav ul { display: flex; gap: 1.25rem; list-style: none; margin: 0; padding: 0; }
.site-nav a { color: inherit; text-decoration: none; font-weight: 500; }
.site-nav a:hover { color: var(--color-primary); }
.nav-toggle { display: none; background: none; border: 0; color: inherit; font-size: 1.6rem; cursor: pointer; }

/* hero */
.hero { position: relative; padding: 7rem 0; text-align: center; background-size: cover; background-position: center; }
.hero-overlay { position: absolute; inset: 0; background: #000; }
.hero-content { position: relative; }
.hero h1 { font-size: clamp(2rem, 5vw, 3.5rem); }
.hero-subtitle { font-size: 1.2rem; max-width: 680px; margin: 0 auto 2rem; opacity: 0.9; }

/* sections */
.section { padding: 4.5rem 0; }
.section:nth-of-type(even) { background: var(--color-surface); }
.section-title { font-size: 2rem; text-align: center; }
.section-subtitle { text-align: center; max-width: 720px; margin: 0 auto 2.5rem; opacity: 0.8; }
.section-teaser { text-align: center; }
.section-elements { display: flex; flex-direction: column; gap: 1.5rem; margin-top: 2rem; }

.cards { display: grid; gap: 1.5rem; }
.cards-grid { grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); }
.cards-columns { grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); }
.cards-list { grid-template-columns: 1fr; }
.cards-list .card { display: flex; }
.cards-list .card-image { width: 280px; aspect-ratio: auto; }
.card { background: var(--color-background); border-radius: 12px; overflow: hidden; box-shadow: 0 4px 16px rgba(0, 0, 0, 0.06); }
.card-image { display: block; width: 100%; aspect-ratio: 16 / 10; object-fit: cover; }
.card-body { padding: 1.25rem; }

/* contact */
.contact-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 2.5rem; }
.contact .section-title { text-align: left; }
.contact-details { list-style: none; padding: 0; }
.contact-details li { margin-bottom: 0.6rem; }
.contact-form { display: flex; flex-direction: column; gap: 1rem; }
.form-field { display: flex; flex-direction: column; gap: 0.3rem; }
.form-field input, .form-field textarea {
  font: inherit; padding: 0.7rem; border: 1px solid #d1d5db; border-radius: 8px;
}
.form-field input:focus, .form-field textarea:focus { outline: 2px solid var(--color-primary); border-color: transparent; }

/* footer */
.site-footer { padding: 2rem 0; background: var(--color-text); color: var(--color-background); }
.footer-inner { display: flex; flex-wrap: wrap; justify-content: space-between; gap: 1rem; }
.site-footer a { color: inherit; opacity: 0.8; }
.legal-page, .thank-you { padding: 4rem 0; }
.thank-you { text-align: center; }
.legal-updated { opacity: 0.7; font-size: 0.9rem; }

/* elements */
.el-image { margin: 0 auto; text-align: center; }
.el-image img.rounded { border-radius: 12px; }
.el-image figcaption, .el-chart figcaption { font-size: 0.9rem; opacity: 0.75; margin-top: 0.5rem; }
.el-quote { margin: 0; padding: 1rem 1.5rem; border-left: 4px solid var(--color-primary); font-style: italic; }
.el-quote cite { display: block; margin-top: 0.5rem; font-style: normal; opacity: 0.75; }
.el-quote cite::before { content: "\2014\00a0"; }
.el-list-icon { list-style: none; padding-left: 0; }
.list-icon { display: inline-block; width: 1.5em; color: var(--color-primary); }
.el-accordion { border: 1px solid #e5e7eb; border-radius: 10px; overflow: hidden; }
.accordion-item + .accordion-item { border-top: 1px solid #e5e7eb; }
.accordion-header {
  display: flex; justify-content: space-between; width: 100%; padding: 1rem 1.25rem;
  background: none; border: 0; font: inherit; font-weight: 600; text-align: left; cursor: pointer; color: inherit;
}
.accordion-header[aria-expanded="true"] { color: var(--accent); }
.accordion-header[aria-expanded="true"] .accordion-icon { transform: rotate(45deg); }
.accordion-icon { transition: transform 0.2s ease; }
.accordion-panel { padding: 0 1.25rem 1rem; }
.el-tabs, .el-progress { width: 100%; }
.tab-list { display: flex; gap: 0.25rem; border-bottom: 2px solid #e5e7eb; flex-wrap: wrap; }
.tab-button { background: none; border: 0; padding: 0.7rem 1.1rem; font: inherit; cursor: pointer; color: inherit; border-bottom: 2px solid transparent; margin-bottom: -2px; }
.tab-button[aria-selected="true"] { border-bottom-color: var(--accent); color: var(--accent); font-weight: 600; }
.tab-panel { padding: 1rem 0; }
.progress-label { display: flex; justify-content: space-between; font-size: 0.95rem; margin-bottom: 0.3rem; }
.progress-track { background: #e5e7eb; border-radius: 999px; overflow: hidden; }
.progress-fill { height: 100%; border-radius: 999px; transition: width 1s ease; }
.el-rating { font-size: 1.4rem; display: flex; align-items: center; gap: 0.15rem; }
.star.half { opacity: 0.55; }
.star.empty { opacity: 0.35; }
.rating-value, .rating-label { font-size: 0.95rem; margin-left: 0.5rem; color: var(--color-text); }
.el-counter, .el-countdown { text-align: center; }
.counter-value { display: block; font-size: 2.75rem; font-weight: 800; }
.counter-label { opacity: 0.8; }
.countdown-label { font-weight: 600; margin-bottom: 0.75rem; }
.countdown-units { display: flex; justify-content: center; gap: 1rem; }
.countdown-unit { min-width: 72px; padding: 0.75rem; border-radius: 10px; background: var(--color-surface); }
.countdown-number { display: block; font-size: 2rem; font-weight: 700; color: var(--accent); }
.countdown-unit-label { font-size: 0.8rem; text-transform: uppercase; opacity: 0.7; }
.el-timeline { list-style: none; padding-left: 1.5rem; border-left: 3px solid var(--accent); }
.timeline-item { position: relative; margin-bottom: 1.5rem; }
.timeline-item::before {
  content: ""; position: absolute; left: -2.05rem; top: 0.35rem; width: 14px; height: 14px;
  border-radius: 50%; background: var(--accent);
}
.timeline-date { font-size: 0.85rem; font-weight: 600; color: var(--accent); }
.el-pricing { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 1.5rem; }
.pricing-plan { padding: 2rem; border: 1px solid #e5e7eb; border-radius: 14px; text-align: center; background: var(--color-background); }
.pricing-plan.featured { border: 2px solid var(--accent); transform: scale(1.03); box-shadow: 0 8px 24px rgba(0, 0, 0, 0.08); }
.pricing-price { font-size: 2.5rem; font-weight: 800; margin: 1rem 0; }
.pricing-price .period { font-size: 1rem; font-weight: 400; opacity: 0.7; }
.pricing-plan ul { list-style: none; padding: 0; margin: 0 0 1.5rem; }
.pricing-plan li { padding: 0.4rem 0; border-bottom: 1px solid #f3f4f6; }
.el-testimonial { margin: 0; padding: 2rem; border-radius: 14px; background: var(--color-surface); text-align: center; }
.el-testimonial blockquote { margin: 1rem 0; font-style: italic; font-size: 1.1rem; }
.el-testimonial .el-rating { justify-content: center; color: #f5b301; }
.el-testimonial figcaption span { display: block; opacity: 0.7; font-size: 0.9rem; }
.testimonial-avatar { width: 72px; height: 72px; border-radius: 50%; object-fit: cover; }
.el-video { position: relative; aspect-ratio: 16 / 9; }
.el-video iframe, .el-video video { position: absolute; inset: 0; width: 100%; height: 100%; border: 0; border-radius: 12px; }
.el-map iframe { width: 100%; border: 0; border-radius: 12px; }
.el-qrcode { text-align: center; }
.qr-caption { font-size: 0.9rem; opacity: 0.8; }
.el-chart { margin: 0; }
.el-chart svg { width: 100%; height: auto; }
.chart-legend { display: flex; flex-wrap: wrap; justify-content: center; gap: 1rem; list-style: none; padding: 0; font-size: 0.9rem; }
.legend-swatch { display: inline-block; width: 12px; height: 12px; border-radius: 3px; margin-right: 0.4rem; }
.chart-empty { text-align: center; opacity: 0.6; }
.el-share, .el-social { display: flex; flex-wrap: wrap; gap: 0.6rem; }
.share-btn { padding: 0.5rem 1rem; color: #fff; text-decoration: none; font-size: 0.9rem; background: #374151; }
.el-share.rounded .share-btn { border-radius: 999px; }
.share-facebook { background: #1877f2; }
.share-twitter { background: #111827; }
.share-linkedin { background: #0a66c2; }
.share-whatsapp { background: #25d366; }
.share-pinterest { background: #e60023; }
.social-link {
  display: inline-flex; align-items: center; justify-content: center; border-radius: 50%;
  background: var(--color-primary); color: #fff; text-decoration: none; font-weight: 700; font-size: 0.85rem;
}
.el-code { background: #111827; color: #f9fafb; padding: 1rem 1.25rem; border-radius: 10px; overflow-x: auto; font-size: 0.9rem; }
.el-alert { padding: 1rem 1.25rem; border-radius: 10px; border-left: 4px solid; }
.alert-info { background: #eff6ff; border-color: #3b82f6; color: #1e3a8a; }
.alert-success { background: #ecfdf5; border-color: #10b981; color: #065f46; }
.alert-warning { background: #fffbeb; border-color: #f59e0b; color: #92400e; }
.alert-error { background: #fef2f2; border-color: #ef4444; color: #991b1b; }
.el-table-wrap { overflow-x: auto; }
.el-table { width: 100%; border-collapse: collapse; }
.el-table th, .el-table td { padding: 0.7rem 1rem; border-bottom: 1px solid #e5e7eb; text-align: left; }
.el-table th { background: var(--color-surface); }
.el-table.striped tbody tr:nth-child(even) { background: var(--color-surface); }
.el-gallery { display: grid; }
.el-gallery figure { margin: 0; }
.el-gallery img { width: 100%; aspect-ratio: 1; object-fit: cover; border-radius: 8px; }
.el-stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 1.5rem; text-align: center; }
.stat-value { display: block; font-size: 2.5rem; font-weight: 800; color: var(--accent); }
.el-embed-escaped { white-space: pre-wrap; opacity: 0.7; }

/* overlays */
.cookie-banner {
  position: fixed; left: 1rem; right: 1rem; bottom: 1rem; z-index: 90; display: flex; flex-wrap: wrap;
  align-items: center; justify-content: space-between; gap: 1rem; padding: 1rem 1.5rem;
  background: var(--color-text); color: var(--color-background); border-radius: 12px;
}
.cookie-banner[hidden], .age-gate[hidden], .chat-panel[hidden] { display: none; }
.cookie-banner a { color: inherit; }
.cookie-actions { display: flex; gap: 0.5rem; }
.age-gate { position: fixed; inset: 0; z-index: 100; display: flex; align-items: center; justify-content: center; background: rgba(0, 0, 0, 0.85); }
.age-gate-box { max-width: 420px; padding: 2rem; border-radius: 14px; background: var(--color-background); text-align: center; }
.age-gate-actions { display: flex; justify-content: center; gap: 0.75rem; }
.chat-widget { position: fixed; bottom: 1.25rem; z-index: 80; display: flex; flex-direction: column; gap: 0.75rem; }
.chat-bottom-right { right: 1.25rem; align-items: flex-end; }
.chat-bottom-left { left: 1.25rem; align-items: flex-start; }
.chat-bubble { width: 56px; height: 56px; border-radius: 50%; border: 0; background: var(--chat-color); color: #fff; font-size: 1.5rem; cursor: pointer; box-shadow: 0 6px 18px rgba(0, 0, 0, 0.2); }
.chat-panel { max-width: 280px; padding: 1rem; border-radius: 12px; background: var(--color-background); box-shadow: 0 6px 24px rgba(0, 0, 0, 0.15); }

@media (max-width: 768px) {
  .nav-toggle { display: block; }
  .site-nav { display: none; position: absolute; top: 100%; left: 0; right: 0; background: inherit; }
  .site-nav.open { display: block; }
  .site-nav ul { flex-direction: column; padding: 1rem 1.25rem; }
  .hero { padding: 5rem 0; }
  .section { padding: 3rem 0; }
  .cards-list .card { flex-direction: column; }
  .cards-list .card-image { width: 100%; }
  .pricing-plan.featured { transform: none; }
  .el-gallery { grid-template-columns: repeat(2, 1fr) !important; }
}
"#;

/// Font stacks may contain quotes and commas but nothing that ends the declaration.
fn font_stack(value: &str, fallback: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v.contains([';', '{', '}', '<', '>', '\\']) {
        fallback.to_string()
    } else {
        v.to_string()
    }
}

/// `assets/css/styles.css`: theme variables followed by the shared rules.
pub fn generate_styles(site: &SiteData) -> String {
    let theme = &site.theme;
    let body_font = font_stack(&theme.font_family, "system-ui, sans-serif");
    let heading_font = theme
        .heading_font
        .as_deref()
        .map(|f| font_stack(f, &body_font))
        .unwrap_or_else(|| body_font.clone());

    format!(
        ":root {{\n  --color-primary: {};\n  --color-secondary: {};\n  --color-background: {};\n  --color-text: {};\n  --color-surface: #f8fafc;\n  --accent: var(--color-primary);\n  --font-body: {};\n  --font-heading: {};\n}}\n\n{}",
        color_or(Some(&theme.primary_color), "#4f46e5"),
        color_or(Some(&theme.secondary_color), "#06b6d4"),
        color_or(Some(&theme.background_color), "#ffffff"),
        color_or(Some(&theme.text_color), "#1f2937"),
        body_font,
        heading_font,
        BASE_CSS
    )
}
