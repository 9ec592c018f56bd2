/// Named colors accepted in site data besides hex and `rgb()` notation.
const NAMED_COLORS: &[&str] = &[
    "black",
    "white",
    "red",
    "green",
    "blue",
    "yellow",
    "orange",
    "purple",
    "pink",
    "gray",
    "grey",
    "transparent",
    "inherit",
    "currentcolor",
];

/// Validate a CSS color value and return it normalized (trimmed, lowercase hex).
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` with
/// numeric components, and a short list of named colors. Anything else,
/// including values that could break out of a `style` attribute, is `None`.
pub fn parse_color(input: &str) -> Option<String> {
    let value = input.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(hex) = value.strip_prefix('#') {
        let valid_len = matches!(hex.len(), 3 | 4 | 6 | 8);
        if valid_len && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Some(format!("#{}", hex.to_ascii_lowercase()));
        }
        return None;
    }

    let lower = value.to_ascii_lowercase();
    if let Some(args) = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let numeric = parts
            .iter()
            .all(|p| !p.is_empty() && p.parse::<f32>().is_ok());
        if (parts.len() == 3 || parts.len() == 4) && numeric {
            let func = if parts.len() == 3 { "rgb" } else { "rgba" };
            return Some(format!("{}({})", func, parts.join(", ")));
        }
        return None;
    }

    if NAMED_COLORS.contains(&lower.as_str()) {
        return Some(lower);
    }

    None
}

/// [`parse_color`] with a fallback for missing or invalid values.
pub fn color_or(input: Option<&str>, fallback: &str) -> String {
    input
        .and_then(parse_color)
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#FFF"), Some("#fff".to_string()));
        assert_eq!(parse_color(" #4f46e5 "), Some("#4f46e5".to_string()));
        assert_eq!(parse_color("#4f46e580"), Some("#4f46e580".to_string()));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#ggg"), None);
    }

    #[test]
    fn test_parse_color_rgb() {
        assert_eq!(
            parse_color("rgb(0,0,0)"),
            Some("rgb(0, 0, 0)".to_string())
        );
        assert_eq!(
            parse_color("RGBA(10, 20, 30, 0.5)"),
            Some("rgba(10, 20, 30, 0.5)".to_string())
        );
        assert_eq!(parse_color("rgb(1,2)"), None);
        assert_eq!(parse_color("rgb(1,2,x)"), None);
    }

    #[test]
    fn test_parse_color_named_and_rejects_injection() {
        assert_eq!(parse_color("White"), Some("white".to_string()));
        assert_eq!(parse_color("red;background:url(x)"), None);
        assert_eq!(parse_color("\"><script>"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn test_color_or() {
        assert_eq!(color_or(Some("#000"), "#fff"), "#000");
        assert_eq!(color_or(Some("nope"), "#fff"), "#fff");
        assert_eq!(color_or(None, "#fff"), "#fff");
    }
}
