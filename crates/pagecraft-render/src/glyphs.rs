//! Icon glyph lookup
//!
//! A small closed mapping from symbolic icon names (as stored in content
//! documents) to display glyphs. Unknown names resolve to a generic glyph
//! rather than failing a render.

/// Generic fallback glyph for unknown icon names
pub const FALLBACK_GLYPH: &str = "✦";

/// Resolve a symbolic icon name to its display glyph
#[must_use]
pub fn glyph(name: &str) -> &'static str {
    match name {
        "rocket" => "🚀",
        "star" => "⭐",
        "shield" => "🛡️",
        "bolt" => "⚡",
        "heart" => "❤️",
        "check" => "✅",
        "chart" => "📈",
        "globe" => "🌍",
        "lock" => "🔒",
        "user" => "👤",
        "mail" => "✉️",
        "phone" => "📞",
        "clock" => "⏰",
        "gift" => "🎁",
        "cart" => "🛒",
        "tools" => "🛠️",
        "sparkles" => "✨",
        "target" => "🎯",
        _ => FALLBACK_GLYPH,
    }
}

/// Resolve an optional icon name; `None` also yields the fallback
#[must_use]
pub fn glyph_or_fallback(name: Option<&str>) -> &'static str {
    name.map_or(FALLBACK_GLYPH, glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_resolve() {
        assert_eq!(glyph("rocket"), "🚀");
        assert_eq!(glyph("mail"), "✉️");
    }

    #[test]
    fn unknown_name_falls_back() {
        assert_eq!(glyph("definitely-not-an-icon"), FALLBACK_GLYPH);
        assert_eq!(glyph(""), FALLBACK_GLYPH);
    }

    #[test]
    fn optional_lookup() {
        assert_eq!(glyph_or_fallback(Some("star")), "⭐");
        assert_eq!(glyph_or_fallback(None), FALLBACK_GLYPH);
    }
}
