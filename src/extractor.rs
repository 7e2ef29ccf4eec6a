//! Locates the display name and the embedded `react-data` payload in a CMS page.
//!
//! The page is server-rendered HTML with the credits serialized as an
//! entity-escaped JSON attribute. Scraping is isolated behind [`PageExtractor`]
//! so the matching strategy can change without touching the transform.

use regex::{Captures, Regex};
use std::sync::LazyLock;

// `/forums/members/<id>` link whose text is the display name
static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"/forums/members/\d+/?["']?>([^<]+)</a>"#)
        .expect("username pattern is valid")
});

static REACT_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"react-data="([^"]+)""#).expect("react-data pattern is valid")
});

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(quot|amp|lt|gt);").expect("entity pattern is valid"));

/// Pulls raw values out of a CMS page.
pub trait PageExtractor {
    /// Display name linked from the profile, if present.
    fn username(&self, html: &str) -> Option<String>;

    /// Raw (still entity-escaped) value of the `react-data` attribute.
    fn react_data<'a>(&self, html: &'a str) -> Option<&'a str>;
}

/// Pattern-matching extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl PageExtractor for RegexExtractor {
    fn username(&self, html: &str) -> Option<String> {
        USERNAME_RE
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|name| !name.is_empty())
    }

    fn react_data<'a>(&self, html: &'a str) -> Option<&'a str> {
        REACT_DATA_RE
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Decodes `&quot;`, `&amp;`, `&lt;` and `&gt;` in a single left-to-right pass.
///
/// Decoded output is never rescanned, so `&amp;quot;` yields `&quot;`.
pub fn decode_entities(raw: &str) -> String {
    ENTITY_RE
        .replace_all(raw, |caps: &Captures| match &caps[1] {
            "quot" => "\"",
            "amp" => "&",
            "lt" => "<",
            _ => ">",
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_from_member_link() {
        let html = r#"<div><a href=/forums/members/641532>Pokeguy</a></div>"#;
        assert_eq!(RegexExtractor.username(html), Some("Pokeguy".to_string()));

        let html = r#"<a href="https://www.smogon.com/forums/members/641532/">  Pokeguy </a>"#;
        assert_eq!(RegexExtractor.username(html), Some("Pokeguy".to_string()));
    }

    #[test]
    fn test_username_absent() {
        assert_eq!(RegexExtractor.username("<a href=/forums/threads/1>x</a>"), None);
        assert_eq!(RegexExtractor.username("<a href=/forums/members/12>  </a>"), None);
    }

    #[test]
    fn test_react_data_first_match() {
        let html = r#"<div react-data="{&quot;a&quot;:1}"></div><div react-data="second"></div>"#;
        assert_eq!(
            RegexExtractor.react_data(html),
            Some("{&quot;a&quot;:1}")
        );
    }

    #[test]
    fn test_react_data_missing_or_empty() {
        assert_eq!(RegexExtractor.react_data("<div data-x=\"1\"></div>"), None);
        assert_eq!(RegexExtractor.react_data(r#"<div react-data=""></div>"#), None);
    }

    #[test]
    fn test_decode_all_entities_once() {
        assert_eq!(
            decode_entities("a &quot;b&quot; &amp; &lt;c&gt;"),
            "a \"b\" & <c>"
        );
    }

    #[test]
    fn test_decode_does_not_double_unescape() {
        assert_eq!(decode_entities("&amp;quot;"), "&quot;");
        assert_eq!(decode_entities("&amp;amp;lt;"), "&amp;lt;");
    }

    #[test]
    fn test_decode_leaves_other_entities() {
        assert_eq!(decode_entities("&nbsp;&#39;&quot"), "&nbsp;&#39;&quot");
    }
}
