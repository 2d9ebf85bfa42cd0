//! Output minification for HTML pages and generated XML.

use minify_html::{Cfg, minify};
use std::borrow::Cow;

/// What kind of document is being minified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinifyType {
    Html,
    Xml,
}

/// Minify rendered output before it is written to disk.
///
/// Returns the input unchanged when `enabled` is false, so call sites
/// do not need to branch on the build flag.
pub fn minify_output(content: &[u8], minify_type: MinifyType, enabled: bool) -> Cow<'_, [u8]> {
    if !enabled {
        return Cow::Borrowed(content);
    }

    let cfg = match minify_type {
        MinifyType::Html => Cfg {
            minify_js: true,
            minify_css: true,
            keep_closing_tags: true,
            keep_html_and_head_opening_tags: true,
            ..Cfg::default()
        },
        MinifyType::Xml => Cfg {
            keep_closing_tags: true,
            ..Cfg::default()
        },
    };

    Cow::Owned(minify(content, &cfg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_returns_borrowed() {
        let html = b"<p>  hello  </p>\n";
        let out = minify_output(html, MinifyType::Html, false);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out.as_ref(), html);
    }

    #[test]
    fn test_html_minification_collapses_whitespace() {
        let html = b"<html>\n  <body>\n    <p>hello</p>\n  </body>\n</html>\n";
        let out = minify_output(html, MinifyType::Html, true);
        assert!(out.len() < html.len());
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("<p>hello</p>"));
    }

    #[test]
    fn test_xml_keeps_closing_tags() {
        let xml = b"<url>\n  <loc>https://example.com/</loc>\n</url>\n";
        let out = minify_output(xml, MinifyType::Xml, true);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("</loc>"));
        assert!(text.contains("</url>"));
    }
}
