//! URL slugification and path sanitization.
//!
//! Output paths are derived from source file names, which may contain
//! characters that make for poor URLs. `SlugMode` picks how aggressively
//! they are rewritten.

use crate::config::{SiteConfig, SlugMode};
use std::path::{Path, PathBuf};

/// Characters forbidden in file paths and fragments
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '(', ')', '[', ']', '\t', '\r', '\n',
];

/// Convert path to URL-safe format based on config
pub fn slugify_path(path: impl AsRef<Path>, config: &'static SiteConfig) -> PathBuf {
    match config.build.slug.path {
        SlugMode::Safe => sanitize_path(path.as_ref()),
        SlugMode::On => path
            .as_ref()
            .components()
            .map(|c| slugify(&c.as_os_str().to_string_lossy()))
            .collect(),
        SlugMode::No => path.as_ref().to_path_buf(),
    }
}

/// Full slugification: transliterate to ASCII, lowercase, dash-separated.
fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut prev_dash = true;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }

    slug.trim_end_matches('-').to_owned()
}

/// Remove forbidden characters and replace whitespace with underscores
fn sanitize_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Sanitize each component of a path
fn sanitize_path(path: &Path) -> PathBuf {
    path.components()
        .map(|c| sanitize_text(&c.as_os_str().to_string_lossy()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text_removes_forbidden_chars() {
        assert_eq!(sanitize_text("Hello<World>"), "HelloWorld");
        assert_eq!(sanitize_text("a<b>c:d|e?f*g#h\\i(j)k[l]m"), "abcdefghijklm");
    }

    #[test]
    fn test_sanitize_text_replaces_whitespace() {
        assert_eq!(sanitize_text("Hello World"), "Hello_World");
        assert_eq!(sanitize_text("  Hello World  "), "Hello_World");
    }

    #[test]
    fn test_sanitize_text_preserves_unicode() {
        assert_eq!(sanitize_text("你好世界"), "你好世界");
    }

    #[test]
    fn test_sanitize_path_with_spaces() {
        let result = sanitize_path(Path::new("posts/my first post"));
        assert_eq!(result, PathBuf::from("posts/my_first_post"));
    }

    #[test]
    fn test_slugify_lowercases_and_dashes() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("My Article (2024) - Part #1"), "my-article-2024-part-1");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Überstraße"), "uberstrasse");
        assert_eq!(slugify("你好"), "ni-hao");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("--trailing--"), "trailing");
    }
}
