//! `[build]` section configuration.
//!
//! Contains build settings including paths, minification, drafts, RSS, etc.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Enums
// ============================================================================

/// URL slug generation mode for output paths.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Always convert to ASCII slug (e.g., "Tēnā Koe" → "tena-koe").
    On,
    /// Only slugify non-ASCII; keep ASCII as-is (default).
    #[default]
    Safe,
    /// No slugification; preserve original text.
    No,
}

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in stanza.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Source directory
/// output = "public"        # Output directory
/// minify = true            # Minify HTML
/// drafts = false           # Skip draft documents
///
/// [build.rss]
/// enable = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// URL path prefix for subdirectory deployment (e.g., "blog" → `/blog/...`).
    #[serde(default = "defaults::build::path_prefix")]
    #[educe(Default = defaults::build::path_prefix())]
    pub path_prefix: PathBuf,

    /// Content source directory (markdown files).
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static assets directory (images, CSS, JS).
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// HTML template directory. Built-in templates are used when it is absent.
    #[serde(default = "defaults::build::templates")]
    #[educe(Default = defaults::build::templates())]
    pub templates: PathBuf,

    /// Minify HTML output (removes whitespace).
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Clear output directory before each build.
    /// The output is a function of the sources, so this defaults to on.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub clean: bool,

    /// Include draft documents in the build.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub drafts: bool,

    /// RSS feed generation settings.
    #[serde(default)]
    pub rss: RssConfig,

    /// Sitemap generation settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// URL slugification settings.
    #[serde(default)]
    pub slug: SlugConfig,
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.rss]` section - RSS feed generation configuration.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RssConfig {
    /// Enable RSS feed generation. Requires `[base] url`.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = defaults::r#false())]
    pub enable: bool,

    /// Output path for RSS feed file, relative to the output directory.
    #[serde(default = "defaults::build::rss::path")]
    #[educe(Default = defaults::build::rss::path())]
    pub path: PathBuf,
}

/// `[build.sitemap]` section - sitemap generation configuration.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    /// Enable sitemap generation. Requires `[base] url`.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = defaults::r#false())]
    pub enable: bool,

    /// Output path for the sitemap file, relative to the output directory.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,
}

/// `[build.slug]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SlugConfig {
    /// Slugify URL paths
    #[serde(default = "defaults::build::slug::default")]
    #[educe(Default = defaults::build::slug::default())]
    pub path: SlugMode,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_build_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.assets, PathBuf::from("assets"));
        assert_eq!(config.build.templates, PathBuf::from("templates"));
        assert!(config.build.minify);
        assert!(config.build.clean);
        assert!(!config.build.drafts);
    }

    #[test]
    fn test_rss_config() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"

            [build.rss]
            enable = true
            path = "custom-feed.xml"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(config.build.rss.enable);
        assert_eq!(config.build.rss.path, PathBuf::from("custom-feed.xml"));
    }

    #[test]
    fn test_rss_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert!(!config.build.rss.enable);
        assert_eq!(config.build.rss.path, PathBuf::from("feed.xml"));
    }

    #[test]
    fn test_sitemap_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert!(!config.build.sitemap.enable);
        assert_eq!(config.build.sitemap.path, PathBuf::from("sitemap.xml"));
    }

    #[test]
    fn test_slug_mode_parsing() {
        // Test "on"
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"
            [build.slug]
            path = "on"
        "#,
        )
        .unwrap();
        assert!(matches!(config.build.slug.path, SlugMode::On));

        // Test "safe"
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"
            [build.slug]
            path = "safe"
        "#,
        )
        .unwrap();
        assert!(matches!(config.build.slug.path, SlugMode::Safe));

        // Test "no"
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"
            [build.slug]
            path = "no"
        "#,
        )
        .unwrap();
        assert!(matches!(config.build.slug.path, SlugMode::No));
    }

    #[test]
    fn test_slug_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert!(matches!(config.build.slug.path, SlugMode::Safe));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"

            [build]
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
    }

    #[test]
    fn test_rss_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
            [build.rss]
            unknown = "field"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_paths_custom() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
            [build]
            content = "posts"
            output = "dist"
            assets = "static"
            templates = "layouts"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.build.content, PathBuf::from("posts"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert_eq!(config.build.assets, PathBuf::from("static"));
        assert_eq!(config.build.templates, PathBuf::from("layouts"));
    }

    #[test]
    fn test_build_path_prefix() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
            [build]
            path_prefix = "blog"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert_eq!(config.build.path_prefix, PathBuf::from("blog"));
    }

    #[test]
    fn test_build_minify_disabled() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
            [build]
            minify = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert!(!config.build.minify);
    }

    #[test]
    fn test_build_drafts_enabled() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
            [build]
            drafts = true
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert!(config.build.drafts);
    }

    #[test]
    fn test_build_clean_disabled() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test"
            [build]
            clean = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert!(!config.build.clean);
    }
}
