//! A single validated content file.

use super::front_matter::{self, FrontMatter};
use super::ContentError;
use crate::config::SiteConfig;
use crate::utils::{date, slug};
use chrono::{DateTime, FixedOffset};
use std::fs;
use std::path::{Path, PathBuf};

/// Marker separating the summary from the rest of the body.
pub const SUMMARY_BREAK: &str = "<!--more-->";

/// Resolved locations for one page.
#[derive(Debug, Clone)]
pub struct PagePaths {
    /// Source file under the content directory.
    pub source: PathBuf,

    /// Output HTML file, inside the output directory.
    pub html: PathBuf,

    /// Site-relative URL path, pretty form (`/posts/hello/`).
    pub url_path: String,

    /// Absolute URL, present when `base.url` is configured.
    pub full_url: Option<String>,
}

/// A content file that passed metadata validation.
///
/// Construction guarantees a non-empty title and a parsed timestamp,
/// so the renderer never has to re-check either.
#[derive(Debug, Clone)]
pub struct Document {
    pub meta: FrontMatter,
    pub title: String,
    pub date: DateTime<FixedOffset>,

    /// Markdown body below the front matter block.
    pub body: String,

    /// Summary in raw markdown: the explicit `summary` key, or the body
    /// text above the `<!--more-->` marker.
    pub summary: Option<String>,

    pub paths: PagePaths,
}

impl Document {
    /// Read and validate one content file.
    ///
    /// Returns `Ok(None)` for drafts when draft building is off. Drafts
    /// are skipped right after the front matter parses, so an unfinished
    /// draft may omit its title or date without failing the build.
    pub fn from_file(
        path: &Path,
        config: &'static SiteConfig,
    ) -> Result<Option<Self>, ContentError> {
        let source = fs::read_to_string(path)
            .map_err(|e| ContentError::Io(path.to_path_buf(), e))?;

        let (front, body) = front_matter::split(&source)
            .ok_or_else(|| ContentError::MissingFrontMatter(path.to_path_buf()))?;

        let meta: FrontMatter = toml::from_str(front)
            .map_err(|e| ContentError::FrontMatter(path.to_path_buf(), e))?;

        if meta.draft && !config.build.drafts {
            return Ok(None);
        }

        let title = match meta.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_owned(),
            _ => return Err(ContentError::MissingField(path.to_path_buf(), "title")),
        };

        let raw_date = meta
            .date
            .as_deref()
            .ok_or_else(|| ContentError::MissingField(path.to_path_buf(), "date"))?;
        let date = date::parse(raw_date)
            .ok_or_else(|| ContentError::Date(path.to_path_buf(), raw_date.to_owned()))?;

        let summary = meta.summary.clone().or_else(|| {
            body.split_once(SUMMARY_BREAK)
                .map(|(above, _)| above.trim().to_owned())
        });

        let paths = PagePaths::from_source(path, meta.url.as_deref(), config)?;

        Ok(Some(Self {
            meta,
            title,
            date,
            body: body.to_owned(),
            summary,
            paths,
        }))
    }
}

impl PagePaths {
    /// Map a source file to its output location and URL.
    ///
    /// | Source | html | url_path |
    /// |--------|------|----------|
    /// | `content/posts/hello.md` | `public/posts/hello/index.html` | `/posts/hello/` |
    /// | `content/index.md` | `public/index.html` | `/` |
    ///
    /// A front matter `url` replaces the path-derived segment.
    pub fn from_source(
        source: &Path,
        url_override: Option<&Path>,
        config: &'static SiteConfig,
    ) -> Result<Self, ContentError> {
        let paths = config.paths();
        let output_dir = paths.output_dir();

        let relative = source
            .strip_prefix(&config.build.content)
            .map_err(|_| ContentError::OutsideContentDir(source.to_path_buf()))?
            .with_extension("");

        let is_root_index = relative == Path::new("index");

        let html = match url_override {
            Some(url) => {
                let url = url.strip_prefix("/").unwrap_or(url);
                output_dir.join(url).join("index.html")
            }
            None if is_root_index => output_dir.join("index.html"),
            None => output_dir
                .join(slug::slugify_path(&relative, config))
                .join("index.html"),
        };

        // Pretty URL: ".../index.html" is addressed as ".../"
        let url_path = paths
            .url_for_path(&html)
            .unwrap_or_else(|| String::from("/"));
        let url_path = url_path
            .strip_suffix("index.html")
            .map(str::to_owned)
            .unwrap_or(url_path);

        let full_url = config
            .base
            .url
            .as_deref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), url_path));

        Ok(Self {
            source: source.to_path_buf(),
            html,
            url_path,
            full_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn test_config(toml: &str) -> &'static SiteConfig {
        Box::leak(Box::new(SiteConfig::from_str(toml).unwrap()))
    }

    fn base_config() -> &'static SiteConfig {
        test_config(
            r#"
            [base]
            title = "Test"
            description = "Test blog"
            url = "https://example.com"
        "#,
        )
    }

    #[test]
    fn test_paths_regular_page() {
        let config = base_config();
        let paths =
            PagePaths::from_source(Path::new("content/posts/hello.md"), None, config).unwrap();

        assert_eq!(paths.html, PathBuf::from("public/posts/hello/index.html"));
        assert_eq!(paths.url_path, "/posts/hello/");
        assert_eq!(
            paths.full_url.as_deref(),
            Some("https://example.com/posts/hello/")
        );
    }

    #[test]
    fn test_paths_root_index() {
        let config = base_config();
        let paths = PagePaths::from_source(Path::new("content/index.md"), None, config).unwrap();

        assert_eq!(paths.html, PathBuf::from("public/index.html"));
        assert_eq!(paths.url_path, "/");
    }

    #[test]
    fn test_paths_nested_index_is_not_root() {
        let config = base_config();
        let paths =
            PagePaths::from_source(Path::new("content/posts/index.md"), None, config).unwrap();

        assert_eq!(paths.html, PathBuf::from("public/posts/index/index.html"));
    }

    #[test]
    fn test_paths_url_override() {
        let config = base_config();
        let paths = PagePaths::from_source(
            Path::new("content/posts/hello.md"),
            Some(Path::new("/about/me")),
            config,
        )
        .unwrap();

        assert_eq!(paths.html, PathBuf::from("public/about/me/index.html"));
        assert_eq!(paths.url_path, "/about/me/");
    }

    #[test]
    fn test_paths_slugified() {
        let config = test_config(
            r#"
            [base]
            title = "Test"
            description = "Test blog"

            [build.slug]
            path = "on"
        "#,
        );
        let paths =
            PagePaths::from_source(Path::new("content/posts/Hello World.md"), None, config)
                .unwrap();

        assert_eq!(
            paths.html,
            PathBuf::from("public/posts/hello-world/index.html")
        );
    }

    #[test]
    fn test_paths_outside_content_dir() {
        let config = base_config();
        let result = PagePaths::from_source(Path::new("other/hello.md"), None, config);
        assert!(result.is_err());
    }
}
