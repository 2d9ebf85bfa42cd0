//! Sitemap generation.
//!
//! Generates a sitemap.xml file listing all pages for search engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    content::Document,
    log,
    utils::{
        date,
        minify::{MinifyType, minify_output},
    },
};
use anyhow::{Context, Result};
use std::fs;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &'static SiteConfig, documents: &[Document]) -> Result<()> {
    if config.build.sitemap.enable {
        let sitemap = Sitemap::from_documents(config, documents);
        sitemap.write(config)?;
    }
    Ok(())
}

/// Sitemap data structure
struct Sitemap {
    /// List of URL entries
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// Last modification date (YYYY-MM-DD)
    lastmod: Option<String>,
}

impl Sitemap {
    /// Build sitemap from collected documents.
    ///
    /// The site root is listed first, dated by the newest post, then one
    /// entry per page. Documents lack a full URL only when `base.url` is
    /// unset, and validation requires it when the sitemap is enabled.
    fn from_documents(config: &'static SiteConfig, documents: &[Document]) -> Self {
        let tz = config.timezone();
        let mut urls = Vec::with_capacity(documents.len() + 1);

        if let Some(base) = config.base.url.as_deref() {
            urls.push(UrlEntry {
                loc: format!("{}/", base.trim_end_matches('/')),
                lastmod: documents.first().map(|doc| date::ymd(&doc.date, tz)),
            });
        }

        urls.extend(documents.iter().filter_map(|doc| {
            Some(UrlEntry {
                loc: doc.paths.full_url.clone()?,
                lastmod: Some(date::ymd(&doc.date, tz)),
            })
        }));

        Self { urls }
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to output file.
    fn write(self, config: &'static SiteConfig) -> Result<()> {
        let sitemap_path = config
            .paths()
            .output_dir()
            .join(&config.build.sitemap.path);
        let xml = self.into_xml();
        let xml = minify_output(xml.as_bytes(), MinifyType::Xml, config.build.minify);

        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&sitemap_path, &*xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{}", sitemap_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
