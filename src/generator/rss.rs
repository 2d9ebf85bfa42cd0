//! rss feed generation.
//!
//! Builds an rss channel from the collected documents.

use crate::{
    config::SiteConfig,
    content::Document,
    log,
    render::markdown,
    utils::{
        date,
        minify::{MinifyType, minify_output},
    },
};
use anyhow::{Result, anyhow};
use chrono_tz::Tz;
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::{fs, sync::LazyLock};

/// Build rss feed if enabled in config.
pub fn build_rss(config: &'static SiteConfig, documents: &[Document]) -> Result<()> {
    if config.build.rss.enable {
        RssFeed::build(config, documents).write(config)?;
    }
    Ok(())
}

/// rss feed builder
struct RssFeed<'a> {
    config: &'a SiteConfig,
    documents: &'a [Document],
    tz: Option<Tz>,
}

impl<'a> RssFeed<'a> {
    fn build(config: &'a SiteConfig, documents: &'a [Document]) -> Self {
        Self {
            config,
            documents,
            tz: config.timezone(),
        }
    }

    /// Generate rss xml string
    fn into_xml(self) -> Result<String> {
        let items: Vec<_> = self
            .documents
            .iter()
            .filter_map(|doc| document_to_rss_item(doc, self.config, self.tz))
            .collect();

        let channel = ChannelBuilder::default()
            .title(&self.config.base.title)
            .link(self.config.base.url.as_deref().unwrap_or_default())
            .description(&self.config.base.description)
            .language(self.config.base.language.clone())
            .generator("stanza".to_string())
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }

    /// Write rss feed to file
    fn write(self, config: &'static SiteConfig) -> Result<()> {
        let minify_enabled = config.build.minify;
        let rss_path = config.paths().output_dir().join(&config.build.rss.path);
        let xml = self.into_xml()?;
        let xml = minify_output(xml.as_bytes(), MinifyType::Xml, minify_enabled);

        if let Some(parent) = rss_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&rss_path, &*xml)?;

        log!("rss"; "{}", rss_path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

/// Convert a document to an rss item.
///
/// Items without an absolute URL are skipped; validation already
/// guarantees `base.url` is set when rss is enabled.
fn document_to_rss_item(
    doc: &Document,
    config: &SiteConfig,
    tz: Option<Tz>,
) -> Option<rss::Item> {
    let link = doc.paths.full_url.clone()?;
    let description = doc.summary.as_deref().map(markdown::to_html);
    let author = normalize_rss_author(doc.meta.author.as_ref(), config);

    Some(
        ItemBuilder::default()
            .title(doc.title.clone())
            .link(Some(link.clone()))
            .guid(GuidBuilder::default().permalink(true).value(link).build())
            .description(description)
            .pub_date(date::rfc2822(&doc.date, tz))
            .author(author)
            .build(),
    )
}

/// Normalize author field to rss format: "email@example.com (Name)"
///
/// Priority:
/// 1. Post meta author if already in valid format
/// 2. Site config author if in valid format
/// 3. Combine site config email and author
fn normalize_rss_author(author: Option<&String>, config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    let author = author?;

    // Check if post author is already valid
    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.clone());
    }

    // Try site config author
    let site_author = &config.base.author;
    if RE_VALID_AUTHOR.is_match(site_author) {
        return Some(site_author.clone());
    }

    // Combine email and author name
    Some(format!("{} ({})", config.base.email, site_author))
}
