//! Page rendering: markdown conversion plus template assembly.
//!
//! Rendering is deterministic. Page HTML depends only on the document,
//! the templates, and the configured timezone.

pub mod markdown;
mod template;

pub use template::TemplateEngine;

use crate::config::SiteConfig;
use crate::content::Document;
use crate::utils::date;
use anyhow::Result;
use chrono_tz::Tz;
use serde::Serialize;

/// `site.*` values exposed to every template.
#[derive(Debug, Serialize)]
pub struct SiteContext<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub author: &'a str,
    pub language: &'a str,
    pub copyright: Option<&'a str>,
    pub base_url: Option<&'a str>,
}

impl<'a> SiteContext<'a> {
    pub fn from_config(config: &'a SiteConfig) -> Self {
        Self {
            title: &config.base.title,
            description: &config.base.description,
            author: &config.base.author,
            language: &config.base.language,
            copyright: (!config.base.copyright.is_empty())
                .then_some(config.base.copyright.as_str()),
            base_url: config.base.url.as_deref(),
        }
    }
}

/// `page.*` values for a single rendered page, and each entry of the
/// index listing's `pages` array.
#[derive(Debug, Serialize)]
pub struct PageContext {
    pub title: String,
    /// Display timestamp, localized when a timezone is configured.
    pub date: String,
    /// RFC 3339 form for `<time datetime>` attributes.
    pub datetime: String,
    pub url: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
    /// Summary rendered to HTML, when the page has one.
    pub summary: Option<String>,
    /// Full body rendered to HTML. Empty in listing entries.
    pub content: String,
}

impl PageContext {
    fn new(doc: &Document, tz: Option<Tz>, with_body: bool) -> Self {
        Self {
            title: doc.title.clone(),
            date: date::display(&doc.date, tz),
            datetime: date::rfc3339(&doc.date, tz),
            url: doc.paths.url_path.clone(),
            author: doc.meta.author.clone(),
            tags: doc.meta.tags.clone(),
            summary: doc.summary.as_deref().map(markdown::to_html),
            content: if with_body {
                markdown::to_html(&doc.body)
            } else {
                String::new()
            },
        }
    }
}

/// Renders documents into complete HTML pages.
pub struct Renderer {
    config: &'static SiteConfig,
    engine: TemplateEngine,
    tz: Option<Tz>,
}

impl Renderer {
    pub fn new(config: &'static SiteConfig) -> Result<Self> {
        Ok(Self {
            config,
            engine: TemplateEngine::load(config)?,
            tz: config.timezone(),
        })
    }

    /// Render one document into a full page.
    ///
    /// The template defaults to `page.html`; a `template` front matter key
    /// picks another loaded template.
    pub fn render_page(&self, doc: &Document) -> Result<String> {
        let template = doc
            .meta
            .extra
            .get("template")
            .and_then(toml::Value::as_str)
            .filter(|name| self.engine.has_template(name))
            .unwrap_or("page.html");

        let mut ctx = self.base_context();
        ctx.insert("page", &PageContext::new(doc, self.tz, true));
        self.engine.render(template, &ctx)
    }

    /// Render the generated index listing, newest post first.
    pub fn render_index(&self, docs: &[Document]) -> Result<String> {
        let pages: Vec<PageContext> = docs
            .iter()
            .map(|doc| PageContext::new(doc, self.tz, false))
            .collect();

        let mut ctx = self.base_context();
        ctx.insert("pages", &pages);
        self.engine.render("index.html", &ctx)
    }

    fn base_context(&self) -> tera::Context {
        let mut ctx = tera::Context::new();
        ctx.insert("site", &SiteContext::from_config(self.config));
        ctx.insert("extra", &self.config.extra);

        let feed_url = self
            .config
            .build
            .rss
            .enable
            .then(|| self.config.paths().url_for_rel_path(&self.config.build.rss.path));
        ctx.insert("feed_url", &feed_url);

        ctx
    }
}
