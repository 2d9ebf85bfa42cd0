//! Template loading and lookup.
//!
//! Three templates are built in: `base.html`, `index.html`, `page.html`.
//! A site can override any of them by placing a file with the same name
//! in its templates directory. Extra templates found there are loaded
//! too, addressable from a page's `template` front matter key.

use crate::config::SiteConfig;
use anyhow::{Context, Result};
use tera::Tera;
use walkdir::WalkDir;

const BASE_TEMPLATE: &str = include_str!("../embed/templates/base.html");
const INDEX_TEMPLATE: &str = include_str!("../embed/templates/index.html");
const PAGE_TEMPLATE: &str = include_str!("../embed/templates/page.html");

const BUILTIN: &[(&str, &str)] = &[
    ("base.html", BASE_TEMPLATE),
    ("index.html", INDEX_TEMPLATE),
    ("page.html", PAGE_TEMPLATE),
];

/// Tera instance with built-in templates plus site overrides.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Load built-ins, then site templates on top.
    pub fn load(config: &'static SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(BUILTIN.to_vec())
            .context("Failed to load built-in templates")?;

        let templates_dir = &config.build.templates;
        if templates_dir.is_dir() {
            for entry in WalkDir::new(templates_dir)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
            {
                let path = entry.path();
                if path.extension().is_none_or(|ext| ext != "html") {
                    continue;
                }
                let name = path
                    .strip_prefix(templates_dir)?
                    .to_string_lossy()
                    .replace('\\', "/");
                tera.add_template_file(path, Some(&name))
                    .with_context(|| format!("Failed to load template `{}`", path.display()))?;
            }
        }

        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &tera::Context) -> Result<String> {
        self.tera
            .render(name, context)
            .with_context(|| format!("Failed to render template `{name}`"))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config_for(root: &std::path::Path) -> &'static SiteConfig {
        let toml = format!(
            r#"
            [base]
            title = "Test"
            description = "Test blog"

            [build]
            templates = "{root}/templates"
        "#,
            root = root.display()
        );
        Box::leak(Box::new(SiteConfig::from_str(&toml).unwrap()))
    }

    fn site_context(config: &'static SiteConfig) -> tera::Context {
        let mut ctx = tera::Context::new();
        ctx.insert("site", &crate::render::SiteContext::from_config(config));
        ctx.insert("feed_url", &None::<String>);
        ctx
    }

    #[derive(serde::Serialize)]
    struct TestPage {
        title: &'static str,
        date: &'static str,
        datetime: &'static str,
        content: &'static str,
    }

    #[test]
    fn test_builtins_available_without_templates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::load(config_for(tmp.path())).unwrap();

        assert!(engine.has_template("base.html"));
        assert!(engine.has_template("index.html"));
        assert!(engine.has_template("page.html"));
    }

    #[test]
    fn test_site_template_overrides_builtin() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path());
        let dir = tmp.path().join("templates");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("page.html"), "custom: {{ page.title }}").unwrap();

        let engine = TemplateEngine::load(config).unwrap();
        let mut ctx = site_context(config);
        ctx.insert(
            "page",
            &TestPage {
                title: "Hi",
                date: "",
                datetime: "",
                content: "",
            },
        );

        let out = engine.render("page.html", &ctx).unwrap();
        assert_eq!(out, "custom: Hi");
    }

    #[test]
    fn test_extra_site_template_is_loaded() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path());
        let dir = tmp.path().join("templates");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("gallery.html"), "gallery").unwrap();

        let engine = TemplateEngine::load(config).unwrap();
        assert!(engine.has_template("gallery.html"));
    }

    #[test]
    fn test_builtin_page_renders() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(tmp.path());
        let engine = TemplateEngine::load(config).unwrap();

        let mut ctx = site_context(config);
        ctx.insert(
            "page",
            &TestPage {
                title: "Hello",
                date: "2021-04-10 13:17:49 +12:00",
                datetime: "2021-04-10T13:17:49+12:00",
                content: "<p>body</p>",
            },
        );

        let out = engine.render("page.html", &ctx).unwrap();
        assert!(out.contains("<h1>Hello</h1>"));
        assert!(out.contains("<p>body</p>"));
        assert!(out.contains("datetime=\"2021-04-10T13:17:49+12:00\""));
    }
}
