//! Site initialization.
//!
//! Creates a new site skeleton with a default configuration, a sample
//! post, and the built-in templates written out for customization.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Default config filename
const CONFIG_FILE: &str = "stanza.toml";

/// Default site directory structure
const SITE_DIRS: &[&str] = &[
    "content",
    "assets/images",
    "assets/styles",
    "templates",
];

const SAMPLE_POST: &str = r#"+++
title = "Hello, world"
date = 2024-01-01T12:00:00+00:00
draft = true
+++

Welcome to your new site. This post is a draft, so `stanza build` skips
it until you remove the `draft` key or pass `--drafts`.

<!--more-->

Everything above the break marker becomes the post summary on the index
page and in the feed.
"#;

const TEMPLATE_FILES: &[(&str, &str)] = &[
    ("base.html", include_str!("embed/templates/base.html")),
    ("index.html", include_str!("embed/templates/index.html")),
    ("page.html", include_str!("embed/templates/page.html")),
];

/// Create a new site with default structure
pub fn new_site(config: &'static SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // If no name was provided (init in current dir), the directory
    // must be completely empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `stanza init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(root)?;
    init_sample_content(root)?;
    init_templates(root)?;
    init_ignored_files(root, &["public", "publish"])?;

    log!("init"; "site created at {}", root.display());
    log!("init"; "next: cd in and run `stanza serve`");

    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `stanza init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write a sample draft post so the first build has something to chew on.
fn init_sample_content(root: &Path) -> Result<()> {
    fs::write(root.join("content/hello-world.md"), SAMPLE_POST)?;
    Ok(())
}

/// Write the built-in templates into the site's templates directory,
/// ready to edit. Deleting them falls back to the embedded copies.
fn init_templates(root: &Path) -> Result<()> {
    for (name, content) in TEMPLATE_FILES {
        fs::write(root.join("templates").join(name), content)?;
    }
    Ok(())
}

/// Initialize .gitignore and .ignore files with specified paths
fn init_ignored_files(root: &Path, patterns: &[&str]) -> Result<()> {
    let content = patterns.join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}
