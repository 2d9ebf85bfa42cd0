//! Site building orchestration.
//!
//! The pipeline is strictly sequential and fail-fast:
//!
//! ```text
//! build_site()
//!     │
//!     ├── content::collect() ──► parse + validate every page
//!     │     (any metadata error aborts here, output untouched)
//!     │
//!     ├── prepare_output() ────► clear and recreate the output dir
//!     │
//!     ├── render pages ────────► markdown → HTML → template → minify → write
//!     │
//!     ├── copy assets ─────────► asset dir + non-markdown content files
//!     │
//!     └── rss / sitemap
//! ```

use crate::{
    config::SiteConfig,
    content::{self, ContentSet},
    generator::{rss::build_rss, sitemap::build_sitemap},
    log,
    render::Renderer,
    utils::minify::{MinifyType, minify_output},
};
use anyhow::{Context, Result};
use std::{fs, path::Path};
use walkdir::WalkDir;

/// Build the entire site.
///
/// Collection and validation run to completion before the output
/// directory is touched, so a broken document leaves the previous
/// build intact.
pub fn build_site(config: &'static SiteConfig) -> Result<ContentSet> {
    let content = content::collect(config)?;
    log!("build"; "found {} pages", content.documents.len());

    if config.base.timezone.is_none() {
        log!("warn"; "no [base] timezone set, dates keep the offset written in each file");
    }

    let output_dir = config.paths().output_dir();
    prepare_output(&config.build.output, config.build.clean)?;
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let renderer = Renderer::new(config)?;
    let minify = config.build.minify;

    for doc in &content.documents {
        let html = renderer.render_page(doc)?;
        let html = minify_output(html.as_bytes(), MinifyType::Html, minify);
        write_page(&doc.paths.html, &html)?;
    }

    // The listing page is generated unless the site brings its own root index
    if !content.has_root_index(config) {
        let html = renderer.render_index(&content.documents)?;
        let html = minify_output(html.as_bytes(), MinifyType::Html, minify);
        write_page(&output_dir.join("index.html"), &html)?;
    }

    copy_assets(&config.build.assets, &output_dir)?;
    for asset in &content.assets {
        copy_rel_asset(asset, &config.build.content, &output_dir)?;
    }

    build_rss(config, &content.documents)?;
    build_sitemap(config, &content.documents)?;

    log_build_result(&output_dir)?;

    Ok(content)
}

/// Clear the output directory when `clean` is set, then recreate it.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    match (output.exists(), clean) {
        (true, true) => {
            fs::remove_dir_all(output).with_context(|| {
                format!("Failed to clear output directory: {}", output.display())
            })?;
            fs::create_dir_all(output)?;
        }
        (true, false) => {}
        (false, _) => fs::create_dir_all(output)?,
    }
    Ok(())
}

fn write_page(path: &Path, html: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Copy the asset directory into the output, preserving relative paths.
fn copy_assets(assets: &Path, output_dir: &Path) -> Result<()> {
    if !assets.is_dir() {
        return Ok(());
    }

    let mut count = 0usize;
    for entry in WalkDir::new(assets).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to read asset directory {}", assets.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        copy_rel_asset(entry.path(), assets, output_dir)?;
        count += 1;
    }

    if count > 0 {
        log!("assets"; "copied {count} file(s)");
    }
    Ok(())
}

/// Copy one file into the output, keeping its path relative to `base`.
fn copy_rel_asset(path: &Path, base: &Path, output_dir: &Path) -> Result<()> {
    let rel = path
        .strip_prefix(base)
        .with_context(|| format!("{} is not under {}", path.display(), base.display()))?;
    let dest = output_dir.join(rel);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(path, &dest)
        .with_context(|| format!("Failed to copy {} to {}", path.display(), dest.display()))?;
    Ok(())
}

/// Log build result based on output directory contents
fn log_build_result(output_dir: &Path) -> Result<()> {
    let file_count = fs::read_dir(output_dir)?.filter_map(Result::ok).count();

    if file_count == 0 {
        log!("warn"; "output is empty, check if content has .md files");
    } else {
        log!("build"; "done");
    }

    Ok(())
}
