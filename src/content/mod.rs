//! Content collection: walk the content directory, parse front matter,
//! validate metadata, filter drafts.
//!
//! Collection is fail-fast. The first malformed document aborts the walk
//! with an error naming the file, before any output has been touched.

mod document;
mod front_matter;

pub use document::{Document, PagePaths, SUMMARY_BREAK};
pub use front_matter::FrontMatter;

use crate::config::SiteConfig;
use crate::log;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while collecting content. Every variant names the file.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}`: missing front matter (expected a `+++` delimited block)")]
    MissingFrontMatter(PathBuf),

    #[error("`{0}`: malformed front matter")]
    FrontMatter(PathBuf, #[source] toml::de::Error),

    #[error("`{0}`: missing required field `{1}`")]
    MissingField(PathBuf, &'static str),

    #[error("`{0}`: unparseable date `{1}`")]
    Date(PathBuf, String),

    #[error("`{0}` is outside the content directory")]
    OutsideContentDir(PathBuf),
}

/// Everything found under the content directory.
#[derive(Debug)]
pub struct ContentSet {
    /// Validated pages, sorted by date descending (source path breaks ties).
    pub documents: Vec<Document>,

    /// Non-markdown files, copied to the output verbatim.
    pub assets: Vec<PathBuf>,
}

impl ContentSet {
    /// True when the site root is authored by hand (a `content/index.md`),
    /// which replaces the generated listing page.
    pub fn has_root_index(&self, config: &SiteConfig) -> bool {
        let root_index = config.paths().output_dir().join("index.html");
        self.documents.iter().any(|doc| doc.paths.html == root_index)
    }
}

/// Walk the content directory and validate every markdown file.
///
/// The walk order is stable (sorted by file name), so a broken file is
/// always reported deterministically. A missing content directory is not
/// an error, just an empty site.
pub fn collect(config: &'static SiteConfig) -> Result<ContentSet, ContentError> {
    let content_dir = &config.build.content;

    if !content_dir.exists() {
        log!(
            "build";
            "Content directory `{}` does not exist, building an empty site",
            content_dir.display()
        );
        return Ok(ContentSet {
            documents: Vec::new(),
            assets: Vec::new(),
        });
    }

    let mut documents = Vec::new();
    let mut assets = Vec::new();
    let mut skipped_drafts = 0usize;

    for entry in WalkDir::new(content_dir).sort_by_file_name() {
        // A directory we cannot read means pages we cannot validate
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| content_dir.clone());
            ContentError::Io(path, e.into())
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || is_hidden(path) {
            continue;
        }

        if path.extension().is_some_and(|ext| ext == "md") {
            match Document::from_file(path, config)? {
                Some(doc) => documents.push(doc),
                None => skipped_drafts += 1,
            }
        } else {
            assets.push(path.to_path_buf());
        }
    }

    if skipped_drafts > 0 {
        log!("build"; "Skipped {skipped_drafts} draft(s)");
    }

    // Newest first; source path keeps equal dates deterministic
    documents.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| a.paths.source.cmp(&b.paths.source))
    });

    Ok(ContentSet { documents, assets })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
