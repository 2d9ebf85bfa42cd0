//! Path and URL resolution with `path_prefix` applied in one place.
//!
//! Pages, assets, and feeds all land under `<output>/<prefix>/` and are
//! addressed as `/<prefix>/...`; the resolver keeps both mappings together
//! so call sites never join the prefix by hand.

use std::path::{Path, PathBuf};

/// Maps between output files and the URLs they are served under.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    /// Output root directory (without path_prefix)
    output: &'a Path,
    /// Path prefix for subdirectory deployment
    prefix: &'a Path,
}

impl<'a> PathResolver<'a> {
    #[inline]
    pub const fn new(output: &'a Path, prefix: &'a Path) -> Self {
        Self { output, prefix }
    }

    /// Directory every rendered file is written under,
    /// `<output>/<prefix>` (or just `<output>` when no prefix is set).
    #[inline]
    pub fn output_dir(&self) -> PathBuf {
        self.output.join(self.prefix)
    }

    /// URL path for a file addressed relative to the output directory.
    ///
    /// `css/app.css` becomes `/blog/css/app.css` under prefix `blog`,
    /// `/css/app.css` without one.
    pub fn url_for_rel_path<P: AsRef<Path>>(&self, rel_path: P) -> String {
        let joined = self.prefix.join(rel_path);
        let path_str = joined.to_string_lossy().replace('\\', "/");
        format!("/{path_str}")
    }

    /// URL path for an absolute file path inside the output root, or
    /// `None` when the path lies outside it.
    pub fn url_for_path(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(self.output).ok()?;
        let path_str = rel.to_string_lossy().replace('\\', "/");
        Some(if path_str.starts_with('/') {
            path_str.to_string()
        } else {
            format!("/{path_str}")
        })
    }
}
