//! Front matter extraction and deserialization.
//!
//! Every content file starts with a TOML block delimited by `+++` lines:
//!
//! ```markdown
//! +++
//! title = "Hello"
//! date = 2021-04-10T13:17:49+12:00
//! +++
//!
//! Body text.
//! ```

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::PathBuf;

/// Front matter delimiter line.
pub const FENCE: &str = "+++";

/// Raw page metadata parsed from the TOML block.
///
/// Unknown keys land in `extra` and are exposed to templates untouched.
/// Content is user-authored, so unlike site config it is not rejected
/// for carrying keys this tool does not know about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontMatter {
    pub title: Option<String>,

    /// Publication timestamp. TOML datetimes and quoted strings are both
    /// accepted; either way the value is parsed downstream.
    #[serde(default, deserialize_with = "date_as_string")]
    pub date: Option<String>,

    #[serde(default)]
    pub draft: bool,

    /// Explicit output path, overriding the path derived from the filename.
    pub url: Option<PathBuf>,

    pub summary: Option<String>,

    pub author: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, toml::Value>,
}

/// Accept `date` as either a bare TOML datetime or a quoted string.
///
/// TOML datetimes display in RFC 3339 form, so both branches hand the
/// same shape to the date parser.
fn date_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DateField {
        Datetime(toml::value::Datetime),
        Text(String),
    }

    let field = Option::<DateField>::deserialize(deserializer)?;
    Ok(field.map(|f| match f {
        DateField::Datetime(dt) => dt.to_string(),
        DateField::Text(s) => s,
    }))
}

/// Split a source file into its front matter TOML and markdown body.
///
/// The first non-empty line must be the opening fence. Returns `None`
/// when the file has no front matter block at all.
pub fn split(source: &str) -> Option<(&str, &str)> {
    let trimmed = source.trim_start_matches(['\u{feff}']);
    let rest = trimmed.trim_start();

    let after_open = rest.strip_prefix(FENCE)?;
    // The fence must be a whole line, not a prefix of one
    let after_open = after_open.strip_prefix('\n').or_else(|| {
        after_open
            .strip_prefix("\r\n")
            .or_else(|| after_open.strip_prefix('\r'))
    })?;

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let front = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Some((front, body));
        }
        offset += line.len();
    }

    None
}
