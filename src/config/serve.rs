//! `[serve]` section configuration.
//!
//! Settings for the local preview server and its file watcher.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[serve]` section in stanza.toml.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"  # Expose on the LAN
/// port = 8080
/// watch = false          # No rebuild on file changes
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Interface to bind, `127.0.0.1` by default (localhost only).
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// Port to bind (default 4290). Busy ports are retried upward.
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Rebuild the site when content, templates, or config change.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,
}
