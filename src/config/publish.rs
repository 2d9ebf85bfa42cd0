//! `[publish]` section configuration.
//!
//! Settings for the static-serving artifact produced by `stanza publish`.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[publish]` section in stanza.toml - static artifact settings.
///
/// The publish step copies the build output verbatim into `<dir>/site/`
/// and emits a Dockerfile plus an nginx config serving that directory
/// on a single port with no dynamic routes.
///
/// # Example
/// ```toml
/// [publish]
/// dir = "publish"
/// port = 8080
/// image = "nginx:1.27-alpine"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    /// Directory the artifact is written to, relative to the project root.
    #[serde(default = "defaults::publish::dir")]
    #[educe(Default = defaults::publish::dir())]
    pub dir: PathBuf,

    /// Port the packaged server listens on.
    #[serde(default = "defaults::publish::port")]
    #[educe(Default = defaults::publish::port())]
    pub port: u16,

    /// Base image for the generated Dockerfile.
    #[serde(default = "defaults::publish::image")]
    #[educe(Default = defaults::publish::image())]
    pub image: String,

    /// Overwrite a non-empty publish directory.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub force: bool,
}
