// Adaptive-streaming session lifecycle. One session per manifest URL;
// the player drops the old session before a new URL is attached, so a
// leaked session across source switches is impossible by construction.

use super::surface::VideoSurface;
use tracing::debug;

pub struct HlsSession {
    url: String,
}

impl HlsSession {
    /// Bind the manifest to the surface and begin loading.
    pub fn attach(surface: &mut dyn VideoSurface, url: &str) -> Self {
        debug!("attaching hls session: {}", url);
        surface.set_source(url);
        Self { url: url.to_string() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for HlsSession {
    fn drop(&mut self) {
        debug!("tearing down hls session: {}", self.url);
    }
}
