use super::source::Source;
use crate::catalog::MediaItem;

/// The station channel: a live override plus the Auto VJ rotation with
/// its cursor. Selection is a pure function of the four inputs - flip any
/// of them and `current_source` gives the fresh answer.
#[derive(Debug, Clone)]
pub struct Channel {
    live_enabled: bool,
    live_url: Option<String>,
    rotation: Vec<MediaItem>,
    cursor: usize,
}

impl Channel {
    pub fn new(live_url: Option<String>, rotation: Vec<MediaItem>) -> Self {
        Self {
            live_enabled: false,
            live_url,
            rotation,
            cursor: 0,
        }
    }

    pub fn live_enabled(&self) -> bool {
        self.live_enabled
    }

    pub fn set_live_enabled(&mut self, on: bool) {
        self.live_enabled = on;
    }

    pub fn set_live_url(&mut self, url: Option<String>) {
        self.live_url = url;
    }

    /// Swap the rotation (the library changed). The cursor is left alone -
    /// the modulo in selection keeps it in range.
    pub fn set_rotation(&mut self, rotation: Vec<MediaItem>) {
        self.rotation = rotation;
    }

    pub fn rotation(&self) -> &[MediaItem] {
        &self.rotation
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pick what the player should show right now. Live wins when it is
    /// switched on and has a URL; otherwise the rotation item under the
    /// cursor; otherwise nothing, and the player stays idle.
    pub fn current_source(&self) -> Option<Source> {
        if self.live_enabled {
            if let Some(url) = &self.live_url {
                return Some(Source::Live { url: url.clone() });
            }
        }

        if self.rotation.is_empty() {
            return None;
        }
        let item = &self.rotation[self.cursor % self.rotation.len()];
        Some(Source::Auto {
            url: item.url.clone(),
            title: item.title.clone(),
        })
    }

    /// The rotation item selection would use right now, when in auto mode.
    pub fn current_item(&self) -> Option<&MediaItem> {
        match self.current_source() {
            Some(Source::Auto { .. }) => self.rotation.get(self.cursor % self.rotation.len()),
            _ => None,
        }
    }

    /// Playback-completion signal. Only an auto source advances the
    /// cursor; a live stream continues or stops on its own terms. Returns
    /// whether the cursor moved.
    pub fn handle_ended(&mut self) -> bool {
        let in_auto = matches!(self.current_source(), Some(Source::Auto { .. }));
        if in_auto && !self.rotation.is_empty() {
            self.cursor = (self.cursor + 1) % self.rotation.len();
            return true;
        }
        false
    }
}
