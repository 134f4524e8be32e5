// Station playback - the adapter between "what should be on air" and the
// single video surface. Mirrors the web player: pick a source, attach the
// right session kind, tolerate an autoplay refusal, tear down on switch.

pub mod channel;
pub mod session;
pub mod source;
pub mod surface;

pub use channel::Channel;
pub use session::HlsSession;
pub use source::{is_hls_url, Source};
pub use surface::{ConsoleSurface, SurfaceError, VideoSurface};

use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    SourceStarted(Source),
    PlaybackPaused,
    PlaybackResumed,
    PlaybackStopped,
    /// The surface refused to start. Swallowed by design - the indicator
    /// just stays on pause.
    AutoplayBlocked(Source),
    SourceEnded(Source),
}

pub struct StationPlayer {
    surface: Box<dyn VideoSurface>,
    session: Option<HlsSession>,
    current: Option<Source>,
    state: PlaybackState,
    event_sender: Option<mpsc::UnboundedSender<PlayerEvent>>,
}

impl StationPlayer {
    pub fn new(surface: Box<dyn VideoSurface>) -> Self {
        Self {
            surface,
            session: None,
            current: None,
            state: PlaybackState::Stopped,
            event_sender: None,
        }
    }

    pub fn set_event_sender(&mut self, sender: mpsc::UnboundedSender<PlayerEvent>) {
        self.event_sender = Some(sender);
    }

    /// Put a source on air, or go idle with `None`. The previous adaptive
    /// session is always dropped before the surface is touched again, so
    /// exactly one session exists at any instant.
    pub fn load(&mut self, source: Option<Source>) {
        self.session.take();
        self.surface.clear();

        let Some(source) = source else {
            if self.current.take().is_some() {
                info!("channel idle, nothing to show");
            }
            self.state = PlaybackState::Stopped;
            self.send(PlayerEvent::PlaybackStopped);
            return;
        };

        if is_hls_url(source.url()) {
            self.session = Some(HlsSession::attach(self.surface.as_mut(), source.url()));
        } else {
            // plain file: point the surface at it directly
            self.surface.set_source(source.url());
        }

        match self.surface.play() {
            Ok(()) => {
                self.state = PlaybackState::Playing;
                info!("now playing: {}", source.url());
                self.send(PlayerEvent::SourceStarted(source.clone()));
            }
            Err(e) => {
                // not an error path: no retry, no dialog, just paused
                warn!("playback start rejected: {}", e);
                self.state = PlaybackState::Paused;
                self.send(PlayerEvent::AutoplayBlocked(source.clone()));
            }
        }

        self.current = Some(source);
    }

    pub fn toggle_play_pause(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.resume(),
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.surface.pause();
            self.state = PlaybackState::Paused;
            self.send(PlayerEvent::PlaybackPaused);
        }
    }

    pub fn resume(&mut self) {
        if self.current.is_none() {
            return;
        }
        match self.surface.play() {
            Ok(()) => {
                self.state = PlaybackState::Playing;
                self.send(PlayerEvent::PlaybackResumed);
            }
            Err(e) => {
                warn!("playback start rejected: {}", e);
                self.state = PlaybackState::Paused;
            }
        }
    }

    pub fn stop(&mut self) {
        self.session.take();
        self.surface.clear();
        self.current = None;
        self.state = PlaybackState::Stopped;
        self.send(PlayerEvent::PlaybackStopped);
    }

    /// The surface finished the current item. The continuation decision
    /// belongs to the channel; the player only reports what ended.
    pub fn notify_ended(&mut self) -> Option<Source> {
        let ended = self.current.clone()?;
        self.state = PlaybackState::Stopped;
        self.send(PlayerEvent::SourceEnded(ended.clone()));
        Some(ended)
    }

    pub fn state(&self) -> PlaybackState {
        self.state.clone()
    }

    pub fn current_source(&self) -> Option<&Source> {
        self.current.as_ref()
    }

    /// URL of the active adaptive session, when the current source is a
    /// manifest.
    pub fn session_url(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.url())
    }

    fn send(&self, event: PlayerEvent) {
        if let Some(sender) = &self.event_sender {
            let _ = sender.send(event);
        }
    }
}

impl Drop for StationPlayer {
    fn drop(&mut self) {
        self.session.take();
        self.surface.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingSurface {
        calls: Arc<Mutex<Vec<String>>>,
        reject_play: bool,
    }

    impl RecordingSurface {
        fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            let surface = Self { calls: calls.clone(), reject_play: false };
            (surface, calls)
        }

        fn rejecting() -> Self {
            Self { calls: Arc::default(), reject_play: true }
        }
    }

    impl VideoSurface for RecordingSurface {
        fn set_source(&mut self, url: &str) {
            self.calls.lock().unwrap().push(format!("set:{}", url));
        }

        fn play(&mut self) -> Result<(), SurfaceError> {
            self.calls.lock().unwrap().push("play".to_string());
            if self.reject_play {
                Err(SurfaceError::StartRejected)
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.calls.lock().unwrap().push("pause".to_string());
        }

        fn clear(&mut self) {
            self.calls.lock().unwrap().push("clear".to_string());
        }
    }

    fn live(url: &str) -> Source {
        Source::Live { url: url.to_string() }
    }

    fn auto(url: &str, title: &str) -> Source {
        Source::Auto { url: url.to_string(), title: title.to_string() }
    }

    #[test]
    fn manifest_urls_get_an_adaptive_session() {
        let (surface, _) = RecordingSurface::new();
        let mut player = StationPlayer::new(Box::new(surface));

        player.load(Some(live("https://x/live.m3u8")));
        assert_eq!(player.session_url(), Some("https://x/live.m3u8"));
        assert_eq!(player.state(), PlaybackState::Playing);
    }

    #[test]
    fn plain_files_attach_without_a_session() {
        let (surface, calls) = RecordingSurface::new();
        let mut player = StationPlayer::new(Box::new(surface));

        player.load(Some(auto("https://x/clip.mp4", "Clipe")));
        assert_eq!(player.session_url(), None);
        assert_eq!(player.state(), PlaybackState::Playing);
        assert_eq!(
            calls.lock().unwrap().as_slice(),
            ["clear", "set:https://x/clip.mp4", "play"]
        );
    }

    #[test]
    fn switching_sources_detaches_before_reattaching() {
        let (surface, calls) = RecordingSurface::new();
        let mut player = StationPlayer::new(Box::new(surface));

        player.load(Some(live("https://x/live.m3u8")));
        player.load(Some(auto("https://x/clip.mp4", "Clipe")));

        assert_eq!(player.session_url(), None);
        let log = calls.lock().unwrap();
        let second_clear = log.iter().filter(|c| *c == "clear").count();
        assert_eq!(second_clear, 2);
        // the surface is cleared again before the new source goes in
        let clip_pos = log.iter().position(|c| c == "set:https://x/clip.mp4").unwrap();
        assert_eq!(log[clip_pos - 1], "clear");
    }

    #[test]
    fn autoplay_rejection_is_swallowed_and_leaves_pause() {
        let mut player = StationPlayer::new(Box::new(RecordingSurface::rejecting()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        player.set_event_sender(tx);

        player.load(Some(auto("https://x/clip.mp4", "Clipe")));

        assert_eq!(player.state(), PlaybackState::Paused);
        assert!(matches!(rx.try_recv(), Ok(PlayerEvent::AutoplayBlocked(_))));
        // the source is still considered current, ready for a manual play
        assert!(player.current_source().is_some());
    }

    #[test]
    fn loading_nothing_goes_idle() {
        let (surface, _) = RecordingSurface::new();
        let mut player = StationPlayer::new(Box::new(surface));

        player.load(Some(live("https://x/live.m3u8")));
        player.load(None);

        assert_eq!(player.state(), PlaybackState::Stopped);
        assert_eq!(player.current_source(), None);
        assert_eq!(player.session_url(), None);
    }

    #[test]
    fn pause_and_resume_move_the_state() {
        let (surface, _) = RecordingSurface::new();
        let mut player = StationPlayer::new(Box::new(surface));

        player.load(Some(auto("https://x/clip.mp4", "Clipe")));
        player.toggle_play_pause();
        assert_eq!(player.state(), PlaybackState::Paused);
        player.toggle_play_pause();
        assert_eq!(player.state(), PlaybackState::Playing);
    }

    #[test]
    fn ended_reports_the_source_that_finished() {
        let (surface, _) = RecordingSurface::new();
        let mut player = StationPlayer::new(Box::new(surface));
        let (tx, mut rx) = mpsc::unbounded_channel();
        player.set_event_sender(tx);

        player.load(Some(auto("https://x/clip.mp4", "Clipe")));
        let _ = rx.try_recv(); // SourceStarted

        let ended = player.notify_ended();
        assert_eq!(ended, Some(auto("https://x/clip.mp4", "Clipe")));
        assert!(matches!(rx.try_recv(), Ok(PlayerEvent::SourceEnded(_))));
        assert_eq!(player.state(), PlaybackState::Stopped);
    }
}
