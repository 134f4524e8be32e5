use thiserror::Error;
use tracing::{debug, info};

/// Playback refusals that are tolerated rather than reported: the player
/// swallows them and leaves the indicator on pause.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("playback start rejected by the surface")]
    StartRejected,
    #[error("unsupported media: {0}")]
    Unsupported(String),
}

/// The single video output. Exactly one owner at a time - the station
/// player - so switching sources can never leave two renders running.
pub trait VideoSurface: Send {
    /// Point the surface at a URL. Loading starts here.
    fn set_source(&mut self, url: &str);
    /// Try to start playback. May be refused (autoplay policy, codec).
    fn play(&mut self) -> Result<(), SurfaceError>;
    fn pause(&mut self);
    /// Detach whatever is loaded.
    fn clear(&mut self);
}

/// Demo surface for the terminal build: narrates what a real renderer
/// would do and always accepts playback.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    current: Option<String>,
}

impl VideoSurface for ConsoleSurface {
    fn set_source(&mut self, url: &str) {
        debug!("surface source set to {}", url);
        self.current = Some(url.to_string());
    }

    fn play(&mut self) -> Result<(), SurfaceError> {
        match &self.current {
            Some(url) => {
                info!("surface rolling: {}", url);
                Ok(())
            }
            None => Err(SurfaceError::Unsupported("no source attached".to_string())),
        }
    }

    fn pause(&mut self) {
        debug!("surface paused");
    }

    fn clear(&mut self) {
        if let Some(url) = self.current.take() {
            debug!("surface detached from {}", url);
        }
    }
}
