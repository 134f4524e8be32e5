// OndaTV Library - Core modules for the web TV station console
// Modular design makes it easy to swap out components

pub mod account;   // mock auth, favorites, notification opt-in
pub mod billing;   // payment gateway placeholder (when needed)
pub mod catalog;   // library, commercials, schedule grid, sponsors
pub mod config;    // settings and preferences
#[cfg(feature = "console")]
pub mod console;   // terminal frontend
pub mod player;    // source selection + playback session lifecycle
pub mod store;     // JSON slot persistence

// Export the stuff other modules actually use
pub use catalog::{MediaCategory, MediaItem, Registry, ScheduleEntry, Sponsor};
pub use config::Config;
pub use player::{Channel, PlaybackState, PlayerEvent, Source, StationPlayer};
pub use store::StateStore;
