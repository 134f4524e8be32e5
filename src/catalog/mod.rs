// Station catalog - everything the admin panel edits
// Flat registries over persisted slots; small lists, direct replacement

pub mod media;
pub mod registry;
pub mod schedule;
pub mod sponsor;

pub use media::{CommercialItem, MediaCategory, MediaDraft, MediaItem};
pub use registry::{CatalogEntry, Registry};
pub use schedule::{ScheduleDraft, ScheduleEntry};
pub use sponsor::{Sponsor, SponsorDraft};

use thiserror::Error;

/// Rejected form input. Every create/edit form goes through a typed draft
/// that validates at the boundary instead of trusting free-form payloads.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("url must not be empty")]
    EmptyUrl,
    #[error("name must not be empty")]
    EmptyName,
    #[error("message must not be empty")]
    EmptyMessage,
    #[error("invalid time '{0}', expected HH:MM")]
    BadTime(String),
}
