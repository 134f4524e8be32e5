use super::{CatalogEntry, ValidationError};
use chrono::NaiveTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One block on the programming grid. Times are wall-clock "HH:MM"
/// strings, same shape the web frontend stores. Whether blocks may
/// overlap is an open product question - nothing here enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    /// Media ids, in air order. Unknown ids are tolerated and rendered raw.
    pub playlist: Vec<String>,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Program,
}

impl CatalogEntry for ScheduleEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

/// Grid form input. Times are checked for shape here; semantic conflicts
/// (overlaps, end before start) are deliberately left alone.
#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    pub title: String,
    pub start: String,
    pub end: String,
    pub playlist: Vec<String>,
}

impl ScheduleDraft {
    pub fn build(self) -> Result<ScheduleEntry, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let start = self.start.trim().to_string();
        if !is_valid_hhmm(&start) {
            return Err(ValidationError::BadTime(start));
        }
        let end = self.end.trim().to_string();
        if !is_valid_hhmm(&end) {
            return Err(ValidationError::BadTime(end));
        }

        Ok(ScheduleEntry {
            id: Uuid::new_v4().to_string(),
            title,
            start,
            end,
            playlist: self.playlist,
            kind: EntryKind::Program,
        })
    }
}

/// Strict zero-padded HH:MM, the shape a time input produces.
pub fn is_valid_hhmm(value: &str) -> bool {
    let Ok(re) = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$") else {
        return false;
    };
    re.is_match(value)
}

/// Parse "HH:MM" into a wall-clock time. Malformed values simply drop out
/// of whatever view asked for them.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    if !is_valid_hhmm(value) {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// The next entries still ahead of `now` today, soonest first.
pub fn upcoming(entries: &[ScheduleEntry], now: NaiveTime, limit: usize) -> Vec<&ScheduleEntry> {
    let mut ahead: Vec<(NaiveTime, &ScheduleEntry)> = entries
        .iter()
        .filter_map(|e| parse_hhmm(&e.start).map(|t| (t, e)))
        .filter(|(t, _)| *t > now)
        .collect();
    ahead.sort_by_key(|(t, _)| *t);
    ahead.into_iter().take(limit).map(|(_, e)| e).collect()
}

/// Row labels for the 24-hour grid view: "00:00" through "23:00".
pub fn grid_hours() -> Vec<String> {
    (0..24).map(|h| format!("{:02}:00", h)).collect()
}

/// The entry whose start matches a grid row, if any.
pub fn entry_at<'a>(entries: &'a [ScheduleEntry], hour: &str) -> Option<&'a ScheduleEntry> {
    entries.iter().find(|e| e.start == hour)
}

/// Seed grid shipped with the demo.
pub fn default_schedule() -> Vec<ScheduleEntry> {
    vec![
        ScheduleEntry {
            id: "s1".to_string(),
            title: "Manhã Musical".to_string(),
            start: "08:00".to_string(),
            end: "10:00".to_string(),
            playlist: vec!["v1".to_string(), "v3".to_string(), "v1".to_string()],
            kind: EntryKind::Program,
        },
        ScheduleEntry {
            id: "s2".to_string(),
            title: "Informativo Local".to_string(),
            start: "12:00".to_string(),
            end: "13:00".to_string(),
            playlist: vec!["v2".to_string(), "v3".to_string()],
            kind: EntryKind::Program,
        },
        ScheduleEntry {
            id: "s3".to_string(),
            title: "Tarde Hits".to_string(),
            start: "16:00".to_string(),
            end: "18:00".to_string(),
            playlist: vec!["v1".to_string(), "v1".to_string(), "v3".to_string()],
            kind: EntryKind::Program,
        },
    ]
}
