use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::api::TrackRecord;
use crate::config::FilterSettings;
use crate::error::{Error, Result};

use super::model::Track;
use super::sanitize::sanitize;

const EXTENSION: &str = "mp3";

/// Title and length rules for tracks that are not worth archiving.
#[derive(Debug, Clone)]
pub struct FilterRules {
    skip: Regex,
    min_duration_ms: u64,
}

impl FilterRules {
    pub fn new(skip_pattern: &str, min_duration_ms: u64) -> Result<Self> {
        let skip = RegexBuilder::new(skip_pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::Config(format!("filter.skip_pattern: {e}")))?;
        Ok(Self {
            skip,
            min_duration_ms,
        })
    }

    pub fn from_settings(settings: &FilterSettings) -> Result<Self> {
        Self::new(&settings.skip_pattern, settings.min_duration_ms)
    }

    /// Why `record` should be skipped, if at all.
    pub fn exclusion(&self, record: &TrackRecord) -> Option<Exclusion> {
        if self.skip.is_match(&record.title) {
            Some(Exclusion::TitlePattern)
        } else if record.duration <= self.min_duration_ms {
            Some(Exclusion::TooShort)
        } else {
            None
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exclusion {
    /// Title announces a clip, preview or forthcoming release.
    TitlePattern,
    /// Duration at or under the minimum.
    TooShort,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A file already exists at the target path.
    Duplicate,
    Excluded(Exclusion),
    Eligible,
}

/// Result of sorting a fetched catalog against the destination directory.
#[derive(Debug, Default)]
pub struct Partition {
    pub duplicates: usize,
    pub excluded: usize,
    /// Tracks to download, in catalog order.
    pub eligible: Vec<Track>,
}

/// File name (without extension) a record is stored under.
///
/// Titles that sanitize to nothing fall back to the track id.
pub fn display_name(record: &TrackRecord) -> String {
    let name = sanitize(&record.title);
    if !name.trim().is_empty() {
        return name;
    }
    match record.id {
        Some(id) => format!("track-{id}"),
        None => "untitled".to_string(),
    }
}

/// Where `display` ends up inside `dir`.
pub fn target_path(dir: &Path, display: &str) -> PathBuf {
    dir.join(format!("{display}.{EXTENSION}"))
}

/// Classify one record. The existence check comes first, so a file on disk
/// always counts as a duplicate even when the rules would skip the track.
pub fn classify(record: &TrackRecord, path: &Path, rules: &FilterRules) -> Outcome {
    if path.is_file() {
        return Outcome::Duplicate;
    }
    match rules.exclusion(record) {
        Some(reason) => Outcome::Excluded(reason),
        None => Outcome::Eligible,
    }
}

/// Split `records` into duplicates, excluded tracks and tracks to download.
///
/// Recomputed on every run by looking at `dir`; nothing is persisted.
pub fn partition(records: Vec<TrackRecord>, dir: &Path, rules: &FilterRules) -> Partition {
    let mut out = Partition::default();

    for record in records {
        let display = display_name(&record);
        let path = target_path(dir, &display);

        match classify(&record, &path, rules) {
            Outcome::Duplicate => out.duplicates += 1,
            Outcome::Excluded(reason) => {
                debug!(title = %record.title, ?reason, "skipping track");
                out.excluded += 1;
            }
            Outcome::Eligible => out.eligible.push(Track {
                record,
                display,
                path,
            }),
        }
    }

    out
}
