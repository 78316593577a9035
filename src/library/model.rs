use std::path::PathBuf;

use crate::api::TrackRecord;

/// A catalog entry selected for download, with its on-disk name worked out.
#[derive(Debug, Clone)]
pub struct Track {
    pub record: TrackRecord,
    /// Sanitized title, used for the file name and in console output.
    pub display: String,
    /// Final location: `<dir>/<display>.mp3`.
    pub path: PathBuf,
}

impl Track {
    /// Sibling file the body is streamed into before it is renamed into place.
    pub fn part_path(&self) -> PathBuf {
        let mut p = self.path.clone().into_os_string();
        p.push(".part");
        PathBuf::from(p)
    }
}
