use std::path::Path;

use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::Tag;

use crate::api::TrackRecord;
use crate::error::{Error, Result};

/// Write title, artist and genre into the audio file at `path`.
///
/// The format is detected from the content, not the extension, because the
/// file still carries its `.part` suffix at this point. An existing primary
/// tag is updated; a file without one gets a new tag of the primary type
/// (ID3v2 for MP3).
pub(super) fn write_tags(path: &Path, record: &TrackRecord) -> Result<()> {
    let tagged = Probe::open(path)
        .map_err(Error::tag(path))?
        .guess_file_type()?
        .read()
        .map_err(Error::tag(path))?;

    let tag_type = tagged.primary_tag_type();
    let mut tag = tagged
        .primary_tag()
        .cloned()
        .unwrap_or_else(|| Tag::new(tag_type));

    tag.set_title(record.title.clone());
    tag.set_artist(record.artist().to_string());
    if !record.genre().is_empty() {
        tag.set_genre(record.genre().to_string());
    }

    tag.save_to_path(path, WriteOptions::default())
        .map_err(Error::tag(path))
}
