//! Sequential downloader: stream, tag, then rename into place.
//!
//! Each track is written to `<target>.part` first. Only after the body is
//! complete and the tags are saved is the file renamed to its final name, so a
//! track either exists fully tagged or not at all. Leftover `.part` files are
//! simply overwritten by the next run.

mod tag;
mod transfer;

use std::fs;
use std::io::ErrorKind;

use tracing::{debug, info, warn};

use crate::api::SoundCloudClient;
use crate::error::{Error, Result};
use crate::library::Track;
use crate::progress::Progress;

/// Totals for one run of the downloader.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub downloaded: usize,
    pub failed: usize,
}

pub struct Downloader<'a> {
    client: &'a SoundCloudClient,
    chunk_size: usize,
    progress: Progress,
}

impl<'a> Downloader<'a> {
    pub fn new(client: &'a SoundCloudClient, chunk_size: usize, progress: Progress) -> Self {
        Self {
            client,
            chunk_size,
            progress,
        }
    }

    /// Download `tracks` one after the other.
    ///
    /// A failing track is logged and counted; it never stops the run.
    pub fn run(&self, tracks: &[Track]) -> Summary {
        let mut summary = Summary::default();
        let total = tracks.len();

        for (i, track) in tracks.iter().enumerate() {
            let label = format!("({} / {}) {}", i + 1, total, track.display);
            match self.download(track, &label) {
                Ok(()) => {
                    info!(track = %track.display, "downloaded");
                    summary.downloaded += 1;
                }
                Err(e) => {
                    warn!("Error downloading {}: {e}", track.display);
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    fn download(&self, track: &Track, label: &str) -> Result<()> {
        let stream_url = track.record.stream_url.as_deref().ok_or(Error::NoStream)?;

        // Nothing touches the disk until the stream is open.
        let response = self.client.open_stream(stream_url)?;

        let part = track.part_path();
        let result: Result<()> = (|| {
            let expected = response.content_length();
            let bar = self.progress.transfer(expected, label);
            let written = transfer::copy_to_file(response, expected, &part, self.chunk_size, &bar);
            bar.finish_and_clear();
            let written = written?;
            debug!(track = %track.display, bytes = written, "body saved");

            tag::write_tags(&part, &track.record)?;
            fs::rename(&part, &track.path)?;
            Ok(())
        })();

        if result.is_err() {
            if let Err(e) = fs::remove_file(&part) {
                if e.kind() != ErrorKind::NotFound {
                    debug!(path = %part.display(), "could not remove partial file: {e}");
                }
            }
        }

        result
    }
}
