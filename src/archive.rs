//! One archive run for one profile: resolve, fetch, filter, download.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::api::{Profile, SoundCloudClient};
use crate::config::Settings;
use crate::download::{Downloader, Summary};
use crate::error::{Error, Result};
use crate::library::{self, FilterRules};
use crate::progress::Progress;

/// What happened during a run.
#[derive(Debug)]
pub struct Report {
    pub profile: Profile,
    pub directory: PathBuf,
    pub duplicates: usize,
    pub excluded: usize,
    pub eligible: usize,
    pub summary: Summary,
}

/// Archive every qualifying track of `handle` under `<download.root>/<handle>/`.
///
/// Resolution and catalog errors are returned; per-track download failures
/// are only counted in the report.
pub fn archive_profile(settings: &Settings, handle: &str, progress: Progress) -> Result<Report> {
    let dir_name = library::sanitize(handle);
    if matches!(dir_name.as_str(), "" | "." | "..") {
        return Err(Error::NoHandle);
    }

    let rules = FilterRules::from_settings(&settings.filter)?;
    let client = SoundCloudClient::new(&settings.api)?;

    let profile = client.resolve_profile(handle)?;
    println!("Downloading tracks for {handle}");
    info!(handle, track_count = profile.track_count, "profile resolved");

    let directory = settings.download.root.join(dir_name);
    fs::create_dir_all(&directory)?;

    let records = client.fetch_tracks(&profile, &progress)?;
    let partition = library::partition(records, &directory, &rules);

    println!(
        "{} tracks already downloaded, {} previews skipped, {} tracks to download.",
        partition.duplicates,
        partition.excluded,
        partition.eligible.len()
    );

    let summary = Downloader::new(&client, settings.download.chunk_size, progress)
        .run(&partition.eligible);

    Ok(Report {
        profile,
        directory,
        duplicates: partition.duplicates,
        excluded: partition.excluded,
        eligible: partition.eligible.len(),
        summary,
    })
}
