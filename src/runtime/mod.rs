use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing::{debug, info};

use crate::archive::{self, Report};
use crate::cli::{CliArgs, normalize_handle};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::progress::Progress;

mod logging;
mod prompt;
mod settings;

pub fn run(args: CliArgs) -> ExitCode {
    let settings = settings::load_settings(args.config.as_deref());
    logging::init(&settings.log.level);

    let result = archive(&args, &settings);
    conclude(
        &result,
        settings.ui.pause_on_exit,
        io::stdin().lock(),
        io::stdout(),
    )
}

fn archive(args: &CliArgs, settings: &Settings) -> Result<Report> {
    let handle = match args.handle() {
        Some(raw) => normalize_handle(raw).ok_or(Error::NoHandle)?,
        None => prompt::ask_handle(io::stdin().lock(), io::stdout())?,
    };

    archive::archive_profile(settings, &handle, Progress::new(settings.ui.progress))
}

/// Report the outcome, then wait for Enter if asked to, so the message is
/// still on screen while the console stays open.
fn conclude<R: BufRead, W: Write>(
    result: &Result<Report>,
    pause_on_exit: bool,
    input: R,
    mut output: W,
) -> ExitCode {
    let code = match result {
        Ok(report) => {
            let _ = writeln!(
                output,
                "Done: {} downloaded, {} failed.",
                report.summary.downloaded, report.summary.failed
            );
            info!(
                handle = %report.profile.handle,
                track_count = report.profile.track_count,
                directory = %report.directory.display(),
                duplicates = report.duplicates,
                excluded = report.excluded,
                eligible = report.eligible,
                "run finished"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(error = ?e, "run failed");
            let _ = writeln!(output, "Error: {e}");
            ExitCode::FAILURE
        }
    };

    if pause_on_exit {
        prompt::pause(input, &mut output);
    }
    code
}
