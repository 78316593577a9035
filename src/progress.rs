//! Console progress bars.
//!
//! Purely cosmetic: when progress is disabled every bar is hidden, so callers
//! never branch on it.

use indicatif::{ProgressBar, ProgressStyle};

const PAGE_TEMPLATE: &str = "Fetching page {pos}/{len} [{bar:30.cyan/blue}]";
const TRANSFER_TEMPLATE: &str =
    "{bytes:>10} {bytes_per_sec:>12} [{bar:30.cyan/blue}] {percent:>3}% {wide_msg}";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {bytes:>10} {bytes_per_sec:>12} {wide_msg}";

#[derive(Debug, Clone, Copy)]
pub struct Progress {
    enabled: bool,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Bar counting catalog pages.
    pub fn pages(&self, total: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(total);
        bar.set_style(style(PAGE_TEMPLATE, ProgressStyle::default_bar).progress_chars("=> "));
        bar
    }

    /// Byte bar for one download. Without a known length a spinner is shown instead.
    pub fn transfer(&self, len: Option<u64>, label: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }
        let bar = match len {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    style(TRANSFER_TEMPLATE, ProgressStyle::default_bar).progress_chars("=> "),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(style(SPINNER_TEMPLATE, ProgressStyle::default_spinner));
                bar
            }
        };
        bar.set_message(label.to_string());
        bar
    }
}

fn style(template: &str, fallback: fn() -> ProgressStyle) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| fallback())
}
