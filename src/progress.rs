//! Progress display support (requires `progress` feature)

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner showing the running copied-file count
#[must_use]
pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{pos} files, {elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
