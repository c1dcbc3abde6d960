use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress bar over `len` companies; hidden unless `tui` is set.
pub fn progress(len: usize, tui: bool) -> anyhow::Result<ProgressBar> {
    if !tui {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(len as u64).with_style(
        ProgressStyle::default_bar()
            .template(
                "{msg} {spinner:.magenta}\n\
                [{elapsed_precise:.magenta}] |{bar:40.cyan/blue}| {human_pos}/{human_len} \
                [Rate: {per_sec:.magenta}, ETA: {eta:.blue}]",
            )?
            .progress_chars("##-"),
    );
    pb.set_message("collecting companies ...");
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Section header printed above a progress bar.
pub fn banner(name: &str) -> String {
    format!("{bar}\n{name:^40}\n{bar}", bar = "=".repeat(40))
}
