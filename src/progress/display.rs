//! Progress display shared by the export loop and the result sinks.

use crate::progress::StyleOptions;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use tracing::warn;

/// Coordinates the main bar (animations) and the child bars (file downloads).
///
/// The main bar length grows as catalog pages are fetched, since the total
/// number of animations is unknown when the run starts.
pub struct ProgressDisplay {
    multi: MultiProgress,
    main: ProgressBar,
    style_options: StyleOptions,
}

impl ProgressDisplay {
    pub fn new(style_options: StyleOptions) -> Self {
        let multi = match style_options.is_enabled() {
            true => MultiProgress::new(),
            false => MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        };
        let main = style_options.main().to_progress_bar(0);
        let main = match style_options.main().is_enabled() {
            true => multi.add(main),
            false => main,
        };
        main.tick();

        Self {
            multi,
            main,
            style_options,
        }
    }

    /// A display that draws nothing.
    pub fn hidden() -> Self {
        Self::new(StyleOptions::hidden())
    }

    /// Account for `count` more animations to export.
    pub fn add_animations(&self, count: usize) {
        self.main.inc_length(count as u64);
    }

    /// Show the animation being exported.
    pub fn start_animation(&self, label: &str) {
        self.main.set_message(label.to_string());
    }

    /// Mark one animation as processed, whatever its outcome.
    pub fn finish_animation(&self) {
        self.main.inc(1);
    }

    /// Number of animations processed so far.
    pub fn processed(&self) -> u64 {
        self.main.position()
    }

    /// Create a child bar for one file download of `size` bytes.
    pub fn create_child_progress(&self, size: u64) -> ProgressBar {
        let pb = self.style_options.child().to_progress_bar(size);
        match self.style_options.child().is_enabled() {
            true => self.multi.add(pb),
            false => pb,
        }
    }

    /// Finish a child bar, clearing it if configured to.
    pub fn finish_child(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
    }

    /// Stop a child bar whose download failed, leaving it where it stopped.
    pub fn abandon_child(&self, pb: ProgressBar) {
        pb.abandon();
    }

    /// Print a line above the bars without garbling them.
    pub fn println(&self, line: &str) {
        if self.style_options.is_enabled() {
            if let Err(e) = self.multi.println(line) {
                warn!("Failed to print above the progress bars: {}", e);
            }
        }
    }

    /// Finish the main bar.
    pub fn finish(self) {
        self.main.set_message("");
        if self.style_options.main().clear {
            self.main.finish_and_clear();
        } else {
            self.main.finish();
        }
    }
}
