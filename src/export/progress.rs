//! Progress tracking for collection reads
//!
//! Shows a spinner on stderr with the number of documents read so far and
//! the read speed. The spinner is cleared before the result line is printed.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress tracker for one collection
pub struct ProgressTracker {
    /// Start time of the read
    start_time: Instant,
    /// Spinner (optional, can be disabled)
    bar: Option<ProgressBar>,
}

impl ProgressTracker {
    /// Create a new progress tracker
    ///
    /// # Arguments
    /// * `collection` - Collection id shown next to the spinner
    /// * `enable_bar` - Whether to display the spinner
    ///
    /// # Returns
    /// * `Self` - New progress tracker instance
    pub fn new(collection: &str, enable_bar: bool) -> Self {
        let bar = enable_bar.then(|| {
            let bar = ProgressBar::new_spinner();
            let style = ProgressStyle::default_spinner()
                .template("{spinner:.green} {prefix} {pos} documents {msg}");
            if let Ok(style) = style {
                bar.set_style(style);
            }
            bar.set_prefix(collection.to_string());
            bar
        });

        Self {
            start_time: Instant::now(),
            bar,
        }
    }

    /// Update progress with new count
    ///
    /// # Arguments
    /// * `count` - Total number of documents read so far
    pub fn update(&self, count: u64) {
        if let Some(ref bar) = self.bar {
            bar.set_position(count);

            let elapsed = self.start_time.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                let speed = count as f64 / elapsed;
                bar.set_message(format!("({:.0} docs/sec)", speed));
            }
        }
    }

    /// Finish and clear the spinner
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
