use indicatif::ProgressBar;
use wordtable::reader::ProgressFn;

/// Progress display for a vector file read.
pub struct ReadProgress {
    bar: ProgressBar,
}

impl ReadProgress {
    /// A bar when the line count is known, a spinner otherwise.
    pub fn new(
        display: bool,
        expected_lines: Option<usize>,
    ) -> Self {
        let bar = match (display, expected_lines) {
            (false, _) => ProgressBar::hidden(),
            (true, Some(total)) => ProgressBar::new(total as u64),
            (true, None) => ProgressBar::new_spinner(),
        };
        Self { bar }
    }

    /// A callback feeding this display.
    pub fn callback(&self) -> ProgressFn<'static> {
        let bar = self.bar.clone();
        Box::new(move |done, _total| bar.set_position(done as u64))
    }

    /// Remove the display.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
