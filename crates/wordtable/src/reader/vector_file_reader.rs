//! # Vector File Reader

use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::{Path, PathBuf},
};

use crate::errors::{WTResult, WordtableError};

/// Progress callback, receiving ``(items_processed, items_total)``.
///
/// ``items_total`` is the caller's expected line count, if any; it is
/// informational only.
pub type ProgressFn<'a> = Box<dyn FnMut(usize, Option<usize>) + 'a>;

/// A raw body line of a vector file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// The 1-based line number in the source; the header is line 1.
    pub line: usize,

    /// The line text, without the line terminator.
    pub text: String,
}

/// Opens vector files and streams their body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorFileReader {
    path: PathBuf,
    expected_lines: Option<usize>,
}

impl VectorFileReader {
    /// Create a reader for the file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            expected_lines: None,
        }
    }

    /// The source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The expected number of body lines, used for progress display only.
    pub fn expected_lines(&self) -> Option<usize> {
        self.expected_lines
    }

    /// Sets the expected number of body lines.
    pub fn with_expected_lines(
        mut self,
        expected_lines: Option<usize>,
    ) -> Self {
        self.expected_lines = expected_lines;
        self
    }

    /// Open the file and discard its header.
    ///
    /// The returned stream owns the file handle; it is released when the
    /// stream is dropped, whether or not it was fully consumed.
    ///
    /// A completely empty file has no header and no body; it yields no lines
    /// and logs a warning, so it builds an empty vocabulary like a header-only file.
    pub fn open(&self) -> WTResult<VectorLines<'static, BufReader<File>>> {
        let file = File::open(&self.path).map_err(|e| WordtableError::file(&self.path, e))?;
        log::info!("Reading vector file: {}", self.path.display());

        VectorLines::start(BufReader::new(file), Some(self.path.clone()))
            .map(|lines| lines.with_expected_lines(self.expected_lines))
    }

    /// Open the file, reporting progress through `progress`.
    pub fn open_with_progress<'a>(
        &self,
        progress: ProgressFn<'a>,
    ) -> WTResult<VectorLines<'a, BufReader<File>>> {
        Ok(self.open()?.with_progress(progress))
    }
}

/// A lazy stream of [`RawLine`]s following a vector file header.
///
/// Restarting requires reopening the source.
pub struct VectorLines<'a, R: BufRead> {
    lines: Lines<R>,
    path: Option<PathBuf>,
    line: usize,
    processed: usize,
    expected_lines: Option<usize>,
    progress: Option<ProgressFn<'a>>,
    done: bool,
}

impl<R: BufRead> VectorLines<'static, R> {
    /// Stream the body lines of an already-open source, discarding its header.
    pub fn from_reader(reader: R) -> WTResult<Self> {
        Self::start(reader, None)
    }

    fn start(
        reader: R,
        path: Option<PathBuf>,
    ) -> WTResult<Self> {
        let mut lines = reader.lines();
        let mut line = 0;

        match lines.next() {
            Some(Ok(header)) => {
                line = 1;
                log::debug!("Discarding header: {header:?}");
            }
            Some(Err(e)) => return Err(Self::wrap_error(&path, e)),
            None => log::warn!("Vector source has no header line"),
        }

        Ok(Self {
            lines,
            path,
            line,
            processed: 0,
            expected_lines: None,
            progress: None,
            done: false,
        })
    }
}

impl<'a, R: BufRead> VectorLines<'a, R> {
    /// Sets the expected number of body lines.
    pub fn with_expected_lines(
        mut self,
        expected_lines: Option<usize>,
    ) -> Self {
        self.expected_lines = expected_lines;
        self
    }

    /// Attach a progress callback.
    pub fn with_progress<'b>(
        self,
        progress: ProgressFn<'b>,
    ) -> VectorLines<'b, R> {
        VectorLines {
            lines: self.lines,
            path: self.path,
            line: self.line,
            processed: self.processed,
            expected_lines: self.expected_lines,
            progress: Some(progress),
            done: self.done,
        }
    }

    /// The number of body lines yielded so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    fn wrap_error(
        path: &Option<PathBuf>,
        err: std::io::Error,
    ) -> WordtableError {
        match path {
            Some(path) => WordtableError::file(path, err),
            None => WordtableError::Io(err),
        }
    }

    fn finish(&mut self) {
        self.done = true;
        if let Some(expected) = self.expected_lines
            && expected != self.processed
        {
            log::warn!(
                "Expected {expected} vector lines, read {}",
                self.processed
            );
        }
    }
}

impl<R: BufRead> Iterator for VectorLines<'_, R> {
    type Item = WTResult<RawLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.lines.next() {
            None => {
                self.finish();
                None
            }
            Some(Err(e)) => {
                self.done = true;
                Some(Err(Self::wrap_error(&self.path, e)))
            }
            Some(Ok(text)) => {
                self.line += 1;
                self.processed += 1;
                if let Some(progress) = self.progress.as_mut() {
                    progress(self.processed, self.expected_lines);
                }
                Some(Ok(RawLine {
                    line: self.line,
                    text,
                }))
            }
        }
    }
}
