//! Scoped output capture.
//!
//! Operations under test write to an injected sink instead of the process
//! stdout, so capture needs no global redirection and concurrent captures
//! do not interfere.

use std::fmt;
use std::io::Write;

/// Text written during one capture scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    text: String,
}

impl CapturedOutput {
    fn from_bytes(bytes: Vec<u8>) -> Self {
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Self { text }
    }

    /// The captured text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Take ownership of the captured text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for CapturedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for CapturedOutput {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Run `f` with an in-memory sink and return its result with what it wrote.
///
/// ```
/// use std::io::Write;
///
/// let (n, out) = claw_testkit::capture(|w| {
///     writeln!(w, "hello").unwrap();
///     1
/// });
/// assert_eq!(n, 1);
/// assert_eq!(out.as_str(), "hello\n");
/// ```
pub fn capture<T>(f: impl FnOnce(&mut dyn Write) -> T) -> (T, CapturedOutput) {
    let mut buffer = Vec::new();
    let value = f(&mut buffer);
    (value, CapturedOutput::from_bytes(buffer))
}

/// A failed [`try_capture`], with the output written before the failure.
#[derive(Debug)]
pub struct CaptureFailure<E> {
    /// The operation's error.
    pub error: E,
    /// Output written before the error.
    pub output: CapturedOutput,
}

impl<E: fmt::Display> fmt::Display for CaptureFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if !self.output.is_empty() {
            write!(f, " (captured output: {:?})", self.output.as_str())?;
        }
        Ok(())
    }
}

impl<E: std::error::Error + 'static> std::error::Error for CaptureFailure<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// [`capture`] for fallible operations.
///
/// # Errors
///
/// Returns the operation's error together with the partial output.
pub fn try_capture<T, E>(
    f: impl FnOnce(&mut dyn Write) -> Result<T, E>,
) -> Result<(T, CapturedOutput), CaptureFailure<E>> {
    let (result, output) = capture(f);
    match result {
        Ok(value) => Ok((value, output)),
        Err(error) => Err(CaptureFailure { error, output }),
    }
}
