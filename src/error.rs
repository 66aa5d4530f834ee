use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum LyricError {
    /// The timestamp field of an LRC line did not hold a usable number.
    MalformedTimestamp { line: usize, field: String },
    InvalidSpeed(f64),
}

impl Error for LyricError {}

impl fmt::Display for LyricError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LyricError::MalformedTimestamp { line, field } => {
                write!(fmt, "line {}: malformed timestamp '{}'", line, field)
            }
            LyricError::InvalidSpeed(speed) => write!(
                fmt,
                "invalid playback speed {}: must be a positive, finite number",
                speed
            ),
        }
    }
}

/// The result of an operation that keeps whatever it managed to produce
/// when it fails part way through.
///
/// Reading stops at the first I/O error, but the entries read up to that
/// point are still handed back alongside the error.
#[derive(Debug)]
pub struct Outcome<T> {
    value: T,
    failure: Option<anyhow::Error>,
}

impl<T> Outcome<T> {
    pub(crate) fn complete(value: T) -> Self {
        Self {
            value,
            failure: None,
        }
    }

    pub(crate) fn partial(value: T, failure: anyhow::Error) -> Self {
        Self {
            value,
            failure: Some(failure),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn failure(&self) -> Option<&anyhow::Error> {
        self.failure.as_ref()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Option<anyhow::Error>) {
        (self.value, self.failure)
    }

    /// Discards the partial value if the operation did not complete.
    pub fn into_result(self) -> anyhow::Result<T> {
        match self.failure {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }
}
