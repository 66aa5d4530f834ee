use crate::error::LyricError;

use std::fmt;
use std::iter::FromIterator;
use std::slice;

/// A single line of lyrics, shown `timestamp` seconds into the track.
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    timestamp: f64,
    text: String,
}

impl LyricLine {
    /// Negative and NaN timestamps are clamped to zero.
    pub fn new<S: Into<String>>(timestamp: f64, text: S) -> Self {
        Self {
            timestamp: timestamp.max(0.0),
            text: text.into(),
        }
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for LyricLine {
    fn default() -> Self {
        Self::new(0.0, "<no data>")
    }
}

impl fmt::Display for LyricLine {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{:.2} {}", self.timestamp, self.text)
    }
}

/// All lines of one song, in file order.
///
/// Lines are never reordered: the line at index `i` is always the `i`-th
/// line that was parsed or pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricTrack {
    lines: Vec<LyricLine>,
}

impl LyricTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: LyricLine) {
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn iter(&self) -> slice::Iter<'_, LyricLine> {
        self.lines.iter()
    }

    pub fn into_lines(self) -> Vec<LyricLine> {
        self.lines
    }

    /// Retimes the track for playback at `speed` times the original rate.
    ///
    /// A speed of 2.0 halves every timestamp. The track is left untouched
    /// unless `speed` is positive and finite.
    pub fn change_speed(&mut self, speed: f64) -> Result<(), LyricError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(LyricError::InvalidSpeed(speed));
        }
        for line in &mut self.lines {
            line.timestamp /= speed;
        }
        Ok(())
    }
}

impl FromIterator<LyricLine> for LyricTrack {
    fn from_iter<I: IntoIterator<Item = LyricLine>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LyricTrack {
    type Item = &'a LyricLine;
    type IntoIter = slice::Iter<'a, LyricLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl fmt::Display for LyricTrack {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for line in &self.lines {
            writeln!(fmt, "{}", line)?;
        }
        Ok(())
    }
}
