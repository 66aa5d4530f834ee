use crate::error::{LyricError, Outcome};
use crate::lyric::{LyricLine, LyricTrack};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use log::{debug, error, warn};
use nom::bytes::complete::take_till;
use nom::character::complete::char;
use nom::combinator::{all_consuming, map_res, opt, rest};
use nom::error::{convert_error, VerboseError};
use nom::number::complete::recognize_float;
use nom::sequence::preceded;
use nom::{Err, IResult};

/// Reads the LRC file at `path`.
///
/// See [`Parser::parse_reader`] for how failures are reported.
pub fn read_lrc<P: AsRef<Path>>(path: P) -> Outcome<LyricTrack> {
    Parser::new().read_file(path)
}

/// Line-by-line LRC reader.
///
/// Lines whose timestamp cannot be read are dropped; the parser remembers
/// them so callers can report them afterwards.
#[derive(Debug, Default)]
pub struct Parser {
    rejected: Vec<LyricError>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines dropped so far because of a malformed timestamp.
    pub fn rejected(&self) -> &[LyricError] {
        &self.rejected
    }

    pub fn parse(&mut self, input: &str) -> LyricTrack {
        let mut track = LyricTrack::new();
        for (idx, line) in input.lines().enumerate() {
            self.push_line(&mut track, idx + 1, line);
        }
        debug!(
            "Parsed {} lyric lines, rejected {}",
            track.len(),
            self.rejected.len()
        );
        track
    }

    /// Parses until the reader is exhausted or fails.
    ///
    /// On a read error (including invalid UTF-8) parsing stops and the lines
    /// gathered so far are returned together with the error.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Outcome<LyricTrack> {
        let mut track = LyricTrack::new();
        for (idx, line) in reader.lines().enumerate() {
            let line_number = idx + 1;
            match line {
                Ok(line) => self.push_line(&mut track, line_number, &line),
                Err(err) => {
                    error!(
                        "Stopped reading lyrics at line {}: {} ({} lines kept)",
                        line_number,
                        err,
                        track.len()
                    );
                    let err = anyhow::Error::new(err)
                        .context(format!("Failed to read line {}", line_number));
                    return Outcome::partial(track, err);
                }
            }
        }
        debug!(
            "Read {} lyric lines, rejected {}",
            track.len(),
            self.rejected.len()
        );
        Outcome::complete(track)
    }

    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Outcome<LyricTrack> {
        let path = path.as_ref();
        let file = match File::open(path)
            .with_context(|| format!("Failed to open input file: '{}'", path.display()))
        {
            Ok(file) => file,
            Err(err) => {
                error!("{:#}", err);
                return Outcome::partial(LyricTrack::new(), err);
            }
        };
        let (track, failure) = self.parse_reader(BufReader::new(file)).into_parts();
        match failure {
            None => Outcome::complete(track),
            Some(err) => Outcome::partial(
                track,
                err.context(format!("Failed to read LRC file: '{}'", path.display())),
            ),
        }
    }

    fn push_line(&mut self, track: &mut LyricTrack, line_number: usize, line: &str) {
        let line = if line_number == 1 {
            line.strip_prefix('\u{FEFF}').unwrap_or(line)
        } else {
            line
        };
        if line.trim().is_empty() {
            return;
        }
        match lyric_line(line) {
            Ok(lyric) => track.push(lyric),
            Err(field) => {
                warn!(
                    "Skipping line {}: malformed timestamp '{}'",
                    line_number, field
                );
                self.rejected.push(LyricError::MalformedTimestamp {
                    line: line_number,
                    field,
                });
            }
        }
    }
}

/// Parses one non-blank LRC line. On failure, returns the timestamp field.
fn lyric_line(line: &str) -> Result<LyricLine, String> {
    let (field, text) = match split_line(line) {
        Ok((_, parts)) => parts,
        Err(_) => return Err(line.to_string()),
    };
    let seconds = timestamp(field).ok_or_else(|| field.to_string())?;
    Ok(LyricLine::new(seconds, text.unwrap_or("")))
}

/// Splits a line on its first `]` into the timestamp field and the lyric.
fn split_line(input: &str) -> IResult<&str, (&str, Option<&str>), VerboseError<&str>> {
    let (input, field) = take_till(|c: char| c == ']')(input)?;
    let (input, text) = opt(preceded(char(']'), rest))(input)?;
    Ok((input, (field, text)))
}

/// Latest timestamp accepted, 100000 hours.
const MAX_SECONDS: f64 = 360_000_000.0;

/// Reads a timestamp field such as `[01:30.50` as seconds.
///
/// The field's digits are read as one number `MMSS.ff`, whose last two
/// integer digits (and the fraction) are seconds and the rest are minutes.
fn timestamp(field: &str) -> Option<f64> {
    let field = field.trim();
    let field = field.strip_prefix('[').unwrap_or(field);
    let digits: String = field.chars().filter(|&c| c != ':').collect();
    let digits = digits.trim();

    let value = match decimal(digits) {
        Ok((_, value)) => value,
        Err(Err::Error(err)) | Err(Err::Failure(err)) => {
            debug!("{}", convert_error(digits, err));
            return None;
        }
        Err(Err::Incomplete(_)) => {
            unreachable!("Incomplete data received by non-streaming parser.")
        }
    };
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let minutes = (value / 100.0).floor();
    let seconds = minutes * 60.0 + value % 100.0;
    if seconds > MAX_SECONDS {
        return None;
    }
    Some(seconds)
}

fn decimal(input: &str) -> IResult<&str, f64, VerboseError<&str>> {
    all_consuming(map_res(recognize_float, |s: &str| s.parse::<f64>()))(input)
}
