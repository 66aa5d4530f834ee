use crate::lyric::LyricTrack;

use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;

/// How the minutes of an SRT timestamp are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinuteField {
    /// Minutes within the hour, `01:02:05,000` for 3725 seconds.
    Standard,
    /// Total minutes, ignoring hours: `01:62:05,000` for 3725 seconds.
    /// Matches the output of older LRC to SRT converters.
    Legacy,
}

impl Default for MinuteField {
    fn default() -> Self {
        MinuteField::Standard
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SrtOptions {
    /// How long the final subtitle stays up, as nothing follows it.
    pub last_line_duration: Duration,
    pub minute_field: MinuteField,
}

impl Default for SrtOptions {
    fn default() -> Self {
        Self {
            last_line_duration: Duration::from_secs(5),
            minute_field: MinuteField::Standard,
        }
    }
}

pub fn to_srt<'a>(track: &'a LyricTrack, opts: &'a SrtOptions) -> SrtDocument<'a> {
    SrtDocument { track, opts }
}

pub fn to_lrc(track: &LyricTrack) -> LrcDocument<'_> {
    LrcDocument { track }
}

pub fn write_srt<P: AsRef<Path>>(track: &LyricTrack, output: P, opts: &SrtOptions) -> Result<()> {
    let output = output.as_ref();
    write_file(output, to_srt(track, opts))
        .with_context(|| format!("Failed to write SRT file: '{}'", output.display()))?;
    debug!("Wrote {} subtitles to '{}'", track.len(), output.display());
    Ok(())
}

pub fn write_lrc<P: AsRef<Path>>(track: &LyricTrack, output: P) -> Result<()> {
    let output = output.as_ref();
    write_file(output, to_lrc(track))
        .with_context(|| format!("Failed to write LRC file: '{}'", output.display()))?;
    debug!("Wrote {} lyric lines to '{}'", track.len(), output.display());
    Ok(())
}

fn write_file<D: Display>(output: &Path, document: D) -> Result<()> {
    let file = File::create(output).context("Failed to create output file")?;
    let mut writer = BufWriter::new(file);
    write!(writer, "{}", document).context("Failed to write to output file.")?;
    writer.flush().context("Failed to write to output file.")?;
    Ok(())
}

/// A track rendered as SRT subtitles.
///
/// Each line is shown until the next one starts. The last line is shown for
/// [`SrtOptions::last_line_duration`].
#[derive(Debug, Clone, Copy)]
pub struct SrtDocument<'a> {
    track: &'a LyricTrack,
    opts: &'a SrtOptions,
}

impl Display for SrtDocument<'_> {
    fn fmt(&self, buf: &mut fmt::Formatter) -> fmt::Result {
        let lines = self.track.lines();
        for (idx, line) in lines.iter().enumerate() {
            let show_at = line.timestamp();
            let hide_at = match lines.get(idx + 1) {
                Some(next) => next.timestamp(),
                None => show_at + self.opts.last_line_duration.as_secs_f64(),
            };
            writeln!(buf, "{}", idx + 1)?;
            write_srt_ts(buf, show_at, self.opts.minute_field)?;
            buf.write_str(" --> ")?;
            write_srt_ts(buf, hide_at, self.opts.minute_field)?;
            writeln!(buf)?;
            writeln!(buf, "{}", line.text())?;
            writeln!(buf)?;
        }
        Ok(())
    }
}

/// A track rendered as `[MM:SS.ff]text` lines.
#[derive(Debug, Clone, Copy)]
pub struct LrcDocument<'a> {
    track: &'a LyricTrack,
}

impl Display for LrcDocument<'_> {
    fn fmt(&self, buf: &mut fmt::Formatter) -> fmt::Result {
        for line in self.track {
            write_lrc_ts(buf, line.timestamp())?;
            writeln!(buf, "{}", line.text())?;
        }
        Ok(())
    }
}

/// Whole milliseconds in `seconds`, rounded down.
///
/// The nanosecond of slack keeps values like 65.07, which is stored as
/// 65.069999..., from losing a millisecond.
fn whole_millis(seconds: f64) -> u64 {
    (seconds * 1000.0 + 1e-6).floor().max(0.0) as u64
}

fn write_srt_ts<W: fmt::Write>(buf: &mut W, seconds: f64, minute_field: MinuteField) -> fmt::Result {
    let millis = whole_millis(seconds);
    let total_secs = millis / 1000;
    let hours = total_secs / 3600;
    let minutes = match minute_field {
        MinuteField::Standard => (total_secs % 3600) / 60,
        MinuteField::Legacy => total_secs / 60,
    };
    let seconds = total_secs % 60;
    write!(
        buf,
        "{:02}:{:02}:{:02},{:03}",
        hours,
        minutes,
        seconds,
        millis % 1000
    )
}

fn write_lrc_ts<W: fmt::Write>(buf: &mut W, seconds: f64) -> fmt::Result {
    let millis = whole_millis(seconds);
    let total_secs = millis / 1000;
    write!(
        buf,
        "[{:02}:{:02}.{:02}]",
        total_secs / 60,
        total_secs % 60,
        (millis / 10) % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyric::LyricLine;

    macro_rules! test_write_ts {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, minute_field, expected) = $value;

                let mut buf = String::new();

                write_srt_ts(&mut buf, input, minute_field).expect("Failed to write to buffer");

                assert_eq!(buf, expected);
            }
        )*
        }
    }

    test_write_ts! {
        test_write_ts_0: (0.0, MinuteField::Standard, "00:00:00,000"),
        test_write_ts_1: (0.001, MinuteField::Standard, "00:00:00,001"),
        test_write_ts_2: (0.999, MinuteField::Standard, "00:00:00,999"),
        test_write_ts_3: (1.0, MinuteField::Standard, "00:00:01,000"),
        test_write_ts_4: (59.999, MinuteField::Standard, "00:00:59,999"),
        test_write_ts_5: (60.0, MinuteField::Standard, "00:01:00,000"),
        test_write_ts_6: (65.07, MinuteField::Standard, "00:01:05,070"),
        test_write_ts_7: (3600.0, MinuteField::Standard, "01:00:00,000"),
        test_write_ts_8: (7326.159, MinuteField::Standard, "02:02:06,159"),
        test_write_ts_9: (360_000.001, MinuteField::Standard, "100:00:00,001"),
        test_write_ts_10: (3725.0, MinuteField::Legacy, "01:62:05,000"),
        test_write_ts_11: (181.25, MinuteField::Legacy, "00:03:01,250"),
        test_write_ts_12: (0.0004, MinuteField::Standard, "00:00:00,000"),
    }

    macro_rules! test_write_lrc_ts {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected) = $value;

                let mut buf = String::new();

                write_lrc_ts(&mut buf, input).expect("Failed to write to buffer");

                assert_eq!(buf, expected);
            }
        )*
        }
    }

    test_write_lrc_ts! {
        test_write_lrc_ts_0: (0.0, "[00:00.00]"),
        test_write_lrc_ts_1: (90.5, "[01:30.50]"),
        test_write_lrc_ts_2: (65.07, "[01:05.07]"),
        test_write_lrc_ts_3: (59.999, "[00:59.99]"),
        test_write_lrc_ts_4: (6000.0, "[100:00.00]"),
    }

    fn track(lines: &[(f64, &str)]) -> LyricTrack {
        lines
            .iter()
            .map(|&(ts, text)| LyricLine::new(ts, text))
            .collect()
    }

    #[test]
    fn srt_last_line_gets_five_seconds() {
        let t = track(&[(1.0, "first"), (5.0, "second")]);
        let srt = to_srt(&t, &SrtOptions::default()).to_string();
        assert_eq!(
            srt,
            "1\n00:00:01,000 --> 00:00:05,000\nfirst\n\n\
             2\n00:00:05,000 --> 00:00:10,000\nsecond\n\n"
        );
    }

    #[test]
    fn srt_custom_last_line_duration() {
        let t = track(&[(2.5, "only")]);
        let opts = SrtOptions {
            last_line_duration: Duration::from_millis(1500),
            ..SrtOptions::default()
        };
        assert_eq!(
            to_srt(&t, &opts).to_string(),
            "1\n00:00:02,500 --> 00:00:04,000\nonly\n\n"
        );
    }

    #[test]
    fn srt_keeps_file_order_and_empty_text() {
        let t = track(&[(4.0, ""), (2.0, "back")]);
        let srt = to_srt(&t, &SrtOptions::default()).to_string();
        assert_eq!(
            srt,
            "1\n00:00:04,000 --> 00:00:02,000\n\n\n\
             2\n00:00:02,000 --> 00:00:07,000\nback\n\n"
        );
    }

    #[test]
    fn empty_track_renders_nothing() {
        let t = LyricTrack::new();
        assert_eq!(to_srt(&t, &SrtOptions::default()).to_string(), "");
        assert_eq!(to_lrc(&t).to_string(), "");
    }

    #[test]
    fn lrc_lines() {
        let t = track(&[(0.0, ""), (90.5, "Hello"), (125.3, "world")]);
        assert_eq!(
            to_lrc(&t).to_string(),
            "[00:00.00]\n[01:30.50]Hello\n[02:05.30]world\n"
        );
    }
}
