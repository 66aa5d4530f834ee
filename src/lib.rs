//! Convert LRC lyrics into SRT subtitles, or back into LRC, optionally
//! retimed for a different playback speed.
//!
//! ```no_run
//! use lrcconv::{process, read_lrc, write_srt, ProcessOpts, SrtOptions};
//!
//! # fn main() -> anyhow::Result<()> {
//! let track = read_lrc("song.lrc").into_result()?;
//! let track = process(track, ProcessOpts { speed: Some(1.25) })?;
//! write_srt(&track, "song.srt", &SrtOptions::default())?;
//! # Ok(())
//! # }
//! ```

mod error;
mod lyric;
mod parser;
mod processor;
mod serialiser;

pub use crate::error::{LyricError, Outcome};
pub use crate::lyric::{LyricLine, LyricTrack};
pub use crate::parser::{read_lrc, Parser};
pub use crate::processor::{process, ProcessOpts};
pub use crate::serialiser::{
    to_lrc, to_srt, write_lrc, write_srt, LrcDocument, MinuteField, SrtDocument, SrtOptions,
};
