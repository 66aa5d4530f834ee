use crate::lyric::LyricTrack;

use anyhow::{Context, Result};
use log::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOpts {
    /// Playback speed the output should be timed for, 1.0 being unchanged.
    pub speed: Option<f64>,
}

/// Applies `opts` to a freshly parsed track before it is serialised.
pub fn process(track: LyricTrack, opts: ProcessOpts) -> Result<LyricTrack> {
    let track = match opts.speed {
        Some(speed) => change_speed(track, speed)?,
        None => track,
    };
    Ok(track)
}

fn change_speed(mut track: LyricTrack, speed: f64) -> Result<LyricTrack> {
    track
        .change_speed(speed)
        .context("Failed to change playback speed")?;
    debug!("Retimed {} lines for {}x playback", track.len(), speed);
    Ok(track)
}
