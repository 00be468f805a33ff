//! The single shared playback resource behind every audio card.
//!
//! Exactly one `AudioPlayer` exists per app, owned by the player state; all
//! mutation of the playback source, position, or play/pause state routes
//! through it.

use anyhow::{Context, Result, anyhow};
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub struct AudioPlayer {
    _stream: OutputStream,
    sink: Sink,
    source: Option<PathBuf>,
    duration: Duration,
}

impl AudioPlayer {
    pub fn new() -> Result<Self> {
        let (_stream, handle) = OutputStream::try_default().context("Opening audio output")?;
        let sink = Sink::try_new(&handle).context("Creating sink")?;
        Ok(AudioPlayer {
            _stream,
            sink,
            source: None,
            duration: Duration::ZERO,
        })
    }

    /// Replace whatever is queued with the given file and start playback from
    /// the beginning. Returns the decoded duration.
    pub fn load(&mut self, path: &Path) -> Result<Duration> {
        self.sink.clear();
        let reader = BufReader::new(
            File::open(path).with_context(|| format!("Opening {}", path.display()))?,
        );
        let decoder =
            Decoder::new(reader).with_context(|| format!("Decoding {}", path.display()))?;
        self.duration = decoder.total_duration().unwrap_or(Duration::ZERO);
        self.sink.append(decoder);
        self.sink.play();
        self.source = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            duration_ms = self.duration.as_millis(),
            "Loaded audio source"
        );
        Ok(self.duration)
    }

    pub fn play(&self) {
        self.sink.play();
    }

    pub fn pause(&self) {
        self.sink.pause();
    }

    pub fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    /// True once the queued source has played to its natural end.
    pub fn is_drained(&self) -> bool {
        self.sink.empty()
    }

    pub fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn loaded_source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Playback position as a fraction of duration, clamped to `[0, 1]`.
    pub fn progress(&self) -> f32 {
        position_fraction(self.position(), self.duration)
    }

    /// Seek to a fraction of the loaded duration. Non-fatal: an unseekable
    /// source logs and leaves the position unchanged.
    pub fn seek_to_fraction(&self, fraction: f32) -> Result<()> {
        if self.duration.is_zero() {
            return Err(anyhow!("No seekable source loaded"));
        }
        let target = fraction_to_position(fraction, self.duration);
        self.sink
            .try_seek(target)
            .map_err(|err| anyhow!("Seeking to {}ms: {err}", target.as_millis()))
    }

    /// Drop the queued source and forget it; position resets to zero.
    pub fn reset(&mut self) {
        self.sink.clear();
        if let Err(err) = self.sink.try_seek(Duration::ZERO) {
            debug!("Ignoring rewind failure on reset: {err}");
        }
        self.source = None;
        self.duration = Duration::ZERO;
    }
}

/// Validate that a file decodes and probe its duration without touching the
/// live sink. Safe to call off the UI thread.
pub fn probe_source(path: &Path) -> Result<Duration> {
    let reader =
        BufReader::new(File::open(path).with_context(|| format!("Opening {}", path.display()))?);
    let decoder = Decoder::new(reader).with_context(|| format!("Decoding {}", path.display()))?;
    let duration = decoder.total_duration().unwrap_or_else(|| {
        warn!(path = %path.display(), "Source reports no duration; progress will stay at zero");
        Duration::ZERO
    });
    Ok(duration)
}

pub fn fraction_to_position(fraction: f32, duration: Duration) -> Duration {
    let clamped = clamp_fraction(fraction);
    Duration::from_secs_f64(duration.as_secs_f64() * f64::from(clamped))
}

pub fn position_fraction(position: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 0.0;
    }
    clamp_fraction((position.as_secs_f64() / duration.as_secs_f64()) as f32)
}

pub fn clamp_fraction(fraction: f32) -> f32 {
    if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_fraction_of_two_minutes_is_sixty_seconds() {
        let target = fraction_to_position(0.5, Duration::from_secs(120));
        assert_eq!(target, Duration::from_secs(60));
    }

    #[test]
    fn fractions_clamp_to_unit_interval() {
        assert_eq!(clamp_fraction(-0.3), 0.0);
        assert_eq!(clamp_fraction(1.7), 1.0);
        assert_eq!(clamp_fraction(f32::NAN), 0.0);
    }

    #[test]
    fn position_fraction_guards_zero_duration() {
        assert_eq!(position_fraction(Duration::from_secs(5), Duration::ZERO), 0.0);
        assert_eq!(
            position_fraction(Duration::from_secs(30), Duration::from_secs(120)),
            0.25
        );
    }

    #[test]
    fn probe_rejects_missing_file() {
        assert!(probe_source(Path::new("/nonexistent/audio.ogg")).is_err());
    }
}
