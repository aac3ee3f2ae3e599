use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::timer::Cue;

/// Which cues are allowed to make a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(Serialize, Deserialize, ValueEnum, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SoundMode {
    Off,
    #[default]
    Finish,
    All,
}

impl SoundMode {
    pub fn allows(self, cue: Cue) -> bool {
        match self {
            SoundMode::Off => false,
            SoundMode::Finish => cue == Cue::Finish,
            SoundMode::All => true,
        }
    }
}

/// Realises cues for the listener.
pub trait CueSink {
    fn play(&mut self, cue: Cue) -> io::Result<()>;

    /// Stop anything still sounding. Called on cancel and reset.
    fn silence(&mut self) {}
}

impl<T: CueSink + ?Sized> CueSink for Box<T> {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        (**self).play(cue)
    }

    fn silence(&mut self) {
        (**self).silence()
    }
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCueSink;

impl CueSink for NullCueSink {
    fn play(&mut self, _cue: Cue) -> io::Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell. Ticks get a single bell, the finish gets three.
pub struct TerminalBell<W: Write> {
    out: W,
    mode: SoundMode,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, mode: SoundMode) -> Self {
        Self { out, mode }
    }
}

impl TerminalBell<io::Stdout> {
    pub fn stdout(mode: SoundMode) -> Self {
        Self::new(io::stdout(), mode)
    }
}

impl<W: Write> CueSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        if !self.mode.allows(cue) {
            return Ok(());
        }
        let bells: &[u8] = match cue {
            Cue::Tick => b"\x07",
            Cue::Finish => b"\x07\x07\x07",
        };
        self.out.write_all(bells)?;
        self.out.flush()
    }
}

/// Remembers what it was asked to play, for tests and headless runs.
#[derive(Debug, Default, Clone)]
pub struct RecordingCueSink {
    pub played: Vec<Cue>,
    pub silenced: usize,
    /// When set, every `play` call fails after being recorded.
    pub fail: bool,
}

impl RecordingCueSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|c| **c == cue).count()
    }
}

impl CueSink for RecordingCueSink {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        self.played.push(cue);
        if self.fail {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "playback refused",
            ));
        }
        Ok(())
    }

    fn silence(&mut self) {
        self.silenced += 1;
    }
}
