//! drumseq - a grid drum machine
//!
//! The library holds everything that does not need a display:
//! - Tiles and the instrument grid
//! - The playhead that triggers tiles as it sweeps across the grid
//! - Tempo selection and transport (pause, rewind)
//! - Sample playback through cpal and optional MIDI mirroring

pub mod audio;
pub mod config;
pub mod error;
pub mod layout;
pub mod midi;
pub mod sequencer;

// Re-export commonly used types
pub use audio::{AudioOutput, SampleBank, SoundSink};
pub use config::Config;
pub use layout::{Layout, Rect};
pub use midi::MidiOutputDevice;
pub use sequencer::clock::FrameClock;
pub use sequencer::instrument::{Instrument, Rgb};
pub use sequencer::playhead::{PlayState, Playhead};
pub use sequencer::transport::{bpm_to_fps, Transport, TEMPO_TABLE};
pub use sequencer::{Grid, Sequencer, Tile};
