use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("column pitch must be positive, got {0}px")]
    NonPositivePitch(i32),
    #[error("playhead speed must be at least one pixel per tick")]
    ZeroSpeed,
    #[error("playhead speed {speed}px does not divide the column pitch {pitch}px, steps would be skipped")]
    SpeedDoesNotDividePitch { speed: i32, pitch: i32 },
    #[error("grid needs at least one column")]
    NoColumns,
    #[error("tile width {tile_width}px does not fit in the column pitch {pitch}px")]
    TileWiderThanPitch { tile_width: i32, pitch: i32 },
}

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("cannot read sample {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("sample {0} contains no audio")]
    Empty(PathBuf),
}

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("no default output device")]
    NoDevice,
    #[error("cannot query output config")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("unsupported output sample format {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),
    #[error("cannot build output stream")]
    Build(#[from] cpal::BuildStreamError),
    #[error("cannot start output stream")]
    Play(#[from] cpal::PlayStreamError),
}

#[derive(Error, Debug)]
pub enum MidiError {
    #[error("failed to create MIDI output")]
    Init(#[from] midir::InitError),
    #[error("no MIDI output port matches {0:?}")]
    UnknownPort(String),
    #[error("failed to connect: {0}")]
    Connect(String),
    #[error("failed to send")]
    Send(#[from] midir::SendError),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
pub type AssetResult<T> = Result<T, AssetError>;
pub type AudioResult<T> = Result<T, AudioError>;
pub type MidiResult<T> = Result<T, MidiError>;
