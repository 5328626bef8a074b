//! MIDI output using midir
use midir::{MidiOutput, MidiOutputConnection};
use tracing::{info, warn};

use crate::audio::SoundSink;
use crate::error::{MidiError, MidiResult};
use crate::sequencer::instrument::Instrument;

const CLIENT_NAME: &str = "drumseq MIDI Output";

/// Channel 10, where General MIDI keeps its drum kit
const NOTE_ON: u8 = 0x99;
const NOTE_OFF: u8 = 0x89;
const VELOCITY: u8 = 100;

pub struct MidiOutputDevice {
    connection: Option<MidiOutputConnection>,
}

impl MidiOutputDevice {
    pub fn new() -> Self {
        Self { connection: None }
    }

    pub fn available_ports() -> Vec<String> {
        if let Ok(midi_out) = MidiOutput::new(CLIENT_NAME) {
            midi_out
                .ports()
                .iter()
                .filter_map(|p| midi_out.port_name(p).ok())
                .collect()
        } else {
            vec![]
        }
    }

    pub fn connect(&mut self, port_index: usize) -> MidiResult<()> {
        let midi_out = MidiOutput::new(CLIENT_NAME)?;

        let ports = midi_out.ports();
        let port = ports
            .get(port_index)
            .ok_or_else(|| MidiError::UnknownPort(port_index.to_string()))?;
        let name = midi_out.port_name(port).unwrap_or_default();

        let connection = midi_out
            .connect(port, "drumseq")
            .map_err(|e| MidiError::Connect(e.to_string()))?;

        info!(port = %name, "MIDI output connected");
        self.connection = Some(connection);
        Ok(())
    }

    /// Connect to the first port whose name contains `pattern`.
    pub fn connect_by_name(&mut self, pattern: &str) -> MidiResult<()> {
        let index = Self::available_ports()
            .iter()
            .position(|name| name.contains(pattern))
            .ok_or_else(|| MidiError::UnknownPort(pattern.to_string()))?;
        self.connect(index)
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Note on immediately followed by note off; drum voices ignore length.
    pub fn send_hit(&mut self, note: u8) -> MidiResult<()> {
        if let Some(ref mut conn) = self.connection {
            conn.send(&[NOTE_ON, note, VELOCITY])?;
            conn.send(&[NOTE_OFF, note, 0])?;
        }
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if let Some(conn) = self.connection.take() {
            conn.close();
        }
    }
}

impl Default for MidiOutputDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundSink for MidiOutputDevice {
    fn play(&mut self, instrument: Instrument) {
        if let Err(e) = self.send_hit(instrument.gm_note()) {
            warn!("MIDI send failed: {}", e);
        }
    }
}
