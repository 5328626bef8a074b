//! Tempo selection and the transport buttons.
use crate::layout::{Layout, Rect};

/// BPM values offered by the tempo buttons, left to right
pub const TEMPO_TABLE: [u32; 9] = [60, 80, 120, 150, 180, 200, 240, 300, 360];

/// Frames per second per BPM. 60 BPM runs at 25 fps.
pub const FPS_PER_BPM: f64 = 0.416_666_666_6;

pub fn bpm_to_fps(bpm: u32) -> u32 {
    (bpm as f64 * FPS_PER_BPM).round() as u32
}

#[derive(Debug, Clone)]
pub struct TempoButton {
    pub bpm: u32,
    pub rect: Rect,
}

impl TempoButton {
    pub fn label(&self) -> String {
        format!("{} BPM", self.bpm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Tempo(usize),
    Pause,
    Rewind,
}

#[derive(Debug, Clone)]
pub struct Transport {
    tempo_buttons: Vec<TempoButton>,
    selected: usize,
    pause_button: Rect,
    rewind_button: Rect,
    rewind_held: bool,
}

impl Transport {
    pub fn new(layout: &Layout) -> Self {
        let tempo_buttons = TEMPO_TABLE
            .iter()
            .enumerate()
            .map(|(i, &bpm)| TempoButton {
                bpm,
                rect: layout.tempo_button_rect(i),
            })
            .collect();

        Self {
            tempo_buttons,
            selected: 0,
            pause_button: layout.pause_button_rect(),
            rewind_button: layout.rewind_button_rect(),
            rewind_held: false,
        }
    }

    pub fn tempo_buttons(&self) -> &[TempoButton] {
        &self.tempo_buttons
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn bpm(&self) -> u32 {
        self.tempo_buttons[self.selected].bpm
    }

    pub fn fps(&self) -> u32 {
        bpm_to_fps(self.bpm())
    }

    /// Out of range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.tempo_buttons.len() {
            self.selected = index;
        }
    }

    pub fn pause_button(&self) -> Rect {
        self.pause_button
    }

    pub fn rewind_button(&self) -> Rect {
        self.rewind_button
    }

    pub fn rewind_held(&self) -> bool {
        self.rewind_held
    }

    pub fn set_rewind_held(&mut self, held: bool) {
        self.rewind_held = held;
    }

    /// Which controls lie under `x`, in dispatch order. Tempo buttons
    /// short-circuit on the first match; pause and rewind are always checked.
    pub fn controls_at(&self, x: i32) -> Vec<Control> {
        let mut hits = Vec::new();
        if let Some(i) = self.tempo_buttons.iter().position(|b| b.rect.spans_x(x)) {
            hits.push(Control::Tempo(i));
        }
        if self.pause_button.spans_x(x) {
            hits.push(Control::Pause);
        }
        if self.rewind_button.spans_x(x) {
            hits.push(Control::Rewind);
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bpm_to_fps_table() {
        let fps: Vec<u32> = TEMPO_TABLE.iter().map(|&b| bpm_to_fps(b)).collect();
        assert_eq!(fps, vec![25, 33, 50, 62, 75, 83, 100, 125, 150]);
    }

    #[test]
    fn test_starts_at_60_bpm() {
        let transport = Transport::new(&Layout::default());
        assert_eq!(transport.selected(), 0);
        assert_eq!(transport.bpm(), 60);
        assert_eq!(transport.fps(), 25);
    }

    #[test]
    fn test_controls_at() {
        let transport = Transport::new(&Layout::default());
        assert_eq!(transport.controls_at(50), vec![Control::Tempo(0)]);
        assert_eq!(transport.controls_at(150), vec![Control::Tempo(0)]);
        assert_eq!(transport.controls_at(155), vec![]);
        assert_eq!(transport.controls_at(1000), vec![Control::Tempo(8)]);
        assert_eq!(transport.controls_at(1600), vec![Control::Pause]);
        assert_eq!(transport.controls_at(1430), vec![Control::Rewind]);
    }
}
