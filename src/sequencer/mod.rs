//! Core sequencer logic - tiles, grid, playhead and transport
//! This is display-agnostic: the frame loop feeds it pointer events and ticks
use tracing::{debug, info, trace};

use crate::audio::SoundSink;
use crate::error::LayoutResult;
use crate::layout::{Layout, Rect};

pub mod clock;
pub mod instrument;
pub mod playhead;
pub mod transport;

use instrument::Instrument;
use playhead::Playhead;
use transport::{Control, Transport};

/// One step of one instrument
#[derive(Debug, Clone)]
pub struct Tile {
    column: usize,
    row: usize,
    rect: Rect,
    active: bool,
    instrument: Instrument,
}

impl Tile {
    pub fn new(column: usize, row: usize, rect: Rect, instrument: Instrument) -> Self {
        Self {
            column,
            row,
            rect,
            active: false,
            instrument,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    /// Toggles when `x` is strictly inside the tile; edges don't count.
    pub fn hit_test(&mut self, x: i32) -> bool {
        if self.rect.left < x && x < self.rect.right() {
            self.toggle();
            debug!(
                instrument = self.instrument.label(),
                column = self.column(),
                row = self.row(),
                active = self.active,
                "tile toggled"
            );
            return true;
        }
        false
    }

    pub fn trigger(&self, sink: &mut impl SoundSink) {
        trace!(instrument = self.instrument.label(), column = self.column, "trigger");
        sink.play(self.instrument);
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    rows: Vec<Vec<Tile>>,
    left: i32,
    right: i32,
    pitch: i32,
}

impl Grid {
    /// One row per instrument, every tile inactive.
    pub fn new(layout: &Layout) -> Self {
        let rows = Instrument::ALL
            .iter()
            .map(|&instrument| {
                let row = instrument.index();
                (0..layout.columns)
                    .map(|column| {
                        Tile::new(column, row, layout.tile_rect(column, row), instrument)
                    })
                    .collect()
            })
            .collect();

        Self {
            rows,
            left: layout.grid_left,
            right: layout.grid_right(),
            pitch: layout.column_pitch,
        }
    }

    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.rows
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn tile(&self, column: usize, row: usize) -> Option<&Tile> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    pub fn toggle(&mut self, column: usize, row: usize) {
        if let Some(tile) = self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            tile.toggle();
        }
    }

    /// Toggles the first tile under the pointer, if any.
    pub fn hit_test(&mut self, x: i32, y: i32) -> bool {
        let Some(row) = self
            .rows
            .iter_mut()
            .find(|row| row.first().is_some_and(|tile| tile.rect.spans_y(y)))
        else {
            return false;
        };
        row.iter_mut().any(|tile| tile.hit_test(x))
    }

    /// The column whose left edge is exactly `x`.
    pub fn column_starting_at(&self, x: i32) -> Option<usize> {
        let offset = x - self.left;
        if offset < 0 || offset % self.pitch != 0 {
            return None;
        }
        let column = (offset / self.pitch) as usize;
        (column < self.columns()).then_some(column)
    }
}

/// Everything the frame loop mutates: grid, playhead, tempo and transport.
pub struct Sequencer {
    layout: Layout,
    grid: Grid,
    playhead: Playhead,
    transport: Transport,
}

impl Sequencer {
    pub fn new(layout: Layout) -> LayoutResult<Self> {
        layout.validate()?;
        Ok(Self {
            grid: Grid::new(&layout),
            playhead: Playhead::new(&layout),
            transport: Transport::new(&layout),
            layout,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn playhead(&self) -> &Playhead {
        &self.playhead
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn bpm(&self) -> u32 {
        self.transport.bpm()
    }

    pub fn fps(&self) -> u32 {
        self.transport.fps()
    }

    pub fn is_paused(&self) -> bool {
        !self.playhead.is_running()
    }

    pub fn select_tempo(&mut self, index: usize) {
        self.transport.select(index);
        info!(bpm = self.bpm(), fps = self.fps(), "tempo changed");
    }

    pub fn toggle_pause(&mut self) {
        self.playhead.toggle_pause();
        info!(paused = self.is_paused(), "pause toggled");
    }

    pub fn rewind(&mut self) {
        self.playhead.rewind();
        info!("rewind to start");
    }

    /// Primary button pressed at window position (`x`, `y`).
    pub fn press(&mut self, x: i32, y: i32) {
        if self.layout.in_button_band(y) {
            for control in self.transport.controls_at(x) {
                match control {
                    Control::Tempo(index) => self.select_tempo(index),
                    Control::Pause => self.toggle_pause(),
                    Control::Rewind => {
                        self.transport.set_rewind_held(true);
                        self.rewind();
                    }
                }
            }
        }
        self.grid.hit_test(x, y);
    }

    /// Primary button released anywhere.
    pub fn release(&mut self) {
        self.transport.set_rewind_held(false);
    }

    /// Advance one frame. Returns the number of sounds triggered.
    pub fn tick(&mut self, sink: &mut impl SoundSink) -> usize {
        self.playhead.step(&self.grid, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Recorder;
    use crate::error::LayoutError;
    use crate::sequencer::transport::{bpm_to_fps, TEMPO_TABLE};

    fn started(layout: Layout) -> Sequencer {
        let mut seq = Sequencer::new(layout).unwrap();
        seq.toggle_pause();
        seq
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(&Layout::default());
        assert_eq!(grid.rows().len(), 9);
        assert!(grid.rows().iter().all(|row| row.len() == 64));
        assert!(grid.rows().iter().flatten().all(|tile| !tile.is_active()));
    }

    #[test]
    fn test_tile_toggle_twice_restores() {
        let layout = Layout::default();
        let mut tile = Tile::new(0, 0, layout.tile_rect(0, 0), Instrument::BassDrum);
        tile.toggle();
        assert!(tile.is_active());
        tile.toggle();
        assert!(!tile.is_active());
    }

    #[test]
    fn test_tile_hit_test_excludes_edges() {
        let layout = Layout::default();
        let mut tile = Tile::new(0, 0, layout.tile_rect(0, 0), Instrument::BassDrum);
        assert!(!tile.hit_test(50));
        assert!(!tile.hit_test(70));
        assert!(!tile.is_active());
        assert!(tile.hit_test(51));
        assert!(tile.is_active());
    }

    #[test]
    fn test_grid_hit_test() {
        let mut grid = Grid::new(&Layout::default());
        // Snare row spans y 150..=190, column 2 spans x 100..120
        assert!(grid.hit_test(110, 170));
        assert!(grid.tile(2, 1).unwrap().is_active());
        // Gap between tiles
        assert!(!grid.hit_test(122, 170));
        // Gap between rows
        assert!(!grid.hit_test(110, 195));
        assert_eq!(grid.rows().iter().flatten().filter(|t| t.is_active()).count(), 1);
    }

    #[test]
    fn test_column_starting_at() {
        let grid = Grid::new(&Layout::default().with_columns(8));
        assert_eq!(grid.column_starting_at(50), Some(0));
        assert_eq!(grid.column_starting_at(125), Some(3));
        assert_eq!(grid.column_starting_at(126), None);
        assert_eq!(grid.column_starting_at(25), None);
        assert_eq!(grid.column_starting_at(250), None);
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let layout = Layout {
            playhead_speed: 3,
            ..Layout::default()
        };
        assert!(matches!(
            Sequencer::new(layout),
            Err(LayoutError::SpeedDoesNotDividePitch { speed: 3, pitch: 25 })
        ));
    }

    #[test]
    fn test_zero_pitch_rejected() {
        let layout = Layout {
            column_pitch: 0,
            tile_width: 0,
            ..Layout::default()
        };
        assert!(matches!(
            Sequencer::new(layout),
            Err(LayoutError::NonPositivePitch(0))
        ));
    }

    #[test]
    fn test_tempo_clicks_keep_one_selected() {
        let mut seq = Sequencer::new(Layout::default()).unwrap();

        // (x, y, expected selection after the press)
        let clicks = [
            (300, 40, 2),
            (150, 40, 0),  // right edge of button 0
            (155, 40, 0),  // gap between buttons
            (160, 40, 1),  // left edge of button 1
            (1000, 40, 8),
            (1000, 20, 8), // on the band edge
            (600, 80, 8),  // below the band
            (700, 40, 5),
            (820, 59, 7),
        ];
        for (x, y, expected) in clicks {
            seq.press(x, y);
            seq.release();
            let transport = seq.transport();
            assert_eq!(transport.selected(), expected, "click at ({x}, {y})");
            assert_eq!(seq.bpm(), TEMPO_TABLE[expected]);
            assert_eq!(seq.fps(), bpm_to_fps(TEMPO_TABLE[expected]));
            let highlighted = transport
                .tempo_buttons()
                .iter()
                .filter(|b| b.bpm == seq.bpm())
                .count();
            assert_eq!(highlighted, 1);
        }
    }

    #[test]
    fn test_tile_reports_its_position() {
        let grid = Grid::new(&Layout::default());
        let tile = grid.tile(7, 3).unwrap();
        assert_eq!((tile.column(), tile.row()), (7, 3));
        assert_eq!(tile.instrument(), Instrument::OpenHiHat);
    }

    #[test]
    fn test_scenario_trigger_exactly_once() {
        let mut seq = started(Layout::default().with_columns(8));
        seq.grid_mut().toggle(3, 0);
        assert_eq!(seq.bpm(), 60);
        assert_eq!(seq.fps(), 25);
        let mut sink = Recorder::default();

        seq.tick(&mut sink);
        seq.tick(&mut sink);
        assert_eq!(seq.playhead().position(), 52);
        assert!(sink.played.is_empty());

        // Leading edge reaches 125 after 75 ticks; that tick fires it
        for _ in 2..75 {
            seq.tick(&mut sink);
        }
        assert_eq!(seq.playhead().position(), 125);
        assert!(sink.played.is_empty());
        assert_eq!(seq.tick(&mut sink), 1);
        assert_eq!(sink.played, vec![Instrument::BassDrum]);

        // 124 ticks to wrap from 126 back to 50, then 75 more to reach 125
        for _ in 0..124 {
            seq.tick(&mut sink);
        }
        assert_eq!(seq.playhead().position(), 50);
        for _ in 0..75 {
            seq.tick(&mut sink);
        }
        assert_eq!(sink.played.len(), 1);
        seq.tick(&mut sink);
        assert_eq!(sink.played.len(), 2);
    }

    #[test]
    fn test_whole_column_fires_together() {
        let mut seq = started(Layout::default().with_columns(4));
        seq.grid_mut().toggle(0, 0);
        seq.grid_mut().toggle(0, 1);
        seq.grid_mut().toggle(1, 2);
        let mut sink = Recorder::default();

        assert_eq!(seq.tick(&mut sink), 2);
        assert_eq!(sink.played, vec![Instrument::BassDrum, Instrument::Snare]);
    }

    #[test]
    fn test_pause_freezes_position() {
        let mut seq = started(Layout::default());
        seq.grid_mut().toggle(0, 0);
        let mut sink = Recorder::default();
        for _ in 0..10 {
            seq.tick(&mut sink);
        }
        seq.toggle_pause();
        let frozen = seq.playhead().position();
        for _ in 0..50 {
            seq.tick(&mut sink);
        }
        assert_eq!(seq.playhead().position(), frozen);
        assert_eq!(sink.played.len(), 1);
    }

    #[test]
    fn test_rewind_keeps_tiles_and_pause() {
        let mut seq = started(Layout::default());
        seq.grid_mut().toggle(5, 4);
        let mut sink = Recorder::default();
        for _ in 0..30 {
            seq.tick(&mut sink);
        }
        seq.toggle_pause();
        seq.rewind();
        assert_eq!(seq.playhead().position(), 50);
        assert!(seq.is_paused());
        assert!(seq.grid().tile(5, 4).unwrap().is_active());
    }

    #[test]
    fn test_press_dispatch() {
        let mut seq = Sequencer::new(Layout::default()).unwrap();
        assert!(seq.is_paused());

        // 120 BPM button
        seq.press(300, 40);
        assert_eq!(seq.bpm(), 120);
        assert_eq!(seq.fps(), 50);

        // Pause button
        seq.press(1600, 40);
        assert!(!seq.is_paused());

        // Rewind, held until release
        let mut sink = Recorder::default();
        seq.tick(&mut sink);
        seq.press(1450, 40);
        assert_eq!(seq.playhead().position(), 50);
        assert!(seq.transport().rewind_held());
        seq.release();
        assert!(!seq.transport().rewind_held());

        // Button band edges are outside
        seq.press(300, 20);
        seq.press(1000, 40);
        seq.press(1000, 60);
        assert_eq!(seq.bpm(), 360);

        // Grid
        seq.press(60, 520);
        assert!(seq.grid().tile(0, 8).unwrap().is_active());
    }
}
