//! The moving line that plays whatever it crosses.
use super::Grid;
use crate::audio::SoundSink;
use crate::layout::{Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Running,
    Paused,
}

#[derive(Debug, Clone)]
pub struct Playhead {
    /// Right edge of the line, compared against tile left edges.
    leading_edge: i32,
    width: i32,
    top: i32,
    height: i32,
    speed: i32,
    start: i32,
    end: i32,
    state: PlayState,
}

impl Playhead {
    /// Parked on the first column, paused.
    pub fn new(layout: &Layout) -> Self {
        Self {
            leading_edge: layout.grid_left,
            width: layout.playhead_width,
            top: layout.grid_top,
            height: layout.playhead_height,
            speed: layout.playhead_speed,
            start: layout.grid_left,
            end: layout.grid_right(),
            state: PlayState::Paused,
        }
    }

    pub fn position(&self) -> i32 {
        self.leading_edge
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.leading_edge - self.width, self.top, self.width, self.height)
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlayState::Running
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            PlayState::Running => PlayState::Paused,
            PlayState::Paused => PlayState::Running,
        };
    }

    pub fn rewind(&mut self) {
        self.leading_edge = self.start;
    }

    /// One frame: trigger the column under the leading edge, then move.
    /// Returns how many tiles fired.
    pub fn step(&mut self, grid: &Grid, sink: &mut impl SoundSink) -> usize {
        if self.state == PlayState::Paused {
            return 0;
        }

        let mut fired = 0;
        if let Some(column) = grid.column_starting_at(self.leading_edge) {
            for row in grid.rows() {
                let tile = &row[column];
                if tile.is_active() {
                    tile.trigger(sink);
                    fired += 1;
                }
            }
        }

        self.leading_edge += self.speed;
        if self.leading_edge >= self.end {
            self.leading_edge = self.start;
        }
        fired
    }
}
