//! Pixel geometry of the sequencer window.
//!
//! Everything is in integer window pixels with the origin at the top-left
//! corner. The playhead compares pixel positions for exact equality, so the
//! layout is only valid when the playhead speed divides the column pitch.

use crate::error::{LayoutError, LayoutResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Inclusive on both edges.
    pub fn spans_x(&self, x: i32) -> bool {
        self.left <= x && x <= self.right()
    }

    /// Inclusive on both edges.
    pub fn spans_y(&self, y: i32) -> bool {
        self.top <= y && y <= self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub window_width: i32,
    pub window_height: i32,

    pub grid_left: i32,
    pub grid_top: i32,
    pub columns: usize,
    pub column_pitch: i32,
    pub row_pitch: i32,
    pub tile_width: i32,
    pub tile_height: i32,

    pub playhead_width: i32,
    pub playhead_height: i32,
    pub playhead_speed: i32,

    pub button_top: i32,
    pub button_height: i32,
    pub tempo_button_left: i32,
    pub tempo_button_pitch: i32,
    pub button_width: i32,
    /// Pause sits this far from the right window edge, To Start twice as far.
    pub transport_button_pitch: i32,

    pub label_size: i32,
    pub beats_per_bar: usize,
}

impl Default for Layout {
    fn default() -> Self {
        let window_width = 1650;
        let window_height = 550;
        let grid_left = 50;
        let grid_top = 100;
        let column_pitch = 25;

        Self {
            window_width,
            window_height,
            grid_left,
            grid_top,
            columns: ((window_width - grid_left + column_pitch - 1) / column_pitch) as usize,
            column_pitch,
            row_pitch: 50,
            tile_width: 20,
            tile_height: 40,
            playhead_width: 3,
            playhead_height: window_height - grid_top - 10,
            playhead_speed: 1,
            button_top: 20,
            button_height: 40,
            tempo_button_left: 50,
            tempo_button_pitch: 110,
            button_width: 100,
            transport_button_pitch: 110,
            label_size: 40,
            beats_per_bar: 4,
        }
    }
}

impl Layout {
    /// Same geometry with a different column count.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn validate(&self) -> LayoutResult<()> {
        if self.column_pitch <= 0 {
            return Err(LayoutError::NonPositivePitch(self.column_pitch));
        }
        if self.playhead_speed <= 0 {
            return Err(LayoutError::ZeroSpeed);
        }
        if self.column_pitch % self.playhead_speed != 0 {
            return Err(LayoutError::SpeedDoesNotDividePitch {
                speed: self.playhead_speed,
                pitch: self.column_pitch,
            });
        }
        if self.columns == 0 {
            return Err(LayoutError::NoColumns);
        }
        if self.tile_width > self.column_pitch {
            return Err(LayoutError::TileWiderThanPitch {
                tile_width: self.tile_width,
                pitch: self.column_pitch,
            });
        }
        Ok(())
    }

    pub fn grid_right(&self) -> i32 {
        self.grid_left + self.columns as i32 * self.column_pitch
    }

    pub fn tile_rect(&self, column: usize, row: usize) -> Rect {
        Rect::new(
            self.grid_left + column as i32 * self.column_pitch,
            self.grid_top + row as i32 * self.row_pitch,
            self.tile_width,
            self.tile_height,
        )
    }

    pub fn label_rect(&self, row: usize) -> Rect {
        Rect::new(
            0,
            self.grid_top + row as i32 * self.row_pitch,
            self.label_size,
            self.label_size,
        )
    }

    pub fn tempo_button_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.tempo_button_left + index as i32 * self.tempo_button_pitch,
            self.button_top,
            self.button_width,
            self.button_height,
        )
    }

    pub fn rewind_button_rect(&self) -> Rect {
        Rect::new(
            self.window_width - 2 * self.transport_button_pitch,
            self.button_top,
            self.button_width,
            self.button_height,
        )
    }

    pub fn pause_button_rect(&self) -> Rect {
        Rect::new(
            self.window_width - self.transport_button_pitch,
            self.button_top,
            self.button_width,
            self.button_height,
        )
    }

    /// Strictly inside the vertical band shared by all buttons.
    pub fn in_button_band(&self, y: i32) -> bool {
        self.button_top < y && y < self.button_top + self.button_height
    }

    /// X positions of the dashed bar lines. Each sits where the playhead's
    /// trailing edge is when it reaches the first column of a bar.
    pub fn bar_markers(&self) -> Vec<i32> {
        let bar = self.column_pitch * self.beats_per_bar as i32;
        if bar <= 0 {
            return Vec::new();
        }
        (1..)
            .map(|k| self.grid_left - self.playhead_width + k * bar)
            .take_while(|x| *x < self.window_width - 10)
            .collect()
    }

    /// Y ranges of the dashes that make up one bar line.
    pub fn bar_dashes(&self) -> Vec<(i32, i32)> {
        (self.grid_top..self.window_height - 10)
            .step_by(20)
            .map(|y| (y, y + 10))
            .collect()
    }
}
