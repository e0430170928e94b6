//! Maze layout configuration
//!
//! Grid dimensions plus the sizing the geometry and control layers need.
//! The generator itself only ever sees `rows` and `cols`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{MazeError, MazeResult};
use crate::settings::Difficulty;

/// Dimensions and styling for one maze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MazeConfig {
    pub rows: usize,
    pub cols: usize,
    /// Cell width in pixels
    pub cell_width: f32,
    /// Cell height in pixels
    pub cell_height: f32,
    /// Ball radius as a fraction of the smaller cell side
    pub ball_radius_ratio: f32,
    /// Per-axis speed cap for keyboard control
    pub max_velocity: f32,
}

impl Default for MazeConfig {
    /// The 3x3 starter maze on a 600x600 canvas
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            cell_width: 200.0,
            cell_height: 200.0,
            ball_radius_ratio: BALL_RADIUS_RATIO,
            max_velocity: MAX_VELOCITY,
        }
    }
}

impl MazeConfig {
    pub fn new(rows: usize, cols: usize, cell_width: f32, cell_height: f32) -> MazeResult<Self> {
        let config = Self {
            rows,
            cols,
            cell_width,
            cell_height,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Non-empty grid with finite, positive cell sides
    pub fn validate(&self) -> MazeResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MazeError::InvalidDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.cell_width) || !valid(self.cell_height) {
            return Err(MazeError::InvalidCellSize {
                width: self.cell_width,
                height: self.cell_height,
            });
        }
        Ok(())
    }

    /// Split a `width x height` canvas into `rows x cols` cells
    pub fn from_canvas(rows: usize, cols: usize, width: f32, height: f32) -> MazeResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimension { rows, cols });
        }
        Self::new(rows, cols, width / cols as f32, height / rows as f32)
    }

    /// `6*level` rows by `8*level` columns filling the canvas
    pub fn from_difficulty(difficulty: Difficulty, width: f32, height: f32) -> MazeResult<Self> {
        let level = difficulty.level();
        Self::from_canvas(ROWS_PER_LEVEL * level, COLS_PER_LEVEL * level, width, height)
    }

    /// Builder-style override of the ball size
    pub fn with_ball_radius_ratio(mut self, ratio: f32) -> Self {
        self.ball_radius_ratio = ratio;
        self
    }

    /// Builder-style override of the speed cap
    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Play area width
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.cell_width
    }

    /// Play area height
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_height
    }

    pub fn ball_radius(&self) -> f32 {
        self.cell_width.min(self.cell_height) * self.ball_radius_ratio
    }
}
