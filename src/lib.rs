//! Maze Ball - a random perfect maze rolled through with a physics ball
//!
//! Core modules:
//! - `sim`: Deterministic maze generation, wall geometry, win condition
//! - `physics`: The physics engine seam the game drives
//! - `config`: Maze dimensions and styling
//! - `settings` / `records`: Persisted preferences and best times
//! - `platform`: Browser bridge to Matter.js (wasm32 only)

pub mod config;
pub mod error;
pub mod physics;
pub mod platform;
pub mod records;
pub mod settings;
pub mod sim;

pub use config::MazeConfig;
pub use error::MazeError;
pub use records::BestTimes;
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// Thickness of every wall segment, independent of cell size
    pub const WALL_THICKNESS: f32 = 5.0;

    /// Goal marker size as a fraction of the cell
    pub const GOAL_SIZE_RATIO: f32 = 0.7;

    /// Ball defaults
    pub const BALL_RADIUS_RATIO: f32 = 0.25;
    /// Velocity change per control press
    pub const VELOCITY_STEP: f32 = 5.0;
    /// Per-axis speed cap
    pub const MAX_VELOCITY: f32 = 10.0;

    /// Rows/columns added per difficulty level
    pub const ROWS_PER_LEVEL: usize = 6;
    pub const COLS_PER_LEVEL: usize = 8;

    /// Default play area (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Gravity applied once the maze collapses
    pub const WIN_GRAVITY_Y: f32 = 1.0;
}
