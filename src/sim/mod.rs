//! Deterministic maze module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded or injected randomness only
//! - No process-wide state
//! - No rendering or platform dependencies; physics goes through `PhysicsWorld`

pub mod control;
pub mod game;
pub mod geometry;
pub mod maze;
pub mod win;

pub use control::Control;
pub use game::{Game, GameEvent};
pub use geometry::{MazeLayout, ObstacleKind, Rect, cell_center, wall_state_to_rectangles};
pub use maze::{
    Boundary, Cell, Direction, MazeTrace, RandomSource, ScriptedRandom, WallState, generate_maze,
    generate_maze_from, generate_maze_traced,
};
pub use win::{BodyLabel, CollisionPair, WinPhase, WinTracker};
