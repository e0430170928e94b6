//! Wall geometry derived from a finished maze
//!
//! Every closed boundary becomes one axis-aligned rectangle, and four more
//! enclose the play area. Coordinates are in pixels with y pointing down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::maze::WallState;
use super::win::BodyLabel;
use crate::config::MazeConfig;
use crate::consts::*;

/// What an obstacle rectangle stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Interior wall between two cells
    Wall,
    /// Outer edge of the play area
    Boundary,
    /// Win marker
    Goal,
}

impl ObstacleKind {
    /// Body label the physics world sees
    pub fn label(&self) -> BodyLabel {
        match self {
            ObstacleKind::Wall => BodyLabel::Wall,
            ObstacleKind::Boundary => BodyLabel::Boundary,
            ObstacleKind::Goal => BodyLabel::Goal,
        }
    }
}

/// Axis-aligned rectangle given by center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2, kind: ObstacleKind) -> Self {
        Self { center, size, kind }
    }
}

/// Rectangles for every closed wall plus the four outer boundaries
pub fn wall_state_to_rectangles(walls: &WallState, cell_width: f32, cell_height: f32) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(walls.closed_count() + 4);

    for (row, line) in walls.horizontal_open().iter().enumerate() {
        for (col, &open) in line.iter().enumerate() {
            if open {
                continue;
            }
            rects.push(Rect::new(
                Vec2::new(
                    col as f32 * cell_width + cell_width / 2.0,
                    (row + 1) as f32 * cell_height,
                ),
                Vec2::new(cell_width, WALL_THICKNESS),
                ObstacleKind::Wall,
            ));
        }
    }

    for (row, line) in walls.vertical_open().iter().enumerate() {
        for (col, &open) in line.iter().enumerate() {
            if open {
                continue;
            }
            rects.push(Rect::new(
                Vec2::new(
                    (col + 1) as f32 * cell_width,
                    row as f32 * cell_height + cell_height / 2.0,
                ),
                Vec2::new(WALL_THICKNESS, cell_height),
                ObstacleKind::Wall,
            ));
        }
    }

    let width = walls.cols() as f32 * cell_width;
    let height = walls.rows() as f32 * cell_height;
    rects.extend(boundary_walls(width, height));
    rects
}

/// Top, bottom, left and right edges of a `width x height` area
fn boundary_walls(width: f32, height: f32) -> [Rect; 4] {
    let horizontal = Vec2::new(width, WALL_THICKNESS);
    let vertical = Vec2::new(WALL_THICKNESS, height);
    [
        Rect::new(Vec2::new(width / 2.0, 0.0), horizontal, ObstacleKind::Boundary),
        Rect::new(Vec2::new(width / 2.0, height), horizontal, ObstacleKind::Boundary),
        Rect::new(Vec2::new(0.0, height / 2.0), vertical, ObstacleKind::Boundary),
        Rect::new(Vec2::new(width, height / 2.0), vertical, ObstacleKind::Boundary),
    ]
}

/// Everything the scene needs to place bodies for one maze
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeLayout {
    /// Interior walls followed by the four boundaries
    pub walls: Vec<Rect>,
    /// Marker centered in the last cell
    pub goal: Rect,
    /// Ball spawn, centered in the first cell
    pub ball_start: Vec2,
    pub ball_radius: f32,
}

impl MazeLayout {
    pub fn build(walls: &WallState, config: &MazeConfig) -> Self {
        let (cw, ch) = (config.cell_width, config.cell_height);
        let last_row = walls.rows() - 1;
        let last_col = walls.cols() - 1;

        let goal = Rect::new(
            cell_center(last_row, last_col, cw, ch),
            Vec2::new(cw * GOAL_SIZE_RATIO, ch * GOAL_SIZE_RATIO),
            ObstacleKind::Goal,
        );

        Self {
            walls: wall_state_to_rectangles(walls, cw, ch),
            goal,
            ball_start: cell_center(0, 0, cw, ch),
            ball_radius: config.ball_radius(),
        }
    }

    pub fn interior_walls(&self) -> impl Iterator<Item = &Rect> {
        self.walls.iter().filter(|r| r.kind == ObstacleKind::Wall)
    }

    pub fn boundaries(&self) -> impl Iterator<Item = &Rect> {
        self.walls.iter().filter(|r| r.kind == ObstacleKind::Boundary)
    }
}

/// Pixel center of cell `(row, col)`
pub fn cell_center(row: usize, col: usize, cell_width: f32, cell_height: f32) -> Vec2 {
    Vec2::new(
        col as f32 * cell_width + cell_width / 2.0,
        row as f32 * cell_height + cell_height / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::maze::{Cell, ScriptedRandom, generate_maze, generate_maze_from};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_single_cell_only_boundary() {
        let walls = generate_maze(1, 1, &mut ScriptedRandom::identity()).unwrap();
        let rects = wall_state_to_rectangles(&walls, 100.0, 50.0);
        assert_eq!(rects.len(), 4);
        assert!(rects.iter().all(|r| r.kind == ObstacleKind::Boundary));

        assert!(approx(rects[0].center, Vec2::new(50.0, 0.0)));
        assert!(approx(rects[1].center, Vec2::new(50.0, 50.0)));
        assert!(approx(rects[2].center, Vec2::new(0.0, 25.0)));
        assert!(approx(rects[3].center, Vec2::new(100.0, 25.0)));
        assert!(approx(rects[2].size, Vec2::new(WALL_THICKNESS, 50.0)));
    }

    #[test]
    fn test_one_rect_per_closed_boundary() {
        let walls = generate_maze(7, 9, &mut Pcg32::seed_from_u64(99)).unwrap();
        let rects = wall_state_to_rectangles(&walls, 30.0, 30.0);

        let expected_closed = (7 * 8 + 6 * 9) - (7 * 9 - 1);
        assert_eq!(walls.closed_count(), expected_closed);
        assert_eq!(rects.len(), expected_closed + 4);
        assert_eq!(
            rects.iter().filter(|r| r.kind == ObstacleKind::Wall).count(),
            expected_closed
        );
    }

    #[test]
    fn test_wall_positions_3x3() {
        let walls =
            generate_maze_from(3, 3, Cell::new(1, 1), &mut ScriptedRandom::identity()).unwrap();
        let rects = wall_state_to_rectangles(&walls, 10.0, 20.0);
        let interior: Vec<_> = rects
            .iter()
            .filter(|r| r.kind == ObstacleKind::Wall)
            .collect();

        // Closed: horizontal[1][1], vertical[0][0], vertical[1][0], vertical[1][1]
        assert_eq!(interior.len(), 4);
        assert!(approx(interior[0].center, Vec2::new(15.0, 40.0)));
        assert!(approx(interior[0].size, Vec2::new(10.0, WALL_THICKNESS)));
        assert!(approx(interior[1].center, Vec2::new(10.0, 10.0)));
        assert!(approx(interior[2].center, Vec2::new(10.0, 30.0)));
        assert!(approx(interior[3].center, Vec2::new(20.0, 30.0)));
        assert!(approx(interior[3].size, Vec2::new(WALL_THICKNESS, 20.0)));
    }

    #[test]
    fn test_layout_goal_and_start() {
        let config = MazeConfig::new(4, 5, 20.0, 10.0).unwrap();
        let walls = generate_maze(4, 5, &mut Pcg32::seed_from_u64(3)).unwrap();
        let layout = MazeLayout::build(&walls, &config);

        assert!(approx(layout.ball_start, Vec2::new(10.0, 5.0)));
        assert!(approx(layout.goal.center, Vec2::new(90.0, 35.0)));
        assert!(approx(
            layout.goal.size,
            Vec2::new(20.0 * GOAL_SIZE_RATIO, 10.0 * GOAL_SIZE_RATIO)
        ));
        assert_eq!(layout.goal.kind, ObstacleKind::Goal);
        assert!((layout.ball_radius - 10.0 * BALL_RADIUS_RATIO).abs() < 1e-6);
        assert_eq!(layout.interior_walls().count(), walls.closed_count());
        assert_eq!(layout.boundaries().count(), 4);
    }
}
