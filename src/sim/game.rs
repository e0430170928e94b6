//! Game controller
//!
//! Owns one generated maze and the physics bodies built from it. The host
//! forwards key presses and collision-start notifications; everything runs
//! on the host's single event thread.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::control::Control;
use super::geometry::{MazeLayout, Rect};
use super::maze::{WallState, generate_maze};
use super::win::{BodyLabel, CollisionPair, WinTracker};
use crate::config::MazeConfig;
use crate::consts::*;
use crate::error::MazeResult;
use crate::physics::PhysicsWorld;

/// Notable things the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball reached the goal; the maze walls have been released
    Won,
}

/// One maze run wired into a physics world
pub struct Game<W: PhysicsWorld> {
    /// Seed the maze was generated from
    pub seed: u64,
    pub config: MazeConfig,
    walls: WallState,
    tracker: WinTracker,
    world: W,
    ball: W::Handle,
    goal: W::Handle,
    /// Interior walls, released on win
    wall_bodies: Vec<W::Handle>,
    boundary_bodies: Vec<W::Handle>,
}

impl<W: PhysicsWorld> Game<W> {
    /// Generate a maze from `seed` and populate `world` with it
    pub fn new(config: MazeConfig, seed: u64, mut world: W) -> MazeResult<Self> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let walls = generate_maze(config.rows, config.cols, &mut rng)?;
        let layout = MazeLayout::build(&walls, &config);

        world.set_gravity(Vec2::ZERO);

        let mut place = |rect: &Rect| {
            let handle = world.create_static_rectangle(rect, rect.kind.label());
            world.add_to_world(handle);
            handle
        };
        let wall_bodies: Vec<_> = layout.interior_walls().map(&mut place).collect();
        let boundary_bodies: Vec<_> = layout.boundaries().map(&mut place).collect();

        let goal = world.create_static_rectangle(&layout.goal, BodyLabel::Goal);
        world.add_to_world(goal);

        let ball = world.create_circle(layout.ball_start, layout.ball_radius, BodyLabel::Ball);
        world.add_to_world(ball);

        log::info!(
            "Maze {}x{} ready (seed {}, {} walls)",
            config.rows,
            config.cols,
            seed,
            wall_bodies.len()
        );

        Ok(Self {
            seed,
            config,
            walls,
            tracker: WinTracker::new(),
            world,
            ball,
            goal,
            wall_bodies,
            boundary_bodies,
        })
    }

    /// Apply one steering press. Returns false once the game is over.
    pub fn handle_control(&mut self, control: Control) -> bool {
        if self.tracker.is_won() {
            return false;
        }
        let velocity = self.world.velocity(self.ball);
        let next = control.apply(velocity, VELOCITY_STEP, self.config.max_velocity);
        self.world.set_velocity(self.ball, next);
        true
    }

    /// Feed a batch of collision-start pairs from the engine
    pub fn handle_collision_start(&mut self, pairs: &[CollisionPair]) -> Option<GameEvent> {
        for pair in pairs {
            if self.tracker.report_collision(pair.a, pair.b) {
                self.collapse();
                return Some(GameEvent::Won);
            }
        }
        None
    }

    /// Drop the interior walls under gravity; the boundary stays put
    fn collapse(&mut self) {
        log::info!("Maze solved (seed {})", self.seed);
        self.world.set_gravity(Vec2::new(0.0, WIN_GRAVITY_Y));
        for &handle in &self.wall_bodies {
            self.world.set_static(handle, false);
        }
    }

    pub fn is_won(&self) -> bool {
        self.tracker.is_won()
    }

    pub fn walls(&self) -> &WallState {
        &self.walls
    }

    pub fn ball(&self) -> W::Handle {
        self.ball
    }

    pub fn goal(&self) -> W::Handle {
        self.goal
    }

    pub fn boundary_bodies(&self) -> &[W::Handle] {
        &self.boundary_bodies
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }
}
