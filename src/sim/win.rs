//! Win condition
//!
//! `Playing -> Won` fires once, when the ball touches the goal.

use serde::{Deserialize, Serialize};

/// Identity attached to every body handed to the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLabel {
    Ball,
    Goal,
    Wall,
    Boundary,
}

impl BodyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyLabel::Ball => "ball",
            BodyLabel::Goal => "goal",
            BodyLabel::Wall => "wall",
            BodyLabel::Boundary => "boundary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ball" => Some(BodyLabel::Ball),
            "goal" => Some(BodyLabel::Goal),
            "wall" => Some(BodyLabel::Wall),
            "boundary" => Some(BodyLabel::Boundary),
            _ => None,
        }
    }
}

/// Two bodies that just started touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionPair {
    pub a: BodyLabel,
    pub b: BodyLabel,
}

impl CollisionPair {
    pub fn new(a: BodyLabel, b: BodyLabel) -> Self {
        Self { a, b }
    }

    /// Order-independent membership test
    pub fn is_between(&self, x: BodyLabel, y: BodyLabel) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// Phase of a single maze run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WinPhase {
    #[default]
    Playing,
    /// Terminal
    Won,
}

/// Watches collision reports for ball-meets-goal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WinTracker {
    phase: WinPhase,
}

impl WinTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one collision. Returns true only on the call that wins.
    pub fn report_collision(&mut self, a: BodyLabel, b: BodyLabel) -> bool {
        if self.phase == WinPhase::Won {
            return false;
        }
        if CollisionPair::new(a, b).is_between(BodyLabel::Ball, BodyLabel::Goal) {
            self.phase = WinPhase::Won;
            return true;
        }
        false
    }

    pub fn is_won(&self) -> bool {
        self.phase == WinPhase::Won
    }

    pub fn phase(&self) -> WinPhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_goal_wins_either_order() {
        let mut tracker = WinTracker::new();
        assert!(tracker.report_collision(BodyLabel::Ball, BodyLabel::Goal));
        assert!(tracker.is_won());

        let mut tracker = WinTracker::new();
        assert!(tracker.report_collision(BodyLabel::Goal, BodyLabel::Ball));
        assert_eq!(tracker.phase(), WinPhase::Won);
    }

    #[test]
    fn test_other_contacts_do_not_win() {
        let mut tracker = WinTracker::new();
        assert!(!tracker.report_collision(BodyLabel::Ball, BodyLabel::Wall));
        assert!(!tracker.report_collision(BodyLabel::Ball, BodyLabel::Boundary));
        assert!(!tracker.report_collision(BodyLabel::Goal, BodyLabel::Wall));
        assert!(!tracker.report_collision(BodyLabel::Ball, BodyLabel::Ball));
        assert!(!tracker.is_won());
    }

    #[test]
    fn test_won_is_terminal() {
        let mut tracker = WinTracker::new();
        assert!(tracker.report_collision(BodyLabel::Ball, BodyLabel::Goal));
        assert!(!tracker.report_collision(BodyLabel::Ball, BodyLabel::Goal));
        assert!(!tracker.report_collision(BodyLabel::Ball, BodyLabel::Wall));
        assert!(tracker.is_won());
    }

    #[test]
    fn test_label_round_trip() {
        for label in [
            BodyLabel::Ball,
            BodyLabel::Goal,
            BodyLabel::Wall,
            BodyLabel::Boundary,
        ] {
            assert_eq!(BodyLabel::from_str(label.as_str()), Some(label));
        }
        assert_eq!(BodyLabel::from_str("Rectangle Body"), None);
    }
}
