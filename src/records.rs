//! Best solve times
//!
//! Persisted to LocalStorage, keeps the 10 fastest solves per difficulty.

use serde::{Deserialize, Serialize};

use crate::settings::Difficulty;

/// Maximum number of times kept per difficulty
pub const MAX_BEST_TIMES: usize = 10;

/// A single solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRecord {
    pub difficulty: Difficulty,
    /// Seconds from maze creation to touching the goal
    pub seconds: f64,
    /// Seed of the solved maze, so it can be replayed
    pub seed: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Fastest solves, sorted ascending by time within each difficulty
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BestTimes {
    pub entries: Vec<SolveRecord>,
}

impl BestTimes {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "maze_ball_best_times";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Entries for one difficulty, fastest first
    pub fn for_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &SolveRecord> {
        self.entries
            .iter()
            .filter(move |e| e.difficulty == difficulty)
    }

    /// Check if a time would make the board
    pub fn qualifies(&self, difficulty: Difficulty, seconds: f64) -> bool {
        if !seconds.is_finite() || seconds < 0.0 {
            return false;
        }
        let board: Vec<_> = self.for_difficulty(difficulty).collect();
        if board.len() < MAX_BEST_TIMES {
            return true;
        }
        board.last().map(|e| seconds < e.seconds).unwrap_or(true)
    }

    /// Record a solve. Returns the 1-indexed rank or None if too slow.
    pub fn add(&mut self, record: SolveRecord) -> Option<usize> {
        if !self.qualifies(record.difficulty, record.seconds) {
            return None;
        }

        let difficulty = record.difficulty;
        let rank = self
            .for_difficulty(difficulty)
            .take_while(|e| e.seconds <= record.seconds)
            .count()
            + 1;

        // Insert after every entry that is not slower, keeping ties stable
        let pos = self
            .entries
            .iter()
            .position(|e| e.difficulty == difficulty && e.seconds > record.seconds)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, record);

        // Trim the slowest of this difficulty
        let mut kept = 0;
        self.entries.retain(|e| {
            if e.difficulty != difficulty {
                return true;
            }
            kept += 1;
            kept <= MAX_BEST_TIMES
        });

        Some(rank)
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<f64> {
        self.for_difficulty(difficulty).next().map(|e| e.seconds)
    }

    /// Load best times from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(times) = serde_json::from_str::<BestTimes>(&json) {
                    log::info!("Loaded {} best times", times.entries.len());
                    return times;
                }
            }
        }

        log::info!("No best times found, starting fresh");
        Self::new()
    }

    /// Save best times to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best times saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Format seconds as `m:ss.t`
pub fn format_time(seconds: f64) -> String {
    let tenths = (seconds.max(0.0) * 10.0).round() as u64;
    let minutes = tenths / 600;
    let rest = tenths % 600;
    format!("{}:{:02}.{}", minutes, rest / 10, rest % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(difficulty: Difficulty, seconds: f64) -> SolveRecord {
        SolveRecord {
            difficulty,
            seconds,
            seed: 1,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_ranks_fastest_first() {
        let mut times = BestTimes::new();
        assert_eq!(times.add(solve(Difficulty::Easy, 30.0)), Some(1));
        assert_eq!(times.add(solve(Difficulty::Easy, 10.0)), Some(1));
        assert_eq!(times.add(solve(Difficulty::Easy, 20.0)), Some(2));
        assert_eq!(times.add(solve(Difficulty::Hard, 90.0)), Some(1));

        let easy: Vec<f64> = times
            .for_difficulty(Difficulty::Easy)
            .map(|e| e.seconds)
            .collect();
        assert_eq!(easy, vec![10.0, 20.0, 30.0]);
        assert_eq!(times.best(Difficulty::Hard), Some(90.0));
        assert_eq!(times.best(Difficulty::Medium), None);
    }

    #[test]
    fn test_board_is_capped_per_difficulty() {
        let mut times = BestTimes::new();
        for i in 0..MAX_BEST_TIMES {
            times.add(solve(Difficulty::Medium, 10.0 + i as f64));
        }
        times.add(solve(Difficulty::Easy, 100.0));

        assert!(!times.qualifies(Difficulty::Medium, 50.0));
        assert_eq!(times.add(solve(Difficulty::Medium, 50.0)), None);
        assert_eq!(times.add(solve(Difficulty::Medium, 9.0)), Some(1));

        assert_eq!(times.for_difficulty(Difficulty::Medium).count(), MAX_BEST_TIMES);
        assert_eq!(times.best(Difficulty::Medium), Some(9.0));
        assert_eq!(times.best(Difficulty::Easy), Some(100.0));
    }

    #[test]
    fn test_rejects_invalid_times() {
        let times = BestTimes::new();
        assert!(!times.qualifies(Difficulty::Easy, f64::NAN));
        assert!(!times.qualifies(Difficulty::Easy, -1.0));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00.0");
        assert_eq!(format_time(65.44), "1:05.4");
        assert_eq!(format_time(599.96), "10:00.0");
    }
}
