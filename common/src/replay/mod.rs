pub mod controller;
pub mod file_io;
pub mod record;

pub use controller::{PlaybackState, ReplayController, ReplayError, REPLAY_STEP_INTERVAL_MS};
pub use file_io::{generate_record_filename, load_record, load_record_from_str, save_record, RecordError};
pub use record::{MatchRecord, RecordPlayer, RECORD_VERSION};

pub const RECORD_FILE_EXTENSION: &str = "duelrecord";

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::game::map::{GameMap, MatchSetup, PlayerStart};
    use crate::game::types::MatchOutcome;

    const FRAME_MS: f64 = 16.0;

    /// 13x14 board with only the border ring walled, A in the lower
    /// left facing up, B in the upper right facing down.
    fn border_only_setup() -> MatchSetup {
        let (rows, cols) = (13usize, 14usize);
        let mut grid = vec![vec![0u8; cols]; rows];
        for r in 0..rows {
            grid[r][0] = 1;
            grid[r][cols - 1] = 1;
        }
        for c in 0..cols {
            grid[0][c] = 1;
            grid[rows - 1][c] = 1;
        }
        MatchSetup {
            grid,
            players: [
                PlayerStart { id: 0, row: 11, col: 1, color: "#206CCF".to_string() },
                PlayerStart { id: 1, row: 1, col: 12, color: "#CB272D".to_string() },
            ],
        }
    }

    #[test]
    fn full_replay_applies_outcome_and_finishes_once() {
        let mut map = GameMap::new(&border_only_setup()).unwrap();
        let mut controller = ReplayController::new();
        controller
            .start("1111", "3333", MatchOutcome::PlayerAWon)
            .unwrap();

        let mut finished_signals = 0;
        for _ in 0..200 {
            controller.tick(&mut map, FRAME_MS);
            map.tick(FRAME_MS);
            if controller.take_finished() {
                finished_signals += 1;
            }
        }

        assert_eq!(finished_signals, 1);
        assert_eq!(controller.state(), PlaybackState::Finished);

        // Loser overlay: B is marked dead, A plays out its log.
        assert!(map.snake(1).is_dead());
        assert!(!map.snake(0).is_dead());

        // A consumed the three command pairs applied before the
        // terminal index and walked three cells to the right.
        assert_eq!(map.snake(0).step(), 3);
        assert_eq!(map.snake(0).head().row, 11);
        assert_eq!(map.snake(0).head().col, 4);
    }

    #[test]
    fn record_loaded_from_disk_drives_a_replay() {
        let record = MatchRecord::new(
            &border_only_setup(),
            "1111".to_string(),
            "3333".to_string(),
            MatchOutcome::Draw,
        );
        let content = serde_yaml_ng::to_string(&record).unwrap();
        let loaded = load_record_from_str(&content).unwrap();

        let setup = loaded.to_setup().unwrap();
        let mut map = GameMap::new(&setup).unwrap();
        let mut controller = ReplayController::new();
        controller
            .start(&loaded.a_steps, &loaded.b_steps, loaded.outcome)
            .unwrap();

        for _ in 0..200 {
            controller.tick(&mut map, FRAME_MS);
            map.tick(FRAME_MS);
        }

        assert!(controller.take_finished());
        assert!(map.snake(0).is_dead());
        assert!(map.snake(1).is_dead());
    }
}
