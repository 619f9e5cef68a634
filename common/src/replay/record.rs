use serde::{Deserialize, Serialize};

use crate::config::Validate;
use crate::game::map::{MatchSetup, PlayerStart};
use crate::game::types::{Direction, MatchOutcome};

pub const RECORD_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordPlayer {
    pub id: u8,
    pub row: i32,
    pub col: i32,
    pub color: String,
}

/// A stored finished match: the map it was played on, where each
/// player started, both command-digit logs and the recorded result.
/// Everything the replay controller needs to reproduce the match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub version: u32,
    pub grid: Vec<Vec<u8>>,
    pub players: Vec<RecordPlayer>,
    pub a_steps: String,
    pub b_steps: String,
    pub outcome: MatchOutcome,
}

impl MatchRecord {
    pub fn new(
        setup: &MatchSetup,
        a_steps: String,
        b_steps: String,
        outcome: MatchOutcome,
    ) -> Self {
        Self {
            version: RECORD_VERSION,
            grid: setup.grid.clone(),
            players: setup
                .players
                .iter()
                .map(|p| RecordPlayer {
                    id: p.id,
                    row: p.row,
                    col: p.col,
                    color: p.color.clone(),
                })
                .collect(),
            a_steps,
            b_steps,
            outcome,
        }
    }

    pub fn to_setup(&self) -> Result<MatchSetup, String> {
        if self.players.len() != 2 {
            return Err(format!("Record must have 2 players, found {}", self.players.len()));
        }
        let player = |i: usize| PlayerStart {
            id: self.players[i].id,
            row: self.players[i].row,
            col: self.players[i].col,
            color: self.players[i].color.clone(),
        };
        let setup = MatchSetup {
            grid: self.grid.clone(),
            players: [player(0), player(1)],
        };
        setup.validate()?;
        Ok(setup)
    }
}

impl Validate for MatchRecord {
    fn validate(&self) -> Result<(), String> {
        self.to_setup()?;
        if self.a_steps.is_empty() || self.b_steps.is_empty() {
            return Err("Step logs must not be empty".to_string());
        }
        if self.a_steps.len() != self.b_steps.len() {
            return Err(format!(
                "Step logs differ in length: {} vs {}",
                self.a_steps.len(),
                self.b_steps.len()
            ));
        }
        for log in [&self.a_steps, &self.b_steps] {
            if let Some(c) = log.chars().find(|&c| Direction::from_digit(c).is_none()) {
                return Err(format!("Invalid direction digit '{}' in step log", c));
            }
        }
        Ok(())
    }
}
