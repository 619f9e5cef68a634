use serde::{Deserialize, Serialize};

/// Wire encoding: 0=up, 1=right, 2=down, 3=left. Both the live command
/// protocol and recorded step strings use these digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn from_index(index: u8) -> Option<Direction> {
        match index {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }

    pub fn from_digit(digit: char) -> Option<Direction> {
        digit.to_digit(10).and_then(|d| Self::from_index(d as u8))
    }

    pub fn index(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// (row, col) offset of one step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnakeStatus {
    Idle,
    Moving,
    Dead,
}

/// Recorded result of a finished match. Tag spellings match the
/// record format produced by the match server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    #[serde(rename = "draw")]
    Draw,
    #[serde(rename = "playerAWon")]
    PlayerAWon,
    #[serde(rename = "playerBWon")]
    PlayerBWon,
    #[serde(rename = "none")]
    None,
}
