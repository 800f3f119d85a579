use std::fmt;

/// A grid coordinate. Signed so a head that has just left the board is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn moved(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn is_within(&self, tile_count: i32) -> bool {
        (0..tile_count).contains(&self.x) && (0..tile_count).contains(&self.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Screen coordinates: y grows downwards.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    Over,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    BoardFilled,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            EndReason::WallCollision => "hit the wall",
            EndReason::SelfCollision => "ran into itself",
            EndReason::BoardFilled => "filled the board",
        };
        write!(f, "{}", text)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionError {
    Reversal { current: Direction, requested: Direction },
    NotRunning(GameStatus),
}

impl fmt::Display for DirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionError::Reversal { current, requested } => {
                write!(f, "cannot turn {:?} while moving {:?}", requested, current)
            }
            DirectionError::NotRunning(status) => {
                write!(f, "direction changes are ignored while {:?}", status)
            }
        }
    }
}

impl std::error::Error for DirectionError {}
