use std::collections::VecDeque;

use super::types::{Cell, Direction};

pub const INITIAL_LENGTH: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    /// Head first.
    pub body: VecDeque<Cell>,
    /// Direction used by the most recent move.
    pub direction: Direction,
    /// Applied at the start of the next move.
    pub pending_direction: Option<Direction>,
}

impl Snake {
    /// Builds a straight snake with `length` cells trailing behind `head`.
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| Cell::new(head.x - dx * i, head.y - dy * i))
            .collect();

        Self {
            body,
            direction,
            pending_direction: None,
        }
    }

    /// The starting snake: three cells centred on the board, heading right.
    pub fn centered(tile_count: i32) -> Self {
        let center = tile_count / 2;
        Self::new(Cell::new(center, center), Direction::Right, INITIAL_LENGTH)
    }

    /// Arbitrary body, head first. Returns `None` for an empty body.
    pub fn from_cells(cells: Vec<Cell>, direction: Direction) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }
        Some(Self {
            body: cells.into(),
            direction,
            pending_direction: None,
        })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn body_hits_head(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// The direction the next move will use.
    pub fn heading(&self) -> Direction {
        self.pending_direction.unwrap_or(self.direction)
    }

    pub fn commit_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// Prepends the next head and returns it. The tail stays until `drop_tail`.
    pub fn advance_head(&mut self) -> Cell {
        let next_head = self.head().moved(self.direction);
        self.body.push_front(next_head);
        next_head
    }

    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_snake_on_twenty_grid() {
        let snake = Snake::centered(20);
        let cells: Vec<Cell> = snake.body.iter().copied().collect();
        assert_eq!(
            cells,
            vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]
        );
        assert_eq!(snake.direction, Direction::Right);
    }

    #[test]
    fn test_snake_trails_behind_head() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Up, 3);
        assert_eq!(snake.body[1], Cell::new(5, 6));
        assert_eq!(snake.body[2], Cell::new(5, 7));
    }

    #[test]
    fn test_advance_then_drop_keeps_length() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.advance_head(), Cell::new(6, 5));
        assert_eq!(snake.len(), 4);
        snake.drop_tail();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.body.back(), Some(&Cell::new(4, 5)));
    }

    #[test]
    fn test_from_cells_rejects_empty() {
        assert!(Snake::from_cells(vec![], Direction::Left).is_none());
    }

    #[test]
    fn test_body_hits_head_ignores_head_itself() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        assert!(!snake.body_hits_head());

        let looped = Snake::from_cells(
            vec![Cell::new(5, 5), Cell::new(5, 4), Cell::new(5, 5)],
            Direction::Down,
        )
        .unwrap();
        assert!(looped.body_hits_head());
    }

    #[test]
    fn test_pending_direction_commits_once() {
        let mut snake = Snake::centered(20);
        snake.pending_direction = Some(Direction::Up);
        assert_eq!(snake.heading(), Direction::Up);
        snake.commit_direction();
        assert_eq!(snake.direction, Direction::Up);
        assert!(snake.pending_direction.is_none());
    }
}
