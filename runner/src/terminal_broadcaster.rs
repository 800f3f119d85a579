use snake_common::games::SnapshotBroadcaster;
use snake_common::games::snake::{Cell, GameOverReport, GameSnapshot, GameStatus};
use std::io::Write;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Draws each snapshot as a text frame on stdout.
#[derive(Clone, Default)]
pub struct TerminalBroadcaster;

impl TerminalBroadcaster {
    pub fn new() -> Self {
        Self
    }

    fn write_frame(frame: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed stdout is not worth stopping the game for.
        let _ = write!(stdout, "{}{}", CLEAR_SCREEN, frame);
        let _ = stdout.flush();
    }
}

pub fn render_board(snapshot: &GameSnapshot) -> String {
    let size = snapshot.tile_count as i32;
    let head = snapshot.head();
    let border = format!("+{}+\n", "-".repeat(size as usize));

    let mut frame = format!(
        "Score: {}   High score: {}   {}\n",
        snapshot.score,
        snapshot.high_score,
        status_label(snapshot.status)
    );
    frame.push_str(&border);
    for y in 0..size {
        frame.push('|');
        for x in 0..size {
            let cell = Cell::new(x, y);
            let glyph = if head == Some(cell) {
                '@'
            } else if snapshot.snake.contains(&cell) {
                'o'
            } else if snapshot.food == Some(cell) {
                '*'
            } else {
                ' '
            };
            frame.push(glyph);
        }
        frame.push_str("|\n");
    }
    frame.push_str(&border);
    frame
}

pub fn render_game_over(report: &GameOverReport) -> String {
    format!(
        "Game over! The snake {}.\nScore: {}   High score: {}\nType start to play again or quit to exit.\n",
        report.reason, report.score, report.high_score
    )
}

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle => "[ready: type start]",
        GameStatus::Running => "[running]",
        GameStatus::Paused => "[paused: p to resume]",
        GameStatus::Over => "[game over]",
    }
}

impl SnapshotBroadcaster for TerminalBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        Self::write_frame(&render_board(&snapshot));
    }

    async fn broadcast_game_over(&self, report: GameOverReport) {
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "{}", render_game_over(&report));
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_common::games::snake::{Direction, EndReason};

    fn snapshot() -> GameSnapshot {
        GameSnapshot {
            snake: vec![Cell::new(2, 2), Cell::new(1, 2), Cell::new(0, 2)],
            food: Some(Cell::new(4, 0)),
            direction: Direction::Right,
            score: 30,
            high_score: 50,
            status: GameStatus::Running,
            tick: 7,
            tile_count: 5,
        }
    }

    #[test]
    fn test_board_layout() {
        let frame = render_board(&snapshot());
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines[0], "Score: 30   High score: 50   [running]");
        assert_eq!(lines[1], "+-----+");
        assert_eq!(lines[2], "|    *|");
        assert_eq!(lines[4], "|oo@  |");
        assert_eq!(lines[7], "+-----+");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_game_over_message() {
        let report = GameOverReport {
            snake: vec![Cell::new(-1, 2)],
            score: 40,
            high_score: 40,
            reason: EndReason::WallCollision,
            tick: 12,
        };
        let text = render_game_over(&report);
        assert!(text.starts_with("Game over! The snake hit the wall."));
        assert!(text.contains("Score: 40"));
    }
}
