use snake_common::games::snake::{Direction, SessionCommand};
use snake_common::log_debug;
use std::io::BufRead;
use tokio::sync::mpsc;

pub const HELP: &str = "w/a/s/d or up/down/left/right to turn (\"wwd\" queues several), \
start, p to pause/resume, restart, quit. Press Enter after each command.";

fn parse_word(word: &str) -> Option<SessionCommand> {
    let command = match word {
        "w" | "up" => SessionCommand::Turn(Direction::Up),
        "s" | "down" => SessionCommand::Turn(Direction::Down),
        "a" | "left" => SessionCommand::Turn(Direction::Left),
        "d" | "right" => SessionCommand::Turn(Direction::Right),
        "g" | "go" | "start" => SessionCommand::Start,
        "p" | "space" => SessionCommand::TogglePause,
        "pause" => SessionCommand::Pause,
        "resume" => SessionCommand::Resume,
        "r" | "restart" => SessionCommand::Restart,
        "q" | "quit" | "exit" => SessionCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Whitespace-separated words; a run of w/a/s/d letters queues one turn per letter.
pub fn parse_commands(line: &str) -> Vec<SessionCommand> {
    let mut commands = Vec::new();
    for word in line.split_whitespace() {
        let word = word.to_ascii_lowercase();
        if let Some(command) = parse_word(&word) {
            commands.push(command);
        } else if word.chars().all(|c| "wasd".contains(c)) {
            commands.extend(word.chars().filter_map(|c| parse_word(&c.to_string())));
        } else {
            log_debug!("Unknown command {:?}", word);
        }
    }
    commands
}

/// Reads stdin on a plain thread; a blocked read must not hold up runtime shutdown.
/// Dropping the sender at end of input ends the session.
pub fn spawn_input_thread(commands: mpsc::UnboundedSender<SessionCommand>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            for command in parse_commands(&line) {
                if commands.send(command).is_err() {
                    return;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_map_to_commands() {
        assert_eq!(
            parse_commands("start up Pause resume restart q"),
            vec![
                SessionCommand::Start,
                SessionCommand::Turn(Direction::Up),
                SessionCommand::Pause,
                SessionCommand::Resume,
                SessionCommand::Restart,
                SessionCommand::Quit,
            ]
        );
    }

    #[test]
    fn test_wasd_run_expands() {
        assert_eq!(
            parse_commands("wdd"),
            vec![
                SessionCommand::Turn(Direction::Up),
                SessionCommand::Turn(Direction::Right),
                SessionCommand::Turn(Direction::Right),
            ]
        );
    }

    #[test]
    fn test_unknown_words_are_skipped() {
        assert_eq!(parse_commands("jump p"), vec![SessionCommand::TogglePause]);
        assert!(parse_commands("   ").is_empty());
    }
}
