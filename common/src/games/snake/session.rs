use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::games::{SessionRng, SnapshotBroadcaster};
use crate::storage::HighScoreStore;
use crate::{log, log_debug};

use super::game_state::{SnakeGameState, TickOutcome};
use super::settings::SnakeSessionSettings;
use super::snapshot::GameSnapshot;
use super::types::{Direction, GameStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Turn(Direction),
    Start,
    Pause,
    Resume,
    TogglePause,
    Restart,
    Quit,
}

#[derive(Clone)]
pub struct SnakeSessionState {
    pub game_state: Arc<Mutex<SnakeGameState>>,
    pub tick_interval: Duration,
}

impl SnakeSessionState {
    pub fn create(
        settings: &SnakeSessionSettings,
        seed: u64,
        high_score_store: Box<dyn HighScoreStore>,
    ) -> Self {
        let game_state = SnakeGameState::new(settings, SessionRng::new(seed), high_score_store);
        log!(
            "Created {}x{} game (seed {}), tick every {:?}",
            settings.tile_count(),
            settings.tile_count(),
            seed,
            settings.tick_interval()
        );

        Self {
            game_state: Arc::new(Mutex::new(game_state)),
            tick_interval: settings.tick_interval(),
        }
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.game_state.lock().await.snapshot()
    }
}

/// Drives a game: owns the repeating timer and applies commands between ticks.
pub struct SnakeSession;

impl SnakeSession {
    /// Runs until `Quit` or until every command sender is dropped.
    pub async fn run(
        session_state: SnakeSessionState,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        broadcaster: impl SnapshotBroadcaster,
    ) -> GameSnapshot {
        let mut tick_timer: Option<Interval> = None;
        broadcaster.broadcast_state(session_state.snapshot().await).await;

        loop {
            tokio::select! {
                _ = wait_for_tick(&mut tick_timer) => {
                    let mut game_state = session_state.game_state.lock().await;
                    let outcome = game_state.tick();
                    let snapshot = game_state.snapshot();
                    drop(game_state);

                    broadcaster.broadcast_state(snapshot).await;

                    if let TickOutcome::GameOver(report) = outcome {
                        tick_timer = None;
                        broadcaster.broadcast_game_over(report).await;
                    }
                }
                command = commands.recv() => {
                    let command = match command {
                        Some(SessionCommand::Quit) | None => break,
                        Some(command) => command,
                    };

                    let mut game_state = session_state.game_state.lock().await;
                    let changed = Self::handle_command(&mut game_state, command);
                    let status = game_state.status();
                    let snapshot = changed.then(|| game_state.snapshot());
                    drop(game_state);

                    match (status, tick_timer.is_some()) {
                        (GameStatus::Running, false) => {
                            tick_timer = Some(new_tick_timer(session_state.tick_interval));
                        }
                        (GameStatus::Running, true) => {}
                        (_, _) => tick_timer = None,
                    }

                    if let Some(snapshot) = snapshot {
                        broadcaster.broadcast_state(snapshot).await;
                    }
                }
            }
        }

        log!("Session finished");
        session_state.snapshot().await
    }

    /// Returns whether the command changed anything a renderer would show.
    fn handle_command(game_state: &mut SnakeGameState, command: SessionCommand) -> bool {
        match command {
            SessionCommand::Turn(direction) => {
                if let Err(e) = game_state.set_direction(direction) {
                    log_debug!("Ignored turn: {}", e);
                }
                false
            }
            SessionCommand::Start => game_state.start(),
            SessionCommand::Pause => game_state.pause(),
            SessionCommand::Resume => game_state.resume(),
            SessionCommand::TogglePause => game_state.toggle_pause(),
            SessionCommand::Restart => {
                game_state.restart();
                true
            }
            SessionCommand::Quit => false,
        }
    }
}

fn new_tick_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

async fn wait_for_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::{Cell, EndReason, GameOverReport};
    use crate::storage::{InMemoryKeyValueStore, KeyValueHighScoreStore};
    use tokio::task::JoinHandle;
    use tokio::time::sleep;

    #[derive(Clone, Debug)]
    enum Event {
        State(GameSnapshot),
        GameOver(GameOverReport),
    }

    #[derive(Clone, Default)]
    struct RecordingBroadcaster {
        events: Arc<std::sync::Mutex<Vec<Event>>>,
    }

    impl RecordingBroadcaster {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl SnapshotBroadcaster for RecordingBroadcaster {
        async fn broadcast_state(&self, snapshot: GameSnapshot) {
            self.events.lock().unwrap().push(Event::State(snapshot));
        }

        async fn broadcast_game_over(&self, report: GameOverReport) {
            self.events.lock().unwrap().push(Event::GameOver(report));
        }
    }

    struct Harness {
        state: SnakeSessionState,
        commands: mpsc::UnboundedSender<SessionCommand>,
        handle: JoinHandle<GameSnapshot>,
        broadcaster: RecordingBroadcaster,
    }

    impl Harness {
        fn spawn() -> Self {
            let store = KeyValueHighScoreStore::new(InMemoryKeyValueStore::new());
            let state = SnakeSessionState::create(&SnakeSessionSettings::default(), 42, Box::new(store));
            let (commands, rx) = mpsc::unbounded_channel();
            let broadcaster = RecordingBroadcaster::default();
            let handle = tokio::spawn(SnakeSession::run(state.clone(), rx, broadcaster.clone()));
            Self {
                state,
                commands,
                handle,
                broadcaster,
            }
        }

        fn send(&self, command: SessionCommand) {
            self.commands.send(command).unwrap();
        }

        async fn snapshot(&self) -> GameSnapshot {
            self.state.snapshot().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_until_started() {
        let harness = Harness::spawn();
        sleep(Duration::from_millis(1000)).await;

        let snapshot = harness.snapshot().await;
        assert_eq!(snapshot.status, GameStatus::Idle);
        assert_eq!(snapshot.tick, 0);

        harness.send(SessionCommand::Quit);
        let last = harness.handle.await.unwrap();
        assert_eq!(last.tick, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_suspends_ticks() {
        let harness = Harness::spawn();
        harness.send(SessionCommand::Start);
        sleep(Duration::from_millis(350)).await;

        let running = harness.snapshot().await;
        assert_eq!(running.status, GameStatus::Running);
        assert!((2..=4).contains(&running.tick), "tick = {}", running.tick);

        harness.send(SessionCommand::Pause);
        sleep(Duration::from_millis(10)).await;
        let paused = harness.snapshot().await;
        assert_eq!(paused.status, GameStatus::Paused);

        sleep(Duration::from_millis(1000)).await;
        assert_eq!(harness.snapshot().await, paused);

        harness.send(SessionCommand::TogglePause);
        sleep(Duration::from_millis(250)).await;
        let resumed = harness.snapshot().await;
        assert_eq!(resumed.status, GameStatus::Running);
        assert!(resumed.tick > paused.tick);

        harness.send(SessionCommand::Quit);
        harness.handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_applies_on_next_tick() {
        let harness = Harness::spawn();
        harness.send(SessionCommand::Start);
        harness.send(SessionCommand::Turn(Direction::Up));
        harness.send(SessionCommand::Turn(Direction::Down));
        sleep(Duration::from_millis(150)).await;

        let snapshot = harness.snapshot().await;
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.head(), Some(Cell::new(10, 11)));

        drop(harness.commands);
        harness.handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_wall_collision_stops_timer_and_reports() {
        let harness = Harness::spawn();
        harness.send(SessionCommand::Start);
        sleep(Duration::from_millis(2000)).await;

        let over = harness.snapshot().await;
        assert_eq!(over.status, GameStatus::Over);
        // Ten cells from the centre of a 20-wide board to the right wall.
        assert_eq!(over.tick, 10);

        let reports: Vec<GameOverReport> = harness
            .broadcaster
            .events()
            .into_iter()
            .filter_map(|event| match event {
                Event::GameOver(report) => Some(report),
                Event::State(_) => None,
            })
            .collect();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].reason, EndReason::WallCollision);
        assert_eq!(reports[0].tick, 10);

        sleep(Duration::from_millis(500)).await;
        assert_eq!(harness.snapshot().await.tick, 10);

        harness.send(SessionCommand::Start);
        sleep(Duration::from_millis(150)).await;
        let fresh = harness.snapshot().await;
        assert_eq!(fresh.status, GameStatus::Running);
        assert_eq!(fresh.tick, 1);
        assert_eq!(fresh.head(), Some(Cell::new(11, 10)));

        harness.send(SessionCommand::Quit);
        harness.handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_stops_ticking_and_goes_idle() {
        let harness = Harness::spawn();
        harness.send(SessionCommand::Start);
        sleep(Duration::from_millis(250)).await;
        harness.send(SessionCommand::Restart);
        sleep(Duration::from_millis(500)).await;

        let snapshot = harness.snapshot().await;
        assert_eq!(snapshot.status, GameStatus::Idle);
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.score, 0);

        harness.send(SessionCommand::Quit);
        harness.handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_tick_is_broadcast() {
        let harness = Harness::spawn();
        harness.send(SessionCommand::Start);
        sleep(Duration::from_millis(550)).await;
        harness.send(SessionCommand::Quit);
        let last = harness.handle.await.unwrap();

        let ticks: Vec<u64> = harness
            .broadcaster
            .events()
            .into_iter()
            .filter_map(|event| match event {
                Event::State(snapshot) => Some(snapshot.tick),
                Event::GameOver(_) => None,
            })
            .collect();
        // Initial idle snapshot, the start transition, then one per tick.
        assert_eq!(&ticks[..2], &[0, 0]);
        let tick_events: Vec<u64> = ticks[2..].to_vec();
        let expected: Vec<u64> = (1..=last.tick).collect();
        assert_eq!(tick_events, expected);
    }
}
