use std::future::Future;

use super::snake::{GameOverReport, GameSnapshot};

/// Receives everything a renderer needs. Implementations must not block the tick loop.
pub trait SnapshotBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, report: GameOverReport) -> impl Future<Output = ()> + Send;
}
