//! Game-action boundary: validates input, runs the turn, updates the session.

mod game_action;
mod stats;

use std::sync::Arc;

pub use game_action::{GameActionError, PlayGameAction};
pub use stats::GetStats;

/// Container for session use cases.
pub struct SessionUseCases {
    pub play: Arc<PlayGameAction>,
    pub stats: Arc<GetStats>,
}

impl SessionUseCases {
    pub fn new(play: Arc<PlayGameAction>, stats: Arc<GetStats>) -> Self {
        Self { play, stats }
    }
}
