//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{
    ClockPort, CompendiumRepo, PlayerStatsRepo, SessionStore, TurnHistoryRepo,
};
use crate::use_cases::session::{GetStats, PlayGameAction, SessionUseCases};
use crate::use_cases::turn::{CompendiumGateway, Narrator, ResolveTurn};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub session: SessionUseCases,
}

/// Collaborators the application is assembled from.
pub struct AppPorts {
    pub compendium: Arc<dyn CompendiumRepo>,
    pub player_stats: Arc<dyn PlayerStatsRepo>,
    pub history: Arc<dyn TurnHistoryRepo>,
    pub session: Arc<dyn SessionStore>,
    pub clock: Arc<dyn ClockPort>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(ports: AppPorts, narrator: Narrator) -> Self {
        let gateway = Arc::new(CompendiumGateway::new(ports.compendium));
        let resolve_turn = Arc::new(ResolveTurn::new(
            gateway,
            Arc::new(narrator),
            ports.player_stats.clone(),
        ));

        let play = Arc::new(PlayGameAction::new(
            resolve_turn,
            ports.session.clone(),
            ports.player_stats,
            ports.history,
            ports.clock,
        ));
        let stats = Arc::new(GetStats::new(ports.session));

        Self {
            use_cases: UseCases {
                session: SessionUseCases::new(play, stats),
            },
        }
    }
}
