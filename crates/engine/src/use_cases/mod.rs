//! Use cases - User story orchestration.
//!
//! `turn` is the resolution pipeline itself; `session` is the game-action
//! boundary that feeds it and keeps the dashboard state current.

pub mod session;
pub mod turn;

pub use session::{GameActionError, GetStats, PlayGameAction, SessionUseCases};
pub use turn::{CompendiumGateway, Narrator, ResolveTurn};
