//! QuestScribe Engine library.
//!
//! Server-side code for the QuestScribe turn-based narrative game.
//!
//! ## Structure
//!
//! - `use_cases/` - Turn resolution pipeline and the game-action boundary
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
