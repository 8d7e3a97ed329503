//! QuestScribe Shared - wire types for the game-action HTTP API.
//!
//! No business logic lives here: request/response DTOs only.

pub mod requests;
pub mod responses;

pub use requests::{GameActionRequest, PlayerStatsPayload};
pub use responses::{ErrorResponse, HealthResponse, IndexResponse, StatsResponse};
