//! Turn resolution pipeline.
//!
//! Term extraction feeds the compendium gateway; its hits and the pinned
//! monster shape the prompt; the narrator's deltas are folded back into the
//! player's stats by [`ResolveTurn`].

mod compendium;
mod narration;
mod prompt;
mod resolve;
mod terms;

pub use compendium::{CompendiumGateway, CompendiumLookup};
pub use narration::{
    parse_narration, strip_code_fence, NarrationParseError, Narrator, NARRATION_TEMPERATURE,
};
pub use prompt::{build_prompt, NarrationPrompt, DM_SYSTEM_INSTRUCTION, NO_COMPENDIUM_DATA};
pub use resolve::ResolveTurn;
pub use terms::{extract_terms, MAX_TERMS};
