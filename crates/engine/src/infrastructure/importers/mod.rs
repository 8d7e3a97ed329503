//! Content importers for seeding the compendium store.

mod compendium_json;

pub use compendium_json::{CompendiumImporter, ImportError, ImportSummary};
