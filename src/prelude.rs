// Traits
pub use crate::pipeline::{BacklinkCounter, EntityResolver, Wait};

// Structs and enums
pub use crate::config::{Args, Config};
pub use crate::entity_id::EntityId;
pub use crate::error::BacklinkError;
pub use crate::language::Language;
pub use crate::output::{OutputRow, ResultWriter, RowOutcome, NOT_AVAILABLE};
pub use crate::pipeline::{MaxAttempts, Pipeline, RunSummary, TokioWait};
pub use crate::search::{Search, SearchResult};
pub use crate::wikidata_api::WikidataApi;
