#![forbid(unsafe_code)]
#![warn(
    clippy::cognitive_complexity,
    clippy::dbg_macro,
    clippy::debug_assert_with_mut_call,
    clippy::doc_link_with_quotes,
    clippy::doc_markdown,
    clippy::empty_line_after_outer_attr,
    clippy::empty_structs_with_brackets,
    clippy::float_cmp,
    clippy::float_cmp_const,
    clippy::float_equality_without_abs,
    keyword_idents,
    clippy::missing_const_for_fn,
    missing_copy_implementations,
    missing_debug_implementations,
    // clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::mod_module_files,
    non_ascii_idents,
    noop_method_call,
    clippy::option_if_let_else,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::semicolon_if_nothing_returned,
    clippy::unseparated_literal_suffix,
    clippy::shadow_unrelated,
    clippy::similar_names,
    clippy::suspicious_operation_groupings,
    unused_crate_dependencies,
    unused_extern_crates,
    unused_import_braces,
    clippy::unused_self,
    clippy::use_debug,
    clippy::used_underscore_binding,
    clippy::useless_let_if_seq,
    clippy::wildcard_dependencies,
    clippy::wildcard_imports
)]

//! **Wikidata backlinks** looks up a list of names on [Wikidata](https://www.wikidata.org),
//! takes the first `wbsearchentities` match for each, and records how many items the
//! entity's `Special:WhatLinksHere` page says it displays. Results go to a CSV file, one
//! row per name, written as soon as the name is done.

pub mod config;
pub mod entity_id;
pub mod error;
pub mod input;
pub mod language;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod prelude;
pub mod search;
pub mod what_links_here;
pub mod wikidata_api;

pub use config::{Args, Config};
pub use entity_id::EntityId;
pub use error::BacklinkError;
pub use language::Language;
pub use output::{OutputRow, ResultWriter, RowOutcome};
pub use pipeline::{
    BacklinkCounter, EntityResolver, MaxAttempts, Pipeline, RunSummary, TokioWait, Wait,
};
pub use search::{Search, SearchResult};
pub use wikidata_api::{WikidataApi, WikidataApiBuilder};
