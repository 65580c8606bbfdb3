//! Routing module
//!
//! Validates request paths against the wiki's route table and extracts the
//! page title before any handler runs.

mod matcher;

pub use matcher::{match_route, Operation, RouteMatch, WIKI_ROUTES};
