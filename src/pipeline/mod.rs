//! Pipeline entry points for the command line.
//!
//! - `run_search`: Search by title and expand related subjects
//! - `run_lookup`: Fetch a single subject by ID

pub mod search;

pub use search::{run_lookup, run_search};
