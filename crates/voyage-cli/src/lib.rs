//! # voyage-cli — CLI Tool for Voyage
//!
//! Provides the `voyage` command-line interface over the voyage-core route
//! search engine.
//!
//! ## Subcommands
//!
//! - `voyage route` — plan a route across a plain-text terrain map and print
//!   it as JSON.
//!
//! ```bash
//! voyage route maps/crater.txt --from 0,0 --to 14,9
//! voyage -v --config search.yaml route maps/crater.txt --from 0,0 --to 14,9 --diagonal
//! ```

pub mod grid;
pub mod route;
