//! # Marquee
//!
//! Natural-language movie search for Rust: free-text queries over a fixed
//! catalog, answered with a ranked top-K list of normalized relevance
//! scores.
//!
//! ## Pipeline
//!
//! - Query parsing: temporal phrases ("late 90s"), genres (with synonym
//!   expansion, "sci-fi" → science fiction), and person names ("starring
//!   Eddie Murphy") become structured constraints
//! - Filtering: AND semantics over the extracted constraints
//! - Scoring: TF-IDF cosine similarity, fuzzy title matching, and metadata
//!   boosts, fused with fixed weights
//! - Ranking: max-normalized scores, deterministic ordering, top-K
//!
//! The index is built once over the full corpus and frozen; queries are
//! pure reads and may run concurrently over a shared engine.
//!
//! ## Example
//!
//! ```
//! use marquee::corpus::MovieRecord;
//! use marquee::index::IndexConfig;
//! use marquee::search::SearchEngine;
//!
//! let records = vec![MovieRecord {
//!     id: 1,
//!     title: "The Terminator".to_string(),
//!     year: Some(1984),
//!     genres: vec!["science fiction".to_string(), "action".to_string()],
//!     director: Some("James Cameron".to_string()),
//!     cast: vec!["Arnold Schwarzenegger".to_string()],
//!     synopsis: "A cyborg assassin is sent back in time.".to_string(),
//!     quality: Some(8.1),
//! }];
//!
//! let engine = SearchEngine::build(records, IndexConfig::default()).unwrap();
//! let hits = engine.search("sci-fi from the 80s", 10);
//! assert_eq!(hits[0].title, "The Terminator");
//! ```

pub mod analysis;
pub mod corpus;
pub mod error;
pub mod index;
pub mod query;
pub mod search;
pub mod storage;
pub mod util;

pub use crate::corpus::MovieRecord;
pub use crate::error::{MarqueeError, Result};
pub use crate::search::{SearchEngine, SearchHit, SearchService};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
